//! `localStorage`-backed cache of the signed-in identity.
//!
//! The cached record only exists so a reload can paint the logged-in UI
//! before the `GET /me` round-trip resolves; the session cookie stays
//! authoritative. Absent or corrupt records read as "no identity", never
//! as an error, and a corrupt record is left in place rather than
//! repaired; the next write or remove replaces it anyway.

#[cfg(test)]
#[path = "identity_cache_test.rs"]
mod identity_cache_test;

use crate::net::types::UserIdentity;

/// Fixed, well-known `localStorage` key holding the identity record.
pub const STORAGE_KEY: &str = "user";

/// Durable key-value storage for the identity record.
///
/// The session store is the only writer; everything else reads the
/// identity through the store.
pub trait IdentityCache {
    /// Read and decode the record. Absent or corrupt records yield `None`.
    fn read(&self) -> Option<UserIdentity>;

    /// Serialize and store the record. Must complete before the state
    /// transition it mirrors is considered done.
    fn write(&mut self, identity: &UserIdentity);

    /// Drop the record.
    fn remove(&mut self);
}

/// Browser `localStorage` implementation. Inert outside the browser, where
/// every read is a miss.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageCache;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

impl IdentityCache for LocalStorageCache {
    fn read(&self) -> Option<UserIdentity> {
        #[cfg(feature = "hydrate")]
        {
            let raw = local_storage()?.get_item(STORAGE_KEY).ok().flatten()?;
            decode_record(&raw)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    fn write(&mut self, identity: &UserIdentity) {
        #[cfg(feature = "hydrate")]
        {
            if let (Some(storage), Ok(raw)) = (local_storage(), serde_json::to_string(identity)) {
                let _ = storage.set_item(STORAGE_KEY, &raw);
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = identity;
        }
    }

    fn remove(&mut self) {
        #[cfg(feature = "hydrate")]
        {
            if let Some(storage) = local_storage() {
                let _ = storage.remove_item(STORAGE_KEY);
            }
        }
    }
}

/// Decode one raw record. Anything that does not parse into an identity
/// with a non-empty username is treated as a cache miss.
#[cfg(any(feature = "hydrate", test))]
fn decode_record(raw: &str) -> Option<UserIdentity> {
    match serde_json::from_str::<UserIdentity>(raw) {
        Ok(identity) if !identity.username.is_empty() => Some(identity),
        Ok(_) => {
            log::warn!("ignoring cached identity with empty username");
            None
        }
        Err(err) => {
            log::warn!("ignoring corrupt identity record: {err}");
            None
        }
    }
}

/// In-memory cache for native tests. Clones share one record, so a second
/// store built over the same cache models a page reload, and raw access
/// permits injecting corrupt records.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub struct MemoryCache {
    record: std::rc::Rc<std::cell::RefCell<Option<String>>>,
}

#[cfg(test)]
impl MemoryCache {
    pub fn raw(&self) -> Option<String> {
        self.record.borrow().clone()
    }

    pub fn set_raw(&self, raw: &str) {
        *self.record.borrow_mut() = Some(raw.to_owned());
    }
}

#[cfg(test)]
impl IdentityCache for MemoryCache {
    fn read(&self) -> Option<UserIdentity> {
        self.record.borrow().as_deref().and_then(decode_record)
    }

    fn write(&mut self, identity: &UserIdentity) {
        if let Ok(raw) = serde_json::to_string(identity) {
            *self.record.borrow_mut() = Some(raw);
        }
    }

    fn remove(&mut self) {
        *self.record.borrow_mut() = None;
    }
}
