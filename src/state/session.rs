//! The session store: single authority for "who is logged in".
//!
//! Three places claim to know the current user: the server session
//! behind the cookie, this in-memory state, and the `localStorage`
//! record. The cookie wins. The store keeps the other two consistent:
//! every transition to a signed-in user writes the cache record before
//! the operation completes, and every transition to anonymous removes
//! it. Readers only ever observe a definite state; async operations
//! apply their result in one synchronous step after the network call
//! resolves.
//!
//! On the browser's single-threaded event loop that is enough for
//! atomicity; a multi-threaded host would need a lock around the
//! read-modify-write paths.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use crate::net::api::ApiError;
use crate::net::types::UserIdentity;
use crate::storage::identity_cache::IdentityCache;

/// Result of one backend session probe.
///
/// `Unconfirmed` keeps the failure reason for diagnostics; the store
/// collapses it to the logged-out state at its boundary, so callers never
/// see an error.
#[derive(Debug)]
pub enum ProbeOutcome {
    Confirmed(UserIdentity),
    Unconfirmed(ApiError),
}

/// In-memory session state plus its durable mirror.
///
/// `None` is anonymous, `Some` is authenticated; there is no in-between
/// visible to readers. All writes to the cache record go through here.
#[derive(Clone, Debug)]
pub struct SessionStore<C> {
    user: Option<UserIdentity>,
    cache: C,
}

impl<C: IdentityCache> SessionStore<C> {
    /// A fresh store starts anonymous; call [`restore_on_load`] to seed it
    /// from the cache.
    ///
    /// [`restore_on_load`]: SessionStore::restore_on_load
    pub fn new(cache: C) -> Self {
        Self { user: None, cache }
    }

    /// Seed the session from the cached record, synchronously.
    ///
    /// A hit lets the UI paint the logged-in view immediately on reload;
    /// an absent or corrupt record leaves the session anonymous and is not
    /// an error. The backend probe reconciles afterwards.
    pub fn restore_on_load(&mut self) {
        self.user = self.cache.read();
    }

    /// Record a sign-in the backend has already accepted.
    ///
    /// The caller has completed the `POST /login` round-trip, so the
    /// session cookie is set; this is a trusted local transition with no
    /// network call. Callers must pass a non-empty username. A second
    /// login simply overwrites the identity.
    pub fn login(&mut self, identity: UserIdentity) {
        self.cache.write(&identity);
        self.user = Some(identity);
    }

    /// Reconcile against the backend session, via `GET /me`.
    ///
    /// Resolves to a definite state either way: a recognized session
    /// signs the user in, anything else signs them out. Never errors.
    pub async fn fetch_current_user(&mut self) {
        let outcome = crate::net::api::probe_identity().await;
        self.resolve_probe(outcome);
    }

    /// Apply a probe result to the session and its cached mirror.
    ///
    /// A stale or invalid session must never leave the client claiming
    /// authentication it cannot prove, so `Unconfirmed` falls back to
    /// anonymous and only logs the reason.
    pub fn resolve_probe(&mut self, outcome: ProbeOutcome) {
        match outcome {
            ProbeOutcome::Confirmed(identity) => {
                self.cache.write(&identity);
                self.user = Some(identity);
            }
            ProbeOutcome::Unconfirmed(reason) => {
                log::warn!("no valid backend session: {reason}");
                self.clear_local();
            }
        }
    }

    /// Sign out: tell the backend to invalidate the cookie, then clear
    /// local state unconditionally.
    ///
    /// The user must never stay signed in on the client because the
    /// server was unreachable; worst case the server session lingers
    /// until its own expiry.
    pub async fn logout(&mut self) {
        crate::net::api::invalidate().await;
        self.clear_local();
    }

    /// Drop the in-memory identity and the cached record.
    pub fn clear_local(&mut self) {
        self.cache.remove();
        self.user = None;
    }

    /// Current identity, if any. Never blocks, never touches the network.
    pub fn current_user(&self) -> Option<&UserIdentity> {
        self.user.as_ref()
    }

    /// The boolean the navigation gate consumes.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}
