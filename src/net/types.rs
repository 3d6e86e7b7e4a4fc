//! Wire types shared between the API layer, the session store, and the
//! identity cache.

/// The authenticated principal as the backend reports it.
///
/// This is also the shape of the `localStorage` record; no password or
/// token material is ever stored client-side, the session cookie carries
/// the actual credential.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserIdentity {
    pub username: String,
}
