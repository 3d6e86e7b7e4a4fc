//! Session context wiring for the Leptos application.
//!
//! The store is created once at startup, seeded from `localStorage`, and
//! provided as a context signal; views and the router gate reach it via
//! [`use_session`] instead of any ambient global. Async operations spawn
//! on the browser event loop and apply their definite outcome to the
//! signal in a single `update`, so no reader ever sees a half-applied
//! transition.

use leptos::prelude::*;

use crate::net::api::ApiError;
use crate::net::types::UserIdentity;
use crate::state::session::SessionStore;
use crate::storage::identity_cache::LocalStorageCache;

/// Handle to the shared session store.
pub type SessionSignal = RwSignal<SessionStore<LocalStorageCache>>;

/// Create the session for this application lifetime and provide it as
/// context.
///
/// Seeds synchronously from the cache so the first paint already shows
/// the remembered user, then kicks off the backend reconcile.
pub fn provide_session() -> SessionSignal {
    let mut store = SessionStore::new(LocalStorageCache);
    store.restore_on_load();
    let session = RwSignal::new(store);
    provide_context(session);
    spawn_session_refresh(session);
    session
}

/// Fetch the session signal provided by [`provide_session`].
pub fn use_session() -> SessionSignal {
    expect_context::<SessionSignal>()
}

/// Reconcile the session against the backend in a background task.
///
/// Until the probe resolves, readers keep seeing the seeded state; the
/// outcome is applied in one synchronous update.
pub fn spawn_session_refresh(session: SessionSignal) {
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            let outcome = crate::net::api::probe_identity().await;
            session.update(|store| store.resolve_probe(outcome));
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = session;
    }
}

/// Sign out in a background task.
///
/// The backend call is best-effort; the local session clears regardless
/// of whether it succeeds.
pub fn spawn_logout(session: SessionSignal) {
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(async move {
            crate::net::api::invalidate().await;
            session.update(|store| store.clear_local());
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = session;
    }
}

/// Sign in with username and password.
///
/// On success the backend has set the session cookie and the store
/// records the identity; the login form shows the error otherwise. The
/// backend does not echo the username back, so the typed one is recorded.
pub async fn sign_in(
    session: SessionSignal,
    username: &str,
    password: &str,
) -> Result<(), ApiError> {
    crate::net::api::authenticate(username, password).await?;
    session.update(|store| {
        store.login(UserIdentity {
            username: username.to_owned(),
        });
    });
    Ok(())
}

/// Create an account and sign in.
pub async fn sign_up(
    session: SessionSignal,
    username: &str,
    password: &str,
) -> Result<(), ApiError> {
    crate::net::api::register(username, password).await?;
    session.update(|store| {
        store.login(UserIdentity {
            username: username.to_owned(),
        });
    });
    Ok(())
}

/// Install panic and log forwarding to the browser console.
#[cfg(feature = "hydrate")]
pub fn init_diagnostics() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
