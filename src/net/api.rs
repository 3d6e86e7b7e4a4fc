//! REST calls against the session endpoints of the scooter backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, with
//! `credentials: include` so the browser attaches the session cookie.
//! Server-side / native: stubs resolving to "no session" since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! `probe_identity` and `invalidate` never surface errors to callers; the
//! session store collapses every failure to the logged-out state. Only the
//! session-establishing calls (`authenticate`, `register`) return a
//! `Result`, because the login and register forms have to show something.

#![allow(clippy::unused_async)]

use crate::state::session::ProbeOutcome;

#[cfg(feature = "hydrate")]
use crate::net::types::UserIdentity;

/// Failure of a backend session call.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Malformed(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("username already exists")]
    UsernameTaken,
    #[error("not available outside the browser")]
    Unsupported,
}

#[cfg(feature = "hydrate")]
#[derive(serde::Deserialize)]
struct MePayload {
    username: String,
}

#[cfg(feature = "hydrate")]
#[derive(serde::Serialize)]
struct CredentialsPayload<'a> {
    username: &'a str,
    password: &'a str,
}

/// Ask the backend who the session cookie belongs to, via `GET /me`.
///
/// Confirmed only on a success response carrying a non-empty `username`;
/// any other status, a transport error, or a malformed body is an
/// unconfirmed session. There is no retry; the caller falls back to
/// logged-out.
pub async fn probe_identity() -> ProbeOutcome {
    #[cfg(feature = "hydrate")]
    {
        let resp = match gloo_net::http::Request::get("/me")
            .credentials(web_sys::RequestCredentials::Include)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(err) => return ProbeOutcome::Unconfirmed(ApiError::Network(err.to_string())),
        };
        if !resp.ok() {
            return ProbeOutcome::Unconfirmed(ApiError::Status(resp.status()));
        }
        match resp.json::<MePayload>().await {
            Ok(payload) if !payload.username.is_empty() => ProbeOutcome::Confirmed(UserIdentity {
                username: payload.username,
            }),
            Ok(_) => ProbeOutcome::Unconfirmed(ApiError::Malformed("empty username".to_owned())),
            Err(err) => ProbeOutcome::Unconfirmed(ApiError::Malformed(err.to_string())),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        ProbeOutcome::Unconfirmed(ApiError::Unsupported)
    }
}

/// End the server-side session via `POST /logout`.
///
/// The outcome is observed for diagnostics only; local logout proceeds
/// whether or not the backend was reachable.
pub async fn invalidate() {
    #[cfg(feature = "hydrate")]
    {
        if let Err(err) = gloo_net::http::Request::post("/logout")
            .credentials(web_sys::RequestCredentials::Include)
            .send()
            .await
        {
            log::warn!("backend logout failed: {err}");
        }
    }
}

/// Establish a session via `POST /login`.
///
/// On success the backend has set the session cookie; the caller is
/// expected to record the identity through the session store.
pub async fn authenticate(username: &str, password: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = send_credentials("/login", username, password).await?;
        match resp.status() {
            _ if resp.ok() => Ok(()),
            401 => Err(ApiError::InvalidCredentials),
            status => Err(ApiError::Status(status)),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (username, password);
        Err(ApiError::Unsupported)
    }
}

/// Create an account and establish a session via `POST /register`.
pub async fn register(username: &str, password: &str) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = send_credentials("/register", username, password).await?;
        match resp.status() {
            _ if resp.ok() => Ok(()),
            409 => Err(ApiError::UsernameTaken),
            status => Err(ApiError::Status(status)),
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (username, password);
        Err(ApiError::Unsupported)
    }
}

#[cfg(feature = "hydrate")]
async fn send_credentials(
    path: &str,
    username: &str,
    password: &str,
) -> Result<gloo_net::http::Response, ApiError> {
    gloo_net::http::Request::post(path)
        .credentials(web_sys::RequestCredentials::Include)
        .json(&CredentialsPayload { username, password })
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))
}
