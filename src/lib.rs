//! # scooter-client
//!
//! Session-management core for the scooter rental web client. Tracks the
//! authenticated user, keeps it in sync with the cookie-backed server
//! session, and mirrors it into `localStorage` so the UI renders a
//! logged-in view on reload without waiting for the network.
//!
//! This crate contains the session store, the credentialed API calls, the
//! persistent identity cache, and the route-gate contract the router
//! consumes. Pages, components, and the scooter/booking domain live in the
//! application crate on top of this one.

pub mod app;
pub mod net;
pub mod state;
pub mod storage;
