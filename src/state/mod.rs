//! Shared client-side session state.
//!
//! DESIGN
//! ======
//! The session store is a plain struct so the state machine is testable
//! natively; the Leptos signal wrapper lives in `crate::app` and is the
//! only place mutation is wired to the UI.

pub mod gate;
pub mod session;
