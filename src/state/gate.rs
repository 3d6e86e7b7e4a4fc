//! Route-gate contract consumed by the router.
//!
//! The router owns the route table and assigns each route an access
//! class; this module only decides whether entering it is permitted for
//! the current session. Account and booking views are protected, the
//! map, login, and register views are public.

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

/// Access class the router assigns to a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    Protected,
}

/// Outcome of a gate check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Allow,
    RedirectToLogin,
}

/// Decide whether a route transition is permitted.
///
/// `authenticated` is derived from the session store's current user, the
/// only legitimate read path; the gate never consults the cache record or
/// the network itself.
pub fn decide(access: RouteAccess, authenticated: bool) -> GateDecision {
    match access {
        RouteAccess::Public => GateDecision::Allow,
        RouteAccess::Protected if authenticated => GateDecision::Allow,
        RouteAccess::Protected => GateDecision::RedirectToLogin,
    }
}
