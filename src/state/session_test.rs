use super::*;

use futures::executor::block_on;

use crate::storage::identity_cache::MemoryCache;

fn identity(username: &str) -> UserIdentity {
    UserIdentity {
        username: username.to_owned(),
    }
}

fn store_over(cache: &MemoryCache) -> SessionStore<MemoryCache> {
    SessionStore::new(cache.clone())
}

fn cached_username(cache: &MemoryCache) -> Option<String> {
    let raw = cache.raw()?;
    serde_json::from_str::<UserIdentity>(&raw)
        .ok()
        .map(|id| id.username)
}

// =============================================================
// restore_on_load
// =============================================================

#[test]
fn restore_with_empty_cache_stays_anonymous() {
    let cache = MemoryCache::default();
    let mut store = store_over(&cache);
    store.restore_on_load();
    assert!(store.current_user().is_none());
    assert!(!store.is_authenticated());
}

#[test]
fn restore_with_valid_record_signs_in_without_network() {
    let cache = MemoryCache::default();
    cache.set_raw(r#"{"username":"alice"}"#);
    let mut store = store_over(&cache);
    store.restore_on_load();
    assert_eq!(
        store.current_user().map(|u| u.username.as_str()),
        Some("alice")
    );
}

#[test]
fn restore_with_corrupt_record_stays_anonymous() {
    let cache = MemoryCache::default();
    cache.set_raw("###not-json###");
    let mut store = store_over(&cache);
    store.restore_on_load();
    assert!(store.current_user().is_none());
}

#[test]
fn restore_with_empty_username_stays_anonymous() {
    let cache = MemoryCache::default();
    cache.set_raw(r#"{"username":""}"#);
    let mut store = store_over(&cache);
    store.restore_on_load();
    assert!(store.current_user().is_none());
}

// =============================================================
// login
// =============================================================

#[test]
fn login_is_visible_immediately_and_cached() {
    let cache = MemoryCache::default();
    let mut store = store_over(&cache);
    store.login(identity("bob"));
    assert_eq!(
        store.current_user().map(|u| u.username.as_str()),
        Some("bob")
    );
    assert_eq!(cached_username(&cache).as_deref(), Some("bob"));
}

#[test]
fn second_login_overwrites_identity() {
    let cache = MemoryCache::default();
    let mut store = store_over(&cache);
    store.login(identity("bob"));
    store.login(identity("carol"));
    assert_eq!(
        store.current_user().map(|u| u.username.as_str()),
        Some("carol")
    );
    assert_eq!(cached_username(&cache).as_deref(), Some("carol"));
}

#[test]
fn login_survives_reload() {
    let cache = MemoryCache::default();
    let mut store = store_over(&cache);
    store.login(identity("dora"));

    // A second store over the same cache models the page reload.
    let mut reloaded = store_over(&cache);
    reloaded.restore_on_load();
    assert_eq!(
        reloaded.current_user().map(|u| u.username.as_str()),
        Some("dora")
    );
}

// =============================================================
// probe resolution
// =============================================================

#[test]
fn confirmed_probe_signs_in_and_caches() {
    let cache = MemoryCache::default();
    let mut store = store_over(&cache);
    store.resolve_probe(ProbeOutcome::Confirmed(identity("alice")));
    assert_eq!(
        store.current_user().map(|u| u.username.as_str()),
        Some("alice")
    );
    assert_eq!(cached_username(&cache).as_deref(), Some("alice"));
}

#[test]
fn unconfirmed_probe_signs_out_and_clears_record() {
    let cache = MemoryCache::default();
    let mut store = store_over(&cache);
    store.login(identity("bob"));

    store.resolve_probe(ProbeOutcome::Unconfirmed(ApiError::Status(401)));
    assert!(store.current_user().is_none());
    assert!(cache.raw().is_none());
}

#[test]
fn unconfirmed_probe_is_idempotent() {
    let cache = MemoryCache::default();
    let mut store = store_over(&cache);
    store.login(identity("bob"));

    store.resolve_probe(ProbeOutcome::Unconfirmed(ApiError::Status(500)));
    store.resolve_probe(ProbeOutcome::Unconfirmed(ApiError::Network(
        "connection reset".to_owned(),
    )));
    assert!(store.current_user().is_none());
    assert!(cache.raw().is_none());
}

// =============================================================
// async operations against an unreachable backend (native stubs)
// =============================================================

#[test]
fn fetch_current_user_without_backend_falls_back_to_anonymous() {
    let cache = MemoryCache::default();
    let mut store = store_over(&cache);
    store.login(identity("alice"));

    block_on(store.fetch_current_user());
    assert!(store.current_user().is_none());
    assert!(cache.raw().is_none());
}

#[test]
fn logout_clears_session_even_when_backend_unreachable() {
    let cache = MemoryCache::default();
    let mut store = store_over(&cache);
    store.login(identity("bob"));

    block_on(store.logout());
    assert!(store.current_user().is_none());
    assert!(cache.raw().is_none());
}

// =============================================================
// full lifecycle
// =============================================================

#[test]
fn login_logout_reload_scenario() {
    let cache = MemoryCache::default();

    let mut store = store_over(&cache);
    store.restore_on_load();
    assert!(store.current_user().is_none());

    store.login(identity("carol"));
    assert_eq!(
        store.current_user().map(|u| u.username.as_str()),
        Some("carol")
    );

    block_on(store.logout());
    assert!(store.current_user().is_none());

    // Reload after logout: the record is gone, so the session stays
    // anonymous.
    let mut reloaded = store_over(&cache);
    reloaded.restore_on_load();
    assert!(reloaded.current_user().is_none());
}
