use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokenvault_core::store::MemoryStore;
use tokenvault_core::transform::Base64Transform;
use tokenvault_core::{TokenCache, TokenStore, TokenVault, VaultRecord};

#[derive(Clone, Default)]
struct CountingStore {
    inner: Arc<MemoryStore>,
    finds: Arc<AtomicUsize>,
}

impl CountingStore {
    fn new() -> Self {
        Self::default()
    }

    fn find_calls(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }
}

impl TokenStore for CountingStore {
    fn find_by_sde(&self, sde: &str) -> tokenvault_core::Result<Option<VaultRecord>> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_sde(sde)
    }

    fn find_by_token(&self, token: &str) -> tokenvault_core::Result<Option<VaultRecord>> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_token(token)
    }

    fn insert(&self, record: VaultRecord) -> tokenvault_core::Result<()> {
        self.inner.insert(record)
    }
}

fn build_vault(store: CountingStore, ttl: Duration) -> TokenVault<CountingStore, Base64Transform> {
    TokenVault::new(store, Base64Transform, TokenCache::new(64, ttl))
}

#[test]
fn create_warms_both_directions() {
    let store = CountingStore::new();
    let vault = build_vault(store.clone(), Duration::from_secs(300));

    let token = vault.create_token("4111-1111-1111-1111").expect("create");
    assert_eq!(store.find_calls(), 1);

    // Both directions must now be servable without another store query.
    assert_eq!(
        vault.create_token("4111-1111-1111-1111").expect("create"),
        token
    );
    assert_eq!(
        vault.redeem_token(&token).expect("redeem"),
        "4111-1111-1111-1111"
    );
    assert_eq!(store.find_calls(), 1);
}

#[test]
fn redeem_warms_both_directions() {
    let store = CountingStore::new();
    store
        .insert(VaultRecord::new("sde-1", "tok-1"))
        .expect("seed");
    let vault = build_vault(store.clone(), Duration::from_secs(300));

    assert_eq!(vault.redeem_token("tok-1").expect("redeem"), "sde-1");
    assert_eq!(store.find_calls(), 1);

    // The reverse direction was warmed by the redeem.
    assert_eq!(vault.create_token("sde-1").expect("create"), "tok-1");
    assert_eq!(vault.redeem_token("tok-1").expect("redeem"), "sde-1");
    assert_eq!(store.find_calls(), 1);
}

#[test]
fn cache_expiry_triggers_store() {
    let store = CountingStore::new();
    let vault = build_vault(store.clone(), Duration::from_millis(20));

    let token = vault.create_token("short-lived").expect("create");
    assert_eq!(store.find_calls(), 1);

    std::thread::sleep(Duration::from_millis(40));
    assert_eq!(vault.create_token("short-lived").expect("create"), token);
    assert!(store.find_calls() >= 2);
}

#[test]
fn sweep_evicts_expired_entries() {
    let store = CountingStore::new();
    let vault = build_vault(store.clone(), Duration::from_millis(20));

    let token = vault.create_token("swept").expect("create");
    std::thread::sleep(Duration::from_millis(40));
    vault.sweep_cache();

    // Entry is gone, so the redeem goes back to the store.
    assert_eq!(vault.redeem_token(&token).expect("redeem"), "swept");
    assert!(store.find_calls() >= 2);
}
