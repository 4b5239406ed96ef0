use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokenvault_core::store::MemoryStore;
use tokenvault_core::{TokenStore, VaultRecord};

/// Store wrapper counting every query and insert, so tests can assert a
/// request path never reached the durable layer.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct CountingStore {
    inner: Arc<MemoryStore>,
    calls: Arc<AtomicUsize>,
}

impl CountingStore {
    #[allow(dead_code)]
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TokenStore for CountingStore {
    fn find_by_sde(&self, sde: &str) -> tokenvault_core::Result<Option<VaultRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_sde(sde)
    }

    fn find_by_token(&self, token: &str) -> tokenvault_core::Result<Option<VaultRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_token(token)
    }

    fn insert(&self, record: VaultRecord) -> tokenvault_core::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.insert(record)
    }
}
