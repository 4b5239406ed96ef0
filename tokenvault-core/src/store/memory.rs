use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::{Error, Result};
use crate::store::TokenStore;
use crate::types::VaultRecord;

/// Mutex-guarded in-memory store for tests and local development.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    by_sde: HashMap<String, VaultRecord>,
    // token -> sde, so both directions resolve without a scan
    token_index: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of durable records held.
    pub fn len(&self) -> usize {
        self.lock().by_sde.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl TokenStore for MemoryStore {
    fn find_by_sde(&self, sde: &str) -> Result<Option<VaultRecord>> {
        Ok(self.lock().by_sde.get(sde).cloned())
    }

    fn find_by_token(&self, token: &str) -> Result<Option<VaultRecord>> {
        let inner = self.lock();
        Ok(inner
            .token_index
            .get(token)
            .and_then(|sde| inner.by_sde.get(sde))
            .cloned())
    }

    fn insert(&self, record: VaultRecord) -> Result<()> {
        let mut inner = self.lock();
        if inner.by_sde.contains_key(&record.sde) {
            return Err(Error::AlreadyExists);
        }
        inner
            .token_index
            .insert(record.token.clone(), record.sde.clone());
        inner.by_sde.insert(record.sde.clone(), record);
        Ok(())
    }
}
