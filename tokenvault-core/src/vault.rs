use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::cache::TokenCache;
use crate::errors::{Error, Result};
use crate::store::TokenStore;
use crate::transform::Transform;
use crate::types::VaultRecord;

/// Orchestrates the cache, the durable store, and the transform to issue and
/// redeem tokens.
///
/// The durable store is the source of truth; the cache is a disposable
/// projection warmed lazily with both mapping directions at once. The cache
/// mutex guards individual get/insert calls and is never held across a store
/// query, so concurrent requests do not serialize on it.
pub struct TokenVault<S, T>
where
    S: TokenStore,
    T: Transform,
{
    store: S,
    transform: T,
    cache: Mutex<TokenCache>,
}

impl<S, T> TokenVault<S, T>
where
    S: TokenStore,
    T: Transform,
{
    pub fn new(store: S, transform: T, cache: TokenCache) -> Self {
        Self {
            store,
            transform,
            cache: Mutex::new(cache),
        }
    }

    /// Issue the token for `sde`, creating the durable record on first use.
    ///
    /// Repeated calls for one sde return the same token regardless of cache
    /// state: the transform is deterministic and the store enforces a single
    /// record per sde.
    pub fn create_token(&self, sde: &str) -> Result<String> {
        if let Some(token) = self.cache_get(sde) {
            debug!("token served from cache");
            return Ok(token);
        }

        if let Some(record) = self.store.find_by_sde(sde)? {
            debug!("token found in store");
            self.warm(&record);
            return Ok(record.token);
        }

        let record = VaultRecord::new(sde, self.transform.encode(sde));
        match self.store.insert(record.clone()) {
            Ok(()) => {
                debug!("token stored");
                self.warm(&record);
                Ok(record.token)
            }
            // Lost the first-write race; the record that won is authoritative.
            Err(Error::AlreadyExists) => {
                let record = self.store.find_by_sde(sde)?.ok_or_else(|| {
                    Error::Storage("record missing after duplicate insert".into())
                })?;
                self.warm(&record);
                Ok(record.token)
            }
            Err(err) => Err(err),
        }
    }

    /// Resolve a previously issued token back to its sde.
    ///
    /// The store alone decides whether a token exists; an unknown token is
    /// never reverse-transformed.
    pub fn redeem_token(&self, token: &str) -> Result<String> {
        if let Some(sde) = self.cache_get(token) {
            debug!("sde served from cache");
            return Ok(sde);
        }

        match self.store.find_by_token(token)? {
            Some(record) => {
                debug!("sde found in store");
                self.warm(&record);
                Ok(record.sde)
            }
            None => Err(Error::NotFound {
                entity: "token".into(),
            }),
        }
    }

    /// Drop every cache entry. The durable store makes this loss-free.
    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    /// Evict expired cache entries; driven by the broker's sweep task.
    pub fn sweep_cache(&self) {
        self.lock_cache().sweep();
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn cache_get(&self, key: &str) -> Option<String> {
        self.lock_cache().get(key)
    }

    fn warm(&self, record: &VaultRecord) {
        let mut cache = self.lock_cache();
        cache.insert(record.sde.clone(), record.token.clone());
        cache.insert(record.token.clone(), record.sde.clone());
    }

    fn lock_cache(&self) -> MutexGuard<'_, TokenCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
