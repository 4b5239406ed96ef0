use crate::errors::Result;
use crate::types::VaultRecord;

/// Keyed record store holding the authoritative sde/token pairs.
///
/// Adapters do not retry; faults surface as [`crate::Error::Storage`] and the
/// vault core treats them as server faults.
pub trait TokenStore: Send + Sync {
    fn find_by_sde(&self, sde: &str) -> Result<Option<VaultRecord>>;
    fn find_by_token(&self, token: &str) -> Result<Option<VaultRecord>>;
    /// Persist a new record. Fails with [`crate::Error::AlreadyExists`] when
    /// a record for the same sde is present.
    fn insert(&self, record: VaultRecord) -> Result<()>;
}

impl<T> TokenStore for Box<T>
where
    T: TokenStore + ?Sized,
{
    fn find_by_sde(&self, sde: &str) -> Result<Option<VaultRecord>> {
        (**self).find_by_sde(sde)
    }
    fn find_by_token(&self, token: &str) -> Result<Option<VaultRecord>> {
        (**self).find_by_token(token)
    }
    fn insert(&self, record: VaultRecord) -> Result<()> {
        (**self).insert(record)
    }
}

impl<T> TokenStore for std::sync::Arc<T>
where
    T: TokenStore + ?Sized,
{
    fn find_by_sde(&self, sde: &str) -> Result<Option<VaultRecord>> {
        (**self).find_by_sde(sde)
    }
    fn find_by_token(&self, token: &str) -> Result<Option<VaultRecord>> {
        (**self).find_by_token(token)
    }
    fn insert(&self, record: VaultRecord) -> Result<()> {
        (**self).insert(record)
    }
}

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;
