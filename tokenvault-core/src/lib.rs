//! Core domain primitives for the token vault: the reversible transform, the
//! TTL cache, the durable record store, and the orchestration that keeps the
//! two layers coherent.

pub mod authority;
pub mod cache;
pub mod errors;
pub mod store;
pub mod transform;
pub mod types;
pub mod vault;

pub use authority::{AuthoritySet, DEFAULT_AUTHORITIES};
pub use cache::TokenCache;
pub use errors::{Error, Result};
pub use store::{FileStore, MemoryStore, TokenStore};
pub use transform::{Base64Transform, Transform};
pub use types::VaultRecord;
pub use vault::TokenVault;
