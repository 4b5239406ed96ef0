use anyhow::{Context, Result, anyhow};
use tokenvault_core::store::{FileStore, MemoryStore, TokenStore};

const STORE_ENV: &str = "TOKENVAULT_STORE";
const STORE_PATH_ENV: &str = "TOKENVAULT_STORE_PATH";

pub fn default_store_kind() -> String {
    std::env::var(STORE_ENV).unwrap_or_else(|_| "memory".into())
}

pub fn load_store(kind: &str) -> Result<Box<dyn TokenStore>> {
    match kind {
        "memory" => Ok(Box::new(MemoryStore::new())),
        "file" => {
            let root = std::env::var(STORE_PATH_ENV)
                .with_context(|| format!("{STORE_PATH_ENV} is required for the file store"))?;
            let store = FileStore::open(root).context("failed to open file store")?;
            Ok(Box::new(store))
        }
        other => Err(anyhow!("unsupported store `{other}`")),
    }
}
