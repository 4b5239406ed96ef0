use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::errors::{Error, Result};
use crate::store::TokenStore;
use crate::types::VaultRecord;

/// Filesystem-backed store using JSON-serialised records.
///
/// `records/<key(sde)>` holds the record, `tokens/<key(token)>` holds the sde
/// the token maps back to. Records are created once and never rewritten;
/// `create_new` on the record file is the uniqueness constraint on the sde
/// key.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Construct a store rooted at `root` without touching the filesystem.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Construct a store and create its directory layout.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(root);
        for dir in [store.records_dir(), store.tokens_dir()] {
            fs::create_dir_all(&dir).map_err(|err| Error::Storage(err.to_string()))?;
        }
        Ok(store)
    }

    fn records_dir(&self) -> PathBuf {
        self.root.join("records")
    }

    fn tokens_dir(&self) -> PathBuf {
        self.root.join("tokens")
    }

    fn record_path(&self, sde: &str) -> PathBuf {
        self.records_dir().join(file_key(sde))
    }

    fn token_path(&self, token: &str) -> PathBuf {
        self.tokens_dir().join(file_key(token))
    }

    fn read_record(&self, path: &Path) -> Result<Option<VaultRecord>> {
        match fs::read(path) {
            Ok(bytes) => {
                let record: VaultRecord = serde_json::from_slice(&bytes)
                    .map_err(|err| Error::Storage(err.to_string()))?;
                Ok(Some(record))
            }
            Err(err) => {
                if err.kind() == std::io::ErrorKind::NotFound {
                    Ok(None)
                } else {
                    Err(Error::Storage(err.to_string()))
                }
            }
        }
    }
}

fn file_key(value: &str) -> String {
    URL_SAFE_NO_PAD.encode(value.as_bytes())
}

impl TokenStore for FileStore {
    fn find_by_sde(&self, sde: &str) -> Result<Option<VaultRecord>> {
        self.read_record(&self.record_path(sde))
    }

    fn find_by_token(&self, token: &str) -> Result<Option<VaultRecord>> {
        let sde = match fs::read(self.token_path(token)) {
            Ok(bytes) => String::from_utf8(bytes)
                .map_err(|err| Error::Storage(err.to_string()))?,
            Err(err) => {
                if err.kind() == std::io::ErrorKind::NotFound {
                    return Ok(None);
                }
                return Err(Error::Storage(err.to_string()));
            }
        };
        self.find_by_sde(&sde)
    }

    fn insert(&self, record: VaultRecord) -> Result<()> {
        // Token index first: a concurrent duplicate insert writes identical
        // bytes (the token is a pure function of the sde), and create_new on
        // the record file below is the uniqueness gate.
        fs::write(self.token_path(&record.token), record.sde.as_bytes())
            .map_err(|err| Error::Storage(err.to_string()))?;

        let path = self.record_path(&record.sde);
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(Error::AlreadyExists);
            }
            Err(err) => return Err(Error::Storage(err.to_string())),
        };

        let data =
            serde_json::to_vec(&record).map_err(|err| Error::Storage(err.to_string()))?;
        file.write_all(&data)
            .and_then(|_| file.sync_all())
            .map_err(|err| Error::Storage(err.to_string()))
    }
}
