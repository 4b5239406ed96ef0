use serde::{Deserialize, Serialize};

/// Durable, authoritative pairing of a sensitive data element and the token
/// minted for it. Keyed uniquely by `sde`; created once, never updated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VaultRecord {
    pub sde: String,
    pub token: String,
}

impl VaultRecord {
    pub fn new(sde: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            sde: sde.into(),
            token: token.into(),
        }
    }
}
