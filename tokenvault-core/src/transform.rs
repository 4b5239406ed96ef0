use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::errors::{Error, Result};

/// Deterministic, reversible mapping between an SDE and its token.
///
/// `decode` exists to uphold the round-trip invariant in tests and
/// diagnostics; the vault never calls it on the redeem path.
pub trait Transform: Send + Sync {
    fn encode(&self, sde: &str) -> String;
    fn decode(&self, token: &str) -> Result<String>;
}

impl<T> Transform for Box<T>
where
    T: Transform + ?Sized,
{
    fn encode(&self, sde: &str) -> String {
        (**self).encode(sde)
    }
    fn decode(&self, token: &str) -> Result<String> {
        (**self).decode(token)
    }
}

/// Standard-alphabet base64 transform, the vault's default.
#[derive(Debug, Default, Clone, Copy)]
pub struct Base64Transform;

impl Transform for Base64Transform {
    fn encode(&self, sde: &str) -> String {
        STANDARD.encode(sde.as_bytes())
    }

    fn decode(&self, token: &str) -> Result<String> {
        let bytes = STANDARD
            .decode(token.as_bytes())
            .map_err(|err| Error::InvalidToken(err.to_string()))?;
        String::from_utf8(bytes).map_err(|err| Error::InvalidToken(err.to_string()))
    }
}
