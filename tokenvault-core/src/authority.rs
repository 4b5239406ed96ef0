use std::collections::HashSet;
use std::env;

/// Authority labels recognized when no override is configured.
pub const DEFAULT_AUTHORITIES: &[&str] = &["Employee", "Name", "Credit_Card", "Address"];

const AUTHORITIES_ENV: &str = "TOKENVAULT_AUTHORITIES";

/// Fixed whitelist of authority labels.
///
/// Built once at startup and never mutated afterwards; membership is an
/// exact string match.
#[derive(Debug, Clone)]
pub struct AuthoritySet {
    labels: HashSet<String>,
}

impl AuthoritySet {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Construct the set from `TOKENVAULT_AUTHORITIES` (comma-separated),
    /// falling back to [`DEFAULT_AUTHORITIES`].
    pub fn from_env() -> Self {
        match env::var(AUTHORITIES_ENV) {
            Ok(value) if !value.trim().is_empty() => Self::new(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|label| !label.is_empty())
                    .map(str::to_string),
            ),
            _ => Self::default(),
        }
    }

    pub fn is_recognized(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl Default for AuthoritySet {
    fn default() -> Self {
        Self::new(DEFAULT_AUTHORITIES.iter().copied())
    }
}
