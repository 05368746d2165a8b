use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Canonicalize a free-text exercise name: drop every character that is not
/// an ASCII letter or whitespace, then Title-Case the remaining words and
/// join them with single spaces.
///
/// The result is the lookup key for every title-addressed operation in the
/// catalog. Idempotent; an input with no letters collapses to the empty
/// string.
pub fn normalize_title(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Canonical alphabetic-only, Title-Case form of an exercise name.
///
/// Construction normalizes the input; titles that are empty after
/// normalization are rejected so downstream lookups never run against an
/// empty key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct NormalizedTitle(String);

impl NormalizedTitle {
    pub fn new(raw: &str) -> Result<Self, ModelError> {
        let normalized = normalize_title(raw);
        if normalized.is_empty() {
            return Err(ModelError::InvalidTitle(
                "title is empty after normalization".to_string(),
            ));
        }
        Ok(NormalizedTitle(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NormalizedTitle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NormalizedTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
