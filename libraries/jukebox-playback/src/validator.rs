//! Source identifier validation
//!
//! A canonical identifier is the asset scheme followed by one or more ASCII
//! digits, e.g. `rbxassetid://1843404009`. Nothing else is accepted: no
//! whitespace, no signs, no query strings.

use crate::error::{PlayerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheme prefix every canonical identifier starts with
pub const SOURCE_PREFIX: &str = "rbxassetid://";

/// Validate a source identifier
///
/// Returns the input unchanged when it is in canonical form.
pub fn validate(id: &str) -> Result<&str> {
    match id.strip_prefix(SOURCE_PREFIX) {
        Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => Ok(id),
        _ => Err(PlayerError::MalformedId(id.to_string())),
    }
}

/// Prepend the scheme prefix when it is missing
///
/// Bare numeric ids (`"111"`) become `"rbxassetid://111"`. The result is not
/// validated.
pub fn normalize(raw: &str) -> String {
    if raw.starts_with(SOURCE_PREFIX) {
        raw.to_string()
    } else {
        format!("{SOURCE_PREFIX}{raw}")
    }
}

/// A validated source identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SourceId(String);

impl SourceId {
    /// Normalize and validate a raw playlist entry
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = normalize(raw);
        validate(&normalized)?;
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric asset id, or `None` when the digits do not fit a `u64`
    pub fn asset_number(&self) -> Option<u64> {
        self.0.strip_prefix(SOURCE_PREFIX)?.parse().ok()
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for SourceId {
    type Error = PlayerError;

    fn try_from(value: String) -> Result<Self> {
        validate(&value)?;
        Ok(Self(value))
    }
}

impl From<SourceId> for String {
    fn from(id: SourceId) -> Self {
        id.0
    }
}

impl AsRef<str> for SourceId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
