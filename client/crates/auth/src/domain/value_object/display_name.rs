//! Display Name Value Object
//!
//! Free-form name stored in provider metadata. Trimmed and NFC-normalized so
//! the same name typed on different keyboards compares equal.

use derive_more::Display;
use unicode_normalization::UnicodeNormalization;

/// Display name (may be empty; the sidebar falls back to a default)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Display)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().nfc().collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
