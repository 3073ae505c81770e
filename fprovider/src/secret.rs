//! Redacting wrapper for backend credentials.
//!
//! ```rust
//! use fprovider::SecretString;
//!
//! let key = SecretString::new("sk-live-123");
//! assert_eq!(key.expose(), "sk-live-123");
//! assert_eq!(format!("{key:?}"), "[REDACTED]");
//! ```

use std::fmt::{Debug, Formatter};

#[derive(Clone, PartialEq, Eq)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl Debug for SecretString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
