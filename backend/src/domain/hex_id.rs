//! Random hexadecimal identifiers for posts, comments, and users.
//!
//! Identifiers are 24 lowercase hex characters encoding 12 bytes drawn from
//! the operating system's CSPRNG. No uniqueness check is made against storage.

use std::fmt;
use std::sync::OnceLock;

use rand::RngCore;
use rand::rngs::OsRng;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Number of random bytes behind every identifier.
pub const HEX_ID_BYTES: usize = 12;

static HEX_ID_RE: OnceLock<Regex> = OnceLock::new();

fn hex_id_regex() -> &'static Regex {
    HEX_ID_RE.get_or_init(|| {
        Regex::new("^[0-9a-f]{24}$")
            .unwrap_or_else(|error| panic!("hex id regex failed to compile: {error}"))
    })
}

/// Return `true` when `candidate` is a well-formed identifier.
///
/// # Examples
/// ```
/// use board::domain::is_valid_hex_id;
///
/// assert!(is_valid_hex_id("0123456789abcdef01234567"));
/// assert!(!is_valid_hex_id("0123456789ABCDEF01234567"));
/// ```
pub fn is_valid_hex_id(candidate: &str) -> bool {
    hex_id_regex().is_match(candidate)
}

/// Errors raised while creating identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexIdError {
    /// The input does not match `^[0-9a-f]{24}$`.
    #[error("identifier must be a hexadecimal 24-symbol string, got {value:?}")]
    Malformed { value: String },
    /// The randomness source failed.
    #[error("failed to draw random identifier bytes: {message}")]
    Entropy { message: String },
}

/// Validated 24-character lowercase hexadecimal identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexId(String);

impl HexId {
    /// Validate and wrap an existing identifier.
    pub fn new(id: impl Into<String>) -> Result<Self, HexIdError> {
        let id = id.into();
        if is_valid_hex_id(&id) {
            Ok(Self(id))
        } else {
            Err(HexIdError::Malformed { value: id })
        }
    }

    /// Draw a fresh identifier from the OS randomness source.
    ///
    /// Failures are surfaced to the caller and never retried.
    pub fn generate() -> Result<Self, HexIdError> {
        let mut bytes = [0_u8; HEX_ID_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|error| HexIdError::Entropy {
                message: error.to_string(),
            })?;
        Ok(Self(hex::encode(bytes)))
    }

    /// Borrow the identifier text.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for HexId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for HexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<HexId> for String {
    fn from(value: HexId) -> Self {
        value.0
    }
}

impl TryFrom<String> for HexId {
    type Error = HexIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
