//! Storage-layer types for program identity.
//!
//! [`Pid`] lives here because program identity is a storage concern: a
//! program is addressed by the identifier it is stored under, and every
//! identifier that reaches a [`CodeStore`](crate::CodeStore) has already
//! been validated by [`Pid::parse`].

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

/// Pattern every program identifier must match.
pub const PID_PATTERN: &str = "^[A-Za-z][-_A-Za-z0-9]*$";

static PID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(PID_PATTERN).unwrap_or_else(|e| panic!("PID_PATTERN is a valid regex: {e}"))
});

/// Validated, human-chosen program identifier.
///
/// Case-sensitive and never normalized: `Pid::parse("Demo")` and
/// `Pid::parse("demo")` name different programs.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pid(String);

impl Pid {
    /// Validates `raw` against [`PID_PATTERN`].
    pub fn parse(raw: &str) -> Result<Self, StorageError> {
        if PID_RE.is_match(raw) {
            Ok(Pid(raw.to_string()))
        } else {
            Err(StorageError::InvalidIdentifier {
                raw: raw.to_string(),
                pattern: PID_PATTERN,
            })
        }
    }

    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Pid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Pid {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pid::parse(s)
    }
}

impl TryFrom<String> for Pid {
    type Error = StorageError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        if PID_RE.is_match(&raw) {
            Ok(Pid(raw))
        } else {
            Err(StorageError::InvalidIdentifier {
                raw,
                pattern: PID_PATTERN,
            })
        }
    }
}

impl From<Pid> for String {
    fn from(pid: Pid) -> Self {
        pid.0
    }
}
