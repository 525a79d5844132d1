use std::fmt;

use serde::{Deserialize, Serialize};

/// An error captured by application code.
///
/// The loader treats records as opaque: they are queued and delivered to the
/// agent client unchanged, in submission order.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ErrorRecord {
    /// Classification of the error, e.g. `TypeError`.
    pub kind: String,
    /// Human-readable message.
    pub message: String,
}

impl ErrorRecord {
    /// Create a record from a classification and a message.
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> ErrorRecord {
        ErrorRecord {
            kind: kind.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}
