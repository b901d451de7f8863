//! Error types

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error reported by the driver for one of its callbacks
///
/// Driver errors are data, not control flow: the bridge packages them into the
/// published event next to whatever partial result exists and never aborts.
/// `code` is the driver's numeric error code; `message` its description.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("driver error {code}: {message}")]
pub struct DriverError {
    pub code: i64,
    pub message: String,
}

impl DriverError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
