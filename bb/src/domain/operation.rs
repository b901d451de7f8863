//! Correlated operation results

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DriverError;

/// Outcome of a correlated discovery operation
///
/// The driver reports errors alongside whatever partial data exists, so the
/// result always carries both. `id` is the operation identifier handed out at
/// enqueue time; subscribers filter on it to find their own result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OperationResult<T> {
    pub value: T,
    pub error: Option<DriverError>,
    pub id: Uuid,
}

impl<T> OperationResult<T> {
    pub fn new(value: T, error: Option<DriverError>, id: Uuid) -> Self {
        Self { value, error, id }
    }

    /// Whether the driver reported a failure for this operation
    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }
}
