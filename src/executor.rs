//! Transactional executor: dispatches command batches and scalar reads to
//! the configured driver. Exactly one connection and one transaction per
//! batch; no retries, no partial commits.

use crate::command::SqlCommand;
use crate::config::ConnectionProfile;
use crate::error::TableGatewayError;
use crate::types::{DriverKind, SqlValue};

/// Result of a transactional batch.
pub(crate) struct ExecOutcome {
    pub rows_affected: usize,
    /// Identity assigned by the most recent insert in the batch; 0 when the
    /// batch inserted nothing.
    pub last_insert_id: i64,
}

/// Execute an ordered command sequence atomically against the profile's
/// database.
///
/// # Errors
/// Propagates the first connection, preparation, execution, or commit error;
/// on any of them the whole batch rolls back.
pub(crate) fn execute_all(
    profile: &ConnectionProfile,
    commands: &[SqlCommand],
) -> Result<ExecOutcome, TableGatewayError> {
    match profile.driver {
        #[cfg(feature = "sqlite")]
        DriverKind::Sqlite => {
            crate::sqlite::execute_transaction(&profile.connection_string, commands)
        }
    }
}

/// Execute a read and return the first column of the first row, if any.
///
/// # Errors
/// Propagates connection and execution errors from the driver.
pub(crate) fn scalar(
    profile: &ConnectionProfile,
    command: &SqlCommand,
) -> Result<Option<SqlValue>, TableGatewayError> {
    match profile.driver {
        #[cfg(feature = "sqlite")]
        DriverKind::Sqlite => crate::sqlite::scalar(&profile.connection_string, command),
    }
}
