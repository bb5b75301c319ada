//! `SQLite` realization of the driver boundary, built on rusqlite.
//!
//! Each gateway operation opens one connection here, runs against it, and
//! releases it when the call (or stream) ends. Synthesized `@N` placeholders
//! are rewritten to `SQLite`'s `?N` style before preparation.

use std::time::Duration;

use crate::error::TableGatewayError;

mod executor;
mod params;
mod query;

pub(crate) use executor::{execute_transaction, scalar};
pub(crate) use params::{convert_params, values_as_tosql};
pub(crate) use query::row_to_record;

/// Open a connection for one operation. The connection string is a database
/// path, `:memory:`, or a `file:` URI.
///
/// # Errors
/// Returns `ConnectionError` if the database cannot be opened.
pub(crate) fn open(connection_string: &str) -> Result<rusqlite::Connection, TableGatewayError> {
    let conn = rusqlite::Connection::open(connection_string).map_err(|e| {
        TableGatewayError::ConnectionError(format!(
            "failed to open SQLite database '{connection_string}': {e}"
        ))
    })?;
    // Writers wait for concurrent readers instead of failing with SQLITE_BUSY.
    conn.busy_timeout(Duration::from_secs(5))
        .map_err(TableGatewayError::SqliteError)?;
    Ok(conn)
}
