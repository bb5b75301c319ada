use tracing::debug;

use crate::command::SqlCommand;
use crate::error::TableGatewayError;
use crate::executor::ExecOutcome;
use crate::translation::{PlaceholderStyle, translate_placeholders};
use crate::types::SqlValue;

use super::params::{convert_params, values_as_tosql};
use super::query::extract_value;

/// Run an ordered command sequence on one connection inside one transaction.
///
/// Commands execute in order and affected-row counts are summed. The commit
/// happens once, after the last command; any failure returns early and the
/// dropped transaction rolls the whole batch back.
///
/// # Errors
/// Returns the first preparation or execution error, or the commit error.
pub(crate) fn execute_transaction(
    connection_string: &str,
    commands: &[SqlCommand],
) -> Result<ExecOutcome, TableGatewayError> {
    let mut conn = super::open(connection_string)?;
    let tx = conn.transaction()?;
    let mut rows_affected = 0usize;
    for command in commands {
        let sql = translate_placeholders(&command.sql, PlaceholderStyle::Sqlite);
        let values = convert_params(&command.params);
        let mut stmt = tx.prepare(sql.as_ref())?;
        let param_refs = values_as_tosql(&values);
        rows_affected += stmt.execute(&param_refs[..])?;
    }
    let last_insert_id = tx.last_insert_rowid();
    tx.commit()?;
    debug!(commands = commands.len(), rows_affected, "committed batch");
    Ok(ExecOutcome {
        rows_affected,
        last_insert_id,
    })
}

/// Execute a read and return the first column of the first row, if any.
///
/// # Errors
/// Returns `SqliteError` if preparation, execution, or decoding fails.
pub(crate) fn scalar(
    connection_string: &str,
    command: &SqlCommand,
) -> Result<Option<SqlValue>, TableGatewayError> {
    let conn = super::open(connection_string)?;
    let sql = translate_placeholders(&command.sql, PlaceholderStyle::Sqlite);
    let values = convert_params(&command.params);
    let mut stmt = conn.prepare(sql.as_ref())?;
    let param_refs = values_as_tosql(&values);
    let mut rows = stmt.query(&param_refs[..])?;
    match rows.next()? {
        Some(row) => Ok(Some(extract_value(row, 0)?)),
        None => Ok(None),
    }
}
