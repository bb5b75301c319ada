use crate::error::TableGatewayError;
use crate::record::Record;
use crate::types::SqlValue;

/// Extract one gateway value from a `SQLite` row, decoding SQL NULL to
/// [`SqlValue::Null`].
///
/// # Errors
/// Returns `SqliteError` if the column cannot be read.
pub(crate) fn extract_value(
    row: &rusqlite::Row,
    idx: usize,
) -> Result<SqlValue, TableGatewayError> {
    let value: rusqlite::types::Value =
        row.get(idx).map_err(TableGatewayError::SqliteError)?;
    match value {
        rusqlite::types::Value::Null => Ok(SqlValue::Null),
        rusqlite::types::Value::Integer(i) => Ok(SqlValue::Int(i)),
        rusqlite::types::Value::Real(f) => Ok(SqlValue::Float(f)),
        rusqlite::types::Value::Text(s) => Ok(SqlValue::Text(s)),
        rusqlite::types::Value::Blob(b) => Ok(SqlValue::Blob(b)),
    }
}

/// Decode one result row into a canonical [`Record`], one entry per column
/// in result order.
///
/// # Errors
/// Returns `SqliteError` if any column cannot be read.
pub(crate) fn row_to_record(
    row: &rusqlite::Row,
    column_names: &[String],
) -> Result<Record, TableGatewayError> {
    let mut record = Record::with_capacity(column_names.len());
    for (idx, name) in column_names.iter().enumerate() {
        record.insert(name.clone(), extract_value(row, idx)?);
    }
    Ok(record)
}
