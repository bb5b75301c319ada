use crate::command::SqlCommand;
use crate::error::TableGatewayError;
use crate::key::KeySpec;
use crate::record::Record;
use crate::types::SqlValue;

use super::{ensure_where, push_key_clause};

/// Synthesize `INSERT INTO <table> (<cols>) VALUES (<placeholders>)` from a
/// record, columns and placeholders in record order.
///
/// # Errors
/// Returns `EmptyRecord` when the record has no entries.
pub(crate) fn insert_command(
    table: &str,
    record: &Record,
) -> Result<SqlCommand, TableGatewayError> {
    let mut cmd = SqlCommand::new(table);
    let mut columns = String::new();
    let mut values = String::new();
    for (name, value) in record.iter() {
        if !columns.is_empty() {
            columns.push(',');
            values.push(',');
        }
        let placeholder = cmd.bind(value.clone());
        columns.push_str(name);
        values.push_str(&placeholder);
    }
    if cmd.params.is_empty() {
        return Err(TableGatewayError::EmptyRecord(
            "no insertable columns in record".to_string(),
        ));
    }
    cmd.sql = format!("INSERT INTO {table} ({columns}) VALUES ({values})");
    Ok(cmd)
}

/// Synthesize an UPDATE over the composite key. Record entries naming a key
/// column (case-insensitively) with a non-null value are skipped; the key
/// parameters trail the SET parameters on the same placeholder counter.
///
/// # Errors
/// Returns `EmptyRecord` when no assignable columns remain after skipping.
pub(crate) fn update_command(
    table: &str,
    key_spec: &KeySpec,
    record: &Record,
    key_values: &[SqlValue],
) -> Result<SqlCommand, TableGatewayError> {
    let mut cmd = SqlCommand::new(table);
    let mut assignments = String::new();
    for (name, value) in record.iter() {
        let is_key_column = key_spec
            .columns()
            .iter()
            .any(|k| k.eq_ignore_ascii_case(name));
        if is_key_column && !value.is_null() {
            continue;
        }
        let placeholder = cmd.bind(value.clone());
        assignments.push_str(&format!("[{name}] = {placeholder}, \r\n"));
    }
    if cmd.params.is_empty() {
        return Err(TableGatewayError::EmptyRecord(
            "no assignable columns in record".to_string(),
        ));
    }
    assignments.truncate(assignments.len() - 4); // trailing ", \r\n"

    let mut where_clause = String::new();
    push_key_clause(&mut where_clause, &mut cmd, key_spec.columns(), key_values);
    cmd.sql = format!("UPDATE {table} SET {assignments} WHERE {where_clause}");
    Ok(cmd)
}

/// Synthesize a DELETE over the composite key with freshly bound key
/// parameters.
pub(crate) fn delete_by_key_command(
    table: &str,
    key_spec: &KeySpec,
    key_values: &[SqlValue],
) -> SqlCommand {
    let mut cmd = SqlCommand::new(table);
    let mut sql = format!("DELETE FROM {table} WHERE ");
    push_key_clause(&mut sql, &mut cmd, key_spec.columns(), key_values);
    cmd.sql = sql;
    cmd
}

/// Synthesize a DELETE over a caller-supplied predicate. The fragment passes
/// through verbatim (trust boundary) with `WHERE` prepended if missing; args
/// bind positionally for the fragment's `@N` placeholders.
pub(crate) fn delete_where_command(
    table: &str,
    where_clause: &str,
    args: &[SqlValue],
) -> SqlCommand {
    let mut cmd = SqlCommand::new(table);
    cmd.bind_all(args.iter().cloned());
    cmd.sql = format!("DELETE FROM {table} {}", ensure_where(where_clause));
    cmd
}
