//! Batch planner: classifies heterogeneous records as insert, update, or
//! delete and synthesizes one command per record, preserving input order.

use crate::command::SqlCommand;
use crate::error::TableGatewayError;
use crate::key::KeySpec;
use crate::record::Record;
use crate::synth;
use crate::types::SqlValue;

/// Records carrying this entry with a true value are deleted instead of
/// updated when they have a full primary key.
pub(crate) const REMOVAL_FLAG: &str = "Remove";

/// Classify each record and synthesize its command:
/// full key + removal flag -> delete by key; full key -> update; otherwise
/// insert. Output order equals input order, which later becomes the
/// transactional execution order.
///
/// # Errors
/// Returns `EmptyRecord` if any record synthesizes an insert or update with
/// no usable columns.
pub(crate) fn plan_commands(
    table: &str,
    key_spec: &KeySpec,
    records: &[Record],
) -> Result<Vec<SqlCommand>, TableGatewayError> {
    let mut commands = Vec::with_capacity(records.len());
    for record in records {
        let command = if key_spec.has_primary_key(record) {
            let key = key_spec.extract_key(record).unwrap_or_default();
            if marked_for_removal(record) {
                synth::delete_by_key_command(table, key_spec, &key)
            } else {
                synth::update_command(table, key_spec, record, &key)?
            }
        } else {
            synth::insert_command(table, record)?
        };
        commands.push(command);
    }
    Ok(commands)
}

fn marked_for_removal(record: &Record) -> bool {
    record
        .get(REMOVAL_FLAG)
        .and_then(SqlValue::as_bool)
        .is_some_and(|flag| *flag)
}
