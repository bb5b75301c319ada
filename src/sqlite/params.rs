use crate::command::BoundParam;
use crate::types::SqlValue;

/// Convert a single gateway value to a rusqlite `Value`.
///
/// Size hints are dropped here: `SQLite` has no bounded text columns, so
/// bounded and unbounded text bind identically.
pub(crate) fn value_to_sqlite(value: &SqlValue) -> rusqlite::types::Value {
    match value {
        SqlValue::Int(i) => rusqlite::types::Value::Integer(*i),
        SqlValue::Float(f) => rusqlite::types::Value::Real(*f),
        SqlValue::Text(s) => rusqlite::types::Value::Text(s.clone()),
        SqlValue::Bool(b) => rusqlite::types::Value::Integer(i64::from(*b)),
        SqlValue::Timestamp(dt) => {
            rusqlite::types::Value::Text(format!("{}", dt.format("%F %T%.f")))
        }
        SqlValue::Null => rusqlite::types::Value::Null,
        SqlValue::Json(jval) => rusqlite::types::Value::Text(jval.to_string()),
        SqlValue::Blob(bytes) => rusqlite::types::Value::Blob(bytes.clone()),
        SqlValue::Uuid(id) => rusqlite::types::Value::Text(id.hyphenated().to_string()),
        // The binder normalizes wrappers before they reach a command; handle
        // stray ones the same way for direct conversions.
        SqlValue::Record(rec) => match rec.clone().into_first() {
            Some(first) => value_to_sqlite(&first),
            None => rusqlite::types::Value::Null,
        },
    }
}

/// Convert a command's parameter list into `SQLite` values.
pub(crate) fn convert_params(params: &[BoundParam]) -> Vec<rusqlite::types::Value> {
    params.iter().map(|p| value_to_sqlite(&p.value)).collect()
}

pub(crate) fn values_as_tosql(values: &[rusqlite::types::Value]) -> Vec<&dyn rusqlite::ToSql> {
    values.iter().map(|v| v as &dyn rusqlite::ToSql).collect()
}
