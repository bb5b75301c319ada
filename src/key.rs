use crate::error::TableGatewayError;
use crate::record::Record;
use crate::types::SqlValue;

/// Ordered composite primary-key specification for a table binding.
///
/// Parsed once at construction from a delimiter-separated column list;
/// immutable afterwards, so it is safe to read from many threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySpec {
    columns: Vec<String>,
    field_list: String,
}

impl KeySpec {
    /// Parse a key specification such as `"ID"` or `"OrderId, LineNo"`.
    ///
    /// Elements are trimmed and deduplicated case-insensitively, preserving
    /// first-seen order.
    ///
    /// # Errors
    /// Returns `ConfigError` if no usable column names remain.
    pub fn parse(spec: &str, separator: char) -> Result<Self, TableGatewayError> {
        let mut columns: Vec<String> = Vec::new();
        for part in spec.split(separator) {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }
            if columns.iter().any(|c| c.eq_ignore_ascii_case(trimmed)) {
                continue;
            }
            columns.push(trimmed.to_string());
        }
        if columns.is_empty() {
            return Err(TableGatewayError::ConfigError(format!(
                "primary key specification '{spec}' has no usable columns"
            )));
        }
        let field_list = columns.join(", ");
        Ok(Self {
            columns,
            field_list,
        })
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Comma-joined column list; the default ORDER BY for paged reads.
    #[must_use]
    pub fn field_list(&self) -> &str {
        &self.field_list
    }

    #[must_use]
    pub fn first_column(&self) -> &str {
        &self.columns[0]
    }

    /// True iff every key column is present in the record with a non-null
    /// value. Drives the insert-vs-update classification.
    #[must_use]
    pub fn has_primary_key(&self, record: &Record) -> bool {
        self.columns
            .iter()
            .all(|col| matches!(record.get(col), Some(value) if !value.is_null()))
    }

    /// Best-effort key extraction: missing columns become `Null` entries
    /// rather than failing. Returns `None` only for an empty specification,
    /// which [`KeySpec::parse`] rules out.
    ///
    /// Asymmetric with [`KeySpec::has_primary_key`] on purpose: an update
    /// attempted with a partially-null composite key produces a WHERE clause
    /// comparing that column to NULL, which matches no rows.
    #[must_use]
    pub fn extract_key(&self, record: &Record) -> Option<Vec<SqlValue>> {
        if self.columns.is_empty() {
            return None;
        }
        Some(
            self.columns
                .iter()
                .map(|col| record.get(col).cloned().unwrap_or(SqlValue::Null))
                .collect(),
        )
    }
}
