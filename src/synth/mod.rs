//! Command synthesis: builds parameterized SQL text plus its positional
//! parameter list for each gateway operation. Purely functional; every
//! placeholder is appended through [`SqlCommand::bind`] so text and
//! parameters cannot drift out of alignment.
//!
//! Caller-supplied WHERE/ORDER BY fragments and raw SQL are trust
//! boundaries: they are concatenated verbatim, never quoted or escaped.
//! Only values are parameterized.

mod dml;
mod select;

pub(crate) use dml::{delete_by_key_command, delete_where_command, insert_command, update_command};
pub(crate) use select::{PagedQueries, all_sql, paged_queries, single_command, total_pages};

use crate::command::SqlCommand;

/// Quote a possibly schema-qualified table name: each `.`-separated segment
/// is bracket-quoted individually.
#[must_use]
pub(crate) fn quote_table(name: &str) -> String {
    name.split('.')
        .map(|segment| format!("[{segment}]"))
        .collect::<Vec<_>>()
        .join(".")
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Prepend `WHERE` to a caller fragment unless it already leads with one.
fn ensure_where(fragment: &str) -> String {
    if starts_with_ignore_case(fragment.trim(), "where") {
        fragment.to_string()
    } else {
        format!("WHERE {fragment}")
    }
}

/// Prepend `ORDER BY` to a caller fragment unless it already leads with one.
fn ensure_order_by(fragment: &str) -> String {
    if starts_with_ignore_case(fragment.trim(), "order by") {
        fragment.to_string()
    } else {
        format!("ORDER BY {fragment}")
    }
}

/// Append the AND-joined key-equality clause shared by update, delete-by-key,
/// and single-row lookups. Binds one parameter per key column, continuing the
/// command's placeholder counter; missing values bind NULL.
fn push_key_clause(
    sql: &mut String,
    cmd: &mut SqlCommand,
    key_columns: &[String],
    key_values: &[crate::types::SqlValue],
) {
    for (i, column) in key_columns.iter().enumerate() {
        if i > 0 {
            sql.push_str(" AND ");
        }
        let placeholder = cmd.bind(
            key_values
                .get(i)
                .cloned()
                .unwrap_or(crate::types::SqlValue::Null),
        );
        sql.push_str(&format!("[{column}] = {placeholder}\r\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quotes_schema_qualified_names_per_segment() {
        assert_eq!(quote_table("Users"), "[Users]");
        assert_eq!(quote_table("dbo.Users"), "[dbo].[Users]");
    }

    #[test]
    fn where_normalization_is_case_insensitive() {
        assert_eq!(ensure_where("Age > @0"), "WHERE Age > @0");
        assert_eq!(ensure_where("WHERE Age > @0"), "WHERE Age > @0");
        assert_eq!(ensure_where("  where Age > @0"), "  where Age > @0");
    }

    #[test]
    fn order_by_normalization_is_case_insensitive() {
        assert_eq!(ensure_order_by("Name"), "ORDER BY Name");
        assert_eq!(ensure_order_by("Order By Name"), "Order By Name");
    }
}
