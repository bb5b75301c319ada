use crate::command::SqlCommand;
use crate::key::KeySpec;
use crate::types::SqlValue;

use super::{ensure_order_by, ensure_where, push_key_clause};

/// Build the Select-All text: `SELECT [TOP <limit>] <columns> FROM <table>
/// [WHERE ...] [ORDER BY ...]`. A limit of zero or less means no row cap.
pub(crate) fn all_sql(
    table: &str,
    where_clause: &str,
    order_by: &str,
    limit: i64,
    columns: &str,
) -> String {
    let mut sql = if limit > 0 {
        format!("SELECT TOP {limit} {columns} FROM {table}")
    } else {
        format!("SELECT {columns} FROM {table}")
    };
    if !where_clause.is_empty() {
        sql.push(' ');
        sql.push_str(&ensure_where(where_clause));
    }
    if !order_by.is_empty() {
        sql.push(' ');
        sql.push_str(&ensure_order_by(order_by));
    }
    sql
}

/// The two commands behind a paged read: the windowed item query and the
/// COUNT over the same filter.
pub(crate) struct PagedQueries {
    pub items: SqlCommand,
    pub count: SqlCommand,
}

/// Build a windowed page query ordered by `order_by` (defaulting to the
/// primary-key field list) with 1-based inclusive row bounds
/// `[(page-1)*page_size + 1, page*page_size]`, plus the companion COUNT.
/// Page and size are not validated; a non-positive page yields an empty or
/// negative window.
pub(crate) fn paged_queries(
    table: &str,
    key_spec: &KeySpec,
    where_clause: &str,
    order_by: &str,
    columns: &str,
    page_size: i64,
    page: i64,
    args: &[SqlValue],
) -> PagedQueries {
    let order_by = if order_by.is_empty() {
        key_spec.field_list()
    } else {
        order_by
    };
    let where_sql = if where_clause.is_empty() {
        String::new()
    } else {
        format!(" {}", ensure_where(where_clause))
    };

    let mut count = SqlCommand::new(table);
    count.bind_all(args.iter().cloned());
    count.sql = format!(
        "SELECT COUNT({key}) FROM {table}{where_sql}",
        key = key_spec.first_column()
    );

    let page_start = (page - 1) * page_size;
    let page_end = page_start + page_size;
    let mut items = SqlCommand::new(table);
    items.bind_all(args.iter().cloned());
    items.sql = format!(
        "SELECT {columns} FROM (SELECT ROW_NUMBER() OVER (ORDER BY {order_by}) AS Row, {columns} FROM {table}{where_sql}) AS Paged WHERE Row > {page_start} AND Row <= {page_end}"
    );

    PagedQueries { items, count }
}

/// Total page count: integer division with a remainder bump, never
/// floating-point rounding.
pub(crate) fn total_pages(total_records: i64, page_size: i64) -> i64 {
    let mut pages = total_records / page_size;
    if total_records % page_size > 0 {
        pages += 1;
    }
    pages
}

/// Build the single-row-by-key lookup command.
pub(crate) fn single_command(
    table: &str,
    key_spec: &KeySpec,
    columns: &str,
    key_values: &[SqlValue],
) -> SqlCommand {
    let mut cmd = SqlCommand::new(table);
    let mut sql = format!("SELECT {columns} FROM {table} WHERE ");
    push_key_clause(&mut sql, &mut cmd, key_spec.columns(), key_values);
    cmd.sql = sql;
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(spec: &str) -> KeySpec {
        KeySpec::parse(spec, ',').unwrap()
    }

    #[test]
    fn all_sql_shapes() {
        assert_eq!(all_sql("[T]", "", "", 0, "*"), "SELECT * FROM [T]");
        assert_eq!(
            all_sql("[T]", "Age > @0", "Name", 10, "Name, Age"),
            "SELECT TOP 10 Name, Age FROM [T] WHERE Age > @0 ORDER BY Name"
        );
        assert_eq!(
            all_sql("[T]", "WHERE Age > @0", "order by Name", 0, "*"),
            "SELECT * FROM [T] WHERE Age > @0 order by Name"
        );
        // zero or negative limit means no cap
        assert_eq!(all_sql("[T]", "", "", -5, "*"), "SELECT * FROM [T]");
    }

    #[test]
    fn paged_window_bounds_are_one_based_inclusive() {
        let q = paged_queries("[T]", &key("ID"), "", "", "*", 20, 3, &[]);
        assert_eq!(
            q.items.sql,
            "SELECT * FROM (SELECT ROW_NUMBER() OVER (ORDER BY ID) AS Row, * FROM [T]) AS Paged WHERE Row > 40 AND Row <= 60"
        );
        assert_eq!(q.count.sql, "SELECT COUNT(ID) FROM [T]");
    }

    #[test]
    fn paged_filter_applies_to_both_queries() {
        let q = paged_queries(
            "[T]",
            &key("ID"),
            "Age > @0",
            "Name",
            "*",
            10,
            1,
            &[SqlValue::Int(21)],
        );
        assert_eq!(
            q.items.sql,
            "SELECT * FROM (SELECT ROW_NUMBER() OVER (ORDER BY Name) AS Row, * FROM [T] WHERE Age > @0) AS Paged WHERE Row > 0 AND Row <= 10"
        );
        assert_eq!(q.count.sql, "SELECT COUNT(ID) FROM [T] WHERE Age > @0");
        assert_eq!(q.items.params.len(), 1);
        assert_eq!(q.count.params.len(), 1);
    }

    #[test]
    fn paged_defaults_ordering_to_key_field_list() {
        let q = paged_queries("[T]", &key("A,B"), "", "", "*", 5, 1, &[]);
        assert!(q.items.sql.contains("ORDER BY A, B"));
    }

    #[test]
    fn total_pages_bumps_on_remainder_only() {
        assert_eq!(total_pages(45, 20), 3);
        assert_eq!(total_pages(40, 20), 2);
        assert_eq!(total_pages(0, 20), 0);
        assert_eq!(total_pages(1, 20), 1);
    }

    #[test]
    fn single_command_builds_key_lookup() {
        let cmd = single_command("[Users]", &key("ID"), "*", &[SqlValue::Int(5)]);
        assert_eq!(cmd.sql, "SELECT * FROM [Users] WHERE [ID] = @0\r\n");
        assert_eq!(cmd.params[0].value, SqlValue::Int(5));
    }
}
