use table_gateway::prelude::*;
use tempfile::TempDir;

fn seeded_table(dir: &TempDir, rows: i64) -> Result<Table, Box<dyn std::error::Error>> {
    let path = dir.path().join("paged.db");
    let profile = ConnectionProfile::new("main", DriverKind::Sqlite, path.to_string_lossy());
    let items = Table::builder(profile)
        .table("Items")
        .primary_key("ID")
        .build()?;
    items.execute_one(&SqlCommand::with_sql(
        "[Items]",
        "CREATE TABLE Items (ID INTEGER PRIMARY KEY AUTOINCREMENT, Label TEXT, Bucket INTEGER)",
    ))?;
    // one transaction for the whole seed batch
    let records: Vec<Record> = (1..=rows)
        .map(|n| {
            Record::from_pairs([
                ("Label", SqlValue::Text(format!("item-{n:03}"))),
                ("Bucket", SqlValue::Int(n % 2)),
            ])
        })
        .collect();
    items.save(records)?;
    Ok(items)
}

#[test]
fn forty_five_rows_at_twenty_per_page_is_three_pages() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let items = seeded_table(&dir, 45)?;

    let page = items.paged("", "", "*", 20, 3, &[])?;
    assert_eq!(page.total_records, 45);
    assert_eq!(page.total_pages, 3);
    let rows = page.items.collect_all()?;
    assert_eq!(rows.len(), 5);
    // default ordering is the primary key, so the window starts at row 41
    assert_eq!(rows[0].get("ID").and_then(SqlValue::as_int), Some(&41));
    Ok(())
}

#[test]
fn exact_multiple_has_no_remainder_page() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let items = seeded_table(&dir, 40)?;

    let page = items.paged("", "", "*", 20, 2, &[])?;
    assert_eq!(page.total_records, 40);
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.items.collect_all()?.len(), 20);
    Ok(())
}

#[test]
fn filter_and_ordering_apply_to_both_count_and_window()
-> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let items = seeded_table(&dir, 45)?;

    let page = items.paged("Bucket = @0", "Label", "*", 10, 1, &[SqlValue::Int(0)])?;
    assert_eq!(page.total_records, 22);
    assert_eq!(page.total_pages, 3);
    let rows = page.items.collect_all()?;
    assert_eq!(rows.len(), 10);
    assert_eq!(
        rows[0].get("Label").and_then(SqlValue::as_text),
        Some("item-002")
    );
    Ok(())
}

#[test]
fn page_past_the_end_is_empty_but_totals_hold() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let items = seeded_table(&dir, 45)?;

    let page = items.paged("", "", "*", 20, 4, &[])?;
    assert_eq!(page.total_records, 45);
    assert_eq!(page.total_pages, 3);
    assert!(page.items.collect_all()?.is_empty());
    Ok(())
}

#[test]
fn non_positive_page_yields_an_empty_window() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let items = seeded_table(&dir, 5)?;

    let page = items.paged("", "", "*", 20, 0, &[])?;
    assert!(page.items.collect_all()?.is_empty());
    Ok(())
}
