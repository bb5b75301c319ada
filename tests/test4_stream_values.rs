use chrono::NaiveDateTime;
use table_gateway::prelude::*;
use tempfile::TempDir;
use uuid::Uuid;

fn sqlite_profile(dir: &TempDir, file: &str) -> ConnectionProfile {
    let path = dir.path().join(file);
    ConnectionProfile::new("main", DriverKind::Sqlite, path.to_string_lossy())
}

#[test]
fn stream_is_lazy_and_releases_the_connection_when_abandoned()
-> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let profile = sqlite_profile(&dir, "stream.db");
    let events = Table::builder(profile)
        .table("Events")
        .primary_key("ID")
        .build()?;
    events.execute_one(&SqlCommand::with_sql(
        "[Events]",
        "CREATE TABLE Events (ID INTEGER PRIMARY KEY AUTOINCREMENT, Label TEXT)",
    ))?;
    let records: Vec<Record> = (0..200)
        .map(|n| Record::from_pairs([("Label", SqlValue::Text(format!("e{n}")))]))
        .collect();
    events.save(records)?;

    let mut stream = events.query("SELECT * FROM Events ORDER BY ID", &[])?;
    let first = stream.next().expect("at least one row")?;
    assert_eq!(first.get("Label").and_then(SqlValue::as_text), Some("e0"));
    // abandon the remaining 199 rows; the cursor and its connection are
    // released, so a write on a fresh connection goes through
    drop(stream);

    let removed = events.delete_where("ID > @0", &[SqlValue::Int(100)])?;
    assert_eq!(removed, 100);
    Ok(())
}

#[test]
fn stream_surfaces_preparation_errors_as_first_item() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let profile = sqlite_profile(&dir, "bad.db");
    let table = Table::builder(profile).table("Nope").primary_key("ID").build()?;

    let mut stream = table.query("SELECT * FROM NoSuchTable", &[])?;
    assert!(matches!(stream.next(), Some(Err(_))));
    assert!(stream.next().is_none());
    Ok(())
}

#[test]
fn values_round_trip_through_insert_and_select() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let profile = sqlite_profile(&dir, "values.db");
    let samples = Table::builder(profile)
        .table("Samples")
        .primary_key("ID")
        .build()?;
    samples.execute_one(&SqlCommand::with_sql(
        "[Samples]",
        "CREATE TABLE Samples (
            ID INTEGER PRIMARY KEY AUTOINCREMENT,
            Token TEXT,
            Seen TEXT,
            Payload BLOB,
            Meta TEXT,
            Score REAL,
            Active INTEGER,
            Note TEXT
        )",
    ))?;

    let token = Uuid::new_v4();
    let seen = NaiveDateTime::parse_from_str("2024-01-03 10:30:00", "%Y-%m-%d %H:%M:%S")?;
    let id = samples.insert([
        ("Token", SqlValue::Uuid(token)),
        ("Seen", SqlValue::Timestamp(seen)),
        ("Payload", SqlValue::Blob(b"\x00\x01\x02".to_vec())),
        ("Meta", SqlValue::Json(serde_json::json!({"k": 1}))),
        ("Score", SqlValue::Float(99.5)),
        ("Active", SqlValue::Bool(true)),
        ("Note", SqlValue::Null),
    ])?;

    let row = samples.single(&[id])?.expect("row");
    assert_eq!(row.get("Token").and_then(SqlValue::as_uuid), Some(token));
    assert_eq!(row.get("Seen").and_then(SqlValue::as_timestamp), Some(seen));
    assert_eq!(
        row.get("Payload").and_then(SqlValue::as_blob),
        Some(&b"\x00\x01\x02"[..])
    );
    assert_eq!(
        row.get("Meta").and_then(SqlValue::as_text),
        Some(r#"{"k":1}"#)
    );
    assert_eq!(row.get("Score").and_then(SqlValue::as_float), Some(99.5));
    assert_eq!(row.get("Active").and_then(SqlValue::as_bool), Some(&true));
    assert!(row.get("Note").is_some_and(SqlValue::is_null));
    Ok(())
}

#[test]
fn single_value_wrapper_binds_its_first_value() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let profile = sqlite_profile(&dir, "wrapper.db");
    let users = Table::builder(profile)
        .table("Users")
        .primary_key("ID")
        .build()?;
    users.execute_one(&SqlCommand::with_sql(
        "[Users]",
        "CREATE TABLE Users (ID INTEGER PRIMARY KEY AUTOINCREMENT, Name TEXT)",
    ))?;
    users.insert([("Name", SqlValue::from("Ann"))])?;

    // a one-entry record works anywhere a plain value does
    let wrapper = Record::from_pairs([("id", SqlValue::Int(1))]);
    let row = users.single(&[SqlValue::Record(wrapper)])?.expect("row");
    assert_eq!(row.get("Name").and_then(SqlValue::as_text), Some("Ann"));
    Ok(())
}

#[test]
fn composite_keys_drive_update_and_delete() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TempDir::new()?;
    let profile = sqlite_profile(&dir, "composite.db");
    let lines = Table::builder(profile)
        .table("OrderLines")
        .primary_key("OrderId,LineNo")
        .build()?;
    lines.execute_one(&SqlCommand::with_sql(
        "[OrderLines]",
        "CREATE TABLE OrderLines (OrderId INTEGER, LineNo INTEGER, Qty INTEGER,
         PRIMARY KEY (OrderId, LineNo))",
    ))?;

    // keys are client-supplied here, so Save would classify these as
    // updates; they have to go in through insert
    lines.insert([
        ("OrderId", SqlValue::Int(1)),
        ("LineNo", SqlValue::Int(1)),
        ("Qty", SqlValue::Int(5)),
    ])?;
    lines.insert([
        ("OrderId", SqlValue::Int(1)),
        ("LineNo", SqlValue::Int(2)),
        ("Qty", SqlValue::Int(3)),
    ])?;

    let affected = lines.update(
        Record::from_pairs([("Qty", SqlValue::Int(9))]),
        &[SqlValue::Int(1), SqlValue::Int(2)],
    )?;
    assert_eq!(affected, 1);
    let row = lines
        .single(&[SqlValue::Int(1), SqlValue::Int(2)])?
        .expect("line");
    assert_eq!(row.get("Qty").and_then(SqlValue::as_int), Some(&9));

    // a partially-null key compares a column to NULL and matches nothing
    let none = lines.update(
        Record::from_pairs([("Qty", SqlValue::Int(1))]),
        &[SqlValue::Int(1), SqlValue::Null],
    )?;
    assert_eq!(none, 0);

    assert_eq!(lines.delete_by_key(&[SqlValue::Int(1), SqlValue::Int(1)])?, 1);
    assert_eq!(
        lines.scalar("SELECT COUNT(*) FROM OrderLines", &[])?,
        Some(SqlValue::Int(1))
    );
    Ok(())
}
