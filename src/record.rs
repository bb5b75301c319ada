use crate::types::SqlValue;

/// Insertion-ordered column/value map; the universal in-memory row shape.
///
/// Order matters: it determines the column and placeholder ordering of
/// synthesized SQL. Rows read back from a query are `Record`s too.
///
/// ```rust
/// use table_gateway::{Record, SqlValue};
///
/// let mut rec = Record::new();
/// rec.insert("Name", "Ann");
/// rec.insert("Age", 31);
/// assert_eq!(rec.get("Name").and_then(SqlValue::as_text), Some("Ann"));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    entries: Vec<(String, SqlValue)>,
}

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Build a record from column/value pairs, preserving their order.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<SqlValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect()
    }

    /// Set a column. An existing column (exact name match) is overwritten in
    /// place, keeping its original position; otherwise the entry is appended.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<SqlValue>) {
        let column = column.into();
        let value = value.into();
        if let Some(slot) = self.entries.iter_mut().find(|(name, _)| *name == column) {
            slot.1 = value;
        } else {
            self.entries.push((column, value));
        }
    }

    #[must_use]
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == column)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Consume the record and return its first value, if any. Used to unwrap
    /// single-value wrappers during parameter binding.
    #[must_use]
    pub fn into_first(self) -> Option<SqlValue> {
        self.entries.into_iter().next().map(|(_, value)| value)
    }
}

impl FromIterator<(String, SqlValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, SqlValue)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, SqlValue);
    type IntoIter = std::vec::IntoIter<(String, SqlValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Conversion into the canonical [`Record`] shape.
///
/// This is the closed set of supported input shapes: records pass through
/// unchanged, pair collections map in order, and [`FormData`] multimaps take
/// the first value for each key. Types with a fixed field layout implement
/// this to expose an ordered name/value view of themselves.
pub trait IntoRecord {
    fn into_record(self) -> Record;
}

impl IntoRecord for Record {
    fn into_record(self) -> Record {
        self
    }
}

impl IntoRecord for &Record {
    fn into_record(self) -> Record {
        self.clone()
    }
}

impl<K: Into<String>, V: Into<SqlValue>> IntoRecord for Vec<(K, V)> {
    fn into_record(self) -> Record {
        self.into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect()
    }
}

impl<K: Into<String>, V: Into<SqlValue>, const N: usize> IntoRecord for [(K, V); N] {
    fn into_record(self) -> Record {
        self.into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect()
    }
}

/// String multimap in the shape of posted form or query-string data.
///
/// Keys keep their first-seen position; repeated keys accumulate values.
/// Coercion to a [`Record`] takes the first value for each key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    fields: Vec<(String, Vec<String>)>,
}

impl FormData {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `key=value&key2=value2` text. Segments without `=` become keys
    /// with an empty value. No percent-decoding is applied.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut form = FormData::new();
        for segment in text.split('&') {
            if segment.is_empty() {
                continue;
            }
            match segment.split_once('=') {
                Some((key, value)) => form.append(key, value),
                None => form.append(segment, ""),
            }
        }
        form
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(name, _)| *name == key) {
            slot.1.push(value);
        } else {
            self.fields.push((key, vec![value]));
        }
    }

    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .and_then(|(_, values)| values.first())
            .map(String::as_str)
    }
}

impl IntoRecord for FormData {
    fn into_record(self) -> Record {
        self.fields
            .into_iter()
            .map(|(key, values)| {
                let first = values.into_iter().next().unwrap_or_default();
                (key, SqlValue::Text(first))
            })
            .collect()
    }
}
