use crate::types::SqlValue;

/// Width of a bounded text parameter; text longer than this binds as an
/// unbounded large object. Hard constant, not configurable.
pub const BOUNDED_TEXT_SIZE: usize = 4000;

/// Driver-facing sizing for a bound parameter. `SQLite` ignores these; drivers
/// with sized text columns consume them at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeHint {
    /// Let the driver infer the parameter type and size
    Default,
    /// Text bounded to a fixed column width
    Bounded(usize),
    /// Large-object sized text
    Unbounded,
}

/// One positional parameter: a normalized value plus its size hint.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundParam {
    pub value: SqlValue,
    pub size: SizeHint,
}

/// Parameterized SQL text plus its positional parameter list.
///
/// The Nth placeholder in the text (`@N`, zero-based) binds the Nth entry of
/// `params`. [`SqlCommand::bind`] is the only way parameters are appended, so
/// the parameter list length doubles as the placeholder counter and the two
/// can never drift apart.
#[derive(Debug, Clone)]
pub struct SqlCommand {
    /// SQL text in the gateway dialect: bracket-quoted identifiers, `@N`
    /// placeholders
    pub sql: String,
    /// Positional parameters, in placeholder order
    pub params: Vec<BoundParam>,
    /// Quoted name of the table this command targets
    pub table: String,
}

impl SqlCommand {
    #[must_use]
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            sql: String::new(),
            params: Vec::new(),
            table: table.into(),
        }
    }

    #[must_use]
    pub fn with_sql(table: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
            table: table.into(),
        }
    }

    /// Append one positional parameter and return its placeholder text.
    ///
    /// Normalization applied before binding:
    /// - opaque identifiers bind as their hyphenated string form, sized for a
    ///   bounded text column;
    /// - single-value record wrappers are unwrapped to their first contained
    ///   value (an empty wrapper binds NULL);
    /// - text beyond [`BOUNDED_TEXT_SIZE`] characters binds unbounded, shorter
    ///   text at the bounded width;
    /// - anything else binds as-is with driver-inferred sizing.
    pub fn bind(&mut self, value: SqlValue) -> String {
        let placeholder = format!("@{}", self.params.len());
        self.params.push(normalize(value));
        placeholder
    }

    /// Append several parameters, discarding the placeholder text.
    pub fn bind_all(&mut self, values: impl IntoIterator<Item = SqlValue>) {
        for value in values {
            self.bind(value);
        }
    }
}

fn normalize(value: SqlValue) -> BoundParam {
    match value {
        SqlValue::Uuid(id) => BoundParam {
            value: SqlValue::Text(id.hyphenated().to_string()),
            size: SizeHint::Bounded(BOUNDED_TEXT_SIZE),
        },
        SqlValue::Record(wrapper) => {
            normalize(wrapper.into_first().unwrap_or(SqlValue::Null))
        }
        SqlValue::Text(s) => {
            let size = if s.chars().count() > BOUNDED_TEXT_SIZE {
                SizeHint::Unbounded
            } else {
                SizeHint::Bounded(BOUNDED_TEXT_SIZE)
            };
            BoundParam {
                value: SqlValue::Text(s),
                size,
            }
        }
        other => BoundParam {
            value: other,
            size: SizeHint::Default,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use uuid::Uuid;

    #[test]
    fn placeholders_are_zero_based_and_sequential() {
        let mut cmd = SqlCommand::new("[t]");
        assert_eq!(cmd.bind(SqlValue::Int(1)), "@0");
        assert_eq!(cmd.bind(SqlValue::Int(2)), "@1");
        assert_eq!(cmd.bind(SqlValue::Null), "@2");
        assert_eq!(cmd.params.len(), 3);
    }

    #[test]
    fn uuid_binds_as_bounded_text() {
        let id = Uuid::new_v4();
        let mut cmd = SqlCommand::new("[t]");
        cmd.bind(SqlValue::Uuid(id));
        assert_eq!(
            cmd.params[0],
            BoundParam {
                value: SqlValue::Text(id.hyphenated().to_string()),
                size: SizeHint::Bounded(BOUNDED_TEXT_SIZE),
            }
        );
    }

    #[test]
    fn long_text_binds_unbounded() {
        let mut cmd = SqlCommand::new("[t]");
        cmd.bind(SqlValue::Text("x".repeat(BOUNDED_TEXT_SIZE)));
        cmd.bind(SqlValue::Text("x".repeat(BOUNDED_TEXT_SIZE + 1)));
        assert_eq!(cmd.params[0].size, SizeHint::Bounded(BOUNDED_TEXT_SIZE));
        assert_eq!(cmd.params[1].size, SizeHint::Unbounded);
    }

    #[test]
    fn record_wrapper_unwraps_to_first_value() {
        let mut wrapper = Record::new();
        wrapper.insert("id", 42);
        wrapper.insert("ignored", "x");
        let mut cmd = SqlCommand::new("[t]");
        cmd.bind(SqlValue::Record(wrapper));
        assert_eq!(cmd.params[0].value, SqlValue::Int(42));

        cmd.bind(SqlValue::Record(Record::new()));
        assert_eq!(cmd.params[1].value, SqlValue::Null);
    }
}
