use tracing::debug;

use crate::command::SqlCommand;
use crate::config::{ConnectionProfile, GatewayConfig};
use crate::error::TableGatewayError;
use crate::executor;
use crate::key::KeySpec;
use crate::planner;
use crate::record::{IntoRecord, Record};
use crate::stream::QueryStream;
use crate::synth;
use crate::types::SqlValue;

/// One window of a paged read, plus the totals computed for it.
pub struct PagedResult {
    /// The rows of the requested page, streamed lazily
    pub items: QueryStream,
    pub total_records: i64,
    /// `ceil(total_records / page_size)`, computed with integer arithmetic
    pub total_pages: i64,
}

/// A dynamic table binding: table name, composite-key specification, and the
/// connection profile to run against. No model classes, no mapping code —
/// operations take and return [`Record`]s.
///
/// All state is fixed at build time, so a `Table` can be shared freely
/// across threads. Every operation acquires one connection, runs, and
/// releases it before returning (or, for streamed reads, when the stream is
/// dropped or exhausted).
#[derive(Debug, Clone)]
pub struct Table {
    profile: ConnectionProfile,
    table_name: String,
    key_spec: KeySpec,
}

impl Table {
    /// Start building a binding against the given profile.
    #[must_use]
    pub fn builder(profile: ConnectionProfile) -> TableBuilder {
        TableBuilder {
            profile,
            table: None,
            primary_key: "ID".to_string(),
            separator: ',',
        }
    }

    /// Start building a binding against a named profile from configuration.
    ///
    /// # Errors
    /// Returns `ConfigError` if the profile name is unknown.
    pub fn for_profile(
        config: &GatewayConfig,
        profile_name: &str,
    ) -> Result<TableBuilder, TableGatewayError> {
        Ok(Self::builder(config.profile(profile_name)?.clone()))
    }

    /// The bracket-quoted, schema-qualified table name.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// The comma-joined primary-key column list.
    #[must_use]
    pub fn primary_key_field(&self) -> &str {
        self.key_spec.field_list()
    }

    #[must_use]
    pub fn key_spec(&self) -> &KeySpec {
        &self.key_spec
    }

    /// Run a caller-supplied query and stream its rows lazily. The SQL text
    /// passes through verbatim (trust boundary); `args` bind positionally to
    /// its `@N` placeholders.
    ///
    /// # Errors
    /// Returns `ConnectionError` if the database cannot be opened; later
    /// failures surface as stream items.
    pub fn query(&self, sql: &str, args: &[SqlValue]) -> Result<QueryStream, TableGatewayError> {
        let mut cmd = SqlCommand::with_sql(&self.table_name, sql);
        cmd.bind_all(args.iter().cloned());
        QueryStream::open(&self.profile, cmd)
    }

    /// Run a caller-supplied query and return the first column of its first
    /// row, if any.
    ///
    /// # Errors
    /// Propagates connection and execution errors.
    pub fn scalar(
        &self,
        sql: &str,
        args: &[SqlValue],
    ) -> Result<Option<SqlValue>, TableGatewayError> {
        let mut cmd = SqlCommand::with_sql(&self.table_name, sql);
        cmd.bind_all(args.iter().cloned());
        executor::scalar(&self.profile, &cmd)
    }

    /// Insert one record and return the identity assigned to the new row.
    ///
    /// # Errors
    /// Returns `EmptyRecord` for a record with no columns; propagates
    /// execution errors (the insert rolls back on failure).
    pub fn insert(&self, record: impl IntoRecord) -> Result<SqlValue, TableGatewayError> {
        let record = record.into_record();
        let cmd = synth::insert_command(&self.table_name, &record)?;
        let outcome = executor::execute_all(&self.profile, std::slice::from_ref(&cmd))?;
        Ok(SqlValue::Int(outcome.last_insert_id))
    }

    /// Update the row(s) matching the given key values and return the
    /// affected-row count. Key columns present in the record with non-null
    /// values are not updated.
    ///
    /// # Errors
    /// Returns `EmptyRecord` when nothing assignable remains; propagates
    /// execution errors.
    pub fn update(
        &self,
        record: impl IntoRecord,
        key: &[SqlValue],
    ) -> Result<usize, TableGatewayError> {
        let record = record.into_record();
        let cmd = synth::update_command(&self.table_name, &self.key_spec, &record, key)?;
        Ok(executor::execute_all(&self.profile, std::slice::from_ref(&cmd))?.rows_affected)
    }

    /// Delete the row matching the given key values.
    ///
    /// # Errors
    /// Propagates execution errors.
    pub fn delete_by_key(&self, key: &[SqlValue]) -> Result<usize, TableGatewayError> {
        let cmd = synth::delete_by_key_command(&self.table_name, &self.key_spec, key);
        Ok(executor::execute_all(&self.profile, std::slice::from_ref(&cmd))?.rows_affected)
    }

    /// Delete rows matching a caller-supplied predicate. The fragment passes
    /// through verbatim (trust boundary); `args` bind its `@N` placeholders.
    ///
    /// # Errors
    /// Propagates execution errors.
    pub fn delete_where(
        &self,
        where_clause: &str,
        args: &[SqlValue],
    ) -> Result<usize, TableGatewayError> {
        let cmd = synth::delete_where_command(&self.table_name, where_clause, args);
        Ok(executor::execute_all(&self.profile, std::slice::from_ref(&cmd))?.rows_affected)
    }

    /// Classify each input as insert, update, or delete and return the
    /// synthesized commands in input order without executing them.
    ///
    /// # Errors
    /// Returns `EmptyRecord` if any input synthesizes to a command with no
    /// usable columns.
    pub fn build_commands<I, R>(&self, things: I) -> Result<Vec<SqlCommand>, TableGatewayError>
    where
        I: IntoIterator<Item = R>,
        R: IntoRecord,
    {
        let records: Vec<Record> = things.into_iter().map(IntoRecord::into_record).collect();
        planner::plan_commands(&self.table_name, &self.key_spec, &records)
    }

    /// Save a heterogeneous batch in one transaction: records with a full
    /// primary key update (or delete, when flagged `Remove`), the rest
    /// insert. Returns the summed affected-row count. Nothing commits if any
    /// command fails.
    ///
    /// # Errors
    /// Returns `EmptyRecord` from classification, or the first execution
    /// error (the whole batch rolls back).
    pub fn save<I, R>(&self, things: I) -> Result<usize, TableGatewayError>
    where
        I: IntoIterator<Item = R>,
        R: IntoRecord,
    {
        let commands = self.build_commands(things)?;
        debug!(table = %self.table_name, commands = commands.len(), "saving batch");
        self.execute(&commands)
    }

    /// Execute an ordered command sequence in one transaction and return the
    /// summed affected-row count.
    ///
    /// # Errors
    /// Propagates the first execution error; the whole batch rolls back.
    pub fn execute(&self, commands: &[SqlCommand]) -> Result<usize, TableGatewayError> {
        Ok(executor::execute_all(&self.profile, commands)?.rows_affected)
    }

    /// Execute one command through the same transactional path.
    ///
    /// # Errors
    /// Propagates the execution error; the command rolls back.
    pub fn execute_one(&self, command: &SqlCommand) -> Result<usize, TableGatewayError> {
        self.execute(std::slice::from_ref(command))
    }

    /// Stream all rows matching the given filter, ordering, and optional row
    /// cap (`limit <= 0` means no cap). WHERE and ORDER BY fragments pass
    /// through verbatim (trust boundaries).
    ///
    /// # Errors
    /// Returns `ConnectionError` if the database cannot be opened.
    pub fn all(
        &self,
        where_clause: &str,
        order_by: &str,
        limit: i64,
        columns: &str,
        args: &[SqlValue],
    ) -> Result<QueryStream, TableGatewayError> {
        let sql = synth::all_sql(&self.table_name, where_clause, order_by, limit, columns);
        self.query(&sql, args)
    }

    /// Stream every row of the table.
    ///
    /// # Errors
    /// Returns `ConnectionError` if the database cannot be opened.
    pub fn all_rows(&self) -> Result<QueryStream, TableGatewayError> {
        self.all("", "", 0, "*", &[])
    }

    /// Read one page of rows plus the total record and page counts. Ordering
    /// defaults to the primary-key field list. `page` is 1-based and not
    /// validated; a non-positive page yields an empty window.
    ///
    /// # Errors
    /// Returns `ExecutionError` for a non-positive `page_size`; propagates
    /// count-query and connection errors.
    pub fn paged(
        &self,
        where_clause: &str,
        order_by: &str,
        columns: &str,
        page_size: i64,
        page: i64,
        args: &[SqlValue],
    ) -> Result<PagedResult, TableGatewayError> {
        if page_size <= 0 {
            return Err(TableGatewayError::ExecutionError(format!(
                "page size must be positive, got {page_size}"
            )));
        }
        let queries = synth::paged_queries(
            &self.table_name,
            &self.key_spec,
            where_clause,
            order_by,
            columns,
            page_size,
            page,
            args,
        );
        let total_records = match executor::scalar(&self.profile, &queries.count)? {
            Some(SqlValue::Int(n)) => n,
            _ => 0,
        };
        let total_pages = synth::total_pages(total_records, page_size);
        let items = QueryStream::open(&self.profile, queries.items)?;
        Ok(PagedResult {
            items,
            total_records,
            total_pages,
        })
    }

    /// Fetch the single row matching the given key values, all columns.
    ///
    /// # Errors
    /// Propagates connection and execution errors.
    pub fn single(&self, key: &[SqlValue]) -> Result<Option<Record>, TableGatewayError> {
        self.single_columns("*", key)
    }

    /// Fetch selected columns of the single row matching the given key
    /// values.
    ///
    /// # Errors
    /// Propagates connection and execution errors.
    pub fn single_columns(
        &self,
        columns: &str,
        key: &[SqlValue],
    ) -> Result<Option<Record>, TableGatewayError> {
        let cmd = synth::single_command(&self.table_name, &self.key_spec, columns, key);
        let mut stream = QueryStream::open(&self.profile, cmd)?;
        stream.next().transpose()
    }
}

/// Builder for [`Table`] bindings. The table name is required; the primary
/// key defaults to `ID` with `,` separating composite parts.
#[derive(Debug, Clone)]
pub struct TableBuilder {
    profile: ConnectionProfile,
    table: Option<String>,
    primary_key: String,
    separator: char,
}

impl TableBuilder {
    #[must_use]
    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.table = Some(name.into());
        self
    }

    #[must_use]
    pub fn primary_key(mut self, spec: impl Into<String>) -> Self {
        self.primary_key = spec.into();
        self
    }

    #[must_use]
    pub fn key_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Finish the binding: quotes the table name and parses the key
    /// specification once.
    ///
    /// # Errors
    /// Returns `ConfigError` for a missing table name or an unusable key
    /// specification.
    pub fn build(self) -> Result<Table, TableGatewayError> {
        let raw = self.table.ok_or_else(|| {
            TableGatewayError::ConfigError("table name is required".to_string())
        })?;
        let key_spec = KeySpec::parse(&self.primary_key, self.separator)?;
        Ok(Table {
            profile: self.profile,
            table_name: synth::quote_table(&raw),
            key_spec,
        })
    }
}
