//! Lazy row streaming. A dedicated worker thread owns the read connection
//! and its cursor (the same ownership arrangement the `SQLite` backend needs
//! for any long-lived statement); decoded records cross a bounded rendezvous
//! channel, so rows are produced no faster than the caller consumes them.
//! Dropping the stream disconnects the channel, which finalizes the cursor
//! and releases the connection.

use std::sync::mpsc;

use tracing::{debug, trace};

use crate::command::SqlCommand;
use crate::config::ConnectionProfile;
use crate::error::TableGatewayError;
use crate::record::Record;
use crate::types::DriverKind;

#[cfg(feature = "sqlite")]
use crate::sqlite;
#[cfg(feature = "sqlite")]
use crate::translation::{PlaceholderStyle, translate_placeholders};

/// Forward-only, single-pass sequence of canonical records, one per result
/// row. Not restartable; re-querying requires a fresh call.
pub struct QueryStream {
    receiver: mpsc::Receiver<Result<Record, TableGatewayError>>,
    finished: bool,
}

impl QueryStream {
    /// Open a connection for this read and start streaming rows.
    ///
    /// # Errors
    /// Returns `ConnectionError` if the database cannot be opened, or `Other`
    /// if the worker thread cannot be spawned. Preparation and row-decode
    /// failures surface as the first (and last) item of the stream.
    pub(crate) fn open(
        profile: &ConnectionProfile,
        command: SqlCommand,
    ) -> Result<Self, TableGatewayError> {
        match profile.driver {
            #[cfg(feature = "sqlite")]
            DriverKind::Sqlite => Self::open_sqlite(&profile.connection_string, command),
        }
    }

    #[cfg(feature = "sqlite")]
    fn open_sqlite(
        connection_string: &str,
        command: SqlCommand,
    ) -> Result<Self, TableGatewayError> {
        // Open on the caller's thread so connection failures surface
        // synchronously; the connection then moves to the worker.
        let conn = sqlite::open(connection_string)?;
        debug!(table = %command.table, "opened streaming read");
        let (sender, receiver) = mpsc::sync_channel(1);
        std::thread::Builder::new()
            .name("table-gateway-stream".to_string())
            .spawn(move || stream_sqlite_rows(conn, &command, &sender))
            .map_err(|e| {
                TableGatewayError::Other(format!("failed to spawn streaming thread: {e}"))
            })?;
        Ok(Self {
            receiver,
            finished: false,
        })
    }

    /// Drain the remaining rows into a vector, stopping at the first error.
    ///
    /// # Errors
    /// Returns the first row-production error encountered.
    pub fn collect_all(self) -> Result<Vec<Record>, TableGatewayError> {
        let mut rows = Vec::new();
        for item in self {
            rows.push(item?);
        }
        Ok(rows)
    }
}

impl Iterator for QueryStream {
    type Item = Result<Record, TableGatewayError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.receiver.recv() {
            Ok(item) => {
                if item.is_err() {
                    self.finished = true;
                }
                Some(item)
            }
            Err(mpsc::RecvError) => {
                self.finished = true;
                None
            }
        }
    }
}

/// Worker body: prepare, execute, and push rows until exhaustion or until
/// the receiving side hangs up. The connection and statement drop here, on
/// every exit path.
#[cfg(feature = "sqlite")]
fn stream_sqlite_rows(
    conn: rusqlite::Connection,
    command: &SqlCommand,
    sender: &mpsc::SyncSender<Result<Record, TableGatewayError>>,
) {
    let outcome = (|| -> Result<(), TableGatewayError> {
        let sql = translate_placeholders(&command.sql, PlaceholderStyle::Sqlite);
        let values = sqlite::convert_params(&command.params);
        let mut stmt = conn.prepare(sql.as_ref())?;
        let column_names: Vec<String> = stmt
            .column_names()
            .iter()
            .map(std::string::ToString::to_string)
            .collect();
        let param_refs = sqlite::values_as_tosql(&values);
        let mut rows = stmt.query(&param_refs[..])?;
        while let Some(row) = rows.next()? {
            let record = sqlite::row_to_record(row, &column_names)?;
            if sender.send(Ok(record)).is_err() {
                trace!("stream abandoned by caller");
                return Ok(());
            }
        }
        Ok(())
    })();
    if let Err(e) = outcome {
        let _ = sender.send(Err(e));
    }
}
