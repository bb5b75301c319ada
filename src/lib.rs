//! Schema-agnostic table gateway: CRUD against any table from loosely-typed
//! records, with no model classes and no mapping code.
//!
//! A [`Table`] binds a table name, a composite primary-key specification,
//! and a connection profile. Operations take plain [`Record`]s (ordered
//! column/value maps); the gateway decides insert-vs-update from key
//! presence, synthesizes parameterized SQL, and runs heterogeneous batches
//! in a single transaction. Reads stream rows back lazily as records.
//!
//! Values are always parameterized; caller-supplied WHERE/ORDER BY fragments
//! and raw SQL are trust boundaries passed through verbatim.
//!
//! ```rust,no_run
//! use table_gateway::prelude::*;
//!
//! fn main() -> Result<(), TableGatewayError> {
//!     let profile = ConnectionProfile::new("main", DriverKind::Sqlite, "app.db");
//!     let users = Table::builder(profile).table("Users").primary_key("ID").build()?;
//!
//!     let id = users.insert([("Name", SqlValue::from("Ann"))])?;
//!     let fetched = users.single(&[id])?;
//!     println!("{fetched:?}");
//!
//!     // records with a full key update, the rest insert; one transaction
//!     users.save(vec![
//!         Record::from_pairs([("Name", SqlValue::from("Bea"))]),
//!         Record::from_pairs([("ID", SqlValue::from(1)), ("Name", SqlValue::from("Anne"))]),
//!     ])?;
//!     Ok(())
//! }
//! ```

mod command;
mod config;
mod error;
mod executor;
mod key;
mod planner;
mod record;
mod stream;
mod synth;
mod table;
mod translation;
mod types;

#[cfg(feature = "sqlite")]
mod sqlite;

pub mod prelude;

pub use command::{BOUNDED_TEXT_SIZE, BoundParam, SizeHint, SqlCommand};
pub use config::{ConnectionProfile, GatewayConfig};
pub use error::TableGatewayError;
pub use key::KeySpec;
pub use record::{FormData, IntoRecord, Record};
pub use stream::QueryStream;
pub use table::{PagedResult, Table, TableBuilder};
pub use translation::{PlaceholderStyle, translate_placeholders};
pub use types::{DriverKind, SqlValue};
