//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types to make it easier to
//! get started with the gateway.

pub use crate::{
    ConnectionProfile, DriverKind, FormData, GatewayConfig, IntoRecord, PagedResult, QueryStream,
    Record, SqlCommand, SqlValue, Table, TableBuilder, TableGatewayError,
};
