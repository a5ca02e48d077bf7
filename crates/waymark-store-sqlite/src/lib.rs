//! SQLite backend for the Waymark blob store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod gateway;
mod schema;

pub mod error;

pub use error::{Error, Result};
pub use gateway::SqliteGateway;
