//! Core types for the Waymark workout tracker.
//!
//! This crate owns the workout model, validated construction, the plain-data
//! projection used for storage, rehydration, and the session store. It is
//! free of database dependencies; storage backends implement
//! [`gateway::PersistenceGateway`] in their own crates.

pub mod error;
pub mod factory;
pub mod gateway;
pub mod plain;
pub mod rehydrate;
pub mod session;
pub mod store;
pub mod workout;

pub use error::{Error, Result, ValidationError};
pub use gateway::{MemoryGateway, PersistenceGateway};
pub use store::WorkoutStore;
pub use workout::{Activity, Coordinates, Workout, WorkoutId, WorkoutKind};
