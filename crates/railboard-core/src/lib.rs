//! Railboard Core - Fundamental types shared by every crate
//!
//! This crate defines:
//! - Identifiers (TrainId, StationId)
//! - Simulated time (SimTime) and time-of-day parsing
//! - The schedule data model produced by the save parser
//! - The workspace error type

pub mod id;
pub mod time;
pub mod model;
pub mod error;

pub use id::*;
pub use time::*;
pub use model::*;
pub use error::*;
