//! Railboard Time - simulated clock and cross-instance synchronization
//!
//! This crate implements:
//! - The shared key-value register instances synchronize through
//! - Real-time sources (monotonic OS clock, manually stepped clock)
//! - The clock controller: start/stop, manual edits, advance, reconcile

pub mod register;
pub mod source;
pub mod clock;

pub use register::*;
pub use source::*;
pub use clock::*;
