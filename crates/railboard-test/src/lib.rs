//! Railboard Test Harness - multi-instance simulation and synthetic saves
//!
//! This crate provides:
//! - Seeded synthetic save exports
//! - A simulator running several instances against one shared register
//! - Scenario tests and benchmarks over both

pub mod generator;
pub mod simulator;

pub use generator::*;
pub use simulator::*;
