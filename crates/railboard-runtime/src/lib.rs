//! Railboard Runtime - application state and the tick loop
//!
//! This crate implements:
//! - The dispatcher owning scenario, confirmations, clock and boards
//! - The fixed-period scheduler and its async driver
//! - Runtime configuration and logging setup

pub mod config;
pub mod dispatcher;
pub mod logging;
pub mod scheduler;

pub use config::*;
pub use dispatcher::*;
pub use scheduler::*;
