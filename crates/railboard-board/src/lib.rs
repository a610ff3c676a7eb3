//! Railboard Board - per-station dispatch boards
//!
//! This crate implements:
//! - Operator confirmations of arrivals and departures
//! - The station schedule view (selection, sort, filter, status)
//! - Station boards with the tick-time refresh shortcut

pub mod confirm;
pub mod settings;
pub mod view;
pub mod board;

pub use confirm::*;
pub use settings::*;
pub use view::*;
pub use board::*;
