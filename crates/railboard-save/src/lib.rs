//! Railboard Save - parser for the simulator's textual save export
//!
//! The export is a sequence of segments separated by lines starting with
//! `+++`. The first segment holds the map info JSON and an opaque layout
//! line; every later segment starts with a `name:` header.
//!
//! Parsing is all-or-nothing: [`parse_save`] either returns a complete
//! [`railboard_core::Scenario`] or an error, never a partial result.

pub mod section;
pub mod parser;

pub use section::*;
pub use parser::*;
