//! Pricewise Common Types
//!
//! Shared types used across the Pricewise crates: currencies and monetary
//! amounts, catalog identifiers, and the calendar clock used for rate staleness.

pub mod identifiers;
pub mod monetary;
pub mod error;
pub mod time;

pub use identifiers::*;
pub use monetary::*;
pub use error::*;
pub use time::*;
