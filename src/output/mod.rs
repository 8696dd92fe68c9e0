//! Formatting helpers: metric prefixes, terminal rendering, JSON.
//!
//! Everything here produces strings; no module writes to a sink itself.

pub mod json;
pub mod prefix;
pub mod terminal;
