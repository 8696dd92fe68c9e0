//! Clock sources for the calibration loop.
//!
//! The session only ever asks a clock for "now"; all timing logic lives in
//! the calibration loop itself. [`MonotonicClock`] is the production source,
//! [`ManualClock`] a deterministic stand-in for tests.

mod clock;

pub use clock::{Clock, ManualClock, MonotonicClock};
