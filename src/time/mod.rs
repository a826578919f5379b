//! Time handling for the poll loop.
//!
//! The poll loop never calls the system clock directly; it asks a
//! [`TimeSource`], which lets tests drive it with a manual clock.

pub mod source;

pub use source::{RealTimeSource, TimeSource};

#[cfg(any(test, feature = "testing-support"))]
pub use source::ManualTimeSource;
