//! Run summaries for the console and for machine consumption.

pub mod summary;

pub use summary::*;
