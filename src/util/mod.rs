//! Shared utilities for the panel engine.
//!
//! Descriptive statistics over percentile pools and the `rgb(...)` color
//! type shared by metric tables and options.

pub mod color;
pub mod stats;
