//! habitscope - student habits descriptive-statistics pipeline
//!
//! Load records, classify them into bands, aggregate per-band statistics,
//! and render the report artifacts.

pub mod charts;
pub mod classify;
pub mod data;
pub mod report;
pub mod stats;
