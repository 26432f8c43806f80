//! Stats module - descriptive statistics and grouping

mod calculator;

pub use calculator::{
    compute_descriptive_stats, linear_fit, percentile, summarize_all_parallel, summarize_by,
    FieldStats, FieldSummary, GroupSummary, NumericField, ReportSummaries, SortBy,
};
