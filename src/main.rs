//! habitscope - Student habits CSV analysis & report generator
//!
//! Loads a fixed-schema CSV of student records, derives categorical bands
//! from the continuous fields, aggregates per-band statistics, and writes a
//! markdown report with charts.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use habitscope::{charts, data, report, stats};
use habitscope::stats::{NumericField, SortBy};

/// Numeric fields every group summary aggregates.
const REPORT_FIELDS: [NumericField; 6] = [
    NumericField::ExamScore,
    NumericField::StudyHoursPerDay,
    NumericField::SocialMediaHours,
    NumericField::SleepHours,
    NumericField::AttendancePercentage,
    NumericField::MentalHealthRating,
];

#[derive(Parser)]
#[command(name = "habitscope")]
#[command(about = "Descriptive statistics report over a student habits CSV", long_about = None)]
struct Cli {
    /// Path to the input CSV (16-column student habits schema)
    csv: PathBuf,
    /// Directory for the report and chart files
    #[arg(long, default_value = "report")]
    out_dir: PathBuf,
    /// Ordering of groups within each table
    #[arg(long, value_enum, default_value_t = SortBy::Label)]
    sort_by: SortBy,
    /// Skip chart rendering, write tables and JSON only
    #[arg(long)]
    no_charts: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let records = data::load_records(&cli.csv)
        .with_context(|| format!("failed to load {}", cli.csv.display()))?;
    println!("Loaded {} records from {}.", records.len(), cli.csv.display());

    let summaries = stats::summarize_all_parallel(&records, &REPORT_FIELDS, cli.sort_by)
        .context("failed to aggregate group summaries")?;

    fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("failed to create {}", cli.out_dir.display()))?;

    let chart_files = if cli.no_charts {
        Vec::new()
    } else {
        let files = charts::render_all(
            &records,
            &summaries.study_intensity,
            &summaries.screen_time,
            &cli.out_dir,
        )
        .context("failed to render charts")?;
        for file in &files {
            println!("Chart written to {}.", file.display());
        }
        files
    };

    let report_path = cli.out_dir.join("report.md");
    let markdown = report::build_report(&cli.csv, records.len(), &summaries, &chart_files);
    fs::write(&report_path, markdown)
        .with_context(|| format!("failed to write {}", report_path.display()))?;
    println!("Report written to {}.", report_path.display());

    let json_path = cli.out_dir.join("summary.json");
    report::write_summary_json(&json_path, &summaries)
        .with_context(|| format!("failed to write {}", json_path.display()))?;
    println!("Summary written to {}.", json_path.display());

    Ok(())
}
