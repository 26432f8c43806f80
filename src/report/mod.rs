//! Report Module
//! Renders the group summaries into a markdown report and a JSON export.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::stats::{GroupSummary, ReportSummaries};

/// Build the full markdown report: one section per grouping dimension with a
/// summary table and short commentary, then links to the rendered charts.
pub fn build_report(
    source: &Path,
    record_count: usize,
    summaries: &ReportSummaries,
    chart_files: &[PathBuf],
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Student Habits Report");
    let _ = writeln!(
        output,
        "Generated from {} ({} records)",
        source.display(),
        record_count
    );

    write_dimension(&mut output, "Study Intensity", &summaries.study_intensity);
    write_dimension(&mut output, "Screen Time Level", &summaries.screen_time);
    write_dimension(&mut output, "Performance Group", &summaries.performance);

    if !chart_files.is_empty() {
        let _ = writeln!(output);
        let _ = writeln!(output, "## Charts");
        for path in chart_files {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let _ = writeln!(output, "![{name}]({name})");
        }
    }

    output
}

fn write_dimension(output: &mut String, dimension: &str, summaries: &[GroupSummary]) {
    let _ = writeln!(output);
    let _ = writeln!(output, "## {dimension}");

    if summaries.is_empty() {
        let _ = writeln!(output, "No records in this dimension.");
        return;
    }

    // Header row follows the field order of the first summary
    let mut header = String::from("| Group | Count | Mean exam score |");
    let mut rule = String::from("| --- | ---: | ---: |");
    for field in &summaries[0].fields {
        if field.field == "exam_score" {
            continue;
        }
        let _ = write!(header, " Mean {} |", field.field.replace('_', " "));
        rule.push_str(" ---: |");
    }
    let _ = writeln!(output, "{header}");
    let _ = writeln!(output, "{rule}");

    for summary in summaries {
        let _ = write!(
            output,
            "| {} | {} | {:.2} |",
            summary.label, summary.count, summary.mean_exam_score
        );
        for field in &summary.fields {
            if field.field == "exam_score" {
                continue;
            }
            let _ = write!(output, " {:.2} |", field.stats.mean);
        }
        let _ = writeln!(output);
    }

    let _ = writeln!(output);
    if let Some(largest) = summaries.iter().max_by_key(|s| s.count) {
        let _ = writeln!(
            output,
            "- Largest band: {} ({} students)",
            largest.label, largest.count
        );
    }
    if let Some(best) = summaries.iter().max_by(|a, b| {
        a.mean_exam_score
            .partial_cmp(&b.mean_exam_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    }) {
        let _ = writeln!(
            output,
            "- Best mean exam score: {} ({:.2})",
            best.label, best.mean_exam_score
        );
    }
}

/// Write all group summaries as pretty-printed JSON.
pub fn write_summary_json(path: &Path, summaries: &ReportSummaries) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(summaries)?;
    fs::write(path, json)?;
    Ok(())
}
