//! Chart Plotter Module
//! Renders the report's static charts to PNG with plotters:
//! bar (mean score per band), scatter with linear fit, box plot, density.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use statrs::distribution::{Continuous, Normal};
use thiserror::Error;

use crate::classify::{screen_time_level, ScreenTimeLevel};
use crate::data::StudentRecord;
use crate::stats::{linear_fit, percentile, GroupSummary};

/// Color palette for group bands
pub const PALETTE: [RGBColor; 7] = [
    RGBColor(52, 152, 219),  // Blue
    RGBColor(231, 76, 60),   // Red
    RGBColor(46, 204, 113),  // Green
    RGBColor(155, 89, 182),  // Purple
    RGBColor(243, 156, 18),  // Orange
    RGBColor(26, 188, 156),  // Teal
    RGBColor(233, 30, 99),   // Pink
];

const CHART_SIZE: (u32, u32) = (900, 600);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Chart rendering failed: {0}")]
    Render(String),
    #[error("No data to plot")]
    NoData,
}

impl ChartError {
    fn render(err: impl std::fmt::Display) -> Self {
        ChartError::Render(err.to_string())
    }
}

/// Render every chart the report references. Returns the written paths in
/// report order.
pub fn render_all(
    records: &[StudentRecord],
    study_intensity: &[GroupSummary],
    screen_time: &[GroupSummary],
    out_dir: &Path,
) -> Result<Vec<PathBuf>, ChartError> {
    if records.is_empty() {
        return Err(ChartError::NoData);
    }

    let mut written = Vec::new();

    let path = out_dir.join("mean_score_by_study_intensity.png");
    mean_score_bar(study_intensity, "Study Intensity", &path)?;
    written.push(path);

    let path = out_dir.join("mean_score_by_screen_time.png");
    mean_score_bar(screen_time, "Screen Time Level", &path)?;
    written.push(path);

    let path = out_dir.join("study_vs_score.png");
    study_scatter_with_fit(records, &path)?;
    written.push(path);

    let path = out_dir.join("score_by_screen_time.png");
    score_boxplot_by_screen_time(records, &path)?;
    written.push(path);

    let path = out_dir.join("score_density.png");
    score_density(records, &path)?;
    written.push(path);

    Ok(written)
}

/// Bar chart of mean exam score per band.
pub fn mean_score_bar(
    summaries: &[GroupSummary],
    dimension: &str,
    path: &Path,
) -> Result<(), ChartError> {
    if summaries.is_empty() {
        return Err(ChartError::NoData);
    }

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::render)?;

    let labels: Vec<String> = summaries.iter().map(|s| s.label.clone()).collect();
    let n = summaries.len();

    let mut chart = ChartBuilder::on(&root)
        .caption(
            format!("Mean Exam Score by {dimension}"),
            ("sans-serif", 24),
        )
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(-0.5f64..n as f64 - 0.5, 0f64..100f64)
        .map_err(ChartError::render)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|x| {
            let idx = x.round() as usize;
            labels.get(idx).cloned().unwrap_or_default()
        })
        .x_desc(dimension.to_string())
        .y_desc("Mean exam score")
        .draw()
        .map_err(ChartError::render)?;

    chart
        .draw_series(summaries.iter().enumerate().map(|(i, summary)| {
            let color = PALETTE[i % PALETTE.len()];
            Rectangle::new(
                [
                    (i as f64 - 0.35, 0.0),
                    (i as f64 + 0.35, summary.mean_exam_score),
                ],
                color.mix(0.8).filled(),
            )
        }))
        .map_err(ChartError::render)?;

    root.present().map_err(ChartError::render)
}

/// Scatter of study hours vs exam score with a least-squares fit line.
pub fn study_scatter_with_fit(records: &[StudentRecord], path: &Path) -> Result<(), ChartError> {
    let xs: Vec<f64> = records.iter().map(|r| r.study_hours_per_day).collect();
    let ys: Vec<f64> = records.iter().map(|r| r.exam_score).collect();

    let x_max = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let x_end = (x_max * 1.05).max(1.0);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::render)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Study Hours vs Exam Score", ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(0f64..x_end, 0f64..100f64)
        .map_err(ChartError::render)?;

    chart
        .configure_mesh()
        .x_desc("Study hours per day")
        .y_desc("Exam score")
        .draw()
        .map_err(ChartError::render)?;

    chart
        .draw_series(
            xs.iter()
                .zip(ys.iter())
                .map(|(&x, &y)| Circle::new((x, y), 3, PALETTE[0].mix(0.5).filled())),
        )
        .map_err(ChartError::render)?
        .label("Students")
        .legend(|(x, y)| Circle::new((x + 10, y), 3, PALETTE[0].filled()));

    if let Some((slope, intercept)) = linear_fit(&xs, &ys) {
        let fit = move |x: f64| (slope * x + intercept).clamp(0.0, 100.0);
        chart
            .draw_series(LineSeries::new(
                (0..=100).map(|i| {
                    let x = x_end * i as f64 / 100.0;
                    (x, fit(x))
                }),
                PALETTE[1].stroke_width(2),
            ))
            .map_err(ChartError::render)?
            .label(format!("Fit: {slope:.2}x + {intercept:.1}"))
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], PALETTE[1]));
    }

    chart
        .configure_series_labels()
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .draw()
        .map_err(ChartError::render)?;

    root.present().map_err(ChartError::render)
}

/// Box plot of exam scores per screen-time level. Quartiles by linear
/// interpolation, whiskers at the outermost values within 1.5 IQR.
pub fn score_boxplot_by_screen_time(
    records: &[StudentRecord],
    path: &Path,
) -> Result<(), ChartError> {
    let mut groups: Vec<(ScreenTimeLevel, Vec<f64>)> = Vec::new();
    for record in records {
        let level = screen_time_level(record.social_media_hours, record.netflix_hours);
        match groups.iter_mut().find(|(l, _)| *l == level) {
            Some((_, values)) => values.push(record.exam_score),
            None => groups.push((level, vec![record.exam_score])),
        }
    }
    groups.sort_by_key(|(level, _)| *level);

    if groups.is_empty() {
        return Err(ChartError::NoData);
    }

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::render)?;

    let labels: Vec<String> = groups.iter().map(|(l, _)| l.to_string()).collect();
    let n = groups.len();

    let mut chart = ChartBuilder::on(&root)
        .caption("Exam Score by Screen Time Level", ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(55)
        .build_cartesian_2d(-0.5f64..n as f64 - 0.5, 0f64..100f64)
        .map_err(ChartError::render)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|x| {
            let idx = x.round() as usize;
            labels.get(idx).cloned().unwrap_or_default()
        })
        .x_desc("Screen time level")
        .y_desc("Exam score")
        .draw()
        .map_err(ChartError::render)?;

    for (i, (_, values)) in groups.iter().enumerate() {
        let mut sorted = values.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let q1 = percentile(&sorted, 25.0);
        let median = percentile(&sorted, 50.0);
        let q3 = percentile(&sorted, 75.0);
        let iqr = q3 - q1;
        let whisker_low = sorted
            .iter()
            .copied()
            .find(|&v| v >= q1 - 1.5 * iqr)
            .unwrap_or(q1);
        let whisker_high = sorted
            .iter()
            .rev()
            .copied()
            .find(|&v| v <= q3 + 1.5 * iqr)
            .unwrap_or(q3);

        let color = PALETTE[i % PALETTE.len()];
        let x = i as f64;
        let half = 0.25;
        let cap = 0.12;

        chart
            .draw_series(std::iter::once(Rectangle::new(
                [(x - half, q1), (x + half, q3)],
                color.mix(0.3).filled(),
            )))
            .map_err(ChartError::render)?;

        let outlines: Vec<PathElement<(f64, f64)>> = vec![
            // Box border and median
            PathElement::new(
                vec![
                    (x - half, q1),
                    (x + half, q1),
                    (x + half, q3),
                    (x - half, q3),
                    (x - half, q1),
                ],
                color.stroke_width(2),
            ),
            PathElement::new(vec![(x - half, median), (x + half, median)], color.stroke_width(2)),
            // Whiskers and caps
            PathElement::new(vec![(x, whisker_low), (x, q1)], color.stroke_width(1)),
            PathElement::new(vec![(x, q3), (x, whisker_high)], color.stroke_width(1)),
            PathElement::new(
                vec![(x - cap, whisker_low), (x + cap, whisker_low)],
                color.stroke_width(1),
            ),
            PathElement::new(
                vec![(x - cap, whisker_high), (x + cap, whisker_high)],
                color.stroke_width(1),
            ),
        ];
        chart.draw_series(outlines).map_err(ChartError::render)?;
    }

    root.present().map_err(ChartError::render)
}

/// Gaussian KDE density curve of exam scores (Silverman bandwidth).
pub fn score_density(records: &[StudentRecord], path: &Path) -> Result<(), ChartError> {
    let scores: Vec<f64> = records.iter().map(|r| r.exam_score).collect();
    if scores.is_empty() {
        return Err(ChartError::NoData);
    }

    let curve = kde_curve(&scores, 200)?;
    let y_max = curve
        .iter()
        .map(|&(_, y)| y)
        .fold(f64::NEG_INFINITY, f64::max)
        * 1.1;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(ChartError::render)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Exam Score Density", ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(65)
        .build_cartesian_2d(0f64..100f64, 0f64..y_max)
        .map_err(ChartError::render)?;

    chart
        .configure_mesh()
        .x_desc("Exam score")
        .y_desc("Density")
        .draw()
        .map_err(ChartError::render)?;

    chart
        .draw_series(AreaSeries::new(
            curve.iter().copied(),
            0.0,
            PALETTE[0].mix(0.25),
        ))
        .map_err(ChartError::render)?;

    chart
        .draw_series(LineSeries::new(
            curve.into_iter(),
            PALETTE[0].stroke_width(2),
        ))
        .map_err(ChartError::render)?;

    root.present().map_err(ChartError::render)
}

/// Evaluate a Gaussian kernel density estimate on an even grid over [0, 100].
fn kde_curve(values: &[f64], points: usize) -> Result<Vec<(f64, f64)>, ChartError> {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = if values.len() > 1 {
        (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
    } else {
        1.0
    };

    // Silverman's rule of thumb; fall back for degenerate spread
    let bandwidth = 1.06 * std * n.powf(-0.2);
    let bandwidth = if bandwidth > 0.0 { bandwidth } else { 1.0 };

    let kernel = Normal::new(0.0, 1.0).map_err(ChartError::render)?;

    let curve = (0..=points)
        .map(|i| {
            let x = 100.0 * i as f64 / points as f64;
            let density = values
                .iter()
                .map(|&v| kernel.pdf((x - v) / bandwidth))
                .sum::<f64>()
                / (n * bandwidth);
            (x, density)
        })
        .collect();

    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kde_integrates_to_roughly_one() {
        let values = vec![40.0, 50.0, 55.0, 60.0, 62.0, 70.0, 75.0, 80.0];
        let curve = kde_curve(&values, 400).unwrap();

        // Trapezoid sum over [0, 100]; tails outside the range cost a little
        let step = 100.0 / 400.0;
        let area: f64 = curve.windows(2).map(|w| (w[0].1 + w[1].1) / 2.0 * step).sum();
        assert!(area > 0.9 && area < 1.05, "area was {area}");
    }

    #[test]
    fn kde_peaks_near_the_data_mass() {
        let values = vec![70.0; 50];
        let curve = kde_curve(&values, 200).unwrap();
        let (peak_x, _) = curve
            .iter()
            .copied()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .unwrap();
        assert!((peak_x - 70.0).abs() < 2.0);
    }
}
