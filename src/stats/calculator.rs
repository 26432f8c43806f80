//! Statistics Calculator Module
//! Descriptive statistics and group-wise aggregation over student records.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::classify::{
    ClassifyError, GroupLabel, PerformanceGroup, ScreenTimeLevel, StudyIntensity,
};
use crate::data::StudentRecord;

/// The numeric record fields a summary can aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    Age,
    StudyHoursPerDay,
    SocialMediaHours,
    NetflixHours,
    AttendancePercentage,
    SleepHours,
    ExerciseFrequency,
    MentalHealthRating,
    ExamScore,
}

impl NumericField {
    pub fn name(self) -> &'static str {
        match self {
            NumericField::Age => "age",
            NumericField::StudyHoursPerDay => "study_hours_per_day",
            NumericField::SocialMediaHours => "social_media_hours",
            NumericField::NetflixHours => "netflix_hours",
            NumericField::AttendancePercentage => "attendance_percentage",
            NumericField::SleepHours => "sleep_hours",
            NumericField::ExerciseFrequency => "exercise_frequency",
            NumericField::MentalHealthRating => "mental_health_rating",
            NumericField::ExamScore => "exam_score",
        }
    }

    pub fn get(self, record: &StudentRecord) -> f64 {
        match self {
            NumericField::Age => record.age,
            NumericField::StudyHoursPerDay => record.study_hours_per_day,
            NumericField::SocialMediaHours => record.social_media_hours,
            NumericField::NetflixHours => record.netflix_hours,
            NumericField::AttendancePercentage => record.attendance_percentage,
            NumericField::SleepHours => record.sleep_hours,
            NumericField::ExerciseFrequency => record.exercise_frequency,
            NumericField::MentalHealthRating => record.mental_health_rating,
            NumericField::ExamScore => record.exam_score,
        }
    }
}

/// Descriptive statistics for one numeric field within one group.
#[derive(Debug, Clone, Serialize)]
pub struct FieldStats {
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldSummary {
    pub field: &'static str,
    #[serde(flatten)]
    pub stats: FieldStats,
}

/// Aggregated statistics for all records sharing one label. Derived and
/// read-only; recomputed from the full record set, never updated in place.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    pub label: String,
    pub count: usize,
    pub mean_exam_score: f64,
    pub fields: Vec<FieldSummary>,
}

impl GroupSummary {
    pub fn mean_of(&self, field: NumericField) -> Option<f64> {
        self.fields
            .iter()
            .find(|f| f.field == field.name())
            .map(|f| f.stats.mean)
    }
}

/// Output ordering for group summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum SortBy {
    /// Band order of the label set
    #[default]
    Label,
    /// Member count, descending
    Count,
    /// Mean exam score, descending
    MeanScore,
}

/// Group records by a label function and summarize each group that has at
/// least one member. Labels with no matching records are simply absent.
pub fn summarize_by<L: GroupLabel>(
    records: &[StudentRecord],
    fields: &[NumericField],
    sort: SortBy,
) -> Result<Vec<GroupSummary>, ClassifyError> {
    // BTreeMap keys come back in band order, which is the Label sort already
    let mut groups: BTreeMap<L, Vec<&StudentRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(L::of(record)?).or_default().push(record);
    }

    let mut summaries: Vec<GroupSummary> = groups
        .into_iter()
        .map(|(label, members)| {
            let scores: Vec<f64> = members.iter().map(|r| r.exam_score).collect();
            let field_summaries = fields
                .iter()
                .map(|&field| {
                    let values: Vec<f64> = members.iter().map(|r| field.get(r)).collect();
                    FieldSummary {
                        field: field.name(),
                        stats: compute_descriptive_stats(&values),
                    }
                })
                .collect();

            GroupSummary {
                label: label.to_string(),
                count: members.len(),
                mean_exam_score: scores.iter().sum::<f64>() / scores.len() as f64,
                fields: field_summaries,
            }
        })
        .collect();

    match sort {
        SortBy::Label => {}
        SortBy::Count => summaries.sort_by(|a, b| b.count.cmp(&a.count)),
        SortBy::MeanScore => summaries.sort_by(|a, b| {
            b.mean_exam_score
                .partial_cmp(&a.mean_exam_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
    }

    Ok(summaries)
}

/// Summaries for every grouping dimension the report covers.
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummaries {
    pub study_intensity: Vec<GroupSummary>,
    pub screen_time: Vec<GroupSummary>,
    pub performance: Vec<GroupSummary>,
}

/// Compute all three grouping dimensions in parallel. Grouping and summation
/// are associative and commutative, so no ordering depends on this.
pub fn summarize_all_parallel(
    records: &[StudentRecord],
    fields: &[NumericField],
    sort: SortBy,
) -> Result<ReportSummaries, ClassifyError> {
    let (study_intensity, (screen_time, performance)) = rayon::join(
        || summarize_by::<StudyIntensity>(records, fields, sort),
        || {
            rayon::join(
                || summarize_by::<ScreenTimeLevel>(records, fields, sort),
                || summarize_by::<PerformanceGroup>(records, fields, sort),
            )
        },
    );

    Ok(ReportSummaries {
        study_intensity: study_intensity?,
        screen_time: screen_time?,
        performance: performance?,
    })
}

/// Compute descriptive statistics for an array of values.
pub fn compute_descriptive_stats(values: &[f64]) -> FieldStats {
    let n = values.len();
    if n == 0 {
        return FieldStats {
            mean: f64::NAN,
            median: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
        };
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mean = values.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };

    let variance = if n > 1 {
        values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64
    } else {
        0.0
    };

    FieldStats {
        mean,
        median,
        std: variance.sqrt(),
        min: sorted[0],
        max: sorted[n - 1],
    }
}

/// Calculate percentile using linear interpolation (NumPy compatible).
/// Input must already be sorted ascending.
pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let n = sorted_values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return sorted_values[0];
    }

    let rank = (p / 100.0) * (n - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(n - 1);
    let frac = rank - lower as f64;

    if lower == upper {
        sorted_values[lower]
    } else {
        sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
    }
}

/// Least-squares linear fit. Returns (slope, intercept), or None when the
/// inputs are degenerate (fewer than two points or zero x-variance).
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Option<(f64, f64)> {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return None;
    }

    let n_f = n as f64;
    let mean_x = xs[..n].iter().sum::<f64>() / n_f;
    let mean_y = ys[..n].iter().sum::<f64>() / n_f;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    for i in 0..n {
        cov += (xs[i] - mean_x) * (ys[i] - mean_y);
        var_x += (xs[i] - mean_x).powi(2);
    }

    if var_x == 0.0 {
        return None;
    }

    let slope = cov / var_x;
    Some((slope, mean_y - slope * mean_x))
}
