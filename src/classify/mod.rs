//! Classifier Module
//! Maps continuous record fields to ordered categorical labels via fixed
//! thresholds. Each label is a pure function of one or two numeric fields.

use std::fmt;
use std::hash::Hash;

use thiserror::Error;

use crate::data::StudentRecord;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClassifyError {
    #[error("exam score {0} outside [0, 100]")]
    ScoreOutOfRange(f64),
}

/// Daily study commitment band. Boundaries at 2 and 4 hours partition [0, inf).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StudyIntensity {
    Light,
    Moderate,
    Intense,
}

impl StudyIntensity {
    pub fn as_str(self) -> &'static str {
        match self {
            StudyIntensity::Light => "Light",
            StudyIntensity::Moderate => "Moderate",
            StudyIntensity::Intense => "Intense",
        }
    }
}

impl fmt::Display for StudyIntensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Combined social media + streaming hours band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScreenTimeLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl ScreenTimeLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ScreenTimeLevel::Low => "Low",
            ScreenTimeLevel::Moderate => "Moderate",
            ScreenTimeLevel::High => "High",
            ScreenTimeLevel::VeryHigh => "Very High",
        }
    }
}

impl fmt::Display for ScreenTimeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exam score band on the common grading ladder; 100 is its own band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PerformanceGroup {
    Fail,
    Sufficient,
    Satisfactory,
    Good,
    VeryGood,
    Excellent,
    Outstanding,
}

impl PerformanceGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            PerformanceGroup::Fail => "Fail",
            PerformanceGroup::Sufficient => "Sufficient",
            PerformanceGroup::Satisfactory => "Satisfactory",
            PerformanceGroup::Good => "Good",
            PerformanceGroup::VeryGood => "Very Good",
            PerformanceGroup::Excellent => "Excellent",
            PerformanceGroup::Outstanding => "Outstanding",
        }
    }
}

impl fmt::Display for PerformanceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Study intensity from daily study hours: <2 Light, [2,4) Moderate, >=4 Intense.
pub fn study_intensity(study_hours: f64) -> StudyIntensity {
    if study_hours < 2.0 {
        StudyIntensity::Light
    } else if study_hours < 4.0 {
        StudyIntensity::Moderate
    } else {
        StudyIntensity::Intense
    }
}

/// Screen time level from the social media + netflix total. Branches check
/// most-restrictive-first with strict `>` thresholds at 6, 4, and 2.
pub fn screen_time_level(social_media_hours: f64, netflix_hours: f64) -> ScreenTimeLevel {
    let total = social_media_hours + netflix_hours;
    if total > 6.0 {
        ScreenTimeLevel::VeryHigh
    } else if total > 4.0 {
        ScreenTimeLevel::High
    } else if total > 2.0 {
        ScreenTimeLevel::Moderate
    } else {
        ScreenTimeLevel::Low
    }
}

/// Performance group from the exam score. Ten-point bands from 50 upward,
/// everything below 50 fails, exactly 100 is Outstanding. Scores outside
/// [0, 100] are refused rather than misclassified.
pub fn performance_group(exam_score: f64) -> Result<PerformanceGroup, ClassifyError> {
    if exam_score.is_nan() || !(0.0..=100.0).contains(&exam_score) {
        return Err(ClassifyError::ScoreOutOfRange(exam_score));
    }

    let group = if exam_score < 50.0 {
        PerformanceGroup::Fail
    } else if exam_score < 60.0 {
        PerformanceGroup::Sufficient
    } else if exam_score < 70.0 {
        PerformanceGroup::Satisfactory
    } else if exam_score < 80.0 {
        PerformanceGroup::Good
    } else if exam_score < 90.0 {
        PerformanceGroup::VeryGood
    } else if exam_score < 100.0 {
        PerformanceGroup::Excellent
    } else {
        PerformanceGroup::Outstanding
    };
    Ok(group)
}

/// A grouping dimension: ties a record to the label it aggregates under.
pub trait GroupLabel: Copy + Eq + Hash + Ord + fmt::Display {
    /// Human name of the dimension, used in report headings.
    const DIMENSION: &'static str;

    fn of(record: &StudentRecord) -> Result<Self, ClassifyError>;
}

impl GroupLabel for StudyIntensity {
    const DIMENSION: &'static str = "Study Intensity";

    fn of(record: &StudentRecord) -> Result<Self, ClassifyError> {
        Ok(study_intensity(record.study_hours_per_day))
    }
}

impl GroupLabel for ScreenTimeLevel {
    const DIMENSION: &'static str = "Screen Time Level";

    fn of(record: &StudentRecord) -> Result<Self, ClassifyError> {
        Ok(screen_time_level(
            record.social_media_hours,
            record.netflix_hours,
        ))
    }
}

impl GroupLabel for PerformanceGroup {
    const DIMENSION: &'static str = "Performance Group";

    fn of(record: &StudentRecord) -> Result<Self, ClassifyError> {
        performance_group(record.exam_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn study_intensity_boundaries() {
        assert_eq!(study_intensity(0.0), StudyIntensity::Light);
        assert_eq!(study_intensity(1.99), StudyIntensity::Light);
        assert_eq!(study_intensity(2.0), StudyIntensity::Moderate);
        assert_eq!(study_intensity(3.99), StudyIntensity::Moderate);
        assert_eq!(study_intensity(4.0), StudyIntensity::Intense);
        assert_eq!(study_intensity(12.0), StudyIntensity::Intense);
    }

    #[test]
    fn screen_time_boundaries() {
        assert_eq!(screen_time_level(1.0, 1.0), ScreenTimeLevel::Low);
        assert_eq!(screen_time_level(2.0, 0.01), ScreenTimeLevel::Moderate);
        assert_eq!(screen_time_level(2.0, 2.0), ScreenTimeLevel::Moderate);
        assert_eq!(screen_time_level(4.0, 0.01), ScreenTimeLevel::High);
        assert_eq!(screen_time_level(3.0, 3.0), ScreenTimeLevel::High);
        assert_eq!(screen_time_level(6.0, 0.01), ScreenTimeLevel::VeryHigh);
        assert_eq!(screen_time_level(0.0, 0.0), ScreenTimeLevel::Low);
    }

    #[test]
    fn performance_bands_partition_the_score_range() {
        assert_eq!(performance_group(0.0).unwrap(), PerformanceGroup::Fail);
        assert_eq!(performance_group(49.99).unwrap(), PerformanceGroup::Fail);
        assert_eq!(
            performance_group(50.0).unwrap(),
            PerformanceGroup::Sufficient
        );
        assert_eq!(
            performance_group(60.0).unwrap(),
            PerformanceGroup::Satisfactory
        );
        assert_eq!(performance_group(70.0).unwrap(), PerformanceGroup::Good);
        assert_eq!(performance_group(80.0).unwrap(), PerformanceGroup::VeryGood);
        assert_eq!(
            performance_group(90.0).unwrap(),
            PerformanceGroup::Excellent
        );
        assert_eq!(
            performance_group(99.99).unwrap(),
            PerformanceGroup::Excellent
        );
        assert_eq!(
            performance_group(100.0).unwrap(),
            PerformanceGroup::Outstanding
        );
    }

    #[test]
    fn out_of_range_scores_are_refused() {
        assert!(performance_group(-0.01).is_err());
        assert!(performance_group(100.01).is_err());
        assert!(performance_group(f64::NAN).is_err());
    }

    #[test]
    fn every_study_hour_maps_to_exactly_one_band() {
        // Sweep the plausible domain in small steps; each value must classify
        // and neighbors must never skip a band going upward.
        let mut last = StudyIntensity::Light;
        let mut h = 0.0;
        while h <= 10.0 {
            let band = study_intensity(h);
            assert!(band >= last);
            last = band;
            h += 0.01;
        }
        assert_eq!(last, StudyIntensity::Intense);
    }

    #[test]
    fn labels_render_human_names() {
        assert_eq!(ScreenTimeLevel::VeryHigh.to_string(), "Very High");
        assert_eq!(PerformanceGroup::VeryGood.to_string(), "Very Good");
        assert_eq!(StudyIntensity::Light.to_string(), "Light");
    }
}
