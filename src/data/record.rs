//! Student Record Model
//! One row of the habits dataset, plus domain validation.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("student {student_id}: {field} is negative ({value})")]
    NegativeValue {
        student_id: String,
        field: &'static str,
        value: f64,
    },
    #[error("student {student_id}: {field} {value} outside [0, 100]")]
    OutOfRange {
        student_id: String,
        field: &'static str,
        value: f64,
    },
}

/// One student's complete row of measured and reported attributes.
/// Immutable once loaded.
#[derive(Debug, Clone)]
pub struct StudentRecord {
    pub student_id: String,
    pub age: f64,
    pub gender: String,
    pub study_hours_per_day: f64,
    pub social_media_hours: f64,
    pub netflix_hours: f64,
    pub part_time_job: bool,
    pub attendance_percentage: f64,
    pub sleep_hours: f64,
    pub diet_quality: String,
    pub exercise_frequency: f64,
    pub parental_education_level: String,
    pub internet_quality: String,
    pub mental_health_rating: f64,
    pub extracurricular_participation: bool,
    pub exam_score: f64,
}

impl StudentRecord {
    /// Check field domains: hour-type fields must be non-negative, percentages
    /// must sit in [0, 100]. The rest of the pipeline assumes these hold.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let non_negative: [(&'static str, f64); 6] = [
            ("age", self.age),
            ("study_hours_per_day", self.study_hours_per_day),
            ("social_media_hours", self.social_media_hours),
            ("netflix_hours", self.netflix_hours),
            ("sleep_hours", self.sleep_hours),
            ("exercise_frequency", self.exercise_frequency),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ValidationError::NegativeValue {
                    student_id: self.student_id.clone(),
                    field,
                    value,
                });
            }
        }

        let percent_bounded: [(&'static str, f64); 2] = [
            ("attendance_percentage", self.attendance_percentage),
            ("exam_score", self.exam_score),
        ];
        for (field, value) in percent_bounded {
            if !(0.0..=100.0).contains(&value) {
                return Err(ValidationError::OutOfRange {
                    student_id: self.student_id.clone(),
                    field,
                    value,
                });
            }
        }

        Ok(())
    }
}
