//! CSV Data Loader Module
//! Loads the fixed-schema habits CSV with Polars and extracts records.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

use super::record::{StudentRecord, ValidationError};

/// The 16 columns every input file must carry, header row included.
pub const EXPECTED_COLUMNS: [&str; 16] = [
    "student_id",
    "age",
    "gender",
    "study_hours_per_day",
    "social_media_hours",
    "netflix_hours",
    "part_time_job",
    "attendance_percentage",
    "sleep_hours",
    "diet_quality",
    "exercise_frequency",
    "parental_education_level",
    "internet_quality",
    "mental_health_rating",
    "extracurricular_participation",
    "exam_score",
];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("Missing expected column '{0}'")]
    MissingColumn(String),
    #[error("Unreadable cell at row {row}, column '{column}'")]
    BadCell { row: usize, column: String },
    #[error("No data rows in file")]
    NoData,
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Load the CSV into a DataFrame and verify the schema.
pub fn load_dataframe(path: &Path) -> Result<DataFrame, LoadError> {
    // Lazy scan, then collect; schema inference covers the whole file
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10000))
        .finish()?
        .collect()?;

    let names = df.get_column_names();
    for expected in EXPECTED_COLUMNS {
        if !names.iter().any(|name| name.as_str() == expected) {
            return Err(LoadError::MissingColumn(expected.to_string()));
        }
    }

    if df.height() == 0 {
        return Err(LoadError::NoData);
    }

    Ok(df)
}

/// Load, extract, and validate every record. All-or-nothing: the first bad
/// cell or domain violation fails the whole load.
pub fn load_records(path: &Path) -> Result<Vec<StudentRecord>, LoadError> {
    let df = load_dataframe(path)?;
    let records = extract_records(&df)?;
    for record in &records {
        record.validate()?;
    }
    Ok(records)
}

/// Turn a schema-checked DataFrame into owned records.
pub fn extract_records(df: &DataFrame) -> Result<Vec<StudentRecord>, LoadError> {
    let age = numeric_column(df, "age")?;
    let study_hours = numeric_column(df, "study_hours_per_day")?;
    let social_media = numeric_column(df, "social_media_hours")?;
    let netflix = numeric_column(df, "netflix_hours")?;
    let attendance = numeric_column(df, "attendance_percentage")?;
    let sleep = numeric_column(df, "sleep_hours")?;
    let exercise = numeric_column(df, "exercise_frequency")?;
    let mental_health = numeric_column(df, "mental_health_rating")?;
    let exam_score = numeric_column(df, "exam_score")?;

    let student_id = df.column("student_id")?;
    let gender = df.column("gender")?;
    let diet_quality = df.column("diet_quality")?;
    let parental_education = df.column("parental_education_level")?;
    let internet_quality = df.column("internet_quality")?;
    let part_time_job = df.column("part_time_job")?;
    let extracurricular = df.column("extracurricular_participation")?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        records.push(StudentRecord {
            student_id: string_cell(student_id, i)?,
            age: numeric_cell(&age, i, "age")?,
            gender: string_cell(gender, i)?,
            study_hours_per_day: numeric_cell(&study_hours, i, "study_hours_per_day")?,
            social_media_hours: numeric_cell(&social_media, i, "social_media_hours")?,
            netflix_hours: numeric_cell(&netflix, i, "netflix_hours")?,
            part_time_job: boolean_cell(part_time_job, i)?,
            attendance_percentage: numeric_cell(&attendance, i, "attendance_percentage")?,
            sleep_hours: numeric_cell(&sleep, i, "sleep_hours")?,
            diet_quality: string_cell(diet_quality, i)?,
            exercise_frequency: numeric_cell(&exercise, i, "exercise_frequency")?,
            parental_education_level: string_cell(parental_education, i)?,
            internet_quality: string_cell(internet_quality, i)?,
            mental_health_rating: numeric_cell(&mental_health, i, "mental_health_rating")?,
            extracurricular_participation: boolean_cell(extracurricular, i)?,
            exam_score: numeric_cell(&exam_score, i, "exam_score")?,
        });
    }

    Ok(records)
}

fn numeric_column(df: &DataFrame, name: &str) -> Result<Float64Chunked, LoadError> {
    let column = df.column(name)?.cast(&DataType::Float64)?;
    Ok(column.f64()?.clone())
}

fn numeric_cell(ca: &Float64Chunked, row: usize, column: &str) -> Result<f64, LoadError> {
    ca.get(row)
        .filter(|v| !v.is_nan())
        .ok_or_else(|| LoadError::BadCell {
            row,
            column: column.to_string(),
        })
}

fn string_cell(column: &Column, row: usize) -> Result<String, LoadError> {
    let value = column.get(row).map_err(|_| LoadError::BadCell {
        row,
        column: column.name().to_string(),
    })?;
    if value.is_null() {
        return Err(LoadError::BadCell {
            row,
            column: column.name().to_string(),
        });
    }
    Ok(value.to_string().trim_matches('"').to_string())
}

/// The source encodes booleans as Yes/No strings.
fn boolean_cell(column: &Column, row: usize) -> Result<bool, LoadError> {
    let raw = string_cell(column, row)?;
    match raw.to_ascii_lowercase().as_str() {
        "yes" | "true" => Ok(true),
        "no" | "false" => Ok(false),
        _ => Err(LoadError::BadCell {
            row,
            column: column.name().to_string(),
        }),
    }
}
