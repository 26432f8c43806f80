//! End-to-end pipeline tests over synthetic records.

use std::io::Write;
use std::path::Path;

use habitscope::classify::{study_intensity, PerformanceGroup, StudyIntensity};
use habitscope::data::{load_records, StudentRecord};
use habitscope::report;
use habitscope::stats::{summarize_all_parallel, summarize_by, NumericField, SortBy};

fn synthetic_record(id: &str, study_hours: f64, exam_score: f64) -> StudentRecord {
    StudentRecord {
        student_id: id.to_string(),
        age: 20.0,
        gender: "Female".to_string(),
        study_hours_per_day: study_hours,
        social_media_hours: 1.0,
        netflix_hours: 0.5,
        part_time_job: false,
        attendance_percentage: 90.0,
        sleep_hours: 7.5,
        diet_quality: "Good".to_string(),
        exercise_frequency: 2.0,
        parental_education_level: "Master".to_string(),
        internet_quality: "Good".to_string(),
        mental_health_rating: 7.0,
        extracurricular_participation: true,
        exam_score,
    }
}

#[test]
fn three_record_scenario_classifies_and_aggregates() {
    let records = vec![
        synthetic_record("S1", 1.0, 40.0),
        synthetic_record("S2", 3.0, 65.0),
        synthetic_record("S3", 5.0, 95.0),
    ];

    let intensities: Vec<StudyIntensity> = records
        .iter()
        .map(|r| study_intensity(r.study_hours_per_day))
        .collect();
    assert_eq!(
        intensities,
        vec![
            StudyIntensity::Light,
            StudyIntensity::Moderate,
            StudyIntensity::Intense
        ]
    );

    let groups =
        summarize_by::<PerformanceGroup>(&records, &[NumericField::ExamScore], SortBy::Label)
            .unwrap();
    assert_eq!(groups.len(), 3);

    let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["Fail", "Satisfactory", "Excellent"]);

    for (group, expected_score) in groups.iter().zip([40.0, 65.0, 95.0]) {
        assert_eq!(group.count, 1);
        assert!((group.mean_exam_score - expected_score).abs() < 1e-9);
        assert!((group.mean_of(NumericField::ExamScore).unwrap() - expected_score).abs() < 1e-9);
    }
}

#[test]
fn csv_to_report_flow() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "student_id,age,gender,study_hours_per_day,social_media_hours,netflix_hours,part_time_job,attendance_percentage,sleep_hours,diet_quality,exercise_frequency,parental_education_level,internet_quality,mental_health_rating,extracurricular_participation,exam_score"
    )
    .unwrap();
    let rows = [
        "S1,19,Male,1.0,3.0,2.0,No,80.0,6.0,Poor,1,High School,Poor,4,No,40.0",
        "S2,21,Female,3.0,1.5,1.0,Yes,92.0,7.0,Good,3,Bachelor,Good,7,Yes,65.0",
        "S3,23,Other,5.0,0.5,0.5,No,98.0,8.0,Good,5,Master,Good,9,Yes,95.0",
    ];
    for row in rows {
        writeln!(file, "{row}").unwrap();
    }
    file.flush().unwrap();

    let records = load_records(file.path()).unwrap();
    assert_eq!(records.len(), 3);

    let fields = [NumericField::ExamScore, NumericField::SleepHours];
    let summaries = summarize_all_parallel(&records, &fields, SortBy::Label).unwrap();

    // Every dimension accounts for every record
    for dimension in [
        &summaries.study_intensity,
        &summaries.screen_time,
        &summaries.performance,
    ] {
        let total: usize = dimension.iter().map(|s| s.count).sum();
        assert_eq!(total, 3);
    }

    let markdown = report::build_report(file.path(), records.len(), &summaries, &[]);
    assert!(markdown.contains("## Performance Group"));
    assert!(markdown.contains("| Fail | 1 | 40.00 |"));

    let out_dir = tempfile::tempdir().unwrap();
    let json_path = out_dir.path().join("summary.json");
    report::write_summary_json(&json_path, &summaries).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json["performance"].as_array().unwrap().len(), 3);
    assert_eq!(json["performance"][0]["label"], "Fail");
}

#[test]
fn sort_orders_survive_the_full_pipeline() {
    let records = vec![
        synthetic_record("S1", 1.0, 42.0),
        synthetic_record("S2", 1.2, 47.0),
        synthetic_record("S3", 4.5, 91.0),
    ];

    let by_count =
        summarize_by::<StudyIntensity>(&records, &[NumericField::ExamScore], SortBy::Count)
            .unwrap();
    assert_eq!(by_count[0].label, "Light");

    let by_score =
        summarize_by::<StudyIntensity>(&records, &[NumericField::ExamScore], SortBy::MeanScore)
            .unwrap();
    assert_eq!(by_score[0].label, "Intense");
}

#[test]
fn report_flow_rejects_out_of_domain_data() {
    let dir = tempfile::tempdir().unwrap();
    let path: &Path = &dir.path().join("bad.csv");
    std::fs::write(
        path,
        "student_id,age,gender,study_hours_per_day,social_media_hours,netflix_hours,part_time_job,attendance_percentage,sleep_hours,diet_quality,exercise_frequency,parental_education_level,internet_quality,mental_health_rating,extracurricular_participation,exam_score\nS1,20,Male,-2.0,1.0,0.5,No,90.0,7.0,Good,2,Bachelor,Good,6,No,70.0\n",
    )
    .unwrap();

    assert!(load_records(path).is_err());
}
