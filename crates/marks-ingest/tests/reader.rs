//! Integration tests for grade sheet and plan loading.

use std::io::Write;
use std::path::Path;

use marks_ingest::{IngestError, LoadOptions, load_plan, read_sheet, read_sheet_from};
use marks_model::{MarkSheet, PlanStep, SheetError};
use proptest::prelude::*;

const SAMPLE: &str = "\
Name;Surname;Email;GR;QFT;Astro
Mean;;;12;11;13
Highest;;;18;17;19
Lowest;;;5;4;6
Curie;Marie;marie@example.org;16;;15
Bohr;Niels;niels@example.org;14;12;10
";

#[test]
fn loads_semicolon_sheet() {
    let sheet = read_sheet_from(SAMPLE.as_bytes(), LoadOptions::default()).expect("load sample");
    assert_eq!(sheet.topics(), ["GR", "QFT", "Astro"]);
    assert_eq!(sheet.students(), ["Curie", "Bohr"]);
    assert_eq!(sheet.mark(0, 2), "15");
    assert_eq!(sheet.mean(0), "12");
    assert_eq!(sheet.email(0), "marie@example.org");
}

#[test]
fn sort_flags_reorder_rosters() {
    let options = LoadOptions {
        sort_students: true,
        sort_topics: true,
    };
    let sheet = read_sheet_from(SAMPLE.as_bytes(), options).expect("load sample");
    assert_eq!(sheet.students(), ["Bohr", "Curie"]);
    assert_eq!(sheet.topics(), ["Astro", "GR", "QFT"]);
    // Bohr's Astro mark followed both permutations.
    assert_eq!(sheet.mark(0, 0), "10");
}

#[test]
fn missing_file_reports_open_error() {
    let error = read_sheet(Path::new("no-such-sheet.csv"), LoadOptions::default()).unwrap_err();
    assert!(matches!(error, IngestError::Open { .. }));
}

#[test]
fn ragged_row_names_the_line() {
    let input = "\
Name;Surname;Email;GR
Mean;;;12
Highest;;;18
Lowest;;;5
Curie;Marie;marie@example.org
";
    let error = read_sheet_from(input.as_bytes(), LoadOptions::default()).unwrap_err();
    match error {
        IngestError::Sheet(SheetError::RaggedRow {
            row,
            expected,
            found,
        }) => {
            assert_eq!(row, 5);
            assert_eq!(expected, 4);
            assert_eq!(found, 3);
        }
        other => panic!("expected ragged row error, got {other}"),
    }
}

#[test]
fn short_sheet_is_rejected() {
    let input = "Name;Surname;Email;GR\nMean;;;12\n";
    let error = read_sheet_from(input.as_bytes(), LoadOptions::default()).unwrap_err();
    assert!(matches!(
        error,
        IngestError::Sheet(SheetError::TooFewRows { found: 2 })
    ));
}

#[test]
fn reads_from_a_file_path() {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(SAMPLE.as_bytes()).expect("write sample");
    let sheet = read_sheet(file.path(), LoadOptions::default()).expect("load from path");
    assert_eq!(sheet.student_count(), 2);
}

#[test]
fn loads_plan_file() {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(
        br#"[
            { "action": "select-all" },
            { "action": "toggle-topic", "topic": "QFT" }
        ]"#,
    )
    .expect("write plan");
    let plan = load_plan(file.path()).expect("load plan");
    assert_eq!(plan.steps.len(), 2);
    assert_eq!(
        plan.steps[1],
        PlanStep::ToggleTopic {
            topic: "QFT".to_string(),
        }
    );
}

#[test]
fn malformed_plan_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    file.write_all(br#"[{ "action": "toggle-topic" }]"#)
        .expect("write plan");
    let error = load_plan(file.path()).unwrap_err();
    assert!(matches!(error, IngestError::PlanFormat { .. }));
}

fn csv_from_rows(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| row.join(";"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn triples(sheet: &MarkSheet) -> Vec<(String, String, String)> {
    let mut all = Vec::new();
    for student in 0..sheet.student_count() {
        for topic in 0..sheet.topic_count() {
            all.push((
                sheet.student(student).to_string(),
                sheet.topic(topic).to_string(),
                sheet.mark(student, topic).to_string(),
            ));
        }
    }
    all.sort();
    all
}

/// Random sparse sheets: names and headers may be empty or collide, marks
/// may be missing.
fn sheet_rows() -> impl Strategy<Value = Vec<Vec<String>>> {
    (1usize..5, 1usize..5).prop_flat_map(|(student_count, topic_count)| {
        (
            prop::collection::vec("[a-d]{0,2}", student_count),
            prop::collection::vec("[A-D]{0,2}", topic_count),
            prop::collection::vec(
                prop::collection::vec(prop::option::of(0u8..20u8), topic_count),
                student_count,
            ),
        )
            .prop_map(|(students, topics, marks)| {
                let mut rows = Vec::new();
                let mut header = vec![
                    "Name".to_string(),
                    "Surname".to_string(),
                    "Email".to_string(),
                ];
                header.extend(topics.iter().cloned());
                rows.push(header);
                for label in ["Mean", "Highest", "Lowest"] {
                    let mut row = vec![label.to_string(), String::new(), String::new()];
                    row.extend((0..topics.len()).map(|topic| (10 + topic).to_string()));
                    rows.push(row);
                }
                for (index, name) in students.iter().enumerate() {
                    let mut row = vec![
                        name.clone(),
                        format!("Surname{index}"),
                        format!("student{index}@example.org"),
                    ];
                    row.extend(marks[index].iter().map(|mark| {
                        mark.map(|value| value.to_string()).unwrap_or_default()
                    }));
                    rows.push(row);
                }
                rows
            })
    })
}

proptest! {
    #[test]
    fn sorting_preserves_the_mark_triples(rows in sheet_rows()) {
        let input = csv_from_rows(&rows);
        let unsorted =
            read_sheet_from(input.as_bytes(), LoadOptions::default()).expect("load unsorted");
        let sorted = read_sheet_from(
            input.as_bytes(),
            LoadOptions {
                sort_students: true,
                sort_topics: true,
            },
        )
        .expect("load sorted");

        prop_assert_eq!(triples(&unsorted), triples(&sorted));

        let students = sorted.students().to_vec();
        let mut expected = students.clone();
        expected.sort();
        prop_assert_eq!(students, expected);

        let topics = sorted.topics().to_vec();
        let mut expected = topics.clone();
        expected.sort();
        prop_assert_eq!(topics, expected);
    }
}
