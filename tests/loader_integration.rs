use classquiz::{DataLoadError, SAMPLE_CSV, parse_questions, read_questions};
use std::fs;

#[test]
fn scenario_row_parses_to_two_options() {
    let questions =
        parse_questions("topic,gradeLevel,question,optionA,optionB,correctAnswer\nmath,low,2+2?,4,5,A");

    assert_eq!(questions.len(), 1);
    assert_eq!(questions[0].options.len(), 2);
    let correct = questions[0]
        .correct_option()
        .expect("option A is marked correct");
    assert_eq!(correct.text, "4");
}

#[test]
fn rows_with_any_option_never_lose_all_options() {
    let text = "topic,gradeLevel,question,optionA,optionB,optionC,optionD,correctAnswer\n\
        a,low,q1,,,,x,D\n\
        a,low,q2,x,,,,A\n\
        a,low,q3,,x,,,B\n\
        a,low,q4,,,x,,C";

    let questions = parse_questions(text);

    assert_eq!(questions.len(), 4);
    assert!(questions.iter().all(|q| q.options.len() == 1));
    assert!(questions.iter().all(|q| q.options[0].is_correct));
}

#[test]
fn parsing_same_text_twice_is_identical() {
    classquiz::logging::init(log::LevelFilter::Debug);

    let first = parse_questions(SAMPLE_CSV);
    let second = parse_questions(SAMPLE_CSV);

    assert_eq!(first, second);
    assert!(!first.is_empty());
}

#[test]
fn file_on_disk_loads_like_text() {
    let dir = tempfile::tempdir().expect("temporary directory should be created");
    let path = dir.path().join("quiz_data.csv");
    fs::write(&path, SAMPLE_CSV).expect("sample data should be written");

    let from_file = read_questions(&path).expect("sample file should load");

    assert_eq!(from_file, parse_questions(SAMPLE_CSV));
}

#[test]
fn unreadable_source_reports_its_path() {
    let dir = tempfile::tempdir().expect("temporary directory should be created");
    let path = dir.path().join("absent.csv");

    let error = read_questions(&path).expect_err("missing file should error");

    assert!(matches!(error, DataLoadError::Read { .. }));
    assert!(error.to_string().contains("absent.csv"));
}
