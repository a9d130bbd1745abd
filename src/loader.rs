use std::collections::HashMap;
use std::fs;
use std::path::Path;

use csv::StringRecord;

use crate::question::{AnswerOption, QuestionRecord};

/// Option slots in display order. Column order in the source does not matter.
pub const OPTION_SLOTS: [char; 4] = ['A', 'B', 'C', 'D'];

#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("failed to read question file at {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to fetch question data from {url}: {message}")]
    Fetch { url: String, message: String },
    #[error("question data request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

impl PartialEq for DataLoadError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Read { path: left, .. }, Self::Read { path: right, .. }) => left == right,
            (
                Self::Fetch {
                    url: left_url,
                    message: left_message,
                },
                Self::Fetch {
                    url: right_url,
                    message: right_message,
                },
            ) => left_url == right_url && left_message == right_message,
            (
                Self::Status {
                    url: left_url,
                    status: left_status,
                },
                Self::Status {
                    url: right_url,
                    status: right_status,
                },
            ) => left_url == right_url && left_status == right_status,
            _ => false,
        }
    }
}

impl Eq for DataLoadError {}

enum Column {
    Topic,
    GradeLevel,
    Question,
    CorrectAnswer,
    Option(char),
    Ignored,
}

impl Column {
    fn from_header(header: &str) -> Self {
        let lower = header.to_lowercase();

        match lower.as_str() {
            "topic" => Self::Topic,
            "gradelevel" => Self::GradeLevel,
            "question" => Self::Question,
            "correctanswer" => Self::CorrectAnswer,
            _ if lower.starts_with("option") => header
                .chars()
                .last()
                .map(Self::Option)
                .unwrap_or(Self::Ignored),
            _ => Self::Ignored,
        }
    }
}

/// Parses comma-separated question data with a header row.
///
/// Parsing is lenient: rows whose field count differs from the header are
/// skipped, as are rows that end up with no options. Quotes are not
/// interpreted, so a comma inside a field always splits it.
pub fn parse_questions(text: &str) -> Vec<QuestionRecord> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .quoting(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.trim().as_bytes());

    let columns: Vec<Column> = match reader.headers() {
        Ok(headers) => headers.iter().map(Column::from_header).collect(),
        Err(error) => {
            log::debug!("question data has no readable header: {error}");
            return Vec::new();
        }
    };

    let mut questions = Vec::new();

    for (row_index, row) in reader.records().enumerate() {
        let record = match row {
            Ok(record) => record,
            Err(error) => {
                log::debug!("skipping row {}: {error}", row_index + 2);
                continue;
            }
        };

        if record.len() != columns.len() {
            log::debug!(
                "skipping row {}: expected {} fields, found {}",
                row_index + 2,
                columns.len(),
                record.len()
            );
            continue;
        }

        match parse_row(&columns, &record) {
            Some(question) => questions.push(question),
            None => log::debug!("skipping row {}: no options supplied", row_index + 2),
        }
    }

    questions
}

fn parse_row(columns: &[Column], record: &StringRecord) -> Option<QuestionRecord> {
    let mut topic = "";
    let mut grade_level = "";
    let mut prompt = "";
    let mut correct_answer = "";
    let mut slots: HashMap<char, &str> = HashMap::new();

    for (column, value) in columns.iter().zip(record.iter()) {
        match column {
            Column::Topic => topic = value,
            Column::GradeLevel => grade_level = value,
            Column::Question => prompt = value,
            Column::CorrectAnswer => correct_answer = value,
            Column::Option(slot) => {
                slots.insert(*slot, value);
            }
            Column::Ignored => {}
        }
    }

    let options: Vec<AnswerOption> = OPTION_SLOTS
        .iter()
        .filter_map(|slot| {
            slots
                .get(slot)
                .filter(|text| !text.is_empty())
                .map(|text| AnswerOption {
                    text: text.to_string(),
                    is_correct: correct_answer == slot.to_string(),
                })
        })
        .collect();

    if options.is_empty() {
        return None;
    }

    Some(QuestionRecord {
        topic: topic.to_string(),
        grade_level: grade_level.to_string(),
        prompt: prompt.to_string(),
        options,
    })
}

/// Reads and parses a question file from disk.
pub fn read_questions(path: impl AsRef<Path>) -> Result<Vec<QuestionRecord>, DataLoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| DataLoadError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let questions = parse_questions(&text);
    log::info!(
        "loaded {} questions from {}",
        questions.len(),
        path.display()
    );

    Ok(questions)
}
