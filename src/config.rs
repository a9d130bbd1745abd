use std::str::FromStr;

use log::LevelFilter;

use crate::score::{MIN_PLAYERS, PlayerCount};

pub const DEFAULT_DATA_URL: &str = "./data/quiz_data.csv";
pub const DEFAULT_CONFIG_URL: &str = "./config.json";

/// Topic button shown on the topic-selection screen.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct TopicEntry {
    pub label: String,
    /// Value matched against the `topic` column.
    pub slug: String,
}

/// Grade level choice shown on the setup screen.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct GradeEntry {
    pub label: String,
    /// Value matched against the `gradeLevel` column.
    pub value: String,
}

/// Runtime settings for the front end. Every field may be omitted from the
/// JSON source.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct GameConfig {
    pub data_url: String,
    pub topics: Vec<TopicEntry>,
    pub grade_levels: Vec<GradeEntry>,
    pub default_grade_level: String,
    pub default_player_count: u8,
    pub log_level: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            data_url: DEFAULT_DATA_URL.to_string(),
            topics: vec![
                topic("Environment", "environment"),
                topic("Literacy", "literacy"),
                topic("Digital", "digital"),
            ],
            grade_levels: vec![grade("Lower grades", "low"), grade("Upper grades", "high")],
            default_grade_level: "low".to_string(),
            default_player_count: MIN_PLAYERS,
            log_level: "info".to_string(),
        }
    }
}

fn topic(label: &str, slug: &str) -> TopicEntry {
    TopicEntry {
        label: label.to_string(),
        slug: slug.to_string(),
    }
}

fn grade(label: &str, value: &str) -> GradeEntry {
    GradeEntry {
        label: label.to_string(),
        value: value.to_string(),
    }
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Configured log level, falling back to `Info` when unparseable.
    pub fn log_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Info)
    }

    /// Configured player count, falling back to the minimum when out of range.
    pub fn player_count(&self) -> PlayerCount {
        PlayerCount::new(self.default_player_count).unwrap_or_default()
    }
}
