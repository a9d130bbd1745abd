use std::fmt;

/// Number of prompt characters that take part in a [`QuestionKey`].
pub const KEY_PROMPT_PREFIX: usize = 20;

/// A single answer choice shown for a question.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AnswerOption {
    pub text: String,
    pub is_correct: bool,
}

/// A multiple-choice question parsed from the tabular data source.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuestionRecord {
    /// Category tag such as `environment` or `digital`.
    pub topic: String,
    /// Difficulty tier the question belongs to.
    pub grade_level: String,
    /// Text shown as the question prompt.
    pub prompt: String,
    /// Answer choices in slot order (A, B, C, D), empty slots omitted.
    pub options: Vec<AnswerOption>,
}

/// Approximate identity of a question used to track which ones were already asked.
///
/// Two questions that share topic, grade level and the first
/// [`KEY_PROMPT_PREFIX`] characters of their prompt produce the same key and
/// are treated as the same question.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestionKey(String);

impl QuestionKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl QuestionRecord {
    pub fn key(&self) -> QuestionKey {
        let prefix: String = self.prompt.chars().take(KEY_PROMPT_PREFIX).collect();
        QuestionKey(format!("{}_{}_{}", self.topic, self.grade_level, prefix))
    }

    /// Case-insensitive match on both topic and grade level.
    pub fn matches(&self, topic: &str, grade_level: &str) -> bool {
        self.topic.to_lowercase() == topic.to_lowercase()
            && self.grade_level.to_lowercase() == grade_level.to_lowercase()
    }

    pub fn correct_option(&self) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.is_correct)
    }
}

impl fmt::Display for QuestionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} / {}] {}", self.topic, self.grade_level, self.prompt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recycling_question() -> QuestionRecord {
        QuestionRecord {
            topic: "environment".to_string(),
            grade_level: "low".to_string(),
            prompt: "Which bin do empty glass bottles go in?".to_string(),
            options: vec![
                AnswerOption {
                    text: "Glass".to_string(),
                    is_correct: true,
                },
                AnswerOption {
                    text: "Paper".to_string(),
                    is_correct: false,
                },
            ],
        }
    }

    #[test]
    fn key_uses_topic_grade_and_prompt_prefix() {
        let key = recycling_question().key();
        assert_eq!(key.as_str(), "environment_low_Which bin do empty g");
    }

    #[test]
    fn key_keeps_short_prompts_whole() {
        let question = QuestionRecord {
            prompt: "2+2?".to_string(),
            ..recycling_question()
        };

        assert_eq!(question.key().as_str(), "environment_low_2+2?");
    }

    #[test]
    fn key_counts_characters_not_bytes() {
        let question = QuestionRecord {
            prompt: "분리수거를 할 때 유리병은 어디에 버려야 할까요?".to_string(),
            ..recycling_question()
        };

        let key = question.key();
        let prefix = key.as_str().trim_start_matches("environment_low_");
        assert_eq!(prefix.chars().count(), KEY_PROMPT_PREFIX);
    }

    #[test]
    fn questions_sharing_a_prefix_collide() {
        let first = recycling_question();
        let second = QuestionRecord {
            prompt: "Which bin do empty glass jars go in?".to_string(),
            ..recycling_question()
        };

        assert_eq!(first.key(), second.key());
    }

    #[test]
    fn matches_ignores_case() {
        let question = recycling_question();

        assert!(question.matches("Environment", "LOW"));
        assert!(!question.matches("environment", "high"));
        assert!(!question.matches("digital", "low"));
    }

    #[test]
    fn correct_option_is_found() {
        let question = recycling_question();
        let correct = question.correct_option().expect("question has a correct option");

        assert_eq!(correct.text, "Glass");
    }

    #[test]
    fn display_includes_topic_and_prompt() {
        let formatted = format!("{}", recycling_question());

        assert!(formatted.contains("environment / low"));
        assert!(formatted.contains("glass bottles"));
    }
}
