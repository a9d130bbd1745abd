use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;

use crate::question::{QuestionKey, QuestionRecord};

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("no questions found for topic `{topic}` at grade level `{grade_level}`")]
pub struct NoMatchError {
    pub topic: String,
    pub grade_level: String,
}

/// Result of a successful draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub question: QuestionRecord,
    /// `true` when every matching question had already been asked and the
    /// used-question history was cleared to make this draw.
    pub recycled: bool,
}

/// Picks a question for `topic` and `grade_level` that has not been asked yet.
///
/// Matching is case-insensitive. Questions whose key is in `used` are skipped;
/// when that leaves nothing, `used` is cleared entirely and the whole matching
/// pool becomes eligible again. The chosen question's key is added to `used`.
///
/// # Errors
/// Returns [`NoMatchError`] if no question matches the topic and grade level.
/// `used` is left untouched in that case.
pub fn select_question<R: Rng + ?Sized>(
    rng: &mut R,
    topic: &str,
    grade_level: &str,
    questions: &[QuestionRecord],
    used: &mut HashSet<QuestionKey>,
) -> Result<Selection, NoMatchError> {
    let matching: Vec<&QuestionRecord> = questions
        .iter()
        .filter(|question| question.matches(topic, grade_level))
        .collect();

    if matching.is_empty() {
        return Err(NoMatchError {
            topic: topic.to_string(),
            grade_level: grade_level.to_string(),
        });
    }

    let mut eligible: Vec<&QuestionRecord> = matching
        .iter()
        .copied()
        .filter(|question| !used.contains(&question.key()))
        .collect();

    let recycled = eligible.is_empty();
    if recycled {
        log::warn!(
            "all {} questions for {}/{} were asked; recycling",
            matching.len(),
            topic,
            grade_level
        );
        used.clear();
        eligible = matching;
    }

    let question = eligible
        .choose(rng)
        .map(|question| (*question).clone())
        .ok_or_else(|| NoMatchError {
            topic: topic.to_string(),
            grade_level: grade_level.to_string(),
        })?;

    used.insert(question.key());
    log::debug!("selected question {}", question.key());

    Ok(Selection { question, recycled })
}
