use crate::{QuestionRecord, parse_questions};

/// Question data shipped with the front end.
pub const SAMPLE_CSV: &str = include_str!("../data/quiz_data.csv");

pub fn sample_questions() -> Vec<QuestionRecord> {
    parse_questions(SAMPLE_CSV)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, GameState, Scene};
    use rand::SeedableRng;

    #[test]
    fn sample_parses_every_row() {
        let questions = sample_questions();

        assert_eq!(questions.len(), 7);
        assert!(questions.iter().all(|q| q.correct_option().is_some()));
    }

    #[test]
    fn sample_covers_every_default_topic_and_grade() {
        let questions = sample_questions();

        for topic in ["environment", "literacy", "digital"] {
            for grade in ["low", "high"] {
                assert!(
                    questions.iter().any(|q| q.matches(topic, grade)),
                    "missing {topic}/{grade}"
                );
            }
        }
    }

    #[test]
    fn sample_supports_a_full_round() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(21);
        let mut state = GameState::default();
        state.load_questions(sample_questions());

        state
            .apply(Action::ConfirmSetup, &mut rng)
            .expect("setup should confirm");
        state
            .apply(Action::PickTopic("digital".to_string()), &mut rng)
            .expect("digital questions exist");
        state
            .apply(Action::SubmitAnswer(Some(1)), &mut rng)
            .expect("answer accepted");

        assert_eq!(state.scene(), Scene::Result);
        assert_eq!(state.last_outcome().map(|o| o.correct), Some(true));
    }
}
