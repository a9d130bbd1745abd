pub mod config;
pub mod demo;
pub mod game;
pub mod loader;
pub mod logging;
pub mod question;
pub mod score;
pub mod selector;

pub use config::{GameConfig, GradeEntry, TopicEntry};
pub use demo::{SAMPLE_CSV, sample_questions};
pub use game::{Action, AnswerOutcome, Event, GameError, GameState, Scene};
pub use loader::{DataLoadError, parse_questions, read_questions};
pub use question::{AnswerOption, QuestionKey, QuestionRecord};
pub use score::{InvalidPlayerCount, PlayerCount, PlayerId, Scoreboard};
pub use selector::{NoMatchError, Selection, select_question};
