use rand::Rng;
use std::collections::HashSet;
use std::fmt;

use crate::config::GameConfig;
use crate::loader::DataLoadError;
use crate::question::{QuestionKey, QuestionRecord};
use crate::score::{InvalidPlayerCount, PlayerCount, PlayerId, Scoreboard};
use crate::selector::{NoMatchError, select_question};

/// The screen currently shown to the players. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Scene {
    #[default]
    Setup,
    TopicSelection,
    Question,
    Result,
}

impl Scene {
    /// Element id of the screen that renders this scene.
    pub fn id(self) -> &'static str {
        match self {
            Scene::Setup => "setup-scene",
            Scene::TopicSelection => "topic-scene",
            Scene::Question => "question-scene",
            Scene::Result => "result-scene",
        }
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scene::Setup => "setup",
            Scene::TopicSelection => "topic-selection",
            Scene::Question => "question",
            Scene::Result => "result",
        };
        f.write_str(name)
    }
}

/// User input that drives the scene state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectGradeLevel(String),
    SelectPlayerCount(u8),
    ConfirmSetup,
    PickTopic(String),
    BackToSetup,
    /// Index into the current question's options, `None` when nothing was chosen.
    SubmitAnswer(Option<usize>),
    Continue,
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Action::SelectGradeLevel(_) => "select grade level",
            Action::SelectPlayerCount(_) => "select player count",
            Action::ConfirmSetup => "confirm setup",
            Action::PickTopic(_) => "pick topic",
            Action::BackToSetup => "back to setup",
            Action::SubmitAnswer(_) => "submit answer",
            Action::Continue => "continue",
        }
    }
}

/// What happened when an answer was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub player: PlayerId,
    pub chosen: String,
    pub correct: bool,
    /// Text of the correct option, `None` if the question marks none.
    pub correct_answer: Option<String>,
}

/// Successful result of applying an [`Action`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SettingsChanged,
    SetupConfirmed,
    /// A question was drawn. `recycled` is set when the asked-question history
    /// had to be cleared to find one.
    QuestionDrawn { recycled: bool },
    ReturnedToSetup,
    Answered(AnswerOutcome),
    TurnPassed(PlayerId),
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum GameError {
    #[error("question data has not been loaded")]
    QuestionsNotLoaded,
    #[error(transparent)]
    NoMatch(#[from] NoMatchError),
    #[error("no answer was selected")]
    NoSelection,
    #[error("option {index} does not exist; the question has {available} options")]
    OptionOutOfRange { index: usize, available: usize },
    #[error(transparent)]
    InvalidPlayerCount(#[from] InvalidPlayerCount),
    #[error("cannot {action} while on the {scene} screen")]
    InvalidTransition { scene: Scene, action: &'static str },
}

/// All mutable state of one game session.
///
/// Every transition goes through [`GameState::apply`]. A transition that
/// fails leaves the state exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    player_count: PlayerCount,
    grade_level: String,
    current_player: PlayerId,
    scores: Scoreboard,
    scene: Scene,
    questions: Option<Vec<QuestionRecord>>,
    current_question: Option<QuestionRecord>,
    used_questions: HashSet<QuestionKey>,
    current_topic: Option<String>,
    last_outcome: Option<AnswerOutcome>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(&GameConfig::default())
    }
}

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        let player_count = config.player_count();

        Self {
            player_count,
            grade_level: config.default_grade_level.clone(),
            current_player: PlayerId::FIRST,
            scores: Scoreboard::new(player_count),
            scene: Scene::Setup,
            questions: None,
            current_question: None,
            used_questions: HashSet::new(),
            current_topic: None,
            last_outcome: None,
        }
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn player_count(&self) -> PlayerCount {
        self.player_count
    }

    pub fn grade_level(&self) -> &str {
        &self.grade_level
    }

    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    pub fn scores(&self) -> &Scoreboard {
        &self.scores
    }

    pub fn current_question(&self) -> Option<&QuestionRecord> {
        self.current_question.as_ref()
    }

    pub fn current_topic(&self) -> Option<&str> {
        self.current_topic.as_deref()
    }

    pub fn last_outcome(&self) -> Option<&AnswerOutcome> {
        self.last_outcome.as_ref()
    }

    pub fn used_questions(&self) -> &HashSet<QuestionKey> {
        &self.used_questions
    }

    pub fn questions_loaded(&self) -> bool {
        self.questions.is_some()
    }

    pub fn question_count(&self) -> usize {
        self.questions.as_ref().map_or(0, Vec::len)
    }

    /// Replaces setup defaults taken from `previous` with those of `config`.
    /// Settings the players already changed are kept.
    pub fn adopt_defaults(&mut self, previous: &GameConfig, config: &GameConfig) {
        if self.scene != Scene::Setup {
            return;
        }

        if self.grade_level == previous.default_grade_level {
            self.grade_level = config.default_grade_level.clone();
        }
        if self.player_count == previous.player_count() {
            self.player_count = config.player_count();
            self.scores.reset(self.player_count);
        }
    }

    /// Stores a freshly loaded question set. The asked-question history is
    /// cleared since it refers to the previous set.
    pub fn load_questions(&mut self, questions: Vec<QuestionRecord>) {
        log::info!("question data loaded: {} questions", questions.len());
        self.questions = Some(questions);
        self.used_questions.clear();
    }

    /// Records a failed load. The question set stays unset, so the game
    /// cannot leave the setup screen.
    pub fn load_failed(&self, error: &DataLoadError) {
        log::error!("question data failed to load: {error}");
    }

    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        action: Action,
        rng: &mut R,
    ) -> Result<Event, GameError> {
        match (self.scene, action) {
            (Scene::Setup, Action::SelectGradeLevel(grade_level)) => {
                log::debug!("grade level set to {grade_level}");
                self.grade_level = grade_level;
                Ok(Event::SettingsChanged)
            }
            (Scene::Setup, Action::SelectPlayerCount(count)) => {
                self.player_count = PlayerCount::new(count)?;
                log::debug!("player count set to {count}");
                Ok(Event::SettingsChanged)
            }
            (Scene::Setup, Action::ConfirmSetup) => self.confirm_setup(),
            (Scene::TopicSelection, Action::PickTopic(topic)) => self.pick_topic(topic, rng),
            (Scene::TopicSelection, Action::BackToSetup) => {
                self.scene = Scene::Setup;
                Ok(Event::ReturnedToSetup)
            }
            (Scene::Question, Action::SubmitAnswer(choice)) => self.submit_answer(choice),
            (Scene::Result, Action::Continue) => Ok(self.pass_turn()),
            (scene, action) => Err(GameError::InvalidTransition {
                scene,
                action: action.name(),
            }),
        }
    }

    fn confirm_setup(&mut self) -> Result<Event, GameError> {
        if self.questions.is_none() {
            return Err(GameError::QuestionsNotLoaded);
        }

        self.scores.reset(self.player_count);
        self.current_player = PlayerId::FIRST;
        self.used_questions.clear();
        self.current_topic = None;
        self.scene = Scene::TopicSelection;

        log::info!(
            "game started with {} players at grade level {}",
            self.player_count.get(),
            self.grade_level
        );
        Ok(Event::SetupConfirmed)
    }

    fn pick_topic<R: Rng + ?Sized>(
        &mut self,
        topic: String,
        rng: &mut R,
    ) -> Result<Event, GameError> {
        let questions = self
            .questions
            .as_deref()
            .ok_or(GameError::QuestionsNotLoaded)?;

        let selection = select_question(
            rng,
            &topic,
            &self.grade_level,
            questions,
            &mut self.used_questions,
        )
        .inspect_err(|error| log::warn!("{error}"))?;

        self.current_question = Some(selection.question);
        self.current_topic = Some(topic);
        self.last_outcome = None;
        self.scene = Scene::Question;

        Ok(Event::QuestionDrawn {
            recycled: selection.recycled,
        })
    }

    fn submit_answer(&mut self, choice: Option<usize>) -> Result<Event, GameError> {
        let index = choice.ok_or(GameError::NoSelection)?;
        let question = self
            .current_question
            .as_ref()
            .ok_or(GameError::InvalidTransition {
                scene: self.scene,
                action: "submit answer",
            })?;

        let chosen = question
            .options
            .get(index)
            .ok_or(GameError::OptionOutOfRange {
                index,
                available: question.options.len(),
            })?;

        let correct_answer = question.correct_option().map(|option| option.text.clone());
        let correct = correct_answer.as_deref() == Some(chosen.text.as_str());

        let outcome = AnswerOutcome {
            player: self.current_player,
            chosen: chosen.text.clone(),
            correct,
            correct_answer,
        };

        if correct {
            self.scores.award(self.current_player);
        }
        log::debug!(
            "{} answered {}",
            self.current_player,
            if correct { "correctly" } else { "incorrectly" }
        );

        self.last_outcome = Some(outcome.clone());
        self.scene = Scene::Result;

        Ok(Event::Answered(outcome))
    }

    fn pass_turn(&mut self) -> Event {
        self.current_player = self.current_player.next(self.player_count);
        self.current_question = None;
        self.last_outcome = None;
        self.scene = Scene::TopicSelection;

        Event::TurnPassed(self.current_player)
    }
}
