use classquiz::{
    Action, Event, GameConfig, GameError, GameState, PlayerId, Scene, parse_questions,
    sample_questions,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

const THREE_MATH_QUESTIONS: &str = "topic,gradeLevel,question,optionA,optionB,correctAnswer\n\
    math,low,What is 2+2?,4,5,A\n\
    math,low,What is 3+3?,5,6,B\n\
    math,low,What is 4+4?,8,9,A\n\
    math,high,What is 12*12?,144,124,A";

fn game_with(data: &str, players: u8, rng: &mut StdRng) -> GameState {
    let mut state = GameState::new(&GameConfig::default());
    state.load_questions(parse_questions(data));
    state
        .apply(Action::SelectPlayerCount(players), rng)
        .expect("player count is valid");
    state
        .apply(Action::ConfirmSetup, rng)
        .expect("setup should confirm");
    state
}

fn play_turn(state: &mut GameState, topic: &str, answer_correctly: bool, rng: &mut StdRng) -> Event {
    state
        .apply(Action::PickTopic(topic.to_string()), rng)
        .expect("topic has questions");
    let question = state.current_question().expect("question is drawn");
    let index = question
        .options
        .iter()
        .position(|option| option.is_correct == answer_correctly)
        .expect("question has both correct and wrong options");
    let event = state
        .apply(Action::SubmitAnswer(Some(index)), rng)
        .expect("answer accepted");
    state
        .apply(Action::Continue, rng)
        .expect("continue from result");
    event
}

#[test]
fn exhausting_a_topic_recycles_on_the_fourth_draw() {
    let mut rng = StdRng::seed_from_u64(31);
    let mut state = game_with(THREE_MATH_QUESTIONS, 2, &mut rng);
    let mut prompts = Vec::new();

    for _ in 0..3 {
        let event = state
            .apply(Action::PickTopic("math".to_string()), &mut rng)
            .expect("math questions exist");
        assert_eq!(event, Event::QuestionDrawn { recycled: false });
        prompts.push(
            state
                .current_question()
                .map(|q| q.prompt.clone())
                .expect("question is drawn"),
        );
        state
            .apply(Action::SubmitAnswer(Some(0)), &mut rng)
            .expect("answer accepted");
        state
            .apply(Action::Continue, &mut rng)
            .expect("continue from result");
    }

    prompts.sort();
    prompts.dedup();
    assert_eq!(prompts.len(), 3);

    let event = state
        .apply(Action::PickTopic("math".to_string()), &mut rng)
        .expect("recycled pool is not empty");
    assert_eq!(event, Event::QuestionDrawn { recycled: true });
    assert_eq!(state.used_questions().len(), 1);
}

#[test]
fn missing_topic_keeps_topic_screen() {
    let mut rng = StdRng::seed_from_u64(32);
    let mut state = game_with(THREE_MATH_QUESTIONS, 2, &mut rng);

    let error = state
        .apply(Action::PickTopic("literacy".to_string()), &mut rng)
        .expect_err("no literacy questions");

    assert!(matches!(error, GameError::NoMatch(_)));
    assert_eq!(state.scene(), Scene::TopicSelection);
    assert!(state.current_question().is_none());
}

#[test]
fn turns_rotate_through_all_players() {
    for players in 2..=4u8 {
        let mut rng = StdRng::seed_from_u64(u64::from(players));
        let mut state = game_with(THREE_MATH_QUESTIONS, players, &mut rng);

        for _ in 0..players {
            play_turn(&mut state, "math", false, &mut rng);
        }

        assert_eq!(state.current_player(), PlayerId::FIRST);
    }
}

#[test]
fn only_the_answering_player_scores() {
    let mut rng = StdRng::seed_from_u64(33);
    let mut state = game_with(THREE_MATH_QUESTIONS, 3, &mut rng);

    play_turn(&mut state, "math", false, &mut rng);
    let event = play_turn(&mut state, "math", true, &mut rng);
    play_turn(&mut state, "math", false, &mut rng);

    let second = PlayerId::FIRST.next(state.player_count());
    let Event::Answered(outcome) = event else {
        panic!("expected an answer event, got {event:?}");
    };
    assert_eq!(outcome.player, second);
    assert_eq!(
        state.scores().standings(),
        vec![
            (PlayerId::FIRST, 0),
            (second, 1),
            (second.next(state.player_count()), 0)
        ]
    );
}

#[test]
fn returning_to_setup_starts_a_fresh_game() {
    let mut rng = StdRng::seed_from_u64(34);
    let mut state = game_with(THREE_MATH_QUESTIONS, 2, &mut rng);
    play_turn(&mut state, "math", true, &mut rng);

    state
        .apply(Action::BackToSetup, &mut rng)
        .expect("back from topic selection");
    state
        .apply(Action::ConfirmSetup, &mut rng)
        .expect("setup should confirm again");

    assert_eq!(state.current_player(), PlayerId::FIRST);
    assert!(state.scores().leaders().is_empty());
    assert!(state.used_questions().is_empty());
}

#[test]
fn selected_questions_always_match_grade() {
    let mut rng = StdRng::seed_from_u64(35);
    let mut state = GameState::default();
    state.load_questions(sample_questions());
    state
        .apply(Action::SelectGradeLevel("HIGH".to_string()), &mut rng)
        .expect("grade level can change in setup");
    state
        .apply(Action::ConfirmSetup, &mut rng)
        .expect("setup should confirm");

    for topic in ["environment", "literacy", "digital"] {
        state
            .apply(Action::PickTopic(topic.to_string()), &mut rng)
            .expect("topic has high grade questions");
        let question = state.current_question().expect("question is drawn");
        assert!(question.matches(topic, "high"));
        state
            .apply(Action::SubmitAnswer(Some(0)), &mut rng)
            .expect("answer accepted");
        state
            .apply(Action::Continue, &mut rng)
            .expect("continue from result");
    }
}
