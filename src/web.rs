use classquiz::config::DEFAULT_CONFIG_URL;
use classquiz::score::{MAX_PLAYERS, MIN_PLAYERS};
use classquiz::{Action, DataLoadError, GameConfig, GameError, GameState, Scene, parse_questions};
use gloo_net::http::Request;
use leptos::*;
use log::LevelFilter;
use rand::SeedableRng;
use wasm_bindgen_futures::spawn_local;

#[derive(Clone, Copy, PartialEq, Eq)]
enum NoticeKind {
    Info,
    Warning,
}

#[derive(Clone, PartialEq, Eq)]
struct Notice {
    message: String,
    kind: NoticeKind,
}

impl Notice {
    fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Info,
        }
    }

    fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Warning,
        }
    }
}

fn notice_for_event(event: &classquiz::Event) -> Option<Notice> {
    match event {
        classquiz::Event::QuestionDrawn { recycled: true } => Some(Notice::info(
            "Every question in this topic has been asked. Starting over!",
        )),
        _ => None,
    }
}

fn notice_for_error(error: &GameError) -> Notice {
    match error {
        GameError::NoMatch(_) => {
            Notice::warning("There are no questions for this topic and grade level.")
        }
        GameError::NoSelection => Notice::warning("Please choose an answer!"),
        GameError::QuestionsNotLoaded => Notice::warning("Quiz data is not available yet."),
        other => Notice::warning(other.to_string()),
    }
}

async fn fetch_text(url: &str) -> Result<String, DataLoadError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|error| DataLoadError::Fetch {
            url: url.to_string(),
            message: error.to_string(),
        })?;

    if !response.ok() {
        return Err(DataLoadError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    response.text().await.map_err(|error| DataLoadError::Fetch {
        url: url.to_string(),
        message: error.to_string(),
    })
}

async fn load_config() -> GameConfig {
    match fetch_text(DEFAULT_CONFIG_URL).await {
        Ok(text) => GameConfig::from_json_str(&text).unwrap_or_else(|error| {
            log::warn!("ignoring invalid {DEFAULT_CONFIG_URL}: {error}");
            GameConfig::default()
        }),
        Err(error) => {
            log::warn!("{error}; using default settings");
            GameConfig::default()
        }
    }
}

/// Routes UI triggers into the game state and surfaces notices.
#[derive(Clone, Copy)]
struct Controller {
    game: RwSignal<GameState>,
    set_notice: WriteSignal<Option<Notice>>,
    set_selected: WriteSignal<Option<usize>>,
}

impl Controller {
    fn send(self, action: Action) {
        let mut rng = rand::rngs::StdRng::from_entropy();

        match self.game.try_update(|state| state.apply(action, &mut rng)) {
            Some(Ok(event)) => {
                if matches!(event, classquiz::Event::QuestionDrawn { .. }) {
                    self.set_selected.set(None);
                }
                self.set_notice.set(notice_for_event(&event));
            }
            Some(Err(error)) => self.set_notice.set(Some(notice_for_error(&error))),
            None => {}
        }
    }
}

#[component]
fn SetupScene(
    controller: Controller,
    config: RwSignal<GameConfig>,
    loading: ReadSignal<bool>,
) -> impl IntoView {
    let game = controller.game;

    view! {
        <section id=Scene::Setup.id() class="scene">
            <h1 class="headline">"Class Quiz"</h1>
            <fieldset class="choices">
                <legend>"Grade level"</legend>
                {move || {
                    config
                        .with(|config| config.grade_levels.clone())
                        .into_iter()
                        .map(|grade| {
                            let value = grade.value.clone();
                            let checked_value = grade.value.clone();
                            view! {
                                <label class="choice">
                                    <input
                                        type="radio"
                                        name="gradeLevel"
                                        value=grade.value
                                        prop:checked=move || {
                                            game.with(|state| state.grade_level() == checked_value)
                                        }
                                        on:change=move |_| {
                                            controller.send(Action::SelectGradeLevel(value.clone()))
                                        }
                                    />
                                    {grade.label}
                                </label>
                            }
                        })
                        .collect_view()
                }}
            </fieldset>
            <fieldset class="choices">
                <legend>"Players"</legend>
                {(MIN_PLAYERS..=MAX_PLAYERS)
                    .map(|count| {
                        view! {
                            <label class="choice">
                                <input
                                    type="radio"
                                    name="playerCount"
                                    value=count.to_string()
                                    prop:checked=move || {
                                        game.with(|state| state.player_count().get() == count)
                                    }
                                    on:change=move |_| controller.send(Action::SelectPlayerCount(count))
                                />
                                {format!("{count} players")}
                            </label>
                        }
                    })
                    .collect_view()}
            </fieldset>
            {move || loading.get().then(|| view! { <p class="status">"Loading quiz data..."</p> })}
            <button
                id="to-topic-btn"
                class="primary"
                type="button"
                disabled=move || loading.get() || !game.with(|state| state.questions_loaded())
                on:click=move |_| controller.send(Action::ConfirmSetup)
            >
                "Start"
            </button>
        </section>
    }
}

#[component]
fn TopicScene(controller: Controller, config: RwSignal<GameConfig>) -> impl IntoView {
    let game = controller.game;

    let grade_label = move || {
        let grade = game.with(|state| state.grade_level().to_string());
        config.with(|config| {
            config
                .grade_levels
                .iter()
                .find(|entry| entry.value.eq_ignore_ascii_case(&grade))
                .map(|entry| entry.label.clone())
                .unwrap_or(grade)
        })
    };

    let players = move || {
        let (current, standings, leaders) = game.with(|state| {
            (
                state.current_player(),
                state.scores().standings(),
                state.scores().leaders(),
            )
        });

        standings
            .into_iter()
            .map(|(player, score)| {
                let mut class = format!("player p{}", player.number());
                if player == current {
                    class.push_str(" current");
                }
                if leaders.contains(&player) {
                    class.push_str(" leader");
                }

                view! {
                    <li class=class>
                        <span class="player-name">{player.to_string()}</span>
                        <span class="player-score">{score}</span>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <section id=Scene::TopicSelection.id() class="scene">
            <p id="selected-grade" class="eyebrow">{grade_label}</p>
            <ul id="scoreboard" class="scoreboard">{players}</ul>
            <p class="turn">
                <span class="player-tag">{move || game.with(|state| state.current_player().to_string())}</span>
                ", pick a topic"
            </p>
            <div class="topics">
                {config
                    .with_untracked(|config| config.topics.clone())
                    .into_iter()
                    .map(|topic| {
                        let slug = topic.slug.clone();
                        view! {
                            <button
                                class="topic-btn"
                                id=format!("btn-{}", topic.slug)
                                type="button"
                                on:click=move |_| controller.send(Action::PickTopic(slug.clone()))
                            >
                                {topic.label}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>
            <button
                id="back-to-setup-btn"
                type="button"
                on:click=move |_| controller.send(Action::BackToSetup)
            >
                "Back to start"
            </button>
        </section>
    }
}

#[component]
fn QuestionScene(controller: Controller, selected: ReadSignal<Option<usize>>) -> impl IntoView {
    let (question, player) = controller
        .game
        .with_untracked(|state| (state.current_question().cloned(), state.current_player()));
    let set_selected = controller.set_selected;

    let body = match question {
        Some(question) => view! {
            <p id="question-text" class="prompt">{question.prompt.clone()}</p>
            <div id="answer-options" class="options">
                {question
                    .options
                    .into_iter()
                    .enumerate()
                    .map(|(index, option)| {
                        let option_id = format!("option-{index}");
                        view! {
                            <div class="option">
                                <input
                                    type="radio"
                                    name="answer"
                                    id=option_id.clone()
                                    prop:checked=move || selected.get() == Some(index)
                                    on:change=move |_| set_selected.set(Some(index))
                                />
                                <label for=option_id>{option.text}</label>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_view(),
        None => view! { <p class="prompt">"No question has been drawn."</p> }.into_view(),
    };

    view! {
        <section id=Scene::Question.id() class="scene">
            <p class="turn">
                <span class="player-tag">{player.to_string()}</span>
                "'s turn"
            </p>
            {body}
            <button
                id="submit-answer-btn"
                class="primary"
                type="button"
                on:click=move |_| controller.send(Action::SubmitAnswer(selected.get_untracked()))
            >
                "Submit answer"
            </button>
        </section>
    }
}

#[component]
fn ResultScene(controller: Controller) -> impl IntoView {
    let outcome = controller
        .game
        .with_untracked(|state| state.last_outcome().cloned());

    let feedback = match outcome {
        Some(outcome) if outcome.correct => view! {
            <p id="result-feedback" class="feedback correct">
                {format!("Correct! {} earns 1 point!", outcome.player)}
            </p>
        }
        .into_view(),
        Some(outcome) => {
            let answer = outcome
                .correct_answer
                .unwrap_or_else(|| "not listed".to_string());
            view! {
                <p id="result-feedback" class="feedback wrong">
                    {format!("Wrong! The answer is \"{answer}\".")}
                </p>
            }
            .into_view()
        }
        None => ().into_view(),
    };

    view! {
        <section id=Scene::Result.id() class="scene">
            {feedback}
            <button
                id="return-to-topic-btn"
                class="primary"
                type="button"
                on:click=move |_| controller.send(Action::Continue)
            >
                "Next question"
            </button>
        </section>
    }
}

#[component]
fn App() -> impl IntoView {
    let game = create_rw_signal(GameState::default());
    let config = create_rw_signal(GameConfig::default());
    let (notice, set_notice) = create_signal::<Option<Notice>>(None);
    let (selected, set_selected) = create_signal::<Option<usize>>(None);
    let (loading, set_loading) = create_signal(true);

    let controller = Controller {
        game,
        set_notice,
        set_selected,
    };

    spawn_local(async move {
        let loaded = load_config().await;
        log::set_max_level(loaded.log_filter());
        let data_url = loaded.data_url.clone();
        let previous = config.get_untracked();
        game.update(|state| state.adopt_defaults(&previous, &loaded));
        config.set(loaded);

        match fetch_text(&data_url).await {
            Ok(text) => game.update(|state| state.load_questions(parse_questions(&text))),
            Err(error) => {
                game.with_untracked(|state| state.load_failed(&error));
                set_notice.set(Some(Notice::warning(
                    "Quiz data could not be loaded. Please reload the page.",
                )));
            }
        }
        set_loading.set(false);
    });

    let scene = create_memo(move |_| game.with(|state| state.scene()));

    view! {
        <main class="app">
            {move || {
                notice
                    .get()
                    .map(|notice| {
                        let class = match notice.kind {
                            NoticeKind::Info => "notice info",
                            NoticeKind::Warning => "notice warning",
                        };
                        view! {
                            <div class=class role="status">
                                {notice.message}
                            </div>
                        }
                    })
            }}
            {move || match scene.get() {
                Scene::Setup => {
                    view! { <SetupScene controller=controller config=config loading=loading /> }
                        .into_view()
                }
                Scene::TopicSelection => {
                    view! { <TopicScene controller=controller config=config /> }.into_view()
                }
                Scene::Question => {
                    view! { <QuestionScene controller=controller selected=selected /> }.into_view()
                }
                Scene::Result => view! { <ResultScene controller=controller /> }.into_view(),
            }}
        </main>
    }
}

pub fn start() {
    console_error_panic_hook::set_once();
    classquiz::logging::init(LevelFilter::Info);
    mount_to_body(|| view! { <App /> });
}
