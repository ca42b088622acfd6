use std::fs;

use tempfile::TempDir;

use quizbox::app::{App, AppScreen, QuizPhase};
use quizbox::config::Config;
use quizbox::questions::QuestionBank;
use quizbox::session::navigation::QuizAction;
use quizbox::session::status::QuestionStatus;
use quizbox::store::json_store::JsonStore;
use quizbox::ui::line_input::LineInput;

const BANK: &str = r#"
[[questions]]
id = 10
text = "2 + 2"
options = ["3", "4", "5"]
correct_option = 1

[[questions]]
id = 11
text = "Capital of France"
options = ["Paris", "Rome"]
correct_option = 0

[[questions]]
id = 12
text = "Largest planet"
options = ["Mars", "Venus", "Jupiter", "Earth"]
correct_option = 2
"#;

fn setup() -> (TempDir, App) {
    let dir = TempDir::new().unwrap();
    let bank_path = dir.path().join("bank.toml");
    fs::write(&bank_path, BANK).unwrap();
    let bank = QuestionBank::from_file(&bank_path).unwrap();
    let store = JsonStore::with_base_dir(dir.path().join("data")).unwrap();
    let app = App::new(Config::default(), bank, Some(store));
    (dir, app)
}

fn fill(app: &mut App, field: &str, value: &str) {
    let form = if app.screen == AppScreen::Register {
        &mut app.register_form
    } else {
        &mut app.login_form
    };
    let idx = form.fields.iter().position(|f| f.name == field).unwrap();
    form.fields[idx].input = LineInput::new(value);
}

fn guest_login(app: &mut App) {
    app.toggle_terms();
    app.get_started();
    assert_eq!(app.screen, AppScreen::Login);
    fill(app, "phone_number", "0987654321");
    fill(app, "password", "texol123");
    app.submit_login();
}

#[test]
fn full_attempt_from_landing_to_result() {
    let (_dir, mut app) = setup();
    guest_login(&mut app);
    assert_eq!(app.screen, AppScreen::Quiz);
    assert_eq!(app.quiz_phase, QuizPhase::Active);

    // answer the first question, skip the second, come back to it later
    app.apply(QuizAction::SelectAnswer(1));
    app.apply(QuizAction::Next);
    app.apply(QuizAction::Next);
    app.apply(QuizAction::SelectAnswer(0));

    let statuses = app.session().unwrap().statuses();
    assert_eq!(
        statuses,
        vec![
            QuestionStatus::Answered,
            QuestionStatus::Visited,
            QuestionStatus::Current
        ]
    );

    app.apply(QuizAction::JumpTo(1));
    app.apply(QuizAction::SelectAnswer(0));
    // submit is only honoured on the last question
    app.apply(QuizAction::Submit);
    assert_eq!(app.screen, AppScreen::Quiz);

    app.apply(QuizAction::JumpTo(2));
    app.primary_action();
    assert_eq!(app.screen, AppScreen::Result);
    let result = app.result.clone().unwrap();
    assert_eq!(result.score, 2);
    assert_eq!(result.total, 3);
    assert_eq!(result.answered, 3);
}

#[test]
fn identity_survives_restart_and_logout_forgets_it() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    let bank = || QuestionBank::from_toml(BANK).unwrap();

    let mut first = App::new(
        Config::default(),
        bank(),
        Some(JsonStore::with_base_dir(data.clone()).unwrap()),
    );
    guest_login(&mut first);
    assert_eq!(first.screen, AppScreen::Quiz);
    drop(first);

    let mut second = App::new(
        Config::default(),
        bank(),
        Some(JsonStore::with_base_dir(data.clone()).unwrap()),
    );
    assert_eq!(second.identity.admitted().unwrap().id, "guest-001");
    second.toggle_terms();
    second.get_started();
    assert_eq!(second.screen, AppScreen::Quiz);

    second.apply(QuizAction::Logout);
    assert_eq!(second.screen, AppScreen::Login);
    drop(second);

    let mut third = App::new(
        Config::default(),
        bank(),
        Some(JsonStore::with_base_dir(data).unwrap()),
    );
    assert!(third.identity.current().is_none());
    third.open_quiz();
    assert_eq!(third.screen, AppScreen::Login);
}

#[test]
fn malformed_stored_identity_redirects_to_login() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("data");
    let store = JsonStore::with_base_dir(data.clone()).unwrap();
    fs::write(data.join("current_user.json"), "{ not json").unwrap();

    let mut app = App::new(Config::default(), QuestionBank::from_toml(BANK).unwrap(), Some(store));
    assert!(app.identity.current().is_none());
    app.open_quiz();
    assert_eq!(app.screen, AppScreen::Login);
}

#[test]
fn registered_user_can_take_the_quiz() {
    let (_dir, mut app) = setup();
    app.go_to_register();
    fill(&mut app, "full_name", "Grace Hopper");
    fill(&mut app, "email", "grace@navy.example");
    fill(&mut app, "phone_number", "5550001111");
    fill(&mut app, "password", "cobol59");
    app.submit_registration();
    assert_eq!(app.screen, AppScreen::Login);

    // the same phone number cannot be registered twice
    app.go_to_register();
    fill(&mut app, "full_name", "Someone Else");
    fill(&mut app, "email", "else@example.com");
    fill(&mut app, "phone_number", "5550001111");
    fill(&mut app, "password", "secret1");
    app.submit_registration();
    assert_eq!(app.screen, AppScreen::Register);
    assert_eq!(
        app.register_form.general_error.as_deref(),
        Some("This phone number is already registered")
    );

    app.go_to_login();
    fill(&mut app, "phone_number", "5550001111");
    fill(&mut app, "password", "cobol59");
    app.submit_login();
    assert_eq!(app.screen, AppScreen::Quiz);
    assert_eq!(app.identity.admitted().unwrap().full_name, "Grace Hopper");
}

#[test]
fn restart_resets_answers_and_timer() {
    let (_dir, mut app) = setup();
    guest_login(&mut app);
    let generation = app.quiz.as_ref().unwrap().generation;
    app.apply(QuizAction::SelectAnswer(2));
    app.apply(QuizAction::ToggleBookmark);
    app.handle_tick(generation);
    app.handle_tick(generation);
    app.apply(QuizAction::Next);

    app.apply(QuizAction::Restart);
    let session = app.session().unwrap();
    assert_eq!(session.current_index(), 0);
    assert!(session.answers().is_empty());
    assert!(!session.is_bookmarked());
    assert_eq!(session.remaining_secs(), 300);
}

#[test]
fn auto_submit_on_expiry_scores_partial_answers() {
    let (_dir, mut app) = setup();
    app.config.quiz_duration_secs = 3;
    app.config.auto_submit_on_expiry = true;
    guest_login(&mut app);
    app.apply(QuizAction::SelectAnswer(1));

    let generation = app.quiz.as_ref().unwrap().generation;
    for _ in 0..3 {
        app.handle_tick(generation);
    }
    assert_eq!(app.screen, AppScreen::Result);
    let result = app.result.as_ref().unwrap();
    assert_eq!((result.score, result.total, result.answered), (1, 3, 1));
    assert_eq!(result.time_used_secs, 3);

    // late ticks from the finished session change nothing
    app.handle_tick(generation);
    assert_eq!(app.screen, AppScreen::Result);
}
