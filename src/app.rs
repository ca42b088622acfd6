use std::sync::mpsc;
use std::time::Duration;

use chrono::Utc;

use crate::auth::credentials::{self, AuthError};
use crate::auth::identity::IdentityContext;
use crate::auth::validate;
use crate::config::Config;
use crate::event::AppEvent;
use crate::questions::QuestionBank;
use crate::session::navigation::{self, QuizAction, Transition};
use crate::session::quiz::QuizSession;
use crate::session::result::QuizResult;
use crate::session::timer::Ticker;
use crate::store::json_store::JsonStore;
use crate::store::schema::FeedbackEntry;
use crate::ui::form::Form;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

const TICK_PERIOD: Duration = Duration::from_secs(1);
const MAX_COMMENT_CHARS: usize = 500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Landing,
    Login,
    Register,
    Quiz,
    Result,
}

/// Lifecycle of the quiz screen. There is no way back from `Submitted`; a
/// new attempt starts over from `Loading`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizPhase {
    Loading,
    Active,
    Submitted,
}

/// The running attempt and the ticker bound to it. Dropping this cancels the
/// ticker. The ticker only runs while time remains.
pub struct ActiveQuiz {
    pub session: QuizSession,
    pub generation: u64,
    ticker: Option<Ticker>,
}

impl ActiveQuiz {
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }
}

#[derive(Clone, Debug, Default)]
pub struct LandingState {
    pub accepted: bool,
    pub show_error: bool,
}

#[derive(Clone, Debug, Default)]
pub struct FeedbackState {
    pub rating: Option<u8>,
    pub comment: LineInput,
    pub editing_comment: bool,
    pub sent: bool,
}

pub struct App {
    pub screen: AppScreen,
    pub quiz_phase: QuizPhase,
    pub theme: &'static Theme,
    pub config: Config,
    pub store: Option<JsonStore>,
    pub identity: IdentityContext,
    pub bank: QuestionBank,
    pub quiz: Option<ActiveQuiz>,
    pub result: Option<QuizResult>,
    pub landing: LandingState,
    pub login_form: Form,
    pub register_form: Form,
    pub login_notice: Option<String>,
    pub feedback: FeedbackState,
    pub show_profile: bool,
    pub sidebar_collapsed: bool,
    pub jump_input: Option<LineInput>,
    pub status_message: Option<String>,
    pub should_quit: bool,
    tick_tx: Option<mpsc::Sender<AppEvent>>,
    next_generation: u64,
}

impl App {
    pub fn new(config: Config, bank: QuestionBank, store: Option<JsonStore>) -> Self {
        let theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(theme));
        let identity = match store {
            Some(ref s) => IdentityContext::load(s),
            None => IdentityContext::default(),
        };
        let sidebar_collapsed = !config.show_question_grid;

        Self {
            screen: AppScreen::Landing,
            quiz_phase: QuizPhase::Loading,
            theme,
            config,
            store,
            identity,
            bank,
            quiz: None,
            result: None,
            landing: LandingState::default(),
            login_form: Form::login(),
            register_form: Form::register(),
            login_notice: None,
            feedback: FeedbackState::default(),
            show_profile: false,
            sidebar_collapsed,
            jump_input: None,
            status_message: None,
            should_quit: false,
            tick_tx: None,
            next_generation: 0,
        }
    }

    /// Route timer ticks for future sessions into the main event queue.
    pub fn attach_ticks(&mut self, tx: mpsc::Sender<AppEvent>) {
        self.tick_tx = Some(tx);
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.quiz.as_ref().map(|q| &q.session)
    }

    // --- Landing ---

    pub fn toggle_terms(&mut self) {
        self.landing.accepted = !self.landing.accepted;
        if self.landing.accepted {
            self.landing.show_error = false;
        }
    }

    pub fn get_started(&mut self) {
        if !self.landing.accepted {
            self.landing.show_error = true;
            return;
        }
        if self.identity.admitted().is_some() {
            self.open_quiz();
        } else {
            self.go_to_login();
        }
    }

    // --- Login / registration ---

    pub fn go_to_login(&mut self) {
        self.login_form.clear_errors();
        self.screen = AppScreen::Login;
    }

    pub fn go_to_register(&mut self) {
        self.register_form.clear_errors();
        self.login_notice = None;
        self.screen = AppScreen::Register;
    }

    pub fn submit_login(&mut self) {
        self.login_form.clear_errors();
        self.login_notice = None;
        let input = self.login_form.login_input();
        if let Err(errors) = validate::validate_login(&input) {
            self.login_form.set_errors(&errors);
            return;
        }

        match credentials::login(self.store.as_ref(), &input) {
            Ok(identity) => {
                tracing::info!(user = %identity.id, "login succeeded");
                if let Err(e) = self.identity.save(self.store.as_ref(), identity) {
                    tracing::error!("could not persist identity: {e}");
                    self.login_form.general_error = Some(AuthError::Storage(e).to_string());
                    return;
                }
                self.login_form = Form::login();
                self.open_quiz();
            }
            Err(e) => {
                match e {
                    AuthError::Storage(ref inner) => tracing::error!("login failed: {inner}"),
                    _ => tracing::info!("login rejected for {}", input.phone_number),
                }
                self.login_form.general_error = Some(e.to_string());
            }
        }
    }

    pub fn submit_registration(&mut self) {
        self.register_form.clear_errors();
        let reg = self.register_form.registration();
        if let Err(errors) = validate::validate_registration(&reg) {
            self.register_form.set_errors(&errors);
            return;
        }
        let Some(store) = self.store.as_ref() else {
            self.register_form.general_error =
                Some("Registration is unavailable without a data directory".to_string());
            return;
        };

        match credentials::register(store, &reg) {
            Ok(record) => {
                tracing::info!(user = %record.id, "registered new user");
                self.register_form = Form::register();
                self.login_form = Form::login();
                self.login_notice = Some("Registration successful. Please log in.".to_string());
                self.screen = AppScreen::Login;
            }
            Err(e) => {
                tracing::warn!("registration failed: {e}");
                self.register_form.general_error = Some(e.to_string());
            }
        }
    }

    // --- Quiz lifecycle ---

    /// Mount the quiz screen: gate on identity, then start a fresh session.
    pub fn open_quiz(&mut self) {
        self.teardown_quiz();
        self.screen = AppScreen::Quiz;
        self.quiz_phase = QuizPhase::Loading;
        self.result = None;
        self.show_profile = false;
        self.jump_input = None;
        self.status_message = None;

        if self.identity.admitted().is_none() {
            tracing::info!("no logged-in identity, redirecting to login");
            self.go_to_login();
            return;
        }

        let session = match QuizSession::new(self.bank.snapshot(), self.config.quiz_duration_secs) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("cannot start quiz: {e}");
                self.status_message = Some(e.to_string());
                return;
            }
        };

        self.next_generation += 1;
        let generation = self.next_generation;
        let ticker = self.spawn_ticker(generation);
        tracing::info!(
            generation,
            questions = session.len(),
            duration = self.config.quiz_duration_secs,
            "quiz started"
        );
        self.quiz = Some(ActiveQuiz {
            session,
            generation,
            ticker,
        });
        self.quiz_phase = QuizPhase::Active;
    }

    fn spawn_ticker(&self, generation: u64) -> Option<Ticker> {
        self.tick_tx.clone().map(|tx| {
            Ticker::spawn(TICK_PERIOD, move || tx.send(AppEvent::Tick(generation)).is_ok())
        })
    }

    /// Stop the ticker at 0:00 and start it again once a restart refills the
    /// countdown.
    fn sync_ticker(&mut self) {
        let Some(quiz) = self.quiz.as_ref() else {
            return;
        };
        let generation = quiz.generation;
        if quiz.session.countdown().is_expired() {
            if let Some(quiz) = self.quiz.as_mut()
                && quiz.ticker.take().is_some()
            {
                tracing::debug!(generation, "countdown expired, ticker stopped");
            }
        } else if !quiz.is_ticking() {
            let ticker = self.spawn_ticker(generation);
            if let Some(quiz) = self.quiz.as_mut() {
                quiz.ticker = ticker;
            }
        }
    }

    fn teardown_quiz(&mut self) {
        if let Some(quiz) = self.quiz.take() {
            tracing::debug!(generation = quiz.generation, "tearing down quiz session");
        }
    }

    /// Feed one action through the navigation controller.
    pub fn apply(&mut self, action: QuizAction) {
        if self.quiz_phase != QuizPhase::Active {
            return;
        }
        let policy = self.config.expiry_policy();
        let Some(quiz) = self.quiz.as_mut() else {
            return;
        };
        match navigation::dispatch(&mut quiz.session, action, policy) {
            Transition::Stay => self.sync_ticker(),
            Transition::Submitted(result) => self.finish_quiz(result),
            Transition::ExitToLogin => self.logout(),
        }
    }

    pub fn primary_action(&mut self) {
        if let Some(session) = self.session() {
            let action = navigation::primary_action(session);
            self.apply(action);
        }
    }

    /// Ticks from a session that has since been torn down are dropped.
    pub fn handle_tick(&mut self, generation: u64) {
        if self.quiz.as_ref().map(|q| q.generation) == Some(generation) {
            self.apply(QuizAction::Tick);
        } else {
            tracing::trace!(generation, "dropping stale tick");
        }
    }

    fn finish_quiz(&mut self, result: QuizResult) {
        tracing::info!(
            score = result.score,
            total = result.total,
            time_used = result.time_used_secs,
            "quiz submitted"
        );
        self.teardown_quiz();
        self.quiz_phase = QuizPhase::Submitted;
        self.result = Some(result);
        self.feedback = FeedbackState::default();
        self.show_profile = false;
        self.jump_input = None;
        self.status_message = None;
        self.screen = AppScreen::Result;
    }

    pub fn logout(&mut self) {
        self.teardown_quiz();
        self.quiz_phase = QuizPhase::Loading;
        self.login_notice = None;
        if let Err(e) = self.identity.clear(self.store.as_ref()) {
            tracing::error!("failed to clear stored identity: {e}");
            self.login_notice = Some("Logged out, but the saved login could not be removed".to_string());
        }
        tracing::info!("logged out");
        self.result = None;
        self.show_profile = false;
        self.jump_input = None;
        self.status_message = None;
        self.login_form = Form::login();
        self.screen = AppScreen::Login;
    }

    pub fn toggle_profile(&mut self) {
        self.show_profile = !self.show_profile;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    pub fn open_jump(&mut self) {
        if self.quiz_phase == QuizPhase::Active {
            self.jump_input = Some(LineInput::new("").with_max_chars(4));
        }
    }

    /// Parse the 1-based question number typed into the jump prompt.
    pub fn confirm_jump(&mut self) {
        let Some(input) = self.jump_input.take() else {
            return;
        };
        let len = self.session().map_or(0, QuizSession::len);
        match input.value().trim().parse::<usize>() {
            Ok(n) if (1..=len).contains(&n) => {
                self.status_message = None;
                self.apply(QuizAction::JumpTo(n - 1));
            }
            _ => {
                self.status_message = Some(format!("Enter a question number from 1 to {len}"));
            }
        }
    }

    // --- Result screen ---

    /// Guard for the result screen; without an identity it redirects to login.
    pub fn ensure_result_access(&mut self) -> bool {
        if self.identity.admitted().is_none() {
            self.go_to_login();
            return false;
        }
        true
    }

    pub fn back_to_home(&mut self) {
        self.open_quiz();
    }

    pub fn set_rating(&mut self, rating: u8) {
        if (1..=5).contains(&rating) {
            self.feedback.rating = Some(rating);
            self.feedback.sent = false;
        }
    }

    pub fn start_comment(&mut self) {
        self.feedback.editing_comment = true;
    }

    pub fn submit_feedback(&mut self) {
        let (Some(result), Some(identity)) = (self.result.as_ref(), self.identity.admitted()) else {
            return;
        };
        let Some(rating) = self.feedback.rating else {
            self.status_message = Some("Pick a rating from 1 to 5 first".to_string());
            return;
        };
        let entry = FeedbackEntry {
            user_id: identity.id.clone(),
            rating,
            comment: self
                .feedback
                .comment
                .value()
                .chars()
                .take(MAX_COMMENT_CHARS)
                .collect(),
            score: result.score,
            total: result.total,
            submitted_at: Utc::now(),
        };

        let Some(ref store) = self.store else {
            tracing::warn!("feedback dropped, no data directory");
            self.status_message =
                Some("Feedback cannot be saved without a data directory".to_string());
            return;
        };
        match store.append_feedback(entry) {
            Ok(()) => {
                tracing::info!(rating, "feedback recorded");
                self.feedback.sent = true;
                self.feedback.editing_comment = false;
                self.status_message = Some("Successfully sent".to_string());
            }
            Err(e) => {
                tracing::error!("failed to store feedback: {e}");
                self.status_message = Some("Could not save feedback".to_string());
            }
        }
    }
}
