use crate::session::quiz::QuizSession;
use crate::session::result::QuizResult;

/// Discrete inputs to an active quiz. Timer ticks share this path with user
/// actions so every mutation is serialized through `dispatch`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizAction {
    SelectAnswer(usize),
    Next,
    Previous,
    JumpTo(usize),
    ToggleBookmark,
    Restart,
    Submit,
    Logout,
    Tick,
}

/// What happens when the countdown reaches zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExpiryPolicy {
    /// Leave the session open at 0:00.
    #[default]
    KeepOpen,
    /// Submit immediately.
    AutoSubmit,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    Stay,
    Submitted(QuizResult),
    ExitToLogin,
}

/// The action bound to the primary button: "Next" until the last question,
/// "Submit" on it.
pub fn primary_action(session: &QuizSession) -> QuizAction {
    if session.is_last_question() {
        QuizAction::Submit
    } else {
        QuizAction::Next
    }
}

pub fn dispatch(session: &mut QuizSession, action: QuizAction, policy: ExpiryPolicy) -> Transition {
    match action {
        QuizAction::SelectAnswer(option) => session.select_answer(option),
        QuizAction::Next => {
            session.go_next();
        }
        QuizAction::Previous => {
            session.go_previous();
        }
        QuizAction::JumpTo(index) => {
            session.jump_to(index);
        }
        QuizAction::ToggleBookmark => session.toggle_bookmark(),
        QuizAction::Restart => session.restart(),
        QuizAction::Submit => {
            if !session.is_last_question() {
                return Transition::Stay;
            }
            return Transition::Submitted(QuizResult::from_session(session));
        }
        QuizAction::Logout => return Transition::ExitToLogin,
        QuizAction::Tick => {
            let expired = session.tick();
            if expired && policy == ExpiryPolicy::AutoSubmit {
                tracing::info!("countdown expired, submitting");
                return Transition::Submitted(QuizResult::from_session(session));
            }
        }
    }
    Transition::Stay
}
