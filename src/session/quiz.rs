use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use crate::questions::Question;
use crate::session::status::{self, QuestionStatus};
use crate::session::timer::Countdown;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("cannot start a quiz without questions")]
    NoQuestions,
}

/// State of one in-progress quiz attempt.
///
/// `current` is always a valid index and always a member of `visited`;
/// `answers` only holds keys for existing questions.
#[derive(Clone, Debug)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    answers: BTreeMap<usize, usize>,
    visited: BTreeSet<usize>,
    bookmarked: bool,
    countdown: Countdown,
}

impl QuizSession {
    pub fn new(questions: Vec<Question>, duration_secs: u32) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }
        Ok(Self {
            questions,
            current: 0,
            answers: BTreeMap::new(),
            visited: BTreeSet::from([0]),
            bookmarked: false,
            countdown: Countdown::new(duration_secs),
        })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> &Question {
        &self.questions[self.current]
    }

    pub fn answers(&self) -> &BTreeMap<usize, usize> {
        &self.answers
    }

    pub fn visited(&self) -> &BTreeSet<usize> {
        &self.visited
    }

    pub fn is_bookmarked(&self) -> bool {
        self.bookmarked
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn remaining_secs(&self) -> u32 {
        self.countdown.remaining_secs()
    }

    /// Option shown as selected for the displayed question.
    pub fn selected_answer(&self) -> Option<usize> {
        self.answers.get(&self.current).copied()
    }

    pub fn is_first_question(&self) -> bool {
        self.current == 0
    }

    pub fn is_last_question(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn select_answer(&mut self, option: usize) {
        if option >= self.current_question().options.len() {
            tracing::debug!(option, index = self.current, "ignoring out-of-range option");
            return;
        }
        self.answers.insert(self.current, option);
    }

    pub fn go_next(&mut self) -> bool {
        if self.is_last_question() {
            return false;
        }
        self.move_to(self.current + 1);
        true
    }

    pub fn go_previous(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.move_to(self.current - 1);
        true
    }

    /// Jump straight to `index`, as the question grid does. Out-of-range
    /// indices are ignored.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index >= self.questions.len() {
            tracing::debug!(index, len = self.questions.len(), "ignoring out-of-range jump");
            return false;
        }
        self.move_to(index);
        true
    }

    fn move_to(&mut self, index: usize) {
        self.current = index;
        self.bookmarked = false;
        self.visited.insert(index);
    }

    pub fn toggle_bookmark(&mut self) {
        self.bookmarked = !self.bookmarked;
    }

    /// Advance the countdown by one second. Returns true on the tick that
    /// reaches zero.
    pub fn tick(&mut self) -> bool {
        self.countdown.tick()
    }

    pub fn restart(&mut self) {
        self.current = 0;
        self.answers.clear();
        self.visited.clear();
        self.visited.insert(0);
        self.bookmarked = false;
        self.countdown.reset();
    }

    pub fn status(&self, index: usize) -> QuestionStatus {
        status::status_of(index, self.current, &self.answers, &self.visited)
    }

    pub fn statuses(&self) -> Vec<QuestionStatus> {
        status::statuses(
            self.questions.len(),
            self.current,
            &self.answers,
            &self.visited,
        )
    }

    pub fn progress_percent(&self) -> f64 {
        status::progress_percent(self.current, self.questions.len())
    }
}
