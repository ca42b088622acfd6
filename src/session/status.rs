use std::collections::{BTreeMap, BTreeSet};

/// Display status of a question in the navigator grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuestionStatus {
    Current,
    Answered,
    Visited,
    Upcoming,
}

impl QuestionStatus {
    pub fn label(self) -> &'static str {
        match self {
            QuestionStatus::Current => "Current",
            QuestionStatus::Answered => "Answered",
            QuestionStatus::Visited => "Visited",
            QuestionStatus::Upcoming => "Upcoming",
        }
    }
}

pub fn status_of(
    index: usize,
    current: usize,
    answers: &BTreeMap<usize, usize>,
    visited: &BTreeSet<usize>,
) -> QuestionStatus {
    if index == current {
        QuestionStatus::Current
    } else if answers.contains_key(&index) {
        QuestionStatus::Answered
    } else if visited.contains(&index) {
        QuestionStatus::Visited
    } else {
        QuestionStatus::Upcoming
    }
}

pub fn statuses(
    len: usize,
    current: usize,
    answers: &BTreeMap<usize, usize>,
    visited: &BTreeSet<usize>,
) -> Vec<QuestionStatus> {
    (0..len)
        .map(|i| status_of(i, current, answers, visited))
        .collect()
}

/// Position-based progress shown above the question card, in percent.
pub fn progress_percent(current: usize, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    (current + 1) as f64 / len as f64 * 100.0
}
