use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::questions::Question;
use crate::session::quiz::QuizSession;

/// Number of questions whose recorded answer matches the key. Unanswered
/// questions count as incorrect.
pub fn score(questions: &[Question], answers: &BTreeMap<usize, usize>) -> usize {
    questions
        .iter()
        .enumerate()
        .filter(|(i, q)| answers.get(i).is_some_and(|&a| q.is_correct(a)))
        .count()
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub answered: usize,
    pub time_used_secs: u32,
    pub completed_at: DateTime<Utc>,
}

impl QuizResult {
    pub fn from_session(session: &QuizSession) -> Self {
        Self {
            score: score(session.questions(), session.answers()),
            total: session.len(),
            answered: session.answered_count(),
            time_used_secs: session.countdown().elapsed_secs(),
            completed_at: Utc::now(),
        }
    }

    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.score as f64 / self.total as f64 * 100.0
    }

    pub fn unanswered(&self) -> usize {
        self.total - self.answered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed(correct: &[usize]) -> Vec<Question> {
        correct
            .iter()
            .enumerate()
            .map(|(i, &c)| Question {
                id: i as u32 + 1,
                text: format!("Q{i}"),
                options: vec!["a".into(), "b".into(), "c".into()],
                correct_option: c,
            })
            .collect()
    }

    #[test]
    fn test_score_counts_matches_only() {
        let questions = keyed(&[1, 0, 0]);
        let answers = BTreeMap::from([(0, 1), (2, 0)]);
        assert_eq!(score(&questions, &answers), 2);
    }

    #[test]
    fn test_score_with_no_answers_is_zero() {
        let questions = keyed(&[1, 2]);
        assert_eq!(score(&questions, &BTreeMap::new()), 0);
    }

    #[test]
    fn test_score_is_independent_of_entry_order() {
        let questions = keyed(&[2, 1, 0, 1]);
        let mut forward = QuizSession::new(questions.clone(), 60).unwrap();
        for (i, a) in [2, 0, 0, 1].into_iter().enumerate() {
            forward.jump_to(i);
            forward.select_answer(a);
        }
        let mut backward = QuizSession::new(questions, 60).unwrap();
        for (i, a) in [2, 0, 0, 1].into_iter().enumerate().rev() {
            backward.jump_to(i);
            backward.select_answer(a);
        }
        let a = QuizResult::from_session(&forward);
        let b = QuizResult::from_session(&backward);
        assert_eq!(a.score, 3);
        assert_eq!(a.score, b.score);
        assert_eq!(a.total, 4);
    }

    #[test]
    fn test_result_from_session() {
        let mut session = QuizSession::new(keyed(&[0, 1, 2]), 100).unwrap();
        session.select_answer(0);
        session.tick();
        session.tick();
        let result = QuizResult::from_session(&session);
        assert_eq!(result.score, 1);
        assert_eq!(result.total, 3);
        assert_eq!(result.answered, 1);
        assert_eq!(result.unanswered(), 2);
        assert_eq!(result.time_used_secs, 2);
        assert!((result.percent() - 100.0 / 3.0).abs() < 1e-9);
    }
}
