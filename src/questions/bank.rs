use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Embed)]
#[folder = "assets/questions/"]
struct QuestionAssets;

const DEFAULT_BANK: &str = "default.toml";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub options: Vec<String>,
    pub correct_option: usize,
}

impl Question {
    pub fn is_correct(&self, option: usize) -> bool {
        self.correct_option == option
    }
}

#[derive(Debug, Error)]
pub enum QuestionError {
    #[error("failed to read question file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse question bank: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("bundled question bank is missing")]
    MissingBundle,

    #[error("question bank is empty")]
    Empty,

    #[error("question {id} has empty text")]
    EmptyText { id: u32 },

    #[error("question {id} needs at least two options, found {found}")]
    TooFewOptions { id: u32, found: usize },

    #[error("question {id} marks option {index} correct but only has {options} options")]
    BadAnswerIndex { id: u32, index: usize, options: usize },

    #[error("duplicate question id {0}")]
    DuplicateId(u32),
}

/// Ordered, validated, read-only list of questions.
#[derive(Clone, Debug, Deserialize)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Load the bank compiled into the binary.
    pub fn bundled() -> Result<Self, QuestionError> {
        let file = QuestionAssets::get(DEFAULT_BANK).ok_or(QuestionError::MissingBundle)?;
        let content =
            std::str::from_utf8(file.data.as_ref()).map_err(|_| QuestionError::MissingBundle)?;
        Self::from_toml(content)
    }

    pub fn from_file(path: &Path) -> Result<Self, QuestionError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, QuestionError> {
        let bank: QuestionBank = toml::from_str(content)?;
        bank.validate()?;
        Ok(bank)
    }

    pub fn from_questions(questions: Vec<Question>) -> Result<Self, QuestionError> {
        let bank = Self { questions };
        bank.validate()?;
        Ok(bank)
    }

    fn validate(&self) -> Result<(), QuestionError> {
        if self.questions.is_empty() {
            return Err(QuestionError::Empty);
        }
        let mut seen = HashSet::new();
        for q in &self.questions {
            if !seen.insert(q.id) {
                return Err(QuestionError::DuplicateId(q.id));
            }
            if q.text.trim().is_empty() {
                return Err(QuestionError::EmptyText { id: q.id });
            }
            if q.options.len() < 2 {
                return Err(QuestionError::TooFewOptions {
                    id: q.id,
                    found: q.options.len(),
                });
            }
            if q.correct_option >= q.options.len() {
                return Err(QuestionError::BadAnswerIndex {
                    id: q.id,
                    index: q.correct_option,
                    options: q.options.len(),
                });
            }
        }
        Ok(())
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

    /// Copy of the question list handed to a new session.
    pub fn snapshot(&self) -> Vec<Question> {
        self.questions.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_bank_loads() {
        let bank = QuestionBank::bundled().unwrap();
        assert!(bank.len() >= 10);
        for q in bank.questions() {
            assert!(q.correct_option < q.options.len());
        }
    }

    #[test]
    fn test_parse_minimal_bank() {
        let toml_str = r#"
[[questions]]
id = 7
text = "2 + 2?"
options = ["3", "4"]
correct_option = 1
"#;
        let bank = QuestionBank::from_toml(toml_str).unwrap();
        assert_eq!(bank.len(), 1);
        assert!(bank.questions()[0].is_correct(1));
        assert!(!bank.questions()[0].is_correct(0));
    }

    #[test]
    fn test_empty_bank_rejected() {
        let err = QuestionBank::from_toml("questions = []").unwrap_err();
        assert!(matches!(err, QuestionError::Empty));
    }

    #[test]
    fn test_answer_index_out_of_range_rejected() {
        let toml_str = r#"
[[questions]]
id = 1
text = "Pick one"
options = ["a", "b"]
correct_option = 2
"#;
        let err = QuestionBank::from_toml(toml_str).unwrap_err();
        assert!(matches!(
            err,
            QuestionError::BadAnswerIndex { id: 1, index: 2, options: 2 }
        ));
    }

    #[test]
    fn test_single_option_rejected() {
        let err = QuestionBank::from_questions(vec![Question {
            id: 3,
            text: "Only one".to_string(),
            options: vec!["a".to_string()],
            correct_option: 0,
        }])
        .unwrap_err();
        assert!(matches!(err, QuestionError::TooFewOptions { id: 3, found: 1 }));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let q = Question {
            id: 5,
            text: "Dup".to_string(),
            options: vec!["a".to_string(), "b".to_string()],
            correct_option: 0,
        };
        let err = QuestionBank::from_questions(vec![q.clone(), q]).unwrap_err();
        assert!(matches!(err, QuestionError::DuplicateId(5)));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = QuestionBank::from_toml("[[questions]]\nid = \"x\"").unwrap_err();
        assert!(matches!(err, QuestionError::Parse(_)));
    }
}
