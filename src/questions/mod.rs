pub mod bank;

pub use bank::{Question, QuestionBank, QuestionError};
