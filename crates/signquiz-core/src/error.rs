//! Catalog error types.
//!
//! Malformed quiz content is reported when a catalog is built, never while an
//! attempt is being scored. Invalid controller transitions are not errors at
//! all; they are refused as no-ops.

use thiserror::Error;

use crate::model::{OptionId, QuestionNumber};

/// A defect in a single quiz definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    /// The quiz has no questions.
    #[error("quiz has no questions")]
    NoQuestions,

    /// Two questions share a question number.
    #[error("duplicate question number {q_no}")]
    DuplicateQuestionNumber { q_no: QuestionNumber },

    /// A question offers nothing to choose from.
    #[error("question {q_no} has no options")]
    NoOptions { q_no: QuestionNumber },

    /// Two options of one question share an id.
    #[error("question {q_no} has duplicate option id {option_id}")]
    DuplicateOptionId {
        q_no: QuestionNumber,
        option_id: OptionId,
    },

    /// The answer key names an option the question does not offer, so the
    /// question could never be answered correctly.
    #[error("question {q_no}: correct_id {correct_id} matches none of its options")]
    CorrectIdNotInOptions {
        q_no: QuestionNumber,
        correct_id: OptionId,
    },
}

/// Errors raised by [`crate::catalog::Catalog`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A catalog needs at least one quiz to start an attempt on.
    #[error("catalog contains no quizzes")]
    Empty,

    /// Two quizzes share an id.
    #[error("duplicate quiz id: {0}")]
    DuplicateQuizId(String),

    /// A quiz failed an integrity check.
    #[error("quiz '{quiz_id}' is malformed: {source}")]
    Integrity {
        quiz_id: String,
        #[source]
        source: IntegrityError,
    },

    /// Index outside `0..count`.
    #[error("quiz index {index} out of range (catalog has {count} quizzes)")]
    OutOfRange { index: usize, count: usize },
}
