//! Attempt scoring.
//!
//! The tally is derived state: it is recomputed from the answer record on
//! every read and never stored.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{OptionId, QuestionNumber, Quiz};

/// Selections made during one attempt, keyed by question number.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnswerRecord {
    entries: BTreeMap<QuestionNumber, Option<OptionId>>,
}

impl AnswerRecord {
    /// A record with every question of `quiz` present and unanswered.
    pub fn for_quiz(quiz: &Quiz) -> Self {
        Self {
            entries: quiz.questions().map(|q| (q.number(), None)).collect(),
        }
    }

    /// The selected option, or `None` when unanswered or unknown.
    pub fn get(&self, q_no: QuestionNumber) -> Option<OptionId> {
        self.entries.get(&q_no).copied().flatten()
    }

    pub fn contains(&self, q_no: QuestionNumber) -> bool {
        self.entries.contains_key(&q_no)
    }

    /// Overwrite the selection for an existing key. Unknown keys are ignored
    /// and `false` is returned.
    pub fn select(&mut self, q_no: QuestionNumber, option_id: OptionId) -> bool {
        match self.entries.get_mut(&q_no) {
            Some(slot) => {
                *slot = Some(option_id);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn answered(&self) -> usize {
        self.entries.values().filter(|v| v.is_some()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (QuestionNumber, Option<OptionId>)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }
}

/// Correct/wrong/unanswered summary of an attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResultTally {
    pub correct: usize,
    pub wrong: usize,
    pub unanswered: usize,
    pub total: usize,
}

/// Score `answers` against `quiz`.
///
/// Questions missing from the record count as unanswered.
pub fn score(quiz: &Quiz, answers: &AnswerRecord) -> ResultTally {
    let mut tally = ResultTally {
        total: quiz.len(),
        ..ResultTally::default()
    };

    for question in quiz.questions() {
        match answers.get(question.number()) {
            None => tally.unanswered += 1,
            Some(selected) if selected == question.correct_id() => tally.correct += 1,
            Some(_) => tally.wrong += 1,
        }
    }

    tally
}
