//! Results of a completed attempt, in a shape other collaborators can consume.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::gate;
use crate::model::{Difficulty, Quiz, QuizKind};
use crate::scoring::ResultTally;

/// A finished attempt on one quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptReport {
    /// Controller session the attempt belongs to.
    pub session_id: Uuid,
    pub quiz_id: String,
    pub quiz_title: String,
    pub difficulty: Difficulty,
    pub kind: QuizKind,
    pub tally: ResultTally,
    /// Correct answers the gate asks for.
    pub required_correct: usize,
    /// Whether the gate passed.
    pub passed: bool,
    pub completed_at: DateTime<Utc>,
}

impl AttemptReport {
    pub fn new(session_id: Uuid, quiz: &Quiz, tally: ResultTally) -> Self {
        Self {
            session_id,
            quiz_id: quiz.id.clone(),
            quiz_title: quiz.title.clone(),
            difficulty: quiz.difficulty,
            kind: quiz.kind(),
            tally,
            required_correct: gate::required_correct(tally.total),
            passed: gate::can_advance(&tally),
            completed_at: Utc::now(),
        }
    }

    /// Percentage of questions answered correctly.
    pub fn score_pct(&self) -> f64 {
        if self.tally.total == 0 {
            return 0.0;
        }
        self.tally.correct as f64 / self.tally.total as f64 * 100.0
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize attempt report")
    }
}
