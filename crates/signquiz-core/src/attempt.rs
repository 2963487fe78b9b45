//! The attempt controller: a cyclic Active <-> Completed state machine over
//! an immutable catalog.
//!
//! Every action is total. An action that does not apply in the current state
//! (a stale click from a presentation layer that raced ahead) is refused
//! without touching state, and the method returns `false`.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::gate;
use crate::model::{OptionId, QuestionNumber, QuestionRef, Quiz};
use crate::report::AttemptReport;
use crate::scoring::{self, AnswerRecord, ResultTally};

/// Whether the current quiz is being answered or its results are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Active,
    Completed,
}

/// A user action forwarded by a presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Select {
        question: QuestionNumber,
        option: OptionId,
    },
    Advance,
    Retreat,
    Reset,
    AdvanceQuiz,
}

/// The controller's committed state. Everything else is derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptState {
    pub quiz_index: usize,
    /// Position in the quiz's question list. Left on the last question once
    /// the attempt completes.
    pub question_index: usize,
    pub answers: AnswerRecord,
    pub phase: Phase,
}

/// Read-only snapshot handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttemptView {
    pub quiz_id: String,
    pub quiz_title: String,
    pub quiz_index: usize,
    pub quiz_count: usize,
    pub question_index: usize,
    pub question_count: usize,
    pub progress_pct: u32,
    pub is_last_question: bool,
    pub phase: Phase,
    pub tally: ResultTally,
    pub required_correct: usize,
    pub gate_passed: bool,
    pub has_next_quiz: bool,
    pub can_advance_quiz: bool,
    /// Selection for the question at `question_index`.
    pub current_selection: Option<OptionId>,
}

/// Drives one attempt session through a catalog.
#[derive(Debug)]
pub struct AttemptController {
    catalog: Arc<Catalog>,
    session_id: Uuid,
    state: AttemptState,
}

impl AttemptController {
    /// Start on the first quiz with nothing answered.
    pub fn new(catalog: Arc<Catalog>) -> Self {
        let answers = AnswerRecord::for_quiz(catalog.first());
        let session_id = Uuid::new_v4();
        tracing::debug!(%session_id, quizzes = catalog.count(), "attempt session started");

        Self {
            catalog,
            session_id,
            state: AttemptState {
                quiz_index: 0,
                question_index: 0,
                answers,
                phase: Phase::Active,
            },
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &AttemptState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_completed(&self) -> bool {
        self.state.phase == Phase::Completed
    }

    pub fn quiz(&self) -> &Quiz {
        // quiz_index only ever moves to an index the catalog confirmed.
        self.catalog
            .get(self.state.quiz_index)
            .unwrap_or_else(|_| self.catalog.first())
    }

    /// The question at `question_index`.
    pub fn current_question(&self) -> Option<QuestionRef<'_>> {
        self.quiz().question(self.state.question_index)
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.state.answers
    }

    pub fn tally(&self) -> ResultTally {
        scoring::score(self.quiz(), &self.state.answers)
    }

    /// `round((question_index + 1) / total * 100)`, halves rounded up.
    pub fn progress_pct(&self) -> u32 {
        let total = self.quiz().len();
        if total == 0 {
            return 0;
        }
        let pct = ((self.state.question_index + 1) * 200 + total) / (2 * total);
        u32::try_from(pct).unwrap_or(u32::MAX)
    }

    pub fn is_last_question(&self) -> bool {
        self.state.question_index + 1 >= self.quiz().len()
    }

    pub fn has_next_quiz(&self) -> bool {
        self.catalog.has_next(self.state.quiz_index)
    }

    pub fn gate_passed(&self) -> bool {
        gate::can_advance(&self.tally())
    }

    /// Whether [`advance_quiz`](Self::advance_quiz) would be applied now.
    pub fn can_advance_quiz(&self) -> bool {
        self.is_completed() && self.has_next_quiz() && self.gate_passed()
    }

    /// Record `option` as the answer to question `question`.
    ///
    /// Refused when completed, when the question is not in the current quiz,
    /// or when the option is not one of that question's options.
    pub fn select_option(&mut self, question: QuestionNumber, option: OptionId) -> bool {
        if self.is_completed() {
            tracing::debug!(question, option, "select refused: attempt completed");
            return false;
        }
        let offered = self
            .quiz()
            .question_by_number(question)
            .is_some_and(|q| q.has_option(option));
        if !offered {
            tracing::debug!(question, option, "select refused: not offered by this quiz");
            return false;
        }
        self.state.answers.select(question, option)
    }

    /// Move to the next question, or complete the attempt from the last one.
    pub fn advance(&mut self) -> bool {
        if self.is_completed() {
            return false;
        }
        if self.is_last_question() {
            self.state.phase = Phase::Completed;
            let tally = self.tally();
            tracing::debug!(
                quiz = %self.quiz().id,
                correct = tally.correct,
                total = tally.total,
                "attempt completed"
            );
        } else {
            self.state.question_index += 1;
        }
        true
    }

    /// Move to the previous question. No-op on the first question.
    pub fn retreat(&mut self) -> bool {
        if self.is_completed() || self.state.question_index == 0 {
            return false;
        }
        self.state.question_index -= 1;
        true
    }

    /// Restart the current quiz from its first question with nothing answered.
    pub fn reset(&mut self) -> bool {
        self.restart_at(self.state.quiz_index);
        true
    }

    /// Unlock and start the next quiz. Applied only when completed, a next
    /// quiz exists, and the gate passes for the current tally.
    pub fn advance_quiz(&mut self) -> bool {
        if !self.can_advance_quiz() {
            tracing::debug!(
                quiz_index = self.state.quiz_index,
                completed = self.is_completed(),
                has_next = self.has_next_quiz(),
                "advance_quiz refused"
            );
            return false;
        }
        self.restart_at(self.state.quiz_index + 1);
        true
    }

    /// Dispatch a forwarded action.
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Select { question, option } => self.select_option(question, option),
            Action::Advance => self.advance(),
            Action::Retreat => self.retreat(),
            Action::Reset => self.reset(),
            Action::AdvanceQuiz => self.advance_quiz(),
        }
    }

    pub fn view(&self) -> AttemptView {
        let quiz = self.quiz();
        let tally = self.tally();
        AttemptView {
            quiz_id: quiz.id.clone(),
            quiz_title: quiz.title.clone(),
            quiz_index: self.state.quiz_index,
            quiz_count: self.catalog.count(),
            question_index: self.state.question_index,
            question_count: quiz.len(),
            progress_pct: self.progress_pct(),
            is_last_question: self.is_last_question(),
            phase: self.state.phase,
            tally,
            required_correct: gate::required_correct(tally.total),
            gate_passed: gate::can_advance(&tally),
            has_next_quiz: self.has_next_quiz(),
            can_advance_quiz: self.can_advance_quiz(),
            current_selection: self
                .current_question()
                .and_then(|q| self.state.answers.get(q.number())),
        }
    }

    /// Results of the completed attempt. `None` while still answering.
    pub fn report(&self) -> Option<AttemptReport> {
        self.is_completed()
            .then(|| AttemptReport::new(self.session_id, self.quiz(), self.tally()))
    }

    fn restart_at(&mut self, quiz_index: usize) {
        let answers = match self.catalog.get(quiz_index) {
            Ok(quiz) => AnswerRecord::for_quiz(quiz),
            Err(e) => {
                tracing::warn!("cannot restart attempt: {e}");
                return;
            }
        };
        if quiz_index != self.state.quiz_index {
            tracing::debug!(from = self.state.quiz_index, to = quiz_index, "next quiz unlocked");
        }
        self.state = AttemptState {
            quiz_index,
            question_index: 0,
            answers,
            phase: Phase::Active,
        };
    }
}
