//! End-to-end attempt scenarios over the shipped starter catalog.

use std::path::Path;
use std::sync::Arc;

use signquiz_core::attempt::{AttemptController, Phase};
use signquiz_core::catalog::Catalog;
use signquiz_core::error::CatalogError;
use signquiz_core::parser::parse_quizzes_str;
use signquiz_core::scoring::ResultTally;

const SIGN_BASICS: &str = include_str!("../../../catalogs/sign-basics.toml");

fn catalog() -> Arc<Catalog> {
    let quizzes = parse_quizzes_str(SIGN_BASICS, Path::new("sign-basics.toml")).unwrap();
    Arc::new(Catalog::new(quizzes).unwrap())
}

fn tally(correct: usize, wrong: usize, unanswered: usize, total: usize) -> ResultTally {
    ResultTally {
        correct,
        wrong,
        unanswered,
        total,
    }
}

#[test]
fn scenario_a_pass_unlocks_next_quiz() {
    let mut c = AttemptController::new(catalog());
    assert_eq!(c.quiz().title, "Beginner Numbers 1");

    assert!(c.select_option(1, 6));
    assert!(c.advance());
    assert!(c.select_option(2, 1));
    assert!(c.advance());

    assert_eq!(c.phase(), Phase::Completed);
    assert_eq!(c.tally(), tally(1, 1, 0, 2));
    assert!(c.gate_passed());

    let report = c.report().unwrap();
    assert!(report.passed);
    assert_eq!(report.session_id, c.session_id());

    assert!(c.advance_quiz());
    assert_eq!(c.state().quiz_index, 1);
    assert_eq!(c.phase(), Phase::Active);
    assert_eq!(c.state().question_index, 0);
    assert_eq!(c.tally(), tally(0, 0, 2, 2));
}

#[test]
fn scenario_b_fail_keeps_quiz_locked() {
    let mut c = AttemptController::new(catalog());

    assert!(c.select_option(1, 8));
    c.advance();
    c.advance();

    assert_eq!(c.phase(), Phase::Completed);
    assert_eq!(c.tally(), tally(0, 1, 1, 2));
    assert!(!c.gate_passed());
    assert!(c.has_next_quiz());

    let before = c.state().clone();
    assert!(!c.advance_quiz());
    assert_eq!(c.state(), &before);
    assert_eq!(c.phase(), Phase::Completed);
    assert_eq!(c.state().quiz_index, 0);
    assert!(!c.report().unwrap().passed);
}

#[test]
fn scenario_c_reset_after_failure() {
    let mut c = AttemptController::new(catalog());
    c.select_option(1, 8);
    c.advance();
    c.advance();

    assert!(c.reset());
    assert_eq!(c.phase(), Phase::Active);
    assert_eq!(c.state().question_index, 0);
    assert_eq!(c.answers().get(1), None);
    assert_eq!(c.answers().get(2), None);
    assert_eq!(c.answers().len(), 2);
    assert!(c.report().is_none());
}

#[test]
fn full_run_through_catalog() {
    let mut c = AttemptController::new(catalog());
    c.select_option(1, 6);
    c.select_option(2, 5);
    c.advance();
    c.advance();
    assert!(c.advance_quiz());

    c.select_option(1, 103);
    c.advance();
    c.select_option(2, 102);
    c.advance();
    assert_eq!(c.tally(), tally(2, 0, 0, 2));
    assert!(!c.has_next_quiz());
    assert!(!c.advance_quiz());
    assert_eq!(c.state().quiz_index, 1);
}

#[test]
fn catalog_index_boundary() {
    let catalog = catalog();
    let count = catalog.count();
    assert!(catalog.get(count - 1).is_ok());
    assert_eq!(
        catalog.get(count).unwrap_err(),
        CatalogError::OutOfRange { index: count, count }
    );
}
