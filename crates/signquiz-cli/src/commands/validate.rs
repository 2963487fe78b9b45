//! The `signquiz validate` command.

use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;

use signquiz_core::catalog::validate_quiz;
use signquiz_core::error::CatalogError;
use signquiz_core::parser;

pub fn execute(catalog_path: PathBuf) -> Result<()> {
    let quizzes = parser::load_quizzes(&catalog_path)?;

    let mut total_errors = 0;
    let mut seen_ids = HashSet::new();

    for quiz in &quizzes {
        println!(
            "Quiz: {} [{}, {}] ({} questions)",
            quiz.title,
            quiz.kind(),
            quiz.difficulty,
            quiz.len()
        );

        if !seen_ids.insert(quiz.id.as_str()) {
            println!("  [{}] ERROR: duplicate quiz id", quiz.id);
            total_errors += 1;
        }

        let errors = validate_quiz(quiz);
        for e in &errors {
            println!("  [{}] ERROR: {e}", quiz.id);
        }
        total_errors += errors.len();
    }

    if quizzes.is_empty() {
        return Err(CatalogError::Empty.into());
    }

    if total_errors > 0 {
        anyhow::bail!("{total_errors} integrity error(s) found");
    }

    println!("All quizzes valid.");
    Ok(())
}
