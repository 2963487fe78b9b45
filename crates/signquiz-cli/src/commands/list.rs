//! The `signquiz list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use signquiz_core::gate::required_correct;

use crate::config::load_config_from;

pub fn execute(catalog_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let catalog = config.load_catalog(catalog_path.as_deref())?;

    let mut table = Table::new();
    table.set_header(vec![
        "#",
        "Title",
        "Type",
        "Difficulty",
        "Questions",
        "To unlock next",
        "Id",
    ]);

    for (index, quiz) in catalog.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&quiz.title),
            Cell::new(quiz.kind()),
            Cell::new(quiz.difficulty),
            Cell::new(quiz.len()),
            Cell::new(format!("{}/{}", required_correct(quiz.len()), quiz.len())),
            Cell::new(&quiz.id),
        ]);
    }

    println!("{table}");
    println!("{} quizzes", catalog.count());
    Ok(())
}
