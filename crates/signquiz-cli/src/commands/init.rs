//! The `signquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("signquiz.toml").exists() {
        println!("signquiz.toml already exists, skipping.");
    } else {
        std::fs::write("signquiz.toml", SAMPLE_CONFIG)?;
        println!("Created signquiz.toml");
    }

    std::fs::create_dir_all("catalogs")?;
    let example_path = std::path::Path::new("catalogs/example.toml");
    if example_path.exists() {
        println!("catalogs/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_CATALOG)?;
        println!("Created catalogs/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Add quizzes to catalogs/ (files load in path order)");
    println!("  2. Run: signquiz validate --catalog catalogs");
    println!("  3. Run: signquiz play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# signquiz configuration

# Catalog file or directory.
catalog = "./catalogs"

# Options without an image_url resolve to {base_path}/{id}.{extension}.
[media]
base_path = "/glosses"
extension = "jpg"
"#;

const EXAMPLE_CATALOG: &str = r#"[[quizzes]]
id = "example-numbers"
title = "Numbers warm-up"
description = "Pick the sign for each number"
difficulty = "easy"
type = "image_mcq"

[[quizzes.questions]]
q_no = 1
q_text = "Identify the correct sign for '3'"
correct_id = 3
options = [
    { id = 1, name = "1" },
    { id = 3, name = "3" },
    { id = 4, name = "4" },
]

[[quizzes.questions]]
q_no = 2
q_text = "Identify the correct sign for '4'"
correct_id = 4
options = [
    { id = 4, name = "4" },
    { id = 2, name = "2" },
    { id = 5, name = "5" },
]

[[quizzes]]
id = "example-letters"
title = "Letters warm-up"
description = "Name the letter being signed"
difficulty = "medium"
type = "sign_mcq"

[[quizzes.questions]]
q_no = 1
question_image = "/glosses/A.jpg"
correct_id = 201
options = [
    { id = 201, name = "A" },
    { id = 202, name = "S" },
    { id = 203, name = "E" },
]
"#;
