//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const SAMPLE_CATALOG: &str = "../../catalogs/sign-basics.toml";

fn signquiz() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("signquiz").unwrap();
    cmd.env_remove("SIGNQUIZ_CATALOG")
        .env_remove("SIGNQUIZ_MEDIA_BASE");
    cmd
}

const UNWINNABLE: &str = r#"
[[quizzes]]
id = "broken"
title = "Broken"
type = "sign_mcq"

[[quizzes.questions]]
q_no = 1
question_image = "/glosses/Z.jpg"
correct_id = 103
options = [{ id = 101, name = "Q" }, { id = 102, name = "R" }]
"#;

#[test]
fn validate_sample_catalog() {
    signquiz()
        .arg("validate")
        .arg("--catalog")
        .arg(SAMPLE_CATALOG)
        .assert()
        .success()
        .stdout(predicate::str::contains("Beginner Numbers 1 [image_mcq, easy] (2 questions)"))
        .stdout(predicate::str::contains("Identify the sign (demo)"))
        .stdout(predicate::str::contains("All quizzes valid"));
}

#[test]
fn validate_directory() {
    signquiz()
        .arg("validate")
        .arg("--catalog")
        .arg("../../catalogs")
        .assert()
        .success()
        .stdout(predicate::str::contains("Beginner Numbers 1"));
}

#[test]
fn validate_reports_integrity_errors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, UNWINNABLE).unwrap();

    signquiz()
        .arg("validate")
        .arg("--catalog")
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "[broken] ERROR: question 1: correct_id 103 matches none of its options",
        ))
        .stderr(predicate::str::contains("1 integrity error(s) found"));
}

#[test]
fn validate_nonexistent_file() {
    signquiz()
        .arg("validate")
        .arg("--catalog")
        .arg("nonexistent.toml")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn list_sample_catalog() {
    signquiz()
        .arg("list")
        .arg("--catalog")
        .arg(SAMPLE_CATALOG)
        .assert()
        .success()
        .stdout(predicate::str::contains("Beginner Numbers 1"))
        .stdout(predicate::str::contains("sign_mcq"))
        .stdout(predicate::str::contains("2 quizzes"));
}

#[test]
fn play_refuses_malformed_catalog() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, UNWINNABLE).unwrap();

    signquiz()
        .arg("play")
        .arg("--catalog")
        .arg(&path)
        .write_stdin("q\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("quiz 'broken' is malformed"));
}

#[test]
fn play_passing_attempt() {
    signquiz()
        .arg("play")
        .arg("--catalog")
        .arg(SAMPLE_CATALOG)
        .write_stdin("d\nn\na\nn\nn\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Q1/2 | Quiz 1/2 | 50%"))
        .stdout(predicate::str::contains("1/2 correct"))
        .stdout(predicate::str::contains("Next quiz unlocked."))
        .stdout(predicate::str::contains("Q1/2 | Quiz 2/2 | 50%"));
}

#[test]
fn play_failing_attempt_then_retry() {
    signquiz()
        .arg("play")
        .arg("--catalog")
        .arg(SAMPLE_CATALOG)
        .write_stdin("a\nn\nn\nn\nr\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("0/2 correct"))
        .stdout(predicate::str::contains(
            "Score at least 1 correct to unlock the next quiz.",
        ))
        .stdout(predicate::str::contains("Quiz 2/2").not())
        .stdout(predicate::str::ends_with("Bye.\n"));
}

#[test]
fn play_json_report() {
    signquiz()
        .arg("play")
        .arg("--catalog")
        .arg(SAMPLE_CATALOG)
        .arg("--json")
        .write_stdin("a\nn\nn\nq\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"session_id\""))
        .stdout(predicate::str::contains("\"passed\": false"));
}

#[test]
fn play_uses_config_media_convention() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("signquiz.toml");
    std::fs::write(
        &config,
        "[media]\nbase_path = \"https://cdn.example/signs\"\nextension = \"png\"\n",
    )
    .unwrap();

    signquiz()
        .arg("play")
        .arg("--catalog")
        .arg(SAMPLE_CATALOG)
        .arg("--config")
        .arg(&config)
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("(https://cdn.example/signs/8.png)"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    signquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created signquiz.toml"))
        .stdout(predicate::str::contains("Created catalogs/example.toml"));

    assert!(dir.path().join("signquiz.toml").exists());
    assert!(dir.path().join("catalogs/example.toml").exists());

    // The generated config and catalog are usable as-is.
    signquiz()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Numbers warm-up"))
        .stdout(predicate::str::contains("Letters warm-up"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    signquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    signquiz()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn help_output() {
    signquiz()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sign-language quiz runner"));
}
