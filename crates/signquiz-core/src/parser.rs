//! Catalog file parser.
//!
//! Loads quizzes from TOML or JSON files and directories. Parsing only
//! checks shape; integrity checks run when the quizzes become a [`Catalog`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::catalog::Catalog;
use crate::media::ImageResolver;
use crate::model::{
    Difficulty, ImageChoiceQuestion, ImageOption, OptionId, QuestionNumber, Questions, Quiz,
    QuizKind, SignChoiceQuestion, SignOption,
};

/// Intermediate structure for catalog files.
#[derive(Debug, Deserialize)]
struct RawCatalogFile {
    #[serde(default)]
    quizzes: Vec<RawQuiz>,
}

#[derive(Debug, Deserialize)]
struct RawQuiz {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default = "default_difficulty_str")]
    difficulty: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    questions: Vec<RawQuestion>,
}

fn default_difficulty_str() -> String {
    "easy".to_string()
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    q_no: QuestionNumber,
    #[serde(default)]
    q_text: Option<String>,
    #[serde(default)]
    question_image: Option<String>,
    correct_id: OptionId,
    #[serde(default)]
    options: Vec<RawOption>,
}

#[derive(Debug, Deserialize)]
struct RawOption {
    id: OptionId,
    name: String,
    #[serde(default)]
    image_url: Option<String>,
}

/// Parse a single `.toml` or `.json` catalog file.
pub fn parse_quiz_file(path: &Path) -> Result<Vec<Quiz>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog file: {}", path.display()))?;

    parse_quizzes_str(&content, path)
}

/// Parse catalog content. The format follows `source_path`'s extension:
/// `.json` is JSON, anything else TOML.
pub fn parse_quizzes_str(content: &str, source_path: &Path) -> Result<Vec<Quiz>> {
    let parsed: RawCatalogFile = if is_json(source_path) {
        serde_json::from_str(content)
            .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?
    } else {
        toml::from_str(content)
            .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?
    };

    parsed
        .quizzes
        .into_iter()
        .map(convert_quiz)
        .collect::<Result<Vec<_>>>()
        .with_context(|| format!("invalid catalog: {}", source_path.display()))
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

fn is_catalog_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "toml" || ext == "json")
}

fn convert_quiz(raw: RawQuiz) -> Result<Quiz> {
    let difficulty: Difficulty = raw
        .difficulty
        .parse()
        .map_err(|e: String| anyhow::anyhow!("quiz '{}': {}", raw.id, e))?;
    let kind: QuizKind = raw
        .kind
        .parse()
        .map_err(|e: String| anyhow::anyhow!("quiz '{}': {}", raw.id, e))?;

    let questions = match kind {
        QuizKind::ImageChoice => Questions::ImageChoice(
            raw.questions
                .into_iter()
                .map(|q| image_question(&raw.id, q))
                .collect::<Result<Vec<_>>>()?,
        ),
        QuizKind::SignChoice => Questions::SignChoice(
            raw.questions
                .into_iter()
                .map(|q| sign_question(&raw.id, q))
                .collect::<Result<Vec<_>>>()?,
        ),
    };

    Ok(Quiz {
        id: raw.id,
        title: raw.title,
        description: raw.description,
        difficulty,
        questions,
    })
}

fn image_question(quiz_id: &str, q: RawQuestion) -> Result<ImageChoiceQuestion> {
    let q_text = q.q_text.with_context(|| {
        format!("quiz '{quiz_id}' question {}: image_mcq questions need q_text", q.q_no)
    })?;
    if q.question_image.is_some() {
        tracing::warn!(
            "quiz '{quiz_id}' question {}: question_image is ignored on image_mcq questions",
            q.q_no
        );
    }

    Ok(ImageChoiceQuestion {
        q_no: q.q_no,
        q_text,
        correct_id: q.correct_id,
        options: q
            .options
            .into_iter()
            .map(|o| ImageOption {
                id: o.id,
                name: o.name,
                image_url: o.image_url,
            })
            .collect(),
    })
}

fn sign_question(quiz_id: &str, q: RawQuestion) -> Result<SignChoiceQuestion> {
    let question_image = q.question_image.with_context(|| {
        format!(
            "quiz '{quiz_id}' question {}: sign_mcq questions need question_image",
            q.q_no
        )
    })?;
    if q.q_text.is_some() {
        tracing::warn!(
            "quiz '{quiz_id}' question {}: q_text is ignored on sign_mcq questions",
            q.q_no
        );
    }

    let options = q
        .options
        .into_iter()
        .map(|o| {
            if o.image_url.is_some() {
                tracing::warn!(
                    "quiz '{quiz_id}' question {} option {}: image_url is ignored on sign_mcq options",
                    q.q_no,
                    o.id
                );
            }
            SignOption {
                id: o.id,
                name: o.name,
            }
        })
        .collect();

    Ok(SignChoiceQuestion {
        q_no: q.q_no,
        question_image,
        correct_id: q.correct_id,
        options,
    })
}

/// Recursively load every catalog file under `dir`, in path order.
///
/// Any file that fails to parse fails the whole load: skipping it would
/// silently renumber the quizzes after it.
pub fn load_quiz_directory(dir: &Path) -> Result<Vec<Quiz>> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut files = Vec::new();
    collect_catalog_files(dir, &mut files)?;
    files.sort();

    let mut quizzes = Vec::new();
    for path in &files {
        quizzes.extend(parse_quiz_file(path)?);
    }
    Ok(quizzes)
}

fn collect_catalog_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_dir() {
            collect_catalog_files(&path, files)?;
        } else if is_catalog_file(&path) {
            files.push(path);
        }
    }
    Ok(())
}

/// Load quizzes from a file or directory.
pub fn load_quizzes(path: &Path) -> Result<Vec<Quiz>> {
    if path.is_dir() {
        load_quiz_directory(path)
    } else {
        parse_quiz_file(path)
    }
}

/// Load quizzes from a file or directory and build a validated catalog.
pub fn load_catalog(path: &Path, resolver: Arc<dyn ImageResolver>) -> Result<Catalog> {
    let quizzes = load_quizzes(path)?;
    let catalog = Catalog::with_resolver(quizzes, resolver)
        .with_context(|| format!("invalid catalog: {}", path.display()))?;
    tracing::info!(
        "loaded {} quizzes from {}",
        catalog.count(),
        path.display()
    );
    Ok(catalog)
}
