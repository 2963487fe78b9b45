//! Core data model types for signquiz.
//!
//! A [`Quiz`] holds either image-choice or sign-choice questions, never a mix.
//! Scoring and the attempt controller only look at the fields both variants
//! share, through [`QuestionRef`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key of a question within its quiz. Not necessarily contiguous or zero-based.
pub type QuestionNumber = u32;

/// Identifier of an answer option within its question.
pub type OptionId = u32;

/// How hard a quiz is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// The question variant a quiz contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuizKind {
    /// Text prompt, pick the matching sign image.
    #[serde(rename = "image_mcq")]
    ImageChoice,
    /// Sign image prompt, pick the matching gloss.
    #[serde(rename = "sign_mcq")]
    SignChoice,
}

impl fmt::Display for QuizKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizKind::ImageChoice => write!(f, "image_mcq"),
            QuizKind::SignChoice => write!(f, "sign_mcq"),
        }
    }
}

impl FromStr for QuizKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image_mcq" | "image" => Ok(QuizKind::ImageChoice),
            "sign_mcq" | "sign" => Ok(QuizKind::SignChoice),
            other => Err(format!("unknown quiz type: {other}")),
        }
    }
}

/// An option of an image-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageOption {
    pub id: OptionId,
    /// Display name (the gloss).
    pub name: String,
    /// Explicit image reference. When absent, the catalog's resolver derives
    /// one from `id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// An option of a sign-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignOption {
    pub id: OptionId,
    pub name: String,
}

/// "Which sign means X?": answered by picking an image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageChoiceQuestion {
    pub q_no: QuestionNumber,
    pub q_text: String,
    pub correct_id: OptionId,
    pub options: Vec<ImageOption>,
}

/// "What does this sign mean?": answered by picking a gloss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignChoiceQuestion {
    pub q_no: QuestionNumber,
    /// Image of the sign being asked about.
    pub question_image: String,
    pub correct_id: OptionId,
    pub options: Vec<SignOption>,
}

/// The questions of a quiz. The variant is the quiz's type tag, so every
/// question in a quiz has the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "items")]
pub enum Questions {
    #[serde(rename = "image_mcq")]
    ImageChoice(Vec<ImageChoiceQuestion>),
    #[serde(rename = "sign_mcq")]
    SignChoice(Vec<SignChoiceQuestion>),
}

/// A single quiz in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    /// Stable unique identifier.
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub difficulty: Difficulty,
    pub questions: Questions,
}

impl Quiz {
    pub fn kind(&self) -> QuizKind {
        match &self.questions {
            Questions::ImageChoice(_) => QuizKind::ImageChoice,
            Questions::SignChoice(_) => QuizKind::SignChoice,
        }
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        match &self.questions {
            Questions::ImageChoice(qs) => qs.len(),
            Questions::SignChoice(qs) => qs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The question at position `index` (zero-based, not the question number).
    pub fn question(&self, index: usize) -> Option<QuestionRef<'_>> {
        match &self.questions {
            Questions::ImageChoice(qs) => qs.get(index).map(QuestionRef::ImageChoice),
            Questions::SignChoice(qs) => qs.get(index).map(QuestionRef::SignChoice),
        }
    }

    /// Look a question up by its number.
    pub fn question_by_number(&self, number: QuestionNumber) -> Option<QuestionRef<'_>> {
        self.questions().find(|q| q.number() == number)
    }

    /// Iterate over the questions in order.
    pub fn questions(&self) -> impl Iterator<Item = QuestionRef<'_>> + '_ {
        (0..self.len()).filter_map(move |i| self.question(i))
    }
}

/// Borrowed view of either question variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionRef<'a> {
    ImageChoice(&'a ImageChoiceQuestion),
    SignChoice(&'a SignChoiceQuestion),
}

impl<'a> QuestionRef<'a> {
    pub fn number(&self) -> QuestionNumber {
        match self {
            QuestionRef::ImageChoice(q) => q.q_no,
            QuestionRef::SignChoice(q) => q.q_no,
        }
    }

    pub fn correct_id(&self) -> OptionId {
        match self {
            QuestionRef::ImageChoice(q) => q.correct_id,
            QuestionRef::SignChoice(q) => q.correct_id,
        }
    }

    pub fn option_count(&self) -> usize {
        match self {
            QuestionRef::ImageChoice(q) => q.options.len(),
            QuestionRef::SignChoice(q) => q.options.len(),
        }
    }

    /// Option ids in display order.
    pub fn option_ids(&self) -> Vec<OptionId> {
        self.labels().into_iter().map(|(id, _)| id).collect()
    }

    /// `(id, display name)` pairs in display order.
    pub fn labels(&self) -> Vec<(OptionId, &'a str)> {
        match self {
            QuestionRef::ImageChoice(q) => {
                q.options.iter().map(|o| (o.id, o.name.as_str())).collect()
            }
            QuestionRef::SignChoice(q) => {
                q.options.iter().map(|o| (o.id, o.name.as_str())).collect()
            }
        }
    }

    /// Id of the option shown at `position`.
    pub fn option_at(&self, position: usize) -> Option<OptionId> {
        match self {
            QuestionRef::ImageChoice(q) => q.options.get(position).map(|o| o.id),
            QuestionRef::SignChoice(q) => q.options.get(position).map(|o| o.id),
        }
    }

    pub fn has_option(&self, id: OptionId) -> bool {
        match self {
            QuestionRef::ImageChoice(q) => q.options.iter().any(|o| o.id == id),
            QuestionRef::SignChoice(q) => q.options.iter().any(|o| o.id == id),
        }
    }
}

/// Letter shown next to the option at `position`: `A`, `B`, ... `Z`, then `?`.
pub fn option_letter(position: usize) -> char {
    u8::try_from(position)
        .ok()
        .filter(|p| *p < 26)
        .map(|p| char::from(b'A' + p))
        .unwrap_or('?')
}

/// Inverse of [`option_letter`], case-insensitive.
pub fn letter_position(letter: char) -> Option<usize> {
    let upper = letter.to_ascii_uppercase();
    upper
        .is_ascii_uppercase()
        .then(|| usize::from(upper as u8 - b'A'))
}
