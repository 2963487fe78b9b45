//! The ordered, validated set of quizzes an attempt progresses through.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{CatalogError, IntegrityError};
use crate::media::{self, GlossImages, ImageResolver};
use crate::model::{ImageOption, Quiz};

/// Read-only quiz catalog. Every quiz has passed [`validate_quiz`].
pub struct Catalog {
    quizzes: Vec<Quiz>,
    resolver: Arc<dyn ImageResolver>,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("quizzes", &self.quizzes)
            .finish_non_exhaustive()
    }
}

impl Catalog {
    /// Build a catalog using the default gloss image convention.
    pub fn new(quizzes: Vec<Quiz>) -> Result<Self, CatalogError> {
        Self::with_resolver(quizzes, Arc::new(GlossImages::default()))
    }

    /// Build a catalog with a caller-supplied image convention.
    pub fn with_resolver(
        quizzes: Vec<Quiz>,
        resolver: Arc<dyn ImageResolver>,
    ) -> Result<Self, CatalogError> {
        if quizzes.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen_ids = HashSet::new();
        for quiz in &quizzes {
            if !seen_ids.insert(quiz.id.as_str()) {
                return Err(CatalogError::DuplicateQuizId(quiz.id.clone()));
            }
            if let Some(source) = validate_quiz(quiz).into_iter().next() {
                return Err(CatalogError::Integrity {
                    quiz_id: quiz.id.clone(),
                    source,
                });
            }
        }

        tracing::debug!(count = quizzes.len(), "catalog validated");
        Ok(Self { quizzes, resolver })
    }

    pub fn count(&self) -> usize {
        self.quizzes.len()
    }

    pub fn get(&self, index: usize) -> Result<&Quiz, CatalogError> {
        self.quizzes.get(index).ok_or(CatalogError::OutOfRange {
            index,
            count: self.quizzes.len(),
        })
    }

    /// The quiz every attempt session starts on.
    pub fn first(&self) -> &Quiz {
        // Construction rejects empty catalogs.
        &self.quizzes[0]
    }

    /// Whether a quiz follows the one at `index`.
    pub fn has_next(&self, index: usize) -> bool {
        index + 1 < self.quizzes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quiz> {
        self.quizzes.iter()
    }

    /// Image reference for an option, falling back to the catalog's convention.
    pub fn image_for<'a>(&self, option: &'a ImageOption) -> Cow<'a, str> {
        media::image_for(option, self.resolver.as_ref())
    }
}

/// Check a quiz for authoring defects. Returns every problem found.
pub fn validate_quiz(quiz: &Quiz) -> Vec<IntegrityError> {
    let mut errors = Vec::new();

    if quiz.is_empty() {
        errors.push(IntegrityError::NoQuestions);
    }

    let mut seen_numbers = HashSet::new();
    for question in quiz.questions() {
        let q_no = question.number();
        if !seen_numbers.insert(q_no) {
            errors.push(IntegrityError::DuplicateQuestionNumber { q_no });
        }

        let ids = question.option_ids();
        if ids.is_empty() {
            errors.push(IntegrityError::NoOptions { q_no });
            continue;
        }

        let mut seen_options = HashSet::new();
        for &option_id in &ids {
            if !seen_options.insert(option_id) {
                errors.push(IntegrityError::DuplicateOptionId { q_no, option_id });
            }
        }

        if !question.has_option(question.correct_id()) {
            errors.push(IntegrityError::CorrectIdNotInOptions {
                q_no,
                correct_id: question.correct_id(),
            });
        }
    }

    errors
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{
        Difficulty, ImageChoiceQuestion, Questions, SignChoiceQuestion, SignOption,
    };

    pub(crate) fn image_question(q_no: u32, correct_id: u32, ids: &[u32]) -> ImageChoiceQuestion {
        ImageChoiceQuestion {
            q_no,
            q_text: format!("Question {q_no}"),
            correct_id,
            options: ids
                .iter()
                .map(|&id| ImageOption {
                    id,
                    name: id.to_string(),
                    image_url: None,
                })
                .collect(),
        }
    }

    pub(crate) fn image_quiz(id: &str, questions: Vec<ImageChoiceQuestion>) -> Quiz {
        Quiz {
            id: id.into(),
            title: id.into(),
            description: String::new(),
            difficulty: Difficulty::Easy,
            questions: Questions::ImageChoice(questions),
        }
    }

    /// "Beginner Numbers 1" followed by a sign quiz.
    pub(crate) fn sample_catalog() -> Catalog {
        let numbers = Quiz {
            title: "Beginner Numbers 1".into(),
            ..image_quiz(
                "numbers-1",
                vec![
                    image_question(1, 6, &[8, 3, 7, 6]),
                    image_question(2, 5, &[1, 9, 5, 2]),
                ],
            )
        };
        let signs = Quiz {
            id: "signs-1".into(),
            title: "Identify the sign".into(),
            description: String::new(),
            difficulty: Difficulty::Easy,
            questions: Questions::SignChoice(vec![SignChoiceQuestion {
                q_no: 1,
                question_image: "/glosses/Z.jpg".into(),
                correct_id: 103,
                options: vec![
                    SignOption {
                        id: 101,
                        name: "Q".into(),
                    },
                    SignOption {
                        id: 103,
                        name: "Z".into(),
                    },
                ],
            }]),
        };
        Catalog::new(vec![numbers, signs]).unwrap()
    }

    #[test]
    fn get_bounds() {
        let catalog = sample_catalog();
        assert_eq!(catalog.count(), 2);
        assert_eq!(catalog.get(1).unwrap().id, "signs-1");
        assert_eq!(
            catalog.get(2).unwrap_err(),
            CatalogError::OutOfRange { index: 2, count: 2 }
        );
        assert!(catalog.has_next(0));
        assert!(!catalog.has_next(1));
    }

    #[test]
    fn empty_catalog_rejected() {
        assert_eq!(Catalog::new(vec![]).unwrap_err(), CatalogError::Empty);
    }

    #[test]
    fn duplicate_quiz_ids_rejected() {
        let a = image_quiz("same", vec![image_question(1, 1, &[1, 2])]);
        let b = image_quiz("same", vec![image_question(1, 2, &[1, 2])]);
        assert_eq!(
            Catalog::new(vec![a, b]).unwrap_err(),
            CatalogError::DuplicateQuizId("same".into())
        );
    }

    #[test]
    fn unwinnable_question_rejected_at_load() {
        let quiz = image_quiz("bad", vec![image_question(4, 103, &[101, 102])]);
        let err = Catalog::new(vec![quiz]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::Integrity {
                quiz_id: "bad".into(),
                source: IntegrityError::CorrectIdNotInOptions {
                    q_no: 4,
                    correct_id: 103
                },
            }
        );
        assert!(err.to_string().contains("correct_id 103"));
    }

    #[test]
    fn validate_reports_every_problem() {
        let quiz = image_quiz(
            "messy",
            vec![
                image_question(1, 9, &[1, 1]),
                image_question(1, 1, &[]),
            ],
        );
        let errors = validate_quiz(&quiz);
        assert_eq!(
            errors,
            vec![
                IntegrityError::DuplicateOptionId {
                    q_no: 1,
                    option_id: 1
                },
                IntegrityError::CorrectIdNotInOptions {
                    q_no: 1,
                    correct_id: 9
                },
                IntegrityError::DuplicateQuestionNumber { q_no: 1 },
                IntegrityError::NoOptions { q_no: 1 },
            ]
        );
    }

    #[test]
    fn validate_empty_quiz() {
        let quiz = image_quiz("empty", vec![]);
        assert_eq!(validate_quiz(&quiz), vec![IntegrityError::NoQuestions]);
    }

    #[test]
    fn image_for_uses_injected_resolver() {
        let quiz = image_quiz("q", vec![image_question(1, 1, &[1])]);
        let catalog =
            Catalog::with_resolver(vec![quiz], Arc::new(|id: u32| format!("/hand/{id}.gif")))
                .unwrap();
        let option = ImageOption {
            id: 12,
            name: "12".into(),
            image_url: None,
        };
        assert_eq!(catalog.image_for(&option), "/hand/12.gif");
    }
}
