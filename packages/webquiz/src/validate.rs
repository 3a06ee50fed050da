//! Structural checks run when a question closes.

use crate::error::{QuizError, Result};
use crate::types::{ChoiceKind, Question, QuestionKind};

/// Check a fully populated question.
///
/// # Arguments
/// * `question` - The question that just closed
/// * `ordinal` - Its 1-based position in the document
///
/// # Errors
/// * `MissingType` if neither an answer nor a choice block was seen
/// * `EmptyChoice` if a choice question has no items
/// * `SingleChoiceCount` if a single-choice question does not have exactly one correct item
/// * `MissingAnswer` if an input question has an empty answer
pub fn validate_question(question: &Question, ordinal: usize) -> Result<()> {
    match &question.kind {
        None => Err(QuizError::MissingType { question: ordinal }),

        Some(QuestionKind::Choice(choice)) => {
            if choice.items.is_empty() {
                return Err(QuizError::EmptyChoice { question: ordinal });
            }
            if choice.kind == ChoiceKind::Single && choice.correct != 1 {
                return Err(QuizError::SingleChoiceCount {
                    question: ordinal,
                    count: choice.correct,
                });
            }
            Ok(())
        }

        Some(QuestionKind::Input(input)) => {
            if input.answer.trim().is_empty() {
                return Err(QuizError::MissingAnswer { question: ordinal });
            }
            Ok(())
        }
    }
}
