//! Handlers for questions, their answer or choice block, items and feedback.
//!
//! A question declares its type by opening exactly one `<answer>` (an
//! `input` question) or `<choice>` (a `single` or `multiple` question).
//! Text seen before that block is the question text; text after it is
//! trailing commentary.

use crate::error::{QuizError, Result};
use crate::registry::types::{BuildContext, FeedbackTarget};
use crate::types::{
    attribute, Choice, ChoiceKind, Comparison, InputAnswer, Item, Question, QuestionKind,
};
use crate::validate::validate_question;

/// Open handler for `<question>`: starts a question with no type.
pub fn open_question(context: &mut BuildContext<'_>) {
    context.document.questions.push(Question::default());
    context.current_question = Some(context.document.questions.len() - 1);
    context.current_item = None;
}

/// Close handler for `<question>`: validates the question, then appends any
/// leftover text to its trailing commentary.
pub fn close_question(context: &mut BuildContext<'_>) -> Result<()> {
    let leftover = context.text.take_trimmed();
    let (ordinal, question) = context.question_mut("question")?;

    validate_question(question, ordinal)?;

    if !leftover.is_empty() {
        question.append_after_text(&leftover);
    }

    context.current_question = None;
    context.current_item = None;
    Ok(())
}

/// Open handler for `<answer>`: makes the question an `input` question.
///
/// Numeric and complex comparisons flag the whole page as needing math.js.
pub fn open_answer(context: &mut BuildContext<'_>, attributes: &[(String, String)]) -> Result<()> {
    let comparison = Comparison::from_attribute(attribute(attributes, "comparison"));
    let prompt = attribute(attributes, "prompt") == Some("true");
    let needs_evaluation = comparison.needs_evaluation();
    let pending = context.text.take();

    let (ordinal, question) = context.question_mut("answer")?;
    if let Some(kind) = &question.kind {
        return Err(QuizError::DuplicateType {
            question: ordinal,
            existing: kind.name().to_string(),
            declared: "input".to_string(),
        });
    }

    question.text.push_str(&pending);
    question.kind = Some(QuestionKind::Input(InputAnswer {
        comparison,
        prompt,
        ..InputAnswer::default()
    }));

    if needs_evaluation {
        context.document.needs_mathjs = true;
    }
    Ok(())
}

/// Close handler for `<answer>`: the trimmed text is the expected answer.
pub fn close_answer(context: &mut BuildContext<'_>) -> Result<()> {
    let text = context.text.take_trimmed();
    let (_, question) = context.question_mut("answer")?;
    match question.kind.as_mut() {
        Some(QuestionKind::Input(input)) => {
            input.answer = text;
            Ok(())
        }
        _ => Err(QuizError::structural("</answer> without an input question")),
    }
}

/// Open handler for `<choice>`: makes the question a choice question.
pub fn open_choice(context: &mut BuildContext<'_>, attributes: &[(String, String)]) -> Result<()> {
    let declared = attribute(attributes, "type").unwrap_or_default().trim();
    let columns = attribute(attributes, "columns");
    let pending = context.text.take();

    let (ordinal, question) = context.question_mut("choice")?;
    if let Some(kind) = &question.kind {
        return Err(QuizError::DuplicateType {
            question: ordinal,
            existing: kind.name().to_string(),
            declared: if declared.is_empty() { "choice" } else { declared }.to_string(),
        });
    }

    let kind = ChoiceKind::parse(declared).ok_or_else(|| QuizError::InvalidAttribute {
        question: ordinal,
        attribute: "type".to_string(),
        value: declared.to_string(),
    })?;
    let columns = parse_columns(columns).ok_or_else(|| QuizError::InvalidAttribute {
        question: ordinal,
        attribute: "columns".to_string(),
        value: columns.unwrap_or_default().to_string(),
    })?;

    question.text.push_str(&pending);
    question.kind = Some(QuestionKind::Choice(Choice::new(kind, columns)));
    context.current_item = None;
    Ok(())
}

/// Parse the `columns` attribute: a positive integer, 1 when absent.
fn parse_columns(value: Option<&str>) -> Option<u32> {
    match value {
        None => Some(1),
        Some(text) => text.trim().parse::<u32>().ok().filter(|&n| n > 0),
    }
}

/// Open handler for `<item>`: appends an item to the choice block.
pub fn open_item(context: &mut BuildContext<'_>, attributes: &[(String, String)]) -> Result<()> {
    let correct = attribute(attributes, "correct") == Some("true");
    let symbol = attribute(attributes, "symbol").map(str::to_string);

    let (_, question) = context.question_mut("item")?;
    let Some(QuestionKind::Choice(choice)) = question.kind.as_mut() else {
        return Err(QuizError::structural("<item> outside of a choice block"));
    };

    choice.items.push(Item {
        correct,
        symbol,
        ..Item::default()
    });
    if correct {
        choice.correct += 1;
    }
    let index = choice.items.len() - 1;

    context.current_item = Some(index);
    Ok(())
}

/// Close handler for `<item>`: the trimmed text is the item text.
pub fn close_item(context: &mut BuildContext<'_>) -> Result<()> {
    let text = context.text.take_trimmed();
    context.item_mut("item")?.text = text;
    Ok(())
}

/// Close handler for `<feedback>`: feedback for the latest item.
pub fn close_feedback(context: &mut BuildContext<'_>) -> Result<()> {
    let text = context.text.take_trimmed();
    context.item_mut("feedback")?.feedback = text;
    Ok(())
}

/// Open handler for `<when type="right|wrong">`.
///
/// Pending text becomes trailing commentary of the question. Returns the
/// feedback field the block's text goes to when it closes.
pub fn open_when(
    context: &mut BuildContext<'_>,
    attributes: &[(String, String)],
) -> Result<FeedbackTarget> {
    let pending = if context.text.is_blank() {
        None
    } else {
        Some(context.text.take_trimmed())
    };

    let (ordinal, question) = context.question_mut("when")?;
    if let Some(text) = pending {
        question.append_after_text(&text);
        tracing::debug!(
            question = ordinal,
            after_text = %question.after_text,
            "Updated after_text"
        );
    }

    let value = attribute(attributes, "type").unwrap_or_default();
    FeedbackTarget::parse(value).ok_or_else(|| QuizError::InvalidAttribute {
        question: ordinal,
        attribute: "type".to_string(),
        value: value.to_string(),
    })
}

/// Close handler for `<when>`: the trimmed text goes to `target`.
pub fn close_when(context: &mut BuildContext<'_>, target: FeedbackTarget) -> Result<()> {
    let text = context.text.take_trimmed();
    let (ordinal, question) = context.question_mut("when")?;

    tracing::debug!(question = ordinal, field = %target, "Routing when-block text");
    match question.kind.as_mut() {
        Some(QuestionKind::Input(input)) => match target {
            FeedbackTarget::Right => input.feedback_right = text,
            FeedbackTarget::Wrong => input.feedback_wrong = text,
        },
        _ => {
            tracing::warn!(
                question = ordinal,
                field = %target,
                "Feedback block in a question without an input answer, dropping text"
            );
        }
    }
    Ok(())
}
