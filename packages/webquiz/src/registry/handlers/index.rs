//! Handlers for quiz index pages.

use crate::error::Result;
use crate::registry::types::BuildContext;
use crate::types::{attribute, QuizIndexEntry};

/// Open handler for `<index_item>`.
pub fn open_index_item(context: &mut BuildContext<'_>, attributes: &[(String, String)]) {
    context.document.quiz_index.push(QuizIndexEntry {
        prompt: attribute(attributes, "prompt") == Some("true"),
        url: attribute(attributes, "url").unwrap_or_default().to_string(),
        title: String::new(),
    });
    context.current_index_entry = Some(context.document.quiz_index.len() - 1);
}

/// Close handler for `<index_item>`: the text is the quiz title.
pub fn close_index_item(context: &mut BuildContext<'_>) -> Result<()> {
    let title = single_line(&context.text.take_trimmed());
    context.index_entry_mut("index_item")?.title = title;
    Ok(())
}

/// Replace line breaks with single spaces.
///
/// # Examples
/// ```
/// use webquiz::registry::handlers::single_line;
///
/// assert_eq!(single_line("Quiz\nOne"), "Quiz One");
/// assert_eq!(single_line("Quiz\r\nTwo"), "Quiz Two");
/// ```
#[must_use]
pub fn single_line(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}
