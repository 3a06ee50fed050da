//! Handlers for discussion blocks.

use crate::error::Result;
use crate::registry::types::{BuildContext, DiscussionField};
use crate::types::Discussion;

/// Open handler for `<discussion>`: starts an empty discussion.
pub fn open_discussion(context: &mut BuildContext<'_>) {
    context.document.discussions.push(Discussion::default());
    context.current_discussion = Some(context.document.discussions.len() - 1);
}

/// Close handler for `<discussion>`: the remaining text is the body.
pub fn close_discussion(context: &mut BuildContext<'_>) -> Result<()> {
    let text = context.text.take_trimmed();
    context.discussion_mut("discussion")?.text = text;
    Ok(())
}

/// Close handler for `<heading>` and `<short_heading>`.
pub fn close_discussion_field(
    context: &mut BuildContext<'_>,
    field: DiscussionField,
) -> Result<()> {
    let text = context.text.take_trimmed();
    let tag = match field {
        DiscussionField::Heading => "heading",
        DiscussionField::ShortHeading => "short_heading",
    };
    let discussion = context.discussion_mut(tag)?;
    match field {
        DiscussionField::Heading => discussion.heading = text,
        DiscussionField::ShortHeading => discussion.short_heading = text,
    }
    Ok(())
}
