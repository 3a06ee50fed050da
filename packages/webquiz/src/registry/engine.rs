//! Builder that turns the tag stream into a quiz document.

use super::config::create_quiz_registry;
use super::core::TagRegistry;
use super::handlers;
use super::types::{BuildContext, DocumentField, TagEvent, TagFrame, TagKind};
use crate::config::{Defaults, SETTING_TAGS};
use crate::error::{QuizError, Result};
use crate::types::QuizDocument;

/// Event-driven builder for a [`QuizDocument`].
///
/// The builder keeps a stack of open elements and dispatches each open and
/// close event to the behavior registered for the tag. Text that no close
/// handler consumes stays buffered and bubbles up to the enclosing element.
/// Any error is fatal: the builder must be dropped after a failed event.
pub struct QuizBuilder<'d> {
    registry: TagRegistry,
    stack: Vec<TagFrame>,
    context: BuildContext<'d>,
}

impl<'d> QuizBuilder<'d> {
    /// Create a builder using the standard quiz registry.
    ///
    /// # Errors
    /// Returns `UnknownSetting` if `defaults` lacks one of the setting tags.
    pub fn new(defaults: &'d Defaults) -> Result<Self> {
        Self::with_registry(create_quiz_registry(), defaults)
    }

    /// Create a builder with a custom registry.
    ///
    /// # Errors
    /// Returns `UnknownSetting` if `defaults` lacks one of the setting tags.
    pub fn with_registry(registry: TagRegistry, defaults: &'d Defaults) -> Result<Self> {
        defaults.require(&SETTING_TAGS)?;
        Ok(Self {
            registry,
            stack: Vec::new(),
            context: BuildContext::new(defaults),
        })
    }

    /// Names of the currently open elements, innermost last.
    pub fn open_tags(&self) -> impl Iterator<Item = &str> {
        self.stack.iter().map(|frame| frame.name.as_str())
    }

    /// Feed one event of the tag stream.
    ///
    /// # Errors
    /// Any structural or validation failure; see [`QuizError`].
    pub fn feed(&mut self, event: TagEvent) -> Result<()> {
        match event {
            TagEvent::Open { tag, attributes } => self.start_element(&tag, &attributes),
            TagEvent::Close { tag } => self.end_element(&tag),
            TagEvent::Text(fragment) => {
                self.characters(&fragment);
                Ok(())
            }
        }
    }

    /// Handle an open tag.
    ///
    /// # Errors
    /// Returns the error of the tag's open handler.
    pub fn start_element(&mut self, tag: &str, attributes: &[(String, String)]) -> Result<()> {
        let kind = self.registry.lookup(tag);
        tracing::trace!(tag, kind = kind.label(), depth = self.stack.len(), "Open");
        self.stack.push(TagFrame::new(tag, kind));

        let context = &mut self.context;
        match kind {
            TagKind::Root => handlers::open_root(context, attributes)?,
            TagKind::Link => handlers::open_link(context, attributes),
            TagKind::Meta => handlers::open_meta(context, attributes),
            TagKind::Breadcrumb => handlers::open_breadcrumb(context, attributes)?,
            TagKind::UnitName => handlers::open_unit_name(context, attributes)?,
            TagKind::Setting {
                attributes: true, ..
            }
            | TagKind::AttributeSettings => {
                handlers::open_attribute_settings(context, tag, attributes)?;
            }
            TagKind::Discussion => handlers::open_discussion(context),
            TagKind::Question => handlers::open_question(context),
            TagKind::Answer => handlers::open_answer(context, attributes)?,
            TagKind::Choice => handlers::open_choice(context, attributes)?,
            TagKind::Item => handlers::open_item(context, attributes)?,
            TagKind::IndexItem => handlers::open_index_item(context, attributes),
            TagKind::When => {
                let target = handlers::open_when(context, attributes)?;
                if let Some(frame) = self.stack.last_mut() {
                    frame.target = Some(target);
                }
            }
            TagKind::Setting { .. }
            | TagKind::Document(_)
            | TagKind::DiscussionField(_)
            | TagKind::Feedback
            | TagKind::Generic => {}
        }
        Ok(())
    }

    /// Handle a close tag.
    ///
    /// # Errors
    /// Returns `Structural` if no element is open or the innermost open
    /// element has a different name, otherwise the error of the tag's
    /// close handler.
    pub fn end_element(&mut self, tag: &str) -> Result<()> {
        let frame = self.stack.pop().ok_or_else(|| {
            QuizError::structural(format!("</{tag}> closes an element that was never opened"))
        })?;
        if frame.name != tag {
            return Err(QuizError::structural(format!(
                "</{tag}> does not match the open <{}>",
                frame.name
            )));
        }
        tracing::trace!(tag, kind = frame.kind.label(), depth = self.stack.len(), "Close");

        let context = &mut self.context;
        match frame.kind {
            TagKind::Answer => handlers::close_answer(context)?,
            TagKind::Discussion => handlers::close_discussion(context)?,
            TagKind::Item => handlers::close_item(context)?,
            TagKind::Feedback => handlers::close_feedback(context)?,
            TagKind::IndexItem => handlers::close_index_item(context)?,
            TagKind::Question => handlers::close_question(context)?,
            TagKind::When => {
                if let Some(target) = frame.target {
                    handlers::close_when(context, target)?;
                }
            }
            TagKind::Setting { key, .. } => handlers::close_setting(context, key)?,
            TagKind::DiscussionField(field) => handlers::close_discussion_field(context, field)?,
            TagKind::Document(field) => handlers::close_document_field(context, field),
            TagKind::Breadcrumb => {
                handlers::close_document_field(context, DocumentField::Breadcrumb);
            }
            TagKind::UnitName => {
                handlers::close_document_field(context, DocumentField::UnitName);
            }
            // Text lives to be used by an enclosing element
            TagKind::Root
            | TagKind::Link
            | TagKind::Meta
            | TagKind::AttributeSettings
            | TagKind::Choice
            | TagKind::Generic => return Ok(()),
        }

        context.text.clear();
        Ok(())
    }

    /// Buffer character data.
    pub fn characters(&mut self, fragment: &str) {
        self.context.text.push(fragment);
    }

    /// Signal the end of the stream and return the finished document.
    ///
    /// # Errors
    /// Returns `Structural` if elements are still open.
    pub fn finish(self) -> Result<QuizDocument> {
        if let Some(frame) = self.stack.last() {
            return Err(QuizError::structural(format!(
                "<{}> is still open at the end of the document",
                frame.name
            )));
        }

        let document = self.context.document;
        tracing::debug!(
            questions = document.questions.len(),
            discussions = document.discussions.len(),
            index_entries = document.quiz_index.len(),
            needs_mathjs = document.needs_mathjs,
            "Built quiz document"
        );
        Ok(document)
    }
}

/// Build a document from a complete event stream.
///
/// # Errors
/// Incomplete defaults, the first error raised by any event, or an
/// unterminated stream.
pub fn build_quiz(
    events: impl IntoIterator<Item = TagEvent>,
    defaults: &Defaults,
) -> Result<QuizDocument> {
    let mut builder = QuizBuilder::new(defaults)?;
    for event in events {
        builder.feed(event)?;
    }
    builder.finish()
}
