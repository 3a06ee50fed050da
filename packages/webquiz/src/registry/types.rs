//! Types for the tag registry and the build state.

use std::fmt;

use crate::config::Defaults;
use crate::error::{QuizError, Result};
use crate::text::TextAccumulator;
use crate::types::{
    Attributes, Discussion, Item, Question, QuestionKind, QuizDocument, QuizIndexEntry,
};

/// Document fields set from element text without default substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentField {
    Title,
    UnitCode,
    UnitName,
    Breadcrumb,
}

/// Discussion fields set from element text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscussionField {
    Heading,
    ShortHeading,
}

/// Classification of a tag, selecting its open and close behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// The root element carrying page settings as attributes.
    Root,
    /// `<link>`: attributes forwarded verbatim.
    Link,
    /// `<meta>`: attributes forwarded verbatim.
    Meta,
    /// `<breadcrumb>`: `breadcrumbs` setting on open, document text on close.
    Breadcrumb,
    /// `<unit_name>`: unit URLs on open, document text on close.
    UnitName,
    /// Other document text fields.
    Document(DocumentField),
    /// A setting whose text is resolved on close. With `attributes` set,
    /// its attribute values are also resolved as that setting on open.
    Setting {
        key: &'static str,
        attributes: bool,
    },
    /// A tag whose attribute values are resolved as the setting named by
    /// the tag, text untouched.
    AttributeSettings,
    Discussion,
    DiscussionField(DiscussionField),
    Question,
    Answer,
    Choice,
    Item,
    Feedback,
    When,
    IndexItem,
    /// Anything else: text is left to bubble up.
    Generic,
}

impl TagKind {
    /// Classification label used in logs.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Link | Self::Meta => "passthrough",
            Self::Breadcrumb | Self::UnitName | Self::Document(_) => "document",
            Self::Setting { .. } | Self::AttributeSettings => "setting",
            Self::Discussion | Self::DiscussionField(_) => "discussion",
            Self::Question | Self::Answer | Self::Choice | Self::When => "question",
            Self::Item | Self::Feedback => "item",
            Self::IndexItem => "index",
            Self::Generic => "generic",
        }
    }
}

/// Input feedback field selected by a `<when type="...">` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackTarget {
    Right,
    Wrong,
}

impl FeedbackTarget {
    /// Parse the `type` attribute of a `when` block.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "right" => Some(Self::Right),
            "wrong" => Some(Self::Wrong),
            _ => None,
        }
    }
}

impl fmt::Display for FeedbackTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Right => f.write_str("feedback_right"),
            Self::Wrong => f.write_str("feedback_wrong"),
        }
    }
}

/// An open element on the nesting stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFrame {
    pub name: String,
    pub kind: TagKind,
    /// Field the frame's text goes to when it closes, chosen at open time.
    pub target: Option<FeedbackTarget>,
}

impl TagFrame {
    /// Create a frame with no pending target.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: TagKind) -> Self {
        Self {
            name: name.into(),
            kind,
            target: None,
        }
    }
}

/// One event of the tag stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    Open { tag: String, attributes: Attributes },
    Close { tag: String },
    Text(String),
}

impl TagEvent {
    /// Open event with the given attributes.
    pub fn open<K, V>(tag: impl Into<String>, attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::Open {
            tag: tag.into(),
            attributes: attributes
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Open event without attributes.
    pub fn open_bare(tag: impl Into<String>) -> Self {
        Self::Open {
            tag: tag.into(),
            attributes: Vec::new(),
        }
    }

    /// Close event.
    pub fn close(tag: impl Into<String>) -> Self {
        Self::Close { tag: tag.into() }
    }

    /// Text event.
    pub fn text(fragment: impl Into<String>) -> Self {
        Self::Text(fragment.into())
    }
}

/// Mutable state threaded through the tag handlers.
///
/// The `current_*` indices point at the element that nested tags modify,
/// so handlers never have to guess from the tail of a list.
pub struct BuildContext<'d> {
    /// Defaults used to resolve sentinel values.
    pub defaults: &'d Defaults,

    /// The document under construction.
    pub document: QuizDocument,

    /// Text seen since it was last consumed.
    pub text: TextAccumulator,

    /// Index of the open question, cleared when it closes.
    pub current_question: Option<usize>,

    /// Index of the latest item in the open question.
    pub current_item: Option<usize>,

    /// Index of the latest discussion.
    pub current_discussion: Option<usize>,

    /// Index of the latest quiz index entry.
    pub current_index_entry: Option<usize>,
}

impl<'d> BuildContext<'d> {
    /// Create a context with an empty document seeded from `defaults`.
    #[must_use]
    pub fn new(defaults: &'d Defaults) -> Self {
        Self {
            defaults,
            document: QuizDocument::new(defaults),
            text: TextAccumulator::new(),
            current_question: None,
            current_item: None,
            current_discussion: None,
            current_index_entry: None,
        }
    }

    /// Resolve `raw` against the defaults and store it as setting `key`.
    ///
    /// # Errors
    /// Returns `UnknownSetting` if `raw` is the sentinel and `key` has no default.
    pub fn set_setting(&mut self, key: &str, raw: &str) -> Result<()> {
        let value = self.defaults.resolve(key, raw)?;
        tracing::debug!(key, value = %value, raw, "Setting assigned");
        self.document.settings.set(key, value);
        Ok(())
    }

    /// Like [`BuildContext::set_setting`], but `key` must have a default
    /// whatever the value.
    ///
    /// # Errors
    /// Returns `UnknownSetting` if `key` has no default.
    pub fn set_known_setting(&mut self, key: &str, raw: &str) -> Result<()> {
        if self.defaults.get(key).is_none() {
            return Err(QuizError::UnknownSetting {
                key: key.to_string(),
            });
        }
        self.set_setting(key, raw)
    }

    /// The open question and its 1-based ordinal.
    ///
    /// # Errors
    /// Returns `Structural` if no question is open; `tag` names the element
    /// that needed one.
    pub fn question_mut(&mut self, tag: &str) -> Result<(usize, &mut Question)> {
        let index = self
            .current_question
            .ok_or_else(|| QuizError::structural(format!("<{tag}> outside of a question")))?;
        let question = self
            .document
            .questions
            .get_mut(index)
            .ok_or_else(|| QuizError::structural(format!("<{tag}> refers to a missing question")))?;
        Ok((index + 1, question))
    }

    /// The latest item of the open question.
    ///
    /// # Errors
    /// Returns `Structural` if there is no open choice question with an item.
    pub fn item_mut(&mut self, tag: &str) -> Result<&mut Item> {
        let item_index = self.current_item;
        let (_, question) = self.question_mut(tag)?;
        let items = match question.kind.as_mut() {
            Some(QuestionKind::Choice(choice)) => &mut choice.items,
            _ => {
                return Err(QuizError::structural(format!(
                    "<{tag}> outside of a choice block"
                )))
            }
        };
        item_index
            .and_then(|i| items.get_mut(i))
            .ok_or_else(|| QuizError::structural(format!("<{tag}> before any <item>")))
    }

    /// The latest discussion.
    ///
    /// # Errors
    /// Returns `Structural` if no discussion has been opened.
    pub fn discussion_mut(&mut self, tag: &str) -> Result<&mut Discussion> {
        self.current_discussion
            .and_then(|i| self.document.discussions.get_mut(i))
            .ok_or_else(|| QuizError::structural(format!("<{tag}> outside of a discussion")))
    }

    /// The latest quiz index entry.
    ///
    /// # Errors
    /// Returns `Structural` if no index entry has been opened.
    pub fn index_entry_mut(&mut self, tag: &str) -> Result<&mut QuizIndexEntry> {
        self.current_index_entry
            .and_then(|i| self.document.quiz_index.get_mut(i))
            .ok_or_else(|| QuizError::structural(format!("<{tag}> without an index entry")))
    }
}

impl fmt::Debug for BuildContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildContext")
            .field("questions", &self.document.questions.len())
            .field("current_question", &self.current_question)
            .field("current_item", &self.current_item)
            .field("pending_text", &self.text.as_str())
            .finish()
    }
}
