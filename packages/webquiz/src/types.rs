//! Core data types for a quiz document.
//!
//! A [`QuizDocument`] is the finished, validated model of one quiz page:
//! page metadata, the author's settings, discussion blocks, questions and
//! (for index pages) the list of quizzes.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::{Defaults, BOOLEAN_SETTINGS};

/// Attributes of an element, in document order.
pub type Attributes = Vec<(String, String)>;

/// Look up an attribute by name.
#[must_use]
pub fn attribute<'a>(attributes: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

/// Document-scoped settings, seeded from the defaults mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

impl Settings {
    /// Seed the settings from the defaults mapping.
    #[must_use]
    pub fn from_defaults(defaults: &Defaults) -> Self {
        Self {
            values: defaults
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Get a setting.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Set a setting, replacing any earlier value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Iterate over all settings in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Boolean page options from the root element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageFlags {
    pub debugging: bool,
    pub hide_side_menu: bool,
    pub one_page: bool,
    pub pst2pdf: bool,
    pub random_order: bool,
    pub save_state: bool,
}

impl PageFlags {
    /// Coerce the boolean settings: `"true"` is true, anything else false.
    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        let mut flags = Self::default();
        for key in BOOLEAN_SETTINGS {
            if let Some(flag) = flags.flag_mut(key) {
                *flag = settings.get(key) == Some("true");
            }
        }
        flags
    }

    /// The flag stored for a boolean setting.
    fn flag_mut(&mut self, key: &str) -> Option<&mut bool> {
        match key {
            "debugging" => Some(&mut self.debugging),
            "hide_side_menu" => Some(&mut self.hide_side_menu),
            "one_page" => Some(&mut self.one_page),
            "pst2pdf" => Some(&mut self.pst2pdf),
            "random_order" => Some(&mut self.random_order),
            "save_state" => Some(&mut self.save_state),
            _ => None,
        }
    }
}

/// A discussion block shown alongside the questions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Discussion {
    pub heading: String,
    pub short_heading: String,
    pub text: String,
}

/// How an input answer is compared with the expected answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    /// Literal string equality.
    #[default]
    String,
    /// Numerical equality.
    Number,
    /// Complex-number equality.
    Complex,
    /// Any other comparison named by the LaTeX source.
    #[serde(untagged)]
    Other(String),
}

impl Comparison {
    /// Parse the `comparison` attribute; absent means string equality.
    #[must_use]
    pub fn from_attribute(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("" | "string") => Self::String,
            Some("number") => Self::Number,
            Some("complex") => Self::Complex,
            Some(other) => Self::Other(other.to_string()),
        }
    }

    /// Whether the page needs math.js to evaluate answers.
    #[must_use]
    pub fn needs_evaluation(&self) -> bool {
        matches!(self, Self::Number | Self::Complex)
    }
}

/// Fields of an `input` question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InputAnswer {
    pub answer: String,
    pub comparison: Comparison,
    pub prompt: bool,
    pub feedback_right: String,
    pub feedback_wrong: String,
}

/// Single or multiple choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChoiceKind {
    Single,
    Multiple,
}

impl ChoiceKind {
    /// Parse the `type` attribute of a choice block.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "single" => Some(Self::Single),
            "multiple" => Some(Self::Multiple),
            _ => None,
        }
    }

    /// Name used in the XML and in diagnostics.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multiple => "multiple",
        }
    }
}

/// One answer option of a choice question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Item {
    pub correct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    pub text: String,
    pub feedback: String,
}

/// Fields of a `single` or `multiple` choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Choice {
    pub kind: ChoiceKind,
    pub columns: u32,
    pub items: Vec<Item>,
    /// Number of items marked correct.
    pub correct: usize,
}

impl Choice {
    /// Create an empty choice block.
    #[must_use]
    pub fn new(kind: ChoiceKind, columns: u32) -> Self {
        Self {
            kind,
            columns,
            items: Vec::new(),
            correct: 0,
        }
    }
}

/// The type of a question, with its type-specific fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionKind {
    Input(InputAnswer),
    Choice(Choice),
}

impl QuestionKind {
    /// The type name: `input`, `single` or `multiple`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Input(_) => "input",
            Self::Choice(choice) => choice.kind.as_str(),
        }
    }
}

/// A quiz question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Question {
    pub text: String,
    pub after_text: String,
    /// Unset until an answer or choice block opens.
    pub kind: Option<QuestionKind>,
}

impl Question {
    /// The type name, if the type has been declared.
    #[must_use]
    pub fn type_name(&self) -> Option<&'static str> {
        self.kind.as_ref().map(QuestionKind::name)
    }

    /// Input fields, if this is an input question.
    #[must_use]
    pub fn input(&self) -> Option<&InputAnswer> {
        match &self.kind {
            Some(QuestionKind::Input(input)) => Some(input),
            _ => None,
        }
    }

    /// Choice fields, if this is a choice question.
    #[must_use]
    pub fn choice(&self) -> Option<&Choice> {
        match &self.kind {
            Some(QuestionKind::Choice(choice)) => Some(choice),
            _ => None,
        }
    }

    /// Append trailing commentary, space-joined.
    pub fn append_after_text(&mut self, text: &str) {
        self.after_text.push(' ');
        self.after_text.push_str(text);
    }
}

/// An entry on a quiz index page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuizIndexEntry {
    pub prompt: bool,
    pub url: String,
    pub title: String,
}

/// A finished quiz page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct QuizDocument {
    pub title: String,
    pub unit_code: String,
    pub unit_name: String,
    pub breadcrumb: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quizzes_url: Option<String>,
    pub settings: Settings,
    pub flags: PageFlags,
    pub discussions: Vec<Discussion>,
    pub questions: Vec<Question>,
    pub quiz_index: Vec<QuizIndexEntry>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<Attributes>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub metas: Vec<Attributes>,
    /// Set when any answer is compared numerically.
    pub needs_mathjs: bool,
}

impl QuizDocument {
    /// Create an empty document whose settings are seeded from `defaults`.
    #[must_use]
    pub fn new(defaults: &Defaults) -> Self {
        Self {
            settings: Settings::from_defaults(defaults),
            ..Self::default()
        }
    }

    /// Convenience accessor for a setting.
    #[must_use]
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key)
    }
}
