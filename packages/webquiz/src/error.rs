//! Error types for the quiz builder.
//!
//! Every failure carries enough context to point the quiz author at the
//! offending element: validation errors report the 1-based ordinal of the
//! question that failed.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the webquiz library.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The tag stream is not properly nested.
    #[error("Malformed quiz document: {message}")]
    Structural { message: String },

    /// A question declares more than one type.
    #[error("Question {question} has too many question types: {existing} and {declared}")]
    DuplicateType {
        question: usize,
        existing: String,
        declared: String,
    },

    /// A question closed without an answer or choice block.
    #[error("Question {question} does not have an answer or a choice environment")]
    MissingType { question: usize },

    /// A choice question has no items.
    #[error("Question {question} has no multiple choice items")]
    EmptyChoice { question: usize },

    /// A single-choice question does not have exactly one correct item.
    #[error("Question {question} is single-choice but has {count} correct answers")]
    SingleChoiceCount { question: usize, count: usize },

    /// An input question has an empty answer.
    #[error("Question {question} has an empty answer")]
    MissingAnswer { question: usize },

    /// A default was requested for a setting that has none.
    #[error("Unknown setting '{key}': no default value is registered for it")]
    UnknownSetting { key: String },

    /// An attribute value could not be interpreted.
    #[error("Question {question}: invalid value '{value}' for attribute '{attribute}'")]
    InvalidAttribute {
        question: usize,
        attribute: String,
        value: String,
    },

    /// A settings file line is not of the form `key = value`.
    #[error("Invalid line {line} in {}: '{content}'", .path.display())]
    InvalidRcLine {
        path: PathBuf,
        line: usize,
        content: String,
    },

    /// A settings file names a setting that does not exist.
    #[error("Unknown setting '{key}' in {}", .path.display())]
    UnknownRcSetting { path: PathBuf, key: String },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error.
    #[error("YAML serialization failed: {0}")]
    YamlSerialization(#[from] serde_yaml_ng::Error),
}

impl QuizError {
    /// Build a structural error from any message.
    pub fn structural(message: impl Into<String>) -> Self {
        Self::Structural {
            message: message.into(),
        }
    }

    /// The 1-based ordinal of the question this error refers to, if any.
    #[must_use]
    pub fn question(&self) -> Option<usize> {
        match self {
            Self::DuplicateType { question, .. }
            | Self::MissingType { question }
            | Self::EmptyChoice { question }
            | Self::SingleChoiceCount { question, .. }
            | Self::MissingAnswer { question }
            | Self::InvalidAttribute { question, .. } => Some(*question),
            _ => None,
        }
    }
}

/// Result type alias for quiz operations.
pub type Result<T> = std::result::Result<T, QuizError>;
