//! WebQuiz - Build quiz documents from TeX4ht XML.
//!
//! TeX4ht turns a LaTeX quiz into a small XML document. This crate reads
//! that document as a stream of open, close and text events and builds a
//! validated [`QuizDocument`]: page settings, discussions, questions with
//! their answers or choice items, and the entries of a quiz index page.
//!
//! # Example
//!
//! ```
//! use webquiz::{read_quiz, Defaults};
//!
//! let xml = r#"<webquiz language="DeFaUlT">
//!   <title>Derivatives</title>
//!   <question>d/dx x^2 at x = 1?<answer comparison="number">2</answer></question>
//! </webquiz>"#;
//!
//! let quiz = read_quiz(xml, &Defaults::builtin()).unwrap();
//! assert_eq!(quiz.title, "Derivatives");
//! assert_eq!(quiz.questions.len(), 1);
//! assert!(quiz.needs_mathjs);
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Setting constants and the defaults mapping (rc files)
//! - [`types`]: The quiz document model
//! - [`error`]: Error types and Result alias
//! - [`text`]: Buffer for character data between tags
//! - [`registry`]: Tag registry, handlers and the event-driven builder
//! - [`validate`]: Checks run when a question closes
//! - [`xml`]: XML reading into the tag stream
//! - [`yaml`]: YAML output generation
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod registry;
pub mod text;
pub mod types;
pub mod validate;
pub mod xml;
pub mod yaml;

pub use registry::{build_quiz, QuizBuilder, TagEvent};
pub use xml::{read_quiz, read_quiz_file};

pub use config::Defaults;
pub use error::{QuizError, Result};
pub use types::{Question, QuestionKind, QuizDocument};
