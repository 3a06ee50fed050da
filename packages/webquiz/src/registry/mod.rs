//! Tag registry and the event-driven document builder.
//!
//! Each tag name is classified once into a [`TagKind`]; the
//! [`QuizBuilder`] keeps the stack of open elements and dispatches open and
//! close events to the handlers for that kind.

mod config;
mod core;
mod engine;
pub mod handlers;
mod types;

pub use config::{create_quiz_registry, LEGACY_ROOT_TAG, ROOT_TAG};
pub use core::TagRegistry;
pub use engine::{build_quiz, QuizBuilder};
pub use types::{
    BuildContext, DiscussionField, DocumentField, FeedbackTarget, TagEvent, TagFrame, TagKind,
};
