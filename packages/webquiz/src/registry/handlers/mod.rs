//! Tag handlers for quiz XML.

mod discussion;
mod document;
mod index;
mod question;

pub use discussion::*;
pub use document::*;
pub use index::*;
pub use question::*;
