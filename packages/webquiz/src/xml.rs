//! Reading quiz XML into the tag stream.
//!
//! TeX4ht writes the quiz as a small XML document. The document is parsed
//! with roxmltree and walked depth first; every element produces an open
//! and a close event, and every text node (including the text between
//! child elements) produces a text event.

use std::fs;
use std::path::Path;

use roxmltree::{Document, Node, ParsingOptions};

use crate::config::Defaults;
use crate::error::Result;
use crate::registry::{QuizBuilder, TagEvent};
use crate::types::{Attributes, QuizDocument};

/// Parse XML text, allowing the DOCTYPE that TeX4ht emits.
fn parse_document(xml: &str) -> Result<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(xml, options)?)
}

/// Get the tag name without namespace prefix.
fn tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Collect the attributes of an element in document order.
fn attributes(node: Node<'_, '_>) -> Attributes {
    node.attributes()
        .map(|attr| (attr.name().to_string(), attr.value().to_string()))
        .collect()
}

/// Visit `node` and its descendants in document order.
fn walk(node: Node<'_, '_>, visit: &mut dyn FnMut(TagEvent) -> Result<()>) -> Result<()> {
    if node.is_text() {
        if let Some(text) = node.text() {
            visit(TagEvent::text(text))?;
        }
        return Ok(());
    }
    if !node.is_element() {
        return Ok(());
    }

    let name = tag_name(node);
    visit(TagEvent::Open {
        tag: name.to_string(),
        attributes: attributes(node),
    })?;
    for child in node.children() {
        walk(child, visit)?;
    }
    visit(TagEvent::close(name))
}

/// Convert quiz XML into its tag stream.
///
/// # Errors
/// Returns `XmlParse` if the XML is not well formed.
///
/// # Examples
/// ```
/// use webquiz::registry::TagEvent;
/// use webquiz::xml::tag_events;
///
/// let events = tag_events("<title>Limits</title>").unwrap();
/// assert_eq!(
///     events,
///     vec![
///         TagEvent::open_bare("title"),
///         TagEvent::text("Limits"),
///         TagEvent::close("title"),
///     ]
/// );
/// ```
pub fn tag_events(xml: &str) -> Result<Vec<TagEvent>> {
    let doc = parse_document(xml)?;
    let mut events = Vec::new();
    walk(doc.root_element(), &mut |event| {
        events.push(event);
        Ok(())
    })?;
    Ok(events)
}

/// Build a quiz document from XML text.
///
/// # Errors
/// Returns `XmlParse` for malformed XML, `UnknownSetting` for incomplete
/// defaults, otherwise any error raised while building the document.
pub fn read_quiz(xml: &str, defaults: &Defaults) -> Result<QuizDocument> {
    let doc = parse_document(xml)?;
    let mut builder = QuizBuilder::new(defaults)?;
    walk(doc.root_element(), &mut |event| builder.feed(event))?;
    builder.finish()
}

/// Build a quiz document from an XML file.
///
/// # Errors
/// Returns `Io` if the file cannot be read, otherwise see [`read_quiz`].
pub fn read_quiz_file(path: &Path, defaults: &Defaults) -> Result<QuizDocument> {
    tracing::debug!(path = %path.display(), "Reading quiz XML");
    let xml = fs::read_to_string(path)?;
    read_quiz(&xml, defaults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuizError;

    #[test]
    fn test_tag_events_include_tail_text() {
        let xml = concat!(
            "<question>Find <em>x</em> now",
            r#"<answer comparison="number">2</answer></question>"#,
        );
        let events = tag_events(xml).unwrap();

        assert_eq!(
            events,
            vec![
                TagEvent::open_bare("question"),
                TagEvent::text("Find "),
                TagEvent::open_bare("em"),
                TagEvent::text("x"),
                TagEvent::close("em"),
                TagEvent::text(" now"),
                TagEvent::open("answer", [("comparison", "number")]),
                TagEvent::text("2"),
                TagEvent::close("answer"),
                TagEvent::close("question"),
            ]
        );
    }

    #[test]
    fn test_tag_events_allow_doctype() {
        let xml = "<!DOCTYPE webquiz>\n<webquiz><!-- generated --><title>T</title></webquiz>";
        let events = tag_events(xml).unwrap();
        assert_eq!(events.len(), 5);
    }

    #[test]
    fn test_read_quiz_malformed_xml() {
        let err = read_quiz("<webquiz><title></webquiz>", &Defaults::builtin()).unwrap_err();
        assert!(matches!(err, QuizError::XmlParse(_)));
    }

    #[test]
    fn test_read_quiz_minimal() {
        let xml = r#"<webquiz language="DeFaUlT"><title>Vectors</title></webquiz>"#;
        let document = read_quiz(xml, &Defaults::builtin()).unwrap();

        assert_eq!(document.title, "Vectors");
        assert_eq!(document.setting("language"), Some("english"));
        assert!(document.questions.is_empty());
    }
}
