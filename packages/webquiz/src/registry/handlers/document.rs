//! Handlers for page-level elements: the root, settings and document text.

use crate::config::DEFAULT_MARKER;
use crate::error::Result;
use crate::registry::types::{BuildContext, DocumentField};
use crate::types::{attribute, PageFlags};

/// Open handler for the root element.
///
/// Every attribute `k="v"` is resolved as setting `k`, then the boolean
/// settings are coerced and `language` and `theme` are lower-cased.
pub fn open_root(context: &mut BuildContext<'_>, attributes: &[(String, String)]) -> Result<()> {
    for (key, value) in attributes {
        context.set_setting(key, value)?;
    }

    context.document.flags = PageFlags::from_settings(&context.document.settings);

    for key in ["language", "theme"] {
        if let Some(value) = context.document.settings.get(key) {
            let lowered = value.to_lowercase();
            context.document.settings.set(key, lowered);
        }
    }
    Ok(())
}

/// Open handler for `<department>`, `<institution>` and `<uni>`.
///
/// Every attribute value is resolved as the setting named by the tag, so
/// the last attribute wins.
pub fn open_attribute_settings(
    context: &mut BuildContext<'_>,
    tag: &str,
    attributes: &[(String, String)],
) -> Result<()> {
    for (_, value) in attributes {
        context.set_setting(tag, value)?;
    }
    Ok(())
}

/// Open handler for `<link>` elements.
pub fn open_link(context: &mut BuildContext<'_>, attributes: &[(String, String)]) {
    context.document.links.push(attributes.to_vec());
}

/// Open handler for `<meta>` elements.
pub fn open_meta(context: &mut BuildContext<'_>, attributes: &[(String, String)]) {
    context.document.metas.push(attributes.to_vec());
}

/// Open handler for `<breadcrumb>`: resolves the `breadcrumbs` setting.
pub fn open_breadcrumb(
    context: &mut BuildContext<'_>,
    attributes: &[(String, String)],
) -> Result<()> {
    if let Some(value) = attribute(attributes, "breadcrumbs") {
        context.set_setting("breadcrumbs", value)?;
    }
    Ok(())
}

/// Open handler for `<unit_name>`: resolves the unit and quizzes URLs.
///
/// A sentinel `quizzes_url` is derived as `unit_url + "/Quizzes"`.
pub fn open_unit_name(
    context: &mut BuildContext<'_>,
    attributes: &[(String, String)],
) -> Result<()> {
    if let Some(url) = attribute(attributes, "url") {
        context.set_setting("unit_url", url)?;
    }

    context.document.quizzes_url = attribute(attributes, "quizzes_url").map(|url| {
        if url.trim() == DEFAULT_MARKER {
            let unit_url = context.document.settings.get("unit_url").unwrap_or_default();
            format!("{unit_url}/Quizzes")
        } else {
            url.to_string()
        }
    });
    Ok(())
}

/// Close handler for setting elements: the trimmed text is resolved.
///
/// The setting must have a default even when the text is not the sentinel.
pub fn close_setting(context: &mut BuildContext<'_>, key: &str) -> Result<()> {
    let text = context.text.take_trimmed();
    context.set_known_setting(key, &text)
}

/// Close handler for plain document text fields.
pub fn close_document_field(context: &mut BuildContext<'_>, field: DocumentField) {
    let text = context.text.take_trimmed();
    let document = &mut context.document;
    match field {
        DocumentField::Title => document.title = text,
        DocumentField::UnitCode => document.unit_code = text,
        DocumentField::UnitName => document.unit_name = text,
        DocumentField::Breadcrumb => document.breadcrumb = text,
    }
}
