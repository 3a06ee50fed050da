//! Registry configuration for the quiz XML written by TeX4ht.

use super::core::TagRegistry;
use super::types::{DiscussionField, DocumentField, TagKind};
use crate::config::{ATTRIBUTE_SETTING_TAGS, SETTING_TAGS};

/// Root element name.
pub const ROOT_TAG: &str = "webquiz";

/// Root element name used by older versions of the LaTeX class.
pub const LEGACY_ROOT_TAG: &str = "webquiztex";

/// Create a registry configured for quiz XML.
#[must_use]
pub fn create_quiz_registry() -> TagRegistry {
    let mut registry = TagRegistry::new();

    // Page-level elements
    registry.register(ROOT_TAG, TagKind::Root);
    registry.register(LEGACY_ROOT_TAG, TagKind::Root);
    registry.register("link", TagKind::Link);
    registry.register("meta", TagKind::Meta);
    registry.register("breadcrumb", TagKind::Breadcrumb);
    registry.register("unit_name", TagKind::UnitName);
    registry.register("title", TagKind::Document(DocumentField::Title));
    registry.register("unit_code", TagKind::Document(DocumentField::UnitCode));

    // Settings: text resolved at close, some also take attributes at open
    for key in SETTING_TAGS {
        registry.register(
            key,
            TagKind::Setting {
                key,
                attributes: ATTRIBUTE_SETTING_TAGS.contains(&key),
            },
        );
    }
    for tag in ATTRIBUTE_SETTING_TAGS {
        if !registry.has_handler(tag) {
            registry.register(tag, TagKind::AttributeSettings);
        }
    }

    // Discussions
    registry.register("discussion", TagKind::Discussion);
    registry.register("heading", TagKind::DiscussionField(DiscussionField::Heading));
    registry.register(
        "short_heading",
        TagKind::DiscussionField(DiscussionField::ShortHeading),
    );

    // Questions
    registry.register("question", TagKind::Question);
    registry.register("answer", TagKind::Answer);
    registry.register("choice", TagKind::Choice);
    registry.register("item", TagKind::Item);
    registry.register("feedback", TagKind::Feedback);
    registry.register("when", TagKind::When);

    // Quiz index pages
    registry.register("index_item", TagKind::IndexItem);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_quiz_registry() {
        let registry = create_quiz_registry();

        assert_eq!(registry.lookup("webquiz"), TagKind::Root);
        assert_eq!(registry.lookup("webquiztex"), TagKind::Root);
        assert_eq!(registry.lookup("question"), TagKind::Question);
        assert_eq!(registry.lookup("index_item"), TagKind::IndexItem);
        assert_eq!(
            registry.lookup("title"),
            TagKind::Document(DocumentField::Title)
        );

        // Unknown markup is generic
        assert_eq!(registry.lookup("p"), TagKind::Generic);
    }

    #[test]
    fn test_setting_tags() {
        let registry = create_quiz_registry();

        assert_eq!(
            registry.lookup("department"),
            TagKind::Setting {
                key: "department",
                attributes: true
            }
        );
        assert_eq!(
            registry.lookup("theme"),
            TagKind::Setting {
                key: "theme",
                attributes: false
            }
        );
        assert_eq!(registry.lookup("uni"), TagKind::AttributeSettings);
    }
}
