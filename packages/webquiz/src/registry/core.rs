//! Tag registry mapping tag names to their behavior.

use std::collections::HashMap;

use super::types::TagKind;

/// Registry mapping tag names to a [`TagKind`].
///
/// Tags that are not registered fall back to [`TagKind::Generic`], whose
/// text bubbles up to the enclosing element.
#[derive(Debug, Clone)]
pub struct TagRegistry {
    kinds: HashMap<String, TagKind>,
}

impl TagRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Register the behavior for a tag name.
    pub fn register(&mut self, tag_name: impl Into<String>, kind: TagKind) {
        self.kinds.insert(tag_name.into(), kind);
    }

    /// Look up the behavior for a tag, falling back to `Generic`.
    #[must_use]
    pub fn lookup(&self, tag_name: &str) -> TagKind {
        self.kinds
            .get(tag_name)
            .copied()
            .unwrap_or(TagKind::Generic)
    }

    /// Check if a tag has registered behavior.
    #[must_use]
    pub fn has_handler(&self, tag_name: &str) -> bool {
        self.kinds.contains_key(tag_name)
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}
