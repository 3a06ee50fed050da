//! Character data buffered between tag boundaries.

/// Accumulates text until an element that knows what to do with it closes.
///
/// Text that no close handler consumes stays in the buffer, so it bubbles up
/// to the enclosing element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextAccumulator {
    buffer: String,
}

impl TextAccumulator {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw fragment.
    pub fn push(&mut self, fragment: &str) {
        self.buffer.push_str(fragment);
    }

    /// The buffered text, untouched.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// The buffered text without surrounding whitespace.
    #[must_use]
    pub fn trimmed(&self) -> &str {
        self.buffer.trim()
    }

    /// Whether the buffer holds nothing but whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.buffer.trim().is_empty()
    }

    /// Take the buffered text, leaving the buffer empty.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.buffer)
    }

    /// Take the buffered text trimmed, leaving the buffer empty.
    pub fn take_trimmed(&mut self) -> String {
        let text = self.buffer.trim().to_string();
        self.buffer.clear();
        text
    }

    /// Discard the buffered text.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_take() {
        let mut text = TextAccumulator::new();
        text.push("Hello ");
        text.push("world\n");

        assert_eq!(text.as_str(), "Hello world\n");
        assert_eq!(text.trimmed(), "Hello world");
        assert_eq!(text.take(), "Hello world\n");
        assert_eq!(text.as_str(), "");
    }

    #[test]
    fn test_take_trimmed() {
        let mut text = TextAccumulator::new();
        text.push("  42 \n");
        assert_eq!(text.take_trimmed(), "42");
        assert!(text.is_blank());
    }

    #[test]
    fn test_is_blank() {
        let mut text = TextAccumulator::new();
        assert!(text.is_blank());
        text.push(" \n\t");
        assert!(text.is_blank());
        text.push("x");
        assert!(!text.is_blank());
    }
}
