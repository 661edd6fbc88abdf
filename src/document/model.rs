//! Paragraph model

use serde::Serialize;

/// One body paragraph of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paragraph {
    /// Concatenated run text
    pub text: String,
    /// Resolved style display name, if any
    pub style: Option<String>,
}

impl Paragraph {
    /// Create a paragraph with a style name
    pub fn styled(text: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Some(style.into()),
        }
    }

    /// Create a paragraph without a style
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    /// Whether the style name starts with `prefix`.
    ///
    /// Unstyled paragraphs never match.
    pub fn has_style_prefix(&self, prefix: &str) -> bool {
        self.style
            .as_deref()
            .map(|name| name.starts_with(prefix))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_prefix() {
        assert!(Paragraph::styled("Intro", "Heading 1").has_style_prefix("Heading 1"));
        assert!(Paragraph::styled("Intro", "Heading 1 Char").has_style_prefix("Heading 1"));
        assert!(!Paragraph::styled("Intro", "Heading 2").has_style_prefix("Heading 1"));
        assert!(!Paragraph::styled("Intro", "heading 1").has_style_prefix("Heading 1"));
        assert!(!Paragraph::plain("Intro").has_style_prefix("Heading 1"));
    }
}
