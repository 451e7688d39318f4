// src/models/search.rs

//! Search result types.

use std::fmt;

use serde::Serialize;

/// Which catalogue source a result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Service,
    Page,
    Testimonial,
}

impl ResultKind {
    pub fn label(&self) -> &'static str {
        match self {
            ResultKind::Service => "Service",
            ResultKind::Page => "Page",
            ResultKind::Testimonial => "Testimonial",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A navigable search hit. Derived per query, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    #[serde(rename = "type")]
    pub kind: ResultKind,
    pub title: String,
    pub description: String,
    pub href: String,
    pub icon: String,
    /// Higher ranks first
    pub relevance: u8,
}

impl SearchResult {
    /// Format result for display using a template.
    ///
    /// Supported placeholders: `{type}`, `{title}`, `{description}`,
    /// `{href}`, `{relevance}`
    pub fn format(&self, template: &str) -> String {
        template
            .replace("{type}", self.kind.label())
            .replace("{title}", &self.title)
            .replace("{description}", &self.description)
            .replace("{href}", &self.href)
            .replace("{relevance}", &self.relevance.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let result = SearchResult {
            kind: ResultKind::Page,
            title: "Contact Us".into(),
            description: "Navigate to Contact Us page".into(),
            href: "/contact".into(),
            icon: "file-text".into(),
            relevance: 2,
        };
        assert_eq!(result.format("[{type}] {title} -> {href}"), "[Page] Contact Us -> /contact");
    }
}
