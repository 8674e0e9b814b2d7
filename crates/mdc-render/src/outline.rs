//! Plain-text outline backend.

use std::fmt::Write;

use mdc_ast::{DirectiveNode, TextNode, DEFAULT_SLOT};

use crate::backend::RenderBackend;

/// Renders the tree as an indented outline, one node per line.
///
/// Directives keep their source prefix (`::` for blocks, `:` for inline),
/// attributes are shown in `key=value` form, named slots appear as
/// `#name` headers, and default-slot content sits directly under its
/// directive. Used by `mdc tree` and as a cheap structural snapshot in
/// tests.
#[derive(Debug, Default)]
pub struct Outline {
    out: String,
    depth: usize,
}

impl Outline {
    /// Create an empty outline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The finished outline text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.out
    }

    fn line(&mut self, content: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(content);
        self.out.push('\n');
    }
}

impl RenderBackend for Outline {
    fn directive_start(&mut self, directive: &DirectiveNode) {
        let prefix = if directive.inline { ":" } else { "::" };
        let mut line = format!("{prefix}{}", directive.name);
        for (key, value) in directive.attributes.iter() {
            let _ = write!(line, " {key}={value}");
        }
        self.line(&line);
        self.depth += 1;
    }

    fn directive_end(&mut self, _directive: &DirectiveNode) {
        self.depth -= 1;
    }

    fn slot_start(&mut self, name: &str) {
        if name != DEFAULT_SLOT {
            self.line(&format!("#{name}"));
            self.depth += 1;
        }
    }

    fn slot_end(&mut self, name: &str) {
        if name != DEFAULT_SLOT {
            self.depth -= 1;
        }
    }

    fn text(&mut self, text: &TextNode) {
        self.line(&text.text);
    }
}
