//! The pluggable rendering backend trait and its traversal driver.

use mdc_ast::{DirectiveNode, Document, TextNode, Visitor};

/// Format-specific rendering callbacks.
///
/// The driver hands the backend the tree in pre-order. Directives arrive
/// as `(kind, attributes, slots)` via [`DirectiveNode`]; the backend owns
/// every layout and formatting decision, including what to do with slot
/// boundaries and raw inline markdown.
pub trait RenderBackend {
    /// A directive opens. Its slots follow, then [`RenderBackend::directive_end`].
    fn directive_start(&mut self, directive: &DirectiveNode);

    /// A directive closes.
    fn directive_end(&mut self, directive: &DirectiveNode);

    /// A slot opens within the current directive. The reserved `default`
    /// slot is reported like any other.
    fn slot_start(&mut self, name: &str);

    /// A slot closes.
    fn slot_end(&mut self, name: &str);

    /// A text leaf: the raw inline-markdown string, untouched.
    fn text(&mut self, text: &TextNode);
}

/// Drive a backend over the whole document in pre-order.
pub fn render<B: RenderBackend>(doc: &Document, backend: &mut B) {
    let mut driver = Driver { backend };
    doc.walk(&mut driver);
}

/// Adapts the tree visitor to the backend callbacks.
struct Driver<'a, B> {
    backend: &'a mut B,
}

impl<B: RenderBackend> Visitor for Driver<'_, B> {
    fn enter_directive(&mut self, directive: &DirectiveNode) {
        self.backend.directive_start(directive);
    }

    fn leave_directive(&mut self, directive: &DirectiveNode) {
        self.backend.directive_end(directive);
    }

    fn enter_slot(&mut self, name: &str) {
        self.backend.slot_start(name);
    }

    fn leave_slot(&mut self, name: &str) {
        self.backend.slot_end(name);
    }

    fn text(&mut self, text: &TextNode) {
        self.backend.text(text);
    }
}
