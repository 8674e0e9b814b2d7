//! Pre-order traversal over the document tree.

use crate::node::{DirectiveNode, Document, Node, NodeId, TextNode};

/// Read-only pre-order visitor.
///
/// This is the contract handed to a rendering collaborator: per directive it
/// sees `(name, attributes, slots)`, per text leaf the raw inline-markdown
/// string. All callbacks have empty defaults so implementations override
/// only what they need.
///
/// # Example
///
/// ```
/// use mdc_ast::{DirectiveNode, Document, Visitor};
///
/// #[derive(Default)]
/// struct KindCollector(Vec<String>);
///
/// impl Visitor for KindCollector {
///     fn enter_directive(&mut self, directive: &DirectiveNode) {
///         self.0.push(directive.name.clone());
///     }
/// }
///
/// let doc = Document::new();
/// let mut collector = KindCollector::default();
/// doc.walk(&mut collector);
/// assert!(collector.0.is_empty());
/// ```
pub trait Visitor {
    /// Called before a directive's slots are traversed.
    fn enter_directive(&mut self, directive: &DirectiveNode) {
        let _ = directive;
    }

    /// Called after a directive's slots were traversed.
    fn leave_directive(&mut self, directive: &DirectiveNode) {
        let _ = directive;
    }

    /// Called before the children of a slot are traversed.
    fn enter_slot(&mut self, name: &str) {
        let _ = name;
    }

    /// Called after the children of a slot were traversed.
    fn leave_slot(&mut self, name: &str) {
        let _ = name;
    }

    /// Called for each text leaf.
    fn text(&mut self, text: &TextNode) {
        let _ = text;
    }
}

impl Document {
    /// Walk the whole document in pre-order, depth-first.
    pub fn walk<V: Visitor>(&self, visitor: &mut V) {
        for id in self.roots() {
            self.walk_from(*id, visitor);
        }
    }

    /// Walk the subtree rooted at `id` in pre-order, depth-first.
    pub fn walk_from<V: Visitor>(&self, id: NodeId, visitor: &mut V) {
        match self.node(id) {
            Node::Text(text) => visitor.text(text),
            Node::Directive(directive) => {
                visitor.enter_directive(directive);
                for (slot, children) in directive.slots.iter() {
                    visitor.enter_slot(slot);
                    for child in children {
                        self.walk_from(*child, visitor);
                    }
                    visitor.leave_slot(slot);
                }
                visitor.leave_directive(directive);
            }
        }
    }
}
