//! Serialization of a document tree back to directive syntax.
//!
//! The output is canonical rather than byte-identical to the input: blank
//! separator lines are not preserved and attribute quoting is normalized.
//! Re-parsing the output yields a tree that is [`Document::same_shape`]
//! with the original.

use std::fmt::Write;

use crate::node::{Attributes, DirectiveNode, Document, Node, NodeId};
use crate::value::Value;
use crate::DEFAULT_SLOT;

impl Document {
    /// Serialize the tree to directive syntax.
    ///
    /// # Example
    ///
    /// ```
    /// use mdc_ast::{Attributes, DirectiveNode, Document, Node, Slots, TextNode};
    ///
    /// let mut doc = Document::new();
    /// let text = doc.push(Node::Text(TextNode { text: "Hello".into(), line: 2 }));
    /// let mut slots = Slots::new();
    /// slots.push_into("default", text);
    /// let card = doc.push(Node::Directive(DirectiveNode {
    ///     name: "card".into(),
    ///     attributes: Attributes::new(),
    ///     slots,
    ///     inline: false,
    ///     line: 1,
    /// }));
    /// doc.add_root(card);
    /// assert_eq!(doc.to_source(), "::card\nHello\n::\n");
    /// ```
    #[must_use]
    pub fn to_source(&self) -> String {
        let mut out = String::with_capacity(self.len() * 16);
        for root in self.roots() {
            self.write_node(*root, &mut out);
        }
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        match self.node(id) {
            Node::Text(text) => {
                out.push_str(&text.text);
                out.push('\n');
            }
            Node::Directive(directive) if directive.inline => {
                out.push(':');
                out.push_str(&directive.name);
                // The inline form is only recognized with braces present,
                // so an empty list still emits `{}`.
                if directive.attributes.is_empty() {
                    out.push_str("{}");
                } else {
                    write_attributes(&directive.attributes, out);
                }
                out.push('\n');
            }
            Node::Directive(directive) => {
                out.push_str("::");
                out.push_str(&directive.name);
                write_attributes(&directive.attributes, out);
                out.push('\n');
                self.write_body(directive, out);
                out.push_str("::\n");
            }
        }
    }

    fn write_body(&self, directive: &DirectiveNode, out: &mut String) {
        for (slot, children) in directive.slots.iter() {
            if slot != DEFAULT_SLOT {
                out.push('#');
                out.push_str(slot);
                out.push('\n');
            }
            for child in children {
                self.write_node(*child, out);
            }
        }
    }
}

fn write_attributes(attrs: &Attributes, out: &mut String) {
    if attrs.is_empty() {
        return;
    }
    out.push('{');
    for (i, (key, value)) in attrs.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        match value {
            // A bare key reads back as boolean true.
            Value::Bool(true) => out.push_str(key),
            Value::Bool(false) => {
                let _ = write!(out, "{key}=false");
            }
            Value::Num(_) => {
                let _ = write!(out, "{key}={value}");
            }
            Value::Str(s) => {
                let _ = write!(out, "{key}={}", quoted_if_needed(s));
            }
        }
    }
    out.push('}');
}

/// Quote a string value when the bare form would not survive re-parsing:
/// empty, containing whitespace or quotes, or reading back as a number or
/// boolean.
fn quoted_if_needed(s: &str) -> String {
    let ambiguous = s.is_empty()
        || s.contains(char::is_whitespace)
        || s.contains('"')
        || s.contains('\'')
        || s.contains('}')
        || s.parse::<f64>().is_ok()
        || s == "true"
        || s == "false";
    if !ambiguous {
        return s.to_owned();
    }
    if s.contains('"') {
        format!("'{s}'")
    } else {
        format!("\"{s}\"")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Slots, TextNode};

    fn directive(doc: &mut Document, name: &str, attrs: Attributes, slots: Slots) -> NodeId {
        doc.push(Node::Directive(DirectiveNode {
            name: name.to_owned(),
            attributes: attrs,
            slots,
            inline: false,
            line: 1,
        }))
    }

    #[test]
    fn test_named_slots_emit_headers() {
        let mut doc = Document::new();
        let a = doc.push(Node::Text(TextNode {
            text: "A".into(),
            line: 3,
        }));
        let mut slots = Slots::new();
        slots.push_into("title", a);
        let card = directive(&mut doc, "card", Attributes::new(), slots);
        doc.add_root(card);
        assert_eq!(doc.to_source(), "::card\n#title\nA\n::\n");
    }

    #[test]
    fn test_inline_directive_form() {
        let mut doc = Document::new();
        let mut attrs = Attributes::new();
        attrs.insert("right", "0px");
        let id = doc.push(Node::Directive(DirectiveNode {
            name: "ellipsis".into(),
            attributes: attrs,
            slots: Slots::new(),
            inline: true,
            line: 1,
        }));
        doc.add_root(id);
        assert_eq!(doc.to_source(), ":ellipsis{right=0px}\n");
    }

    #[test]
    fn test_attribute_quoting() {
        let mut attrs = Attributes::new();
        attrs.insert("title", "Hello World");
        attrs.insert("width", 560.0);
        attrs.insert("bordered", true);
        attrs.insert("count", "12");
        let mut doc = Document::new();
        let id = directive(&mut doc, "card", attrs, Slots::new());
        doc.add_root(id);
        assert_eq!(
            doc.to_source(),
            "::card{title=\"Hello World\" width=560 bordered count=\"12\"}\n::\n"
        );
    }
}
