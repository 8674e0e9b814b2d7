//! Arena-backed document tree.

use crate::value::Value;
use crate::DEFAULT_SLOT;

/// Index of a node in the document arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(u32);

impl NodeId {
    /// The position of this node in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Node {
    /// A named, attributed directive (block or inline).
    Directive(DirectiveNode),
    /// Literal text content, opaque to the engine.
    Text(TextNode),
}

/// A named directive with attributes and slotted children.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DirectiveNode {
    /// The directive kind, e.g. `block-hero` or `ellipsis`.
    pub name: String,
    /// Key-value attributes from the `{...}` list. Keys are unique.
    pub attributes: Attributes,
    /// Body content partitioned by slot name. Inline directives have none.
    pub slots: Slots,
    /// `true` for single-line `:name{...}` directives, `false` for fenced
    /// `::name ... ::` blocks.
    pub inline: bool,
    /// 1-based source line of the opening fence or inline span.
    pub line: usize,
}

/// An inert text leaf. Inline markdown (links, emphasis) passes through
/// unmodified; interpreting it is the concern of an external renderer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextNode {
    /// The raw text, verbatim.
    pub text: String,
    /// 1-based source line.
    pub line: usize,
}

/// Unique-key attribute mapping that preserves source order.
///
/// Duplicate keys are a parse error in the dialect, so [`Attributes::insert`]
/// refuses them rather than overwriting; the resolver turns the refusal into
/// a `DuplicateAttribute` diagnostic.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Attributes(Vec<(String, Value)>);

impl Attributes {
    /// Create an empty attribute list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a key-value pair.
    ///
    /// Returns `false` (and leaves the map unchanged) if the key is already
    /// present. Last-write-wins is deliberately not supported.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> bool {
        let key = key.into();
        if self.contains(&key) {
            return false;
        }
        self.0.push((key, value.into()));
        true
    }

    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether the key is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Iterate over `(key, value)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Body content of a directive, partitioned by slot name.
///
/// Slot order follows the source: the reserved `default` slot (unlabeled
/// content before the first `#name` marker) always sorts first because it
/// is created when the directive opens.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Slots(Vec<(String, Vec<NodeId>)>);

impl Slots {
    /// Create an empty slot set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new, empty slot.
    ///
    /// Returns `false` if a slot with this name already exists; each slot
    /// may be defined once per directive body.
    pub fn open(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.0.push((name, Vec::new()));
        true
    }

    /// Append a child to the named slot, opening it if needed.
    pub fn push_into(&mut self, name: &str, id: NodeId) {
        if let Some((_, children)) = self.0.iter_mut().find(|(n, _)| n == name) {
            children.push(id);
        } else {
            self.0.push((name.to_owned(), vec![id]));
        }
    }

    /// Children of the named slot, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[NodeId]> {
        self.0
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.as_slice())
    }

    /// Children of the reserved `default` slot, if present.
    #[must_use]
    pub fn default_slot(&self) -> Option<&[NodeId]> {
        self.get(DEFAULT_SLOT)
    }

    /// Whether a slot with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|(n, _)| n == name)
    }

    /// Iterate over `(name, children)` pairs in source order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[NodeId])> {
        self.0.iter().map(|(n, c)| (n.as_str(), c.as_slice()))
    }

    /// Slot names in source order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(n, _)| n.as_str())
    }

    /// Number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no slots at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A parsed document: an arena of nodes plus the ordered top-level roots.
///
/// # Example
///
/// ```
/// use mdc_ast::{Document, Node, TextNode};
///
/// let mut doc = Document::new();
/// let id = doc.push(Node::Text(TextNode { text: "Hello".into(), line: 1 }));
/// doc.add_root(id);
/// assert_eq!(doc.roots().len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the arena and return its id.
    pub fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        self.nodes.push(node);
        id
    }

    /// Append a top-level child.
    pub fn add_root(&mut self, id: NodeId) {
        self.roots.push(id);
    }

    /// Resolve a node id.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    /// The ordered top-level children.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Total number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Structural equality that ignores source line numbers.
    ///
    /// Serializing a tree and re-parsing it shifts lines (blank separators
    /// are not preserved), so round-trip comparisons use shape, names,
    /// attributes, and text only.
    #[must_use]
    pub fn same_shape(&self, other: &Document) -> bool {
        if self.roots.len() != other.roots.len() {
            return false;
        }
        self.roots
            .iter()
            .zip(&other.roots)
            .all(|(a, b)| same_node(self, *a, other, *b))
    }
}

fn same_node(a_doc: &Document, a: NodeId, b_doc: &Document, b: NodeId) -> bool {
    match (a_doc.node(a), b_doc.node(b)) {
        (Node::Text(ta), Node::Text(tb)) => ta.text == tb.text,
        (Node::Directive(da), Node::Directive(db)) => {
            if da.name != db.name
                || da.inline != db.inline
                || da.attributes != db.attributes
                || da.slots.len() != db.slots.len()
            {
                return false;
            }
            da.slots.iter().zip(db.slots.iter()).all(
                |((name_a, kids_a), (name_b, kids_b))| {
                    name_a == name_b
                        && kids_a.len() == kids_b.len()
                        && kids_a
                            .iter()
                            .zip(kids_b)
                            .all(|(ka, kb)| same_node(a_doc, *ka, b_doc, *kb))
                },
            )
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(doc: &mut Document, s: &str, line: usize) -> NodeId {
        doc.push(Node::Text(TextNode {
            text: s.to_owned(),
            line,
        }))
    }

    #[test]
    fn test_attributes_reject_duplicates() {
        let mut attrs = Attributes::new();
        assert!(attrs.insert("icon", "x"));
        assert!(!attrs.insert("icon", "y"));
        assert_eq!(attrs.get("icon"), Some(&Value::Str("x".into())));
        assert_eq!(attrs.len(), 1);
    }

    #[test]
    fn test_attributes_preserve_order() {
        let mut attrs = Attributes::new();
        attrs.insert("b", "1");
        attrs.insert("a", "2");
        let keys: Vec<_> = attrs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_slots_reject_duplicate_open() {
        let mut slots = Slots::new();
        assert!(slots.open("title"));
        assert!(!slots.open("title"));
    }

    #[test]
    fn test_same_shape_ignores_lines() {
        let mut a = Document::new();
        let id = text(&mut a, "Hello", 1);
        a.add_root(id);

        let mut b = Document::new();
        let id = text(&mut b, "Hello", 42);
        b.add_root(id);

        assert!(a.same_shape(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_same_shape_detects_text_difference() {
        let mut a = Document::new();
        let id = text(&mut a, "Hello", 1);
        a.add_root(id);

        let mut b = Document::new();
        let id = text(&mut b, "World", 1);
        b.add_root(id);

        assert!(!a.same_shape(&b));
    }
}
