//! Document tree types for the MDC directive dialect.
//!
//! A parsed document is an arena: every node lives in a flat `Vec` owned by
//! the [`Document`], and structure is expressed through [`NodeId`] indices.
//! This keeps the tree free of recursive ownership while still allowing
//! unbounded nesting.
//!
//! The tree is built once by the parser and is not mutated afterwards.
//! Consumers traverse it through [`Document::walk`] with a [`Visitor`], or
//! serialize it back to directive syntax with [`Document::to_source`].

mod node;
mod path;
mod value;
mod visit;
mod writer;

pub use node::{Attributes, DirectiveNode, Document, Node, NodeId, Slots, TextNode};
pub use path::NodePath;
pub use value::Value;
pub use visit::Visitor;

/// Name of the reserved slot that collects unlabeled body content.
pub const DEFAULT_SLOT: &str = "default";
