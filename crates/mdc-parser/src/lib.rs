//! Parser for the MDC directive dialect.
//!
//! The dialect composes a content page from nested, attributed, slot-based
//! directives:
//!
//! ```text
//! ::card{icon=star}
//! #title
//! Getting started
//! #description
//! Parse :ellipsis{width=75%} and hand the tree to a renderer.
//! ::
//! ```
//!
//! Parsing is a pure function from text to a [`mdc_ast::Document`] or a
//! fatal [`ParseError`]: tokenization ([`Tokenizer`]), depth-first tree
//! construction with an explicit fence stack ([`Parser`]), typed attribute
//! resolution ([`parse_attributes`]), and slot binding along the way.
//! Schema validation is a separate, non-fatal pass in `mdc-schema`.
//!
//! # Example
//!
//! ```
//! use mdc_ast::Node;
//!
//! let doc = mdc_parser::parse("::card\n#title\nA\n#description\nB\n::\n").unwrap();
//! let Node::Directive(card) = doc.node(doc.roots()[0]) else { unreachable!() };
//! assert_eq!(card.name, "card");
//! assert_eq!(card.slots.get("title").unwrap().len(), 1);
//! ```

mod attrs;
mod error;
mod parser;
mod token;

pub use attrs::parse_attributes;
pub use error::{ParseError, ParseErrorKind};
pub use parser::{parse, Parser, ParserLimits};
pub use token::{Token, Tokenizer};
