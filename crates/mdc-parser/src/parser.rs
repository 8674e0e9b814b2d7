//! Directive parser: token stream to document tree.
//!
//! Depth-first construction with an explicit stack of open-directive
//! frames. Parse errors are fatal and fail-fast: the caller gets the first
//! error with its line number and no partial tree.

use mdc_ast::{Attributes, DirectiveNode, Document, Node, Slots, TextNode, DEFAULT_SLOT};

use crate::attrs::parse_attributes;
use crate::error::{ParseError, ParseErrorKind};
use crate::token::{Token, Tokenizer};

/// Safeguards against pathological or adversarial input.
///
/// Parsing is bounded by input size rather than time, so a size cap and a
/// nesting cap are the recommended protections (no timeout needed).
#[derive(Debug, Clone, Copy)]
pub struct ParserLimits {
    /// Maximum accepted input length in bytes.
    pub max_input_bytes: usize,
    /// Maximum directive nesting depth.
    pub max_depth: usize,
}

impl Default for ParserLimits {
    fn default() -> Self {
        Self {
            max_input_bytes: 1024 * 1024,
            max_depth: 64,
        }
    }
}

/// Parser for the MDC directive dialect.
///
/// Parsing is a pure function from text to `Result<Document, ParseError>`:
/// no state is shared between calls, so independent documents may be
/// parsed from independent threads without coordination.
///
/// # Example
///
/// ```
/// use mdc_parser::Parser;
///
/// let doc = Parser::new().parse("::card{icon=x}\nHello\n::\n").unwrap();
/// assert_eq!(doc.roots().len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Parser {
    limits: ParserLimits,
}

impl Parser {
    /// Create a parser with default limits.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the input-size and nesting caps.
    #[must_use]
    pub fn with_limits(mut self, limits: ParserLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Parse a source document into a tree.
    pub fn parse(&self, source: &str) -> Result<Document, ParseError> {
        if source.len() > self.limits.max_input_bytes {
            return Err(ParseError::new(
                ParseErrorKind::InputTooLarge {
                    limit: self.limits.max_input_bytes,
                },
                1,
            ));
        }

        let mut state = ParseState {
            doc: Document::new(),
            stack: Vec::new(),
            max_depth: self.limits.max_depth,
        };

        for token in Tokenizer::new(source) {
            state.process(token?)?;
        }
        let doc = state.finalize()?;

        tracing::debug!(
            nodes = doc.len(),
            roots = doc.roots().len(),
            "document parsed"
        );
        Ok(doc)
    }
}

/// Parse a source document with default limits.
pub fn parse(source: &str) -> Result<Document, ParseError> {
    Parser::new().parse(source)
}

/// An open fenced directive awaiting its `::` close.
struct Frame {
    name: String,
    attributes: Attributes,
    slots: Slots,
    /// Slot currently receiving children.
    current_slot: String,
    /// Line of the opening fence.
    line: usize,
}

struct ParseState {
    doc: Document,
    stack: Vec<Frame>,
    max_depth: usize,
}

impl ParseState {
    fn process(&mut self, token: Token) -> Result<(), ParseError> {
        match token {
            Token::FenceOpen { name, attrs, line } => {
                if self.stack.len() >= self.max_depth {
                    return Err(ParseError::new(
                        ParseErrorKind::TooDeep {
                            limit: self.max_depth,
                        },
                        line,
                    ));
                }
                let attributes = match attrs {
                    Some(raw) => parse_attributes(&raw, line)?,
                    None => Attributes::new(),
                };
                self.stack.push(Frame {
                    name,
                    attributes,
                    slots: Slots::new(),
                    current_slot: DEFAULT_SLOT.to_owned(),
                    line,
                });
            }

            Token::FenceClose { line } => {
                let Some(frame) = self.stack.pop() else {
                    return Err(ParseError::new(ParseErrorKind::UnmatchedClose, line));
                };
                let node = Node::Directive(DirectiveNode {
                    name: frame.name,
                    attributes: frame.attributes,
                    slots: frame.slots,
                    inline: false,
                    line: frame.line,
                });
                let id = self.doc.push(node);
                self.attach(id);
            }

            Token::SlotMarker { name, line } => {
                let Some(frame) = self.stack.last_mut() else {
                    return Err(ParseError::new(
                        ParseErrorKind::SlotOutsideDirective { name },
                        line,
                    ));
                };
                if !frame.slots.open(&name) {
                    return Err(ParseError::new(
                        ParseErrorKind::DuplicateSlot { name },
                        line,
                    ));
                }
                frame.current_slot = name;
            }

            Token::Inline { name, attrs, line } => {
                let attributes = match attrs {
                    Some(raw) => parse_attributes(&raw, line)?,
                    None => Attributes::new(),
                };
                let id = self.doc.push(Node::Directive(DirectiveNode {
                    name,
                    attributes,
                    slots: Slots::new(),
                    inline: true,
                    line,
                }));
                self.attach(id);
            }

            Token::Text { raw, line } => {
                let id = self.doc.push(Node::Text(TextNode { text: raw, line }));
                self.attach(id);
            }
        }
        Ok(())
    }

    /// Attach a finished node to the innermost open frame's current slot,
    /// or to the document roots when no directive is open.
    fn attach(&mut self, id: mdc_ast::NodeId) {
        if let Some(frame) = self.stack.last_mut() {
            let slot = frame.current_slot.clone();
            frame.slots.push_into(&slot, id);
        } else {
            self.doc.add_root(id);
        }
    }

    fn finalize(mut self) -> Result<Document, ParseError> {
        if let Some(frame) = self.stack.pop() {
            return Err(ParseError::new(
                ParseErrorKind::UnterminatedDirective { name: frame.name },
                frame.line,
            ));
        }
        Ok(self.doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mdc_ast::Value;
    use pretty_assertions::assert_eq;

    fn root_directive(doc: &Document) -> &DirectiveNode {
        assert_eq!(doc.roots().len(), 1);
        match doc.node(doc.roots()[0]) {
            Node::Directive(d) => d,
            Node::Text(t) => panic!("expected directive, got text {t:?}"),
        }
    }

    fn slot_texts(doc: &Document, directive: &DirectiveNode, slot: &str) -> Vec<String> {
        directive
            .slots
            .get(slot)
            .unwrap_or_else(|| panic!("missing slot {slot}"))
            .iter()
            .map(|id| match doc.node(*id) {
                Node::Text(t) => t.text.clone(),
                Node::Directive(d) => format!("::{}", d.name),
            })
            .collect()
    }

    #[test]
    fn test_named_slots() {
        let doc = parse("::card\n#title\nA\n#description\nB\n::\n").unwrap();
        let card = root_directive(&doc);
        assert_eq!(card.name, "card");
        assert!(!card.inline);
        assert_eq!(slot_texts(&doc, card, "title"), vec!["A"]);
        assert_eq!(slot_texts(&doc, card, "description"), vec!["B"]);
        assert!(card.slots.default_slot().is_none());
    }

    #[test]
    fn test_default_slot_with_attrs() {
        let doc = parse("::card{icon=x}\nHello\n::\n").unwrap();
        let card = root_directive(&doc);
        assert_eq!(card.attributes.get("icon"), Some(&Value::Str("x".into())));
        assert_eq!(slot_texts(&doc, card, "default"), vec!["Hello"]);
    }

    #[test]
    fn test_nested_directives() {
        let doc = parse("::outer\n::inner\nX\n::\n::\n").unwrap();
        let outer = root_directive(&doc);
        assert_eq!(outer.name, "outer");
        let default = outer.slots.default_slot().unwrap();
        assert_eq!(default.len(), 1);
        let Node::Directive(inner) = doc.node(default[0]) else {
            panic!("expected nested directive");
        };
        assert_eq!(inner.name, "inner");
        assert_eq!(slot_texts(&doc, inner, "default"), vec!["X"]);
    }

    #[test]
    fn test_indented_nesting() {
        let doc = parse("::outer\n  ::inner\n  X\n  ::\n::\n").unwrap();
        let outer = root_directive(&doc);
        let Node::Directive(inner) = doc.node(outer.slots.default_slot().unwrap()[0]) else {
            panic!("expected nested directive");
        };
        assert_eq!(inner.name, "inner");
        assert_eq!(slot_texts(&doc, inner, "default"), vec!["X"]);
    }

    #[test]
    fn test_unterminated_directive() {
        let err = parse("::a\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::new(
                ParseErrorKind::UnterminatedDirective { name: "a".into() },
                1
            )
        );
    }

    #[test]
    fn test_unterminated_names_innermost() {
        let err = parse("::outer\n::inner\n::\n").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::UnterminatedDirective {
                name: "outer".into()
            }
        );
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_unmatched_close() {
        let err = parse("hello\n::\n").unwrap_err();
        assert_eq!(err, ParseError::new(ParseErrorKind::UnmatchedClose, 2));
    }

    #[test]
    fn test_slot_outside_directive() {
        let err = parse("#title\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::new(
                ParseErrorKind::SlotOutsideDirective {
                    name: "title".into()
                },
                1
            )
        );
    }

    #[test]
    fn test_duplicate_slot() {
        let err = parse("::card\n#title\nA\n#title\nB\n::\n").unwrap_err();
        assert_eq!(
            err,
            ParseError::new(
                ParseErrorKind::DuplicateSlot {
                    name: "title".into()
                },
                4
            )
        );
    }

    #[test]
    fn test_duplicate_attribute() {
        let err = parse("::card{icon=x icon=y}\n::\n").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::DuplicateAttribute { key: "icon".into() }
        );
    }

    #[test]
    fn test_inline_directive_is_a_leaf() {
        let doc = parse(":ellipsis{right=0px width=75%}\n").unwrap();
        let ellipsis = root_directive(&doc);
        assert_eq!(ellipsis.name, "ellipsis");
        assert!(ellipsis.inline);
        assert!(ellipsis.slots.is_empty());
        assert_eq!(
            ellipsis.attributes.get("right"),
            Some(&Value::Str("0px".into()))
        );
        assert_eq!(
            ellipsis.attributes.get("width"),
            Some(&Value::Str("75%".into()))
        );
    }

    #[test]
    fn test_inline_inside_directive_body() {
        let doc = parse("::terminal\nwaiting :spinner{size=sm} done\n::\n").unwrap();
        let terminal = root_directive(&doc);
        let default = terminal.slots.default_slot().unwrap();
        assert_eq!(default.len(), 3);
        assert!(matches!(doc.node(default[1]), Node::Directive(d) if d.inline));
    }

    #[test]
    fn test_top_level_children_count() {
        // Top-level Document children = fence-opens at depth 0 plus
        // top-level text paragraphs.
        let doc = parse("::a\n::\nplain\n::b\n::\n").unwrap();
        assert_eq!(doc.roots().len(), 3);
    }

    #[test]
    fn test_slot_marker_binds_to_innermost() {
        // The #label marker inside ::inner must not leak into ::outer.
        let doc = parse("::outer\n::inner\n#label\nX\n::\n#after\nY\n::\n").unwrap();
        let outer = root_directive(&doc);
        assert!(outer.slots.contains("after"));
        assert!(!outer.slots.contains("label"));
        let Node::Directive(inner) = doc.node(outer.slots.default_slot().unwrap()[0]) else {
            panic!("expected inner directive");
        };
        assert!(inner.slots.contains("label"));
    }

    #[test]
    fn test_same_slot_name_in_sibling_directives() {
        let doc = parse("::a\n#title\nA\n::\n::b\n#title\nB\n::\n").unwrap();
        assert_eq!(doc.roots().len(), 2);
    }

    #[test]
    fn test_depth_limit() {
        let limits = ParserLimits {
            max_depth: 2,
            ..ParserLimits::default()
        };
        let parser = Parser::new().with_limits(limits);
        let err = parser.parse("::a\n::b\n::c\n::\n::\n::\n").unwrap_err();
        assert_eq!(err, ParseError::new(ParseErrorKind::TooDeep { limit: 2 }, 3));
    }

    #[test]
    fn test_size_limit() {
        let limits = ParserLimits {
            max_input_bytes: 8,
            ..ParserLimits::default()
        };
        let err = Parser::new()
            .with_limits(limits)
            .parse("::card\nHello\n::\n")
            .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::InputTooLarge { limit: 8 });
    }

    #[test]
    fn test_empty_document() {
        let doc = parse("").unwrap();
        assert!(doc.is_empty());
        assert!(doc.roots().is_empty());
    }

    #[test]
    fn test_round_trip_same_shape() {
        let source = "\
::block-hero{bordered}
#title
The directive engine
#description
Parse :ellipsis{width=75%} and render.
::
plain paragraph
::card{icon=star}
Hello [world](https://example.com)
::
";
        let doc = parse(source).unwrap();
        let reparsed = parse(&doc.to_source()).unwrap();
        assert!(doc.same_shape(&reparsed));
    }

    #[test]
    fn test_round_trip_large_number() {
        let doc = parse("::card{x=1e20}\n::\n").unwrap();
        assert_eq!(root_directive(&doc).attributes.get("x"), Some(&Value::Num(1e20)));
        let reparsed = parse(&doc.to_source()).unwrap();
        assert!(doc.same_shape(&reparsed));
    }

    #[test]
    fn test_round_trip_brace_in_quoted_value() {
        let doc = parse("::card{title=\"a}b\"}\n::\n").unwrap();
        assert_eq!(
            root_directive(&doc).attributes.get("title"),
            Some(&Value::Str("a}b".into()))
        );
        let reparsed = parse(&doc.to_source()).unwrap();
        assert!(doc.same_shape(&reparsed));
    }

    #[test]
    fn test_round_trip_nested() {
        let source = "::outer\n::inner\nX\n::\n::\n";
        let doc = parse(source).unwrap();
        let reparsed = parse(&doc.to_source()).unwrap();
        assert!(doc.same_shape(&reparsed));
        assert_eq!(doc.to_source(), reparsed.to_source());
    }
}
