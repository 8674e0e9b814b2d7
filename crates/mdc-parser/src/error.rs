//! Parse error taxonomy.
//!
//! Tokenizer and parser errors are fatal to the parse call: no partial tree
//! is exposed, since a structurally unsound tree must not reach a renderer.
//! Schema problems are a separate, non-fatal channel in `mdc-schema`.

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// A `{` attribute list with no closing `}` on the same line.
    #[error("unterminated attribute list")]
    UnterminatedAttributes,

    /// End of input with a directive still open.
    #[error("directive '{name}' is never closed")]
    UnterminatedDirective {
        /// Name of the innermost still-open directive.
        name: String,
    },

    /// A `::` close line with no open directive.
    #[error("'::' has no matching open directive")]
    UnmatchedClose,

    /// The same attribute key appeared twice in one directive.
    /// Last-write-wins is not permitted.
    #[error("duplicate attribute '{key}'")]
    DuplicateAttribute {
        /// The repeated key.
        key: String,
    },

    /// The same slot name appeared twice in one directive body.
    #[error("slot '#{name}' is already defined in this directive")]
    DuplicateSlot {
        /// The repeated slot name.
        name: String,
    },

    /// A slot marker outside any open directive body.
    #[error("slot marker '#{name}' outside of a directive body")]
    SlotOutsideDirective {
        /// The slot name.
        name: String,
    },

    /// Input longer than the configured size cap.
    #[error("input exceeds the size cap of {limit} bytes")]
    InputTooLarge {
        /// The configured cap.
        limit: usize,
    },

    /// Directives nested deeper than the configured cap.
    #[error("directives nested deeper than {limit} levels")]
    TooDeep {
        /// The configured cap.
        limit: usize,
    },
}

/// A fatal parse error with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// The error kind.
    pub kind: ParseErrorKind,
    /// 1-based line number where the problem was detected.
    pub line: usize,
}

impl ParseError {
    /// Create an error at the given line.
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize) -> Self {
        Self { kind, line }
    }
}
