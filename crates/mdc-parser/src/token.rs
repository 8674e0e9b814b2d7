//! Line-oriented tokenizer for the directive dialect.
//!
//! Recognizes, per line: fence-open (`::name{attrs}`), fence-close (`::`),
//! slot markers (`#name`), and plain text. Text lines are additionally
//! split into spans around inline directives (`:name{attrs}`).
//!
//! Tokenization is lazy and restartable: [`Tokenizer::new`] borrows the
//! source and yields tokens in source order; building a fresh tokenizer
//! over the same source is free.

use std::collections::VecDeque;

use crate::error::{ParseError, ParseErrorKind};

/// A single token with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `::name` or `::name{attrs}` on its own line.
    FenceOpen {
        /// The directive name.
        name: String,
        /// Raw attribute text between the braces, if any.
        attrs: Option<String>,
        /// Source line.
        line: usize,
    },
    /// A line that is exactly `::`.
    FenceClose {
        /// Source line.
        line: usize,
    },
    /// A `#name` line. Only meaningful inside a directive body; the parser
    /// rejects it elsewhere.
    SlotMarker {
        /// The slot name, without the `#`.
        name: String,
        /// Source line.
        line: usize,
    },
    /// An inline `:name{attrs}` span inside a text line.
    Inline {
        /// The directive name.
        name: String,
        /// Raw attribute text between the braces, if any.
        attrs: Option<String>,
        /// Source line.
        line: usize,
    },
    /// A text span. Internal markdown syntax passes through untouched;
    /// leading and trailing whitespace is stripped (indentation carries no
    /// meaning in the dialect).
    Text {
        /// The span content.
        raw: String,
        /// Source line.
        line: usize,
    },
}

impl Token {
    /// The 1-based source line of this token.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Token::FenceOpen { line, .. }
            | Token::FenceClose { line }
            | Token::SlotMarker { line, .. }
            | Token::Inline { line, .. }
            | Token::Text { line, .. } => *line,
        }
    }
}

/// Lazy tokenizer over a source string.
pub struct Tokenizer<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    pending: VecDeque<Result<Token, ParseError>>,
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer over the given source.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().enumerate(),
            pending: VecDeque::new(),
            failed: false,
        }
    }

    fn tokenize_line(&mut self, raw: &str, line: usize) {
        // Structure is recognized independent of indentation: nested
        // directives are conventionally indented in authored content.
        let trimmed = raw.trim();

        // Blank lines separate content but produce no tokens.
        if trimmed.is_empty() {
            return;
        }

        if trimmed == "::" {
            self.pending.push_back(Ok(Token::FenceClose { line }));
            return;
        }

        if let Some(rest) = trimmed.strip_prefix("::") {
            if self.fence_open(rest, line) {
                return;
            }
        }

        if let Some(rest) = trimmed.strip_prefix('#') {
            let name_len = ident_len(rest);
            if name_len > 0 && rest[name_len..].is_empty() {
                self.pending.push_back(Ok(Token::SlotMarker {
                    name: rest[..name_len].to_owned(),
                    line,
                }));
                return;
            }
        }

        self.text_line(trimmed, line);
    }

    /// Try to tokenize `rest` (after the `::` prefix) as a fence-open.
    /// Returns `false` when the line is not a valid fence-open and should
    /// fall through to plain text.
    fn fence_open(&mut self, rest: &str, line: usize) -> bool {
        let name_len = ident_len(rest);
        if name_len == 0 {
            return false;
        }
        let name = &rest[..name_len];
        let after_name = &rest[name_len..];

        if after_name.is_empty() {
            self.pending.push_back(Ok(Token::FenceOpen {
                name: name.to_owned(),
                attrs: None,
                line,
            }));
            return true;
        }

        if after_name.starts_with('{') {
            let Some((inner, consumed)) = scan_braces(after_name) else {
                self.fail(ParseErrorKind::UnterminatedAttributes, line);
                return true;
            };
            if !after_name[consumed..].trim().is_empty() {
                // Trailing junk after the attribute list: not a fence.
                return false;
            }
            self.pending.push_back(Ok(Token::FenceOpen {
                name: name.to_owned(),
                attrs: (!inner.is_empty()).then(|| inner.to_owned()),
                line,
            }));
            return true;
        }

        false
    }

    /// Split a text line into verbatim spans and inline directives.
    fn text_line(&mut self, raw: &str, line: usize) {
        let mut pos = 0;
        let mut seg_start = 0;

        while let Some(off) = raw[pos..].find(':') {
            let at = pos + off;

            // Skip runs of colons; `::` mid-line is plain text.
            if raw[at..].starts_with("::") {
                pos = at + raw[at..].chars().take_while(|&c| c == ':').count();
                continue;
            }

            let after = &raw[at + 1..];
            let name_len = ident_len(after);
            if name_len == 0 {
                pos = at + 1;
                continue;
            }
            let after_name = &after[name_len..];
            if !after_name.starts_with('{') {
                // Bare `:word` (e.g. a timestamp or emoji shortcode) stays
                // text; only `:name{...}` is an inline directive.
                pos = at + 1 + name_len;
                continue;
            }

            let Some((inner, consumed)) = scan_braces(after_name) else {
                self.fail(ParseErrorKind::UnterminatedAttributes, line);
                return;
            };

            let before = raw[seg_start..at].trim();
            if !before.is_empty() {
                self.pending.push_back(Ok(Token::Text {
                    raw: before.to_owned(),
                    line,
                }));
            }
            self.pending.push_back(Ok(Token::Inline {
                name: after[..name_len].to_owned(),
                attrs: (!inner.is_empty()).then(|| inner.to_owned()),
                line,
            }));

            pos = at + 1 + name_len + consumed;
            seg_start = pos;
        }

        let tail = raw[seg_start..].trim();
        if !tail.is_empty() {
            self.pending.push_back(Ok(Token::Text {
                raw: tail.to_owned(),
                line,
            }));
        }
    }

    fn fail(&mut self, kind: ParseErrorKind, line: usize) {
        self.pending.push_back(Err(ParseError::new(kind, line)));
        self.failed = true;
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                return Some(item);
            }
            if self.failed {
                return None;
            }
            let (idx, raw) = self.lines.next()?;
            self.tokenize_line(raw, idx + 1);
        }
    }
}

/// Length of the leading identifier (alphanumeric, `-`, `_`) in `s`.
fn ident_len(s: &str) -> usize {
    s.find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(s.len())
}

/// Scan a `{...}` group at the start of `s`, handling nested braces.
/// Braces inside quoted attribute values do not count.
///
/// Returns the inner text and the number of bytes consumed including both
/// braces, or `None` when the group never closes on this line.
fn scan_braces(s: &str) -> Option<(&str, usize)> {
    debug_assert!(s.starts_with('{'));
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some((&s[1..i], i + 1));
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(source: &str) -> Vec<Token> {
        Tokenizer::new(source)
            .collect::<Result<Vec<_>, _>>()
            .expect("tokenization failed")
    }

    #[test]
    fn test_fence_open_and_close() {
        let toks = tokens("::card\n::\n");
        assert_eq!(
            toks,
            vec![
                Token::FenceOpen {
                    name: "card".into(),
                    attrs: None,
                    line: 1
                },
                Token::FenceClose { line: 2 },
            ]
        );
    }

    #[test]
    fn test_fence_open_with_attrs() {
        let toks = tokens("::card{icon=x}\n");
        assert_eq!(
            toks,
            vec![Token::FenceOpen {
                name: "card".into(),
                attrs: Some("icon=x".into()),
                line: 1
            }]
        );
    }

    #[test]
    fn test_slot_marker() {
        let toks = tokens("::card\n#title\n::\n");
        assert_eq!(
            toks[1],
            Token::SlotMarker {
                name: "title".into(),
                line: 2
            }
        );
    }

    #[test]
    fn test_markdown_heading_is_text() {
        // "# Title" has a space after '#', so it is not a slot marker.
        let toks = tokens("# Title\n");
        assert_eq!(
            toks,
            vec![Token::Text {
                raw: "# Title".into(),
                line: 1
            }]
        );
    }

    #[test]
    fn test_inline_directive_span() {
        let toks = tokens("before :ellipsis{width=75%} after\n");
        assert_eq!(
            toks,
            vec![
                Token::Text {
                    raw: "before".into(),
                    line: 1
                },
                Token::Inline {
                    name: "ellipsis".into(),
                    attrs: Some("width=75%".into()),
                    line: 1
                },
                Token::Text {
                    raw: "after".into(),
                    line: 1
                },
            ]
        );
    }

    #[test]
    fn test_bare_colon_word_is_text() {
        let toks = tokens("see http://example.com at 12:30\n");
        assert_eq!(toks.len(), 1);
        assert!(matches!(&toks[0], Token::Text { raw, .. } if raw.contains("12:30")));
    }

    #[test]
    fn test_quoted_brace_does_not_close_attrs() {
        let toks = tokens("::card{title=\"a}b\"}\n");
        assert_eq!(
            toks,
            vec![Token::FenceOpen {
                name: "card".into(),
                attrs: Some("title=\"a}b\"".into()),
                line: 1
            }]
        );
    }

    #[test]
    fn test_unterminated_fence_attrs() {
        let result: Vec<_> = Tokenizer::new("::card{icon=x\n").collect();
        assert_eq!(
            result,
            vec![Err(ParseError::new(
                ParseErrorKind::UnterminatedAttributes,
                1
            ))]
        );
    }

    #[test]
    fn test_unterminated_inline_attrs() {
        let result: Vec<_> = Tokenizer::new("text :ellipsis{right=0\n").collect();
        assert!(matches!(
            result.last(),
            Some(Err(ParseError {
                kind: ParseErrorKind::UnterminatedAttributes,
                line: 1
            }))
        ));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let toks = tokens("A\n\n\nB\n");
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[1].line(), 4);
    }

    #[test]
    fn test_invalid_fence_name_is_text() {
        let toks = tokens("::: not a fence\n");
        assert!(matches!(&toks[0], Token::Text { .. }));
    }

    #[test]
    fn test_empty_braces_yield_no_attrs() {
        let toks = tokens("::card{}\n");
        assert_eq!(
            toks,
            vec![Token::FenceOpen {
                name: "card".into(),
                attrs: None,
                line: 1
            }]
        );
    }
}
