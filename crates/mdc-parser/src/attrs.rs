//! Attribute resolver for the `{key=value key2="v" flag}` micro-syntax.
//!
//! The resolver is directive-agnostic: it types values from their source
//! form only and never consults a schema. Key whitelisting and type
//! checking happen later, in `mdc-schema`.

use mdc_ast::{Attributes, Value};

use crate::error::{ParseError, ParseErrorKind};

/// Parse raw attribute text (without the surrounding braces) into a typed
/// mapping.
///
/// Entries are whitespace-delimited. A bare key is `true`; quoted values
/// are always strings; unquoted values become numbers when fully numeric
/// and booleans for literal `true`/`false`, otherwise strings. A repeated
/// key is a [`ParseErrorKind::DuplicateAttribute`] error — never a silent
/// overwrite.
///
/// # Example
///
/// ```
/// use mdc_ast::Value;
/// use mdc_parser::parse_attributes;
///
/// let attrs = parse_attributes(r#"icon=gear width=560 title="A b" bordered"#, 1).unwrap();
/// assert_eq!(attrs.get("icon"), Some(&Value::Str("gear".into())));
/// assert_eq!(attrs.get("width"), Some(&Value::Num(560.0)));
/// assert_eq!(attrs.get("title"), Some(&Value::Str("A b".into())));
/// assert_eq!(attrs.get("bordered"), Some(&Value::Bool(true)));
/// ```
pub fn parse_attributes(raw: &str, line: usize) -> Result<Attributes, ParseError> {
    let mut attrs = Attributes::new();
    let mut rest = raw.trim();

    while !rest.is_empty() {
        let (key, value, remaining) = parse_entry(rest, line)?;
        if !attrs.insert(key, value) {
            return Err(ParseError::new(
                ParseErrorKind::DuplicateAttribute {
                    key: key_of(rest).to_owned(),
                },
                line,
            ));
        }
        rest = remaining.trim_start();
    }

    Ok(attrs)
}

/// The key at the head of `rest`, for error reporting.
fn key_of(rest: &str) -> &str {
    let end = rest
        .find(|c: char| c == '=' || c.is_whitespace())
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Parse one `key`, `key=value`, `key="value"`, or `key='value'` entry.
fn parse_entry<'a>(s: &'a str, line: usize) -> Result<(&'a str, Value, &'a str), ParseError> {
    let key_end = s
        .find(|c: char| c == '=' || c.is_whitespace())
        .unwrap_or(s.len());
    let key = &s[..key_end];
    let after_key = &s[key_end..];

    let Some(after_eq) = after_key.strip_prefix('=') else {
        // Bare flag.
        return Ok((key, Value::Bool(true), after_key));
    };

    if let Some(stripped) = after_eq.strip_prefix('"') {
        let end = stripped.find('"').ok_or_else(|| {
            ParseError::new(ParseErrorKind::UnterminatedAttributes, line)
        })?;
        return Ok((
            key,
            Value::Str(stripped[..end].to_owned()),
            &stripped[end + 1..],
        ));
    }

    if let Some(stripped) = after_eq.strip_prefix('\'') {
        let end = stripped.find('\'').ok_or_else(|| {
            ParseError::new(ParseErrorKind::UnterminatedAttributes, line)
        })?;
        return Ok((
            key,
            Value::Str(stripped[..end].to_owned()),
            &stripped[end + 1..],
        ));
    }

    let end = after_eq
        .find(char::is_whitespace)
        .unwrap_or(after_eq.len());
    let token = &after_eq[..end];
    Ok((key, infer_value(token), &after_eq[end..]))
}

/// Type an unquoted value token.
///
/// Literal `true`/`false` become booleans, a deliberate extension of the
/// number-or-string rule: a bare key already means `true`, so reading
/// `key=false` back as the string `"false"` would be a trap. Authors who
/// want the literal text quote it.
fn infer_value(token: &str) -> Value {
    match token {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(n) = token.parse::<f64>() {
        if n.is_finite() {
            return Value::Num(n);
        }
    }
    Value::Str(token.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty() {
        let attrs = parse_attributes("", 1).unwrap();
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_unquoted_string() {
        let attrs = parse_attributes("icon=x", 1).unwrap();
        assert_eq!(attrs.get("icon"), Some(&Value::Str("x".into())));
    }

    #[test]
    fn test_css_like_values_stay_strings() {
        let attrs = parse_attributes("right=0px width=75%", 1).unwrap();
        assert_eq!(attrs.get("right"), Some(&Value::Str("0px".into())));
        assert_eq!(attrs.get("width"), Some(&Value::Str("75%".into())));
    }

    #[test]
    fn test_numeric_values() {
        let attrs = parse_attributes("width=560 ratio=0.5 offset=-2", 1).unwrap();
        assert_eq!(attrs.get("width"), Some(&Value::Num(560.0)));
        assert_eq!(attrs.get("ratio"), Some(&Value::Num(0.5)));
        assert_eq!(attrs.get("offset"), Some(&Value::Num(-2.0)));
    }

    #[test]
    fn test_bare_flag_is_true() {
        let attrs = parse_attributes("bordered icon=x", 1).unwrap();
        assert_eq!(attrs.get("bordered"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_literal_booleans() {
        let attrs = parse_attributes("a=true b=false", 1).unwrap();
        assert_eq!(attrs.get("a"), Some(&Value::Bool(true)));
        assert_eq!(attrs.get("b"), Some(&Value::Bool(false)));
    }

    #[test]
    fn test_quoted_values_are_strings() {
        let attrs = parse_attributes(r#"a="560" b='true' c="with space""#, 1).unwrap();
        assert_eq!(attrs.get("a"), Some(&Value::Str("560".into())));
        assert_eq!(attrs.get("b"), Some(&Value::Str("true".into())));
        assert_eq!(attrs.get("c"), Some(&Value::Str("with space".into())));
    }

    #[test]
    fn test_duplicate_key_is_an_error() {
        let err = parse_attributes("icon=x icon=y", 3).unwrap_err();
        assert_eq!(
            err,
            ParseError::new(
                ParseErrorKind::DuplicateAttribute {
                    key: "icon".into()
                },
                3
            )
        );
    }

    #[test]
    fn test_unterminated_quote() {
        let err = parse_attributes(r#"title="oops"#, 2).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnterminatedAttributes);
        assert_eq!(err.line, 2);
    }
}
