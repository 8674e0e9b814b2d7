//! Per-directive schemas and tree validation for the MDC dialect.
//!
//! The parser accepts any well-formed directive tree; this crate decides
//! whether that tree is *renderable*. Each directive kind declares a
//! [`DirectiveSchema`] (required slots, allowed attributes and their
//! types, nesting capability), the [`SchemaRegistry`] collects them, and
//! [`validate`] walks a parsed document reporting every violation in one
//! pass.
//!
//! # Example
//!
//! ```
//! use mdc_schema::{validate, SchemaRegistry, ViolationKind};
//!
//! let doc = mdc_parser::parse("::block-hero\n#description\nD\n::\n").unwrap();
//! let violations = validate(&doc, &SchemaRegistry::builtin());
//! assert!(matches!(
//!     violations[0].kind,
//!     ViolationKind::MissingSlot { .. }
//! ));
//! ```

mod schema;
mod validate;

pub use schema::{AttrType, DirectiveSchema, SchemaRegistry};
pub use validate::{validate, Violation, ViolationKind};
