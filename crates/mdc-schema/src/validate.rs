//! Batch tree validation against the schema registry.
//!
//! Validation never stops at the first fault: every violation in the
//! document is reported so an author can fix them all at once. The tree
//! itself stays available to the caller — a schema-invalid tree is still
//! structurally complete, and rendering anyway is the caller's call.

use mdc_ast::{DirectiveNode, Document, Node, NodeId, NodePath, Value, DEFAULT_SLOT};

use crate::schema::{AttrType, SchemaRegistry};

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{path} (line {line}): {kind}")]
pub struct Violation {
    /// Path from the document root to the offending directive.
    pub path: NodePath,
    /// 1-based source line of the offending directive.
    pub line: usize,
    /// What was violated.
    pub kind: ViolationKind,
}

/// The kinds of schema violations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ViolationKind {
    /// Directive kind absent from the registry.
    #[error("unknown directive '{name}'")]
    UnknownDirective {
        /// The unrecognized kind.
        name: String,
    },

    /// A required slot is missing.
    #[error("missing required slot '#{name}'")]
    MissingSlot {
        /// The missing slot name.
        name: String,
    },

    /// A slot not declared by the schema.
    #[error("slot '#{name}' is not allowed here")]
    UnknownSlot {
        /// The undeclared slot name.
        name: String,
    },

    /// An attribute key not declared by the schema.
    #[error("unknown attribute '{key}'")]
    UnknownAttribute {
        /// The undeclared key.
        key: String,
    },

    /// An attribute value of the wrong type.
    #[error("attribute '{key}' expects {expected}")]
    TypeMismatch {
        /// The attribute key.
        key: String,
        /// Description of the expected type.
        expected: String,
    },

    /// An enum attribute with a value outside the declared set.
    #[error("attribute '{key}' does not accept '{value}'")]
    InvalidEnumValue {
        /// The attribute key.
        key: String,
        /// The rejected value.
        value: String,
    },

    /// A nested block directive where the schema forbids children.
    #[error("'{child}' cannot be nested here")]
    ChildrenNotAllowed {
        /// Name of the nested directive.
        child: String,
    },

    /// An inline-only kind written as a fenced block.
    #[error("'{name}' is an inline directive, not a block")]
    ExpectedInline {
        /// The directive kind.
        name: String,
    },

    /// A block kind written as an inline directive.
    #[error("'{name}' is a block directive, not inline")]
    ExpectedBlock {
        /// The directive kind.
        name: String,
    },
}

/// Validate a document against the registry.
///
/// Returns every violation found, in pre-order. An empty list means the
/// tree is renderable.
///
/// # Example
///
/// ```
/// use mdc_schema::{validate, SchemaRegistry};
///
/// let doc = mdc_parser::parse("::card\n#title\nA\n::\n").unwrap();
/// assert!(validate(&doc, &SchemaRegistry::builtin()).is_empty());
/// ```
#[must_use]
pub fn validate(doc: &Document, registry: &SchemaRegistry) -> Vec<Violation> {
    let mut violations = Vec::new();
    let mut path = NodePath::root();
    for id in doc.roots() {
        check_node(doc, *id, registry, &mut path, &mut violations);
    }
    violations
}

fn check_node(
    doc: &Document,
    id: NodeId,
    registry: &SchemaRegistry,
    path: &mut NodePath,
    out: &mut Vec<Violation>,
) {
    let Node::Directive(directive) = doc.node(id) else {
        return;
    };

    path.push_directive(&directive.name);
    check_directive(doc, directive, registry, path, out);

    for (slot, children) in directive.slots.iter() {
        path.push_slot(slot);
        for child in children {
            check_node(doc, *child, registry, path, out);
        }
        path.pop_slot(slot);
    }
    path.pop();
}

fn check_directive(
    doc: &Document,
    directive: &DirectiveNode,
    registry: &SchemaRegistry,
    path: &NodePath,
    out: &mut Vec<Violation>,
) {
    let report = |out: &mut Vec<Violation>, kind| {
        out.push(Violation {
            path: path.clone(),
            line: directive.line,
            kind,
        });
    };

    let Some(schema) = registry.get(&directive.name) else {
        if !registry.unknown_allowed() {
            report(
                out,
                ViolationKind::UnknownDirective {
                    name: directive.name.clone(),
                },
            );
        }
        return;
    };

    if schema.is_inline() && !directive.inline {
        report(
            out,
            ViolationKind::ExpectedInline {
                name: directive.name.clone(),
            },
        );
    } else if !schema.is_inline() && directive.inline {
        report(
            out,
            ViolationKind::ExpectedBlock {
                name: directive.name.clone(),
            },
        );
    }

    for required in schema.required_slots() {
        if !directive.slots.contains(required) {
            report(
                out,
                ViolationKind::MissingSlot {
                    name: required.clone(),
                },
            );
        }
    }

    for (slot, children) in directive.slots.iter() {
        if slot == DEFAULT_SLOT {
            if schema.allows_children() {
                continue;
            }
            // Inline directives inside text are fine anywhere; only
            // nested fenced blocks need the children capability.
            for child in children {
                if let Node::Directive(nested) = doc.node(*child) {
                    if !nested.inline {
                        report(
                            out,
                            ViolationKind::ChildrenNotAllowed {
                                child: nested.name.clone(),
                            },
                        );
                    }
                }
            }
        } else if !schema.allows_slot(slot) {
            report(
                out,
                ViolationKind::UnknownSlot {
                    name: slot.to_owned(),
                },
            );
        }
    }

    for (key, value) in directive.attributes.iter() {
        let Some(ty) = schema.attr_type(key) else {
            report(
                out,
                ViolationKind::UnknownAttribute {
                    key: key.to_owned(),
                },
            );
            continue;
        };
        check_attr(key, value, ty, &report, out);
    }
}

fn check_attr(
    key: &str,
    value: &Value,
    ty: &AttrType,
    report: &impl Fn(&mut Vec<Violation>, ViolationKind),
    out: &mut Vec<Violation>,
) {
    let mismatch = |out: &mut Vec<Violation>| {
        report(
            out,
            ViolationKind::TypeMismatch {
                key: key.to_owned(),
                expected: ty.describe(),
            },
        );
    };

    match (ty, value) {
        (AttrType::Str, Value::Str(_))
        | (AttrType::Num, Value::Num(_))
        | (AttrType::Bool, Value::Bool(_)) => {}
        (AttrType::Enum(allowed), Value::Str(s)) => {
            if !allowed.iter().any(|v| v == s) {
                report(
                    out,
                    ViolationKind::InvalidEnumValue {
                        key: key.to_owned(),
                        value: s.clone(),
                    },
                );
            }
        }
        _ => mismatch(out),
    }
}
