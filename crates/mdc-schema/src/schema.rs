//! Per-directive-kind schemas.
//!
//! A schema declares the contract a directive must satisfy before it is
//! handed to a renderer: which slots are required, which attribute keys
//! are allowed and with what types, and whether nested directives may
//! appear as default-slot children. The registry is the single source of
//! truth the validator matches against.

use std::collections::HashMap;

/// Expected type of an attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrType {
    /// Any string value.
    Str,
    /// A numeric value.
    Num,
    /// A boolean (bare flag or literal `true`/`false`).
    Bool,
    /// A string restricted to a fixed set of values.
    Enum(Vec<String>),
}

impl AttrType {
    /// A human-readable name for reports.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            AttrType::Str => "string".to_owned(),
            AttrType::Num => "number".to_owned(),
            AttrType::Bool => "boolean".to_owned(),
            AttrType::Enum(values) => format!("one of [{}]", values.join(", ")),
        }
    }
}

/// Declared contract for one directive kind.
///
/// # Example
///
/// ```
/// use mdc_schema::{AttrType, DirectiveSchema};
///
/// let card = DirectiveSchema::new("card")
///     .slot("title")
///     .slot("description")
///     .attr("icon", AttrType::Str)
///     .children(true);
/// assert_eq!(card.name(), "card");
/// ```
#[derive(Debug, Clone)]
pub struct DirectiveSchema {
    name: String,
    required_slots: Vec<String>,
    optional_slots: Vec<String>,
    attrs: Vec<(String, AttrType)>,
    children: bool,
    inline: bool,
}

impl DirectiveSchema {
    /// Start a schema for the given directive kind. By default it is a
    /// block directive with no slots, no attributes, and no nested
    /// directives allowed.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required_slots: Vec::new(),
            optional_slots: Vec::new(),
            attrs: Vec::new(),
            children: false,
            inline: false,
        }
    }

    /// Declare a required slot.
    #[must_use]
    pub fn required_slot(mut self, name: impl Into<String>) -> Self {
        self.required_slots.push(name.into());
        self
    }

    /// Declare an optional slot.
    #[must_use]
    pub fn slot(mut self, name: impl Into<String>) -> Self {
        self.optional_slots.push(name.into());
        self
    }

    /// Declare an allowed attribute and its type.
    #[must_use]
    pub fn attr(mut self, key: impl Into<String>, ty: AttrType) -> Self {
        self.attrs.push((key.into(), ty));
        self
    }

    /// Allow or forbid nested directives as default-slot children.
    #[must_use]
    pub fn children(mut self, allowed: bool) -> Self {
        self.children = allowed;
        self
    }

    /// Mark this kind as inline-only (`:name{...}`, no body).
    #[must_use]
    pub fn inline_only(mut self) -> Self {
        self.inline = true;
        self
    }

    /// The directive kind this schema describes.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn required_slots(&self) -> &[String] {
        &self.required_slots
    }

    pub(crate) fn allows_slot(&self, name: &str) -> bool {
        self.required_slots.iter().any(|s| s == name)
            || self.optional_slots.iter().any(|s| s == name)
    }

    pub(crate) fn attr_type(&self, key: &str) -> Option<&AttrType> {
        self.attrs.iter().find(|(k, _)| k == key).map(|(_, t)| t)
    }

    pub(crate) fn allows_children(&self) -> bool {
        self.children
    }

    pub(crate) fn is_inline(&self) -> bool {
        self.inline
    }
}

/// The schema table: directive kind name to schema.
///
/// Unknown kinds are rejected by validation unless
/// [`SchemaRegistry::allow_unknown`] is set, in which case they pass
/// through unchecked (their children are still validated).
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<String, DirectiveSchema>,
    allow_unknown: bool,
}

impl SchemaRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry for the stock content dialect.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new()
            .with(
                DirectiveSchema::new("block-hero")
                    .required_slot("title")
                    .slot("description"),
            )
            .with(
                DirectiveSchema::new("card")
                    .slot("title")
                    .slot("description")
                    .attr("icon", AttrType::Str)
                    .children(true),
            )
            .with(DirectiveSchema::new("card-group").children(true))
            .with(DirectiveSchema::new("code-group").children(true))
            .with(DirectiveSchema::new("terminal").attr("content", AttrType::Str))
            .with(DirectiveSchema::new("list").attr(
                "type",
                AttrType::Enum(vec!["primary".to_owned(), "secondary".to_owned()]),
            ))
            .with(
                DirectiveSchema::new("ellipsis")
                    .inline_only()
                    .attr("left", AttrType::Str)
                    .attr("right", AttrType::Str)
                    .attr("width", AttrType::Str),
            )
            .with(
                DirectiveSchema::new("badge")
                    .inline_only()
                    .attr("type", AttrType::Str),
            )
    }

    /// Add or replace a schema.
    #[must_use]
    pub fn with(mut self, schema: DirectiveSchema) -> Self {
        self.schemas.insert(schema.name().to_owned(), schema);
        self
    }

    /// Let unknown directive kinds pass validation unchecked.
    #[must_use]
    pub fn allow_unknown(mut self, allow: bool) -> Self {
        self.allow_unknown = allow;
        self
    }

    /// Look up the schema for a directive kind.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DirectiveSchema> {
        self.schemas.get(name)
    }

    pub(crate) fn unknown_allowed(&self) -> bool {
        self.allow_unknown
    }
}
