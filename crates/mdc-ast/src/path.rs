//! Human-readable node locations for diagnostics.

use std::fmt;

/// Path from the document root to a node, used in validation reports.
///
/// Renders as `card > title > list`: directive names interleaved with the
/// slot names that were traversed (the `default` slot is omitted for
/// brevity, matching how authors read the source).
///
/// # Example
///
/// ```
/// use mdc_ast::NodePath;
///
/// let mut path = NodePath::root();
/// path.push_directive("card");
/// path.push_slot("title");
/// assert_eq!(path.to_string(), "card > #title");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodePath(Vec<String>);

impl NodePath {
    /// The empty path (document root).
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Descend into a directive.
    pub fn push_directive(&mut self, name: &str) {
        self.0.push(name.to_owned());
    }

    /// Descend into a named slot. The `default` slot is not recorded.
    pub fn push_slot(&mut self, name: &str) {
        if name != crate::DEFAULT_SLOT {
            self.0.push(format!("#{name}"));
        }
    }

    /// Leave the most recent segment.
    pub fn pop(&mut self) {
        self.0.pop();
    }

    /// Leave a slot entered with [`NodePath::push_slot`]. A no-op for the
    /// `default` slot, which is never recorded.
    pub fn pop_slot(&mut self, name: &str) {
        if name != crate::DEFAULT_SLOT {
            self.0.pop();
        }
    }

    /// Whether the path points at the document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("(document)")
        } else {
            f.write_str(&self.0.join(" > "))
        }
    }
}
