//! Renderer contract for parsed MDC documents.
//!
//! The engine never makes visual decisions. A rendering collaborator
//! implements [`RenderBackend`] and receives, in pre-order, each
//! directive's `(kind, attributes, slots)` and each text leaf's raw
//! inline-markdown string; [`render`] drives the traversal. Interpreting
//! the inline markdown is likewise the backend's concern.
//!
//! The bundled [`Outline`] backend produces an indented plain-text tree
//! and is what `mdc tree` prints.
//!
//! # Example
//!
//! ```
//! use mdc_render::{render, Outline};
//!
//! let doc = mdc_parser::parse("::card\n#title\nA\n::\n").unwrap();
//! let mut outline = Outline::new();
//! render(&doc, &mut outline);
//! assert_eq!(outline.into_string(), "::card\n  #title\n    A\n");
//! ```

mod backend;
mod outline;

pub use backend::{render, RenderBackend};
pub use outline::Outline;
