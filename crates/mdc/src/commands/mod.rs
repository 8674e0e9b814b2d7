//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod tree;

pub(crate) use check::CheckArgs;
pub(crate) use tree::TreeArgs;
