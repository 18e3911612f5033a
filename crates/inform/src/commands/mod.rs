//! CLI command implementations.

pub(crate) mod expand;
pub(crate) mod filter;

pub(crate) use expand::ExpandArgs;
pub(crate) use filter::FilterArgs;
