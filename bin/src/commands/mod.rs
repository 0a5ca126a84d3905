//! CLI command implementations.

pub(crate) mod convert;
