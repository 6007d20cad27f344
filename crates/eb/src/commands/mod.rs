//! CLI command implementations.

pub(crate) mod decorate;

pub(crate) use decorate::DecorateArgs;
