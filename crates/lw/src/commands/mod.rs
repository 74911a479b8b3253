//! CLI command implementations.

pub(crate) mod check;

pub(crate) use check::CheckArgs;
