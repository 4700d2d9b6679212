//! CLI command implementations.

pub mod trigger;
pub mod version;
