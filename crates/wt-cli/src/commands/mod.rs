//! CLI subcommand implementations.

pub mod add;
pub mod show;
