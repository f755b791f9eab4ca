//! Worktime logger CLI library.
//!
//! This crate provides the command-line front end for the worktime logger.

mod cli;
pub mod commands;
mod config;
pub mod uptime;

pub use cli::{Cli, Commands};
pub use config::Config;
