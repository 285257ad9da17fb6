//! Side-effecting operations: processes, filesystem writes and prompts.

pub mod command;
pub mod config;
pub mod hooks;
pub mod install;
pub mod materialize;
pub mod process;
pub mod prompt;
pub mod target;
