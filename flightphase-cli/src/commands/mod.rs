//! CLI subcommands.

pub mod config;
pub mod graph;
pub mod replay;
