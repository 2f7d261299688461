//! Library components for the compensation pipeline CLI.

pub mod artifacts;
pub mod cli;
pub mod commands;
pub mod logging;
pub mod pipeline;
pub mod summary;
pub mod types;
