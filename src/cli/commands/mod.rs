//! Command implementations for the strproc CLI
//!
//! Each command is organized into its own module.

pub mod config;
pub mod filters;
pub mod list;
pub mod run;
pub mod version;
