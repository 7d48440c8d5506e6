//! Subcommands of the gbt CLI.
//!
//! - [`init`] - write a starter `.godot-build.toml`

pub mod init;
