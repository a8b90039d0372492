//! CLI subcommand modules.
//!
//! This module contains the implementations for all rsscreen CLI subcommands.

pub(crate) mod indicators;
pub(crate) mod screen;
pub(crate) mod windows;
