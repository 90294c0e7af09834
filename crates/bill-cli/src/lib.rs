//! # qiwi-bill CLI
//!
//! Argument parsing and command execution for the `qiwi-bill` binary.

pub mod cli;
pub mod commands;
