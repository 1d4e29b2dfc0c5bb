//! Admin tool for issuing and verifying Sigil tokens.
//!
//! The binary in `main.rs` is a thin dispatcher; the command implementations
//! live here so they can be exercised from integration tests.

pub mod cli;
pub mod commands;
pub mod config;
pub mod observability;
pub mod output;
