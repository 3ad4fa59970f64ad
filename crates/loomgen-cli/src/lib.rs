//! Loomgen CLI - Command-line interface for woven artwork generation
//!
//! The binary lives in `main.rs`; command implementations are exposed here
//! so integration tests can drive them directly.

pub mod commands;
