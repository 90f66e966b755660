//! # threesixty Library
//!
//! This library exposes the threesixty modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod cli;
pub mod config;

// Re-export threesixty_core for convenience
pub use threesixty_core;
