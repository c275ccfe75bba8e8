//! Common utilities for the selkit crates.
//!
//! This crate provides shared infrastructure used by the parser and tree crates:
//! - **Warning System** - colored, deduplicated terminal output for parse diagnostics

pub mod warning;
