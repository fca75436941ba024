//! Shared test utilities
//!
//! - Protocol message fixtures
//! - TUI terminal testing helpers

#![allow(dead_code)]

pub mod fixtures;
pub mod terminal;
