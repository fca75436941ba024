//! Integration tests for the debugging console
//!
//! These tests drive the session, console and transport together.

#[path = "../common/mod.rs"]
pub mod common;

pub mod cli;
pub mod console_rendering;
pub mod live_stream;
pub mod properties;
pub mod time_travel;
