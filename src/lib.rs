//! Food finder library
//!
//! Restaurant search with a file-backed response cache. The modules are
//! exposed for the binary and for integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod server;
pub mod tree;
pub mod ui;
