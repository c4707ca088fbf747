//! Shared utilities for the fundpool workspace.

pub mod logging;

pub use logging::init_tracing;
