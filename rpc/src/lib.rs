//! HTTP server exposing the funding ledger's public surface.
//!
//! Callers — including browser front-ends — contribute, withdraw, and read
//! public state over plain JSON routes. Internal ledger storage is never
//! exposed directly.

pub mod config;
pub mod error;
pub mod handlers;
pub mod server;

pub use config::ServiceConfig;
pub use error::RpcError;
pub use server::{build_ledger, router, serve, AppState};
