//! Nullable collaborators for deterministic testing.
//!
//! The ledger's external dependencies (price feed, settlement rail) are
//! abstracted behind traits. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the network
//!
//! Usage: swap real implementations for nullables in tests.

pub mod price;
pub mod settlement;

pub use price::NullPriceFeed;
pub use settlement::NullSettlement;
