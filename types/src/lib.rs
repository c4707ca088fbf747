//! Fundamental types for the fundpool ledger.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: account addresses and fixed-point amounts.

pub mod address;
pub mod amount;

pub use address::{AccountAddress, AddressError};
pub use amount::{NativeAmount, UsdValue, NATIVE_UNIT, USD_UNIT};
