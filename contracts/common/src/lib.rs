//! Shared interfaces and storage helpers for the governance contract suite.
//!
//! This crate provides:
//! - [`errors`]: error codes of the voting ledger and the treasury, shared
//!   with the clients that call them.
//! - [`interfaces`]: typed cross-contract clients for the voting ledger, the
//!   treasury and timelock call targets, so no contract links another's wasm.
//! - [`ttl`]: TTL constants and bump helpers shared by every contract.
//! - [`GENERAL_FUND`]: the allocation credited by untagged treasury transfers.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod errors;
pub mod interfaces;
pub mod ttl;

pub use errors::*;
pub use interfaces::*;

/// Allocation name that untagged treasury deposits are credited to.
pub const GENERAL_FUND: &str = "GENERAL";
