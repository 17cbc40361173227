//! Error codes of the contracts other contracts call into.
//!
//! The voting ledger and the treasury return these directly, and the
//! cross-contract clients in [`crate::interfaces`] declare them, so a caller
//! using `try_*` sees the callee's failure as a typed value.

use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum LedgerError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidAmount = 3,
    /// Historical power was requested for the current or a future block.
    BlockNotYetMined = 4,
    ArithmeticOverflow = 5,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum TreasuryError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidAmount = 3,
    EtaInPast = 4,
    InsufficientFunds = 5,
    TransactionNotQueued = 6,
    TransactionLocked = 7,
    TransactionStale = 8,
    TransactionReverted = 9,
    AdminAlreadyTransferred = 10,
    ArithmeticOverflow = 12,
}
