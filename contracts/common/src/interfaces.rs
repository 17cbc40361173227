//! Cross-contract interfaces.
//!
//! Only the entry points a caller in this suite actually uses are declared.
//! Ledger and treasury entry points declare their error enums so callers can
//! use the generated `try_*` methods and map each failure to their own code.

use soroban_sdk::{contractclient, Address, Bytes, BytesN, Env, String};

use crate::errors::{LedgerError, TreasuryError};

/// Read side of the voting power ledger.
#[contractclient(name = "VotingLedgerClient")]
pub trait VotingLedgerInterface {
    /// Current voting power of `account` as a delegate.
    fn get_votes(env: Env, account: Address) -> i128;

    /// Voting power of `account` at the end of `block_number`.
    ///
    /// Fails unless `block_number` is strictly before the current ledger.
    fn get_past_votes(env: Env, account: Address, block_number: u32) -> Result<i128, LedgerError>;
}

/// Admin-gated timelock surface of the treasury.
#[contractclient(name = "TimelockTreasuryClient")]
pub trait TimelockTreasuryInterface {
    fn queue_transaction(
        env: Env,
        target: Address,
        value: i128,
        signature: String,
        data: Bytes,
        eta: u64,
        fund_type: String,
    ) -> Result<BytesN<32>, TreasuryError>;

    fn execute_transaction(
        env: Env,
        target: Address,
        value: i128,
        signature: String,
        data: Bytes,
        eta: u64,
        fund_type: String,
    ) -> Result<Bytes, TreasuryError>;
}

/// Entry point a contract must expose to be the target of a timelocked call.
///
/// `payload` is the raw calldata, or a 4-byte selector followed by the
/// calldata when the queued transaction carried a signature. Any token value
/// attached to the transaction is transferred before the call.
#[contractclient(name = "TimelockTargetClient")]
pub trait TimelockTargetInterface {
    fn exec_call(env: Env, payload: Bytes) -> Bytes;
}
