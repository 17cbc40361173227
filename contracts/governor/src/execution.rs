//! Timelock handoff to the treasury.
//!
//! The governor is the treasury's admin once bootstrap completes. Queuing a
//! succeeded proposal schedules exactly one call against one allocation;
//! executing it asks the treasury to debit that allocation and perform the
//! call. The call parameters are the caller's, not the recorded actions,
//! so callers assert they match what was approved.

use common::{TimelockTreasuryClient, TreasuryError};
use soroban_sdk::{Address, Bytes, BytesN, Env, InvokeError, String};

use crate::ContractError;

/// One timelocked call as supplied to `queue` / `execute`.
pub(crate) struct TimelockCall {
    pub target: Address,
    pub value: i128,
    pub signature: String,
    pub data: Bytes,
    pub fund_type: String,
}

/// Earliest execution time for a proposal queued now.
pub(crate) fn eta_from_now(env: &Env, delay_secs: u64) -> Result<u64, ContractError> {
    env.ledger()
        .timestamp()
        .checked_add(delay_secs)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Translate a failed treasury call into the governor's own code.
///
/// Failures that are not treasury contract errors (a missing admin
/// handover, a trapped host call) surface as `TreasuryRejected`.
fn treasury_error(err: Result<TreasuryError, InvokeError>) -> ContractError {
    match err {
        Ok(TreasuryError::InsufficientFunds) => ContractError::TreasuryInsufficientFunds,
        Ok(TreasuryError::TransactionNotQueued) => ContractError::TransactionNotQueued,
        Ok(TreasuryError::TransactionStale) => ContractError::TransactionStale,
        Ok(TreasuryError::TransactionReverted) => ContractError::TransactionReverted,
        _ => ContractError::TreasuryRejected,
    }
}

/// Register the call with the treasury timelock and return its hash.
///
/// The treasury rejects an eta in the past and an allocation that cannot
/// cover `value` today.
pub(crate) fn schedule(
    env: &Env,
    treasury: &Address,
    call: &TimelockCall,
    eta: u64,
) -> Result<BytesN<32>, ContractError> {
    let result = TimelockTreasuryClient::new(env, treasury).try_queue_transaction(
        &call.target,
        &call.value,
        &call.signature,
        &call.data,
        &eta,
        &call.fund_type,
    );
    match result {
        Ok(Ok(tx_hash)) => Ok(tx_hash),
        Ok(Err(_)) => Err(ContractError::TreasuryRejected),
        Err(err) => Err(treasury_error(err)),
    }
}

/// Ask the treasury to run a previously scheduled call.
pub(crate) fn release(
    env: &Env,
    treasury: &Address,
    call: &TimelockCall,
    eta: u64,
) -> Result<Bytes, ContractError> {
    let result = TimelockTreasuryClient::new(env, treasury).try_execute_transaction(
        &call.target,
        &call.value,
        &call.signature,
        &call.data,
        &eta,
        &call.fund_type,
    );
    match result {
        Ok(Ok(reply)) => Ok(reply),
        Ok(Err(_)) => Err(ContractError::TreasuryRejected),
        Err(err) => Err(treasury_error(err)),
    }
}
