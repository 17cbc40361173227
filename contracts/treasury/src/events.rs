//! Structured event publishing for the treasury.
#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Bytes, BytesN, Env, String};

pub fn publish_fund_deposited(
    env: &Env,
    fund_type: &String,
    from: &Address,
    amount: i128,
    new_balance: i128,
) {
    env.events().publish(
        (symbol_short!("FUND_DEP"), fund_type.clone()),
        (from.clone(), amount, new_balance),
    );
}

pub fn publish_transaction_queued(
    env: &Env,
    tx_hash: &BytesN<32>,
    target: &Address,
    value: i128,
    signature: &String,
    data: &Bytes,
    eta: u64,
) {
    env.events().publish(
        (symbol_short!("TX_QUEUE"), tx_hash.clone()),
        (target.clone(), value, signature.clone(), data.clone(), eta),
    );
}

pub fn publish_transaction_executed(
    env: &Env,
    tx_hash: &BytesN<32>,
    target: &Address,
    value: i128,
    eta: u64,
) {
    env.events().publish(
        (symbol_short!("TX_EXEC"), tx_hash.clone()),
        (target.clone(), value, eta),
    );
}

pub fn publish_fund_released(
    env: &Env,
    fund_type: &String,
    target: &Address,
    amount: i128,
    remaining: i128,
) {
    env.events().publish(
        (symbol_short!("FUND_REL"), fund_type.clone()),
        (target.clone(), amount, remaining),
    );
}

pub fn publish_admin_transferred(env: &Env, previous: &Address, new_admin: &Address) {
    env.events().publish(
        (symbol_short!("ADM_XFER"),),
        (previous.clone(), new_admin.clone()),
    );
}
