//! Structured event publishing for the voting ledger.
#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

pub fn publish_staked(env: &Env, staker: &Address, amount: i128, new_balance: i128) {
    env.events().publish(
        (symbol_short!("STAKED"), staker.clone()),
        (amount, new_balance),
    );
}

pub fn publish_delegate_changed(
    env: &Env,
    delegator: &Address,
    from_delegate: &Address,
    to_delegate: &Address,
) {
    env.events().publish(
        (symbol_short!("DEL_CHG"), delegator.clone()),
        (from_delegate.clone(), to_delegate.clone()),
    );
}

pub fn publish_votes_changed(env: &Env, delegate: &Address, previous: i128, current: i128) {
    env.events().publish(
        (symbol_short!("VOTES_CHG"), delegate.clone()),
        (previous, current),
    );
}
