//! Per-delegate voting power history.
//!
//! Each delegate owns an append-only sequence of `(block, votes)` entries
//! stored arena-style: a length under `N_CKPT` and one entry per index under
//! `CKPT`. Blocks are strictly increasing; a second write in the same block
//! amends the tail entry instead of appending.

use common::ttl::set_persistent;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

const NUM_CHECKPOINTS: Symbol = symbol_short!("N_CKPT");
const CHECKPOINT: Symbol = symbol_short!("CKPT");

/// Voting power of a delegate as of the end of `block`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Checkpoint {
    pub block: u32,
    pub votes: i128,
}

fn count_key(account: &Address) -> (Symbol, Address) {
    (NUM_CHECKPOINTS, account.clone())
}

fn entry_key(account: &Address, index: u32) -> (Symbol, Address, u32) {
    (CHECKPOINT, account.clone(), index)
}

pub fn count(env: &Env, account: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&count_key(account))
        .unwrap_or(0u32)
}

pub fn get(env: &Env, account: &Address, index: u32) -> Option<Checkpoint> {
    env.storage().persistent().get(&entry_key(account, index))
}

/// Latest recorded voting power, 0 if the account never held any.
pub fn latest(env: &Env, account: &Address) -> i128 {
    match count(env, account) {
        0 => 0,
        n => get(env, account, n - 1).map(|c| c.votes).unwrap_or(0),
    }
}

/// Record `votes` for `account` at the current block.
pub fn write(env: &Env, account: &Address, votes: i128) {
    let block = env.ledger().sequence();
    let n = count(env, account);

    if n > 0 {
        if let Some(mut tail) = get(env, account, n - 1) {
            if tail.block == block {
                tail.votes = votes;
                set_persistent(env, &entry_key(account, n - 1), &tail);
                return;
            }
        }
    }

    set_persistent(env, &entry_key(account, n), &Checkpoint { block, votes });
    set_persistent(env, &count_key(account), &n.saturating_add(1));
}

/// Voting power effective at the end of `block`.
///
/// The caller guarantees `block` is already in the past.
pub fn votes_at(env: &Env, account: &Address, block: u32) -> i128 {
    let n = count(env, account);
    if n == 0 {
        return 0;
    }

    if let Some(last) = get(env, account, n - 1) {
        if last.block <= block {
            return last.votes;
        }
    }

    match get(env, account, 0) {
        Some(first) if first.block > block => return 0,
        None => return 0,
        _ => {}
    }

    // Greatest index whose block is <= `block`. Entry 0 qualifies and the
    // tail does not, so the answer lies in [0, n - 1).
    let mut lower = 0u32;
    let mut upper = n - 1;
    while upper > lower {
        // ceil midpoint so the loop always makes progress
        let center = upper - (upper - lower) / 2;
        match get(env, account, center) {
            Some(cp) if cp.block == block => return cp.votes,
            Some(cp) if cp.block < block => lower = center,
            _ => upper = center - 1,
        }
    }

    get(env, account, lower).map(|c| c.votes).unwrap_or(0)
}
