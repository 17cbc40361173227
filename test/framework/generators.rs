//! # Property-Based Test Generators
//!
//! Composable `proptest` strategies for generating valid and adversarial inputs
//! across the governance contracts.
//!
//! Generators produce *semantic* values (stakes, delegations, block gaps) so
//! tests exercise real code paths. Perfect squares and their neighbours are
//! weighted in because voting power is `floor(sqrt(stake))`.

extern crate std;

use proptest::prelude::*;
use std::vec::Vec;

/// Largest amount any generator produces; realistic for 7-decimal tokens and
/// small enough that a few users' sums stay well inside the SAC limits.
pub const MAX_AMOUNT: i128 = 1_000_000_000_000_000; // 10^15

// ── Scalar Generators ────────────────────────────────────────────────────────

/// Strategy for strictly positive stake amounts, biased toward square
/// boundaries.
pub fn positive_amount_strategy() -> impl Strategy<Value = i128> {
    prop_oneof![
        1 => Just(1i128),
        1 => Just(MAX_AMOUNT),
        2 => (1i128..=10_000_000i128).prop_map(|r| r * r),
        1 => (2i128..=10_000_000i128).prop_map(|r| r * r - 1),
        5 => (1i128..=MAX_AMOUNT),
    ]
}

/// Strategy for amounts a deposit must reject (zero or negative).
pub fn invalid_amount_strategy() -> impl Strategy<Value = i128> {
    prop_oneof![
        5 => Just(0i128),
        3 => (-1_000_000i128..=-1i128),
        2 => Just(i128::MIN),
    ]
}

/// Strategy for a block gap between two actions.
pub fn block_gap_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![
        3 => Just(0u32),
        4 => Just(1u32),
        3 => (2u32..=20u32),
    ]
}

/// Strategy for vote support codes, including out-of-range values.
pub fn support_strategy() -> impl Strategy<Value = u32> {
    prop_oneof![
        9 => (0u32..=2u32),
        1 => (3u32..=u32::MAX),
    ]
}

// ── Action Generators ────────────────────────────────────────────────────────

/// Enumeration of voting-ledger actions for state exploration.
///
/// `user_index` and `delegatee_index` select from a pool of test users
/// (modular indexing).
#[derive(Debug, Clone)]
pub enum LedgerAction {
    /// Stake tokens.
    Deposit { user_index: usize, amount: i128 },
    /// Route a user's power to another user (or back to themselves).
    Delegate {
        user_index: usize,
        delegatee_index: usize,
    },
    /// Close the current block and move `blocks` ahead.
    Mine { blocks: u32 },
}

/// Strategy for individual ledger actions.
pub fn ledger_action_strategy(num_users: usize) -> impl Strategy<Value = LedgerAction> {
    let user_idx = 0..num_users;

    prop_oneof![
        40 => (user_idx.clone(), positive_amount_strategy())
            .prop_map(|(u, a)| LedgerAction::Deposit { user_index: u, amount: a }),
        30 => (user_idx.clone(), user_idx.clone())
            .prop_map(|(u, d)| LedgerAction::Delegate { user_index: u, delegatee_index: d }),
        30 => block_gap_strategy().prop_map(|b| LedgerAction::Mine { blocks: b }),
    ]
}

/// Strategy for a sequence of 1–`max_len` ledger actions.
pub fn ledger_action_sequence(
    num_users: usize,
    max_len: usize,
) -> impl Strategy<Value = Vec<LedgerAction>> {
    prop::collection::vec(ledger_action_strategy(num_users), 1..=max_len)
}

// ── Voter Generators ─────────────────────────────────────────────────────────

/// One voter in a generated electorate: their stake and the support code
/// they will cast.
#[derive(Debug, Clone)]
pub struct VoterProfile {
    pub stake: i128,
    pub support: u32,
}

/// Strategy for an electorate of 1–`max_voters` voters with valid supports.
pub fn electorate_strategy(max_voters: usize) -> impl Strategy<Value = Vec<VoterProfile>> {
    prop::collection::vec(
        (1i128..=1_000_000i128, 0u32..=2u32)
            .prop_map(|(stake, support)| VoterProfile { stake, support }),
        1..=max_voters,
    )
}

// ── Historical Pattern Generators ────────────────────────────────────────────

/// Common delegation patterns worth replaying in full.
#[derive(Debug, Clone)]
pub enum TransactionPattern {
    /// Everyone stakes, then delegates to user 0.
    Consolidation,
    /// A delegates to B, B delegates to C; power does not chain.
    DelegationChain,
    /// One user redelegates repeatedly within a single block.
    SameBlockChurn,
    /// Stake, delegate away, stake more, reclaim.
    StakeWhileDelegated,
}

/// Generate a concrete action sequence from a transaction pattern.
pub fn pattern_to_actions(pattern: &TransactionPattern, num_users: usize) -> Vec<LedgerAction> {
    match pattern {
        TransactionPattern::Consolidation => {
            let mut actions = Vec::new();
            for i in 0..num_users.min(4) {
                actions.push(LedgerAction::Deposit {
                    user_index: i,
                    amount: (i as i128 + 1) * 10_000,
                });
            }
            actions.push(LedgerAction::Mine { blocks: 1 });
            for i in 1..num_users.min(4) {
                actions.push(LedgerAction::Delegate {
                    user_index: i,
                    delegatee_index: 0,
                });
            }
            actions.push(LedgerAction::Mine { blocks: 1 });
            actions
        }
        TransactionPattern::DelegationChain => {
            vec![
                LedgerAction::Deposit { user_index: 0, amount: 400 },
                LedgerAction::Deposit { user_index: 1, amount: 900 },
                LedgerAction::Mine { blocks: 1 },
                LedgerAction::Delegate { user_index: 0, delegatee_index: 1 },
                LedgerAction::Mine { blocks: 1 },
                LedgerAction::Delegate { user_index: 1, delegatee_index: 2 },
                LedgerAction::Mine { blocks: 1 },
            ]
        }
        TransactionPattern::SameBlockChurn => {
            vec![
                LedgerAction::Deposit { user_index: 0, amount: 1_000_000 },
                LedgerAction::Delegate { user_index: 0, delegatee_index: 1 },
                LedgerAction::Delegate { user_index: 0, delegatee_index: 2 },
                LedgerAction::Delegate { user_index: 0, delegatee_index: 0 },
                LedgerAction::Delegate { user_index: 0, delegatee_index: 1 },
                LedgerAction::Mine { blocks: 1 },
            ]
        }
        TransactionPattern::StakeWhileDelegated => {
            vec![
                LedgerAction::Deposit { user_index: 0, amount: 99 },
                LedgerAction::Mine { blocks: 1 },
                LedgerAction::Delegate { user_index: 0, delegatee_index: 1 },
                LedgerAction::Mine { blocks: 1 },
                LedgerAction::Deposit { user_index: 0, amount: 1 },
                LedgerAction::Mine { blocks: 1 },
                LedgerAction::Delegate { user_index: 0, delegatee_index: 0 },
                LedgerAction::Mine { blocks: 1 },
            ]
        }
    }
}

/// Strategy that selects a transaction pattern.
pub fn transaction_pattern_strategy() -> impl Strategy<Value = TransactionPattern> {
    prop_oneof![
        Just(TransactionPattern::Consolidation),
        Just(TransactionPattern::DelegationChain),
        Just(TransactionPattern::SameBlockChurn),
        Just(TransactionPattern::StakeWhileDelegated),
    ]
}
