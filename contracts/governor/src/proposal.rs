//! Proposal types, storage, and lifecycle derivation for the Governor.

use common::ttl::set_persistent;
use soroban_sdk::{contracttype, symbol_short, Address, Bytes, Env, String, Symbol, Vec};

// ── Storage key prefixes ─────────────────────────────────────────────────────

pub(crate) const PROPOSAL_CTR: Symbol = symbol_short!("PROP_CTR");
pub(crate) const PROPOSAL: Symbol = symbol_short!("PROP");
pub(crate) const ACTIONS: Symbol = symbol_short!("PROP_ACT");

// ── Lifecycle ─────────────────────────────────────────────────────────────────

/// Phase of the proposal lifecycle.
///
/// ```text
/// Active ──► Succeeded ──► Queued ──► Executed
///    │
///    └─────► Defeated
/// ```
///
/// `Pending` and `Expired` are part of the public enum but never derived:
/// voting opens in the creation block, and a queued proposal whose grace
/// period lapsed still reads `Queued` (the treasury rejects it as stale).
#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ProposalState {
    Pending = 0,
    Active = 1,
    Defeated = 2,
    Succeeded = 3,
    Queued = 4,
    Executed = 5,
    Expired = 6,
}

/// One call recorded with a proposal.
///
/// Kept for audit and indexing only: `queue` and `execute` take their call
/// parameters from the caller.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalAction {
    pub target: Address,
    pub value: i128,
    pub signature: String,
    pub calldata: Bytes,
}

/// The on-chain proposal record. Its state is derived, never stored.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub id: u64,
    pub proposer: Address,
    pub proposal_type: u32,
    /// Ledger sequence the proposal was created in; voting weight is read
    /// as of the end of this block.
    pub start_block: u32,
    /// Last ledger sequence in which votes are accepted.
    pub end_block: u32,
    pub for_votes: i128,
    pub against_votes: i128,
    pub abstain_votes: i128,
    pub canceled: bool,
    pub executed: bool,
    /// Earliest execution timestamp; 0 until queued.
    pub eta: u64,
}

/// Derive the lifecycle state of `proposal` at ledger `current_block`.
///
/// Precedence matters: cancellation wins over execution, an open voting
/// window wins over any tally, and a successful tally only reads as
/// `Succeeded` until an eta is recorded. Quorum is not consulted.
pub fn derive_state(proposal: &Proposal, current_block: u32) -> ProposalState {
    if proposal.canceled {
        ProposalState::Defeated
    } else if proposal.executed {
        ProposalState::Executed
    } else if current_block <= proposal.end_block {
        ProposalState::Active
    } else if proposal.for_votes > proposal.against_votes && proposal.eta == 0 {
        ProposalState::Succeeded
    } else if proposal.eta > 0 {
        ProposalState::Queued
    } else {
        ProposalState::Defeated
    }
}

// ── Storage helpers ──────────────────────────────────────────────────────────

pub(crate) fn next_id(env: &Env) -> u64 {
    let id: u64 = env
        .storage()
        .instance()
        .get(&PROPOSAL_CTR)
        .unwrap_or(0u64)
        .saturating_add(1);
    env.storage().instance().set(&PROPOSAL_CTR, &id);
    id
}

pub(crate) fn count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&PROPOSAL_CTR)
        .unwrap_or(0u64)
}

pub(crate) fn store(env: &Env, proposal: &Proposal) {
    set_persistent(env, &(PROPOSAL, proposal.id), proposal);
}

pub(crate) fn load(env: &Env, id: u64) -> Option<Proposal> {
    env.storage().persistent().get(&(PROPOSAL, id))
}

pub(crate) fn store_actions(env: &Env, id: u64, actions: &Vec<ProposalAction>) {
    set_persistent(env, &(ACTIONS, id), actions);
}

pub(crate) fn load_actions(env: &Env, id: u64) -> Vec<ProposalAction> {
    env.storage()
        .persistent()
        .get(&(ACTIONS, id))
        .unwrap_or_else(|| Vec::new(env))
}
