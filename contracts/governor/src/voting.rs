//! Vote receipts.
//!
//! Each voter casts at most one vote per proposal. The weight is whatever
//! the voting ledger reports for the voter as of the proposal's start block,
//! which already includes any power delegated to them.

use common::ttl::set_persistent;
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

const RECEIPT: Symbol = symbol_short!("RECEIPT");

#[contracttype]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum VoteSupport {
    Against = 0,
    For = 1,
    Abstain = 2,
}

impl VoteSupport {
    pub fn from_u32(support: u32) -> Option<Self> {
        match support {
            0 => Some(VoteSupport::Against),
            1 => Some(VoteSupport::For),
            2 => Some(VoteSupport::Abstain),
            _ => None,
        }
    }
}

/// Record of a cast vote, kept forever.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VoteReceipt {
    pub support: VoteSupport,
    pub votes: i128,
}

fn receipt_key(proposal_id: u64, voter: &Address) -> (Symbol, u64, Address) {
    (RECEIPT, proposal_id, voter.clone())
}

pub(crate) fn store_receipt(env: &Env, proposal_id: u64, voter: &Address, receipt: &VoteReceipt) {
    set_persistent(env, &receipt_key(proposal_id, voter), receipt);
}

pub(crate) fn load_receipt(env: &Env, proposal_id: u64, voter: &Address) -> Option<VoteReceipt> {
    env.storage()
        .persistent()
        .get(&receipt_key(proposal_id, voter))
}

pub(crate) fn has_voted(env: &Env, proposal_id: u64, voter: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&receipt_key(proposal_id, voter))
}
