//! Structured event publishing for the Governor contract.
#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, BytesN, Env, String, Vec};

use crate::proposal::{Proposal, ProposalAction};
use crate::voting::VoteSupport;

pub fn publish_proposal_created(
    env: &Env,
    proposal: &Proposal,
    actions: &Vec<ProposalAction>,
    description: &String,
) {
    env.events().publish(
        (symbol_short!("PROP_NEW"), proposal.id),
        (
            proposal.proposer.clone(),
            proposal.proposal_type,
            proposal.start_block,
            proposal.end_block,
            actions.clone(),
            description.clone(),
        ),
    );
}

pub fn publish_vote_cast(
    env: &Env,
    proposal_id: u64,
    voter: &Address,
    support: VoteSupport,
    votes: i128,
) {
    env.events().publish(
        (symbol_short!("VOTE"), proposal_id),
        (voter.clone(), support, votes),
    );
}

/// `tx_hash` is the treasury's identifier for the scheduled call.
pub fn publish_proposal_queued(env: &Env, proposal_id: u64, eta: u64, tx_hash: &BytesN<32>) {
    env.events().publish(
        (symbol_short!("PROP_QUE"), proposal_id),
        (eta, tx_hash.clone()),
    );
}

pub fn publish_proposal_executed(env: &Env, proposal_id: u64) {
    env.events()
        .publish((symbol_short!("PROP_EXE"), proposal_id), ());
}
