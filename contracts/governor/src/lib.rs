#![no_std]
#![allow(clippy::too_many_arguments)]

//! # Governor
//!
//! Proposal engine for stake-weighted treasury governance:
//!
//! - **Proposal threshold**: proposers need voting power (as of the previous
//!   ledger) at or above a fixed minimum
//! - **Snapshot voting**: every voter's weight is their delegated voting
//!   power as of the proposal's start block, one vote per voter
//! - **Derived lifecycle**: `Active → Succeeded/Defeated → Queued → Executed`,
//!   computed from the stored record on every read
//! - **Timelocked execution**: a succeeded proposal schedules one call on the
//!   treasury and may execute it once the type's delay has elapsed
//!
//! Two known inconsistencies are kept deliberately: the per-type quorum is
//! configured but never enforced, and the action list recorded at creation
//! is not what `queue`/`execute` run.

pub mod config;
pub mod events;
pub mod execution;
pub mod proposal;
pub mod voting;

use common::{ttl::bump_instance, LedgerError, VotingLedgerClient};
use soroban_sdk::{
    contract, contractimpl, symbol_short, Address, Bytes, Env, String, Symbol, Vec,
};

use config::ProposalTypeSettings;
use execution::TimelockCall;
use proposal::{
    derive_state, load as load_proposal, next_id, store as store_proposal, Proposal,
    ProposalAction, ProposalState,
};
use voting::{VoteReceipt, VoteSupport};

// ── Storage key constants ─────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const VOTING_LEDGER: Symbol = symbol_short!("LEDGER");
const TREASURY_CONTRACT: Symbol = symbol_short!("TRES_CTR");
const PROPOSAL_THRESHOLD: Symbol = symbol_short!("PROP_THR");

// ── Error codes ───────────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    InvalidInput = 3,
    InvalidProposalType = 4,
    ProposalNotFound = 5,
    InsufficientVotingPower = 6,
    ProposalNotActive = 7,
    InvalidVoteType = 8,
    AlreadyVoted = 9,
    NoVotingPower = 10,
    ProposalNotSucceeded = 11,
    ProposalNotQueued = 12,
    TimelockNotExpired = 13,
    ArithmeticOverflow = 14,
    /// The proposal's start block has not closed yet.
    VoteSnapshotNotFinal = 15,
    /// The voting ledger failed to answer a power query.
    VotingLedgerUnavailable = 16,
    /// The allocation cannot cover the call's value.
    TreasuryInsufficientFunds = 17,
    /// The call supplied to `execute` does not match what was queued.
    TransactionNotQueued = 18,
    /// The treasury's grace period after the eta has passed.
    TransactionStale = 19,
    /// The call target failed.
    TransactionReverted = 20,
    /// Any other treasury refusal, including a missing admin handover.
    TreasuryRejected = 21,
}

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct GovernorContract;

#[contractimpl]
impl GovernorContract {
    // ── Initialisation ────────────────────────────────────────────────────────

    /// Bootstrap the governor.
    ///
    /// * `voting_ledger`: ledger queried for historical voting power.
    /// * `treasury`: timelocked treasury; must hand its admin role to this
    ///   contract before anything can be queued.
    /// * `proposal_threshold`: minimum voting power needed to propose.
    /// * `type_settings`: entry `i` configures proposal type `i`.
    pub fn initialize(
        env: Env,
        voting_ledger: Address,
        treasury: Address,
        proposal_threshold: i128,
        type_settings: Vec<ProposalTypeSettings>,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if proposal_threshold < 0 || !config::validate(&type_settings) {
            return Err(ContractError::InvalidInput);
        }

        env.storage().instance().set(&VOTING_LEDGER, &voting_ledger);
        env.storage().instance().set(&TREASURY_CONTRACT, &treasury);
        env.storage()
            .instance()
            .set(&PROPOSAL_THRESHOLD, &proposal_threshold);
        config::store(&env, &type_settings);
        env.storage().instance().set(&INITIALIZED, &true);
        bump_instance(&env);

        Ok(())
    }

    // ── Proposal creation ─────────────────────────────────────────────────────

    /// Create a proposal; voting opens immediately.
    ///
    /// The four action arrays are parallel and must be non-empty and of equal
    /// length. They are recorded and emitted for audit; execution runs the
    /// single call supplied to `queue`/`execute`.
    pub fn propose(
        env: Env,
        proposer: Address,
        targets: Vec<Address>,
        values: Vec<i128>,
        signatures: Vec<String>,
        calldatas: Vec<Bytes>,
        description: String,
        proposal_type: u32,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;
        proposer.require_auth();

        let n = targets.len();
        if n == 0 || values.len() != n || signatures.len() != n || calldatas.len() != n {
            return Err(ContractError::InvalidInput);
        }
        let settings =
            config::load(&env, proposal_type).ok_or(ContractError::InvalidProposalType)?;

        // Power as of the previous block; there is none before block 1.
        let current = env.ledger().sequence();
        let power = match current.checked_sub(1) {
            Some(prev) => Self::past_votes(&env, &proposer, prev)?,
            None => 0,
        };
        if power < Self::load_threshold(&env) {
            return Err(ContractError::InsufficientVotingPower);
        }

        let mut actions = Vec::new(&env);
        for i in 0..n {
            actions.push_back(ProposalAction {
                target: targets.get(i).ok_or(ContractError::InvalidInput)?,
                value: values.get(i).ok_or(ContractError::InvalidInput)?,
                signature: signatures.get(i).ok_or(ContractError::InvalidInput)?,
                calldata: calldatas.get(i).ok_or(ContractError::InvalidInput)?,
            });
        }

        let start_block = current;
        let end_block = start_block
            .checked_add(settings.vote_duration_blocks)
            .ok_or(ContractError::ArithmeticOverflow)?;

        let id = next_id(&env);
        let proposal = Proposal {
            id,
            proposer,
            proposal_type,
            start_block,
            end_block,
            for_votes: 0,
            against_votes: 0,
            abstain_votes: 0,
            canceled: false,
            executed: false,
            eta: 0,
        };

        store_proposal(&env, &proposal);
        proposal::store_actions(&env, id, &actions);
        bump_instance(&env);
        events::publish_proposal_created(&env, &proposal, &actions, &description);

        Ok(id)
    }

    // ── Voting ────────────────────────────────────────────────────────────────

    /// Cast one vote: `0` against, `1` for, `2` abstain.
    ///
    /// Weight is the voter's power at the end of the proposal's start block,
    /// so the start block must have closed before anyone can vote. Returns
    /// the weight counted.
    pub fn cast_vote(
        env: Env,
        voter: Address,
        proposal_id: u64,
        support: u32,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        voter.require_auth();

        let support = VoteSupport::from_u32(support).ok_or(ContractError::InvalidVoteType)?;
        let mut proposal =
            load_proposal(&env, proposal_id).ok_or(ContractError::ProposalNotFound)?;

        if derive_state(&proposal, env.ledger().sequence()) != ProposalState::Active {
            return Err(ContractError::ProposalNotActive);
        }
        if voting::has_voted(&env, proposal_id, &voter) {
            return Err(ContractError::AlreadyVoted);
        }

        let weight = Self::past_votes(&env, &voter, proposal.start_block)?;
        if weight <= 0 {
            return Err(ContractError::NoVotingPower);
        }

        let tally = match support {
            VoteSupport::Against => &mut proposal.against_votes,
            VoteSupport::For => &mut proposal.for_votes,
            VoteSupport::Abstain => &mut proposal.abstain_votes,
        };
        *tally = tally
            .checked_add(weight)
            .ok_or(ContractError::ArithmeticOverflow)?;

        store_proposal(&env, &proposal);
        voting::store_receipt(
            &env,
            proposal_id,
            &voter,
            &VoteReceipt {
                support,
                votes: weight,
            },
        );
        bump_instance(&env);
        events::publish_vote_cast(&env, proposal_id, &voter, support, weight);

        Ok(weight)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    pub fn state(env: Env, proposal_id: u64) -> Result<ProposalState, ContractError> {
        let proposal = load_proposal(&env, proposal_id).ok_or(ContractError::ProposalNotFound)?;
        Ok(derive_state(&proposal, env.ledger().sequence()))
    }

    /// Schedule the call for a succeeded proposal; returns its eta.
    ///
    /// Anyone may call this. The eta is `now + timelock_delay_secs` of the
    /// proposal's type.
    pub fn queue(
        env: Env,
        proposal_id: u64,
        target: Address,
        value: i128,
        signature: String,
        data: Bytes,
        fund_type: String,
    ) -> Result<u64, ContractError> {
        Self::require_initialized(&env)?;

        let mut proposal =
            load_proposal(&env, proposal_id).ok_or(ContractError::ProposalNotFound)?;
        if derive_state(&proposal, env.ledger().sequence()) != ProposalState::Succeeded {
            return Err(ContractError::ProposalNotSucceeded);
        }

        let settings = config::load(&env, proposal.proposal_type)
            .ok_or(ContractError::InvalidProposalType)?;
        let eta = execution::eta_from_now(&env, settings.timelock_delay_secs)?;

        proposal.eta = eta;
        store_proposal(&env, &proposal);

        let call = TimelockCall {
            target,
            value,
            signature,
            data,
            fund_type,
        };
        let tx_hash = execution::schedule(&env, &Self::load_treasury(&env)?, &call, eta)?;
        bump_instance(&env);
        events::publish_proposal_queued(&env, proposal_id, eta, &tx_hash);

        Ok(eta)
    }

    /// Execute a queued proposal once its eta has passed.
    ///
    /// The proposal is marked executed before the treasury runs the call; a
    /// treasury failure is returned as an error, which unwinds the flag.
    pub fn execute(
        env: Env,
        proposal_id: u64,
        target: Address,
        value: i128,
        signature: String,
        data: Bytes,
        fund_type: String,
    ) -> Result<Bytes, ContractError> {
        Self::require_initialized(&env)?;

        let mut proposal =
            load_proposal(&env, proposal_id).ok_or(ContractError::ProposalNotFound)?;
        if derive_state(&proposal, env.ledger().sequence()) != ProposalState::Queued {
            return Err(ContractError::ProposalNotQueued);
        }
        if env.ledger().timestamp() < proposal.eta {
            return Err(ContractError::TimelockNotExpired);
        }

        proposal.executed = true;
        store_proposal(&env, &proposal);

        let call = TimelockCall {
            target,
            value,
            signature,
            data,
            fund_type,
        };
        let reply = execution::release(&env, &Self::load_treasury(&env)?, &call, proposal.eta)?;
        bump_instance(&env);
        events::publish_proposal_executed(&env, proposal_id);

        Ok(reply)
    }

    // ── View functions ────────────────────────────────────────────────────────

    pub fn get_proposal(env: Env, proposal_id: u64) -> Option<Proposal> {
        load_proposal(&env, proposal_id)
    }

    /// Actions recorded when the proposal was created.
    pub fn get_actions(env: Env, proposal_id: u64) -> Vec<ProposalAction> {
        proposal::load_actions(&env, proposal_id)
    }

    pub fn get_receipt(env: Env, proposal_id: u64, voter: Address) -> Option<VoteReceipt> {
        voting::load_receipt(&env, proposal_id, &voter)
    }

    pub fn has_voted(env: Env, proposal_id: u64, voter: Address) -> bool {
        voting::has_voted(&env, proposal_id, &voter)
    }

    pub fn proposal_count(env: Env) -> u64 {
        proposal::count(&env)
    }

    pub fn proposal_threshold(env: Env) -> i128 {
        Self::load_threshold(&env)
    }

    pub fn type_settings(env: Env, proposal_type: u32) -> Option<ProposalTypeSettings> {
        config::load(&env, proposal_type)
    }

    pub fn voting_ledger(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&VOTING_LEDGER)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn treasury(env: Env) -> Result<Address, ContractError> {
        Self::load_treasury(&env)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Delegated power of `account` at the end of `block`.
    fn past_votes(env: &Env, account: &Address, block: u32) -> Result<i128, ContractError> {
        let addr: Address = env
            .storage()
            .instance()
            .get(&VOTING_LEDGER)
            .ok_or(ContractError::NotInitialized)?;
        match VotingLedgerClient::new(env, &addr).try_get_past_votes(account, &block) {
            Ok(Ok(votes)) => Ok(votes),
            Err(Ok(LedgerError::BlockNotYetMined)) => Err(ContractError::VoteSnapshotNotFinal),
            _ => Err(ContractError::VotingLedgerUnavailable),
        }
    }

    fn load_treasury(env: &Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&TREASURY_CONTRACT)
            .ok_or(ContractError::NotInitialized)
    }

    fn load_threshold(env: &Env) -> i128 {
        env.storage()
            .instance()
            .get(&PROPOSAL_THRESHOLD)
            .unwrap_or(0)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
