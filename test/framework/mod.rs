//! # Governance Contract Testing Framework
//!
//! A reusable testing harness for the governance suite (voting ledger,
//! governor, treasury) supporting property-based testing, invariant checking
//! and state exploration.
//!
//! ## Architecture
//!
//! ```text
//! test/framework/
//! ├── mod.rs             Core TestEnv, GovernanceHarness, snapshots
//! ├── generators.rs      Property-based test value generators
//! ├── invariants.rs      Ledger invariant definitions & verification
//! └── state_explorer.rs  Action-sequence exploration of the ledger
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use test_framework::{GovernanceHarness, TestEnv};
//!
//! let env = TestEnv::new();
//! let gov = GovernanceHarness::new(&env, 2);
//! let alice = gov.create_staker(25);
//! gov.stake(&alice, 25);
//! env.mine(1);
//! let id = gov.propose_payment(&alice, 0);
//! ```

extern crate std;

pub mod generators;

use governor::{
    config::ProposalTypeSettings, GovernorContract, GovernorContractClient,
};
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::StellarAssetClient,
    vec, Address, Bytes, Env, String, Vec,
};
use treasury::{TreasuryContract, TreasuryContractClient};
use voting_ledger::{power::voting_power, VotingLedgerContract, VotingLedgerContractClient};

/// Ledger sequence every `TestEnv` starts at.
pub const GENESIS_BLOCK: u32 = 100;
/// Ledger timestamp every `TestEnv` starts at.
pub const GENESIS_TIME: u64 = 1_000_000;

/// Voting window of the harness's single proposal type, in blocks.
pub const HARNESS_VOTE_BLOCKS: u32 = 10;
/// Timelock delay of the harness's single proposal type, in seconds.
pub const HARNESS_DELAY: u64 = 172_800;

// ── Core Test Environment ────────────────────────────────────────────────────

/// A high-level test environment that wraps the Soroban `Env` and provides
/// block and time control plus address management.
pub struct TestEnv {
    pub env: Env,
    generated_addresses: std::vec::Vec<Address>,
}

impl TestEnv {
    /// Create a new test environment with all auth mocked, positioned at
    /// `GENESIS_BLOCK` / `GENESIS_TIME`.
    pub fn new() -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.ledger().with_mut(|l| {
            l.sequence_number = GENESIS_BLOCK;
            l.timestamp = GENESIS_TIME;
        });
        Self {
            env,
            generated_addresses: std::vec::Vec::new(),
        }
    }

    /// Generate a fresh Soroban address (cached for re-use).
    pub fn generate_address(&mut self) -> Address {
        let addr = Address::generate(&self.env);
        self.generated_addresses.push(addr.clone());
        addr
    }

    /// Generate `n` distinct addresses.
    pub fn generate_addresses(&mut self, n: usize) -> std::vec::Vec<Address> {
        (0..n).map(|_| self.generate_address()).collect()
    }

    /// Close the current block and open `blocks` later.
    pub fn mine(&self, blocks: u32) {
        self.env.ledger().with_mut(|l| {
            l.sequence_number = l.sequence_number.saturating_add(blocks);
        });
    }

    /// Current ledger sequence.
    pub fn block(&self) -> u32 {
        self.env.ledger().sequence()
    }

    /// Advance the ledger timestamp by `delta` seconds.
    pub fn advance_time(&self, delta: u64) {
        let current = self.env.ledger().timestamp();
        self.env.ledger().set_timestamp(current.saturating_add(delta));
    }

    /// Current ledger timestamp.
    pub fn timestamp(&self) -> u64 {
        self.env.ledger().timestamp()
    }

    /// Deploy a SAC token contract and return its address.
    pub fn deploy_token(&self) -> Address {
        self.env
            .register_stellar_asset_contract_v2(Address::generate(&self.env))
            .address()
    }

    /// Mint tokens from a SAC token to a recipient.
    pub fn mint_tokens(&self, token: &Address, recipient: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, token).mint(recipient, &amount);
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

// ── Governance Harness ───────────────────────────────────────────────────────

/// The three governance contracts deployed, initialised and wired together,
/// with the treasury already handed over to the governor.
pub struct GovernanceHarness<'a> {
    pub env: &'a TestEnv,
    pub ledger: VotingLedgerContractClient<'static>,
    pub governor: GovernorContractClient<'static>,
    pub treasury: TreasuryContractClient<'static>,
    pub ledger_id: Address,
    pub governor_id: Address,
    pub treasury_id: Address,
    pub token: Address,
}

impl<'a> GovernanceHarness<'a> {
    /// Deploy with a single proposal type (`HARNESS_VOTE_BLOCKS`,
    /// `HARNESS_DELAY`) and the given proposal threshold.
    pub fn new(env: &'a TestEnv, proposal_threshold: i128) -> Self {
        let settings = vec![
            &env.env,
            ProposalTypeSettings {
                quorum_percent: 4,
                vote_duration_blocks: HARNESS_VOTE_BLOCKS,
                timelock_delay_secs: HARNESS_DELAY,
            },
        ];
        Self::with_settings(env, proposal_threshold, settings)
    }

    pub fn with_settings(
        env: &'a TestEnv,
        proposal_threshold: i128,
        settings: Vec<ProposalTypeSettings>,
    ) -> Self {
        let token = env.deploy_token();

        let ledger_id = env.env.register(VotingLedgerContract, ());
        let ledger = VotingLedgerContractClient::new(&env.env, &ledger_id);
        ledger.initialize(&token);

        let treasury_id = env.env.register(TreasuryContract, ());
        let treasury = TreasuryContractClient::new(&env.env, &treasury_id);
        treasury.initialize(&Address::generate(&env.env), &token);

        let governor_id = env.env.register(GovernorContract, ());
        let governor = GovernorContractClient::new(&env.env, &governor_id);
        governor.initialize(&ledger_id, &treasury_id, &proposal_threshold, &settings);

        treasury.transfer_admin(&governor_id);

        Self {
            env,
            ledger,
            governor,
            treasury,
            ledger_id,
            governor_id,
            treasury_id,
            token,
        }
    }

    /// Create an account holding `amount` stake tokens (not yet staked).
    pub fn create_staker(&self, amount: i128) -> Address {
        let staker = Address::generate(&self.env.env);
        self.env.mint_tokens(&self.token, &staker, amount);
        staker
    }

    pub fn stake(&self, staker: &Address, amount: i128) {
        self.ledger.deposit(staker, &amount);
    }

    pub fn delegate(&self, delegator: &Address, delegatee: &Address) {
        self.ledger.delegate(delegator, delegatee);
    }

    /// Credit `amount` fresh tokens to the treasury allocation `fund_type`.
    pub fn fund(&self, fund_type: &str, amount: i128) {
        let donor = Address::generate(&self.env.env);
        self.env.mint_tokens(&self.token, &donor, amount);
        self.treasury.deposit(&donor, &self.name(fund_type), &amount);
    }

    /// Propose a single plain payment to a fresh address.
    pub fn propose_payment(&self, proposer: &Address, proposal_type: u32) -> u64 {
        let env = &self.env.env;
        self.governor.propose(
            proposer,
            &vec![env, Address::generate(env)],
            &vec![env, 0i128],
            &vec![env, self.name("")],
            &vec![env, Bytes::new(env)],
            &self.name("harness proposal"),
            &proposal_type,
        )
    }

    pub fn vote(&self, voter: &Address, proposal_id: u64, support: u32) -> i128 {
        self.governor.cast_vote(voter, &proposal_id, &support)
    }

    /// Mine until voting on `proposal_id` has closed.
    pub fn close_voting(&self, proposal_id: u64) {
        if let Some(p) = self.governor.get_proposal(&proposal_id) {
            let now = self.env.block();
            if now <= p.end_block {
                self.env.mine(p.end_block - now + 1);
            }
        }
    }

    pub fn name(&self, s: &str) -> String {
        String::from_str(&self.env.env, s)
    }

    /// Snapshot of all observable ledger state for the given accounts.
    pub fn snapshot(&self, accounts: &[Address]) -> LedgerSnapshot {
        let accounts = accounts
            .iter()
            .map(|a| {
                let checkpoints = (0..self.ledger.num_checkpoints(a))
                    .filter_map(|i| self.ledger.checkpoint(a, &i))
                    .map(|c| (c.block, c.votes))
                    .collect();
                AccountSnapshot {
                    address: a.clone(),
                    stake: self.ledger.stake_balance(a),
                    votes: self.ledger.get_votes(a),
                    delegate: self.ledger.delegates(a),
                    checkpoints,
                }
            })
            .collect();

        LedgerSnapshot {
            block: self.env.block(),
            total_staked: self.ledger.total_staked(),
            accounts,
        }
    }
}

// ── Snapshots ────────────────────────────────────────────────────────────────

/// Observable ledger state for one account.
#[derive(Debug, Clone)]
pub struct AccountSnapshot {
    pub address: Address,
    pub stake: i128,
    pub votes: i128,
    pub delegate: Address,
    /// `(block, votes)` pairs in storage order.
    pub checkpoints: std::vec::Vec<(u32, i128)>,
}

/// Immutable snapshot of the voting ledger at one block.
///
/// Only accounts passed to `GovernanceHarness::snapshot` are included, so
/// conservation checks assume every staker and delegate is tracked.
#[derive(Debug, Clone)]
pub struct LedgerSnapshot {
    pub block: u32,
    pub total_staked: i128,
    pub accounts: std::vec::Vec<AccountSnapshot>,
}

impl LedgerSnapshot {
    pub fn sum_stakes(&self) -> i128 {
        self.accounts.iter().map(|a| a.stake).sum()
    }

    pub fn sum_votes(&self) -> i128 {
        self.accounts.iter().map(|a| a.votes).sum()
    }

    /// Σ floor(sqrt(stake)) over tracked accounts.
    pub fn sum_power(&self) -> i128 {
        self.accounts.iter().map(|a| voting_power(a.stake)).sum()
    }

    pub fn account(&self, address: &Address) -> Option<&AccountSnapshot> {
        self.accounts.iter().find(|a| &a.address == address)
    }
}

// ── Test Outcome Tracking ────────────────────────────────────────────────────

/// Result of a single test action, used by the state explorer.
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    /// The action succeeded.
    Ok,
    /// The action failed with a contract error code.
    ExpectedError(u32),
    /// The action failed unexpectedly.
    UnexpectedError(std::string::String),
}

/// Summary of a test run with coverage metrics.
#[derive(Debug, Clone)]
pub struct TestRunSummary {
    pub actions_executed: usize,
    pub invariant_checks: usize,
    pub invariant_violations: std::vec::Vec<std::string::String>,
    pub entry_points_hit: std::collections::HashSet<std::string::String>,
    pub transitions_observed: usize,
}

impl TestRunSummary {
    pub fn new() -> Self {
        Self {
            actions_executed: 0,
            invariant_checks: 0,
            invariant_violations: std::vec::Vec::new(),
            entry_points_hit: std::collections::HashSet::new(),
            transitions_observed: 0,
        }
    }

    /// True when no invariant violations were detected.
    pub fn passed(&self) -> bool {
        self.invariant_violations.is_empty()
    }

    /// Coverage ratio: entry points hit / total known entry points.
    pub fn entry_point_coverage(&self, total_entry_points: usize) -> f64 {
        if total_entry_points == 0 {
            return 0.0;
        }
        self.entry_points_hit.len() as f64 / total_entry_points as f64
    }
}

impl Default for TestRunSummary {
    fn default() -> Self {
        Self::new()
    }
}
