#![no_std]

//! # Voting Ledger
//!
//! Stake-weighted, delegable voting power for the governance suite:
//!
//! - **Quadratic power**: `power = floor(sqrt(staked_tokens))`
//! - **Delegation**: an account's entire power follows its delegate; an
//!   account that never delegated counts as its own delegate
//! - **Checkpoints**: every change to a delegate's power is recorded per
//!   ledger sequence so proposals can read power as of a past block

pub mod checkpoints;
pub mod events;
pub mod power;

use common::ttl::{bump_instance, set_persistent};
pub use common::LedgerError;
use soroban_sdk::{contract, contractimpl, symbol_short, token, Address, Env, Symbol};

use checkpoints::Checkpoint;
use power::voting_power;

// ── Storage key constants ─────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const STAKE: Symbol = symbol_short!("STAKE");
const DELEGATE: Symbol = symbol_short!("DELEG");

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct VotingLedgerContract;

#[contractimpl]
impl VotingLedgerContract {
    /// Bootstrap the ledger with the SEP-41 token that is staked.
    pub fn initialize(env: Env, stake_token: Address) -> Result<(), LedgerError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(LedgerError::AlreadyInitialized);
        }

        env.storage().instance().set(&STAKE_TOKEN, &stake_token);
        env.storage().instance().set(&TOTAL_STAKED, &0i128);
        env.storage().instance().set(&INITIALIZED, &true);
        bump_instance(&env);

        Ok(())
    }

    // ── Staking ───────────────────────────────────────────────────────────────

    /// Stake `amount` tokens.
    ///
    /// The power gained is `power(new_stake) - power(old_stake)`, credited to
    /// the staker's current delegate. A staker without a delegate is credited
    /// directly.
    pub fn deposit(env: Env, staker: Address, amount: i128) -> Result<(), LedgerError> {
        Self::require_initialized(&env)?;
        staker.require_auth();

        if amount <= 0 {
            return Err(LedgerError::InvalidAmount);
        }

        let token_addr = Self::load_stake_token(&env)?;
        token::Client::new(&env, &token_addr).transfer(
            &staker,
            &env.current_contract_address(),
            &amount,
        );

        let old_stake = Self::load_stake(&env, &staker);
        let new_stake = old_stake
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;
        let total: i128 = env
            .storage()
            .instance()
            .get(&TOTAL_STAKED)
            .unwrap_or(0);
        let new_total = total
            .checked_add(amount)
            .ok_or(LedgerError::ArithmeticOverflow)?;

        set_persistent(&env, &(STAKE, staker.clone()), &new_stake);
        env.storage().instance().set(&TOTAL_STAKED, &new_total);
        bump_instance(&env);

        events::publish_staked(&env, &staker, amount, new_stake);

        let gained = voting_power(new_stake) - voting_power(old_stake);
        let delegatee = Self::effective_delegate(&env, &staker);
        Self::move_voting_power(&env, None, Some(&delegatee), gained)
    }

    // ── Delegation ────────────────────────────────────────────────────────────

    /// Route all of `delegator`'s voting power to `delegatee`.
    ///
    /// Delegating to oneself restores the undelegated state. Re-delegating to
    /// the current delegate moves nothing.
    pub fn delegate(env: Env, delegator: Address, delegatee: Address) -> Result<(), LedgerError> {
        Self::require_initialized(&env)?;
        delegator.require_auth();

        let current = Self::effective_delegate(&env, &delegator);
        let power = voting_power(Self::load_stake(&env, &delegator));

        set_persistent(&env, &(DELEGATE, delegator.clone()), &delegatee);
        bump_instance(&env);

        events::publish_delegate_changed(&env, &delegator, &current, &delegatee);

        Self::move_voting_power(&env, Some(&current), Some(&delegatee), power)
    }

    // ── Views ─────────────────────────────────────────────────────────────────

    /// Current voting power held by `account` as a delegate.
    pub fn get_votes(env: Env, account: Address) -> i128 {
        checkpoints::latest(&env, &account)
    }

    /// Voting power held by `account` at the end of `block_number`.
    ///
    /// Only strictly past blocks may be queried; the current block can still
    /// change before it closes.
    pub fn get_past_votes(
        env: Env,
        account: Address,
        block_number: u32,
    ) -> Result<i128, LedgerError> {
        if block_number >= env.ledger().sequence() {
            return Err(LedgerError::BlockNotYetMined);
        }
        Ok(checkpoints::votes_at(&env, &account, block_number))
    }

    pub fn stake_balance(env: Env, account: Address) -> i128 {
        Self::load_stake(&env, &account)
    }

    /// The account currently receiving `account`'s voting power.
    pub fn delegates(env: Env, account: Address) -> Address {
        Self::effective_delegate(&env, &account)
    }

    pub fn num_checkpoints(env: Env, account: Address) -> u32 {
        checkpoints::count(&env, &account)
    }

    pub fn checkpoint(env: Env, account: Address, index: u32) -> Option<Checkpoint> {
        checkpoints::get(&env, &account, index)
    }

    pub fn total_staked(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&TOTAL_STAKED)
            .unwrap_or(0)
    }

    pub fn stake_token(env: Env) -> Result<Address, LedgerError> {
        Self::load_stake_token(&env)
    }

    /// Voting power a stake of `stake` tokens would carry.
    pub fn voting_power_of(_env: Env, stake: i128) -> i128 {
        voting_power(stake)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), LedgerError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(LedgerError::NotInitialized);
        }
        Ok(())
    }

    fn load_stake_token(env: &Env) -> Result<Address, LedgerError> {
        env.storage()
            .instance()
            .get(&STAKE_TOKEN)
            .ok_or(LedgerError::NotInitialized)
    }

    fn load_stake(env: &Env, account: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&(STAKE, account.clone()))
            .unwrap_or(0i128)
    }

    fn effective_delegate(env: &Env, account: &Address) -> Address {
        env.storage()
            .persistent()
            .get(&(DELEGATE, account.clone()))
            .unwrap_or_else(|| account.clone())
    }

    /// Shift `amount` of voting power between two delegates.
    ///
    /// `None` on either side means the power is created (deposit) rather
    /// than taken from another delegate.
    fn move_voting_power(
        env: &Env,
        from: Option<&Address>,
        to: Option<&Address>,
        amount: i128,
    ) -> Result<(), LedgerError> {
        if from == to || amount == 0 {
            return Ok(());
        }

        if let Some(src) = from {
            let previous = checkpoints::latest(env, src);
            let current = previous
                .checked_sub(amount)
                .filter(|v| *v >= 0)
                .ok_or(LedgerError::ArithmeticOverflow)?;
            checkpoints::write(env, src, current);
            events::publish_votes_changed(env, src, previous, current);
        }

        if let Some(dst) = to {
            let previous = checkpoints::latest(env, dst);
            let current = previous
                .checked_add(amount)
                .ok_or(LedgerError::ArithmeticOverflow)?;
            checkpoints::write(env, dst, current);
            events::publish_votes_changed(env, dst, previous, current);
        }

        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
