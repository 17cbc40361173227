#![no_std]

//! # Treasury
//!
//! Custodies the governance token in named allocations and releases it only
//! through a timelock:
//!
//! - **Allocations**: deposits are tagged with a fund name; untagged
//!   transfers land in `GENERAL`
//! - **Queue**: the admin schedules `(target, value, signature, data, eta,
//!   fund_type)`; funds must already be available when queuing
//! - **Execute**: allowed in `[eta, eta + GRACE_PERIOD]`, debits the
//!   allocation, pays the target and invokes it
//! - **Admin handover**: the bootstrap admin hands custody to the governor
//!   exactly once

pub mod events;
pub mod timelock;

use common::{
    ttl::{bump_instance, set_persistent},
    TimelockTargetClient, GENERAL_FUND,
};
pub use common::TreasuryError;
use soroban_sdk::{
    contract, contractimpl, symbol_short, token, Address, Bytes, BytesN, Env, String, Symbol,
};

pub use timelock::GRACE_PERIOD;

// ── Storage key constants ─────────────────────────────────────────────────────

const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");
const TOKEN: Symbol = symbol_short!("TOKEN");
const HANDED_OVER: Symbol = symbol_short!("ADM_DONE");
const FUND: Symbol = symbol_short!("FUND");

// ── Contract ──────────────────────────────────────────────────────────────────

#[contract]
pub struct TreasuryContract;

#[contractimpl]
impl TreasuryContract {
    /// Bootstrap the treasury.
    ///
    /// * `admin`: initial custodian; expected to hand over to the governor
    ///   with `transfer_admin` right after deployment.
    /// * `token`: SEP-41 token held in every allocation.
    pub fn initialize(env: Env, admin: Address, token: Address) -> Result<(), TreasuryError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(TreasuryError::AlreadyInitialized);
        }
        admin.require_auth();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&TOKEN, &token);
        env.storage().instance().set(&INITIALIZED, &true);
        bump_instance(&env);

        Ok(())
    }

    // ── Funding ───────────────────────────────────────────────────────────────

    /// Transfer `amount` tokens from `from` into the `fund_type` allocation.
    pub fn deposit(
        env: Env,
        from: Address,
        fund_type: String,
        amount: i128,
    ) -> Result<i128, TreasuryError> {
        Self::require_initialized(&env)?;
        from.require_auth();

        if amount < 0 {
            return Err(TreasuryError::InvalidAmount);
        }
        if amount > 0 {
            let token_addr = Self::load_token(&env)?;
            token::Client::new(&env, &token_addr).transfer(
                &from,
                &env.current_contract_address(),
                &amount,
            );
        }

        let balance = Self::load_fund(&env, &fund_type)
            .checked_add(amount)
            .ok_or(TreasuryError::ArithmeticOverflow)?;
        set_persistent(&env, &(FUND, fund_type.clone()), &balance);
        bump_instance(&env);

        events::publish_fund_deposited(&env, &fund_type, &from, amount, balance);

        Ok(balance)
    }

    /// Untagged transfer; credited to the `GENERAL` allocation.
    pub fn receive(env: Env, from: Address, amount: i128) -> Result<i128, TreasuryError> {
        let general = String::from_str(&env, GENERAL_FUND);
        Self::deposit(env, from, general, amount)
    }

    // ── Timelock ──────────────────────────────────────────────────────────────

    /// Schedule a transaction for execution at or after `eta`.
    ///
    /// The allocation must already hold `value`. Queuing an identical tuple
    /// again replaces the stored eta.
    pub fn queue_transaction(
        env: Env,
        target: Address,
        value: i128,
        signature: String,
        data: Bytes,
        eta: u64,
        fund_type: String,
    ) -> Result<BytesN<32>, TreasuryError> {
        Self::require_admin(&env)?;

        if value < 0 {
            return Err(TreasuryError::InvalidAmount);
        }
        if eta < env.ledger().timestamp() {
            return Err(TreasuryError::EtaInPast);
        }
        if Self::load_fund(&env, &fund_type) < value {
            return Err(TreasuryError::InsufficientFunds);
        }

        let tx_hash = timelock::tx_hash(&env, &target, value, &signature, &data, eta, &fund_type);
        timelock::set_queued(&env, &tx_hash, eta);
        bump_instance(&env);

        events::publish_transaction_queued(&env, &tx_hash, &target, value, &signature, &data, eta);

        Ok(tx_hash)
    }

    /// Execute a queued transaction and return the target's reply.
    ///
    /// A plain payment (no signature, no data) only transfers `value`.
    /// Otherwise the target's `exec_call` entry point is invoked; if it fails
    /// the whole execution is rolled back.
    pub fn execute_transaction(
        env: Env,
        target: Address,
        value: i128,
        signature: String,
        data: Bytes,
        eta: u64,
        fund_type: String,
    ) -> Result<Bytes, TreasuryError> {
        Self::require_admin(&env)?;

        let tx_hash = timelock::tx_hash(&env, &target, value, &signature, &data, eta, &fund_type);
        let queued_eta =
            timelock::queued_eta(&env, &tx_hash).ok_or(TreasuryError::TransactionNotQueued)?;

        let now = env.ledger().timestamp();
        if now < queued_eta {
            return Err(TreasuryError::TransactionLocked);
        }
        if now > queued_eta.saturating_add(GRACE_PERIOD) {
            return Err(TreasuryError::TransactionStale);
        }

        let balance = Self::load_fund(&env, &fund_type);
        if balance < value {
            return Err(TreasuryError::InsufficientFunds);
        }
        let payload = timelock::call_payload(&env, &signature, &data);

        timelock::clear_queued(&env, &tx_hash);
        let remaining = balance - value;
        set_persistent(&env, &(FUND, fund_type.clone()), &remaining);
        bump_instance(&env);

        if value > 0 {
            let token_addr = Self::load_token(&env)?;
            token::Client::new(&env, &token_addr).transfer(
                &env.current_contract_address(),
                &target,
                &value,
            );
        }

        let reply = if signature.len() == 0 && data.len() == 0 {
            Bytes::new(&env)
        } else {
            match TimelockTargetClient::new(&env, &target).try_exec_call(&payload) {
                Ok(Ok(reply)) => reply,
                _ => return Err(TreasuryError::TransactionReverted),
            }
        };

        events::publish_transaction_executed(&env, &tx_hash, &target, value, queued_eta);
        events::publish_fund_released(&env, &fund_type, &target, value, remaining);

        Ok(reply)
    }

    // ── Admin ─────────────────────────────────────────────────────────────────

    /// Hand custody to `new_admin`. Allowed exactly once.
    pub fn transfer_admin(env: Env, new_admin: Address) -> Result<(), TreasuryError> {
        let previous = Self::require_admin(&env)?;
        if env.storage().instance().has(&HANDED_OVER) {
            return Err(TreasuryError::AdminAlreadyTransferred);
        }

        env.storage().instance().set(&ADMIN, &new_admin);
        env.storage().instance().set(&HANDED_OVER, &true);
        bump_instance(&env);

        events::publish_admin_transferred(&env, &previous, &new_admin);

        Ok(())
    }

    // ── View functions ────────────────────────────────────────────────────────

    pub fn fund_balance(env: Env, fund_type: String) -> i128 {
        Self::load_fund(&env, &fund_type)
    }

    /// Eta of a queued transaction, `None` if not queued.
    pub fn queued_eta(env: Env, tx_hash: BytesN<32>) -> Option<u64> {
        timelock::queued_eta(&env, &tx_hash)
    }

    pub fn hash_transaction(
        env: Env,
        target: Address,
        value: i128,
        signature: String,
        data: Bytes,
        eta: u64,
        fund_type: String,
    ) -> BytesN<32> {
        timelock::tx_hash(&env, &target, value, &signature, &data, eta, &fund_type)
    }

    pub fn grace_period(_env: Env) -> u64 {
        GRACE_PERIOD
    }

    pub fn admin(env: Env) -> Result<Address, TreasuryError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(TreasuryError::NotInitialized)
    }

    pub fn token(env: Env) -> Result<Address, TreasuryError> {
        Self::load_token(&env)
    }

    pub fn is_handed_over(env: Env) -> bool {
        env.storage().instance().has(&HANDED_OVER)
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    fn require_initialized(env: &Env) -> Result<(), TreasuryError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(TreasuryError::NotInitialized);
        }
        Ok(())
    }

    /// Authorise the stored admin and return it.
    fn require_admin(env: &Env) -> Result<Address, TreasuryError> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&ADMIN)
            .ok_or(TreasuryError::NotInitialized)?;
        admin.require_auth();
        Ok(admin)
    }

    fn load_token(env: &Env) -> Result<Address, TreasuryError> {
        env.storage()
            .instance()
            .get(&TOKEN)
            .ok_or(TreasuryError::NotInitialized)
    }

    fn load_fund(env: &Env, fund_type: &String) -> i128 {
        env.storage()
            .persistent()
            .get(&(FUND, fund_type.clone()))
            .unwrap_or(0i128)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
