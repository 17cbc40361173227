#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::StellarAssetClient,
    Address, Env,
};
use voting_ledger::{power::voting_power, VotingLedgerContract, VotingLedgerContractClient};

/// Actions modelling every mutating ledger entry point plus block production.
///
/// Amounts are bounded so five users can never overflow the token supply.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { amount: u32 },
    Delegate { delegatee: u8 },
    Mine { blocks: u8 },
}

const USERS: usize = 5;

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(1);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let ledger_id = env.register(VotingLedgerContract, ());
    let client = VotingLedgerContractClient::new(&env, &ledger_id);

    if client.try_initialize(&token).is_err() {
        return;
    }

    let mut users = Vec::new();
    for _ in 0..USERS {
        let u = Address::generate(&env);
        StellarAssetClient::new(&env, &token).mint(&u, &(u32::MAX as i128 * 1_000));
        users.push(u);
    }

    // (block, votes) history per user as observed after each block closed.
    let mut closed: Vec<Vec<(u32, i128)>> = vec![Vec::new(); USERS];

    for (i, action) in actions.into_iter().take(200).enumerate() {
        let caller = &users[i % USERS];
        match action {
            FuzzAction::Deposit { amount } => {
                let _ = client.try_deposit(caller, &(amount as i128));
            }
            FuzzAction::Delegate { delegatee } => {
                let to = &users[delegatee as usize % USERS];
                let _ = client.try_delegate(caller, to);
            }
            FuzzAction::Mine { blocks } => {
                let block = env.ledger().sequence();
                for (u, history) in users.iter().zip(closed.iter_mut()) {
                    history.push((block, client.get_votes(u)));
                }
                env.ledger()
                    .set_sequence_number(block.saturating_add(blocks as u32).max(block + 1));
            }
        }

        // ── Post-action invariant checks ──
        let mut stakes = 0i128;
        let mut power = 0i128;
        let mut votes = 0i128;
        for u in &users {
            let stake = client.stake_balance(u);
            stakes += stake;
            power += voting_power(stake);
            let v = client.get_votes(u);
            assert!(v >= 0, "INVARIANT VIOLATION: negative votes {}", v);
            votes += v;
        }
        assert_eq!(stakes, client.total_staked(), "INVARIANT VIOLATION: total_staked drift");
        assert_eq!(votes, power, "INVARIANT VIOLATION: voting power not conserved");

        // History of closed blocks is immutable.
        for (u, history) in users.iter().zip(closed.iter()) {
            for (block, recorded) in history {
                assert_eq!(
                    client.get_past_votes(u, block),
                    *recorded,
                    "INVARIANT VIOLATION: past votes changed at block {}",
                    block
                );
            }
        }
    }
});
