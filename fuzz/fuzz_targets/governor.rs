#![no_main]

use arbitrary::Arbitrary;
use governor::{
    config::ProposalTypeSettings, proposal::ProposalState, voting::VoteSupport, GovernorContract,
    GovernorContractClient,
};
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::StellarAssetClient,
    vec, Address, Bytes, Env, String,
};
use treasury::{TreasuryContract, TreasuryContractClient};
use voting_ledger::{VotingLedgerContract, VotingLedgerContractClient};

/// Proposal and voting actions interleaved with stake changes and blocks.
#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { amount: u16 },
    Delegate { delegatee: u8 },
    Propose,
    Vote { proposal: u8, support: u8 },
    Mine { blocks: u8 },
}

const USERS: usize = 4;

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(1);

    let token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let ledger_id = env.register(VotingLedgerContract, ());
    let ledger = VotingLedgerContractClient::new(&env, &ledger_id);
    ledger.initialize(&token);

    let treasury_id = env.register(TreasuryContract, ());
    let treasury = TreasuryContractClient::new(&env, &treasury_id);
    treasury.initialize(&Address::generate(&env), &token);

    let gov_id = env.register(GovernorContract, ());
    let gov = GovernorContractClient::new(&env, &gov_id);
    let settings = vec![
        &env,
        ProposalTypeSettings {
            quorum_percent: 4,
            vote_duration_blocks: 8,
            timelock_delay_secs: 60,
        },
    ];
    if gov
        .try_initialize(&ledger_id, &treasury_id, &1i128, &settings)
        .is_err()
    {
        return;
    }
    treasury.transfer_admin(&gov_id);

    let mut users = std::vec::Vec::new();
    for _ in 0..USERS {
        let u = Address::generate(&env);
        StellarAssetClient::new(&env, &token).mint(&u, &1_000_000_000i128);
        users.push(u);
    }

    for (i, action) in actions.into_iter().take(100).enumerate() {
        let caller = &users[i % USERS];
        match action {
            FuzzAction::Deposit { amount } => {
                let _ = ledger.try_deposit(caller, &(amount as i128));
            }
            FuzzAction::Delegate { delegatee } => {
                let _ = ledger.try_delegate(caller, &users[delegatee as usize % USERS]);
            }
            FuzzAction::Propose => {
                let _ = gov.try_propose(
                    caller,
                    &vec![&env, Address::generate(&env)],
                    &vec![&env, 0i128],
                    &vec![&env, String::from_str(&env, "")],
                    &vec![&env, Bytes::new(&env)],
                    &String::from_str(&env, "fuzz"),
                    &0u32,
                );
            }
            FuzzAction::Vote { proposal, support } => {
                let count = gov.proposal_count();
                if count > 0 {
                    let id = proposal as u64 % count + 1;
                    let _ = gov.try_cast_vote(caller, &id, &(support as u32 % 4));
                }
            }
            FuzzAction::Mine { blocks } => {
                let seq = env.ledger().sequence();
                env.ledger().set_sequence_number(seq + blocks as u32 % 16 + 1);
            }
        }

        // ── Post-action invariant checks ──
        let now = env.ledger().sequence();
        for id in 1..=gov.proposal_count() {
            let p = gov.get_proposal(&id).unwrap();
            let (mut f, mut a, mut ab) = (0i128, 0i128, 0i128);
            for u in &users {
                if let Some(r) = gov.get_receipt(&id, u) {
                    assert_eq!(
                        r.votes,
                        ledger.get_past_votes(u, &p.start_block),
                        "INVARIANT VIOLATION: receipt weight differs from snapshot"
                    );
                    match r.support {
                        VoteSupport::For => f += r.votes,
                        VoteSupport::Against => a += r.votes,
                        VoteSupport::Abstain => ab += r.votes,
                    }
                }
            }
            assert_eq!(
                (p.for_votes, p.against_votes, p.abstain_votes),
                (f, a, ab),
                "INVARIANT VIOLATION: tallies differ from receipts"
            );

            let state = gov.state(&id);
            if now <= p.end_block {
                assert_eq!(state, ProposalState::Active);
            } else if f > a {
                assert_eq!(state, ProposalState::Succeeded);
            } else {
                assert_eq!(state, ProposalState::Defeated);
            }
        }
    }
});
