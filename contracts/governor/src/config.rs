//! Per-type proposal settings.
//!
//! Settings are written once by `initialize`; type tag `i` is the `i`-th
//! entry of the list supplied there.

use soroban_sdk::{contracttype, symbol_short, Env, Symbol, Vec};

const TYPE_SETTINGS: Symbol = symbol_short!("TYPE_CFG");

/// Standard proposals: ~1 day of voting at 5s ledgers, 2-day timelock.
pub const STANDARD: u32 = 0;
/// Treasury spends: ~3 days of voting, 7-day timelock.
pub const TREASURY_SPEND: u32 = 1;
/// Emergency actions: ~4 hours of voting, 6-hour timelock.
pub const EMERGENCY: u32 = 2;

/// Configuration of one proposal type.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalTypeSettings {
    /// Intended participation threshold in percent. Recorded, not enforced.
    pub quorum_percent: u32,
    pub vote_duration_blocks: u32,
    pub timelock_delay_secs: u64,
}

/// The settings table for `STANDARD`, `TREASURY_SPEND` and `EMERGENCY`.
pub fn default_type_settings(env: &Env) -> Vec<ProposalTypeSettings> {
    let mut settings = Vec::new(env);
    settings.push_back(ProposalTypeSettings {
        quorum_percent: 4,
        vote_duration_blocks: 17_280,
        timelock_delay_secs: 172_800,
    });
    settings.push_back(ProposalTypeSettings {
        quorum_percent: 10,
        vote_duration_blocks: 51_840,
        timelock_delay_secs: 604_800,
    });
    settings.push_back(ProposalTypeSettings {
        quorum_percent: 20,
        vote_duration_blocks: 2_880,
        timelock_delay_secs: 21_600,
    });
    settings
}

/// A table is usable when it is non-empty, every quorum is a percentage,
/// every voting window is at least one block long and every timelock is at
/// least one second.
///
/// A zero delay would let a proposal queued at timestamp 0 carry `eta == 0`,
/// which reads as never queued.
pub fn validate(settings: &Vec<ProposalTypeSettings>) -> bool {
    !settings.is_empty()
        && settings.iter().all(|s| {
            s.quorum_percent <= 100 && s.vote_duration_blocks > 0 && s.timelock_delay_secs > 0
        })
}

pub(crate) fn store(env: &Env, settings: &Vec<ProposalTypeSettings>) {
    env.storage().instance().set(&TYPE_SETTINGS, settings);
}

pub(crate) fn load(env: &Env, proposal_type: u32) -> Option<ProposalTypeSettings> {
    env.storage()
        .instance()
        .get::<_, Vec<ProposalTypeSettings>>(&TYPE_SETTINGS)
        .and_then(|all| all.get(proposal_type))
}
