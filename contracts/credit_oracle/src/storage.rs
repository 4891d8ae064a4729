use soroban_sdk::{contracttype, Address};

pub(crate) const DAY_IN_LEDGERS: u32 = 17_280;
pub(crate) const SCORE_BUMP: u32 = 30 * DAY_IN_LEDGERS;
pub(crate) const SCORE_THRESHOLD: u32 = SCORE_BUMP - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Admin,
    DefaultScore,
    Score(Address),
}
