#![no_std]

//! Admin-fed credit score oracle.
//!
//! Answers `score(account)` with the last score the admin published for the
//! account, or the default score when none was published.

mod error;
mod events;
mod storage;

pub use error::Error;
pub use events::{DefaultScoreSetEvent, ScoreClearedEvent, ScoreSetEvent};
use storage::{DataKey, SCORE_BUMP, SCORE_THRESHOLD};

use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};

#[contract]
pub struct CreditOracle;

#[contractimpl]
impl CreditOracle {
    /// Initialize the oracle
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(env: Env, admin: Address, default_score: u32) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Initialized) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::DefaultScore, &default_score);

        Ok(())
    }

    /// Publish a score for an account (admin only)
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    pub fn set_score(env: Env, account: Address, score: u32) -> Result<(), Error> {
        Self::require_admin(&env)?;

        let key = DataKey::Score(account.clone());
        env.storage().persistent().set(&key, &score);
        env.storage()
            .persistent()
            .extend_ttl(&key, SCORE_THRESHOLD, SCORE_BUMP);

        env.events().publish(
            (Symbol::new(&env, "score_set"), account.clone()),
            ScoreSetEvent { account, score },
        );

        Ok(())
    }

    /// Drop an account's score so it falls back to the default (admin only)
    pub fn clear_score(env: Env, account: Address) -> Result<(), Error> {
        Self::require_admin(&env)?;

        env.storage()
            .persistent()
            .remove(&DataKey::Score(account.clone()));

        env.events().publish(
            (Symbol::new(&env, "score_cleared"), account.clone()),
            ScoreClearedEvent { account },
        );

        Ok(())
    }

    pub fn set_default_score(env: Env, score: u32) -> Result<(), Error> {
        Self::require_admin(&env)?;

        env.storage().instance().set(&DataKey::DefaultScore, &score);

        env.events().publish(
            (Symbol::new(&env, "default_score_set"),),
            DefaultScoreSetEvent { score },
        );

        Ok(())
    }

    /// Current score for `account`. Never fails: an uninitialized oracle
    /// scores everyone 0.
    pub fn score(env: Env, account: Address) -> u32 {
        env.storage()
            .persistent()
            .get(&DataKey::Score(account))
            .unwrap_or_else(|| {
                env.storage()
                    .instance()
                    .get(&DataKey::DefaultScore)
                    .unwrap_or(0)
            })
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }
}

impl CreditOracle {
    fn require_admin(env: &Env) -> Result<(), Error> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)?;
        admin.require_auth();
        Ok(())
    }
}

#[cfg(test)]
mod test {
    extern crate std;

    use super::*;
    use soroban_sdk::testutils::Address as _;

    fn setup(env: &Env) -> (CreditOracleClient<'_>, Address) {
        env.mock_all_auths();
        let admin = Address::generate(env);
        let contract_id = env.register(CreditOracle, ());
        let client = CreditOracleClient::new(env, &contract_id);
        client.initialize(&admin, &500);
        (client, admin)
    }

    #[test]
    fn test_score_falls_back_to_default() {
        let env = Env::default();
        let (client, _) = setup(&env);
        let account = Address::generate(&env);

        assert_eq!(client.score(&account), 500);

        client.set_score(&account, &750);
        assert_eq!(client.score(&account), 750);

        client.clear_score(&account);
        assert_eq!(client.score(&account), 500);
    }

    #[test]
    fn test_default_score_update() {
        let env = Env::default();
        let (client, _) = setup(&env);
        let scored = Address::generate(&env);
        let unscored = Address::generate(&env);

        client.set_score(&scored, &810);
        client.set_default_score(&650);

        assert_eq!(client.score(&unscored), 650);
        assert_eq!(client.score(&scored), 810);
    }

    #[test]
    fn test_set_score_requires_admin() {
        let env = Env::default();
        let (client, admin) = setup(&env);

        client.set_score(&Address::generate(&env), &700);

        let auths = env.auths();
        assert_eq!(auths.len(), 1);
        assert_eq!(auths[0].0, admin);
    }

    #[test]
    fn test_double_initialize() {
        let env = Env::default();
        let (client, admin) = setup(&env);

        assert_eq!(client.admin(), admin);
        assert_eq!(
            client.try_initialize(&admin, &0),
            Err(Ok(Error::AlreadyInitialized))
        );
    }

    #[test]
    fn test_uninitialized() {
        let env = Env::default();
        env.mock_all_auths();
        let contract_id = env.register(CreditOracle, ());
        let client = CreditOracleClient::new(&env, &contract_id);
        let account = Address::generate(&env);

        assert_eq!(client.score(&account), 0);
        assert_eq!(
            client.try_set_score(&account, &700),
            Err(Ok(Error::NotInitialized))
        );
    }
}
