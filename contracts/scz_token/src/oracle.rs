use crate::access::Access;
use crate::error::Error;
use crate::events::CreditOracleConfiguredEvent;
use crate::storage::Storage;
use crate::types::CreditOracleLink;
use soroban_sdk::{contractclient, log, Address, Env, Symbol};

/// Interface every credit score provider exposes.
#[contractclient(name = "CreditOracleClient")]
pub trait CreditOracleInterface {
    fn score(env: Env, account: Address) -> u32;
}

pub struct CreditOracle;

impl CreditOracle {
    /// Replace the oracle link (admin only). Last write wins.
    pub fn configure(env: &Env, oracle: &Address, threshold: u32) -> Result<(), Error> {
        Access::require_admin(env)?;

        Storage::set_credit_oracle(
            env,
            &CreditOracleLink {
                oracle: oracle.clone(),
                threshold,
            },
        );

        env.events().publish(
            (Symbol::new(env, "credit_oracle_configured"),),
            CreditOracleConfiguredEvent {
                oracle: oracle.clone(),
                threshold,
            },
        );
        Ok(())
    }

    /// Query the configured oracle synchronously and compare with the threshold.
    pub fn is_creditworthy(env: &Env, account: &Address) -> Result<bool, Error> {
        let link = Storage::get_credit_oracle(env).ok_or(Error::OracleNotConfigured)?;

        let score = CreditOracleClient::new(env, &link.oracle).score(account);
        log!(env, "credit score", account.clone(), score, link.threshold);

        Ok(score >= link.threshold)
    }
}
