use crate::error::Error;
use crate::types::{CreditOracleLink, Loan, PresaleConfig, Wallets};
use soroban_sdk::{contracttype, Address, Env};

const DAY_IN_LEDGERS: u32 = 17_280;
const PERSISTENT_BUMP: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_THRESHOLD: u32 = PERSISTENT_BUMP - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Initialized,
    Admin,
    PaymentToken,
    Wallets,
    PresaleConfig,
    PresaleRaised,
    Paused,
    Locked,
    CreditOracle,
    TotalSupply,
    Balance(Address),
    KycVerified(Address),
    PropertyValue(u32),
    FractionsSold(u32),
    Fraction(u32, Address), // (property_id, owner)
    Loan(u64),
    LoanCounter,
}

pub struct Storage;

impl Storage {
    // Lifecycle
    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().has(&DataKey::Initialized)
    }

    pub fn set_initialized(env: &Env) {
        env.storage().instance().set(&DataKey::Initialized, &true);
    }

    // Admin
    pub fn get_admin(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_admin(env: &Env, admin: &Address) {
        env.storage().instance().set(&DataKey::Admin, admin);
    }

    // Deployment configuration
    pub fn get_payment_token(env: &Env) -> Result<Address, Error> {
        env.storage()
            .instance()
            .get(&DataKey::PaymentToken)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_payment_token(env: &Env, token: &Address) {
        env.storage().instance().set(&DataKey::PaymentToken, token);
    }

    pub fn get_wallets(env: &Env) -> Result<Wallets, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Wallets)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_wallets(env: &Env, wallets: &Wallets) {
        env.storage().instance().set(&DataKey::Wallets, wallets);
    }

    // Presale
    pub fn get_presale_config(env: &Env) -> Result<PresaleConfig, Error> {
        env.storage()
            .instance()
            .get(&DataKey::PresaleConfig)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_presale_config(env: &Env, config: &PresaleConfig) {
        env.storage().instance().set(&DataKey::PresaleConfig, config);
    }

    pub fn get_presale_raised(env: &Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::PresaleRaised)
            .unwrap_or(0)
    }

    pub fn set_presale_raised(env: &Env, raised: i128) {
        env.storage().instance().set(&DataKey::PresaleRaised, &raised);
    }

    // Pause / reentrancy lock
    pub fn is_paused(env: &Env) -> bool {
        env.storage()
            .instance()
            .get(&DataKey::Paused)
            .unwrap_or(false)
    }

    pub fn set_paused(env: &Env, paused: bool) {
        env.storage().instance().set(&DataKey::Paused, &paused);
    }

    pub fn is_locked(env: &Env) -> bool {
        env.storage().instance().has(&DataKey::Locked)
    }

    pub fn set_locked(env: &Env, locked: bool) {
        if locked {
            env.storage().instance().set(&DataKey::Locked, &true);
        } else {
            env.storage().instance().remove(&DataKey::Locked);
        }
    }

    // Credit oracle
    pub fn get_credit_oracle(env: &Env) -> Option<CreditOracleLink> {
        env.storage().instance().get(&DataKey::CreditOracle)
    }

    pub fn set_credit_oracle(env: &Env, link: &CreditOracleLink) {
        env.storage().instance().set(&DataKey::CreditOracle, link);
    }

    // Supply
    pub fn get_total_supply(env: &Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalSupply)
            .unwrap_or(0)
    }

    pub fn set_total_supply(env: &Env, supply: i128) {
        env.storage().instance().set(&DataKey::TotalSupply, &supply);
    }

    pub fn get_balance(env: &Env, account: &Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Balance(account.clone()))
            .unwrap_or(0)
    }

    pub fn set_balance(env: &Env, account: &Address, balance: i128) {
        Self::set_persistent(env, &DataKey::Balance(account.clone()), &balance);
    }

    // KYC
    pub fn is_kyc_verified(env: &Env, account: &Address) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::KycVerified(account.clone()))
            .unwrap_or(false)
    }

    pub fn set_kyc_verified(env: &Env, account: &Address) {
        Self::set_persistent(env, &DataKey::KycVerified(account.clone()), &true);
    }

    // Properties
    pub fn get_property_value(env: &Env, property_id: u32) -> Option<i128> {
        env.storage()
            .persistent()
            .get(&DataKey::PropertyValue(property_id))
    }

    pub fn set_property_value(env: &Env, property_id: u32, value: i128) {
        Self::set_persistent(env, &DataKey::PropertyValue(property_id), &value);
    }

    pub fn get_fractions_sold(env: &Env, property_id: u32) -> u32 {
        env.storage()
            .persistent()
            .get(&DataKey::FractionsSold(property_id))
            .unwrap_or(0)
    }

    pub fn set_fractions_sold(env: &Env, property_id: u32, sold: u32) {
        Self::set_persistent(env, &DataKey::FractionsSold(property_id), &sold);
    }

    pub fn get_fraction(env: &Env, property_id: u32, owner: &Address) -> u32 {
        env.storage()
            .persistent()
            .get(&DataKey::Fraction(property_id, owner.clone()))
            .unwrap_or(0)
    }

    pub fn set_fraction(env: &Env, property_id: u32, owner: &Address, fraction: u32) {
        Self::set_persistent(env, &DataKey::Fraction(property_id, owner.clone()), &fraction);
    }

    // Loans
    pub fn get_loan(env: &Env, loan_id: u64) -> Result<Loan, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Loan(loan_id))
            .ok_or(Error::UnknownLoan)
    }

    pub fn set_loan(env: &Env, loan: &Loan) {
        Self::set_persistent(env, &DataKey::Loan(loan.id), loan);
    }

    /// Id the next issued loan will receive; ids start at 0.
    pub fn get_loan_counter(env: &Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::LoanCounter)
            .unwrap_or(0)
    }

    pub fn set_loan_counter(env: &Env, next_id: u64) {
        env.storage().instance().set(&DataKey::LoanCounter, &next_id);
    }

    fn set_persistent<V>(env: &Env, key: &DataKey, value: &V)
    where
        V: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
    {
        env.storage().persistent().set(key, value);
        env.storage()
            .persistent()
            .extend_ttl(key, PERSISTENT_THRESHOLD, PERSISTENT_BUMP);
    }
}
