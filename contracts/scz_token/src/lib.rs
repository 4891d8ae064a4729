#![no_std]

//! SCZ token: presale distribution, fractional real-estate ownership and a
//! credit-scored lending ledger in one contract.
//!
//! Components live in their own modules and the contract entry points only
//! delegate:
//! - `access`: admin, KYC, pause switch, reentrancy guard
//! - `presale`: windowed, capped token sale
//! - `supply`: SCZ balances and supply
//! - `fractions`: property valuations and percentage ownership
//! - `oracle`: credit score port and threshold
//! - `loans`: loan issuance, repayment and refinance

mod access;
mod error;
mod events;
mod fractions;
mod loans;
mod oracle;
mod presale;
mod storage;
mod supply;
mod types;
mod validation;


pub use error::Error;
pub use events::*;
pub use oracle::{CreditOracleClient, CreditOracleInterface};
pub use types::*;

use access::Access;
use fractions::Fractions;
use loans::LoanLedger;
use oracle::CreditOracle;
use presale::Presale;
use storage::Storage;
use supply::Supply;
use validation::validate_presale_config;

use soroban_sdk::{contract, contractimpl, Address, Env};

#[contract]
pub struct SczToken;

#[contractimpl]
impl SczToken {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the contract
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    /// - `InvalidConfig`: Presale window, caps or purchase bounds inconsistent
    pub fn initialize(
        env: Env,
        admin: Address,
        payment_token: Address,
        wallets: Wallets,
        params: PresaleConfig,
    ) -> Result<(), Error> {
        if Storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();
        validate_presale_config(&params)?;

        Storage::set_initialized(&env);
        Storage::set_admin(&env, &admin);
        Storage::set_payment_token(&env, &payment_token);
        Storage::set_wallets(&env, &wallets);
        Storage::set_presale_config(&env, &params);
        Storage::set_presale_raised(&env, 0);
        Storage::set_paused(&env, false);
        Storage::set_loan_counter(&env, 0);

        Ok(())
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        Storage::get_admin(&env)
    }

    pub fn transfer_admin(env: Env, new_admin: Address) -> Result<(), Error> {
        Access::transfer_admin(&env, &new_admin)
    }

    /// Pause user-facing operations (emergency)
    pub fn pause(env: Env) -> Result<(), Error> {
        Access::set_paused(&env, true)
    }

    pub fn unpause(env: Env) -> Result<(), Error> {
        Access::set_paused(&env, false)
    }

    pub fn is_paused(env: Env) -> bool {
        Storage::is_paused(&env)
    }

    pub fn verify_kyc(env: Env, account: Address) -> Result<(), Error> {
        Access::verify_kyc(&env, &account)
    }

    pub fn is_kyc_verified(env: Env, account: Address) -> bool {
        Storage::is_kyc_verified(&env, &account)
    }

    pub fn wallets(env: Env) -> Result<Wallets, Error> {
        Storage::get_wallets(&env)
    }

    // ============================================
    // SUPPLY
    // ============================================

    pub fn mint(env: Env, to: Address, amount: i128) -> Result<(), Error> {
        Supply::mint(&env, &to, amount)
    }

    pub fn balance(env: Env, account: Address) -> i128 {
        Supply::balance(&env, &account)
    }

    pub fn total_supply(env: Env) -> i128 {
        Supply::total_supply(&env)
    }

    pub fn decimals(_env: Env) -> u32 {
        TOKEN_DECIMALS
    }

    // ============================================
    // PRESALE
    // ============================================

    /// Buy SCZ during the presale window; returns tokens credited.
    pub fn purchase(env: Env, buyer: Address, amount: i128) -> Result<i128, Error> {
        Presale::purchase(&env, &buyer, amount)
    }

    pub fn presale_config(env: Env) -> Result<PresaleConfig, Error> {
        Storage::get_presale_config(&env)
    }

    pub fn presale_raised(env: Env) -> i128 {
        Storage::get_presale_raised(&env)
    }

    pub fn soft_cap_reached(env: Env) -> Result<bool, Error> {
        Presale::soft_cap_reached(&env)
    }

    // ============================================
    // FRACTIONAL OWNERSHIP
    // ============================================

    pub fn set_property_value(env: Env, property_id: u32, value: i128) -> Result<(), Error> {
        Fractions::set_property_value(&env, property_id, value)
    }

    pub fn buy_fraction(
        env: Env,
        buyer: Address,
        property_id: u32,
        fraction: u32,
        payment: i128,
    ) -> Result<(), Error> {
        Fractions::buy_fraction(&env, &buyer, property_id, fraction, payment)
    }

    pub fn property_value(env: Env, property_id: u32) -> Result<i128, Error> {
        Fractions::property_value(&env, property_id)
    }

    pub fn fraction_of(env: Env, property_id: u32, account: Address) -> u32 {
        Fractions::fraction_of(&env, property_id, &account)
    }

    pub fn fractions_sold(env: Env, property_id: u32) -> u32 {
        Fractions::fractions_sold(&env, property_id)
    }

    pub fn withdraw_funds(env: Env, to: Address, amount: i128) -> Result<(), Error> {
        Fractions::withdraw_funds(&env, &to, amount)
    }

    // ============================================
    // CREDIT ORACLE
    // ============================================

    pub fn configure_credit_oracle(env: Env, oracle: Address, threshold: u32) -> Result<(), Error> {
        CreditOracle::configure(&env, &oracle, threshold)
    }

    pub fn credit_oracle(env: Env) -> Option<CreditOracleLink> {
        Storage::get_credit_oracle(&env)
    }

    pub fn is_creditworthy(env: Env, account: Address) -> Result<bool, Error> {
        CreditOracle::is_creditworthy(&env, &account)
    }

    // ============================================
    // LOANS
    // ============================================

    pub fn request_credit_with_real_estate(
        env: Env,
        borrower: Address,
        property_id: u32,
        amount: i128,
    ) -> Result<u64, Error> {
        LoanLedger::request_credit_with_real_estate(&env, &borrower, property_id, amount)
    }

    pub fn request_unsecured_credit(env: Env, borrower: Address, amount: i128) -> Result<u64, Error> {
        LoanLedger::request_unsecured_credit(&env, &borrower, amount)
    }

    pub fn partial_repay_loan(
        env: Env,
        payer: Address,
        loan_id: u64,
        amount: i128,
    ) -> Result<i128, Error> {
        LoanLedger::partial_repay_loan(&env, &payer, loan_id, amount)
    }

    pub fn refinance_loan(env: Env, loan_id: u64) -> Result<(), Error> {
        LoanLedger::refinance_loan(&env, loan_id)
    }

    pub fn loans(env: Env, loan_id: u64) -> Result<Loan, Error> {
        LoanLedger::loan(&env, loan_id)
    }

    pub fn loan_count(env: Env) -> u64 {
        LoanLedger::loan_count(&env)
    }
}
