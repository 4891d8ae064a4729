use crate::access::{Access, ReentrancyGuard};
use crate::error::Error;
use crate::events::{LoanIssuedEvent, LoanRefinancedEvent, LoanRepaymentEvent};
use crate::fractions::Fractions;
use crate::oracle::CreditOracle;
use crate::storage::Storage;
use crate::types::{Loan, LoanStatus, INITIAL_INTEREST_RATE, LOAN_TERM};
use crate::validation::{calculate_max_credit, meets_refinance_threshold, next_interest_rate};
use soroban_sdk::{log, token, Address, Env, Symbol};

// ============================================
// LOAN STATE TRANSITIONS
// ============================================

impl Loan {
    /// A freshly issued loan is immediately `Active`.
    pub fn open(
        id: u64,
        borrower: Address,
        principal: i128,
        collateral_property_id: Option<u32>,
        now: u64,
    ) -> Result<Loan, Error> {
        if principal <= 0 {
            return Err(Error::InvalidAmount);
        }
        let due_date = now.checked_add(LOAN_TERM).ok_or(Error::Overflow)?;

        Ok(Loan {
            id,
            borrower,
            principal,
            outstanding: principal,
            interest_rate: INITIAL_INTEREST_RATE,
            due_date,
            repaid_amount: 0,
            collateral_property_id,
            status: LoanStatus::Active,
            refinance_count: 0,
            created_at: now,
        })
    }

    pub fn is_settled(&self) -> bool {
        self.outstanding == 0
    }

    /// Apply up to `amount` against the outstanding balance.
    ///
    /// Returns the amount actually applied (capped at the outstanding balance).
    pub fn apply_repayment(&mut self, amount: i128) -> Result<i128, Error> {
        if self.is_settled() {
            return Err(Error::LoanSettled);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let applied = amount.min(self.outstanding);
        let repaid_amount = self
            .repaid_amount
            .checked_add(applied)
            .ok_or(Error::Overflow)?;

        self.outstanding -= applied;
        self.repaid_amount = repaid_amount;
        if self.is_settled() {
            self.status = LoanStatus::Repaid;
        } else if self.status == LoanStatus::Active {
            self.status = LoanStatus::PartiallyRepaid;
        }
        Ok(applied)
    }

    /// Extend the due date from `now` and step the rate down toward the floor.
    pub fn apply_refinance(&mut self, now: u64) -> Result<(), Error> {
        if self.is_settled() {
            return Err(Error::LoanSettled);
        }
        let eligible = meets_refinance_threshold(self.repaid_amount, self.principal)
            .ok_or(Error::Overflow)?;
        if !eligible {
            return Err(Error::RefinanceNotEligible);
        }

        self.due_date = now.checked_add(LOAN_TERM).ok_or(Error::Overflow)?;
        self.interest_rate = next_interest_rate(self.interest_rate);
        self.refinance_count = self.refinance_count.saturating_add(1);
        self.status = LoanStatus::Refinanced;
        Ok(())
    }
}

// ============================================
// LEDGER OPERATIONS
// ============================================

pub struct LoanLedger;

impl LoanLedger {
    /// Borrow against an owned property fraction
    ///
    /// KYC is not consulted on this path; the oracle score is.
    ///
    /// # Errors
    /// - `ContractPaused`: Contract is paused
    /// - `NoCollateral`: Borrower owns no fraction of the property
    /// - `InvalidAmount`: Amount <= 0
    /// - `OracleNotConfigured`: No credit oracle link
    /// - `NotCreditworthy`: Oracle score below threshold
    /// - `ExceedsCollateralValue`: amount > value × fraction / 100
    /// - `InsufficientLiquidity`: Contract cannot fund the principal
    pub fn request_credit_with_real_estate(
        env: &Env,
        borrower: &Address,
        property_id: u32,
        amount: i128,
    ) -> Result<u64, Error> {
        Access::check_not_paused(env)?;
        let _guard = ReentrancyGuard::acquire(env)?;

        borrower.require_auth();

        let fraction = Fractions::fraction_of(env, property_id, borrower);
        if fraction == 0 {
            return Err(Error::NoCollateral);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if !CreditOracle::is_creditworthy(env, borrower)? {
            return Err(Error::NotCreditworthy);
        }

        // Valuation read fresh at decision time
        let value = Fractions::property_value(env, property_id)?;
        let max_credit = calculate_max_credit(value, fraction).ok_or(Error::Overflow)?;
        if amount > max_credit {
            return Err(Error::ExceedsCollateralValue);
        }

        Self::issue(env, borrower, amount, Some(property_id))
    }

    /// Borrow without collateral; requires KYC only.
    ///
    /// # Errors
    /// - `ContractPaused`: Contract is paused
    /// - `InvalidAmount`: Amount <= 0
    /// - `NotVerified`: Borrower has no KYC attestation
    /// - `InsufficientLiquidity`: Contract cannot fund the principal
    pub fn request_unsecured_credit(
        env: &Env,
        borrower: &Address,
        amount: i128,
    ) -> Result<u64, Error> {
        Access::check_not_paused(env)?;
        let _guard = ReentrancyGuard::acquire(env)?;

        borrower.require_auth();

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }
        if !Storage::is_kyc_verified(env, borrower) {
            return Err(Error::NotVerified);
        }

        Self::issue(env, borrower, amount, None)
    }

    /// Repay part of a loan. Any authorized payer may repay.
    ///
    /// Only the applied amount (capped at the outstanding balance) is pulled
    /// from the payer.
    ///
    /// # Errors
    /// - `ContractPaused`: Contract is paused
    /// - `UnknownLoan`: No loan with this id
    /// - `LoanSettled`: Outstanding already zero
    /// - `InvalidAmount`: Amount <= 0
    /// - `InsufficientPayment`: Payer holds less than the applied amount
    pub fn partial_repay_loan(
        env: &Env,
        payer: &Address,
        loan_id: u64,
        amount: i128,
    ) -> Result<i128, Error> {
        Access::check_not_paused(env)?;
        let _guard = ReentrancyGuard::acquire(env)?;

        payer.require_auth();

        let mut loan = Storage::get_loan(env, loan_id)?;
        let applied = loan.apply_repayment(amount)?;

        let payment = token::Client::new(env, &Storage::get_payment_token(env)?);
        if payment.balance(payer) < applied {
            return Err(Error::InsufficientPayment);
        }

        Storage::set_loan(env, &loan);

        env.events().publish(
            (Symbol::new(env, "loan_repayment"), loan_id),
            LoanRepaymentEvent {
                loan_id,
                payer: payer.clone(),
                applied,
                outstanding: loan.outstanding,
            },
        );

        // Value transfer last
        payment.transfer(payer, &env.current_contract_address(), &applied);

        Ok(applied)
    }

    /// Renegotiate terms once 75% of the principal is repaid (borrower only).
    ///
    /// # Errors
    /// - `ContractPaused`: Contract is paused
    /// - `UnknownLoan`: No loan with this id
    /// - `LoanSettled`: Loan fully repaid
    /// - `RefinanceNotEligible`: repaid < 75% of principal
    pub fn refinance_loan(env: &Env, loan_id: u64) -> Result<(), Error> {
        Access::check_not_paused(env)?;

        let mut loan = Storage::get_loan(env, loan_id)?;
        loan.borrower.require_auth();

        let previous_rate = loan.interest_rate;
        loan.apply_refinance(env.ledger().timestamp())?;
        log!(env, "refinanced", loan_id, previous_rate, loan.interest_rate);

        Storage::set_loan(env, &loan);

        env.events().publish(
            (Symbol::new(env, "loan_refinanced"), loan_id),
            LoanRefinancedEvent {
                loan_id,
                interest_rate: loan.interest_rate,
                due_date: loan.due_date,
                refinance_count: loan.refinance_count,
            },
        );

        Ok(())
    }

    pub fn loan(env: &Env, loan_id: u64) -> Result<Loan, Error> {
        Storage::get_loan(env, loan_id)
    }

    pub fn loan_count(env: &Env) -> u64 {
        Storage::get_loan_counter(env)
    }

    fn issue(
        env: &Env,
        borrower: &Address,
        principal: i128,
        collateral_property_id: Option<u32>,
    ) -> Result<u64, Error> {
        let loan_id = Storage::get_loan_counter(env);
        let next_id = loan_id.checked_add(1).ok_or(Error::Overflow)?;

        let payment = token::Client::new(env, &Storage::get_payment_token(env)?);
        if payment.balance(&env.current_contract_address()) < principal {
            return Err(Error::InsufficientLiquidity);
        }

        let loan = Loan::open(
            loan_id,
            borrower.clone(),
            principal,
            collateral_property_id,
            env.ledger().timestamp(),
        )?;

        Storage::set_loan(env, &loan);
        Storage::set_loan_counter(env, next_id);

        env.events().publish(
            (Symbol::new(env, "loan_issued"), loan_id),
            LoanIssuedEvent {
                loan_id,
                borrower: borrower.clone(),
                principal,
                interest_rate: loan.interest_rate,
                due_date: loan.due_date,
                collateral_property_id,
            },
        );

        // Principal paid out of the contract's payment-token holdings
        payment.transfer(&env.current_contract_address(), borrower, &principal);

        Ok(loan_id)
    }
}
