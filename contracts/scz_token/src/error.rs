use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // ============================================
    // LIFECYCLE ERRORS (1-9)
    // ============================================
    /// Contract already initialized
    AlreadyInitialized = 1,
    /// Contract not initialized
    NotInitialized = 2,
    /// Presale parameters are inconsistent (window, caps or purchase bounds)
    InvalidConfig = 3,

    // ============================================
    // AUTHORIZATION ERRORS (10-19)
    // ============================================
    /// Account has not been KYC verified by the admin
    NotVerified = 10,
    /// Account owns no fraction of the pledged property
    NoCollateral = 11,

    // ============================================
    // VALIDATION ERRORS (20-39)
    // ============================================
    /// Amount must be positive
    InvalidAmount = 20,
    /// Presale purchase outside [window_start, window_end]
    OutOfWindow = 21,
    /// Presale purchase below min_purchase
    BelowMinimum = 22,
    /// Presale purchase above max_purchase
    AboveMaximum = 23,
    /// Presale purchase would push raised funds past hard_cap
    CapExceeded = 24,
    /// Fraction must be within [1, 100]
    InvalidFraction = 25,
    /// Fractions sold for the property would exceed 100%
    FractionCapExceeded = 26,
    /// Payment below the amount owed (fraction price or loan repayment)
    InsufficientPayment = 27,
    /// Property has no recorded valuation
    PropertyNotValued = 28,
    /// Requested credit above the value of the owned fraction
    ExceedsCollateralValue = 29,
    /// Checked arithmetic overflowed
    Overflow = 30,

    // ============================================
    // ELIGIBILITY ERRORS (40-49)
    // ============================================
    /// Oracle score below the configured threshold
    NotCreditworthy = 40,
    /// Less than 75% of the principal has been repaid
    RefinanceNotEligible = 41,
    /// No credit oracle has been configured
    OracleNotConfigured = 42,

    // ============================================
    // LOAN STATE ERRORS (50-59)
    // ============================================
    /// Loan id was never issued
    UnknownLoan = 50,
    /// Loan outstanding balance is already zero
    LoanSettled = 51,

    // ============================================
    // OPERATIONAL ERRORS (60-69)
    // ============================================
    /// Contract is paused
    ContractPaused = 60,
    /// Value-transferring operation re-entered
    Reentrancy = 61,
    /// Contract holds too little of the payment token to fund the loan
    InsufficientLiquidity = 62,
}
