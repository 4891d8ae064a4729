use soroban_sdk::{contracttype, Address};

// Constants
pub const SCALE: i128 = 1_000_000_000_000_000_000; // 18 decimals
pub const TOKEN_DECIMALS: u32 = 18;

pub const MAX_FRACTION: u32 = 100;
pub const PERCENT: i128 = 100;

/// Interest rates are whole percentages.
pub const INITIAL_INTEREST_RATE: u32 = 10;
pub const REFINANCE_RATE_STEP: u32 = 2;
pub const MIN_INTEREST_RATE: u32 = 2;

pub const LOAN_TERM: u64 = 30 * 24 * 60 * 60; // 30 days
pub const REFINANCE_THRESHOLD_PCT: i128 = 75;

/// Distribution wallets supplied at deployment, in deployment order.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Wallets {
    pub presale: Address,
    pub liquidity: Address,
    pub team: Address,
    pub marketing: Address,
    pub reserve: Address,
}

/// Presale parameters. Amounts are 18-decimal fixed point, window bounds are
/// seconds since epoch.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PresaleConfig {
    pub soft_cap: i128,
    pub hard_cap: i128,
    /// Price of one whole token in payment units
    pub unit_price: i128,
    pub window_start: u64,
    pub window_end: u64,
    pub min_purchase: i128,
    pub max_purchase: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreditOracleLink {
    pub oracle: Address,
    /// Minimum score (inclusive) considered creditworthy
    pub threshold: u32,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LoanStatus {
    /// Issued, nothing repaid yet
    Active = 0,
    /// Some principal repaid, balance still outstanding
    PartiallyRepaid = 1,
    /// Terms renegotiated at least once, still outstanding
    Refinanced = 2,
    /// Outstanding balance reached zero (terminal)
    Repaid = 3,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Loan {
    pub id: u64,
    pub borrower: Address,
    pub principal: i128,
    pub outstanding: i128,
    /// Whole percent
    pub interest_rate: u32,
    pub due_date: u64,
    pub repaid_amount: i128,
    /// Property pledged on the collateral path, `None` for unsecured loans
    pub collateral_property_id: Option<u32>,
    pub status: LoanStatus,
    pub refinance_count: u32,
    pub created_at: u64,
}
