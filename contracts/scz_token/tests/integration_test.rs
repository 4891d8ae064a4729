#![cfg(test)]

use credit_oracle::{CreditOracle, CreditOracleClient as ScoreFeedClient};
use scz_token::{Error, LoanStatus, PresaleConfig, SczToken, SczTokenClient, Wallets, SCALE};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token, Address, Env,
};

const START: u64 = 1_741_132_800;
const END: u64 = 1_742_860_800;
const DAY: u64 = 24 * 60 * 60;
const LENDING_POOL: i128 = 20_000 * SCALE;

struct TestContext {
    env: Env,
    admin: Address,
    investor: Address,
    borrower: Address,
    wallets: Wallets,
    payment_token: Address,
    scz_id: Address,
    oracle_id: Address,
}

fn setup_test() -> TestContext {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(START);

    let admin = Address::generate(&env);
    let investor = Address::generate(&env);
    let borrower = Address::generate(&env);
    let wallets = Wallets {
        presale: Address::generate(&env),
        liquidity: Address::generate(&env),
        team: Address::generate(&env),
        marketing: Address::generate(&env),
        reserve: Address::generate(&env),
    };

    // Deploy payment token (use Stellar Asset Contract)
    let asset = env.register_stellar_asset_contract_v2(Address::generate(&env));
    let payment_token = asset.address();
    let asset_client = token::StellarAssetClient::new(&env, &payment_token);
    asset_client.mint(&investor, &(100_000 * SCALE));
    asset_client.mint(&borrower, &(100_000 * SCALE));

    // Deploy score oracle, default score below any sensible threshold
    let oracle_id = env.register(CreditOracle, ());
    ScoreFeedClient::new(&env, &oracle_id).initialize(&admin, &300);

    // Deploy SCZ
    let scz_id = env.register(SczToken, ());
    let scz = SczTokenClient::new(&env, &scz_id);
    scz.initialize(
        &admin,
        &payment_token,
        &wallets,
        &PresaleConfig {
            soft_cap: 50_000 * SCALE,
            hard_cap: 100_000 * SCALE,
            unit_price: 3 * SCALE / 100,
            window_start: START,
            window_end: END,
            min_purchase: 10 * SCALE,
            max_purchase: 5_000 * SCALE,
        },
    );
    scz.configure_credit_oracle(&oracle_id, &700);
    asset_client.mint(&scz_id, &LENDING_POOL);

    TestContext {
        env,
        admin,
        investor,
        borrower,
        wallets,
        payment_token,
        scz_id,
        oracle_id,
    }
}

#[test]
fn test_collateralized_loan_lifecycle() {
    let ctx = setup_test();
    let scz = SczTokenClient::new(&ctx.env, &ctx.scz_id);
    let oracle = ScoreFeedClient::new(&ctx.env, &ctx.oracle_id);
    let payment = token::Client::new(&ctx.env, &ctx.payment_token);

    scz.set_property_value(&7, &(50_000 * SCALE));
    scz.buy_fraction(&ctx.borrower, &7, &10, &(5_000 * SCALE));
    assert_eq!(payment.balance(&ctx.scz_id), LENDING_POOL + 5_000 * SCALE);

    // Default score is not enough
    assert_eq!(
        scz.try_request_credit_with_real_estate(&ctx.borrower, &7, &(4_000 * SCALE)),
        Err(Ok(Error::NotCreditworthy))
    );

    oracle.set_score(&ctx.borrower, &720);
    let borrower_before = payment.balance(&ctx.borrower);
    let loan_id = scz.request_credit_with_real_estate(&ctx.borrower, &7, &(4_000 * SCALE));
    assert_eq!(payment.balance(&ctx.borrower), borrower_before + 4_000 * SCALE);

    ctx.env.ledger().set_timestamp(START + 5 * DAY);
    scz.partial_repay_loan(&ctx.borrower, &loan_id, &(1_000 * SCALE));
    assert_eq!(scz.loans(&loan_id).status, LoanStatus::PartiallyRepaid);
    scz.partial_repay_loan(&ctx.investor, &loan_id, &(2_000 * SCALE));
    assert_eq!(payment.balance(&ctx.investor), 98_000 * SCALE);
    scz.refinance_loan(&loan_id);

    let loan = scz.loans(&loan_id);
    assert_eq!(loan.status, LoanStatus::Refinanced);
    assert_eq!(loan.outstanding, 1_000 * SCALE);
    assert_eq!(loan.interest_rate, 8);
    assert_eq!(loan.due_date, START + 35 * DAY);

    // Settle and confirm the terminal state sticks
    scz.partial_repay_loan(&ctx.borrower, &loan_id, &(5_000 * SCALE));
    let loan = scz.loans(&loan_id);
    assert_eq!(loan.status, LoanStatus::Repaid);
    assert_eq!(loan.repaid_amount, 4_000 * SCALE);
    assert_eq!(payment.balance(&ctx.scz_id), LENDING_POOL + 5_000 * SCALE);
    assert_eq!(
        scz.try_refinance_loan(&loan_id),
        Err(Ok(Error::LoanSettled))
    );
}

#[test]
fn test_score_revocation_blocks_new_credit() {
    let ctx = setup_test();
    let scz = SczTokenClient::new(&ctx.env, &ctx.scz_id);
    let oracle = ScoreFeedClient::new(&ctx.env, &ctx.oracle_id);

    scz.set_property_value(&1, &(1_000 * SCALE));
    scz.buy_fraction(&ctx.borrower, &1, &50, &(500 * SCALE));

    oracle.set_score(&ctx.borrower, &700);
    assert!(scz.is_creditworthy(&ctx.borrower));
    scz.request_credit_with_real_estate(&ctx.borrower, &1, &(100 * SCALE));

    // Oracle is queried on every request, never cached
    oracle.clear_score(&ctx.borrower);
    assert!(!scz.is_creditworthy(&ctx.borrower));
    assert_eq!(
        scz.try_request_credit_with_real_estate(&ctx.borrower, &1, &(100 * SCALE)),
        Err(Ok(Error::NotCreditworthy))
    );

    // Unscored accounts fall back to the default score
    oracle.set_default_score(&700);
    scz.request_credit_with_real_estate(&ctx.borrower, &1, &(100 * SCALE));
    assert_eq!(scz.loan_count(), 2);
}

#[test]
fn test_presale_then_unsecured_credit() {
    let ctx = setup_test();
    let scz = SczTokenClient::new(&ctx.env, &ctx.scz_id);
    let payment = token::Client::new(&ctx.env, &ctx.payment_token);

    ctx.env.ledger().set_timestamp(START + DAY);
    let tokens = scz.purchase(&ctx.investor, &(3_000 * SCALE));
    assert_eq!(tokens, 100_000 * SCALE);
    assert_eq!(payment.balance(&ctx.wallets.presale), 3_000 * SCALE);

    scz.mint(&ctx.wallets.team, &(10_000 * SCALE));
    assert_eq!(scz.total_supply(), 110_000 * SCALE);
    assert_eq!(scz.admin(), ctx.admin);

    // Unsecured credit skips the oracle and collateral, but needs KYC
    assert_eq!(
        scz.try_request_unsecured_credit(&ctx.investor, &(500 * SCALE)),
        Err(Ok(Error::NotVerified))
    );
    scz.verify_kyc(&ctx.investor);
    let loan_id = scz.request_unsecured_credit(&ctx.investor, &(500 * SCALE));
    assert_eq!(scz.loans(&loan_id).collateral_property_id, None);
}
