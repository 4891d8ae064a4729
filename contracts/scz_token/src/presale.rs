use crate::access::{Access, ReentrancyGuard};
use crate::error::Error;
use crate::events::TokensPurchasedEvent;
use crate::storage::Storage;
use crate::supply::Supply;
use crate::types::PresaleConfig;
use crate::validation::calculate_tokens_for_payment;
use soroban_sdk::{token, Address, Env, Symbol};

pub struct Presale;

impl Presale {
    /// Check a purchase against window, bounds and hard cap.
    ///
    /// Returns the new cumulative raised amount.
    pub fn check_purchase(
        config: &PresaleConfig,
        raised: i128,
        amount: i128,
        now: u64,
    ) -> Result<i128, Error> {
        if now < config.window_start || now > config.window_end {
            return Err(Error::OutOfWindow);
        }
        if amount < config.min_purchase {
            return Err(Error::BelowMinimum);
        }
        if amount > config.max_purchase {
            return Err(Error::AboveMaximum);
        }

        let new_raised = raised.checked_add(amount).ok_or(Error::Overflow)?;
        if new_raised > config.hard_cap {
            return Err(Error::CapExceeded);
        }
        Ok(new_raised)
    }

    /// Buy SCZ with the payment token during the sale window
    ///
    /// The soft cap is informational only; nothing is refunded below it.
    ///
    /// # Errors
    /// - `ContractPaused`: Contract is paused
    /// - `OutOfWindow`: Ledger time outside [window_start, window_end]
    /// - `BelowMinimum` / `AboveMaximum`: Amount outside purchase bounds
    /// - `CapExceeded`: Would raise more than hard_cap
    pub fn purchase(env: &Env, buyer: &Address, amount: i128) -> Result<i128, Error> {
        Access::check_not_paused(env)?;
        let _guard = ReentrancyGuard::acquire(env)?;

        buyer.require_auth();

        let config = Storage::get_presale_config(env)?;
        let raised = Storage::get_presale_raised(env);
        let now = env.ledger().timestamp();

        let new_raised = Self::check_purchase(&config, raised, amount, now)?;
        let tokens =
            calculate_tokens_for_payment(amount, config.unit_price).ok_or(Error::Overflow)?;

        Storage::set_presale_raised(env, new_raised);
        Supply::credit(env, buyer, tokens)?;

        env.events().publish(
            (Symbol::new(env, "tokens_purchased"), buyer.clone()),
            TokensPurchasedEvent {
                buyer: buyer.clone(),
                amount,
                tokens,
                total_raised: new_raised,
            },
        );

        // Value transfer last
        let wallets = Storage::get_wallets(env)?;
        let payment_token = Storage::get_payment_token(env)?;
        token::Client::new(env, &payment_token).transfer(buyer, &wallets.presale, &amount);

        Ok(tokens)
    }

    pub fn soft_cap_reached(env: &Env) -> Result<bool, Error> {
        let config = Storage::get_presale_config(env)?;
        Ok(Storage::get_presale_raised(env) >= config.soft_cap)
    }
}
