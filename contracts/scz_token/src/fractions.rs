use crate::access::{Access, ReentrancyGuard};
use crate::error::Error;
use crate::events::{FractionBoughtEvent, FundsWithdrawnEvent, PropertyValuedEvent};
use crate::storage::Storage;
use crate::types::MAX_FRACTION;
use crate::validation::{calculate_required_payment, is_valid_fraction};
use soroban_sdk::{token, Address, Env, Symbol};

/// Property valuations and percentage ownership per account.
pub struct Fractions;

impl Fractions {
    pub fn set_property_value(env: &Env, property_id: u32, value: i128) -> Result<(), Error> {
        Access::require_admin(env)?;

        if value <= 0 {
            return Err(Error::InvalidAmount);
        }

        Storage::set_property_value(env, property_id, value);

        env.events().publish(
            (Symbol::new(env, "property_valued"), property_id),
            PropertyValuedEvent { property_id, value },
        );
        Ok(())
    }

    /// Buy `fraction` percent of a property
    ///
    /// Over-payment is accepted in full and not refunded.
    ///
    /// # Errors
    /// - `ContractPaused`: Contract is paused
    /// - `InvalidFraction`: Fraction outside [1, 100]
    /// - `PropertyNotValued`: No valuation recorded for the property
    /// - `FractionCapExceeded`: Sold fractions would exceed 100%
    /// - `InsufficientPayment`: payment < value × fraction / 100
    pub fn buy_fraction(
        env: &Env,
        buyer: &Address,
        property_id: u32,
        fraction: u32,
        payment: i128,
    ) -> Result<(), Error> {
        Access::check_not_paused(env)?;
        let _guard = ReentrancyGuard::acquire(env)?;

        buyer.require_auth();

        if !is_valid_fraction(fraction) {
            return Err(Error::InvalidFraction);
        }

        let value = Storage::get_property_value(env, property_id).ok_or(Error::PropertyNotValued)?;

        let sold = Storage::get_fractions_sold(env, property_id);
        let new_sold = sold.checked_add(fraction).ok_or(Error::Overflow)?;
        if new_sold > MAX_FRACTION {
            return Err(Error::FractionCapExceeded);
        }

        let required = calculate_required_payment(value, fraction).ok_or(Error::Overflow)?;
        if payment < required {
            return Err(Error::InsufficientPayment);
        }

        let owned = Storage::get_fraction(env, property_id, buyer);
        Storage::set_fraction(env, property_id, buyer, owned + fraction);
        Storage::set_fractions_sold(env, property_id, new_sold);

        env.events().publish(
            (Symbol::new(env, "fraction_bought"), property_id, buyer.clone()),
            FractionBoughtEvent {
                property_id,
                buyer: buyer.clone(),
                fraction,
                payment_accepted: payment,
            },
        );

        // Value transfer last
        if payment > 0 {
            let payment_token = Storage::get_payment_token(env)?;
            token::Client::new(env, &payment_token).transfer(
                buyer,
                &env.current_contract_address(),
                &payment,
            );
        }

        Ok(())
    }

    /// Release accepted payments held by the contract (admin only).
    pub fn withdraw_funds(env: &Env, to: &Address, amount: i128) -> Result<(), Error> {
        Access::require_admin(env)?;
        let _guard = ReentrancyGuard::acquire(env)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        env.events().publish(
            (Symbol::new(env, "funds_withdrawn"), to.clone()),
            FundsWithdrawnEvent {
                to: to.clone(),
                amount,
            },
        );

        let payment_token = Storage::get_payment_token(env)?;
        token::Client::new(env, &payment_token).transfer(
            &env.current_contract_address(),
            to,
            &amount,
        );
        Ok(())
    }

    pub fn property_value(env: &Env, property_id: u32) -> Result<i128, Error> {
        Storage::get_property_value(env, property_id).ok_or(Error::PropertyNotValued)
    }

    pub fn fraction_of(env: &Env, property_id: u32, account: &Address) -> u32 {
        Storage::get_fraction(env, property_id, account)
    }

    pub fn fractions_sold(env: &Env, property_id: u32) -> u32 {
        Storage::get_fractions_sold(env, property_id)
    }
}
