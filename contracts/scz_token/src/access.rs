use crate::error::Error;
use crate::events::{AdminTransferredEvent, KycVerifiedEvent, PausedEvent};
use crate::storage::Storage;
use soroban_sdk::{Address, Env, Symbol};

/// Owner-gated administration, KYC attestations and the pause switch.
pub struct Access;

impl Access {
    /// Load the admin and require its signature.
    pub fn require_admin(env: &Env) -> Result<Address, Error> {
        let admin = Storage::get_admin(env)?;
        admin.require_auth();
        Ok(admin)
    }

    pub fn check_not_paused(env: &Env) -> Result<(), Error> {
        if Storage::is_paused(env) {
            return Err(Error::ContractPaused);
        }
        Ok(())
    }

    pub fn transfer_admin(env: &Env, new_admin: &Address) -> Result<(), Error> {
        let previous = Self::require_admin(env)?;
        new_admin.require_auth();

        Storage::set_admin(env, new_admin);

        env.events().publish(
            (Symbol::new(env, "admin_transferred"),),
            AdminTransferredEvent {
                previous,
                new_admin: new_admin.clone(),
            },
        );
        Ok(())
    }

    /// KYC is monotonic: there is no revoke.
    pub fn verify_kyc(env: &Env, account: &Address) -> Result<(), Error> {
        Self::require_admin(env)?;

        Storage::set_kyc_verified(env, account);

        env.events().publish(
            (Symbol::new(env, "kyc_verified"), account.clone()),
            KycVerifiedEvent {
                account: account.clone(),
            },
        );
        Ok(())
    }

    pub fn set_paused(env: &Env, paused: bool) -> Result<(), Error> {
        Self::require_admin(env)?;

        Storage::set_paused(env, paused);

        env.events()
            .publish((Symbol::new(env, "paused"),), PausedEvent { paused });
        Ok(())
    }
}

/// Scoped reentrancy lock. Held for the lifetime of the value and released
/// on drop, including early `?` returns.
pub struct ReentrancyGuard<'a> {
    env: &'a Env,
}

impl<'a> ReentrancyGuard<'a> {
    pub fn acquire(env: &'a Env) -> Result<Self, Error> {
        if Storage::is_locked(env) {
            return Err(Error::Reentrancy);
        }
        Storage::set_locked(env, true);
        Ok(Self { env })
    }
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        Storage::set_locked(self.env, false);
    }
}
