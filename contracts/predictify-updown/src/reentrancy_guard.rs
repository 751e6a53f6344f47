use soroban_sdk::Env;

use crate::errors::Error;
use crate::types::DataKey;

/// Global cross-function reentrancy guard.
///
/// Held around every outbound token transfer (stake escrow, payout, fee
/// withdrawal). The lock is a single boolean in instance storage; a failed
/// invocation is rolled back by the host, so the flag never stays set.
pub struct ReentrancyGuard;

impl ReentrancyGuard {
    /// Returns true if the reentrancy lock is currently active.
    pub fn is_locked(env: &Env) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::ReentrancyLock)
            .unwrap_or(false)
    }

    /// Checks current reentrancy state. Returns an error if locked.
    pub fn check_reentrancy_state(env: &Env) -> Result<(), Error> {
        if Self::is_locked(env) {
            return Err(Error::ReentrancyGuardActive);
        }
        Ok(())
    }

    /// Sets the lock before making an external call.
    pub fn before_external_call(env: &Env) -> Result<(), Error> {
        Self::check_reentrancy_state(env)?;
        env.storage()
            .instance()
            .set(&DataKey::ReentrancyLock, &true);
        Ok(())
    }

    /// Clears the lock after the external call completes.
    pub fn after_external_call(env: &Env) {
        env.storage()
            .instance()
            .set(&DataKey::ReentrancyLock, &false);
    }
}
