use soroban_sdk::{token, Address, Env};

use crate::config::ConfigManager;
use crate::errors::Error;
use crate::reentrancy_guard::ReentrancyGuard;

/// Token custody helpers.
///
/// All value movement between participants and the contract goes through
/// these functions: `lock_funds` escrows a stake into custody, `release_funds`
/// pays out of custody. Both hold the reentrancy lock for the transfer.
pub struct TokenUtils;

impl TokenUtils {
    /// Client for the configured staking token.
    pub fn get_token_client(env: &Env) -> Result<token::Client, Error> {
        let config = ConfigManager::get_config(env)?;
        Ok(token::Client::new(env, &config.token))
    }

    /// Tokens currently held by the contract (stakes in escrow plus treasury).
    pub fn contract_balance(env: &Env) -> Result<i128, Error> {
        Ok(Self::get_token_client(env)?.balance(&env.current_contract_address()))
    }

    /// Move `amount` from `user` into contract custody.
    ///
    /// Fails with `InsufficientBalance` before attempting the transfer when
    /// the user's spendable balance is too small.
    pub fn lock_funds(env: &Env, user: &Address, amount: i128) -> Result<(), Error> {
        let client = Self::get_token_client(env)?;
        if client.balance(user) < amount {
            return Err(Error::InsufficientBalance);
        }

        ReentrancyGuard::before_external_call(env)?;
        client.transfer(user, &env.current_contract_address(), &amount);
        ReentrancyGuard::after_external_call(env);
        Ok(())
    }

    /// Move `amount` out of contract custody to `to`.
    pub fn release_funds(env: &Env, to: &Address, amount: i128) -> Result<(), Error> {
        if amount == 0 {
            return Ok(());
        }
        let client = Self::get_token_client(env)?;

        ReentrancyGuard::before_external_call(env)?;
        client.transfer(&env.current_contract_address(), to, &amount);
        ReentrancyGuard::after_external_call(env);
        Ok(())
    }
}
