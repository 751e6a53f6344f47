//! Authorization gate and owner governance.
//!
//! `AccessControl` is the stateless policy consulted inline by every
//! privileged entrypoint: one owner (fixed at initialization) and one oracle
//! (replaceable by the owner). `GovernanceManager` holds the owner-gated
//! setters and the treasury withdrawal.

use soroban_sdk::{log, symbol_short, Address, Env};

use crate::config::{ConfigManager, ConfigValidator};
use crate::errors::Error;
use crate::events::EventEmitter;
use crate::storage::TreasuryStorage;
use crate::types::ProtocolConfig;
use crate::utils::TokenUtils;

// ===== ACCESS CONTROL =====

/// Owner-only and oracle-only checks.
pub struct AccessControl;

impl AccessControl {
    /// Require `caller` to have signed and to be the protocol owner.
    pub fn require_owner(env: &Env, caller: &Address) -> Result<ProtocolConfig, Error> {
        caller.require_auth();
        let config = ConfigManager::get_config(env)?;
        if *caller != config.owner {
            log!(env, "rejected non-owner caller", caller.clone());
            return Err(Error::Unauthorized);
        }
        Ok(config)
    }

    /// Require `caller` to have signed and to be the current oracle.
    pub fn require_oracle(env: &Env, caller: &Address) -> Result<ProtocolConfig, Error> {
        caller.require_auth();
        let config = ConfigManager::get_config(env)?;
        if *caller != config.oracle {
            log!(env, "rejected non-oracle caller", caller.clone());
            return Err(Error::Unauthorized);
        }
        Ok(config)
    }
}

// ===== GOVERNANCE =====

/// Owner-gated parameter updates and fee withdrawal.
pub struct GovernanceManager;

impl GovernanceManager {
    /// Store the initial configuration. Allowed once.
    pub fn initialize(env: &Env, config: ProtocolConfig) -> Result<(), Error> {
        if ConfigManager::is_initialized(env) {
            return Err(Error::AlreadyInitialized);
        }
        config.owner.require_auth();
        ConfigValidator::validate_config(&config)?;

        ConfigManager::store_config(env, &config);
        EventEmitter::emit_contract_initialized(env, &config);
        Ok(())
    }

    pub fn set_oracle(env: &Env, owner: &Address, oracle: Address) -> Result<(), Error> {
        let mut config = AccessControl::require_owner(env, owner)?;
        config.oracle = oracle;
        ConfigManager::store_config(env, &config);
        EventEmitter::emit_config_updated(env, owner, symbol_short!("oracle"), &config);
        Ok(())
    }

    pub fn set_minimum_stake(env: &Env, owner: &Address, minimum_stake: i128) -> Result<(), Error> {
        let mut config = AccessControl::require_owner(env, owner)?;
        ConfigValidator::validate_minimum_stake(minimum_stake)?;
        config.minimum_stake = minimum_stake;
        ConfigManager::store_config(env, &config);
        EventEmitter::emit_config_updated(env, owner, symbol_short!("min_stake"), &config);
        Ok(())
    }

    pub fn set_fee_percentage(env: &Env, owner: &Address, fee_percentage: u32) -> Result<(), Error> {
        let mut config = AccessControl::require_owner(env, owner)?;
        ConfigValidator::validate_fee_percentage(fee_percentage)?;
        config.fee_percentage = fee_percentage;
        ConfigManager::store_config(env, &config);
        EventEmitter::emit_config_updated(env, owner, symbol_short!("fee_pct"), &config);
        Ok(())
    }

    /// Withdraw `amount` of accumulated fees to `to`.
    ///
    /// Only the treasury accumulator can be withdrawn; escrowed stakes are
    /// never reachable from here. Returns the remaining treasury balance.
    pub fn withdraw_fees(env: &Env, owner: &Address, to: &Address, amount: i128) -> Result<i128, Error> {
        AccessControl::require_owner(env, owner)?;
        if amount <= 0 {
            return Err(Error::InvalidParameter);
        }

        let remaining = TreasuryStorage::debit(env, amount)?;
        TokenUtils::release_funds(env, to, amount)?;

        EventEmitter::emit_fees_withdrawn(env, owner, to, amount, remaining);
        Ok(remaining)
    }
}
