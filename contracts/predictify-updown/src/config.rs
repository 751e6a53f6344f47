//! Configuration for the Predictify up/down contract.
//!
//! Holds the protocol constants and the instance-storage accessors for the
//! mutable economic parameters (`ProtocolConfig`). The lifecycle and
//! settlement code read the configuration through `ConfigManager` on every
//! call instead of keeping ambient globals.

use soroban_sdk::Env;

use crate::errors::Error;
use crate::types::{DataKey, ProtocolConfig};

// ===== FEE CONSTANTS =====

/// Percentage denominator for fee calculations (100%)
pub const PERCENTAGE_DENOMINATOR: i128 = 100;

/// Default platform fee percentage (2%)
pub const DEFAULT_FEE_PERCENTAGE: u32 = 2;

/// Maximum platform fee percentage
pub const MAX_FEE_PERCENTAGE: u32 = 10;

// ===== STAKE CONSTANTS =====

/// Default minimum stake (0.1 XLM = 1,000,000 stroops)
pub const DEFAULT_MINIMUM_STAKE: i128 = 1_000_000;

// ===== STORAGE TTL CONSTANTS =====

/// Ledgers per day at ~5s close time
pub const DAY_IN_LEDGERS: u32 = 17_280;

/// Remaining TTL below which entries are bumped
pub const BUMP_THRESHOLD: u32 = 14 * DAY_IN_LEDGERS;

/// TTL applied when an entry is bumped
pub const BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;

/// Instance-storage access for the protocol configuration.
pub struct ConfigManager;

impl ConfigManager {
    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().has(&DataKey::Config)
    }

    /// Load the configuration, failing with `NotInitialized` before `initialize`.
    pub fn get_config(env: &Env) -> Result<ProtocolConfig, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)
    }

    pub fn store_config(env: &Env, config: &ProtocolConfig) {
        env.storage().instance().set(&DataKey::Config, config);
    }
}

/// Validation of the mutable economic parameters.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate_minimum_stake(minimum_stake: i128) -> Result<(), Error> {
        if minimum_stake <= 0 {
            return Err(Error::InvalidParameter);
        }
        Ok(())
    }

    pub fn validate_fee_percentage(fee_percentage: u32) -> Result<(), Error> {
        if fee_percentage > MAX_FEE_PERCENTAGE {
            return Err(Error::InvalidParameter);
        }
        Ok(())
    }

    pub fn validate_config(config: &ProtocolConfig) -> Result<(), Error> {
        Self::validate_minimum_stake(config.minimum_stake)?;
        Self::validate_fee_percentage(config.fee_percentage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_percentage_bounds() {
        assert!(ConfigValidator::validate_fee_percentage(0).is_ok());
        assert!(ConfigValidator::validate_fee_percentage(DEFAULT_FEE_PERCENTAGE).is_ok());
        assert!(ConfigValidator::validate_fee_percentage(MAX_FEE_PERCENTAGE).is_ok());
        assert_eq!(
            ConfigValidator::validate_fee_percentage(MAX_FEE_PERCENTAGE + 1),
            Err(Error::InvalidParameter)
        );
    }

    #[test]
    fn minimum_stake_must_be_positive() {
        assert!(ConfigValidator::validate_minimum_stake(DEFAULT_MINIMUM_STAKE).is_ok());
        assert_eq!(
            ConfigValidator::validate_minimum_stake(0),
            Err(Error::InvalidParameter)
        );
        assert_eq!(
            ConfigValidator::validate_minimum_stake(-5),
            Err(Error::InvalidParameter)
        );
    }
}
