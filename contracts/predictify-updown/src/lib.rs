#![no_std]

#[cfg(test)]
extern crate std;

pub mod admin;
pub mod config;
pub mod errors;
pub mod events;
pub mod markets;
pub mod reentrancy_guard;
pub mod settlement;
pub mod storage;
pub mod types;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod event_tests;

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

pub use crate::errors::Error;
use crate::admin::GovernanceManager;
use crate::config::ConfigManager;
use crate::markets::{MarketManager, MarketStateLogic};
use crate::settlement::SettlementEngine;
use crate::storage::{MarketStorage, PositionStorage, StorageTtl, TreasuryStorage};
use crate::types::{Market, MarketState, PayoutBreakdown, Position, ProtocolConfig, Side};
use crate::utils::TokenUtils;

/// Predictify up/down settlement contract.
///
/// Participants stake a SEP-41 token on whether a tracked value will be
/// higher (`Side::Up`) or not (`Side::Down`) at the end of a ledger window
/// than at market open. The configured oracle reports the final value once;
/// winners split the whole pool pro rata to their stake, net of the protocol
/// fee, and each winning position can be claimed exactly once.
///
/// # Roles
///
/// - **owner**: fixed at `initialize`; creates markets and governs parameters
/// - **oracle**: resolves markets; replaceable by the owner
/// - **participants**: anyone holding the staking token
#[contract]
pub struct PredictifyUpDown;

#[contractimpl]
impl PredictifyUpDown {
    // ===== INITIALIZATION & GOVERNANCE =====

    /// Configure the contract. Callable once, signed by `owner`.
    pub fn initialize(
        env: Env,
        owner: Address,
        oracle: Address,
        token: Address,
        minimum_stake: i128,
        fee_percentage: u32,
    ) -> Result<(), Error> {
        StorageTtl::extend_instance(&env);
        GovernanceManager::initialize(
            &env,
            ProtocolConfig {
                owner,
                oracle,
                token,
                minimum_stake,
                fee_percentage,
            },
        )
    }

    pub fn set_oracle(env: Env, owner: Address, oracle: Address) -> Result<(), Error> {
        StorageTtl::extend_instance(&env);
        GovernanceManager::set_oracle(&env, &owner, oracle)
    }

    pub fn set_minimum_stake(env: Env, owner: Address, minimum_stake: i128) -> Result<(), Error> {
        StorageTtl::extend_instance(&env);
        GovernanceManager::set_minimum_stake(&env, &owner, minimum_stake)
    }

    pub fn set_fee_percentage(env: Env, owner: Address, fee_percentage: u32) -> Result<(), Error> {
        StorageTtl::extend_instance(&env);
        GovernanceManager::set_fee_percentage(&env, &owner, fee_percentage)
    }

    /// Send `amount` of accumulated fees to `to`; returns the remaining treasury.
    pub fn withdraw_fees(env: Env, owner: Address, to: Address, amount: i128) -> Result<i128, Error> {
        StorageTtl::extend_instance(&env);
        GovernanceManager::withdraw_fees(&env, &owner, &to, amount)
    }

    // ===== MARKET LIFECYCLE =====

    /// Create a market over the ledger window `[start_block, end_block)`.
    /// Owner only. Returns the new market id.
    pub fn create_market(
        env: Env,
        caller: Address,
        start_price: i128,
        start_block: u32,
        end_block: u32,
    ) -> Result<u64, Error> {
        StorageTtl::extend_instance(&env);
        MarketManager::create_market(&env, &caller, start_price, start_block, end_block)
    }

    /// Escrow `stake` on `side` while the market's window is open.
    pub fn make_prediction(
        env: Env,
        user: Address,
        market_id: u64,
        side: Side,
        stake: i128,
    ) -> Result<bool, Error> {
        StorageTtl::extend_instance(&env);
        MarketManager::make_prediction(&env, &user, market_id, side, stake)?;
        Ok(true)
    }

    /// Report the final value. Oracle only, once, at or after `end_block`.
    pub fn resolve_market(
        env: Env,
        caller: Address,
        market_id: u64,
        end_price: i128,
    ) -> Result<Side, Error> {
        StorageTtl::extend_instance(&env);
        MarketManager::resolve_market(&env, &caller, market_id, end_price)
    }

    /// Pay out a winning position; returns the net amount transferred.
    pub fn claim_winnings(env: Env, user: Address, market_id: u64) -> Result<i128, Error> {
        StorageTtl::extend_instance(&env);
        SettlementEngine::claim_winnings(&env, &user, market_id)
    }

    // ===== QUERIES =====

    pub fn get_market(env: Env, market_id: u64) -> Result<Market, Error> {
        MarketStorage::get_market(&env, market_id)
    }

    pub fn get_user_prediction(env: Env, market_id: u64, user: Address) -> Result<Position, Error> {
        MarketStorage::get_market(&env, market_id)?;
        PositionStorage::get_position(&env, market_id, &user).ok_or(Error::NotFound)
    }

    pub fn get_market_participants(env: Env, market_id: u64) -> Result<Vec<Address>, Error> {
        MarketStorage::get_market(&env, market_id)?;
        Ok(PositionStorage::get_participants(&env, market_id))
    }

    pub fn get_market_state(env: Env, market_id: u64) -> Result<MarketState, Error> {
        MarketStateLogic::get_market_state(&env, market_id)
    }

    pub fn get_market_count(env: Env) -> u64 {
        MarketStorage::market_count(&env)
    }

    pub fn preview_payout(env: Env, market_id: u64, user: Address) -> Result<PayoutBreakdown, Error> {
        SettlementEngine::preview_payout(&env, &user, market_id)
    }

    /// Tokens held in custody: escrowed stakes, unclaimed winnings, dust and fees.
    pub fn get_contract_balance(env: Env) -> Result<i128, Error> {
        TokenUtils::contract_balance(&env)
    }

    pub fn get_treasury_balance(env: Env) -> i128 {
        TreasuryStorage::get_balance(&env)
    }

    pub fn get_config(env: Env) -> Result<ProtocolConfig, Error> {
        ConfigManager::get_config(&env)
    }
}
