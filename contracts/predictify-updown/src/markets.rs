//! # Markets Module
//!
//! Lifecycle controller for up/down markets: creation by the owner, position
//! entry while the window is open, and one-time resolution by the oracle.
//!
//! ## Market lifecycle
//!
//! ```text
//! Pending ──> Open ──> AwaitingResolution ──> Resolved
//! ```
//!
//! Entries are accepted only while `Open`, resolution only from
//! `AwaitingResolution`, claims only once `Resolved`. There is no
//! cancellation transition; a market the oracle never resolves stays in
//! `AwaitingResolution`.

use soroban_sdk::{log, Address, Env};

use crate::admin::AccessControl;
use crate::config::ConfigManager;
use crate::errors::Error;
use crate::events::EventEmitter;
use crate::storage::{MarketStorage, PositionStorage};
use crate::types::{Market, MarketState, Position, Side};
use crate::utils::TokenUtils;
use crate::validation::InputValidator;

// ===== MARKET MANAGER =====

/// State-mutating market operations.
///
/// Each function validates every precondition before the first write or
/// transfer, so a rejected call leaves no trace.
pub struct MarketManager;

impl MarketManager {
    /// Create a market with window `[start_block, end_block)`.
    ///
    /// # Errors
    ///
    /// - `Error::Unauthorized` - caller is not the owner
    /// - `Error::InvalidParameter` - `start_price <= 0` or `end_block <= start_block`
    pub fn create_market(
        env: &Env,
        caller: &Address,
        start_price: i128,
        start_block: u32,
        end_block: u32,
    ) -> Result<u64, Error> {
        AccessControl::require_owner(env, caller)?;
        InputValidator::validate_market_params(start_price, start_block, end_block)?;

        let market_id = MarketStorage::next_market_id(env)?;
        let market = Market::new(market_id, start_price, start_block, end_block);
        MarketStorage::store_market(env, &market);

        EventEmitter::emit_market_created(env, market_id, start_price, start_block, end_block);
        Ok(market_id)
    }

    /// Stake `stake` on `side` in an open market.
    ///
    /// A participant holds one position per market. Entering again on the
    /// same side adds to that position; entering on the other side is
    /// rejected, so the side accumulators always equal the sum of stored
    /// position stakes.
    ///
    /// # Errors
    ///
    /// - `Error::NotFound` - market does not exist
    /// - `Error::MarketClosed` - current ledger outside `[start_block, end_block)`
    /// - `Error::InvalidPrediction` - stake below minimum, or side switch
    /// - `Error::InsufficientBalance` - caller cannot cover the stake
    pub fn make_prediction(
        env: &Env,
        user: &Address,
        market_id: u64,
        side: Side,
        stake: i128,
    ) -> Result<Position, Error> {
        user.require_auth();

        let config = ConfigManager::get_config(env)?;
        let mut market = MarketStorage::get_market(env, market_id)?;
        MarketValidator::validate_market_for_entry(env, &market)?;
        InputValidator::validate_stake(stake, config.minimum_stake)?;

        let position = match PositionStorage::get_position(env, market_id, user) {
            Some(existing) if existing.side != side => return Err(Error::InvalidPrediction),
            Some(mut existing) => {
                existing.stake = existing
                    .stake
                    .checked_add(stake)
                    .ok_or(Error::ArithmeticOverflow)?;
                existing
            }
            None => Position::new(side, stake),
        };
        market.add_stake(side, stake)?;

        TokenUtils::lock_funds(env, user, stake)?;

        PositionStorage::store_position(env, market_id, user, &position);
        MarketStorage::store_market(env, &market);

        EventEmitter::emit_prediction_made(
            env,
            market_id,
            user,
            side,
            stake,
            position.stake,
            market.stake_on(side),
        );
        Ok(position)
    }

    /// Record the oracle's final value. Terminal and one-time.
    ///
    /// The current fee rate is stored on the market, so later governance
    /// changes do not alter settlement of an already resolved market.
    ///
    /// # Errors
    ///
    /// - `Error::Unauthorized` - caller is not the oracle
    /// - `Error::NotFound` - market does not exist
    /// - `Error::MarketClosed` - already resolved, or entry window not elapsed
    /// - `Error::InvalidParameter` - `end_price <= 0`
    pub fn resolve_market(
        env: &Env,
        caller: &Address,
        market_id: u64,
        end_price: i128,
    ) -> Result<Side, Error> {
        let config = AccessControl::require_oracle(env, caller)?;

        let mut market = MarketStorage::get_market(env, market_id)?;
        MarketValidator::validate_market_for_resolution(env, &market)?;
        InputValidator::validate_price(end_price)?;

        market.end_price = end_price;
        market.resolved = true;
        market.fee_percentage = config.fee_percentage;
        MarketStorage::store_market(env, &market);

        let winning_side = Side::winning(market.start_price, end_price);
        log!(env, "market resolved", market_id, end_price);
        EventEmitter::emit_market_resolved(
            env,
            market_id,
            market.start_price,
            end_price,
            winning_side,
            market.total_up_stake,
            market.total_down_stake,
            market.fee_percentage,
        );
        Ok(winning_side)
    }
}

// ===== MARKET VALIDATOR =====

/// State checks for each lifecycle transition.
pub struct MarketValidator;

impl MarketValidator {
    pub fn validate_market_for_entry(env: &Env, market: &Market) -> Result<(), Error> {
        if !market.is_open_at(env.ledger().sequence()) {
            return Err(Error::MarketClosed);
        }
        Ok(())
    }

    pub fn validate_market_for_resolution(env: &Env, market: &Market) -> Result<(), Error> {
        match market.state_at(env.ledger().sequence()) {
            MarketState::AwaitingResolution => Ok(()),
            _ => Err(Error::MarketClosed),
        }
    }

    pub fn validate_market_for_claim(market: &Market) -> Result<(), Error> {
        if !market.resolved {
            return Err(Error::MarketClosed);
        }
        Ok(())
    }
}

// ===== MARKET STATE LOGIC =====

/// Read-only lifecycle queries.
pub struct MarketStateLogic;

impl MarketStateLogic {
    pub fn get_market_state(env: &Env, market_id: u64) -> Result<MarketState, Error> {
        let market = MarketStorage::get_market(env, market_id)?;
        Ok(market.state_at(env.ledger().sequence()))
    }
}
