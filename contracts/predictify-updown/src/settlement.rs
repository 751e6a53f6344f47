//! # Settlement Module
//!
//! Proportional payout for resolved up/down markets.
//!
//! A winning position receives its share of the whole pool, weighted by its
//! stake within the winning side, minus the protocol fee:
//!
//! ```text
//! gross  = floor(stake * (up + down) / winning_pool)
//! fee    = floor(gross * fee_percentage / 100)
//! payout = gross - fee
//! ```
//!
//! Flooring guarantees the sum of all gross amounts never exceeds the pool.
//! The remainders (dust) stay in custody and are not claimable.

use soroban_sdk::{Address, Env};

use crate::config::{ConfigManager, PERCENTAGE_DENOMINATOR};
use crate::errors::Error;
use crate::events::EventEmitter;
use crate::markets::MarketValidator;
use crate::storage::{MarketStorage, PositionStorage, TreasuryStorage};
use crate::types::{Market, PayoutBreakdown, Position, Side};
use crate::utils::TokenUtils;

// ===== PAYOUT CALCULATOR =====

/// Pure payout math, independent of storage.
pub struct PayoutCalculator;

impl PayoutCalculator {
    /// Compute gross winnings, fee and net payout for a winning stake.
    ///
    /// # Errors
    ///
    /// - `Error::InvalidPrediction` - the winning side holds no stake
    /// - `Error::ArithmeticOverflow` - intermediate product overflowed
    pub fn calculate(
        stake: i128,
        total_up_stake: i128,
        total_down_stake: i128,
        winning_side: Side,
        fee_percentage: u32,
    ) -> Result<PayoutBreakdown, Error> {
        let winning_pool = match winning_side {
            Side::Up => total_up_stake,
            Side::Down => total_down_stake,
        };
        if winning_pool <= 0 {
            return Err(Error::InvalidPrediction);
        }

        let total_pool = total_up_stake
            .checked_add(total_down_stake)
            .ok_or(Error::ArithmeticOverflow)?;
        let gross = stake
            .checked_mul(total_pool)
            .ok_or(Error::ArithmeticOverflow)?
            / winning_pool;
        let fee = gross
            .checked_mul(fee_percentage as i128)
            .ok_or(Error::ArithmeticOverflow)?
            / PERCENTAGE_DENOMINATOR;

        Ok(PayoutBreakdown {
            gross,
            fee,
            payout: gross - fee,
        })
    }

    /// Payout for `position` in a resolved `market`, at the fee rate the
    /// market was resolved with.
    ///
    /// Rejects positions on the losing side with `InvalidPrediction`.
    pub fn for_position(market: &Market, position: &Position) -> Result<PayoutBreakdown, Error> {
        let winning_side = market.winning_side().ok_or(Error::MarketClosed)?;
        if position.side != winning_side {
            return Err(Error::InvalidPrediction);
        }
        Self::calculate(
            position.stake,
            market.total_up_stake,
            market.total_down_stake,
            winning_side,
            market.fee_percentage,
        )
    }
}

// ===== SETTLEMENT ENGINE =====

/// Claim processing against the market and position stores.
pub struct SettlementEngine;

impl SettlementEngine {
    /// Pay out a winning position exactly once.
    ///
    /// The position is marked claimed and the fee credited to the treasury
    /// before the payout transfer; if anything fails the whole invocation
    /// is rolled back.
    ///
    /// # Errors
    ///
    /// - `Error::NotFound` - market or position does not exist
    /// - `Error::MarketClosed` - market not resolved yet
    /// - `Error::AlreadyClaimed` - position already paid out
    /// - `Error::InvalidPrediction` - position is on the losing side
    pub fn claim_winnings(env: &Env, user: &Address, market_id: u64) -> Result<i128, Error> {
        user.require_auth();

        ConfigManager::get_config(env)?;
        let (mut market, mut position) = Self::load_claimable(env, user, market_id)?;
        let breakdown = PayoutCalculator::for_position(&market, &position)?;

        position.claimed = true;
        market.total_paid_out = market
            .total_paid_out
            .checked_add(breakdown.payout)
            .ok_or(Error::ArithmeticOverflow)?;
        market.total_fees = market
            .total_fees
            .checked_add(breakdown.fee)
            .ok_or(Error::ArithmeticOverflow)?;
        PositionStorage::store_position(env, market_id, user, &position);
        MarketStorage::store_market(env, &market);
        TreasuryStorage::credit(env, breakdown.fee)?;

        TokenUtils::release_funds(env, user, breakdown.payout)?;

        EventEmitter::emit_winnings_claimed(
            env,
            market_id,
            user,
            breakdown.gross,
            breakdown.fee,
            breakdown.payout,
        );
        Ok(breakdown.payout)
    }

    /// What `claim_winnings` would pay `user` right now, without paying it.
    pub fn preview_payout(env: &Env, user: &Address, market_id: u64) -> Result<PayoutBreakdown, Error> {
        ConfigManager::get_config(env)?;
        let (market, position) = Self::load_claimable(env, user, market_id)?;
        PayoutCalculator::for_position(&market, &position)
    }

    fn load_claimable(env: &Env, user: &Address, market_id: u64) -> Result<(Market, Position), Error> {
        let market = MarketStorage::get_market(env, market_id)?;
        MarketValidator::validate_market_for_claim(&market)?;

        let position = PositionStorage::get_position(env, market_id, user).ok_or(Error::NotFound)?;
        if position.claimed {
            return Err(Error::AlreadyClaimed);
        }
        Ok((market, position))
    }
}
