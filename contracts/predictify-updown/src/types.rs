//! # Types Module
//!
//! Contract data types for the up/down settlement contract: the stored
//! `Market` and `Position` records, the side a participant takes, the derived
//! lifecycle state, the protocol configuration and the storage keys.

use core::cmp::Ordering;

use soroban_sdk::{contracttype, Address};

use crate::errors::Error;

// ===== STORAGE KEYS =====

/// Storage keys for contract data.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// `ProtocolConfig` (instance storage)
    Config,
    /// Next market id to allocate (instance storage)
    MarketCounter,
    /// Accumulated, withdrawable protocol fees (instance storage)
    Treasury,
    /// Reentrancy lock flag (instance storage)
    ReentrancyLock,
    /// `Market` by id (persistent storage)
    Market(u64),
    /// `Position` by (market id, participant) (persistent storage)
    Position(u64, Address),
    /// Addresses holding a position in a market (persistent storage)
    Participants(u64),
}

// ===== SIDE =====

/// The direction a participant predicts for the tracked value.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Up,
    Down,
}

impl Side {
    /// Winning side for a resolved market.
    ///
    /// `Up` wins only when the final value strictly exceeds the start value.
    /// A tie (`end_price == start_price`) settles in favour of `Down`.
    pub fn winning(start_price: i128, end_price: i128) -> Side {
        match end_price.cmp(&start_price) {
            Ordering::Greater => Side::Up,
            Ordering::Equal => Side::Down,
            Ordering::Less => Side::Down,
        }
    }
}

// ===== MARKET STATE =====

/// Lifecycle state of a market at a given ledger sequence.
///
/// Never stored: it is derived from the market record and the current ledger.
///
/// ```text
/// Pending ──(start_block)──> Open ──(end_block)──> AwaitingResolution ──(oracle)──> Resolved
/// ```
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum MarketState {
    /// Entry window has not opened yet
    Pending = 0,
    /// Inside `[start_block, end_block)`, accepting predictions
    Open = 1,
    /// Window elapsed, waiting for the oracle
    AwaitingResolution = 2,
    /// Final value reported; claims allowed
    Resolved = 3,
}

// ===== MARKET =====

/// A single binary-outcome staking pool.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Market {
    /// Sequential id assigned at creation
    pub id: u64,
    /// Reference value at market open
    pub start_price: i128,
    /// Final value reported by the oracle, zero until resolution
    pub end_price: i128,
    /// Sum of all stakes on `Side::Up`
    pub total_up_stake: i128,
    /// Sum of all stakes on `Side::Down`
    pub total_down_stake: i128,
    /// First ledger of the entry window (inclusive)
    pub start_block: u32,
    /// End of the entry window (exclusive); resolution allowed from here on
    pub end_block: u32,
    /// Set once by the oracle, never reverted
    pub resolved: bool,
    /// Protocol fee rate captured at resolution; every claim on this
    /// market pays it
    pub fee_percentage: u32,
    /// Sum of payouts already transferred to winners
    pub total_paid_out: i128,
    /// Sum of fees already moved to the treasury
    pub total_fees: i128,
}

impl Market {
    pub fn new(id: u64, start_price: i128, start_block: u32, end_block: u32) -> Self {
        Self {
            id,
            start_price,
            end_price: 0,
            total_up_stake: 0,
            total_down_stake: 0,
            start_block,
            end_block,
            resolved: false,
            fee_percentage: 0,
            total_paid_out: 0,
            total_fees: 0,
        }
    }

    /// Derive the lifecycle state at `current_block`.
    pub fn state_at(&self, current_block: u32) -> MarketState {
        if self.resolved {
            MarketState::Resolved
        } else if current_block < self.start_block {
            MarketState::Pending
        } else if current_block < self.end_block {
            MarketState::Open
        } else {
            MarketState::AwaitingResolution
        }
    }

    pub fn is_open_at(&self, current_block: u32) -> bool {
        self.state_at(current_block) == MarketState::Open
    }

    pub fn stake_on(&self, side: Side) -> i128 {
        match side {
            Side::Up => self.total_up_stake,
            Side::Down => self.total_down_stake,
        }
    }

    pub fn total_pool(&self) -> Result<i128, Error> {
        self.total_up_stake
            .checked_add(self.total_down_stake)
            .ok_or(Error::ArithmeticOverflow)
    }

    /// Add an admitted stake to the accumulator for `side`.
    pub fn add_stake(&mut self, side: Side, amount: i128) -> Result<(), Error> {
        let total = match side {
            Side::Up => &mut self.total_up_stake,
            Side::Down => &mut self.total_down_stake,
        };
        *total = total.checked_add(amount).ok_or(Error::ArithmeticOverflow)?;
        Ok(())
    }

    /// Winning side, `None` while unresolved.
    pub fn winning_side(&self) -> Option<Side> {
        if self.resolved {
            Some(Side::winning(self.start_price, self.end_price))
        } else {
            None
        }
    }
}

// ===== POSITION =====

/// One participant's stake and side within one market.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub side: Side,
    pub stake: i128,
    pub claimed: bool,
}

impl Position {
    pub fn new(side: Side, stake: i128) -> Self {
        Self {
            side,
            stake,
            claimed: false,
        }
    }
}

// ===== PAYOUT =====

/// Result of the settlement math for one winning position.
///
/// `gross = fee + payout` always holds.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PayoutBreakdown {
    /// `floor(stake * total_pool / winning_pool)`
    pub gross: i128,
    /// `floor(gross * fee_percentage / 100)`
    pub fee: i128,
    /// Amount transferred to the claimant
    pub payout: i128,
}

// ===== CONFIGURATION =====

/// Mutable economic parameters, gated by the owner.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProtocolConfig {
    /// Fixed at initialization; creates markets and governs parameters
    pub owner: Address,
    /// Sole identity allowed to resolve markets
    pub oracle: Address,
    /// SEP-41 token used for stakes, payouts and fees
    pub token: Address,
    /// Smallest stake admitted by `make_prediction`
    pub minimum_stake: i128,
    /// Fee taken from gross winnings, in whole percent
    pub fee_percentage: u32,
}
