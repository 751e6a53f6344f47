//! Event system for the Predictify up/down contract.
//!
//! Every state transition publishes one typed event so indexers can rebuild
//! market, position and treasury state from the event stream alone.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::types::{ProtocolConfig, Side};

// ===== EVENT TYPES =====

/// Event emitted once when the contract is initialized.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ContractInitializedEvent {
    pub owner: Address,
    pub oracle: Address,
    pub token: Address,
    pub minimum_stake: i128,
    pub fee_percentage: u32,
}

/// Event emitted when the owner creates a market.
///
/// # Event Data
///
/// - `market_id`: sequential id of the new market
/// - `start_price`: reference value the market settles against
/// - `start_block` / `end_block`: the half-open entry window
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketCreatedEvent {
    pub market_id: u64,
    pub start_price: i128,
    pub start_block: u32,
    pub end_block: u32,
    pub ledger: u32,
}

/// Event emitted for every admitted stake, including same-side top-ups.
///
/// `position_stake` is the participant's stake after this entry and
/// `side_total` the matching accumulator after this entry.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PredictionMadeEvent {
    pub market_id: u64,
    pub user: Address,
    pub side: Side,
    pub amount: i128,
    pub position_stake: i128,
    pub side_total: i128,
    pub ledger: u32,
}

/// Event emitted when the oracle reports the final value.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketResolvedEvent {
    pub market_id: u64,
    pub start_price: i128,
    pub end_price: i128,
    pub winning_side: Side,
    pub total_up_stake: i128,
    pub total_down_stake: i128,
    pub fee_percentage: u32,
    pub ledger: u32,
}

/// Event emitted for a successful claim.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WinningsClaimedEvent {
    pub market_id: u64,
    pub user: Address,
    pub gross: i128,
    pub fee: i128,
    pub payout: i128,
}

/// Event emitted when a governance setter changes the configuration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConfigUpdatedEvent {
    pub updated_by: Address,
    pub parameter: Symbol,
    pub config: ProtocolConfig,
}

/// Event emitted when the owner withdraws accumulated fees.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeesWithdrawnEvent {
    pub owner: Address,
    pub to: Address,
    pub amount: i128,
    pub remaining: i128,
}

// ===== EVENT EMISSION UTILITIES =====

/// Event emission utilities
pub struct EventEmitter;

impl EventEmitter {
    pub fn emit_contract_initialized(env: &Env, config: &ProtocolConfig) {
        let event = ContractInitializedEvent {
            owner: config.owner.clone(),
            oracle: config.oracle.clone(),
            token: config.token.clone(),
            minimum_stake: config.minimum_stake,
            fee_percentage: config.fee_percentage,
        };
        Self::publish(env, symbol_short!("init"), event);
    }

    pub fn emit_market_created(
        env: &Env,
        market_id: u64,
        start_price: i128,
        start_block: u32,
        end_block: u32,
    ) {
        let event = MarketCreatedEvent {
            market_id,
            start_price,
            start_block,
            end_block,
            ledger: env.ledger().sequence(),
        };
        Self::publish(env, symbol_short!("mkt_new"), event);
    }

    pub fn emit_prediction_made(
        env: &Env,
        market_id: u64,
        user: &Address,
        side: Side,
        amount: i128,
        position_stake: i128,
        side_total: i128,
    ) {
        let event = PredictionMadeEvent {
            market_id,
            user: user.clone(),
            side,
            amount,
            position_stake,
            side_total,
            ledger: env.ledger().sequence(),
        };
        Self::publish(env, symbol_short!("predict"), event);
    }

    pub fn emit_market_resolved(
        env: &Env,
        market_id: u64,
        start_price: i128,
        end_price: i128,
        winning_side: Side,
        total_up_stake: i128,
        total_down_stake: i128,
        fee_percentage: u32,
    ) {
        let event = MarketResolvedEvent {
            market_id,
            start_price,
            end_price,
            winning_side,
            total_up_stake,
            total_down_stake,
            fee_percentage,
            ledger: env.ledger().sequence(),
        };
        Self::publish(env, symbol_short!("resolved"), event);
    }

    pub fn emit_winnings_claimed(
        env: &Env,
        market_id: u64,
        user: &Address,
        gross: i128,
        fee: i128,
        payout: i128,
    ) {
        let event = WinningsClaimedEvent {
            market_id,
            user: user.clone(),
            gross,
            fee,
            payout,
        };
        Self::publish(env, symbol_short!("claimed"), event);
    }

    pub fn emit_config_updated(
        env: &Env,
        updated_by: &Address,
        parameter: Symbol,
        config: &ProtocolConfig,
    ) {
        let event = ConfigUpdatedEvent {
            updated_by: updated_by.clone(),
            parameter,
            config: config.clone(),
        };
        Self::publish(env, symbol_short!("cfg_upd"), event);
    }

    pub fn emit_fees_withdrawn(
        env: &Env,
        owner: &Address,
        to: &Address,
        amount: i128,
        remaining: i128,
    ) {
        let event = FeesWithdrawnEvent {
            owner: owner.clone(),
            to: to.clone(),
            amount,
            remaining,
        };
        Self::publish(env, symbol_short!("fee_wdr"), event);
    }

    fn publish<T>(env: &Env, topic: Symbol, event: T)
    where
        T: soroban_sdk::IntoVal<Env, soroban_sdk::Val>,
    {
        env.events().publish((topic,), event);
    }
}
