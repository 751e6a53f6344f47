//! Durable stores for markets, positions and the protocol treasury.
//!
//! Markets, positions and participant registries live in persistent storage
//! and have their TTL extended whenever they are read or written. The market
//! counter and the treasury live in instance storage next to the
//! configuration; the instance TTL is extended by every mutating entrypoint.

use soroban_sdk::{Address, Env, Vec};

use crate::config::{BUMP_AMOUNT, BUMP_THRESHOLD};
use crate::errors::Error;
use crate::types::{DataKey, Market, Position};

// ===== TTL =====

/// Storage lease maintenance.
pub struct StorageTtl;

impl StorageTtl {
    /// Keep the contract instance (config, counter, treasury) alive.
    pub fn extend_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(BUMP_THRESHOLD, BUMP_AMOUNT);
    }

    pub fn extend_persistent(env: &Env, key: &DataKey) {
        env.storage()
            .persistent()
            .extend_ttl(key, BUMP_THRESHOLD, BUMP_AMOUNT);
    }
}

// ===== MARKET STORE =====

/// Market record store, keyed by sequential market id.
pub struct MarketStorage;

impl MarketStorage {
    /// Allocate the next market id and advance the counter.
    ///
    /// Ids start at 0 and are never reused.
    pub fn next_market_id(env: &Env) -> Result<u64, Error> {
        let id = Self::market_count(env);
        let next = id.checked_add(1).ok_or(Error::ArithmeticOverflow)?;
        env.storage().instance().set(&DataKey::MarketCounter, &next);
        Ok(id)
    }

    /// Number of markets created so far.
    pub fn market_count(env: &Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::MarketCounter)
            .unwrap_or(0)
    }

    pub fn get_market(env: &Env, market_id: u64) -> Result<Market, Error> {
        let key = DataKey::Market(market_id);
        let market = env
            .storage()
            .persistent()
            .get(&key)
            .ok_or(Error::NotFound)?;
        StorageTtl::extend_persistent(env, &key);
        Ok(market)
    }

    pub fn store_market(env: &Env, market: &Market) {
        let key = DataKey::Market(market.id);
        env.storage().persistent().set(&key, market);
        StorageTtl::extend_persistent(env, &key);
    }
}

// ===== POSITION STORE =====

/// Position store, keyed by (market id, participant).
pub struct PositionStorage;

impl PositionStorage {
    pub fn get_position(env: &Env, market_id: u64, user: &Address) -> Option<Position> {
        let key = DataKey::Position(market_id, user.clone());
        let position = env.storage().persistent().get(&key)?;
        StorageTtl::extend_persistent(env, &key);
        Some(position)
    }

    /// Write a position and register the participant on first entry.
    pub fn store_position(env: &Env, market_id: u64, user: &Address, position: &Position) {
        let key = DataKey::Position(market_id, user.clone());
        let is_new = !env.storage().persistent().has(&key);

        env.storage().persistent().set(&key, position);
        StorageTtl::extend_persistent(env, &key);

        if is_new {
            Self::add_participant(env, market_id, user);
        }
    }

    /// Every address holding a position in the market, in entry order.
    pub fn get_participants(env: &Env, market_id: u64) -> Vec<Address> {
        let key = DataKey::Participants(market_id);
        match env.storage().persistent().get(&key) {
            Some(participants) => {
                StorageTtl::extend_persistent(env, &key);
                participants
            }
            None => Vec::new(env),
        }
    }

    fn add_participant(env: &Env, market_id: u64, user: &Address) {
        let key = DataKey::Participants(market_id);
        let mut participants = Self::get_participants(env, market_id);
        participants.push_back(user.clone());
        env.storage().persistent().set(&key, &participants);
        StorageTtl::extend_persistent(env, &key);
    }
}

// ===== TREASURY =====

/// Accumulated protocol fees held in custody and withdrawable by the owner.
pub struct TreasuryStorage;

impl TreasuryStorage {
    pub fn get_balance(env: &Env) -> i128 {
        env.storage().instance().get(&DataKey::Treasury).unwrap_or(0)
    }

    pub fn credit(env: &Env, amount: i128) -> Result<i128, Error> {
        let balance = Self::get_balance(env)
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        env.storage().instance().set(&DataKey::Treasury, &balance);
        Ok(balance)
    }

    pub fn debit(env: &Env, amount: i128) -> Result<i128, Error> {
        let current = Self::get_balance(env);
        if amount > current {
            return Err(Error::InsufficientBalance);
        }
        let balance = current - amount;
        env.storage().instance().set(&DataKey::Treasury, &balance);
        Ok(balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;
    use crate::PredictifyUpDown;
    use soroban_sdk::testutils::Address as _;

    fn with_contract<F: FnOnce()>(env: &Env, f: F) {
        let addr = env.register(PredictifyUpDown, ());
        env.as_contract(&addr, || {
            f();
        });
    }

    #[test]
    fn market_ids_are_sequential() {
        let env = Env::default();
        with_contract(&env, || {
            assert_eq!(MarketStorage::market_count(&env), 0);
            assert_eq!(MarketStorage::next_market_id(&env), Ok(0));
            assert_eq!(MarketStorage::next_market_id(&env), Ok(1));
            assert_eq!(MarketStorage::next_market_id(&env), Ok(2));
            assert_eq!(MarketStorage::market_count(&env), 3);
        });
    }

    #[test]
    fn missing_market_is_not_found() {
        let env = Env::default();
        with_contract(&env, || {
            assert_eq!(MarketStorage::get_market(&env, 7), Err(Error::NotFound));

            let market = Market::new(7, 100, 1, 2);
            MarketStorage::store_market(&env, &market);
            assert_eq!(MarketStorage::get_market(&env, 7), Ok(market));
        });
    }

    #[test]
    fn participants_are_registered_once() {
        let env = Env::default();
        with_contract(&env, || {
            let user = Address::generate(&env);
            PositionStorage::store_position(&env, 0, &user, &Position::new(Side::Up, 10));
            PositionStorage::store_position(&env, 0, &user, &Position::new(Side::Up, 20));

            let participants = PositionStorage::get_participants(&env, 0);
            assert_eq!(participants.len(), 1);
            assert_eq!(
                PositionStorage::get_position(&env, 0, &user).map(|p| p.stake),
                Some(20)
            );
            assert!(PositionStorage::get_position(&env, 1, &user).is_none());
        });
    }

    #[test]
    fn treasury_debit_cannot_exceed_balance() {
        let env = Env::default();
        with_contract(&env, || {
            assert_eq!(TreasuryStorage::credit(&env, 500), Ok(500));
            assert_eq!(TreasuryStorage::debit(&env, 200), Ok(300));
            assert_eq!(
                TreasuryStorage::debit(&env, 301),
                Err(Error::InsufficientBalance)
            );
            assert_eq!(TreasuryStorage::get_balance(&env), 300);
        });
    }
}
