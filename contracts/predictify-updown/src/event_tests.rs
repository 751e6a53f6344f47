//! # Event Tests
//!
//! Topic and payload of every published event. Events are read right after
//! the invocation that emitted them.

#![cfg(test)]

use soroban_sdk::{symbol_short, testutils::Address as _, Address, Env};

use crate::events::{
    ConfigUpdatedEvent, ContractInitializedEvent, FeesWithdrawnEvent, MarketCreatedEvent,
    MarketResolvedEvent, PredictionMadeEvent, WinningsClaimedEvent,
};
use crate::test::{last_event, PredictifyTest, START_LEDGER};
use crate::types::{ProtocolConfig, Side};
use crate::{PredictifyUpDown, PredictifyUpDownClient};

#[test]
fn test_initialize_event() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(PredictifyUpDown, ());
    let client = PredictifyUpDownClient::new(&env, &contract_id);
    let owner = Address::generate(&env);
    let oracle = Address::generate(&env);
    let token = Address::generate(&env);

    client.initialize(&owner, &oracle, &token, &1_000_000, &2);

    let (topic, event) = last_event::<ContractInitializedEvent>(&env, &contract_id);
    assert_eq!(topic, symbol_short!("init"));
    assert_eq!(
        event,
        ContractInitializedEvent {
            owner,
            oracle,
            token,
            minimum_stake: 1_000_000,
            fee_percentage: 2,
        }
    );
}

#[test]
fn test_market_created_event() {
    let test = PredictifyTest::setup();
    let market_id = test.create_open_market(50_000, 50);

    let (topic, event) = test.last_event::<MarketCreatedEvent>();
    assert_eq!(topic, symbol_short!("mkt_new"));
    assert_eq!(
        event,
        MarketCreatedEvent {
            market_id,
            start_price: 50_000,
            start_block: START_LEDGER,
            end_block: START_LEDGER + 50,
            ledger: START_LEDGER,
        }
    );
}

#[test]
fn test_prediction_event_reports_totals_after_top_up() {
    let test = PredictifyTest::setup();
    let client = test.client();
    let market_id = test.create_open_market(50_000, 50);
    let other = test.funded_user();

    client.make_prediction(&other, &market_id, &Side::Up, &1_000_000);
    client.make_prediction(&test.user, &market_id, &Side::Up, &2_000_000);
    client.make_prediction(&test.user, &market_id, &Side::Up, &3_000_000);

    let (topic, event) = test.last_event::<PredictionMadeEvent>();
    assert_eq!(topic, symbol_short!("predict"));
    assert_eq!(
        event,
        PredictionMadeEvent {
            market_id,
            user: test.user.clone(),
            side: Side::Up,
            amount: 3_000_000,
            position_stake: 5_000_000,
            side_total: 6_000_000,
            ledger: START_LEDGER,
        }
    );
}

#[test]
fn test_resolved_and_claimed_events() {
    let test = PredictifyTest::setup();
    let client = test.client();
    let market_id = test.create_open_market(50_000, 50);
    let up_large = test.funded_user();
    let down = test.funded_user();
    client.make_prediction(&test.user, &market_id, &Side::Up, &1_000_000);
    client.make_prediction(&up_large, &market_id, &Side::Up, &2_000_000);
    client.make_prediction(&down, &market_id, &Side::Down, &1_000_000);

    test.close_and_resolve(market_id, 60_000);
    let (topic, event) = test.last_event::<MarketResolvedEvent>();
    assert_eq!(topic, symbol_short!("resolved"));
    assert_eq!(
        event,
        MarketResolvedEvent {
            market_id,
            start_price: 50_000,
            end_price: 60_000,
            winning_side: Side::Up,
            total_up_stake: 3_000_000,
            total_down_stake: 1_000_000,
            fee_percentage: 2,
            ledger: START_LEDGER + 50,
        }
    );

    client.claim_winnings(&test.user, &market_id);
    let (topic, event) = test.last_event::<WinningsClaimedEvent>();
    assert_eq!(topic, symbol_short!("claimed"));
    assert_eq!(
        event,
        WinningsClaimedEvent {
            market_id,
            user: test.user.clone(),
            gross: 1_333_333,
            fee: 26_666,
            payout: 1_306_667,
        }
    );
}

#[test]
fn test_config_updated_events_name_the_parameter() {
    let test = PredictifyTest::setup();
    let client = test.client();
    let new_oracle = Address::generate(&test.env);

    client.set_fee_percentage(&test.owner, &5);
    let (topic, event) = test.last_event::<ConfigUpdatedEvent>();
    assert_eq!(topic, symbol_short!("cfg_upd"));
    assert_eq!(
        event,
        ConfigUpdatedEvent {
            updated_by: test.owner.clone(),
            parameter: symbol_short!("fee_pct"),
            config: ProtocolConfig {
                owner: test.owner.clone(),
                oracle: test.oracle.clone(),
                token: test.token_test.token_id.clone(),
                minimum_stake: 1_000_000,
                fee_percentage: 5,
            },
        }
    );

    client.set_minimum_stake(&test.owner, &2_000_000);
    let (_, event) = test.last_event::<ConfigUpdatedEvent>();
    assert_eq!(event.parameter, symbol_short!("min_stake"));
    assert_eq!(event.config.minimum_stake, 2_000_000);

    client.set_oracle(&test.owner, &new_oracle);
    let (_, event) = test.last_event::<ConfigUpdatedEvent>();
    assert_eq!(event.parameter, symbol_short!("oracle"));
    assert_eq!(event.config.oracle, new_oracle);
}

#[test]
fn test_fees_withdrawn_event() {
    let test = PredictifyTest::setup();
    let client = test.client();
    let market_id = test.create_open_market(50_000, 10);
    let loser = test.funded_user();
    client.make_prediction(&test.user, &market_id, &Side::Up, &1_000_000);
    client.make_prediction(&loser, &market_id, &Side::Down, &1_000_000);
    test.close_and_resolve(market_id, 60_000);
    client.claim_winnings(&test.user, &market_id);

    let recipient = Address::generate(&test.env);
    client.withdraw_fees(&test.owner, &recipient, &30_000);

    let (topic, event) = test.last_event::<FeesWithdrawnEvent>();
    assert_eq!(topic, symbol_short!("fee_wdr"));
    assert_eq!(
        event,
        FeesWithdrawnEvent {
            owner: test.owner.clone(),
            to: recipient,
            amount: 30_000,
            remaining: 10_000,
        }
    );
}
