//! End-to-end tests of the full economy.
//!
//! Exercises the wired component set the way a deployment would: buys and
//! sells through the exchange, fund routing, rebalancing, and the
//! conservation and determinism guarantees under randomized trade sequences.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use gast_core::{
    AccountId, CurveEngine, CurveParameters, Exchange, PriceDataEntry, PriceTable, PricingSource,
    ProtocolError, Rebalancer, Reserve, TokenLedger, Treasury, SCALE,
};

const OWNER: AccountId = AccountId(1);
const EXCHANGE_ID: AccountId = AccountId(2);
const REBALANCER_ID: AccountId = AccountId(3);
const TREASURY_ID: AccountId = AccountId(4);
const BUYER: AccountId = AccountId(100);
const SELLER: AccountId = AccountId(101);

struct Deployment {
    exchange: Exchange,
    ledger: TokenLedger,
    reserve: Reserve,
    treasury: Treasury,
    rebalancer: Rebalancer,
}

/// Deploys and fully wires the component set over the given curve.
fn deploy(params: CurveParameters) -> Deployment {
    let mut exchange = Exchange::new(EXCHANGE_ID, OWNER, Box::new(CurveEngine::new(params)));
    let mut ledger = TokenLedger::new(OWNER, params.max_supply);
    let mut reserve = Reserve::new(OWNER);
    let mut treasury = Treasury::new(OWNER, 10).unwrap();
    let rebalancer = Rebalancer::new(OWNER, REBALANCER_ID, 10, 2).unwrap();

    ledger.set_exchange(OWNER, EXCHANGE_ID).unwrap();
    reserve.set_exchange(OWNER, EXCHANGE_ID).unwrap();
    treasury.set_rebalancer(OWNER, REBALANCER_ID).unwrap();
    treasury.update_exchange(OWNER, EXCHANGE_ID).unwrap();
    exchange.update_treasury(OWNER, TREASURY_ID).unwrap();

    Deployment {
        exchange,
        ledger,
        reserve,
        treasury,
        rebalancer,
    }
}

fn flat_spread(params: CurveParameters) -> CurveParameters {
    CurveParameters {
        spread_bps: 0,
        ..params
    }
}

#[test]
fn test_buy_mints_at_genesis_price() {
    let mut d = deploy(flat_spread(CurveParameters::default()));
    let receipt = d
        .exchange
        .buy(&mut d.ledger, &mut d.reserve, &mut d.treasury, BUYER, SCALE)
        .unwrap();
    // 1.0 funds at 0.01 -> 100 tokens, all of it to the reserve.
    assert_eq!(receipt.tokens, 100 * SCALE);
    assert_eq!(receipt.price, SCALE / 100);
    assert_eq!(d.ledger.balance_of(BUYER), 100 * SCALE);
    assert_eq!(d.ledger.total_supply(), 100 * SCALE);
    assert_eq!(d.reserve.balance(), SCALE);
    assert_eq!(d.treasury.balance(), 0);
    // The buy pushed the marginal price one step up.
    assert_eq!(
        d.exchange.pricing().buy_price(d.ledger.total_supply()).unwrap(),
        11 * SCALE / 1000
    );
}

#[test]
fn test_sell_burns_at_current_price() {
    let mut d = deploy(flat_spread(CurveParameters::default()));
    d.exchange
        .buy(&mut d.ledger, &mut d.reserve, &mut d.treasury, BUYER, SCALE)
        .unwrap();
    d.ledger.approve(BUYER, EXCHANGE_ID, 50 * SCALE);
    let receipt = d
        .exchange
        .sell(&mut d.ledger, &mut d.reserve, BUYER, 50 * SCALE)
        .unwrap();
    // 50 tokens at the one-interval price 0.011 -> 0.55 funds.
    assert_eq!(receipt.funds, 55 * SCALE / 100);
    assert_eq!(d.ledger.total_supply(), 50 * SCALE);
    assert_eq!(d.reserve.balance(), 45 * SCALE / 100);
    // Supply dropped back into the first interval.
    assert_eq!(
        d.exchange.pricing().buy_price(d.ledger.total_supply()).unwrap(),
        SCALE / 100
    );
}

#[test]
fn test_spread_routes_cut_to_treasury() {
    let mut d = deploy(CurveParameters::default());
    let receipt = d
        .exchange
        .buy(&mut d.ledger, &mut d.reserve, &mut d.treasury, BUYER, SCALE)
        .unwrap();
    // 10% spread: a tenth of the payment lands in the treasury.
    assert_eq!(receipt.treasury_share, SCALE / 10);
    assert_eq!(receipt.reserve_share, 9 * SCALE / 10);
    assert_eq!(d.reserve.balance(), 9 * SCALE / 10);
    assert_eq!(d.treasury.balance(), SCALE / 10);

    // Selling the whole position pays sell-side prices out of a pre-funded
    // reserve: 100 tokens at 0.9 * 0.011 = 0.0099.
    d.reserve.deposit(10 * SCALE).unwrap();
    d.ledger.approve(BUYER, EXCHANGE_ID, 100 * SCALE);
    let receipt = d
        .exchange
        .sell(&mut d.ledger, &mut d.reserve, BUYER, 100 * SCALE)
        .unwrap();
    assert_eq!(receipt.funds, 99 * SCALE / 100);
    assert!(receipt.funds <= SCALE);
}

#[test]
fn test_round_trip_never_profits() {
    let mut d = deploy(CurveParameters::default());
    // Small buy that stays inside the first interval.
    let buy = d
        .exchange
        .buy(
            &mut d.ledger,
            &mut d.reserve,
            &mut d.treasury,
            BUYER,
            SCALE / 2,
        )
        .unwrap();
    assert_eq!(buy.tokens, 50 * SCALE);
    assert_eq!(d.reserve.balance(), 45 * SCALE / 100);

    // Selling everything back at 0.009 returns exactly the reserve share.
    d.ledger.approve(BUYER, EXCHANGE_ID, buy.tokens);
    let sell = d
        .exchange
        .sell(&mut d.ledger, &mut d.reserve, BUYER, buy.tokens)
        .unwrap();
    assert_eq!(sell.funds, 45 * SCALE / 100);
    assert!(sell.funds <= buy.funds);
    assert_eq!(d.reserve.balance(), 0);
    assert_eq!(d.ledger.total_supply(), 0);
}

#[test]
fn test_supply_cap_is_exact() {
    let params = CurveParameters {
        max_supply: 1000 * SCALE,
        ..flat_spread(CurveParameters::default())
    };
    let mut d = deploy(params);
    // 10.0 funds at 0.01 mints exactly to the cap.
    let receipt = d
        .exchange
        .buy(
            &mut d.ledger,
            &mut d.reserve,
            &mut d.treasury,
            BUYER,
            10 * SCALE,
        )
        .unwrap();
    assert_eq!(receipt.new_supply, 1000 * SCALE);
    assert_eq!(d.ledger.total_supply(), d.ledger.max_supply());
    // At the cap, any further buy is rejected outright.
    assert_eq!(
        d.exchange
            .buy(&mut d.ledger, &mut d.reserve, &mut d.treasury, BUYER, SCALE),
        Err(ProtocolError::SupplyExceeded)
    );
}

#[test]
fn test_cap_crossing_buy_rejected_whole() {
    let params = CurveParameters {
        max_supply: 1000 * SCALE,
        ..flat_spread(CurveParameters::default())
    };
    let mut d = deploy(params);
    let before = d
        .exchange
        .state_root(&d.ledger, &d.reserve, &d.treasury);
    // 11.0 funds would mint 1100 tokens: past the cap, so nothing at all
    // happens.
    assert_eq!(
        d.exchange.buy(
            &mut d.ledger,
            &mut d.reserve,
            &mut d.treasury,
            BUYER,
            11 * SCALE
        ),
        Err(ProtocolError::SupplyExceeded)
    );
    assert_eq!(
        d.exchange.state_root(&d.ledger, &d.reserve, &d.treasury),
        before
    );
    assert_eq!(d.ledger.total_supply(), 0);
    assert_eq!(d.reserve.balance(), 0);
}

#[test]
fn test_underfunded_reserve_rejects_sell_atomically() {
    let mut d = deploy(flat_spread(CurveParameters::default()));
    d.exchange
        .buy(&mut d.ledger, &mut d.reserve, &mut d.treasury, BUYER, SCALE)
        .unwrap();
    // Drain the reserve into the treasury: retarget the split to zero and
    // rebalance.
    d.treasury.update_reserve_ratio(OWNER, 0).unwrap();
    d.rebalancer
        .trigger_rebalance(OWNER, &mut d.treasury, &mut d.reserve)
        .unwrap();
    assert_eq!(d.reserve.balance(), 0);
    d.reserve.deposit(SCALE / 10).unwrap();

    // The payout (0.55) exceeds what the reserve holds (0.1).
    d.ledger.approve(BUYER, EXCHANGE_ID, 50 * SCALE);
    let before = d
        .exchange
        .state_root(&d.ledger, &d.reserve, &d.treasury);
    assert_eq!(
        d.exchange.sell(&mut d.ledger, &mut d.reserve, BUYER, 50 * SCALE),
        Err(ProtocolError::InsufficientReserve)
    );
    // Tokens were not burned and the allowance was not spent.
    assert_eq!(
        d.exchange.state_root(&d.ledger, &d.reserve, &d.treasury),
        before
    );
    assert_eq!(d.ledger.balance_of(BUYER), 100 * SCALE);
    assert_eq!(d.ledger.allowance(BUYER, EXCHANGE_ID), 50 * SCALE);
}

#[test]
fn test_rebalancer_restores_band() {
    let mut d = deploy(CurveParameters::default());
    d.exchange
        .buy(&mut d.ledger, &mut d.reserve, &mut d.treasury, BUYER, SCALE)
        .unwrap();
    // 0.9 / 0.1 split: 90% in reserve against a 10% target.
    assert!(!d.rebalancer.check_rtr(d.reserve.balance(), d.treasury.balance()));
    let report = d
        .rebalancer
        .trigger_rebalance(OWNER, &mut d.treasury, &mut d.reserve)
        .unwrap();
    assert!(report.acted);
    assert_eq!(report.post_reserve, SCALE / 10);
    assert_eq!(report.post_treasury, 9 * SCALE / 10);
    assert!(d.rebalancer.check_rtr(d.reserve.balance(), d.treasury.balance()));
    // Re-triggering inside the band is a recorded no-op.
    let report = d
        .rebalancer
        .trigger_rebalance(OWNER, &mut d.treasury, &mut d.reserve)
        .unwrap();
    assert!(!report.acted);
    assert_eq!(report.post_reserve, SCALE / 10);
}

#[test]
fn test_full_cycle_mint_to_cap_and_back() {
    // Flat curve so every trade prices identically: buys at 0.01, sells at
    // 0.009.
    let params = CurveParameters {
        price_step: 0,
        ..CurveParameters::default()
    };
    let mut d = deploy(params);

    let mut paid_in = 0u128;
    for _ in 0..10 {
        let receipt = d
            .exchange
            .buy(&mut d.ledger, &mut d.reserve, &mut d.treasury, BUYER, SCALE)
            .unwrap();
        assert_eq!(receipt.tokens, 100 * SCALE);
        paid_in += receipt.funds;
    }
    assert_eq!(d.ledger.total_supply(), 1000 * SCALE);
    assert_eq!(d.reserve.balance(), 9 * SCALE);
    assert_eq!(d.treasury.balance(), SCALE);

    d.ledger.approve(BUYER, EXCHANGE_ID, 1000 * SCALE);
    let mut paid_out = 0u128;
    for _ in 0..4 {
        let receipt = d
            .exchange
            .sell(&mut d.ledger, &mut d.reserve, BUYER, 250 * SCALE)
            .unwrap();
        // 250 tokens at 0.009.
        assert_eq!(receipt.funds, 225 * SCALE / 100);
        paid_out += receipt.funds;
    }
    // Everything unwound: supply zero, reserve empty, spread cut retained.
    assert_eq!(d.ledger.total_supply(), 0);
    assert_eq!(d.reserve.balance(), 0);
    assert_eq!(d.treasury.balance(), SCALE);
    assert_eq!(paid_in - paid_out, d.reserve.balance() + d.treasury.balance());
}

/// Runs a seeded random trade session and returns the final state root.
fn random_session(seed: u64, steps: u32) -> String {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut d = deploy(CurveParameters::default());
    let traders = [BUYER, SELLER, AccountId(102), AccountId(103)];

    let mut paid_in = 0u128;
    let mut paid_out = 0u128;
    for _ in 0..steps {
        let trader = traders[rng.gen_range(0..traders.len())];
        if rng.gen_bool(0.6) {
            // Buy between 0.01 and 2.0 funds.
            let funds = rng.gen_range(SCALE / 100..=2 * SCALE);
            if let Ok(receipt) =
                d.exchange
                    .buy(&mut d.ledger, &mut d.reserve, &mut d.treasury, trader, funds)
            {
                paid_in += receipt.funds;
            }
        } else {
            let balance = d.ledger.balance_of(trader);
            if balance == 0 {
                continue;
            }
            let tokens = rng.gen_range(1..=balance);
            d.ledger.approve(trader, EXCHANGE_ID, tokens);
            // Dust sells and reserve shortfalls reject cleanly; both leave
            // state untouched.
            if let Ok(receipt) = d.exchange.sell(&mut d.ledger, &mut d.reserve, trader, tokens) {
                paid_out += receipt.funds;
            }
        }
        // Conservation holds after every step.
        assert_eq!(d.ledger.balances_total(), d.ledger.total_supply());
        assert_eq!(
            paid_in - paid_out,
            d.reserve.balance() + d.treasury.balance()
        );
    }
    d.exchange.state_root_hex(&d.ledger, &d.reserve, &d.treasury)
}

#[test]
fn test_conservation_under_random_trades() {
    // The assertions live inside the session loop.
    random_session(7, 300);
}

#[test]
fn test_deterministic_replay() {
    let a = random_session(42, 200);
    let b = random_session(42, 200);
    let c = random_session(43, 200);
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn test_price_table_backend_serves_trades() {
    // Two-segment table from genesis: 0.01 rising to 0.02 over the first
    // 1000 tokens, constant 10% spread, capped at 2000 tokens.
    let entry = |supply: u128, buy: u128| PriceDataEntry {
        cumulative_supply: supply,
        buy_price: buy,
        sell_price: buy - buy / 10,
        spread: buy / 10,
    };
    let table = PriceTable::new(vec![
        entry(0, SCALE / 100),
        entry(1000 * SCALE, 2 * SCALE / 100),
        entry(2000 * SCALE, 3 * SCALE / 100),
    ])
    .unwrap();

    let mut exchange = Exchange::new(EXCHANGE_ID, OWNER, Box::new(table));
    let mut ledger = TokenLedger::new(OWNER, 2000 * SCALE);
    let mut reserve = Reserve::new(OWNER);
    let mut treasury = Treasury::new(OWNER, 10).unwrap();
    ledger.set_exchange(OWNER, EXCHANGE_ID).unwrap();
    reserve.set_exchange(OWNER, EXCHANGE_ID).unwrap();
    exchange.update_treasury(OWNER, TREASURY_ID).unwrap();

    // Genesis buy prices off the first row.
    let receipt = exchange
        .buy(&mut ledger, &mut reserve, &mut treasury, BUYER, SCALE)
        .unwrap();
    assert_eq!(receipt.tokens, 100 * SCALE);
    assert_eq!(receipt.price, SCALE / 100);

    // The next buy prices off the interpolated row at supply 100: 0.011.
    let receipt = exchange
        .buy(&mut ledger, &mut reserve, &mut treasury, BUYER, SCALE)
        .unwrap();
    assert_eq!(receipt.price, 11 * SCALE / 1000);

    // Sells interpolate the sell column the same way.
    ledger.approve(BUYER, EXCHANGE_ID, 50 * SCALE);
    let supply = ledger.total_supply();
    let expected_price = exchange.pricing().sell_price(supply).unwrap();
    let receipt = exchange
        .sell(&mut ledger, &mut reserve, BUYER, 50 * SCALE)
        .unwrap();
    assert_eq!(receipt.price, expected_price);
    assert!(ledger.total_supply() < supply);
}
