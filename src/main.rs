//! Demo walkthrough of the GAST economy.
//!
//! Deploys the full component set, wires it, runs a handful of buys and
//! sells, drifts the pools out of band, and lets the rebalancer restore the
//! split. Run with `cargo run`.

use gast_core::{
    from_fixed_trimmed, AccountId, CurveEngine, CurveParameters, Exchange, PricingSource,
    ProtocolError, Rebalancer, Reserve, TokenLedger, Treasury, SCALE, TOKEN_NAME, TOKEN_SYMBOL,
};

const OWNER: AccountId = AccountId(1);
const EXCHANGE_ID: AccountId = AccountId(2);
const REBALANCER_ID: AccountId = AccountId(3);
const TREASURY_ID: AccountId = AccountId(4);
const ALICE: AccountId = AccountId(100);
const BOB: AccountId = AccountId(101);

fn main() -> Result<(), ProtocolError> {
    println!("=== {TOKEN_NAME} ({TOKEN_SYMBOL}) economy demo ===\n");

    // Deploy.
    let params = CurveParameters::default();
    let mut exchange = Exchange::new(EXCHANGE_ID, OWNER, Box::new(CurveEngine::new(params)));
    let mut ledger = TokenLedger::new(OWNER, params.max_supply);
    let mut reserve = Reserve::new(OWNER);
    let mut treasury = Treasury::new(OWNER, 10)?;
    let rebalancer = Rebalancer::new(OWNER, REBALANCER_ID, 10, 2)?;

    // Wire.
    ledger.set_exchange(OWNER, EXCHANGE_ID)?;
    reserve.set_exchange(OWNER, EXCHANGE_ID)?;
    treasury.set_rebalancer(OWNER, REBALANCER_ID)?;
    treasury.update_exchange(OWNER, EXCHANGE_ID)?;
    exchange.update_treasury(OWNER, TREASURY_ID)?;
    println!(
        "deployed: base price {} / step {} per {} tokens / spread {} bps\n",
        from_fixed_trimmed(params.base_price),
        from_fixed_trimmed(params.price_step),
        from_fixed_trimmed(params.step_interval),
        params.spread_bps,
    );

    // A few buys.
    for (buyer, name, funds) in [(ALICE, "alice", 5 * SCALE), (BOB, "bob", 3 * SCALE)] {
        let receipt = exchange.buy(&mut ledger, &mut reserve, &mut treasury, buyer, funds)?;
        println!(
            "{name} buys with {} funds -> {} {TOKEN_SYMBOL} at {} (reserve +{}, treasury +{})",
            from_fixed_trimmed(receipt.funds),
            from_fixed_trimmed(receipt.tokens),
            from_fixed_trimmed(receipt.price),
            from_fixed_trimmed(receipt.reserve_share),
            from_fixed_trimmed(receipt.treasury_share),
        );
    }
    println!(
        "supply {} / buy price now {}\n",
        from_fixed_trimmed(ledger.total_supply()),
        from_fixed_trimmed(exchange.pricing().buy_price(ledger.total_supply())?),
    );

    // Alice sells half her position back.
    let half = ledger.balance_of(ALICE) / 2;
    ledger.approve(ALICE, EXCHANGE_ID, half);
    let receipt = exchange.sell(&mut ledger, &mut reserve, ALICE, half)?;
    println!(
        "alice sells {} {TOKEN_SYMBOL} at {} -> {} funds",
        from_fixed_trimmed(receipt.tokens),
        from_fixed_trimmed(receipt.price),
        from_fixed_trimmed(receipt.funds),
    );
    println!(
        "pools: reserve {} / treasury {}",
        from_fixed_trimmed(reserve.balance()),
        from_fixed_trimmed(treasury.balance()),
    );

    // The sell drained the reserve side of the split; let the rebalancer
    // restore it.
    let in_band = rebalancer.check_rtr(reserve.balance(), treasury.balance());
    println!(
        "rtr in band: {in_band} (target {}% +/- {}%)",
        rebalancer.target_rtr(),
        rebalancer.tolerance(),
    );
    let report = rebalancer.trigger_rebalance(OWNER, &mut treasury, &mut reserve)?;
    if report.acted {
        println!(
            "rebalanced: reserve {} -> {}, treasury {} -> {}",
            from_fixed_trimmed(report.pre_reserve),
            from_fixed_trimmed(report.post_reserve),
            from_fixed_trimmed(report.pre_treasury),
            from_fixed_trimmed(report.post_treasury),
        );
    } else {
        println!("rebalance: no action needed");
    }

    println!(
        "\nstate root: {}",
        exchange.state_root_hex(&ledger, &reserve, &treasury)
    );
    Ok(())
}
