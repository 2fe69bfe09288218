//! Strategy: the checkout picks a payment strategy at runtime.
//!
//! Run with: cargo run --bin strategy
//! PayPal accounts: amanda@ya.com / amanda1985, john@amazon.eu / qwerty

use anyhow::{Context, Result};
use pattern_playground::behavioral::strategy::run_checkout;
use pattern_playground::console::{banner, Prompt};
use pattern_playground::logging;

fn main() -> Result<()> {
    logging::init_demo_logger();
    println!("{}\n", banner("Strategy"));

    let mut prompt = Prompt::stdio();
    let order = run_checkout(&mut prompt).context("checkout failed")?;
    tracing::info!(total = order.total_cost(), "order closed");
    Ok(())
}
