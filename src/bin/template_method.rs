//! Template Method: one posting algorithm, network-specific steps.
//!
//! Run with: cargo run --bin template_method

use anyhow::{Context, Result};
use pattern_playground::behavioral::template::{network_for_choice, Latency};
use pattern_playground::config::PlaygroundConfig;
use pattern_playground::console::{banner, Prompt};
use pattern_playground::logging;
use std::io::Write;

fn main() -> Result<()> {
    logging::init_demo_logger();
    let config = PlaygroundConfig::load().context("failed to load playground config")?;
    println!("{}\n", banner("Template Method"));

    let mut prompt = Prompt::stdio();
    let user_name = prompt.ask("Input user name: ")?;
    let password = prompt.ask("Input password: ")?;
    let message = prompt.ask("Input message: ")?;
    writeln!(
        prompt.out(),
        "\nChoose social network for posting message.\n1 - Facebook\n2 - Twitter"
    )?;
    let choice = prompt.ask("")?;

    let mut network = network_for_choice(&choice, &user_name, &password, Latency::from(&config.network))
        .context("no such network")?;
    network.post(&message, prompt.out()).context("posting failed")?;
    Ok(())
}
