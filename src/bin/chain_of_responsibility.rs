//! Chain of Responsibility: logging in through throttling, user and role checks.
//!
//! Run with: cargo run --bin chain_of_responsibility
//! Accounts: admin@example.com / admin_pass, user@example.com / user_pass

use anyhow::{Context, Result};
use colored::Colorize;
use pattern_playground::behavioral::chain::{demo_server, login_session};
use pattern_playground::config::PlaygroundConfig;
use pattern_playground::console::{banner, Prompt};
use pattern_playground::{logging, PlaygroundError};

fn main() -> Result<()> {
    logging::init_demo_logger();
    let config = PlaygroundConfig::load().context("failed to load playground config")?;
    println!("{}\n", banner("Chain of Responsibility"));

    let mut server = demo_server(config.auth.requests_per_window, config.auth.window());
    let mut prompt = Prompt::stdio();

    match login_session(&mut server, &mut prompt) {
        Ok(true) => Ok(()),
        Ok(false) => {
            println!("\nNo more input, giving up.");
            Ok(())
        }
        Err(err @ PlaygroundError::RateLimited { .. }) => {
            eprintln!("{}", err.to_string().red());
            Ok(())
        }
        Err(err) => Err(err).context("login session failed"),
    }
}
