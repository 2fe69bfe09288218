//! Template Method
//!
//! `Network::post` fixes the order of the steps (log in, send, log out);
//! each social network only fills in the steps themselves.

use crate::config::NetworkConfig;
use crate::error::{PlaygroundError, Result};
use std::io::Write;
use std::thread;
use std::time::Duration;

/// Dots printed while "talking to the server".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub ticks: u32,
    pub tick: Duration,
}

impl Latency {
    pub const NONE: Latency = Latency {
        ticks: 0,
        tick: Duration::ZERO,
    };

    pub fn simulate(&self, out: &mut dyn Write) -> Result<()> {
        writeln!(out)?;
        for _ in 0..self.ticks {
            write!(out, ".")?;
            out.flush()?;
            thread::sleep(self.tick);
        }
        Ok(())
    }
}

impl From<&NetworkConfig> for Latency {
    fn from(config: &NetworkConfig) -> Self {
        Self {
            ticks: config.ticks,
            tick: Duration::from_millis(config.tick_ms),
        }
    }
}

pub trait Network {
    fn log_in(&mut self, out: &mut dyn Write) -> Result<bool>;
    fn send_data(&mut self, data: &[u8], out: &mut dyn Write) -> Result<bool>;
    fn log_out(&mut self, out: &mut dyn Write) -> Result<()>;

    /// The template method.
    fn post(&mut self, message: &str, out: &mut dyn Write) -> Result<bool> {
        if !self.log_in(out)? {
            return Ok(false);
        }
        let sent = self.send_data(message.as_bytes(), out)?;
        self.log_out(out)?;
        Ok(sent)
    }
}

#[derive(Debug, Clone)]
struct Account {
    user_name: String,
    password: String,
    latency: Latency,
}

impl Account {
    fn check_parameters(&self, network: &str, out: &mut dyn Write) -> Result<bool> {
        writeln!(out, "\nChecking user's parameters")?;
        writeln!(out, "Name: {}", self.user_name)?;
        write!(out, "Password: {}", "*".repeat(self.password.chars().count()))?;
        self.latency.simulate(out)?;
        writeln!(out, "\n\nLogIn success on {network}")?;
        Ok(true)
    }

    fn publish(&self, network: &str, data: &[u8], out: &mut dyn Write) -> Result<bool> {
        writeln!(
            out,
            "Message: '{}' was posted on {network}",
            String::from_utf8_lossy(data)
        )?;
        Ok(true)
    }

    fn sign_out(&self, network: &str, out: &mut dyn Write) -> Result<()> {
        writeln!(out, "User: '{}' was logged out from {network}", self.user_name)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Facebook {
    account: Account,
}

impl Facebook {
    pub fn new(user_name: impl Into<String>, password: impl Into<String>, latency: Latency) -> Self {
        Self {
            account: Account {
                user_name: user_name.into(),
                password: password.into(),
                latency,
            },
        }
    }
}

impl Network for Facebook {
    fn log_in(&mut self, out: &mut dyn Write) -> Result<bool> {
        self.account.check_parameters("Facebook", out)
    }

    fn send_data(&mut self, data: &[u8], out: &mut dyn Write) -> Result<bool> {
        self.account.publish("Facebook", data, out)
    }

    fn log_out(&mut self, out: &mut dyn Write) -> Result<()> {
        self.account.sign_out("Facebook", out)
    }
}

#[derive(Debug, Clone)]
pub struct Twitter {
    account: Account,
}

impl Twitter {
    pub fn new(user_name: impl Into<String>, password: impl Into<String>, latency: Latency) -> Self {
        Self {
            account: Account {
                user_name: user_name.into(),
                password: password.into(),
                latency,
            },
        }
    }
}

impl Network for Twitter {
    fn log_in(&mut self, out: &mut dyn Write) -> Result<bool> {
        self.account.check_parameters("Twitter", out)
    }

    fn send_data(&mut self, data: &[u8], out: &mut dyn Write) -> Result<bool> {
        self.account.publish("Twitter", data, out)
    }

    fn log_out(&mut self, out: &mut dyn Write) -> Result<()> {
        self.account.sign_out("Twitter", out)
    }
}

/// Maps the menu answer to a network: 1 is Facebook, 2 is Twitter.
pub fn network_for_choice(
    choice: &str,
    user_name: &str,
    password: &str,
    latency: Latency,
) -> Result<Box<dyn Network>> {
    match choice.trim() {
        "1" => Ok(Box::new(Facebook::new(user_name, password, latency))),
        "2" => Ok(Box::new(Twitter::new(user_name, password, latency))),
        other => Err(PlaygroundError::invalid_choice(other, "1 (Facebook) or 2 (Twitter)")),
    }
}
