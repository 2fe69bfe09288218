//! Behavioral patterns: how objects hand work to each other.

pub mod chain;
pub mod command;
pub mod observer;
pub mod state;
pub mod strategy;
pub mod template;
