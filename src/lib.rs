//! # Pattern Playground
//!
//! Runnable Gang of Four design patterns, one module per pattern:
//!
//! ## Behavioral
//! - Chain of Responsibility: login middleware (`behavioral::chain`)
//! - Command: copy/cut/paste with undo (`behavioral::command`)
//! - Observer: editor events and listeners (`behavioral::observer`)
//! - State: media player (`behavioral::state`)
//! - Strategy: payment methods (`behavioral::strategy`)
//! - Template Method: social network posting (`behavioral::template`)
//!
//! ## Creational
//! - Abstract Factory: furniture families (`creational::abstract_factory`)
//! - Builder: cars and their manuals (`creational::builder`)
//! - Factory Method: product fabrics (`creational::factory_method`)
//! - Prototype: cloned shapes (`creational::prototype`)
//!
//! ## Structural
//! - Adapter: square pegs in round holes (`structural::adapter`)
//! - Bridge: remotes and devices (`structural::bridge`)
//! - Composite: compound shapes (`structural::composite`)
//! - Decorator: encrypted, compressed data sources (`structural::decorator`)
//! - Facade: video conversion (`structural::facade`)
//! - Flyweight: a forest of shared tree types (`structural::flyweight`)
//! - Proxy: a caching video downloader (`structural::proxy`)
//!
//! Run a demo with: `cargo run --bin <pattern>`

pub mod behavioral;
pub mod cache;
pub mod config;
pub mod console;
pub mod creational;
pub mod error;
pub mod logging;
pub mod raster;
pub mod structural;

pub use error::{PlaygroundError, Result};
