//! Creational patterns: who builds objects, and how.

pub mod abstract_factory;
pub mod builder;
pub mod factory_method;
pub mod prototype;

use chrono::{Datelike, Local};

/// Day of month used by the demos that pick a factory at runtime.
pub fn today() -> u32 {
    Local::now().day()
}
