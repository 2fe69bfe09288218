//! Abstract Factory: today's date picks the furniture family.
//!
//! Run with: cargo run --bin abstract_factory

use pattern_playground::console::banner;
use pattern_playground::creational::abstract_factory::{factory_for_day, AssembleCenter};
use pattern_playground::creational::today;
use pattern_playground::logging;

fn main() {
    logging::init_demo_logger();
    println!("{}\n", banner("Abstract Factory"));

    let factory = factory_for_day(today());
    for line in AssembleCenter::new(factory.as_ref()).assemble() {
        println!("{line}");
    }
}
