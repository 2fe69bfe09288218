//! Factory Method: the fabric decides which product gets made.
//!
//! Run with: cargo run --bin factory_method

use pattern_playground::console::banner;
use pattern_playground::creational::factory_method::fabric_for_day;
use pattern_playground::creational::today;
use pattern_playground::logging;

fn main() {
    logging::init_demo_logger();
    println!("{}\n", banner("Factory Method"));

    println!("{}", fabric_for_day(today()).work_with_product());
}
