//! Builder: a director assembles a car and a manual with the same steps.
//!
//! Run with: cargo run --bin builder

use anyhow::{Context, Result};
use pattern_playground::console::banner;
use pattern_playground::creational::builder::CarDirector;
use pattern_playground::logging;

fn main() -> Result<()> {
    logging::init_demo_logger();
    println!("{}\n", banner("Builder"));

    let director = CarDirector;
    let suv = director.construct_suv_car()?;
    println!("Car built:");
    println!("{}\n", serde_json::to_string_pretty(&suv).context("car is not serializable")?);

    let manual = director.construct_city_car_manual();
    println!("Car manual built:");
    print!("{}", manual.describe());
    Ok(())
}
