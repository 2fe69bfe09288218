//! Prototype: a cache of preconfigured shapes hands out copies.
//!
//! Run with: cargo run --bin prototype

use pattern_playground::console::banner;
use pattern_playground::creational::prototype::{
    is_same_object, BundledShapeCache, BIG_GREEN_CIRCLE, MEDIUM_BLUE_RECTANGLE,
};
use pattern_playground::logging;

fn main() -> anyhow::Result<()> {
    logging::init_demo_logger();
    println!("{}\n", banner("Prototype"));

    let cache = BundledShapeCache::new();
    let missing = || anyhow::anyhow!("prototype missing from cache");
    let shape1 = cache.get(BIG_GREEN_CIRCLE).ok_or_else(missing)?;
    let shape2 = cache.get(MEDIUM_BLUE_RECTANGLE).ok_or_else(missing)?;
    let shape3 = cache.get(MEDIUM_BLUE_RECTANGLE).ok_or_else(missing)?;

    if !is_same_object(shape1.as_ref(), shape2.as_ref()) && !shape1.same_as(shape2.as_ref()) {
        println!("Big green circle != Medium blue rectangle (yay!)");
    } else {
        println!("Big green circle == Medium blue rectangle (booo!)");
    }

    if !is_same_object(shape2.as_ref(), shape3.as_ref()) {
        println!("Medium blue rectangles are two different objects (yay!)");
        if shape2.same_as(shape3.as_ref()) {
            println!("And they are identical (yay!)");
        } else {
            println!("But they are not identical (booo!)");
        }
    } else {
        println!("Rectangle objects are the same (booo!)");
    }
    Ok(())
}
