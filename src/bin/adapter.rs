//! Adapter: square pegs go into round holes through an adapter.
//!
//! Run with: cargo run --bin adapter

use pattern_playground::console::banner;
use pattern_playground::logging;
use pattern_playground::structural::adapter::{RoundHole, RoundPeg, SquarePeg, SquarePegAdapter};

fn main() {
    logging::init_demo_logger();
    println!("{}\n", banner("Adapter"));

    let hole = RoundHole::new(5.0);
    if hole.fits(&RoundPeg::new(5.0)) {
        println!("Round peg r5 fits round hole r5.");
    }

    let small = SquarePegAdapter::new(SquarePeg::new(2.0));
    let large = SquarePegAdapter::new(SquarePeg::new(20.0));
    if hole.fits(&small) {
        println!("Square peg w2 fits round hole r5.");
    }
    if !hole.fits(&large) {
        println!("Square peg w20 does not fit into round hole r5.");
    }
}
