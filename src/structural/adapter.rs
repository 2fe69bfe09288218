//! Adapter
//!
//! A round hole only accepts things that have a radius. The adapter wraps a
//! square peg and reports the radius of the smallest circle around it.

pub trait Round {
    fn radius(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundHole {
    radius: f64,
}

impl RoundHole {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn fits(&self, peg: &dyn Round) -> bool {
        self.radius >= peg.radius()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundPeg {
    radius: f64,
}

impl RoundPeg {
    pub fn new(radius: f64) -> Self {
        Self { radius }
    }
}

impl Round for RoundPeg {
    fn radius(&self) -> f64 {
        self.radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquarePeg {
    width: f64,
}

impl SquarePeg {
    pub fn new(width: f64) -> Self {
        Self { width }
    }

    pub fn width(&self) -> f64 {
        self.width
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquarePegAdapter {
    peg: SquarePeg,
}

impl SquarePegAdapter {
    pub fn new(peg: SquarePeg) -> Self {
        Self { peg }
    }
}

impl Round for SquarePegAdapter {
    /// Half the diagonal of the square.
    fn radius(&self) -> f64 {
        ((self.peg.width() / 2.0).powi(2) * 2.0).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_round_peg_fits_same_radius() {
        assert!(RoundHole::new(5.0).fits(&RoundPeg::new(5.0)));
    }

    #[test]
    fn test_adapted_square_pegs() {
        let hole = RoundHole::new(5.0);
        assert!(hole.fits(&SquarePegAdapter::new(SquarePeg::new(2.0))));
        assert!(!hole.fits(&SquarePegAdapter::new(SquarePeg::new(20.0))));
    }

    #[test]
    fn test_adapter_radius_is_half_diagonal() {
        let adapter = SquarePegAdapter::new(SquarePeg::new(10.0));
        assert!((adapter.radius() - 50f64.sqrt()).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_square_fits_iff_half_diagonal_within_radius(
            radius in 0.1f64..100.0,
            width in 0.1f64..200.0,
        ) {
            let fits = RoundHole::new(radius).fits(&SquarePegAdapter::new(SquarePeg::new(width)));
            let half_diagonal = width * std::f64::consts::SQRT_2 / 2.0;
            // Stay clear of the boundary where float rounding could go either way.
            prop_assume!((half_diagonal - radius).abs() > 1e-9);
            prop_assert_eq!(fits, half_diagonal < radius);
        }
    }
}
