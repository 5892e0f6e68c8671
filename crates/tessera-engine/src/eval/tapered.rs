//! Middlegame/endgame score pair blended by game phase.

use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A score with separate middlegame and endgame components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tapered {
    /// Middlegame value.
    pub mg: i32,
    /// Endgame value.
    pub eg: i32,
}

/// Shorthand constructor: `S(mg, eg)`.
#[allow(non_snake_case)]
pub const fn S(mg: i32, eg: i32) -> Tapered {
    Tapered { mg, eg }
}

impl Tapered {
    /// Zero in both phases.
    pub const ZERO: Tapered = S(0, 0);

    /// Interpolate between the components.
    ///
    /// `phase` runs from 0 (bare endgame) to `max_phase` (full middlegame).
    pub fn blend(self, phase: i32, max_phase: i32) -> i32 {
        let phase = phase.clamp(0, max_phase);
        (self.mg * phase + self.eg * (max_phase - phase)) / max_phase
    }
}

impl Add for Tapered {
    type Output = Tapered;

    fn add(self, rhs: Tapered) -> Tapered {
        S(self.mg + rhs.mg, self.eg + rhs.eg)
    }
}

impl AddAssign for Tapered {
    fn add_assign(&mut self, rhs: Tapered) {
        *self = *self + rhs;
    }
}

impl Sub for Tapered {
    type Output = Tapered;

    fn sub(self, rhs: Tapered) -> Tapered {
        S(self.mg - rhs.mg, self.eg - rhs.eg)
    }
}

impl SubAssign for Tapered {
    fn sub_assign(&mut self, rhs: Tapered) {
        *self = *self - rhs;
    }
}

impl Neg for Tapered {
    type Output = Tapered;

    fn neg(self) -> Tapered {
        S(-self.mg, -self.eg)
    }
}

impl Mul<i32> for Tapered {
    type Output = Tapered;

    fn mul(self, rhs: i32) -> Tapered {
        S(self.mg * rhs, self.eg * rhs)
    }
}
