use std::ops::{Div, Mul, Neg};

use serde::{Deserialize, Serialize};

use super::Vector;

/// Width and height in editor units. May be negative for rectangles built from an inverted drag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const EMPTY: Self = Self { width: 0.0, height: 0.0 };

    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn is_empty(self) -> bool {
        self == Self::EMPTY
    }

    /// Both dimensions strictly positive and finite.
    pub fn is_positive(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }
}

impl Neg for Size {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.width, -self.height)
    }
}

impl Mul<f64> for Size {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.width * rhs, self.height * rhs)
    }
}

impl Div<f64> for Size {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.width / rhs, self.height / rhs)
    }
}

impl From<Vector> for Size {
    fn from(v: Vector) -> Self {
        Self::new(v.x, v.y)
    }
}
