use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

use super::{Matrix, Vector};

/// A position on the canvas, in editor units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise minimum.
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y))
    }

    /// Component-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y))
    }

    /// The vector from the origin to this point.
    pub fn to_vector(self) -> Vector {
        Vector::new(self.x, self.y)
    }

    /// True if both coordinates are `<=` those of `other`.
    pub fn all_le(self, other: Self) -> bool {
        self.x <= other.x && self.y <= other.y
    }
}

impl Sub for Point {
    type Output = Vector;

    fn sub(self, rhs: Self) -> Vector {
        Vector::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<Vector> for Point {
    type Output = Self;

    fn add(self, rhs: Vector) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign<Vector> for Point {
    fn add_assign(&mut self, rhs: Vector) {
        *self = *self + rhs;
    }
}

impl Sub<Vector> for Point {
    type Output = Self;

    fn sub(self, rhs: Vector) -> Self {
        self + -rhs
    }
}

/// Row-vector convention: `p * m` applies `m` to `p`, including its translation.
impl Mul<Matrix> for Point {
    type Output = Self;

    fn mul(self, m: Matrix) -> Self {
        Self::new(
            self.x * m.m11 + self.y * m.m21 + m.offset_x,
            self.x * m.m12 + self.y * m.m22 + m.offset_y,
        )
    }
}
