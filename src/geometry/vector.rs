use std::f64::consts::TAU;
use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

use super::{Matrix, Size};

/// A displacement between two [`Point`](super::Point)s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Vector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared length. Prefer this over [`Self::length`] for comparisons.
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction, or the zero vector unchanged.
    pub fn normalized(self) -> Self {
        let length = self.length();
        if length == 0.0 { self } else { self / length }
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Direction in radians, wrapped to `[0, 2π)`.
    pub fn angle(self) -> f64 {
        let angle = self.y.atan2(self.x);
        if angle < 0.0 { angle + TAU } else { angle }
    }

    pub fn abs(self) -> Self {
        Self::new(self.x.abs(), self.y.abs())
    }

    /// True if both components are strictly smaller than those of `other`.
    pub fn all_lt(self, other: Self) -> bool {
        self.x < other.x && self.y < other.y
    }

    /// Non-uniform scale taking `self` onto `rhs`, axis by axis.
    pub fn scale_to(self, rhs: Self) -> Matrix {
        Matrix::scale(rhs.x / self.x, rhs.y / self.y)
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Vector {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Vector {
        rhs * self
    }
}

impl Div<f64> for Vector {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

/// Linear part only; vectors ignore the matrix offset.
impl Mul<Matrix> for Vector {
    type Output = Self;

    fn mul(self, m: Matrix) -> Self {
        Self::new(self.x * m.m11 + self.y * m.m21, self.x * m.m12 + self.y * m.m22)
    }
}

impl From<Size> for Vector {
    fn from(size: Size) -> Self {
        Self::new(size.width, size.height)
    }
}
