use std::ops::Mul;

use serde::{Deserialize, Serialize};

use super::Vector;

/// A 2×3 affine transform in row-vector convention.
///
/// `p * m` maps a point, and `m1 * m2` is the transform that applies `m1` first and then `m2`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub m11: f64,
    pub m12: f64,
    pub m21: f64,
    pub m22: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Matrix {
    pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);

    pub const fn new(m11: f64, m12: f64, m21: f64, m22: f64, offset_x: f64, offset_y: f64) -> Self {
        Self { m11, m12, m21, m22, offset_x, offset_y }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn translation(offset: Vector) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, offset.x, offset.y)
    }

    pub fn scale(scale_x: f64, scale_y: f64) -> Self {
        Self::new(scale_x, 0.0, 0.0, scale_y, 0.0, 0.0)
    }

    pub fn uniform_scale(scale: f64) -> Self {
        Self::scale(scale, scale)
    }

    /// Counter-clockwise in a y-up frame (clockwise on a y-down canvas).
    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Mean of the two axis scale factors; used to scale stroke thickness, which has no axis.
    pub fn average_scale(&self) -> f64 {
        (self.m11 + self.m22) / 2.0
    }
}

impl Mul for Matrix {
    type Output = Self;

    fn mul(self, m2: Self) -> Self {
        let m1 = self;
        Self::new(
            m1.m11 * m2.m11 + m1.m12 * m2.m21,
            m1.m11 * m2.m12 + m1.m12 * m2.m22,
            m1.m21 * m2.m11 + m1.m22 * m2.m21,
            m1.m21 * m2.m12 + m1.m22 * m2.m22,
            m1.offset_x * m2.m11 + m1.offset_y * m2.m21 + m2.offset_x,
            m1.offset_x * m2.m12 + m1.offset_y * m2.m22 + m2.offset_y,
        )
    }
}
