//! Plain `f64` value types for canvas geometry.
//!
//! All of these are `Copy` and compare exactly: no epsilon is applied anywhere, so two points
//! are equal only when both coordinates are bit-for-bit equal (modulo `-0.0 == 0.0`).

mod matrix;
mod point;
mod rect;
mod size;
mod vector;

pub mod hit_testing;

pub use matrix::Matrix;
pub use point::Point;
pub use rect::Rectangle;
pub use size::Size;
pub use vector::Vector;
