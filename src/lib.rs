pub mod tuple;
pub mod matrix;

pub mod color;
pub mod canvas;
pub mod ppm;

pub mod error;
pub mod projectile;
pub mod config;

pub use error::{ Error, Result };

/// Tolerance used by every approximate floating point comparison in the
/// crate.
pub const FEQ_EPSILON: f64 = 0.00001;

/// Compares two floats, allowing for accumulated rounding error.
pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < FEQ_EPSILON
}

#[test]
fn feq_tolerance() {
    assert!(feq(1.0, 1.000000000001));
    assert!(feq(0.1 + 0.2, 0.3));
    assert!(!feq(1.0, 1.0001));
}
