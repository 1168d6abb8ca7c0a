use std::fmt;
use std::ops::{ Add, Sub, Neg, Mul, Div };

use crate::feq;

/// A homogeneous coordinate, `(x, y, z, w)`.
///
/// Points and vectors share this one type and differ only in `w`: a point has
/// `w == 1.0`, a vector has `w == 0.0`. Arithmetic may produce other values of
/// `w` (adding two points gives `w == 2.0`), which are neither points nor
/// vectors; keeping point/vector arithmetic meaningful is up to the caller.
///
/// # Examples
///
/// ```
/// # use ray_tracer_core::tuple::Tuple4D;
/// let p = Tuple4D::point(4.0, -4.0, 3.0);
/// let v = Tuple4D::vector(1.0, 0.0, 0.0);
///
/// assert!((p - v).is_point());
/// assert_eq!(p - v, Tuple4D::point(3.0, -4.0, 3.0));
/// ```
#[derive(Debug, Default, Copy, Clone, PartialOrd)]
pub struct Tuple4D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64
}

/// Partial equality on two tuples.
///
/// Components are compared with `feq`, so values that differ only by
/// rounding error compare equal.
impl PartialEq for Tuple4D {
    fn eq(&self, other: &Tuple4D) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z) &&
            feq(self.w, other.w)
    }
}

impl Tuple4D {
    pub fn tuple(x: f64, y: f64, z: f64, w: f64) -> Tuple4D {
        Tuple4D { x, y, z, w }
    }

    pub fn point(x: f64, y: f64, z: f64) -> Tuple4D {
        Tuple4D { x, y, z, w: 1.0 }
    }

    pub fn vector(x: f64, y: f64, z: f64) -> Tuple4D {
        Tuple4D { x, y, z, w: 0.0 }
    }

    pub fn is_point(&self) -> bool {
        self.w == 1.0
    }

    pub fn is_vector(&self) -> bool {
        self.w == 0.0
    }

    /// The components in `x, y, z, w` order.
    pub fn to_array(&self) -> [f64; 4] {
        [self.x, self.y, self.z, self.w]
    }

    /// Euclidean length over all four components.
    ///
    /// `w` takes part in the sum, so for a proper vector this is the usual
    /// 3D length. Calling this on a point (or any tuple with `w != 0.0`)
    /// folds `w` into the result, which is rarely what a caller means.
    pub fn magnitude(&self) -> f64 {
        f64::sqrt(
            self.x.powi(2)
            + self.y.powi(2)
            + self.z.powi(2)
            + self.w.powi(2)
        )
    }

    /// Scales the tuple to a magnitude of `1.0`.
    ///
    /// A zero-length tuple is not checked for; its components become NaN.
    pub fn normalize(&self) -> Tuple4D {
        *self / self.magnitude()
    }

    pub fn dot(&self, other: &Tuple4D) -> f64 {
        self.x * other.x
            + self.y * other.y
            + self.z * other.z
            + self.w * other.w
    }

    /// The 3D cross product. `w` is ignored and the result is always a
    /// vector.
    pub fn cross(&self, other: &Tuple4D) -> Tuple4D {
        Tuple4D {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
            w: 0.0
        }
    }
}

impl From<[f64; 4]> for Tuple4D {
    fn from(c: [f64; 4]) -> Tuple4D {
        Tuple4D { x: c[0], y: c[1], z: c[2], w: c[3] }
    }
}

impl fmt::Display for Tuple4D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x, self.y, self.z, self.w)
    }
}

impl Add for Tuple4D {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            w: self.w + other.w
        }
    }
}

impl Sub for Tuple4D {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
            w: self.w - other.w
        }
    }
}

impl Neg for Tuple4D {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w
        }
    }
}

/// Implements scalar right-multiplication for a 4D tuple.
///
/// ```
/// use ray_tracer_core::tuple::Tuple4D;
///
/// let t = Tuple4D::tuple(1.0, -2.0, 3.0, -4.0);
/// assert_eq!(t * 3.5, Tuple4D::tuple(3.5, -7.0, 10.5, -14.0));
/// ```
impl Mul<f64> for Tuple4D {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
            w: self.w * other
        }
    }
}

/// Implements scalar left-multiplication for a 4D tuple.
///
/// ```rust
/// use ray_tracer_core::tuple::Tuple4D;
///
/// let t = Tuple4D::tuple(1.0, 2.0, 3.0, 4.0);
///
/// // (notice how the scalar is on the left)
/// assert_eq!(5.0 * t, Tuple4D::tuple(5.0, 10.0, 15.0, 20.0));
/// ```
impl Mul<Tuple4D> for f64 {
    type Output = Tuple4D;

    fn mul(self, other: Tuple4D) -> Tuple4D {
        other * self
    }
}

/// Divides each component by a scalar.
///
/// Division by zero is not guarded against and yields infinities or NaN.
impl Div<f64> for Tuple4D {
    type Output = Self;

    fn div(self, other: f64) -> Self {
        Self {
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
            w: self.w / other
        }
    }
}

/* Tests */

#[test]
fn point_has_w_one() {
    let p = Tuple4D::tuple(4.3, -4.2, 3.1, 1.0);

    assert!(p.is_point());
    assert!(!p.is_vector());
    assert_eq!(p, Tuple4D::point(4.3, -4.2, 3.1));
}

#[test]
fn vector_has_w_zero() {
    let v = Tuple4D::tuple(4.3, -4.2, 3.1, 0.0);

    assert!(v.is_vector());
    assert!(!v.is_point());
    assert_eq!(v, Tuple4D::vector(4.3, -4.2, 3.1));
}

#[test]
fn sum_of_points_is_neither() {
    let p = Tuple4D::point(1.0, 1.0, 1.0) + Tuple4D::point(1.0, 1.0, 1.0);

    assert!(!p.is_point());
    assert!(!p.is_vector());
}

#[test]
fn approximate_equality() {
    let a = Tuple4D::tuple(1.0, 2.0, 3.0, 0.0);
    let b = Tuple4D::tuple(1.000000001, 2.0, 3.0, 0.0);
    let c = Tuple4D::tuple(1.001, 2.0, 3.0, 0.0);

    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn add_tuples() {
    let a1 = Tuple4D::tuple(3.0, -2.0, 5.0, 1.0);
    let a2 = Tuple4D::tuple(-2.0, 3.0, 1.0, 0.0);

    assert_eq!(a1 + a2, Tuple4D::tuple(1.0, 1.0, 6.0, 1.0));
}

#[test]
fn add_then_sub_is_identity() {
    let a = Tuple4D::tuple(0.1, -7.3, 2.25, 1.0);
    let b = Tuple4D::tuple(9.9, 0.7, -3.0, 0.0);

    assert_eq!((a + b) - b, a);
    assert_eq!(-(-a), a);
}

#[test]
fn sub_points() {
    let p1 = Tuple4D::point(3.0, 2.0, 1.0);
    let p2 = Tuple4D::point(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Tuple4D::vector(-2.0, -4.0, -6.0));
}

#[test]
fn sub_vector_from_point() {
    let p = Tuple4D::point(3.0, 2.0, 1.0);
    let v = Tuple4D::vector(5.0, 6.0, 7.0);

    assert_eq!(p - v, Tuple4D::point(-2.0, -4.0, -6.0));
}

#[test]
fn sub_vectors() {
    let p1 = Tuple4D::vector(3.0, 2.0, 1.0);
    let p2 = Tuple4D::vector(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Tuple4D::vector(-2.0, -4.0, -6.0));
}

#[test]
fn sub_vector_from_zero() {
    let zero = Tuple4D::vector(0.0, 0.0, 0.0);
    let v = Tuple4D::vector(1.0, -2.0, 3.0);

    assert_eq!(zero - v, Tuple4D::vector(-1.0, 2.0, -3.0));
}

#[test]
fn neg_tuple() {
    let a = Tuple4D::tuple(1.0, -2.0, 3.0, -4.0);

    assert_eq!(-a, Tuple4D::tuple(-1.0, 2.0, -3.0, 4.0));
}

#[test]
fn neg_vector_is_vector() {
    assert!((-Tuple4D::vector(1.0, 2.0, 3.0)).is_vector());
}

#[test]
fn mul_scalar() {
    let a = Tuple4D::tuple(1.0, -2.0, 3.0, -4.0);

    assert_eq!(a * 3.5, Tuple4D::tuple(3.5, -7.0, 10.5, -14.0));
}

#[test]
fn mul_fraction() {
    let a = Tuple4D::tuple(1.0, -2.0, 3.0, -4.0);

    assert_eq!(a * 0.5, Tuple4D::tuple(0.5, -1.0, 1.5, -2.0));
}

#[test]
fn div_scalar() {
    let a = Tuple4D::tuple(1.0, -2.0, 3.0, -4.0);

    assert_eq!(a / 2.0, Tuple4D::tuple(0.5, -1.0, 1.5, -2.0));
}

#[test]
fn div_zero_is_infinite() {
    let a = Tuple4D::vector(1.0, -1.0, 0.0) / 0.0;

    assert_eq!(a.x, f64::INFINITY);
    assert_eq!(a.y, f64::NEG_INFINITY);
    assert!(a.z.is_nan());
}

#[test]
fn magnitude_unit() {
    assert_eq!(Tuple4D::vector(1.0, 0.0, 0.0).magnitude(), 1.0);
    assert_eq!(Tuple4D::vector(0.0, 1.0, 0.0).magnitude(), 1.0);
    assert_eq!(Tuple4D::vector(0.0, 0.0, 1.0).magnitude(), 1.0);
}

#[test]
fn magnitude_pos() {
    let v = Tuple4D::vector(1.0, 2.0, 3.0);

    assert_eq!(v.magnitude(), f64::sqrt(14.0));
}

#[test]
fn magnitude_neg() {
    let v = Tuple4D::vector(-1.0, -2.0, -3.0);

    assert_eq!(v.magnitude(), f64::sqrt(14.0));
}

#[test]
fn magnitude_includes_w() {
    let p = Tuple4D::point(0.0, 0.0, 0.0);

    assert_eq!(p.magnitude(), 1.0);
}

#[test]
fn normalize_clean() {
    let v = Tuple4D::vector(4.0, 0.0, 0.0);

    assert_eq!(v.normalize(), Tuple4D::vector(1.0, 0.0, 0.0));
}

#[test]
fn normalize_dirty() {
    let v = Tuple4D::vector(1.0, 2.0, 3.0);
    let e = Tuple4D::vector(
        1.0 / f64::sqrt(14.0),
        2.0 / f64::sqrt(14.0),
        3.0 / f64::sqrt(14.0)
    );

    assert_eq!(v.normalize(), e);
}

#[test]
fn normalized_magnitude_is_one() {
    for v in &[
        Tuple4D::vector(1.0, 2.0, 3.0),
        Tuple4D::vector(-0.3, 12.0, 7.5),
        Tuple4D::vector(0.0, 0.0, 1e-3),
    ] {
        assert!(crate::feq(v.normalize().magnitude(), 1.0));
    }
}

#[test]
fn normalize_zero_is_nan() {
    let n = Tuple4D::vector(0.0, 0.0, 0.0).normalize();

    assert!(n.x.is_nan());
}

#[test]
fn dot_vectors() {
    let a = Tuple4D::vector(1.0, 2.0, 3.0);
    let b = Tuple4D::vector(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b), 20.0);
}

#[test]
fn cross_vectors() {
    let a = Tuple4D::vector(1.0, 2.0, 3.0);
    let b = Tuple4D::vector(2.0, 3.0, 4.0);

    let c = Tuple4D::vector(-1.0, 2.0, -1.0);
    let d = Tuple4D::vector(1.0, -2.0, 1.0);

    assert_eq!(a.cross(&b), c);
    assert_eq!(b.cross(&a), d);
    assert_eq!(a.cross(&b), -b.cross(&a));
}

#[test]
fn cross_ignores_w() {
    let a = Tuple4D::tuple(1.0, 2.0, 3.0, 1.0);
    let b = Tuple4D::tuple(2.0, 3.0, 4.0, 1.0);

    assert!(a.cross(&b).is_vector());
    assert_eq!(a.cross(&b), Tuple4D::vector(-1.0, 2.0, -1.0));
}

#[test]
fn display_tuple() {
    assert_eq!(Tuple4D::point(1.0, 2.5, -3.0).to_string(), "(1, 2.5, -3, 1)");
}
