use std::fmt;
use std::ops::{ Add, Sub, Mul };

use crate::feq;

/// An RGB color with `f64` channels.
///
/// Channels are nominally between 0.0 and 1.0, but nothing enforces that
/// range; intermediate results may be negative or exceed 1.0 until they are
/// scaled for output with `scaled_between`.
///
/// # Examples
///
/// Mixing light adds channels; filtering it through a surface multiplies
/// them:
///
/// ```
/// # use ray_tracer_core::color::Color;
/// let light = Color::rgb(1.0, 0.2, 0.4);
/// let surface = Color::rgb(0.9, 1.0, 0.1);
/// assert_eq!(light + surface, Color::rgb(1.9, 1.2, 0.5));
/// assert_eq!(light * surface, Color::rgb(0.9, 0.2, 0.04));
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Channels are compared with `feq`, so rounding noise left over from
/// arithmetic does not make two colors unequal.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.r, other.r) && feq(self.g, other.g) && feq(self.b, other.b)
    }
}

impl Color {
    pub fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    /// All channels at 0.0. Also the `Default`, and a new canvas' fill.
    pub fn black() -> Color {
        Color::rgb(0.0, 0.0, 0.0)
    }

    /// All channels at 1.0.
    pub fn white() -> Color {
        Color::rgb(1.0, 1.0, 1.0)
    }

    /// Channel-wise product of two colors, the same as `c1 * c2`.
    ///
    /// ```
    /// # use ray_tracer_core::color::Color;
    /// let yellow = Color::rgb(1.0, 1.0, 0.0);
    /// let magenta = Color::rgb(1.0, 0.0, 1.0);
    /// assert_eq!(Color::hadamard(&yellow, &magenta), Color::rgb(1.0, 0.0, 0.0));
    /// ```
    pub fn hadamard(c1: &Color, c2: &Color) -> Color {
        Color::rgb(c1.r * c2.r, c1.g * c2.g, c1.b * c2.b)
    }

    /// Scales each channel to an integer range.
    ///
    /// Each channel is multiplied by `hi` (not `hi - lo`), rounded half away
    /// from zero, then clamped to `lo..=hi`. With `(0, 255)` this gives the
    /// 8-bit values written to image files. Panics if `lo > hi`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ray_tracer_core::color::Color;
    /// let c = Color::rgb(0.0, 0.5, 1.5);
    /// assert_eq!(c.scaled_between(0, 255), (0, 128, 255));
    /// ```
    pub fn scaled_between(&self, lo: i64, hi: i64) -> (i64, i64, i64) {
        let scale = |channel: f64| {
            ((channel * hi as f64).round() as i64).clamp(lo, hi)
        };

        (scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl Add<Color> for Color {
    type Output = Color;

    fn add(self, other: Color) -> Color {
        Color::rgb(self.r + other.r, self.g + other.g, self.b + other.b)
    }
}

impl Sub<Color> for Color {
    type Output = Color;

    fn sub(self, other: Color) -> Color {
        Color::rgb(self.r - other.r, self.g - other.g, self.b - other.b)
    }
}

/// Scales every channel by the same factor.
impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, k: f64) -> Color {
        Color::rgb(self.r * k, self.g * k, self.b * k)
    }
}

impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, color: Color) -> Color {
        color * self
    }
}

/// See `Color::hadamard`.
impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, other: Color) -> Color {
        Color::hadamard(&self, &other)
    }
}

#[test]
fn color_components() {
    let c = Color::rgb(-0.5, 0.4, 1.7);

    assert_eq!(c.r, -0.5);
    assert_eq!(c.g, 0.4);
    assert_eq!(c.b, 1.7);
}

#[test]
fn default_is_black() {
    assert_eq!(Color::default(), Color::black());
    assert_eq!(Color::white(), Color::rgb(1.0, 1.0, 1.0));
}

#[test]
fn equality_tolerates_rounding() {
    let c = Color::rgb(0.1, 0.2, 0.3);

    assert_eq!(c, Color::rgb(0.1 + 0.000001, 0.2, 0.3 - 0.000001));
    assert_ne!(c, Color::rgb(0.1, 0.2, 0.3001));
}

#[test]
fn add_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);
    let c3 = Color { r: 1.6, g: 0.7, b: 1.0 };

    assert_eq!(c1 + c2, c3);
}

#[test]
fn subtract_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);
    let c3 = Color { r: 0.2, g: 0.5, b: 0.5 };

    assert_eq!(c1 - c2, c3);
}

#[test]
fn multiply_colors() {
    let c1 = Color::rgb(0.2, 0.3, 0.4);
    let c2 = Color { r: 0.4, g: 0.6, b: 0.8 };

    assert_eq!(c1 * 2.0, c2);
    assert_eq!(2.0 * c1, c2);
}

#[test]
fn schur_product() {
    let c1 = Color::rgb(1.0, 0.2, 0.4);
    let c2 = Color::rgb(0.9, 1.0, 0.1);

    assert_eq!(c1 * c2, Color::rgb(0.9, 0.2, 0.04));
}

#[test]
fn scaled_between_clamps() {
    assert_eq!(Color::rgb(0.0, 0.5, 1.5).scaled_between(0, 255), (0, 128, 255));
    assert_eq!(Color::rgb(-0.5, 1.0, 0.8).scaled_between(0, 255), (0, 255, 204));
    assert_eq!(Color::rgb(0.6, 0.6, 0.6).scaled_between(0, 255), (153, 153, 153));
}

#[test]
fn scaled_between_lower_bound() {
    assert_eq!(Color::rgb(0.01, 0.5, 2.0).scaled_between(10, 20), (10, 10, 20));
}

#[test]
fn display_color() {
    assert_eq!(Color::rgb(1.0, 0.5, -0.25).to_string(), "rgb(1, 0.5, -0.25)");
}
