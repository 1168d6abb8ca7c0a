use std::fs::File;
use std::io::{ BufWriter, Write };
use std::ops::{ Index, IndexMut };
use std::path::Path;

use log::info;

use crate::color::Color;
use crate::error::{ Error, Result };
use crate::ppm;

/// A canvas for drawing pixels.
///
/// Pixels are stored row-major with the origin in the top-left corner, so `y`
/// grows downward. The size is fixed when the canvas is created; every pixel
/// starts out as the background color.
///
/// Once drawing is finished, the `Canvas` can be serialized to a PPM image
/// with `to_ppm` or written straight to disk with `save`.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    width: usize,
    height: usize,

    /// Always exactly `width * height` long.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new black canvas with specified width and height.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows `usize`. Use `try_new` to handle
    /// that case.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas::with_background(width, height, Color::black())
    }

    /// Creates a new canvas with every pixel set to `background`.
    ///
    /// # Panics
    ///
    /// Panics under the same condition as `new`.
    pub fn with_background(width: usize, height: usize, background: Color)
        -> Canvas {
        match Canvas::try_with_background(width, height, background) {
            Ok(canvas) => canvas,
            Err(e) => panic!("{}", e),
        }
    }

    /// Fallible form of `new`.
    pub fn try_new(width: usize, height: usize) -> Result<Canvas> {
        Canvas::try_with_background(width, height, Color::black())
    }

    /// Fallible form of `with_background`.
    ///
    /// Returns `Error::CanvasTooLarge` when the pixel count does not fit in a
    /// `usize`. The pixels are allocated up front, so a canvas that does fit
    /// may still take a lot of memory.
    pub fn try_with_background(width: usize, height: usize, background: Color)
        -> Result<Canvas> {
        let len = width.checked_mul(height)
            .ok_or(Error::CanvasTooLarge { width, height })?;

        Ok(Canvas { width, height, pixels: vec![background; len] })
    }

    /// The width of the canvas, in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// The height of the canvas, in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    fn offset(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::PixelOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        Ok((y * self.width) + x)
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// `x` is the column and `y` the row of the pixel, both zero-indexed.
    /// Writing outside the canvas leaves it untouched and returns
    /// `Error::PixelOutOfBounds`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use ray_tracer_core::color::Color;
    /// # use ray_tracer_core::canvas::Canvas;
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, purple).unwrap();
    /// assert_eq!(canvas.pixel_at(4, 2).unwrap(), purple);
    /// assert!(canvas.write_pixel(8, 0, purple).is_err());
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, color: Color)
        -> Result<()> {
        let offset = self.offset(x, y)?;
        self.pixels[offset] = color;

        Ok(())
    }

    /// Reads a color from a location on the `Canvas`.
    ///
    /// Same addressing as `write_pixel`; out-of-bounds locations return
    /// `Error::PixelOutOfBounds`.
    pub fn pixel_at(&self, x: usize, y: usize) -> Result<Color> {
        let offset = self.offset(x, y)?;

        Ok(self.pixels[offset])
    }

    /// Iterates over the rows of the canvas, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        (0..self.height).map(move |y| {
            &self.pixels[y * self.width..(y + 1) * self.width]
        })
    }

    /// Serializes the canvas as a plain-text (P3) PPM image.
    pub fn to_ppm(&self) -> String {
        ppm::canvas_to_ppm(self)
    }

    /// Saves the canvas to a PPM file at `path`, replacing any existing file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut out = BufWriter::new(File::create(path)?);
        ppm::write_ppm(self, &mut out)?;
        out.flush()?;

        info!("Wrote {}x{} canvas to {}", self.width, self.height,
            path.display());
        Ok(())
    }
}

/// Unchecked pixel access by `(x, y)`.
///
/// Panics when the location is outside the canvas. Use `pixel_at` for a
/// fallible read.
impl Index<(usize, usize)> for Canvas {
    type Output = Color;

    fn index(&self, (x, y): (usize, usize)) -> &Color {
        match self.offset(x, y) {
            Ok(offset) => &self.pixels[offset],
            Err(e) => panic!("{}", e),
        }
    }
}

impl IndexMut<(usize, usize)> for Canvas {
    fn index_mut(&mut self, (x, y): (usize, usize)) -> &mut Color {
        match self.offset(x, y) {
            Ok(offset) => &mut self.pixels[offset],
            Err(e) => panic!("{}", e),
        }
    }
}

#[test]
fn new_canvas_is_black() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.width(), 10);
    assert_eq!(c.height(), 20);
    assert!(c.rows().flatten().all(|p| *p == Color::black()));
    assert_eq!(c.rows().count(), 20);
}

#[test]
fn canvas_with_background() {
    let c = Canvas::with_background(10, 20, Color::white());

    assert!(c.rows().flatten().all(|p| *p == Color::white()));
}

#[test]
fn size_survives_mutation() {
    let mut c = Canvas::new(2, 2);
    c.write_pixel(1, 1, Color::white()).unwrap();
    c[(0, 1)] = Color::white();

    assert_eq!((c.width(), c.height()), (2, 2));
    assert!(c.rows().all(|row| row.len() == 2));
    assert_eq!(c.to_ppm().lines().count(), 3 + 2);
}

#[test]
fn write_then_read() {
    let red = Color::rgb(1.0, 0.0, 0.0);
    let mut c = Canvas::new(10, 20);
    c.write_pixel(2, 3, red).unwrap();

    assert_eq!(c.pixel_at(2, 3).unwrap(), red);

    for y in 0..c.height() {
        for x in 0..c.width() {
            if (x, y) != (2, 3) {
                assert_eq!(c.pixel_at(x, y).unwrap(), Color::black());
            }
        }
    }
}

#[test]
fn out_of_bounds_access() {
    let mut c = Canvas::new(10, 20);

    assert!(matches!(
        c.write_pixel(10, 0, Color::white()),
        Err(Error::PixelOutOfBounds { x: 10, y: 0, width: 10, height: 20 })
    ));
    assert!(c.pixel_at(0, 20).is_err());
    assert_eq!(c, Canvas::new(10, 20));
}

#[test]
fn oversized_canvas_rejected() {
    assert!(matches!(
        Canvas::try_new(usize::MAX, 2),
        Err(Error::CanvasTooLarge { width: usize::MAX, height: 2 })
    ));
    assert!(Canvas::try_with_background(2, usize::MAX, Color::white()).is_err());
    assert_eq!(Canvas::try_new(3, 0).unwrap().rows().count(), 0);
}

#[test]
#[should_panic(expected = "more pixels than can be addressed")]
fn oversized_canvas_panics() {
    let _ = Canvas::new(usize::MAX, usize::MAX);
}

#[test]
fn index_canvas() {
    let teal = Color::rgb(0.0, 0.5, 0.5);
    let mut c = Canvas::new(4, 4);
    c[(1, 3)] = teal;

    assert_eq!(c[(1, 3)], teal);
    assert_eq!(c.pixel_at(1, 3).unwrap(), teal);
}

#[test]
#[should_panic(expected = "outside a 4x4 canvas")]
fn index_out_of_bounds_panics() {
    let c = Canvas::new(4, 4);
    let _ = c[(4, 0)];
}
