//! Plain-text (P3) PPM serialization.
//!
//! A P3 file is a three line header (magic, dimensions, maximum channel
//! value) followed by whitespace separated channel values. Lines are kept to
//! at most 70 columns, and every canvas row starts on a fresh line.

use std::io;
use std::io::Write;

use crate::canvas::Canvas;
use crate::color::Color;

/// Magic number identifying a plain-text PPM image.
pub const PPM_MAGIC: &str = "P3";

/// Maximum channel value written to the header; channels are scaled to it.
pub const PPM_MAX_COLOR: i64 = 255;

/// Longest line, in columns, that the pixel data may produce.
pub const PPM_LINE_WIDTH: usize = 70;

/// Lays out one canvas row as PPM lines, none wider than `PPM_LINE_WIDTH`.
///
/// Channel values form one flat stream, so a pixel's three channels may be
/// split across lines. An empty row produces no lines.
fn row_lines(row: &[Color]) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::with_capacity(PPM_LINE_WIDTH);

    let channels = row.iter().flat_map(|pixel| {
        let (r, g, b) = pixel.scaled_between(0, PPM_MAX_COLOR);
        [r, g, b]
    });

    for channel in channels {
        let token = channel.to_string();
        if !line.is_empty() {
            if line.len() + 1 + token.len() > PPM_LINE_WIDTH {
                lines.push(std::mem::take(&mut line));
            } else {
                line.push(' ');
            }
        }

        line.push_str(&token);
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

fn header(canvas: &Canvas) -> String {
    format!("{}\n{} {}\n{}\n", PPM_MAGIC, canvas.width(), canvas.height(),
        PPM_MAX_COLOR)
}

/// Writes `canvas` to `out` as a P3 image.
///
/// Every row starts on a fresh line and the output ends with a newline.
pub fn write_ppm<W: Write>(canvas: &Canvas, out: &mut W) -> io::Result<()> {
    out.write_all(header(canvas).as_bytes())?;

    for row in canvas.rows() {
        for line in row_lines(row) {
            writeln!(out, "{}", line)?;
        }
    }

    Ok(())
}

/// Serializes `canvas` to a P3 image held in a `String`.
///
/// Produces exactly the bytes `write_ppm` would.
///
/// # Examples
///
/// ```
/// # use ray_tracer_core::canvas::Canvas;
/// # use ray_tracer_core::ppm::canvas_to_ppm;
/// let ppm = canvas_to_ppm(&Canvas::new(5, 3));
/// let header: Vec<&str> = ppm.lines().take(3).collect();
/// assert_eq!(header, ["P3", "5 3", "255"]);
/// ```
pub fn canvas_to_ppm(canvas: &Canvas) -> String {
    let mut ppm = header(canvas);

    for row in canvas.rows() {
        for line in row_lines(row) {
            ppm.push_str(&line);
            ppm.push('\n');
        }
    }

    ppm
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(ppm: &str) -> Vec<&str> {
        ppm.split('\n').skip(3).collect()
    }

    #[test]
    fn header_lines() {
        let ppm = canvas_to_ppm(&Canvas::new(5, 3));
        let lines: Vec<&str> = ppm.split('\n').take(3).collect();

        assert_eq!(lines, ["P3", "5 3", "255"]);
    }

    #[test]
    fn pixel_data() {
        let mut c = Canvas::new(5, 3);
        c.write_pixel(0, 0, Color::rgb(1.5, 0.0, 0.0)).unwrap();
        c.write_pixel(2, 1, Color::rgb(0.0, 0.5, 0.0)).unwrap();
        c.write_pixel(4, 2, Color::rgb(-0.5, 0.0, 1.0)).unwrap();

        let ppm = canvas_to_ppm(&c);
        assert_eq!(&body(&ppm)[..3], [
            "255 0 0 0 0 0 0 0 0 0 0 0 0 0 0",
            "0 0 0 0 0 0 0 128 0 0 0 0 0 0 0",
            "0 0 0 0 0 0 0 0 0 0 0 0 0 0 255",
        ]);
    }

    #[test]
    fn long_lines_wrap() {
        let c = Canvas::with_background(10, 2, Color::rgb(1.0, 0.8, 0.6));
        let ppm = canvas_to_ppm(&c);

        assert_eq!(&body(&ppm)[..4], [
            "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204",
            "153 255 204 153 255 204 153 255 204 153 255 204 153",
            "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204",
            "153 255 204 153 255 204 153 255 204 153 255 204 153",
        ]);
    }

    #[test]
    fn no_line_exceeds_width() {
        let c = Canvas::with_background(37, 4, Color::rgb(0.5, 1.0, 0.04));
        let ppm = canvas_to_ppm(&c);

        assert!(ppm.lines().all(|l| l.len() <= PPM_LINE_WIDTH));
        let values = ppm.lines().skip(3)
            .flat_map(|l| l.split(' '))
            .count();
        assert_eq!(values, 37 * 4 * 3);
    }

    #[test]
    fn ends_with_newline() {
        let ppm = canvas_to_ppm(&Canvas::new(5, 3));

        assert!(ppm.ends_with('\n'));
        assert_eq!(ppm.split('\n').last(), Some(""));
        assert_eq!(ppm.lines().count(), 3 + 3);
    }

    #[test]
    fn pixel_split_across_lines() {
        let row = vec![Color::rgb(1.0, 0.8, 0.6); 6];
        let lines = row_lines(&row);

        assert_eq!(lines, [
            "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204",
            "153",
        ]);
        assert!(row_lines(&[]).is_empty());
    }

    #[test]
    fn empty_canvas_is_header_only() {
        assert_eq!(canvas_to_ppm(&Canvas::new(0, 0)), "P3\n0 0\n255\n");
    }
}
