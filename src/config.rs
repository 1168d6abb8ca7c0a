use std::convert::TryFrom;
use std::fs;
use std::path::{ Path, PathBuf };

use log::info;
use serde::{ Serialize, Deserialize };

use crate::canvas::Canvas;
use crate::color::Color;
use crate::error::{ Error, Result };
use crate::projectile::{ Environment, Projectile, Simulation, DEFAULT_MAX_TICKS };
use crate::tuple::Tuple4D;

/// Settings for a projectile run, in a form ready to simulate.
///
/// Usually built from JSON through `SimulationConfig::load`; any field left
/// out of the file keeps its default value.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub canvas_width: usize,
    pub canvas_height: usize,

    /// Starting position of the projectile.
    pub start: Tuple4D,

    /// Launch direction. Normalized before `speed` is applied.
    pub direction: Tuple4D,
    pub speed: f64,

    pub gravity: Tuple4D,
    pub wind: Tuple4D,

    pub trail: Color,
    pub background: Color,

    pub max_ticks: usize,
    pub output: PathBuf,
}

impl Default for SimulationConfig {
    fn default() -> SimulationConfig {
        SimulationConfig {
            canvas_width: 900,
            canvas_height: 550,
            start: Tuple4D::point(0.0, 1.0, 0.0),
            direction: Tuple4D::vector(1.0, 1.8, 0.0),
            speed: 11.25,
            gravity: Tuple4D::vector(0.0, -0.1, 0.0),
            wind: Tuple4D::vector(-0.01, 0.0, 0.0),
            trail: Color::white(),
            background: Color::black(),
            max_ticks: DEFAULT_MAX_TICKS,
            output: PathBuf::from("projectile.ppm"),
        }
    }
}

impl SimulationConfig {
    /// Parses a configuration from a JSON document.
    pub fn from_json(json: &str) -> Result<SimulationConfig> {
        let raw: SimulationConfigJson = serde_json::from_str(json)?;
        SimulationConfig::try_from(raw)
    }

    /// Reads and parses a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<SimulationConfig> {
        let path = path.as_ref();
        let config = SimulationConfig::from_json(&fs::read_to_string(path)?)?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// The launch velocity: `direction` scaled to a length of `speed`.
    pub fn velocity(&self) -> Tuple4D {
        self.direction.normalize() * self.speed
    }

    pub fn simulation(&self) -> Simulation {
        let environment = Environment::new(self.gravity, self.wind);
        let projectile = Projectile::new(self.start, self.velocity());

        Simulation { environment, projectile, max_ticks: self.max_ticks }
    }

    /// A blank canvas of the configured size and background.
    ///
    /// Fails with `Error::CanvasTooLarge` if the size cannot be addressed.
    pub fn canvas(&self) -> Result<Canvas> {
        Canvas::try_with_background(self.canvas_width, self.canvas_height,
            self.background)
    }
}

/// On-disk layout of a `SimulationConfig`.
///
/// Points, vectors and colors are plain three element arrays.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfigJson {
    canvas_width: usize,
    canvas_height: usize,

    start: Vec<f64>,
    direction: Vec<f64>,
    speed: f64,

    gravity: Vec<f64>,
    wind: Vec<f64>,

    trail: Vec<f64>,
    background: Vec<f64>,

    max_ticks: usize,
    output: PathBuf,
}

impl Default for SimulationConfigJson {
    fn default() -> SimulationConfigJson {
        SimulationConfig::default().into()
    }
}

fn triple(field: &str, v: &[f64]) -> Result<[f64; 3]> {
    match *v {
        [a, b, c] => Ok([a, b, c]),
        _ => Err(Error::InvalidConfig(format!(
            "`{}` needs 3 components, found {}", field, v.len()
        ))),
    }
}

fn point(field: &str, v: &[f64]) -> Result<Tuple4D> {
    let [x, y, z] = triple(field, v)?;
    Ok(Tuple4D::point(x, y, z))
}

fn vector(field: &str, v: &[f64]) -> Result<Tuple4D> {
    let [x, y, z] = triple(field, v)?;
    Ok(Tuple4D::vector(x, y, z))
}

fn color(field: &str, v: &[f64]) -> Result<Color> {
    let [r, g, b] = triple(field, v)?;
    Ok(Color::rgb(r, g, b))
}

impl TryFrom<SimulationConfigJson> for SimulationConfig {
    type Error = Error;

    fn try_from(raw: SimulationConfigJson) -> Result<SimulationConfig> {
        let direction = vector("direction", &raw.direction)?;
        if direction.magnitude() == 0.0 {
            return Err(Error::InvalidConfig(
                "`direction` must not be the zero vector".to_string()
            ));
        }

        if raw.canvas_width.checked_mul(raw.canvas_height).is_none() {
            return Err(Error::CanvasTooLarge {
                width: raw.canvas_width,
                height: raw.canvas_height,
            });
        }

        Ok(SimulationConfig {
            canvas_width: raw.canvas_width,
            canvas_height: raw.canvas_height,
            start: point("start", &raw.start)?,
            direction,
            speed: raw.speed,
            gravity: vector("gravity", &raw.gravity)?,
            wind: vector("wind", &raw.wind)?,
            trail: color("trail", &raw.trail)?,
            background: color("background", &raw.background)?,
            max_ticks: raw.max_ticks,
            output: raw.output,
        })
    }
}

impl From<SimulationConfig> for SimulationConfigJson {
    fn from(config: SimulationConfig) -> SimulationConfigJson {
        let xyz = |t: Tuple4D| vec![t.x, t.y, t.z];
        let rgb = |c: Color| vec![c.r, c.g, c.b];

        SimulationConfigJson {
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
            start: xyz(config.start),
            direction: xyz(config.direction),
            speed: config.speed,
            gravity: xyz(config.gravity),
            wind: xyz(config.wind),
            trail: rgb(config.trail),
            background: rgb(config.background),
            max_ticks: config.max_ticks,
            output: config.output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        assert_eq!(SimulationConfig::from_json("{}").unwrap(),
            SimulationConfig::default());
    }

    #[test]
    fn partial_override() {
        let config = SimulationConfig::from_json(r#"{
            "canvas_width": 100,
            "wind": [0.0, 0.0, 0.5],
            "trail": [1.0, 0.0, 0.0]
        }"#).unwrap();

        assert_eq!(config.canvas_width, 100);
        assert_eq!(config.canvas_height, 550);
        assert_eq!(config.wind, Tuple4D::vector(0.0, 0.0, 0.5));
        assert_eq!(config.trail, Color::rgb(1.0, 0.0, 0.0));
    }

    #[test]
    fn wrong_arity_rejected() {
        let err = SimulationConfig::from_json(r#"{ "start": [1.0, 2.0] }"#)
            .unwrap_err();

        assert!(matches!(err, Error::InvalidConfig(ref msg) if msg.contains("start")));
    }

    #[test]
    fn zero_direction_rejected() {
        let err = SimulationConfig::from_json(r#"{ "direction": [0, 0, 0] }"#)
            .unwrap_err();

        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json() {
        assert!(matches!(SimulationConfig::from_json("{ nope"), Err(Error::Config(_))));
        assert!(matches!(
            SimulationConfig::from_json(r#"{ "colour": [1, 1, 1] }"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn velocity_has_speed() {
        let config = SimulationConfig::default();
        let v = config.velocity();

        assert!(v.is_vector());
        assert!(crate::feq(v.magnitude(), 11.25));
    }

    #[test]
    fn canvas_uses_background() {
        let mut config = SimulationConfig::default();
        config.canvas_width = 3;
        config.canvas_height = 2;
        config.background = Color::rgb(0.0, 0.0, 1.0);

        let canvas = config.canvas().unwrap();
        assert_eq!((canvas.width(), canvas.height()), (3, 2));
        assert_eq!(canvas.pixel_at(2, 1).unwrap(), config.background);
    }

    #[test]
    fn oversized_canvas_rejected() {
        let json = format!(r#"{{ "canvas_width": {}, "canvas_height": 3 }}"#,
            usize::MAX);
        assert!(matches!(
            SimulationConfig::from_json(&json),
            Err(Error::CanvasTooLarge { height: 3, .. })
        ));

        let mut config = SimulationConfig::default();
        config.canvas_width = usize::MAX;
        config.canvas_height = usize::MAX;
        assert!(matches!(config.canvas(), Err(Error::CanvasTooLarge { .. })));
    }
}
