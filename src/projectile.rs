use log::{ debug, trace, warn };

use crate::canvas::Canvas;
use crate::color::Color;
use crate::tuple::Tuple4D;

/// Upper bound on ticks run by a `Simulation` unless configured otherwise.
pub const DEFAULT_MAX_TICKS: usize = 100_000;

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Projectile {
    pub position: Tuple4D,
    pub velocity: Tuple4D,
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Environment {
    pub gravity: Tuple4D,
    pub wind: Tuple4D,
}

impl Projectile {
    pub fn new(position: Tuple4D, velocity: Tuple4D) -> Projectile {
        Projectile { position, velocity }
    }

    /// Whether the projectile has come down to (or below) the ground.
    pub fn landed(&self) -> bool {
        self.position.y <= 0.0
    }
}

impl Environment {
    pub fn new(gravity: Tuple4D, wind: Tuple4D) -> Environment {
        Environment { gravity, wind }
    }

    /// Advances a projectile by one tick, based on environmental conditions.
    ///
    /// The projectile returned from this function is the parameter `proj`
    /// subjected to one "tick" of time in the environment `env`.
    ///
    /// Velocity, gravity and wind are all represented as vectors.
    pub fn tick(&self, proj: &Projectile) -> Projectile {
        let position = proj.position + proj.velocity;
        let velocity = proj.velocity + self.gravity + self.wind;

        Projectile { position, velocity }
    }
}

/// Counters describing a finished simulation run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SimulationReport {
    /// Ticks advanced before the projectile landed (or the cap was hit).
    pub ticks: usize,

    /// Positions drawn onto the canvas.
    pub plotted: usize,

    /// Positions that fell outside the canvas and were not drawn.
    pub skipped: usize,

    /// Whether the projectile reached the ground.
    pub landed: bool,
}

/// Traces a projectile's flight onto a canvas.
#[derive(Copy, Clone, Debug)]
pub struct Simulation {
    pub environment: Environment,
    pub projectile: Projectile,
    pub max_ticks: usize,
}

impl Simulation {
    pub fn new(environment: Environment, projectile: Projectile) -> Simulation {
        Simulation { environment, projectile, max_ticks: DEFAULT_MAX_TICKS }
    }

    /// Ticks the projectile until it lands, plotting every position it
    /// passes through with `color`.
    ///
    /// The canvas y axis points down, so a position is drawn at
    /// `(x, canvas.height() - y)`, truncated to whole pixels. Positions that
    /// land outside the canvas are skipped.
    pub fn run(&self, canvas: &mut Canvas, color: Color) -> SimulationReport {
        let mut report = SimulationReport::default();
        let mut proj = self.projectile;

        while !proj.landed() {
            if report.ticks >= self.max_ticks {
                warn!("Projectile still airborne after {} ticks, stopping",
                    report.ticks);
                return report;
            }

            trace!("tick {}: position {}", report.ticks, proj.position);
            if plot(canvas, &proj.position, color) {
                report.plotted += 1;
            } else {
                report.skipped += 1;
            }

            proj = self.environment.tick(&proj);
            report.ticks += 1;
        }

        debug!("Projectile landed at {} after {} ticks", proj.position,
            report.ticks);
        report.landed = true;
        report
    }
}

fn plot(canvas: &mut Canvas, position: &Tuple4D, color: Color) -> bool {
    let x = position.x;
    let y = canvas.height() as f64 - position.y;

    if !(x >= 0.0 && y >= 0.0) {
        debug!("Position {} is off canvas", position);
        return false;
    }

    match canvas.write_pixel(x as usize, y as usize, color) {
        Ok(()) => true,
        Err(e) => {
            debug!("Skipping position {}: {}", position, e);
            false
        }
    }
}

#[cfg(test)]
const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0 };

#[test]
fn tick_moves_projectile() {
    let env = Environment::new(
        Tuple4D::vector(0.0, -0.1, 0.0),
        Tuple4D::vector(-0.01, 0.0, 0.0),
    );
    let proj = Projectile::new(
        Tuple4D::point(0.0, 1.0, 0.0),
        Tuple4D::vector(1.0, 1.0, 0.0).normalize(),
    );

    let next = env.tick(&proj);
    let h = 1.0 / f64::sqrt(2.0);

    assert_eq!(next.position, Tuple4D::point(h, 1.0 + h, 0.0));
    assert_eq!(next.velocity, Tuple4D::vector(h - 0.01, h - 0.1, 0.0));
    assert!(next.position.is_point());
    assert!(next.velocity.is_vector());
    assert_eq!(proj.position, Tuple4D::point(0.0, 1.0, 0.0));
}

#[test]
fn simulation_lands() {
    let env = Environment::new(
        Tuple4D::vector(0.0, -0.1, 0.0),
        Tuple4D::vector(-0.01, 0.0, 0.0),
    );
    let proj = Projectile::new(
        Tuple4D::point(0.0, 1.0, 0.0),
        Tuple4D::vector(1.0, 1.0, 0.0).normalize(),
    );
    let mut canvas = Canvas::new(40, 20);

    let report = Simulation::new(env, proj).run(&mut canvas, RED);

    assert!(report.landed);
    assert!(report.ticks > 0);
    assert_eq!(report.plotted + report.skipped, report.ticks);
    assert_eq!(canvas.pixel_at(0, 19).unwrap(), RED);
}

#[test]
fn simulation_stops_at_cap() {
    let env = Environment::new(
        Tuple4D::vector(0.0, 0.0, 0.0),
        Tuple4D::vector(0.0, 0.0, 0.0),
    );
    let proj = Projectile::new(
        Tuple4D::point(0.0, 1.0, 0.0),
        Tuple4D::vector(0.0, 1.0, 0.0),
    );
    let mut sim = Simulation::new(env, proj);
    sim.max_ticks = 50;

    let report = sim.run(&mut Canvas::new(10, 10), Color::white());

    assert!(!report.landed);
    assert_eq!(report.ticks, 50);
}

#[test]
fn off_canvas_positions_are_skipped() {
    let mut canvas = Canvas::new(5, 5);

    assert!(!plot(&mut canvas, &Tuple4D::point(-1.0, 2.0, 0.0), RED));
    assert!(!plot(&mut canvas, &Tuple4D::point(7.0, 2.0, 0.0), RED));
    assert!(!plot(&mut canvas, &Tuple4D::point(1.0, 9.0, 0.0), RED));
    assert!(plot(&mut canvas, &Tuple4D::point(1.0, 2.0, 0.0), RED));
    assert_eq!(canvas.pixel_at(1, 3).unwrap(), RED);
}
