use ray_tracer_core::canvas::Canvas;
use ray_tracer_core::color::Color;
use ray_tracer_core::config::SimulationConfig;
use ray_tracer_core::ppm::{ canvas_to_ppm, write_ppm, PPM_LINE_WIDTH };

#[test]
fn streamed_and_buffered_output_match() {
    let mut canvas = Canvas::new(23, 7);
    for i in 0..7 {
        canvas.write_pixel(i * 3, i, Color::rgb(0.1 * i as f64, 0.5, 1.0)).unwrap();
    }

    let mut streamed = Vec::new();
    write_ppm(&canvas, &mut streamed).unwrap();

    assert_eq!(String::from_utf8(streamed).unwrap(), canvas_to_ppm(&canvas));
    assert_eq!(canvas.to_ppm(), canvas_to_ppm(&canvas));
}

#[test]
fn every_row_starts_a_new_line() {
    // 5 pixels of "255 255 255" fill 59 columns, so a row never wraps and
    // each row must be exactly one line.
    let canvas = Canvas::with_background(5, 4, Color::white());
    let ppm = canvas_to_ppm(&canvas);
    let body: Vec<&str> = ppm.lines().skip(3).collect();

    assert_eq!(body.len(), 4);
    assert!(body.iter().all(|l| l.split(' ').count() == 15));
    assert!(body.iter().all(|l| l.len() <= PPM_LINE_WIDTH));
}

#[test]
fn projectile_trail_serializes() {
    let mut config = SimulationConfig::from_json(r#"{
        "canvas_width": 60,
        "canvas_height": 30,
        "speed": 2.0,
        "trail": [1.0, 0.0, 0.0]
    }"#).unwrap();
    config.max_ticks = 10_000;

    let mut canvas = config.canvas().unwrap();
    let report = config.simulation().run(&mut canvas, config.trail);
    assert!(report.landed);
    assert!(report.plotted > 0);

    let ppm = canvas.to_ppm();
    assert!(ppm.starts_with("P3\n60 30\n255\n"));
    assert!(ppm.contains("255 0 0"));
    assert!(ppm.ends_with('\n'));
}
