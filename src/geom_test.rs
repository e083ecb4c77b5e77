#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// --- Point ---

#[test]
fn point_distance_is_euclidean() {
    let a = Point::new(0.0, 0.0);
    let b = Point::new(3.0, 4.0);
    assert!(approx_eq(a.distance_to(b), 5.0));
    assert!(approx_eq(b.distance_to(a), 5.0));
}

#[test]
fn heading_to_uses_screen_axes() {
    let origin = Point::new(10.0, 10.0);
    assert!(approx_eq(origin.heading_to(Point::new(20.0, 10.0)), 0.0));
    assert!(approx_eq(origin.heading_to(Point::new(10.0, 20.0)), 90.0));
    assert!(approx_eq(origin.heading_to(Point::new(0.0, 10.0)).abs(), 180.0));
    assert!(approx_eq(origin.heading_to(Point::new(10.0, 0.0)), -90.0));
}

#[test]
fn advanced_moves_along_heading() {
    let p = Point::new(0.0, 0.0).advanced(90.0, 3.0);
    assert!(approx_eq(p.x, 0.0));
    assert!(approx_eq(p.y, 3.0));

    let q = Point::new(5.0, 5.0).advanced(180.0, 2.0);
    assert!(approx_eq(q.x, 3.0));
    assert!(approx_eq(q.y, 5.0));
}

// --- Viewport ---

#[test]
fn viewport_clamps_negative_sizes() {
    let v = Viewport::new(-10.0, 20.0);
    assert_eq!(v.width, 0.0);
    assert_eq!(v.height, 20.0);
    assert!(v.is_empty());
}

#[test]
fn viewport_default_is_empty() {
    assert!(Viewport::default().is_empty());
}

#[test]
fn viewport_center() {
    let v = Viewport::new(800.0, 600.0);
    assert_eq!(v.center(), Point::new(400.0, 300.0));
}

#[test]
fn is_beyond_respects_buffer_on_every_side() {
    let v = Viewport::new(800.0, 600.0);
    assert!(!v.is_beyond(Point::new(-100.0, 300.0), 100.0));
    assert!(v.is_beyond(Point::new(-100.5, 300.0), 100.0));
    assert!(v.is_beyond(Point::new(900.5, 300.0), 100.0));
    assert!(v.is_beyond(Point::new(400.0, -101.0), 100.0));
    assert!(v.is_beyond(Point::new(400.0, 701.0), 100.0));
    assert!(!v.is_beyond(Point::new(400.0, 300.0), 100.0));
}

// --- Angles ---

#[test]
fn normalize_wraps_into_range() {
    assert!(approx_eq(normalize_deg(370.0), 10.0));
    assert!(approx_eq(normalize_deg(-10.0), 350.0));
    assert!(approx_eq(normalize_deg(720.0), 0.0));
    assert!(normalize_deg(-1e-18) < 360.0);
}

#[test]
fn angle_delta_takes_short_way_round() {
    assert!(approx_eq(angle_delta_deg(350.0, 10.0), 20.0));
    assert!(approx_eq(angle_delta_deg(10.0, 350.0), -20.0));
    assert!(approx_eq(angle_delta_deg(0.0, 180.0), 180.0));
    assert!(approx_eq(angle_delta_deg(90.0, 90.0), 0.0));
}

#[test]
fn angle_between_is_unsigned() {
    assert!(approx_eq(angle_between_deg(10.0, 350.0), 20.0));
    assert!(approx_eq(angle_between_deg(-90.0, 270.0), 0.0));
}
