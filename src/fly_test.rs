#![allow(clippy::float_cmp)]

use rand::SeedableRng;
use rand::rngs::SmallRng;

use super::*;
use crate::geom::angle_between_deg;

const EPSILON: f64 = 1e-9;

// =============================================================
// Helpers
// =============================================================

fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

fn viewport() -> Viewport {
    Viewport::new(800.0, 600.0)
}

fn far_cursor() -> Point {
    Point::new(-1000.0, -1000.0)
}

fn fly_at(x: f64, y: f64, heading: f64) -> Fly {
    Fly::new(Uuid::nil(), Role::Extra, Point::new(x, y), heading, 0.0)
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_fly_is_active_and_moving() {
    let fly = fly_at(10.0, 20.0, 45.0);
    assert_eq!(fly.phase, Phase::Active);
    assert!(!fly.stationary);
    assert!(!fly.is_primary());
}

#[test]
fn new_fly_normalizes_heading() {
    let fly = fly_at(0.0, 0.0, -90.0);
    assert!((fly.heading_deg - 270.0).abs() < EPSILON);
}

#[test]
fn fly_ids_are_reproducible_for_a_seed() {
    let a = new_fly_id(&mut rng(3));
    let b = new_fly_id(&mut rng(3));
    let c = new_fly_id(&mut rng(4));
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.get_version_num(), 4);
}

#[test]
fn spawn_starts_just_outside_an_edge_heading_inward() {
    let cfg = FlyConfig::default();
    let vp = viewport();
    let mut r = rng(11);
    for _ in 0..500 {
        let fly = Fly::spawn_at_edge(Uuid::nil(), Role::Primary, vp, &cfg, 0.0, &mut r);
        let size = cfg.fly_size_px;
        let (base, on_edge) = if fly.pos.y == -size {
            (120.0, (0.0..800.0).contains(&fly.pos.x))
        } else if fly.pos.x == vp.width + size {
            (210.0, (0.0..600.0).contains(&fly.pos.y))
        } else if fly.pos.y == vp.height + size {
            (300.0, (0.0..800.0).contains(&fly.pos.x))
        } else {
            assert_eq!(fly.pos.x, -size);
            (30.0, (0.0..600.0).contains(&fly.pos.y))
        };
        assert!(on_edge, "spawn point {:?} not along its edge", fly.pos);
        let offset = angle_delta_deg(base, fly.heading_deg);
        assert!((0.0..60.0 + EPSILON).contains(&offset), "heading {} outside cone at {base}", fly.heading_deg);
    }
}

#[test]
fn spawn_uses_every_edge() {
    let cfg = FlyConfig::default();
    let mut r = rng(5);
    let mut seen = [false; 4];
    for _ in 0..200 {
        let fly = Fly::spawn_at_edge(Uuid::nil(), Role::Extra, viewport(), &cfg, 0.0, &mut r);
        let idx = if fly.pos.y < 0.0 {
            0
        } else if fly.pos.x > 800.0 {
            1
        } else if fly.pos.y > 600.0 {
            2
        } else {
            3
        };
        seen[idx] = true;
    }
    assert_eq!(seen, [true; 4]);
}

#[test]
fn spawn_into_empty_viewport_is_safe() {
    let cfg = FlyConfig::default();
    let mut r = rng(9);
    for _ in 0..50 {
        let fly = Fly::spawn_at_edge(Uuid::nil(), Role::Extra, Viewport::default(), &cfg, 0.0, &mut r);
        assert!(fly.pos.x.is_finite() && fly.pos.y.is_finite());
        assert!(fly.pos.x.abs() <= cfg.fly_size_px && fly.pos.y.abs() <= cfg.fly_size_px);
    }
}

// =============================================================
// Stationary toggle / retire
// =============================================================

#[test]
fn toggle_flips_and_reports() {
    let mut fly = fly_at(0.0, 0.0, 0.0);
    assert!(fly.toggle_stationary());
    assert!(fly.stationary);
    assert!(!fly.toggle_stationary());
}

#[test]
fn retire_keeps_first_timestamp() {
    let mut fly = fly_at(0.0, 0.0, 0.0);
    fly.retire(100.0, true);
    fly.retire(500.0, false);
    assert_eq!(fly.phase, Phase::Leaving { since_ms: 100.0, frozen: true });
    assert!(fly.is_frozen());
}

// =============================================================
// Wandering
// =============================================================

#[test]
fn wandering_fly_moves_along_frame_start_heading() {
    let cfg = FlyConfig { turn_probability: 0.0, ..FlyConfig::default() };
    let mut fly = fly_at(400.0, 300.0, 0.0);
    let report = fly.step(far_cursor(), viewport(), &cfg, &mut rng(1));
    assert!(report.moved);
    assert!(!report.scared);
    assert!((fly.pos.x - 403.0).abs() < EPSILON);
    assert!((fly.pos.y - 300.0).abs() < EPSILON);
    assert_eq!(fly.heading_deg, 0.0);
}

#[test]
fn stationary_fly_does_not_move_or_turn() {
    let cfg = FlyConfig { turn_probability: 1.0, ..FlyConfig::default() };
    let mut fly = fly_at(400.0, 300.0, 90.0);
    fly.stationary = true;
    let report = fly.step(far_cursor(), viewport(), &cfg, &mut rng(1));
    assert!(!report.moved);
    assert!(!report.turned);
    assert_eq!(fly.pos, Point::new(400.0, 300.0));
    assert_eq!(fly.heading_deg, 90.0);
}

#[test]
fn wander_turn_rate_converges_near_five_percent() {
    let cfg = FlyConfig::default();
    let mut r = rng(42);
    let trials = 40_000;
    let mut turns = 0;
    for _ in 0..trials {
        let mut fly = fly_at(400.0, 300.0, 180.0);
        let before = fly.heading_deg;
        let report = fly.step(far_cursor(), viewport(), &cfg, &mut r);
        let change = angle_between_deg(before, fly.heading_deg);
        assert!(change <= 30.0 + EPSILON, "turned {change}°");
        if report.turned {
            turns += 1;
        } else {
            assert!(change < EPSILON);
        }
    }
    let rate = f64::from(turns) / f64::from(trials);
    assert!((rate - 0.05).abs() < 0.006, "turn rate {rate}");
}

// =============================================================
// Fleeing
// =============================================================

#[test]
fn scared_fly_heads_away_from_cursor() {
    let cfg = FlyConfig::default();
    let mut r = rng(7);
    for i in 0..2_000 {
        let angle = f64::from(i) * 0.37;
        let cursor = Point::new(400.0, 300.0).advanced(angle, 100.0);
        let mut fly = fly_at(400.0, 300.0, 0.0);
        let report = fly.step(cursor, viewport(), &cfg, &mut r);
        assert!(report.scared);
        let away = normalize_deg(angle + 180.0);
        let off = angle_between_deg(away, fly.heading_deg);
        assert!(off <= 22.5 + EPSILON, "flee heading {off}° off");
    }
}

#[test]
fn scared_fly_moves_even_when_stationary() {
    let cfg = FlyConfig::default();
    let mut fly = fly_at(400.0, 300.0, 0.0);
    fly.stationary = true;
    let report = fly.step(Point::new(420.0, 300.0), viewport(), &cfg, &mut rng(2));
    assert!(report.moved);
    assert!(!fly.stationary);
    assert_ne!(fly.pos, Point::new(400.0, 300.0));
}

#[test]
fn scare_radius_is_exclusive() {
    let cfg = FlyConfig::default();
    let mut fly = fly_at(400.0, 300.0, 0.0);
    fly.stationary = true;
    let report = fly.step(Point::new(550.0, 300.0), viewport(), &cfg, &mut rng(2));
    assert!(!report.scared);
    assert!(fly.stationary);
}

#[test]
fn repeated_flight_gains_distance() {
    let cfg = FlyConfig::default();
    let cursor = Point::new(400.0, 300.0);
    let mut fly = fly_at(410.0, 300.0, 0.0);
    let mut r = rng(3);
    for _ in 0..30 {
        fly.step(cursor, viewport(), &cfg, &mut r);
    }
    assert!(fly.pos.distance_to(cursor) > 10.0 + 30.0);
}

// =============================================================
// Boundary correction
// =============================================================

#[test]
fn offscreen_heading_bends_toward_center() {
    let cfg = FlyConfig::default();
    let vp = viewport();
    let mut r = rng(13);
    let spots = [
        Point::new(-150.0, 300.0),
        Point::new(950.0, 300.0),
        Point::new(400.0, -150.0),
        Point::new(400.0, 750.0),
        Point::new(-300.0, -300.0),
        Point::new(1000.0, 900.0),
    ];
    for spot in spots {
        for h in 0..72 {
            let mut fly = fly_at(spot.x, spot.y, f64::from(h) * 5.0);
            fly.stationary = true;
            let home = spot.heading_to(vp.center());
            let before = angle_between_deg(fly.heading_deg, home);
            let report = fly.step(far_cursor(), vp, &cfg, &mut r);
            assert!(report.steering_home);
            let after = angle_between_deg(fly.heading_deg, home);
            if before > EPSILON {
                assert!(after < before, "at {spot:?} heading {h}: {before} -> {after}");
            } else {
                assert!(after < EPSILON);
            }
        }
    }
}

#[test]
fn blend_crosses_the_zero_seam_the_short_way() {
    let cfg = FlyConfig::default();
    // Left of the viewport at center height: home direction is 0°.
    let mut fly = fly_at(-200.0, 300.0, 350.0);
    fly.stationary = true;
    fly.step(far_cursor(), viewport(), &cfg, &mut rng(1));
    assert!((fly.heading_deg - 351.0).abs() < 1e-6, "heading {}", fly.heading_deg);
}

#[test]
fn inside_buffer_no_correction() {
    let cfg = FlyConfig::default();
    let mut fly = fly_at(-50.0, 300.0, 180.0);
    fly.stationary = true;
    let report = fly.step(far_cursor(), viewport(), &cfg, &mut rng(1));
    assert!(!report.steering_home);
    assert_eq!(fly.heading_deg, 180.0);
}

// =============================================================
// Opacity
// =============================================================

#[test]
fn opacity_fades_in_after_delay() {
    let cfg = FlyConfig::default();
    let fly = fly_at(0.0, 0.0, 0.0);
    assert_eq!(fly.opacity(50.0, &cfg), 0.0);
    assert!((fly.opacity(600.0, &cfg) - 0.5).abs() < EPSILON);
    assert_eq!(fly.opacity(5_000.0, &cfg), 1.0);
    assert!(!fly.is_shown(50.0, &cfg));
    assert!(fly.is_shown(100.0, &cfg));
}

#[test]
fn opacity_fades_out_while_leaving() {
    let cfg = FlyConfig::default();
    let mut fly = fly_at(0.0, 0.0, 0.0);
    fly.retire(10_000.0, false);
    assert_eq!(fly.opacity(10_000.0, &cfg), 1.0);
    assert!((fly.opacity(10_750.0, &cfg) - 0.5).abs() < EPSILON);
    assert_eq!(fly.opacity(11_500.0, &cfg), 0.0);
    assert!(!fly.is_shown(10_000.0, &cfg));
}
