//! Default numeric constants for the fly simulation.

// ── Fly body ────────────────────────────────────────────────────

/// Sprite edge length in CSS pixels.
pub const FLY_SIZE_PX: f64 = 50.0;

/// Forward movement per animation frame, in CSS pixels.
pub const MOVEMENT_SPEED_PX: f64 = 3.0;

/// Cursor distance below which a fly flees.
pub const SCARE_DISTANCE_PX: f64 = 150.0;

/// How far outside the viewport a fly may drift before it steers back.
pub const OFFSCREEN_BUFFER_PX: f64 = 100.0;

// ── Heading noise ───────────────────────────────────────────────

/// Per-frame probability that a wandering fly changes course.
pub const TURN_PROBABILITY: f64 = 0.05;

/// Full width of the random wander turn in degrees (±30°).
pub const WANDER_SPREAD_DEG: f64 = 60.0;

/// Full width of the random flee jitter in degrees (±22.5°).
pub const FLEE_SPREAD_DEG: f64 = 45.0;

/// Fraction of the angular gap to the viewport center closed per frame
/// while out of bounds.
pub const CENTER_BLEND: f64 = 0.1;

// ── Population ──────────────────────────────────────────────────

/// Maximum concurrent user-spawned flies.
pub const MAX_EXTRA_FLIES: usize = 5;

/// Cursor position before the pointer first moves; far enough that nothing is scared.
pub const CURSOR_PARKED: f64 = -1000.0;

// ── Timing (milliseconds) ───────────────────────────────────────

pub const FIRST_APPEARANCE_MS: (f64, f64) = (5_000.0, 15_000.0);
pub const NEXT_APPEARANCE_MS: (f64, f64) = (15_000.0, 45_000.0);
pub const PRIMARY_ACTIVE_MS: (f64, f64) = (30_000.0, 120_000.0);
pub const STATIONARY_MS: (f64, f64) = (1_000.0, 5_000.0);
pub const MOVING_MS: (f64, f64) = (5_000.0, 15_000.0);
pub const EXTRA_LIFETIME_MS: (f64, f64) = (30_000.0, 60_000.0);

/// Delay between spawn and the start of the fade-in.
pub const FADE_IN_DELAY_MS: f64 = 100.0;

/// Fade-in duration (matches the sprite's CSS opacity transition).
pub const FADE_IN_MS: f64 = 1_000.0;

/// Time a retiring fly stays on screen while it fades out.
pub const FADE_OUT_MS: f64 = 1_500.0;
