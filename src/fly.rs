//! Fly entity: spawning at a viewport edge and the per-frame motion update.
//!
//! A fly wanders along its heading, occasionally turning, pauses while it is
//! stationary, and bolts directly away from the cursor when it comes within
//! the scare distance. Drifting too far off screen bends the heading back
//! toward the viewport center a little each frame.
//!
//! Everything here is pure state transition over a caller-supplied RNG, so
//! the same code drives the browser and the unit tests.

#[cfg(test)]
#[path = "fly_test.rs"]
mod fly_test;

use rand::Rng;
use uuid::Uuid;

use crate::config::FlyConfig;
use crate::geom::{Point, Viewport, angle_delta_deg, normalize_deg};

/// Unique identifier for a fly.
pub type FlyId = Uuid;

/// Build a v4 id from the simulation's own RNG so seeded runs stay reproducible.
pub fn new_fly_id<R: Rng>(rng: &mut R) -> FlyId {
    uuid::Builder::from_random_bytes(rng.random()).into_uuid()
}

/// Who owns a fly's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The single fly driven by the appearance cycle.
    Primary,
    /// A user-spawned fly that expires on its own.
    Extra,
}

/// Where a fly is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Active,
    /// Fading out before removal. A frozen fly no longer moves.
    Leaving { since_ms: f64, frozen: bool },
}

/// The viewport edge a fly enters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        match rng.random_range(0..4_u8) {
            0 => Self::Top,
            1 => Self::Right,
            2 => Self::Bottom,
            _ => Self::Left,
        }
    }

    /// Lower bound of the 60° entry cone pointing into the viewport.
    #[must_use]
    pub fn entry_heading_base(self) -> f64 {
        match self {
            Self::Top => 120.0,
            Self::Right => 210.0,
            Self::Bottom => 300.0,
            Self::Left => 30.0,
        }
    }
}

/// Width of the entry cone in degrees.
const ENTRY_SPREAD_DEG: f64 = 60.0;

/// What happened to a fly during one [`Fly::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepReport {
    pub moved: bool,
    pub scared: bool,
    pub turned: bool,
    pub steering_home: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fly {
    pub id: FlyId,
    pub role: Role,
    pub pos: Point,
    /// Heading in degrees, `[0, 360)`; 0° points along +x, 90° down the screen.
    pub heading_deg: f64,
    pub stationary: bool,
    pub spawned_at_ms: f64,
    pub phase: Phase,
}

impl Fly {
    #[must_use]
    pub fn new(id: FlyId, role: Role, pos: Point, heading_deg: f64, now_ms: f64) -> Self {
        Self {
            id,
            role,
            pos,
            heading_deg: normalize_deg(heading_deg),
            stationary: false,
            spawned_at_ms: now_ms,
            phase: Phase::Active,
        }
    }

    /// Place a new fly just outside a random viewport edge, heading inward.
    ///
    /// An empty viewport axis collapses to 0 rather than failing.
    pub fn spawn_at_edge<R: Rng>(
        id: FlyId,
        role: Role,
        viewport: Viewport,
        cfg: &FlyConfig,
        now_ms: f64,
        rng: &mut R,
    ) -> Self {
        let edge = Edge::random(rng);
        let size = cfg.fly_size_px;
        let along_x = rng.random::<f64>() * viewport.width;
        let along_y = rng.random::<f64>() * viewport.height;
        let pos = match edge {
            Edge::Top => Point::new(along_x, -size),
            Edge::Right => Point::new(viewport.width + size, along_y),
            Edge::Bottom => Point::new(along_x, viewport.height + size),
            Edge::Left => Point::new(-size, along_y),
        };
        let heading = edge.entry_heading_base() + rng.random::<f64>() * ENTRY_SPREAD_DEG;
        Self::new(id, role, pos, heading, now_ms)
    }

    #[must_use]
    pub fn is_primary(&self) -> bool {
        self.role == Role::Primary
    }

    #[must_use]
    pub fn is_leaving(&self) -> bool {
        matches!(self.phase, Phase::Leaving { .. })
    }

    #[must_use]
    pub fn is_frozen(&self) -> bool {
        matches!(self.phase, Phase::Leaving { frozen: true, .. })
    }

    /// Flip between stationary and moving. Returns the new `stationary` value.
    pub fn toggle_stationary(&mut self) -> bool {
        self.stationary = !self.stationary;
        self.stationary
    }

    /// Begin fading out. Retiring twice keeps the first timestamp.
    pub fn retire(&mut self, now_ms: f64, frozen: bool) {
        if !self.is_leaving() {
            self.phase = Phase::Leaving { since_ms: now_ms, frozen };
        }
    }

    /// Advance one animation frame.
    ///
    /// The forward step uses the heading the fly had when the frame began;
    /// a heading change made this frame shows up in motion on the next one.
    pub fn step<R: Rng>(&mut self, cursor: Point, viewport: Viewport, cfg: &FlyConfig, rng: &mut R) -> StepReport {
        let mut report = StepReport::default();
        let start_heading = self.heading_deg;

        if self.pos.distance_to(cursor) < cfg.scare_distance_px {
            report.scared = true;
            self.stationary = false;
            let away = self.pos.heading_to(cursor) + 180.0;
            self.heading_deg = away + jitter(rng, cfg.flee_spread_deg);
        } else if !self.stationary && rng.random::<f64>() < cfg.turn_probability {
            report.turned = true;
            self.heading_deg += jitter(rng, cfg.wander_spread_deg);
        }

        if !self.stationary {
            report.moved = true;
            self.pos = self.pos.advanced(start_heading, cfg.speed_px);
        }

        if viewport.is_beyond(self.pos, cfg.offscreen_buffer_px) {
            report.steering_home = true;
            let home = self.pos.heading_to(viewport.center());
            self.heading_deg += cfg.center_blend * angle_delta_deg(self.heading_deg, home);
        }

        self.heading_deg = normalize_deg(self.heading_deg);
        report
    }

    /// Eased opacity in `[0, 1]` for renderers that draw every frame.
    #[must_use]
    pub fn opacity(&self, now_ms: f64, cfg: &FlyConfig) -> f64 {
        match self.phase {
            Phase::Active => self.fade_in_level(now_ms, cfg),
            Phase::Leaving { since_ms, .. } => {
                let start = self.fade_in_level(since_ms, cfg);
                start * (1.0 - ramp(now_ms - since_ms, cfg.fade_out_ms))
            }
        }
    }

    /// Whether the fly should be shown at all. Sprites hand this to a CSS
    /// opacity transition instead of easing it themselves.
    #[must_use]
    pub fn is_shown(&self, now_ms: f64, cfg: &FlyConfig) -> bool {
        !self.is_leaving() && now_ms - self.spawned_at_ms >= cfg.fade_in_delay_ms
    }

    fn fade_in_level(&self, at_ms: f64, cfg: &FlyConfig) -> f64 {
        ramp(at_ms - self.spawned_at_ms - cfg.fade_in_delay_ms, cfg.fade_in_ms)
    }
}

/// Uniform noise in `[-spread/2, spread/2)`.
fn jitter<R: Rng>(rng: &mut R, spread: f64) -> f64 {
    (rng.random::<f64>() - 0.5) * spread
}

/// Linear 0→1 ramp over `duration`; a non-positive duration is a step.
fn ramp(elapsed: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return if elapsed >= 0.0 { 1.0 } else { 0.0 };
    }
    (elapsed / duration).clamp(0.0, 1.0)
}
