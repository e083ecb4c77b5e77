//! Simulation context: the live flies, the shared cursor and the virtual clock.
//!
//! DESIGN
//! ======
//! `SimCore` owns everything the page scripts used to keep in globals. The
//! host calls [`SimCore::tick`] once per animation frame with the frame
//! timestamp; due timers fire first (each observing the clock at its own due
//! time), then every fly advances one step. Timer events name their target by
//! [`FlyId`], and an event whose fly is already gone does nothing.
//!
//! Two lifecycles run on the clock:
//!
//! - the primary cycle: absent → `ShowPrimary` → present → `RetirePrimary`
//!   (container hidden, fly frozen while it fades) → `RemovePrimary` → absent;
//! - extras: spawned on demand up to a cap, `RetireExtra` after their
//!   lifetime, `RemoveExtra` once faded.
//!
//! Every fly also flips its stationary flag on its own `ToggleStationary`
//! chain for as long as it exists.

#[cfg(test)]
#[path = "sim_test.rs"]
mod sim_test;

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::FlyConfig;
use crate::consts::CURSOR_PARKED;
use crate::fly::{Fly, FlyId, Role, new_fly_id};
use crate::geom::{Point, Viewport};
use crate::timer::TimerQueue;

/// Timer payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimEvent {
    ShowPrimary,
    RetirePrimary(FlyId),
    RemovePrimary(FlyId),
    ToggleStationary(FlyId),
    RetireExtra(FlyId),
    RemoveExtra(FlyId),
}

/// Result of a manual spawn request. Callers on the page ignore it; it exists
/// so the outcome is observable without scraping logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOutcome {
    Spawned(FlyId),
    CapReached,
    Disabled,
}

pub struct SimCore {
    pub config: FlyConfig,
    flies: Vec<Fly>,
    cursor: Point,
    viewport: Viewport,
    now_ms: f64,
    timers: TimerQueue<SimEvent>,
    rng: SmallRng,
    container_visible: bool,
    started: bool,
}

impl SimCore {
    #[must_use]
    pub fn new(config: FlyConfig, seed: u64) -> Self {
        Self {
            config,
            flies: Vec::new(),
            cursor: Point::new(CURSOR_PARKED, CURSOR_PARKED),
            viewport: Viewport::default(),
            now_ms: 0.0,
            timers: TimerQueue::new(),
            rng: SmallRng::seed_from_u64(seed),
            container_visible: false,
            started: false,
        }
    }

    /// Kick off the primary appearance cycle. Later calls are ignored.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.schedule_next_appearance(true);
    }

    // --- Inputs ---

    pub fn set_cursor(&mut self, cursor: Point) {
        self.cursor = cursor;
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// One animation frame: fire due timers, then move every fly.
    pub fn tick(&mut self, now_ms: f64) {
        self.advance_to(now_ms);
        self.step_flies();
    }

    /// Fire every timer due at or before `now_ms`. The clock never runs backwards.
    pub fn advance_to(&mut self, now_ms: f64) {
        while let Some((due_ms, event)) = self.timers.pop_due(now_ms) {
            self.now_ms = self.now_ms.max(due_ms);
            self.handle(event);
        }
        self.now_ms = self.now_ms.max(now_ms);
    }

    /// Advance every fly that is not frozen by one step.
    pub fn step_flies(&mut self) {
        for fly in self.flies.iter_mut().filter(|f| !f.is_frozen()) {
            fly.step(self.cursor, self.viewport, &self.config, &mut self.rng);
        }
    }

    /// Spawn one user-requested fly, subject to the debug switch and the cap.
    pub fn spawn_extra(&mut self) -> SpawnOutcome {
        if !self.config.debug_spawn_enabled {
            log::info!("manual fly spawning is disabled");
            return SpawnOutcome::Disabled;
        }
        if self.extra_count() >= self.config.max_extra_flies {
            log::info!("already at the maximum of {} extra flies", self.config.max_extra_flies);
            return SpawnOutcome::CapReached;
        }

        let id = self.spawn(Role::Extra);
        let lifetime = self.config.extra_lifetime.sample(&mut self.rng);
        self.timers.schedule(self.now_ms + lifetime, SimEvent::RetireExtra(id));
        log::info!("an extra fly appeared");
        SpawnOutcome::Spawned(id)
    }

    // --- Queries ---

    #[must_use]
    pub fn flies(&self) -> &[Fly] {
        &self.flies
    }

    #[must_use]
    pub fn fly(&self, id: FlyId) -> Option<&Fly> {
        self.flies.iter().find(|f| f.id == id)
    }

    #[must_use]
    pub fn primary(&self) -> Option<&Fly> {
        self.flies.iter().find(|f| f.is_primary())
    }

    /// User-spawned flies still on the page, including ones fading out.
    #[must_use]
    pub fn extra_count(&self) -> usize {
        self.flies.iter().filter(|f| !f.is_primary()).count()
    }

    /// Whether the primary's container (or the shared canvas) should be shown.
    #[must_use]
    pub fn container_visible(&self) -> bool {
        self.container_visible
    }

    #[must_use]
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    #[must_use]
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Pending timer events, unordered.
    pub fn pending_events(&self) -> impl Iterator<Item = (f64, &SimEvent)> {
        self.timers.pending()
    }

    // --- Timer handling ---

    fn handle(&mut self, event: SimEvent) {
        match event {
            SimEvent::ShowPrimary => self.show_primary(),
            SimEvent::RetirePrimary(id) => {
                let now = self.now_ms;
                self.container_visible = false;
                if let Some(fly) = self.fly_mut(id) {
                    fly.retire(now, true);
                }
                let fade = self.config.fade_out_ms;
                self.timers.schedule(now + fade, SimEvent::RemovePrimary(id));
            }
            SimEvent::RemovePrimary(id) => {
                self.remove(id);
                self.schedule_next_appearance(false);
            }
            SimEvent::ToggleStationary(id) => self.toggle_stationary(id),
            SimEvent::RetireExtra(id) => {
                let now = self.now_ms;
                if let Some(fly) = self.fly_mut(id) {
                    fly.retire(now, false);
                    let fade = self.config.fade_out_ms;
                    self.timers.schedule(now + fade, SimEvent::RemoveExtra(id));
                }
            }
            SimEvent::RemoveExtra(id) => {
                self.remove(id);
            }
        }
    }

    fn show_primary(&mut self) {
        if self.primary().is_some() {
            log::warn!("primary fly already present; skipping appearance");
            return;
        }
        let id = self.spawn(Role::Primary);
        self.container_visible = true;
        let active = self.config.primary_active.sample(&mut self.rng);
        self.timers.schedule(self.now_ms + active, SimEvent::RetirePrimary(id));
        log::info!("the fly is out for {}s", (active / 1000.0).round());
    }

    fn schedule_next_appearance(&mut self, first: bool) {
        let range = if first { self.config.first_appearance } else { self.config.next_appearance };
        let delay = range.sample(&mut self.rng);
        log::info!("next appearance in {} seconds", (delay / 1000.0).round());
        self.timers.schedule(self.now_ms + delay, SimEvent::ShowPrimary);
    }

    /// Create a fly at a random edge and start its stationary cycle, which
    /// flips immediately so a new fly begins by sitting still.
    fn spawn(&mut self, role: Role) -> FlyId {
        let id = new_fly_id(&mut self.rng);
        let fly = Fly::spawn_at_edge(id, role, self.viewport, &self.config, self.now_ms, &mut self.rng);
        self.flies.push(fly);
        self.toggle_stationary(id);
        id
    }

    fn toggle_stationary(&mut self, id: FlyId) {
        let Some(fly) = self.fly_mut(id) else {
            return;
        };
        let range = if fly.toggle_stationary() { self.config.stationary } else { self.config.moving };
        let duration = range.sample(&mut self.rng);
        self.timers.schedule(self.now_ms + duration, SimEvent::ToggleStationary(id));
    }

    fn fly_mut(&mut self, id: FlyId) -> Option<&mut Fly> {
        self.flies.iter_mut().find(|f| f.id == id)
    }

    fn remove(&mut self, id: FlyId) -> Option<Fly> {
        let idx = self.flies.iter().position(|f| f.id == id)?;
        Some(self.flies.remove(idx))
    }
}
