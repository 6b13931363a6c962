//! Game state and core simulation types
//!
//! One owned aggregate holds everything mutable in a session. No ambient
//! globals: the host owns a `GameState` and passes it to `tick`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;
use crate::secs_to_ticks;
use crate::tuning::Tuning;

/// Current phase of a session. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Normal exploration
    Playing,
    /// A timed repair is in flight; movement, look and monster AI pause
    Repairing,
    /// Sensory distortion overlay; everything but the end timer pauses
    Hallucinating,
    /// Session ended; frozen until the scheduled reset
    GameOver,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Escaped,
    Suffocated,
    Caught,
}

/// The strictly ordered objective chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Objective {
    AwaitingRadioRepair,
    AwaitingRocketRepair,
    AwaitingEscape,
    Escaped,
}

/// Milestone flags, monotonically set true within a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjectiveState {
    pub radio_fixed: bool,
    pub rocket_fixed: bool,
    pub escaped: bool,
}

impl ObjectiveState {
    /// Derive the current objective from the milestone flags
    pub fn current(&self) -> Objective {
        if self.escaped {
            Objective::Escaped
        } else if self.rocket_fixed {
            Objective::AwaitingEscape
        } else if self.radio_fixed {
            Objective::AwaitingRocketRepair
        } else {
            Objective::AwaitingRadioRepair
        }
    }
}

/// The two interactive landmarks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandmarkKind {
    RadioTower,
    Rocket,
}

/// A fixed-position interactive object
#[derive(Debug, Clone, Copy)]
pub struct Landmark {
    pub kind: LandmarkKind,
    pub pos: Vec2,
}

/// Player pose on the ground plane
#[derive(Debug, Clone, Copy)]
pub struct PlayerState {
    /// Position (x, z); eye height is `consts::EYE_HEIGHT`
    pub pos: Vec2,
    pub yaw: f32,
    pub pitch: f32,
}

impl PlayerState {
    fn spawn() -> Self {
        Self {
            pos: PLAYER_SPAWN,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

/// Monster activity implied by distance to the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivityMode {
    /// Outside the active radius; holds position, never vocalizes
    Dormant,
    /// Inside the active radius; stalks, may teleport-reposition
    Stalking,
    /// Close enough for the fast chase tier
    Rushing,
    /// Close enough to end the session
    KillRange,
}

/// Monster pose, visibility and vocalization timers
#[derive(Debug, Clone, Copy)]
pub struct MonsterState {
    /// Position (x, z); rendered at a fixed height
    pub pos: Vec2,
    /// Whether the render collaborator should show the monster this tick
    pub visible: bool,
    /// Ticks until another teleport vocalization may play
    pub(crate) vocal_cooldown_ticks: u64,
    /// Ticks until the next ambient whisper while in range
    pub(crate) ambient_vocal_ticks: u64,
}

impl MonsterState {
    fn spawn() -> Self {
        Self {
            pos: MONSTER_SPAWN,
            visible: false,
            vocal_cooldown_ticks: 0,
            ambient_vocal_ticks: 0,
        }
    }

    /// Activity mode for a given planar distance to the player
    pub fn mode(distance: f32, tuning: &Tuning) -> ActivityMode {
        if distance < tuning.kill_radius {
            ActivityMode::KillRange
        } else if distance < tuning.near_radius {
            ActivityMode::Rushing
        } else if distance < tuning.active_radius {
            ActivityMode::Stalking
        } else {
            ActivityMode::Dormant
        }
    }
}

/// Delayed state transitions, redesigned from free-running host timers into
/// queue entries drained by the tick. Each entry is scoped to the session
/// epoch it was scheduled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// A timed repair finishes
    RepairDone(LandmarkKind),
    /// The active hallucination ends
    HallucinationEnd,
    /// A finished session reinitializes
    AutoReset,
}

#[derive(Debug, Clone, Copy)]
pub struct ScheduledEvent {
    pub epoch: u64,
    pub due_tick: u64,
    pub kind: EventKind,
}

/// Per-frame snapshot for the external scene renderer
#[derive(Debug, Clone, Copy)]
pub struct RenderFrame {
    pub player_pos: Vec2,
    pub eye_height: f32,
    pub yaw: f32,
    pub pitch: f32,
    pub monster_pos: Vec2,
    pub monster_visible: bool,
    pub radio_tower_pos: Vec2,
    pub rocket_pos: Vec2,
    pub distortion: bool,
}

/// Complete game state (deterministic)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Bumped on every reset; stale scheduled events are dropped by epoch
    pub epoch: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: SessionPhase,
    /// Recorded once when the session ends
    pub outcome: Option<Outcome>,
    pub player: PlayerState,
    pub monster: MonsterState,
    pub objectives: ObjectiveState,
    /// Remaining oxygen in [0, 100]
    pub oxygen: f32,
    /// Whether the distortion filter is currently requested
    pub distortion: bool,
    pub tuning: Tuning,
    landmarks: [Landmark; 2],
    pub(crate) rng: Pcg32,
    pub(crate) pending: Vec<ScheduledEvent>,
    /// Fractional seconds accumulated toward the next oxygen decrement
    pub(crate) oxygen_accum: f32,
    pub(crate) ticks_since_hallucination: u64,
    /// Last emitted ambient playback rates, for effect deduplication
    pub(crate) last_heart_rate: f32,
    pub(crate) last_breath_rate: f32,
}

impl GameState {
    /// Create a new session with the given seed and default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self::new_session(seed, tuning, 0)
    }

    fn new_session(seed: u64, tuning: Tuning, epoch: u64) -> Self {
        // A fresh session starts with the hallucination cooldown already
        // elapsed, so random triggers are eligible from the first tick.
        let hallucination_head_start = secs_to_ticks(tuning.hallucination_cooldown_secs);
        Self {
            seed,
            epoch,
            time_ticks: 0,
            phase: SessionPhase::Playing,
            outcome: None,
            player: PlayerState::spawn(),
            monster: MonsterState::spawn(),
            objectives: ObjectiveState::default(),
            oxygen: OXYGEN_START,
            distortion: false,
            tuning,
            landmarks: [
                Landmark {
                    kind: LandmarkKind::RadioTower,
                    pos: RADIO_TOWER_POS,
                },
                Landmark {
                    kind: LandmarkKind::Rocket,
                    pos: ROCKET_POS,
                },
            ],
            rng: Pcg32::seed_from_u64(seed),
            pending: Vec::new(),
            oxygen_accum: 0.0,
            ticks_since_hallucination: hallucination_head_start,
            last_heart_rate: 0.0,
            last_breath_rate: 0.0,
        }
    }

    /// Reinitialize for a fresh session. The next seed is drawn from the old
    /// RNG so a seeded run stays reproducible across resets.
    pub fn reset(&mut self) {
        let seed: u64 = self.rng.random();
        let epoch = self.epoch + 1;
        *self = Self::new_session(seed, self.tuning.clone(), epoch);
        log::info!("Session reset (epoch {epoch}, seed {seed})");
    }

    pub fn landmark(&self, kind: LandmarkKind) -> &Landmark {
        match kind {
            LandmarkKind::RadioTower => &self.landmarks[0],
            LandmarkKind::Rocket => &self.landmarks[1],
        }
    }

    /// Planar distance from the player to a landmark
    pub fn distance_to(&self, kind: LandmarkKind) -> f32 {
        self.player.pos.distance(self.landmark(kind).pos)
    }

    /// Planar distance from the monster to the player
    pub fn monster_distance(&self) -> f32 {
        self.monster.pos.distance(self.player.pos)
    }

    /// Oxygen as the HUD shows it
    pub fn oxygen_percent(&self) -> u32 {
        self.oxygen.max(0.0).floor() as u32
    }

    /// Queue a delayed transition `delay_secs` from now, scoped to this epoch
    pub(crate) fn schedule(&mut self, kind: EventKind, delay_secs: f32) {
        self.pending.push(ScheduledEvent {
            epoch: self.epoch,
            due_tick: self.time_ticks + secs_to_ticks(delay_secs),
            kind,
        });
    }

    /// Remove due events in firing order, dropping any from a stale epoch
    pub(crate) fn take_due(&mut self) -> Vec<ScheduledEvent> {
        let epoch = self.epoch;
        self.pending.retain(|ev| ev.epoch == epoch);

        let now = self.time_ticks;
        let mut due: Vec<ScheduledEvent> = Vec::new();
        self.pending.retain(|ev| {
            if ev.due_tick <= now {
                due.push(*ev);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|ev| ev.due_tick);
        due
    }

    /// Cancel pending repair/hallucination timers; the auto-reset survives
    pub(crate) fn cancel_transient(&mut self) {
        self.pending.retain(|ev| ev.kind == EventKind::AutoReset);
    }

    /// Snapshot for the scene renderer
    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame {
            player_pos: self.player.pos,
            eye_height: EYE_HEIGHT,
            yaw: self.player.yaw,
            pitch: self.player.pitch,
            monster_pos: self.monster.pos,
            monster_visible: self.monster.visible,
            radio_tower_pos: self.landmark(LandmarkKind::RadioTower).pos,
            rocket_pos: self.landmark(LandmarkKind::Rocket).pos,
            distortion: self.distortion,
        }
    }
}
