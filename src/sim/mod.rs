//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering or platform dependencies
//!
//! The host calls [`tick`] once per fixed timestep and applies the returned
//! [`Effect`]s to its HUD/audio/render collaborators.

pub mod effects;
pub mod monster;
pub mod player;
pub mod state;
pub mod tick;

pub use effects::Effect;
pub use state::{
    ActivityMode, GameState, LandmarkKind, MonsterState, Objective, ObjectiveState, Outcome,
    PlayerState, RenderFrame, SessionPhase,
};
pub use tick::{TickInput, tick};
