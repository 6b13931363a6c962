//! Lunar Nightmare - a first-person lunar horror walking simulator
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player pose, objectives, oxygen, monster AI)
//! - `audio`: Audio cue/loop control over HtmlAudioElement
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//!
//! The crate owns game state only. Scene rendering, audio decoding and raw
//! input are external collaborators: the sim consumes a `TickInput` snapshot
//! per fixed timestep and returns `Effect`s for the host to apply.

pub mod audio;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::Settings;
pub use tuning::Tuning;

use glam::Vec2;

/// Fixed world constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz; the balance numbers below and in
    /// `Tuning` are per-frame probabilities calibrated at this cadence)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Half-extent of the walkable terrain square on both ground axes
    pub const TERRAIN_HALF_EXTENT: f32 = 58.0;
    /// Camera eye height above the ground plane
    pub const EYE_HEIGHT: f32 = 1.7;
    /// Pitch is clamped to ±(π/2 − this margin) to avoid gimbal flip
    pub const PITCH_MARGIN: f32 = 0.09;

    /// Landmark positions on the ground plane (x, z)
    pub const RADIO_TOWER_POS: Vec2 = Vec2::new(18.0, -8.0);
    pub const ROCKET_POS: Vec2 = Vec2::new(-19.0, -15.0);

    /// Session spawn points
    pub const PLAYER_SPAWN: Vec2 = Vec2::new(0.0, 10.0);
    pub const MONSTER_SPAWN: Vec2 = Vec2::new(12.0, -55.0);

    /// Oxygen meter starting value
    pub const OXYGEN_START: f32 = 100.0;
}

/// Horizontal forward vector for a yaw angle (yaw 0 faces −z)
#[inline]
pub fn forward_from_yaw(yaw: f32) -> Vec2 {
    Vec2::new(-yaw.sin(), -yaw.cos())
}

/// Horizontal right vector for a yaw angle
#[inline]
pub fn right_from_yaw(yaw: f32) -> Vec2 {
    Vec2::new(yaw.cos(), -yaw.sin())
}

/// Convert a duration in seconds to whole simulation ticks (rounds up so a
/// scheduled event never fires early)
#[inline]
pub fn secs_to_ticks(secs: f32) -> u64 {
    (secs.max(0.0) / consts::SIM_DT).ceil() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_faces_negative_z_at_zero_yaw() {
        let f = forward_from_yaw(0.0);
        assert!(f.x.abs() < 1e-6);
        assert!((f.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn right_is_perpendicular_to_forward() {
        for yaw in [0.0, 0.7, -1.3, 3.0] {
            let dot = forward_from_yaw(yaw).dot(right_from_yaw(yaw));
            assert!(dot.abs() < 1e-6, "yaw {yaw}: dot {dot}");
        }
    }

    #[test]
    fn secs_to_ticks_rounds_up() {
        assert_eq!(secs_to_ticks(1.0), 60);
        assert_eq!(secs_to_ticks(2.6), 156);
        assert_eq!(secs_to_ticks(0.001), 1);
        assert_eq!(secs_to_ticks(-5.0), 0);
    }
}
