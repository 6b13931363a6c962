//! Data-driven game balance
//!
//! Every gameplay rate, radius and probability lives here rather than being
//! buried in the tick logic. Per-tick probabilities are calibrated for the
//! 60 Hz fixed timestep.

use serde::{Deserialize, Serialize};

/// Gameplay balance constants
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tuning {
    // === Player ===
    /// Walk speed in units/second
    pub walk_speed: f32,
    /// Yaw radians per pixel of horizontal mouse movement
    pub look_yaw_sensitivity: f32,
    /// Pitch radians per pixel of vertical mouse movement
    pub look_pitch_sensitivity: f32,

    // === Oxygen ===
    /// Oxygen units drained per elapsed second while not repairing
    pub oxygen_per_second: f32,

    // === Objectives ===
    /// Maximum planar distance for an interact to succeed
    pub interaction_radius: f32,
    /// Radio tower repair duration in seconds
    pub radio_repair_secs: f32,
    /// Rocket repair duration in seconds
    pub rocket_repair_secs: f32,
    /// Delay before a finished session resets, in seconds
    pub reset_delay_secs: f32,

    // === Monster ===
    /// Beyond this distance the monster is never rendered
    pub sense_radius: f32,
    /// Within this distance the AI is active
    pub active_radius: f32,
    /// Below this distance the player is caught
    pub kill_radius: f32,
    /// Below this distance the chase speed doubles
    pub near_radius: f32,
    /// Chase speed in units/second at range
    pub stalk_speed: f32,
    /// Chase speed in units/second when close
    pub rush_speed: f32,
    /// Dot-product threshold above which the player counts as watching
    pub watch_threshold: f32,
    /// Per-tick chance the monster moves anyway while watched
    pub watched_move_chance: f32,
    /// Per-tick chance of a ring teleport instead of a chase step
    pub teleport_chance: f32,
    /// Teleports only happen beyond this distance
    pub teleport_min_dist: f32,
    /// Teleport ring inner radius around the player
    pub teleport_ring_min: f32,
    /// Teleport ring outer radius around the player
    pub teleport_ring_max: f32,
    /// Per-tick chance the monster is rendered while in sense range
    pub flicker_visible_chance: f32,
    /// Seconds before another teleport vocalization may play
    pub vocal_cooldown_secs: f32,
    /// Base delay between ambient whispers, in seconds
    pub ambient_vocal_base_secs: f32,
    /// Random extra delay between ambient whispers, in seconds
    pub ambient_vocal_jitter_secs: f32,

    // === Hallucinations ===
    /// Per-tick chance of a random hallucination once off cooldown
    pub hallucination_chance: f32,
    /// Minimum seconds between hallucinations
    pub hallucination_cooldown_secs: f32,
    /// Shortest hallucination duration in seconds
    pub hallucination_min_secs: f32,
    /// Longest hallucination duration in seconds
    pub hallucination_max_secs: f32,

    // === Ambient audio levels ===
    /// Radio static loop volume at rest
    pub static_volume_base: f32,
    /// Radio static loop volume while fixing the radio
    pub static_volume_repair: f32,
    /// Radio static loop volume during a hallucination
    pub static_volume_hallucination: f32,
    /// Radio static burst volume under the capture jumpscare
    pub static_volume_jumpscare: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            walk_speed: 7.2,
            look_yaw_sensitivity: 0.0015,
            look_pitch_sensitivity: 0.0012,

            oxygen_per_second: 1.1,

            interaction_radius: 2.7,
            radio_repair_secs: 2.6,
            rocket_repair_secs: 2.5,
            reset_delay_secs: 7.0,

            sense_radius: 34.0,
            active_radius: 32.0,
            kill_radius: 1.7,
            near_radius: 7.0,
            stalk_speed: 3.12,
            rush_speed: 7.2,
            watch_threshold: 0.7,
            watched_move_chance: 0.05,
            teleport_chance: 0.02,
            teleport_min_dist: 8.0,
            teleport_ring_min: 8.0,
            teleport_ring_max: 18.0,
            flicker_visible_chance: 2.0 / 7.0,
            vocal_cooldown_secs: 4.0,
            ambient_vocal_base_secs: 5.0,
            ambient_vocal_jitter_secs: 7.0,

            hallucination_chance: 0.008,
            hallucination_cooldown_secs: 10.0,
            hallucination_min_secs: 1.9,
            hallucination_max_secs: 3.6,

            static_volume_base: 0.14,
            static_volume_repair: 0.25,
            static_volume_hallucination: 0.35,
            static_volume_jumpscare: 0.4,
        }
    }
}
