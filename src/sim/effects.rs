//! Presentation effects emitted by the simulation
//!
//! The sim never touches the DOM or the audio elements; it describes what
//! should happen and the host applies it. All message strings are fixed
//! in-fiction lines, so effects are cheap to emit and compare in tests.

use crate::audio::{Cue, LoopTrack};

/// A side effect for the host to apply after a tick
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Oxygen HUD line changed (already floored and clamped to 0)
    HudOxygen(u32),
    /// Current objective HUD line changed
    HudObjective(&'static str),
    /// Transient status/narrative message; empty string clears it
    HudMessage(&'static str),
    /// Play a one-shot audio cue
    PlayCue(Cue),
    /// Set a looping track's volume (pre-master, 0.0 - 1.0)
    SetLoopVolume(LoopTrack, f32),
    /// Set a looping track's playback rate (1.0 = normal)
    SetLoopRate(LoopTrack, f32),
    /// Pause all ambient loops (session ended)
    StopAmbient,
    /// Toggle the hallucination distortion filter
    SetDistortion(bool),
    /// The session was reinitialized; restart loops and redraw the HUD
    SessionReset,
}

/// Objective HUD lines, in milestone order
pub mod objective_text {
    pub const REPAIR_RADIO: &str = "Objective: Repair the radio tower";
    pub const REPAIR_ROCKET: &str = "Objective: Repair the rocket";
    pub const ESCAPE: &str = "Objective: Get to the rocket and escape!";
}

/// Fixed narrative/status lines
pub mod messages {
    pub const FIXING_RADIO: &str = "Fixing radio...";
    pub const REPAIRING_ROCKET: &str = "Repairing rocket...";
    pub const ESCAPED: &str = "You escape! ...but what followed you back?";
    pub const SUFFOCATED: &str = "You suffocated on the moon.";
    pub const CAUGHT: &str = "The horror found you.";
    pub const RADIO_WHISPER: &str = "A whisper: \"It doesn't want you to leave...\"";
    pub const ROCKET_VOICE: &str = "A voice on the radio: \"Don't look behind you.\"";
    pub const WORLD_WARPS: &str = "The world warps...";
}
