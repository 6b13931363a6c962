//! Monster behavior
//!
//! Runs once per simulation tick while the session is in normal play. All
//! randomness comes from the session RNG, and rolls are only drawn when the
//! branch that needs them is reached, so identical inputs replay identically.

use glam::Vec2;
use rand::Rng;

use crate::audio::Cue;
use crate::forward_from_yaw;
use crate::sim::effects::Effect;
use crate::sim::state::{ActivityMode, GameState, MonsterState};
use crate::tuning::Tuning;

/// Advance the monster by one tick. Returns true if it caught the player.
pub fn step(state: &mut GameState, dt: f32, effects: &mut Vec<Effect>) -> bool {
    let dist = state.monster_distance();
    let tuning = state.tuning.clone();

    update_visibility(state, dist, &tuning);
    update_ambient_vocal(state, dist, &tuning, effects);

    if state.monster.vocal_cooldown_ticks > 0 {
        state.monster.vocal_cooldown_ticks -= 1;
    }

    // The kill threshold is unconditional: watching the monster freezes its
    // movement, but never saves a player already inside the radius.
    match MonsterState::mode(dist, &tuning) {
        ActivityMode::KillRange => return true,
        ActivityMode::Dormant => return false,
        ActivityMode::Stalking | ActivityMode::Rushing => {}
    }

    // Being watched freezes the monster, with a small chance to move anyway.
    // The override roll is only drawn while actually watched.
    if is_watched(state, &tuning) {
        let roll: f32 = state.rng.random();
        if roll >= tuning.watched_move_chance {
            return false;
        }
    }

    // No teleport while the last vocalization is still ringing out
    if dist > tuning.teleport_min_dist && state.monster.vocal_cooldown_ticks == 0 {
        let roll: f32 = state.rng.random();
        if roll < tuning.teleport_chance {
            state.monster.pos = teleport_target(state.player.pos, &mut state.rng, &tuning);
            effects.push(Effect::PlayCue(Cue::MonsterVocal));
            state.monster.vocal_cooldown_ticks = crate::secs_to_ticks(tuning.vocal_cooldown_secs);
            return false;
        }
    }

    let speed = if dist < tuning.near_radius {
        tuning.rush_speed
    } else {
        tuning.stalk_speed
    };
    let dir = (state.player.pos - state.monster.pos).normalize_or_zero();
    state.monster.pos += dir * speed * dt;

    state.monster_distance() < tuning.kill_radius
}

/// Flicker the monster in and out while inside the sense radius; beyond it
/// the monster is never shown.
fn update_visibility(state: &mut GameState, dist: f32, tuning: &Tuning) {
    if dist < tuning.sense_radius {
        let roll: f32 = state.rng.random();
        state.monster.visible = roll < tuning.flicker_visible_chance;
    } else {
        state.monster.visible = false;
    }
}

/// Ambient whispers on a jittered interval, audible only while the monster
/// is inside the active radius.
fn update_ambient_vocal(state: &mut GameState, dist: f32, tuning: &Tuning, effects: &mut Vec<Effect>) {
    let in_range = dist < tuning.active_radius;
    if state.monster.ambient_vocal_ticks > 0 {
        state.monster.ambient_vocal_ticks -= 1;
        if state.monster.ambient_vocal_ticks == 0 {
            if in_range {
                effects.push(Effect::PlayCue(Cue::Whisper));
            }
            rearm_ambient_vocal(state, tuning);
        }
    } else if in_range {
        rearm_ambient_vocal(state, tuning);
    }
}

fn rearm_ambient_vocal(state: &mut GameState, tuning: &Tuning) {
    let jitter: f32 = state.rng.random();
    let secs = tuning.ambient_vocal_base_secs + jitter * tuning.ambient_vocal_jitter_secs;
    state.monster.ambient_vocal_ticks = crate::secs_to_ticks(secs);
}

/// Whether the player's view is pointed at the monster
fn is_watched(state: &GameState, tuning: &Tuning) -> bool {
    let to_monster = state.monster.pos - state.player.pos;
    let Some(to_monster) = to_monster.try_normalize() else {
        return false;
    };
    forward_from_yaw(state.player.yaw).dot(to_monster) > tuning.watch_threshold
}

/// Pick a reposition point on a ring around the player
pub fn teleport_target(player_pos: Vec2, rng: &mut impl Rng, tuning: &Tuning) -> Vec2 {
    let angle = rng.random_range(0.0..std::f32::consts::TAU);
    let radius = rng.random_range(tuning.teleport_ring_min..tuning.teleport_ring_max);
    player_pos + Vec2::new(angle.cos(), angle.sin()) * radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    /// Session with the player facing away from the monster and all random
    /// branches pinned off, so movement is the only behavior left.
    fn pinned_state(monster_dist: f32) -> GameState {
        let mut tuning = Tuning::default();
        tuning.teleport_chance = 0.0;
        tuning.flicker_visible_chance = 0.0;
        let mut state = GameState::with_tuning(3, tuning);
        state.player.pos = Vec2::ZERO;
        state.player.yaw = 0.0; // facing -z
        state.monster.pos = Vec2::new(0.0, monster_dist); // behind the player
        state
    }

    #[test]
    fn dormant_beyond_active_radius() {
        let mut state = pinned_state(40.0);
        let before = state.monster.pos;
        let mut effects = Vec::new();
        assert!(!step(&mut state, SIM_DT, &mut effects));
        assert_eq!(state.monster.pos, before);
    }

    #[test]
    fn stalks_at_mid_range_and_rushes_up_close() {
        let mut stalking = pinned_state(20.0);
        let mut effects = Vec::new();
        step(&mut stalking, SIM_DT, &mut effects);
        let moved = 20.0 - stalking.monster_distance();
        assert!((moved - stalking.tuning.stalk_speed * SIM_DT).abs() < 1e-3);

        let mut rushing = pinned_state(5.0);
        step(&mut rushing, SIM_DT, &mut effects);
        let moved = 5.0 - rushing.monster_distance();
        assert!((moved - rushing.tuning.rush_speed * SIM_DT).abs() < 1e-3);
    }

    #[test]
    fn freezes_while_watched() {
        let mut state = pinned_state(20.0);
        state.tuning.watched_move_chance = 0.0;
        // Turn around to face the monster at +z
        state.player.yaw = std::f32::consts::PI;
        let before = state.monster.pos;
        let mut effects = Vec::new();
        assert!(!step(&mut state, SIM_DT, &mut effects));
        assert_eq!(state.monster.pos, before);
    }

    #[test]
    fn watched_override_lets_it_creep() {
        let mut state = pinned_state(20.0);
        state.tuning.watched_move_chance = 1.0;
        state.player.yaw = std::f32::consts::PI;
        let mut effects = Vec::new();
        step(&mut state, SIM_DT, &mut effects);
        assert!(state.monster_distance() < 20.0);
    }

    #[test]
    fn forced_teleport_lands_on_the_ring() {
        let mut state = pinned_state(30.0);
        state.tuning.teleport_chance = 1.0;
        let mut effects = Vec::new();
        assert!(!step(&mut state, SIM_DT, &mut effects));
        let d = state.monster_distance();
        assert!(d >= state.tuning.teleport_ring_min && d < state.tuning.teleport_ring_max);
        assert!(effects.contains(&Effect::PlayCue(Cue::MonsterVocal)));
    }

    #[test]
    fn no_teleport_when_already_close() {
        let mut state = pinned_state(5.0);
        state.tuning.teleport_chance = 1.0;
        let mut effects = Vec::new();
        step(&mut state, SIM_DT, &mut effects);
        // Rushed instead of teleporting
        assert!(state.monster_distance() < 5.0);
        assert!(!effects.contains(&Effect::PlayCue(Cue::MonsterVocal)));
    }

    #[test]
    fn teleport_vocal_respects_cooldown() {
        let mut state = pinned_state(30.0);
        state.tuning.teleport_chance = 1.0;
        state.tuning.teleport_min_dist = 0.0;
        let mut effects = Vec::new();
        step(&mut state, SIM_DT, &mut effects);
        step(&mut state, SIM_DT, &mut effects);
        let vocals = effects
            .iter()
            .filter(|e| **e == Effect::PlayCue(Cue::MonsterVocal))
            .count();
        assert_eq!(vocals, 1);
    }

    #[test]
    fn visibility_flickers_only_inside_sense_radius() {
        let mut near = pinned_state(20.0);
        near.tuning.flicker_visible_chance = 1.0;
        let mut effects = Vec::new();
        step(&mut near, SIM_DT, &mut effects);
        assert!(near.monster.visible);

        let mut far = pinned_state(50.0);
        far.tuning.flicker_visible_chance = 1.0;
        far.monster.visible = true;
        step(&mut far, SIM_DT, &mut effects);
        assert!(!far.monster.visible);
    }

    #[test]
    fn catches_the_player_at_kill_range() {
        let mut state = pinned_state(1.75);
        let mut effects = Vec::new();
        assert!(step(&mut state, SIM_DT, &mut effects));
    }

    #[test]
    fn watching_does_not_save_a_player_in_kill_range() {
        // Staring the monster down freezes it, but inside the kill radius
        // the session still ends.
        let mut state = pinned_state(1.0);
        state.tuning.watched_move_chance = 0.0;
        state.player.yaw = std::f32::consts::PI; // facing the monster
        let mut effects = Vec::new();
        assert!(step(&mut state, SIM_DT, &mut effects));
    }
}
