//! Player look and movement

use glam::Vec2;

use crate::consts::{PITCH_MARGIN, TERRAIN_HALF_EXTENT};
use crate::sim::state::PlayerState;
use crate::sim::tick::TickInput;
use crate::tuning::Tuning;
use crate::{forward_from_yaw, right_from_yaw};

/// Apply accumulated mouse deltas to the view. Pitch is clamped short of
/// straight up/down so the view never flips.
pub fn apply_look(player: &mut PlayerState, dx: f32, dy: f32, tuning: &Tuning) {
    player.yaw -= dx * tuning.look_yaw_sensitivity;
    player.pitch -= dy * tuning.look_pitch_sensitivity;
    let limit = std::f32::consts::FRAC_PI_2 - PITCH_MARGIN;
    player.pitch = player.pitch.clamp(-limit, limit);
}

/// Move the player from held keys, then clamp to the terrain square.
///
/// Diagonal input is intentionally not normalized: holding two keys moves
/// faster than one. Pitch never affects movement; the player walks on the
/// ground plane regardless of where they look.
pub fn apply_movement(player: &mut PlayerState, input: &TickInput, dt: f32, tuning: &Tuning) {
    let fwd = forward_from_yaw(player.yaw);
    let right = right_from_yaw(player.yaw);

    let mut dir = Vec2::ZERO;
    if input.forward {
        dir += fwd;
    }
    if input.backward {
        dir -= fwd;
    }
    if input.left {
        dir -= right;
    }
    if input.right {
        dir += right;
    }

    player.pos += dir * tuning.walk_speed * dt;

    let half = TERRAIN_HALF_EXTENT;
    player.pos = player.pos.clamp(Vec2::splat(-half), Vec2::splat(half));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::state::GameState;

    fn input(forward: bool, backward: bool, left: bool, right: bool) -> TickInput {
        TickInput {
            forward,
            backward,
            left,
            right,
            ..TickInput::default()
        }
    }

    #[test]
    fn forward_at_zero_yaw_moves_negative_z() {
        let mut state = GameState::new(1);
        let start = state.player.pos;
        apply_movement(&mut state.player, &input(true, false, false, false), SIM_DT, &state.tuning);
        assert!(state.player.pos.y < start.y);
        assert!((state.player.pos.x - start.x).abs() < 1e-6);
    }

    #[test]
    fn diagonal_is_faster_than_single_axis() {
        let t = Tuning::default();
        let mut single = GameState::new(1).player;
        let mut diagonal = GameState::new(1).player;
        apply_movement(&mut single, &input(true, false, false, false), 1.0, &t);
        apply_movement(&mut diagonal, &input(true, false, false, true), 1.0, &t);

        let spawn = crate::consts::PLAYER_SPAWN;
        let single_dist = single.pos.distance(spawn);
        let diagonal_dist = diagonal.pos.distance(spawn);
        assert!((single_dist - t.walk_speed).abs() < 1e-3);
        assert!((diagonal_dist - t.walk_speed * 2.0_f32.sqrt()).abs() < 1e-3);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut state = GameState::new(1);
        let start = state.player.pos;
        apply_movement(&mut state.player, &input(true, true, true, true), SIM_DT, &state.tuning);
        assert_eq!(state.player.pos, start);
    }

    #[test]
    fn position_clamps_to_terrain_bounds() {
        let mut state = GameState::new(1);
        state.player.pos = Vec2::new(TERRAIN_HALF_EXTENT - 0.1, 0.0);
        // Walk east for ten seconds
        for _ in 0..600 {
            apply_movement(
                &mut state.player,
                &input(false, false, false, true),
                SIM_DT,
                &state.tuning,
            );
        }
        assert_eq!(state.player.pos.x, TERRAIN_HALF_EXTENT);
    }

    #[test]
    fn pitch_clamps_short_of_vertical() {
        let mut state = GameState::new(1);
        let t = state.tuning.clone();
        apply_look(&mut state.player, 0.0, -100_000.0, &t);
        let limit = std::f32::consts::FRAC_PI_2 - PITCH_MARGIN;
        assert_eq!(state.player.pitch, limit);
        apply_look(&mut state.player, 0.0, 100_000.0, &t);
        assert_eq!(state.player.pitch, -limit);
    }

    #[test]
    fn yaw_is_unbounded() {
        let mut state = GameState::new(1);
        let t = state.tuning.clone();
        apply_look(&mut state.player, 10_000.0, 0.0, &t);
        assert!(state.player.yaw < -2.0 * std::f32::consts::PI);
    }
}
