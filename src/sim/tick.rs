//! Fixed-timestep simulation tick
//!
//! `tick` advances the whole game by one step and returns the effects the
//! host should apply. It is the only entry point that mutates `GameState`.

use rand::Rng;

use crate::audio::{Cue, LoopTrack};
use crate::sim::effects::{Effect, messages, objective_text};
use crate::sim::state::{
    EventKind, GameState, LandmarkKind, Objective, Outcome, SessionPhase,
};
use crate::sim::{monster, player};

/// Heart rate rises as the monster closes in: clamp(2 - d/38, 1, 2.3)
const HEART_RATE_FALLOFF: f32 = 38.0;
const HEART_RATE_MAX: f32 = 2.3;
/// Breathing speeds up on a gentler curve: clamp(2 - d/34, 1, 1.35)
const BREATH_RATE_FALLOFF: f32 = 34.0;
const BREATH_RATE_MAX: f32 = 1.35;

/// Sampled host input for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Interact key pressed this tick (edge, not level)
    pub interact: bool,
    /// Accumulated mouse delta since the last tick
    pub look_dx: f32,
    pub look_dy: f32,
    /// Look input is ignored without pointer lock
    pub pointer_locked: bool,
}

/// Advance the simulation by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<Effect> {
    let mut effects = Vec::new();
    if !dt.is_finite() {
        return effects;
    }
    // Guard against tab-switch sized deltas from the host accumulator
    let dt = dt.clamp(0.0, 0.1);

    state.time_ticks += 1;
    state.ticks_since_hallucination = state.ticks_since_hallucination.saturating_add(1);

    for ev in state.take_due() {
        apply_event(state, ev.kind, &mut effects);
    }

    match state.phase {
        SessionPhase::Playing => play_tick(state, input, dt, &mut effects),
        SessionPhase::Repairing => {
            // Pose and monster are frozen; only the clock keeps running
            advance_oxygen(state, dt, false, &mut effects);
        }
        // Everything is suspended until the scheduled end fires
        SessionPhase::Hallucinating => {}
        SessionPhase::GameOver => {}
    }

    if state.phase != SessionPhase::GameOver {
        ambient_rates(state, &mut effects);
    }

    effects
}

fn play_tick(state: &mut GameState, input: &TickInput, dt: f32, effects: &mut Vec<Effect>) {
    if input.pointer_locked && (input.look_dx != 0.0 || input.look_dy != 0.0) {
        player::apply_look(&mut state.player, input.look_dx, input.look_dy, &state.tuning);
    }
    let tuning = state.tuning.clone();
    player::apply_movement(&mut state.player, input, dt, &tuning);

    if input.interact {
        handle_interact(state, effects);
        if state.phase == SessionPhase::GameOver || state.phase == SessionPhase::Repairing {
            return;
        }
    }

    advance_oxygen(state, dt, true, effects);
    if state.phase == SessionPhase::GameOver {
        return;
    }

    if monster::step(state, dt, effects) {
        end_session(state, Outcome::Caught, effects);
        return;
    }

    // Random hallucinations, rate-limited by a cooldown
    if state.phase == SessionPhase::Playing
        && state.ticks_since_hallucination
            >= crate::secs_to_ticks(tuning.hallucination_cooldown_secs)
    {
        let roll: f32 = state.rng.random();
        if roll < tuning.hallucination_chance {
            begin_hallucination(state, messages::WORLD_WARPS, effects);
        }
    }
}

/// Dispatch an interact press against the current objective. Out-of-range
/// presses are silently ignored.
fn handle_interact(state: &mut GameState, effects: &mut Vec<Effect>) {
    let radius = state.tuning.interaction_radius;
    match state.objectives.current() {
        Objective::AwaitingRadioRepair if state.distance_to(LandmarkKind::RadioTower) < radius => {
            begin_repair(state, LandmarkKind::RadioTower, effects);
        }
        Objective::AwaitingRocketRepair if state.distance_to(LandmarkKind::Rocket) < radius => {
            begin_repair(state, LandmarkKind::Rocket, effects);
        }
        Objective::AwaitingEscape if state.distance_to(LandmarkKind::Rocket) < radius => {
            state.objectives.escaped = true;
            end_session(state, Outcome::Escaped, effects);
        }
        _ => {}
    }
}

fn begin_repair(state: &mut GameState, kind: LandmarkKind, effects: &mut Vec<Effect>) {
    let (secs, msg) = match kind {
        LandmarkKind::RadioTower => (state.tuning.radio_repair_secs, messages::FIXING_RADIO),
        LandmarkKind::Rocket => (state.tuning.rocket_repair_secs, messages::REPAIRING_ROCKET),
    };
    state.phase = SessionPhase::Repairing;
    state.schedule(EventKind::RepairDone(kind), secs);
    effects.push(Effect::HudMessage(msg));
    effects.push(Effect::SetLoopVolume(
        LoopTrack::RadioStatic,
        state.tuning.static_volume_repair,
    ));
    log::debug!("Repair started: {kind:?} ({secs}s)");
}

/// Enter the blocking hallucination phase, scripted or random. Movement,
/// look, interactions, oxygen and the monster all suspend until the
/// scheduled end reverts to `Playing`.
fn begin_hallucination(state: &mut GameState, message: &'static str, effects: &mut Vec<Effect>) {
    let duration = state
        .rng
        .random_range(state.tuning.hallucination_min_secs..state.tuning.hallucination_max_secs);
    state.phase = SessionPhase::Hallucinating;
    state.distortion = true;
    state.schedule(EventKind::HallucinationEnd, duration);
    effects.push(Effect::SetDistortion(true));
    effects.push(Effect::HudMessage(message));
    effects.push(Effect::PlayCue(Cue::Whisper));
    effects.push(Effect::SetLoopVolume(
        LoopTrack::RadioStatic,
        state.tuning.static_volume_hallucination,
    ));
    log::debug!("Hallucination started ({duration:.1}s)");
}

/// Advance the oxygen clock. The clock also runs while repairing, but
/// oxygen only drains during normal play, so timed repairs do not cost air.
fn advance_oxygen(state: &mut GameState, dt: f32, drain: bool, effects: &mut Vec<Effect>) {
    state.oxygen_accum += dt;
    while state.oxygen_accum >= 1.0 {
        state.oxygen_accum -= 1.0;
        if !drain {
            continue;
        }
        state.oxygen = (state.oxygen - state.tuning.oxygen_per_second).max(0.0);
        effects.push(Effect::HudOxygen(state.oxygen_percent()));
        if state.oxygen < 1.0 {
            end_session(state, Outcome::Suffocated, effects);
            return;
        }
    }
}

/// Emit playback-rate changes for the proximity loops, deduplicated so the
/// host is not hammered with identical rates every tick.
fn ambient_rates(state: &mut GameState, effects: &mut Vec<Effect>) {
    let d = state.monster_distance();
    let heart = (2.0 - d / HEART_RATE_FALLOFF).clamp(1.0, HEART_RATE_MAX);
    let breath = (2.0 - d / BREATH_RATE_FALLOFF).clamp(1.0, BREATH_RATE_MAX);

    if (heart - state.last_heart_rate).abs() > 0.01 {
        state.last_heart_rate = heart;
        effects.push(Effect::SetLoopRate(LoopTrack::Heartbeat, heart));
    }
    if (breath - state.last_breath_rate).abs() > 0.01 {
        state.last_breath_rate = breath;
        effects.push(Effect::SetLoopRate(LoopTrack::Breathing, breath));
    }
}

/// End the session exactly once and schedule the automatic reset
fn end_session(state: &mut GameState, outcome: Outcome, effects: &mut Vec<Effect>) {
    if state.outcome.is_some() {
        return;
    }
    state.outcome = Some(outcome);
    state.phase = SessionPhase::GameOver;
    state.distortion = false;
    state.cancel_transient();

    let msg = match outcome {
        Outcome::Escaped => messages::ESCAPED,
        Outcome::Suffocated => messages::SUFFOCATED,
        Outcome::Caught => messages::CAUGHT,
    };
    effects.push(Effect::HudMessage(msg));
    match outcome {
        // The capture sting rides over a radio-static burst; the loops keep
        // playing until the reset restores their base volumes.
        Outcome::Caught => {
            effects.push(Effect::PlayCue(Cue::Jumpscare));
            effects.push(Effect::SetLoopVolume(
                LoopTrack::RadioStatic,
                state.tuning.static_volume_jumpscare,
            ));
        }
        Outcome::Escaped | Outcome::Suffocated => effects.push(Effect::StopAmbient),
    }
    effects.push(Effect::SetDistortion(false));

    state.schedule(EventKind::AutoReset, state.tuning.reset_delay_secs);
    log::info!("Session over: {outcome:?} at tick {}", state.time_ticks);
}

fn apply_event(state: &mut GameState, kind: EventKind, effects: &mut Vec<Effect>) {
    match kind {
        // Completing a repair advances the objective chain and folds straight
        // into a scripted hallucination carrying the milestone's voice line.
        EventKind::RepairDone(LandmarkKind::RadioTower) => {
            state.objectives.radio_fixed = true;
            effects.push(Effect::HudObjective(objective_text::REPAIR_ROCKET));
            begin_hallucination(state, messages::RADIO_WHISPER, effects);
        }
        EventKind::RepairDone(LandmarkKind::Rocket) => {
            state.objectives.rocket_fixed = true;
            effects.push(Effect::HudObjective(objective_text::ESCAPE));
            begin_hallucination(state, messages::ROCKET_VOICE, effects);
        }
        EventKind::HallucinationEnd => {
            state.phase = SessionPhase::Playing;
            state.distortion = false;
            state.ticks_since_hallucination = 0;
            effects.push(Effect::SetDistortion(false));
            effects.push(Effect::HudMessage(""));
            effects.push(Effect::SetLoopVolume(
                LoopTrack::RadioStatic,
                state.tuning.static_volume_base,
            ));
        }
        EventKind::AutoReset => {
            state.reset();
            effects.push(Effect::SessionReset);
            effects.push(Effect::HudOxygen(state.oxygen_percent()));
            effects.push(Effect::HudObjective(objective_line(
                state.objectives.current(),
            )));
            effects.push(Effect::HudMessage(""));
            effects.push(Effect::SetDistortion(false));
        }
    }
}

/// HUD line for an objective
pub fn objective_line(obj: Objective) -> &'static str {
    match obj {
        Objective::AwaitingRadioRepair => objective_text::REPAIR_RADIO,
        Objective::AwaitingRocketRepair => objective_text::REPAIR_ROCKET,
        Objective::AwaitingEscape | Objective::Escaped => objective_text::ESCAPE,
    }
}
