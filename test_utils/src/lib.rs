//! Utility helpers for tests.
//!
//! Builders for sensor snapshots, arenas and attack parameters, plus a
//! scriptable [`StubAttack`] for driving the boss sequencer without real
//! attack choreography.

pub mod stub_attack;

use glam::Vec2;
use lantern::{AgentSensorState, Arena, AttackParams};

pub use stub_attack::{StubAttack, StubTally};

/// Sensor snapshot of an agent standing at `x` on open floor.
#[must_use]
pub fn grounded(x: f32, facing_right: bool) -> AgentSensorState {
    AgentSensorState {
        is_grounded: true,
        is_near_wall: false,
        is_near_edge: false,
        facing_right,
        position: Vec2::new(x, 0.5),
    }
}

/// Sensor snapshot of an airborne agent.
#[must_use]
pub fn airborne(x: f32, facing_right: bool) -> AgentSensorState {
    AgentSensorState {
        is_grounded: false,
        ..grounded(x, facing_right)
    }
}

/// Flat 20 unit arena with its floor at `y = 0`.
#[must_use]
pub fn flat_arena() -> Arena {
    Arena::new(0.0, 20.0, 0.0)
}

/// Attack tuning with no wind-up, recovery or cooldown.
#[must_use]
pub fn instant_params(name: &str, speed: f32, active: f32, max_duration: f32) -> AttackParams {
    AttackParams {
        name: name.to_owned(),
        speed,
        damage: 10.0,
        telegraph: 0.0,
        active,
        recovery: 0.0,
        max_duration,
        cooldown_by_phase: Vec::new(),
    }
}
