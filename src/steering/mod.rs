//! Steering resolution for autonomous agents.
//!
//! A [`SteeringBehaviour`] turns the current [`AgentSensorState`] into a
//! [`SteeringOutput`]. [`resolve`] is a thin dispatcher over the active
//! behaviour and [`apply_steering`] writes the result into the agent's
//! velocity and facing. Policy such as turning at ledges lives entirely in
//! the behaviours.

pub mod behaviours;

use glam::Vec2;

use crate::sensor::AgentSensorState;
use crate::STEERING_EPSILON;

pub use behaviours::{Patrol, Pursue, StayStill};

/// Velocity request produced by a behaviour for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SteeringOutput {
    /// Velocity the behaviour would like the agent to have.
    pub desired_velocity: Vec2,
    /// Whether the agent should turn to face its direction of travel.
    pub should_orient: bool,
}

impl SteeringOutput {
    /// No movement and no orientation request.
    pub const ZERO: Self = Self {
        desired_velocity: Vec2::ZERO,
        should_orient: false,
    };

    /// Creates an output from its parts.
    #[must_use]
    pub const fn new(desired_velocity: Vec2, should_orient: bool) -> Self {
        Self {
            desired_velocity,
            should_orient,
        }
    }
}

/// Strategy computing a desired velocity from sensed state.
///
/// Implementations may carry their own memory (for example a patrol
/// direction) but must not depend on anything outside `sensors` and
/// themselves.
pub trait SteeringBehaviour: Send + Sync {
    /// Computes this tick's steering request.
    fn compute_steering(&mut self, sensors: &AgentSensorState) -> SteeringOutput;

    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Called when the behaviour is swapped out of an agent.
    fn reset(&mut self) {}

    /// Points the behaviour at a new goal. Goal-free behaviours ignore it.
    fn retarget(&mut self, _target: Vec2) {}
}

/// Dispatches to `behaviour`, or returns [`SteeringOutput::ZERO`] without one.
///
/// # Examples
/// ```
/// use lantern::sensor::AgentSensorState;
/// use lantern::steering::{resolve, SteeringOutput};
///
/// let output = resolve(&AgentSensorState::default(), None);
/// assert_eq!(output, SteeringOutput::ZERO);
/// ```
#[must_use]
pub fn resolve(
    sensors: &AgentSensorState,
    behaviour: Option<&mut dyn SteeringBehaviour>,
) -> SteeringOutput {
    behaviour.map_or(SteeringOutput::ZERO, |active| {
        active.compute_steering(sensors)
    })
}

/// Applies `output` to an agent.
///
/// Only the horizontal velocity is replaced; the vertical component belongs
/// to gravity. When orientation is requested and the desired speed exceeds
/// [`STEERING_EPSILON`] the agent turns towards `position + desired`.
pub fn apply_steering(output: &SteeringOutput, velocity: &mut Vec2, facing_right: &mut bool) {
    velocity.x = output.desired_velocity.x;
    if !output.should_orient || output.desired_velocity.length() <= STEERING_EPSILON {
        return;
    }
    if output.desired_velocity.x > 0.0 {
        *facing_right = true;
    } else if output.desired_velocity.x < 0.0 {
        *facing_right = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_preserves_vertical_velocity() {
        let mut velocity = Vec2::new(0.0, -4.5);
        let mut facing_right = true;
        let output = SteeringOutput::new(Vec2::new(-2.0, 7.0), true);

        apply_steering(&output, &mut velocity, &mut facing_right);

        assert_eq!(velocity, Vec2::new(-2.0, -4.5));
        assert!(!facing_right);
    }

    #[test]
    fn tiny_velocity_does_not_reorient() {
        let mut velocity = Vec2::ZERO;
        let mut facing_right = true;
        let output = SteeringOutput::new(Vec2::new(-0.001, 0.0), true);

        apply_steering(&output, &mut velocity, &mut facing_right);

        assert!(facing_right);
    }

    #[test]
    fn orientation_ignored_when_not_requested() {
        let mut velocity = Vec2::ZERO;
        let mut facing_right = true;
        let output = SteeringOutput::new(Vec2::new(-3.0, 0.0), false);

        apply_steering(&output, &mut velocity, &mut facing_right);

        assert!(facing_right);
        assert_eq!(velocity.x, -3.0);
    }
}
