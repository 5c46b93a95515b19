//! Built-in steering behaviours.

use glam::Vec2;
use log::debug;

use super::{SteeringBehaviour, SteeringOutput};
use crate::sensor::AgentSensorState;

/// Keeps the agent in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct StayStill;

impl SteeringBehaviour for StayStill {
    fn compute_steering(&mut self, _sensors: &AgentSensorState) -> SteeringOutput {
        SteeringOutput::ZERO
    }

    fn name(&self) -> &'static str {
        "stay_still"
    }
}

/// Walks back and forth, turning at walls and ledges.
///
/// The travel direction is remembered between ticks. An obstacle only
/// triggers a turn when the agent is facing its travel direction, so the
/// sensor sample taken before the agent re-faces cannot flip it twice.
#[derive(Debug, Clone, Copy)]
pub struct Patrol {
    speed: f32,
    moving_right: bool,
}

impl Patrol {
    /// Creates a patrol moving at `speed` units per second.
    #[must_use]
    pub const fn new(speed: f32, moving_right: bool) -> Self {
        Self {
            speed,
            moving_right,
        }
    }

    /// Current travel direction.
    #[must_use]
    pub const fn moving_right(&self) -> bool {
        self.moving_right
    }

    const fn direction(&self) -> f32 {
        if self.moving_right {
            1.0
        } else {
            -1.0
        }
    }
}

impl SteeringBehaviour for Patrol {
    fn compute_steering(&mut self, sensors: &AgentSensorState) -> SteeringOutput {
        let blocked =
            sensors.is_near_wall || (sensors.is_grounded && sensors.is_near_edge);
        if blocked && sensors.facing_right == self.moving_right {
            self.moving_right = !self.moving_right;
            debug!(
                "patrol turning at {:?} (wall: {}, edge: {})",
                sensors.position, sensors.is_near_wall, sensors.is_near_edge
            );
        }
        SteeringOutput::new(Vec2::new(self.direction() * self.speed, 0.0), true)
    }

    fn name(&self) -> &'static str {
        "patrol"
    }
}

/// Chases a target horizontally without walking off ledges.
#[derive(Debug, Clone, Copy)]
pub struct Pursue {
    speed: f32,
    target: Vec2,
    stop_distance: f32,
}

impl Pursue {
    /// Creates a pursuit that halts within `stop_distance` of `target`.
    #[must_use]
    pub const fn new(speed: f32, target: Vec2, stop_distance: f32) -> Self {
        Self {
            speed,
            target,
            stop_distance,
        }
    }

    /// Updates the point being chased.
    pub fn set_target(&mut self, target: Vec2) {
        self.target = target;
    }

    /// Point currently being chased.
    #[must_use]
    pub const fn target(&self) -> Vec2 {
        self.target
    }
}

impl SteeringBehaviour for Pursue {
    fn compute_steering(&mut self, sensors: &AgentSensorState) -> SteeringOutput {
        let offset = self.target.x - sensors.position.x;
        if offset.abs() <= self.stop_distance {
            return SteeringOutput::ZERO;
        }
        let heading_right = offset > 0.0;
        let ledge_ahead = sensors.is_grounded
            && sensors.is_near_edge
            && sensors.facing_right == heading_right;
        if ledge_ahead {
            return SteeringOutput::ZERO;
        }
        SteeringOutput::new(Vec2::new(offset.signum() * self.speed, 0.0), true)
    }

    fn name(&self) -> &'static str {
        "pursue"
    }

    fn retarget(&mut self, target: Vec2) {
        self.set_target(target);
    }
}
