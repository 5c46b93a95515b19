//! Environment sensing for grounded agents.
//!
//! Physics queries are supplied by the host through [`Raycaster`]. A
//! [`SensorConfig`] turns three rays into an [`AgentSensorState`]: one down
//! from the body for ground contact, one forward for walls, and one down from
//! a point ahead of the body for ledges.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::{
    DEFAULT_EDGE_DISTANCE, DEFAULT_EDGE_OFFSET, DEFAULT_GROUND_DISTANCE, DEFAULT_WALL_DISTANCE,
    GROUND_LAYER,
};

/// Bit set of collision layers a ray may hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// Mask containing only level geometry.
    pub const GROUND: Self = Self(GROUND_LAYER);

    /// Returns `true` when any bit of `other` is present in this mask.
    ///
    /// # Examples
    /// ```
    /// use lantern::sensor::LayerMask;
    /// assert!(LayerMask(0b1010).intersects(LayerMask(0b0010)));
    /// assert!(!LayerMask(0b1010).intersects(LayerMask(0b0101)));
    /// ```
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::GROUND
    }
}

/// Physics query provided by the host engine.
pub trait Raycaster {
    /// Casts a ray and reports whether it hit anything on `mask` within
    /// `max_distance`. `direction` need not be normalised.
    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32, mask: LayerMask) -> bool;
}

/// Snapshot of what an agent senses this physics tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AgentSensorState {
    /// Floor directly beneath the agent.
    pub is_grounded: bool,
    /// Wall directly ahead in the facing direction.
    pub is_near_wall: bool,
    /// No floor just ahead in the facing direction.
    pub is_near_edge: bool,
    /// Facing direction at sampling time.
    pub facing_right: bool,
    /// World position at sampling time.
    pub position: Vec2,
}

impl AgentSensorState {
    /// `1.0` when facing right, `-1.0` otherwise.
    #[must_use]
    pub const fn facing_sign(&self) -> f32 {
        if self.facing_right {
            1.0
        } else {
            -1.0
        }
    }
}

/// Ray lengths and offsets used to probe the environment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Length of the downward ground probe.
    pub ground_distance: f32,
    /// Length of the forward wall probe.
    pub wall_distance: f32,
    /// Horizontal offset of the ledge probe ahead of the agent.
    pub edge_offset: f32,
    /// Length of the downward ledge probe.
    pub edge_distance: f32,
    /// Layers treated as solid.
    pub ground_mask: LayerMask,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            ground_distance: DEFAULT_GROUND_DISTANCE,
            wall_distance: DEFAULT_WALL_DISTANCE,
            edge_offset: DEFAULT_EDGE_OFFSET,
            edge_distance: DEFAULT_EDGE_DISTANCE,
            ground_mask: LayerMask::GROUND,
        }
    }
}

impl SensorConfig {
    /// Samples the environment around `position`.
    ///
    /// Must run before steering is resolved for the same tick.
    #[must_use]
    pub fn sample<R: Raycaster + ?Sized>(
        &self,
        raycaster: &R,
        position: Vec2,
        facing_right: bool,
    ) -> AgentSensorState {
        let forward = if facing_right { Vec2::X } else { Vec2::NEG_X };
        let is_grounded =
            raycaster.raycast(position, Vec2::NEG_Y, self.ground_distance, self.ground_mask);
        let is_near_wall =
            raycaster.raycast(position, forward, self.wall_distance, self.ground_mask);
        let probe = position + forward * self.edge_offset;
        let is_near_edge =
            !raycaster.raycast(probe, Vec2::NEG_Y, self.edge_distance, self.ground_mask);

        AgentSensorState {
            is_grounded,
            is_near_wall,
            is_near_edge,
            facing_right,
            position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FlatFloor;

    impl Raycaster for FlatFloor {
        fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32, _: LayerMask) -> bool {
            // Floor is the line y = 0 for x in [0, 10].
            direction.y < 0.0 && origin.y <= max_distance && (0.0..=10.0).contains(&origin.x)
        }
    }

    #[test]
    fn detects_floor_and_ledge() {
        let config = SensorConfig::default();
        let middle = config.sample(&FlatFloor, Vec2::new(5.0, 0.5), true);
        assert!(middle.is_grounded);
        assert!(!middle.is_near_edge);
        assert!(!middle.is_near_wall);

        let ledge = config.sample(&FlatFloor, Vec2::new(9.8, 0.5), true);
        assert!(ledge.is_grounded);
        assert!(ledge.is_near_edge);

        let facing_away = config.sample(&FlatFloor, Vec2::new(9.8, 0.5), false);
        assert!(!facing_away.is_near_edge);
    }

    #[test]
    fn airborne_agent_is_not_grounded() {
        let state = SensorConfig::default().sample(&FlatFloor, Vec2::new(5.0, 3.0), true);
        assert!(!state.is_grounded);
        assert!(state.is_near_edge);
    }
}
