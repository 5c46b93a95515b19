//! Tuning constants shared by steering, sensing and boss sequencing.

/// Minimum desired speed before a steering output may re-face the agent.
pub const STEERING_EPSILON: f32 = 0.01;

/// Default length of the post-attack vulnerability window, in seconds.
pub const DEFAULT_DIZZY_DURATION: f32 = 2.0;
/// Default damage amplification applied while the boss is dizzy.
pub const DEFAULT_DIZZY_DAMAGE_MULTIPLIER: f32 = 2.0;

/// Speed gained per difficulty phase above the first, as a fraction of base.
pub const PHASE_SPEED_STEP: f32 = 0.2;
/// Damage gained per difficulty phase above the first, as a fraction of base.
pub const PHASE_DAMAGE_STEP: f32 = 0.25;

/// Ray length used to detect the floor beneath an agent.
pub const DEFAULT_GROUND_DISTANCE: f32 = 0.6;
/// Ray length used to detect a wall in front of an agent.
pub const DEFAULT_WALL_DISTANCE: f32 = 0.55;
/// Horizontal offset of the ledge probe ahead of the agent.
pub const DEFAULT_EDGE_OFFSET: f32 = 0.5;
/// Ray length of the ledge probe.
pub const DEFAULT_EDGE_DISTANCE: f32 = 1.0;

/// Collision layer bit occupied by level geometry.
pub const GROUND_LAYER: u32 = 1 << 3;
