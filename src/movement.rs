//! Per-agent movement driver.
//!
//! [`EnemyMovement`] is the explicit replacement for an engine callback: the
//! owning simulation loop calls [`EnemyMovement::fixed_update`] once per
//! physics step. Each call samples sensors first and only then resolves and
//! applies steering.

use glam::Vec2;
use log::{debug, error};

use crate::sensor::{AgentSensorState, Raycaster, SensorConfig};
use crate::steering::{apply_steering, resolve, SteeringBehaviour, SteeringOutput};

/// Sensor sampling plus steering for one agent.
pub struct EnemyMovement {
    sensors: SensorConfig,
    behaviour: Option<Box<dyn SteeringBehaviour>>,
    state: AgentSensorState,
    velocity: Vec2,
    facing_right: bool,
    enabled: bool,
    in_control: bool,
}

impl EnemyMovement {
    /// Creates a movement driver. A missing behaviour disables the driver on
    /// its first update.
    #[must_use]
    pub fn new(
        sensors: SensorConfig,
        behaviour: Option<Box<dyn SteeringBehaviour>>,
        facing_right: bool,
    ) -> Self {
        Self {
            sensors,
            behaviour,
            state: AgentSensorState {
                facing_right,
                ..AgentSensorState::default()
            },
            velocity: Vec2::ZERO,
            facing_right,
            enabled: true,
            in_control: true,
        }
    }

    /// Runs one physics step at `position`.
    ///
    /// Returns the applied steering, or `None` when the driver is disabled or
    /// another subsystem currently owns the velocity.
    pub fn fixed_update<R: Raycaster + ?Sized>(
        &mut self,
        raycaster: &R,
        position: Vec2,
    ) -> Option<SteeringOutput> {
        if !self.enabled {
            return None;
        }
        self.state = self.sensors.sample(raycaster, position, self.facing_right);
        if !self.in_control {
            return None;
        }
        let Some(behaviour) = self.behaviour.as_deref_mut() else {
            error!("enemy movement at {position:?} has no steering behaviour; disabling");
            self.enabled = false;
            self.velocity.x = 0.0;
            return None;
        };
        let output = resolve(&self.state, Some(behaviour));
        apply_steering(&output, &mut self.velocity, &mut self.facing_right);
        Some(output)
    }

    /// Replaces the active behaviour and re-enables the driver.
    pub fn set_behaviour(&mut self, behaviour: Box<dyn SteeringBehaviour>) {
        if let Some(mut previous) = self.behaviour.take() {
            debug!("swapping steering {} -> {}", previous.name(), behaviour.name());
            previous.reset();
        }
        self.behaviour = Some(behaviour);
        self.enabled = true;
    }

    /// Forwards a new goal to the active behaviour.
    pub fn set_target(&mut self, target: Vec2) {
        if let Some(behaviour) = self.behaviour.as_deref_mut() {
            behaviour.retarget(target);
        }
    }

    /// Removes the active behaviour and stops horizontal motion.
    pub fn clear_behaviour(&mut self) -> Option<Box<dyn SteeringBehaviour>> {
        self.velocity.x = 0.0;
        self.behaviour.take().map(|mut previous| {
            previous.reset();
            previous
        })
    }

    /// Hands velocity ownership to another subsystem. Sensing continues.
    pub fn release_control(&mut self) {
        self.in_control = false;
    }

    /// Takes velocity ownership back.
    pub fn take_control(&mut self) {
        self.in_control = true;
    }

    /// Whether this driver currently owns the agent's velocity.
    #[must_use]
    pub const fn has_control(&self) -> bool {
        self.in_control
    }

    /// Whether the driver is still running.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Latest sensor sample.
    #[must_use]
    pub const fn sensor_state(&self) -> &AgentSensorState {
        &self.state
    }

    /// Current velocity.
    #[must_use]
    pub const fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Overwrites the velocity; used by the physics integrator for gravity.
    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Current facing.
    #[must_use]
    pub const fn is_facing_right(&self) -> bool {
        self.facing_right
    }

    /// Overwrites the facing, e.g. after an attack turned the agent.
    pub fn set_facing_right(&mut self, facing_right: bool) {
        self.facing_right = facing_right;
    }

    /// Name of the active behaviour, if any.
    #[must_use]
    pub fn behaviour_name(&self) -> Option<&'static str> {
        self.behaviour.as_deref().map(|active| active.name())
    }
}

impl std::fmt::Debug for EnemyMovement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnemyMovement")
            .field("behaviour", &self.behaviour_name())
            .field("velocity", &self.velocity)
            .field("facing_right", &self.facing_right)
            .field("enabled", &self.enabled)
            .field("in_control", &self.in_control)
            .finish_non_exhaustive()
    }
}
