//! Enemy steering and boss attack sequencing for a 2D platformer.
//!
//! Grounded agents sense their surroundings through a host supplied
//! [`sensor::Raycaster`], pick a velocity with a pluggable
//! [`steering::SteeringBehaviour`] and hand control to a
//! [`boss::BossSequencer`] whenever a boss attack owns the body. The
//! [`plugin::LanternPlugin`] wires everything into Bevy's fixed timestep,
//! while [`simulation::Simulation`] runs the same logic headless.
pub mod arena;
pub mod boss;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod movement;
pub mod plugin;
pub mod sensor;
pub mod simulation;
pub mod steering;
pub use constants::*;

// Re-export commonly used items
pub use arena::Arena;
pub use boss::{
    AttackBehaviour, AttackParams, AttackPoll, BossBody, BossEvent, BossPatternState,
    BossSequencer, ControlOwner,
};
pub use config::BossConfig;
pub use error::{ConfigError, SequencerError};
pub use logging::init as init_logging;
pub use movement::EnemyMovement;
pub use plugin::LanternPlugin;
pub use sensor::{AgentSensorState, LayerMask, Raycaster, SensorConfig};
pub use simulation::{Simulation, SimulationReport};
pub use steering::{apply_steering, resolve, SteeringBehaviour, SteeringOutput};
