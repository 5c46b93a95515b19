//! Bevy plugin running steering and boss sequencing on the fixed timestep.
//!
//! The host owns physics and sensing: it writes [`Sensors`] before
//! [`LanternSet::Steer`] runs and integrates [`Velocity`] afterwards.

use bevy::prelude::*;
use glam::Vec2;
use log::error;
use thiserror::Error;

use crate::boss::{BossBody, BossEvent, BossSequencer, ControlOwner};
use crate::error::SequencerError;
use crate::sensor::AgentSensorState;
use crate::steering::{apply_steering, resolve, SteeringBehaviour, SteeringOutput};

/// Latest sensor sample written by the host.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Sensors(pub AgentSensorState);

/// Agent velocity. Steering only touches `x`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity(pub Vec2);

/// Whether the agent faces right.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Facing(pub bool);

impl Default for Facing {
    fn default() -> Self {
        Self(true)
    }
}

/// Active steering strategy of an agent.
#[derive(Component)]
pub struct Steering {
    behaviour: Box<dyn SteeringBehaviour>,
    last_output: SteeringOutput,
}

impl Steering {
    /// Wraps `behaviour`.
    #[must_use]
    pub fn new(behaviour: impl SteeringBehaviour + 'static) -> Self {
        Self {
            behaviour: Box::new(behaviour),
            last_output: SteeringOutput::ZERO,
        }
    }

    /// Output applied on the most recent step.
    #[must_use]
    pub const fn last_output(&self) -> SteeringOutput {
        self.last_output
    }

    /// Name of the wrapped behaviour.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.behaviour.name()
    }
}

/// A boss driven by the plugin.
#[derive(Component)]
pub struct Boss {
    /// Attack state machine.
    pub sequencer: BossSequencer,
    /// Kinematic view handed to attacks.
    pub body: BossBody,
}

impl Boss {
    /// Starts `sequencer` and wraps it with `body`.
    #[must_use]
    pub fn new(mut sequencer: BossSequencer, body: BossBody) -> Self {
        sequencer.start();
        Self { sequencer, body }
    }
}

/// System sets installed in [`FixedUpdate`], run in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LanternSet {
    /// Steering writes velocity and facing.
    Steer,
    /// Boss sequencers advance and may override steering.
    Sequence,
}

/// Raised when a boss sequencer fails; the boss is killed.
#[derive(Event, Debug, Clone, Error)]
#[error("boss {entity:?}: {source}")]
pub struct LanternError {
    /// Boss that failed.
    pub entity: Entity,
    /// Underlying failure.
    pub source: SequencerError,
}

/// A [`BossEvent`] emitted by a boss during the last fixed step.
#[derive(Event, Debug, Clone)]
pub struct BossSignal {
    /// Emitting boss.
    pub entity: Entity,
    /// What happened.
    pub event: BossEvent,
}

/// Resolves and applies steering for every agent that currently owns its
/// velocity.
pub fn steer_agents(
    mut agents: Query<(
        &Sensors,
        &mut Steering,
        &mut Velocity,
        &mut Facing,
        Option<&Boss>,
    )>,
) {
    for (sensors, mut steering, mut velocity, mut facing, boss) in &mut agents {
        let busy = boss.is_some_and(|driven| {
            driven.body.owner() == ControlOwner::Attack || driven.sequencer.is_dizzy()
        });
        if busy {
            continue;
        }
        let Steering {
            behaviour,
            last_output,
        } = &mut *steering;
        let output = resolve(&sensors.0, Some(behaviour.as_mut()));
        apply_steering(&output, &mut velocity.0, &mut facing.0);
        *last_output = output;
    }
}

/// Advances every boss sequencer by the fixed delta.
///
/// Velocity and facing are copied into the boss body before the update and
/// back out afterwards, so an attack in control overrides steering.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems require parameters by value, not by reference."
)]
pub fn drive_bosses(
    time: Res<Time>,
    mut commands: Commands,
    mut bosses: Query<(
        Entity,
        &mut Boss,
        Option<&Sensors>,
        Option<&mut Velocity>,
        Option<&mut Facing>,
    )>,
) {
    let dt = time.delta_secs();
    for (entity, mut boss, sensors, mut velocity, mut facing) in &mut bosses {
        let Boss { sequencer, body } = &mut *boss;
        if let Some(Sensors(sample)) = sensors {
            body.position = sample.position;
            body.touching_wall = sample.is_near_wall;
        }
        if let Some(Velocity(current)) = velocity.as_deref() {
            body.velocity = *current;
        }
        if let Some(Facing(right)) = facing.as_deref() {
            body.facing_right = *right;
        }

        if sequencer.is_dizzy() {
            body.velocity.x = 0.0;
        }
        if let Err(source) = sequencer.update(body, dt) {
            sequencer.kill(body);
            commands.trigger(LanternError { entity, source });
        }

        if let Some(Velocity(current)) = velocity.as_deref_mut() {
            *current = body.velocity;
        }
        if let Some(Facing(right)) = facing.as_deref_mut() {
            *right = body.facing_right;
        }
        for event in body.drain_events() {
            commands.trigger(BossSignal { entity, event });
        }
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_lantern_error(event: On<LanternError>) {
    error!("{}", event.event());
}

/// Installs the lantern systems into [`FixedUpdate`].
#[derive(Default)]
pub struct LanternPlugin;

impl Plugin for LanternPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Time>();
        app.add_observer(log_lantern_error);
        app.configure_sets(FixedUpdate, (LanternSet::Steer, LanternSet::Sequence).chain());
        app.add_systems(
            FixedUpdate,
            (
                steer_agents.in_set(LanternSet::Steer),
                drive_bosses.in_set(LanternSet::Sequence),
            ),
        );
    }
}
