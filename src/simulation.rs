//! Headless fixed-step loop tying movement, sensing and the boss together.
//!
//! The loop stands in for an engine: it samples sensors against an
//! [`Arena`], hands velocity to whichever subsystem owns it, integrates
//! positions and wears the boss's health down with a scripted damage rate.

use glam::Vec2;
use log::{debug, info};
use serde::Serialize;

use crate::arena::Arena;
use crate::boss::{BossBody, BossEvent, BossPatternState, BossSequencer, ControlOwner};
use crate::config::BossConfig;
use crate::error::{ConfigError, SequencerError};
use crate::movement::EnemyMovement;
use crate::sensor::SensorConfig;
use crate::steering::{Patrol, Pursue};

const BODY_HALF_WIDTH: f32 = 0.5;
const BOSS_WALK_SPEED: f32 = 2.5;
const BOSS_STOP_DISTANCE: f32 = 1.5;
const GRUNT_SPEED: f32 = 1.5;
const PLAYER_SWAY_RATE: f32 = 0.4;
const BOSS_MAX_HEALTH: f32 = 100.0;
const DEFAULT_PLAYER_DPS: f32 = 4.0;

/// Summary of a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    /// Fixed steps taken.
    pub ticks: u64,
    /// Simulated seconds.
    pub elapsed: f32,
    /// Attacks that entered execution.
    pub attacks_started: u32,
    /// Vulnerability windows opened.
    pub dizzy_windows: u32,
    /// Projectiles requested by attacks.
    pub projectiles: u32,
    /// Times the patrolling grunt turned around.
    pub grunt_turns: u32,
    /// Boss state when the run stopped.
    pub final_state: BossPatternState,
    /// Difficulty phase when the run stopped.
    pub final_phase: u8,
    /// Remaining boss health.
    pub boss_health: f32,
}

/// One boss and one patrolling grunt in an arena, chased by a swaying
/// player.
#[derive(Debug)]
pub struct Simulation {
    arena: Arena,
    boss: BossBody,
    sequencer: BossSequencer,
    boss_movement: EnemyMovement,
    grunt: EnemyMovement,
    grunt_position: Vec2,
    player: Vec2,
    boss_health: f32,
    player_dps: f32,
    last_state: BossPatternState,
    report: SimulationReport,
}

impl Simulation {
    /// Builds a started simulation in a 24 unit wide arena.
    ///
    /// # Errors
    /// Returns any configuration error raised while building the sequencer.
    pub fn new(config: &BossConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_arena(config, seed, Arena::new(0.0, 24.0, 0.0))
    }

    /// Builds a started simulation in `arena`.
    ///
    /// # Errors
    /// Returns any configuration error raised while building the sequencer.
    pub fn with_arena(config: &BossConfig, seed: u64, arena: Arena) -> Result<Self, ConfigError> {
        let mut sequencer = config.build_sequencer(seed)?;
        sequencer.start();
        let ground = arena.floor_y + BODY_HALF_WIDTH;
        let boss = BossBody::new(Vec2::new(arena.left_wall + 4.0, ground), true);
        let player = Vec2::new(arena.centre_x(), ground);
        let boss_movement = EnemyMovement::new(
            config.sensors,
            Some(Box::new(Pursue::new(
                BOSS_WALK_SPEED,
                player,
                BOSS_STOP_DISTANCE,
            ))),
            boss.facing_right,
        );
        let grunt = EnemyMovement::new(
            SensorConfig::default(),
            Some(Box::new(Patrol::new(GRUNT_SPEED, false))),
            false,
        );
        let grunt_position = Vec2::new(arena.right_wall - 3.0, ground);
        let last_state = sequencer.state();
        let report = SimulationReport {
            ticks: 0,
            elapsed: 0.0,
            attacks_started: 0,
            dizzy_windows: 0,
            projectiles: 0,
            grunt_turns: 0,
            final_state: last_state,
            final_phase: sequencer.phase(),
            boss_health: BOSS_MAX_HEALTH,
        };
        Ok(Self {
            arena,
            boss,
            sequencer,
            boss_movement,
            grunt,
            grunt_position,
            player,
            boss_health: BOSS_MAX_HEALTH,
            player_dps: DEFAULT_PLAYER_DPS,
            last_state,
            report,
        })
    }

    /// Overrides the scripted damage per second dealt to the boss.
    #[must_use]
    pub fn with_player_dps(mut self, player_dps: f32) -> Self {
        self.player_dps = player_dps;
        self
    }

    /// Advances the world by one fixed step of `dt` seconds.
    ///
    /// # Errors
    /// Propagates sequencer invariant violations.
    pub fn step(&mut self, dt: f32) -> Result<BossPatternState, SequencerError> {
        self.report.ticks += 1;
        self.report.elapsed += dt;
        self.move_player();
        self.step_boss(dt)?;
        self.step_grunt(dt);
        self.apply_damage(dt);

        let state = self.sequencer.state();
        if state != self.last_state {
            match state {
                BossPatternState::ExecutingAttack => self.report.attacks_started += 1,
                BossPatternState::Dizzy => self.report.dizzy_windows += 1,
                _ => {}
            }
            self.last_state = state;
        }
        self.report.final_state = state;
        self.report.final_phase = self.sequencer.phase();
        self.report.boss_health = self.boss_health;
        Ok(state)
    }

    /// Steps until `seconds` have elapsed or the boss dies.
    ///
    /// # Errors
    /// Propagates sequencer invariant violations.
    pub fn run(&mut self, seconds: f32, dt: f32) -> Result<&SimulationReport, SequencerError> {
        while self.report.elapsed + f32::EPSILON < seconds && !self.sequencer.is_dead() {
            self.step(dt)?;
        }
        info!(
            "simulation finished after {} ticks in state {:?}",
            self.report.ticks, self.report.final_state
        );
        Ok(&self.report)
    }

    fn move_player(&mut self) {
        let span = (self.arena.right_wall - self.arena.left_wall) * 0.5 - 2.0;
        let sway = (self.report.elapsed * PLAYER_SWAY_RATE).sin();
        self.player.x = span.mul_add(sway, self.arena.centre_x());
        self.boss.target = self.player;
    }

    fn step_boss(&mut self, dt: f32) -> Result<(), SequencerError> {
        let steering = self.boss.owner() == ControlOwner::Movement && !self.sequencer.is_dizzy();
        if steering {
            self.boss_movement.take_control();
        } else {
            self.boss_movement.release_control();
        }
        self.boss_movement.set_facing_right(self.boss.facing_right);
        self.boss_movement.set_target(self.player);
        self.boss_movement.set_velocity(self.boss.velocity);
        self.boss_movement.fixed_update(&self.arena, self.boss.position);
        if steering {
            self.boss.velocity.x = self.boss_movement.velocity().x;
            self.boss.facing_right = self.boss_movement.is_facing_right();
        } else if self.sequencer.is_dizzy() {
            self.boss.velocity.x = 0.0;
        }
        self.boss.touching_wall = self.boss_movement.sensor_state().is_near_wall;

        self.sequencer.update(&mut self.boss, dt)?;
        for event in self.boss.drain_events() {
            match event {
                BossEvent::ProjectileSpawned { .. } => self.report.projectiles += 1,
                other => debug!("boss event {other:?}"),
            }
        }

        let moved = self.boss.position + Vec2::new(self.boss.velocity.x * dt, 0.0);
        self.boss.position = self.arena.confine(moved, BODY_HALF_WIDTH).0;
        Ok(())
    }

    fn step_grunt(&mut self, dt: f32) {
        let facing = self.grunt.is_facing_right();
        self.grunt.fixed_update(&self.arena, self.grunt_position);
        if self.grunt.is_facing_right() != facing {
            self.report.grunt_turns += 1;
        }
        let moved = self.grunt_position + Vec2::new(self.grunt.velocity().x * dt, 0.0);
        self.grunt_position = self.arena.confine(moved, BODY_HALF_WIDTH).0;
    }

    fn apply_damage(&mut self, dt: f32) {
        if self.sequencer.is_dead() {
            return;
        }
        self.boss_health -= self.player_dps * dt * self.sequencer.damage_multiplier();
        if self.boss_health <= 0.0 {
            self.boss_health = 0.0;
            info!("boss defeated");
            self.sequencer.kill(&mut self.boss);
            return;
        }
        self.sequencer.on_health_changed(self.boss_health / BOSS_MAX_HEALTH);
    }

    /// Boss kinematics.
    #[must_use]
    pub const fn boss(&self) -> &BossBody {
        &self.boss
    }

    /// Boss state machine.
    #[must_use]
    pub const fn sequencer(&self) -> &BossSequencer {
        &self.sequencer
    }

    /// Where the grunt currently stands.
    #[must_use]
    pub const fn grunt_position(&self) -> Vec2 {
        self.grunt_position
    }

    /// Running totals.
    #[must_use]
    pub const fn report(&self) -> &SimulationReport {
        &self.report
    }
}
