//! Charge attack that runs until the boss hits a wall.

use log::{debug, warn};

use super::Routine;
use crate::boss::attack::{AttackBehaviour, AttackParams, AttackPhase, AttackPoll, ScaledParams};
use crate::boss::body::BossBody;

/// Charges along the facing direction with the hitbox on.
///
/// The charge ends on wall contact or, if no wall is ever reached, after the
/// scaled `active` duration. Either way the boss stops, recovers and asks
/// for a dizzy window. The charge direction is taken from
/// [`BossBody::facing_right`] when the attack is initialised.
#[derive(Debug, Clone)]
pub struct Rush {
    routine: Routine,
    direction: f32,
}

impl Rush {
    /// Creates a rush with phase 1 tuning.
    #[must_use]
    pub fn new(params: AttackParams) -> Self {
        Self {
            routine: Routine::new(params),
            direction: 1.0,
        }
    }

    /// Current stage of the run.
    #[must_use]
    pub const fn phase(&self) -> AttackPhase {
        self.routine.clock.phase()
    }

    /// Parameters for the current difficulty phase.
    #[must_use]
    pub const fn scaled(&self) -> ScaledParams {
        self.routine.scaled
    }

    /// `1.0` for a rightward charge, `-1.0` for leftward.
    #[must_use]
    pub const fn direction(&self) -> f32 {
        self.direction
    }
}

impl AttackBehaviour for Rush {
    fn name(&self) -> &str {
        &self.routine.params.name
    }

    fn initialise(&mut self, body: &BossBody) {
        self.routine.start();
        self.direction = body.facing_sign();
    }

    fn is_initialised(&self) -> bool {
        self.routine.initialised
    }

    fn tick(&mut self, body: &mut BossBody, dt: f32) -> AttackPoll {
        self.routine.clock.advance(dt);
        loop {
            match self.routine.clock.phase() {
                AttackPhase::Telegraph => {
                    if !self.routine.telegraph(body) {
                        return AttackPoll::Pending;
                    }
                    body.activate_hitbox(self.routine.scaled.damage);
                    self.routine.clock.enter(AttackPhase::Active);
                }
                AttackPhase::Active => {
                    let elapsed = self.routine.clock.elapsed();
                    if body.touching_wall {
                        debug!("{} hit a wall after {elapsed:.2}s", self.routine.params.name);
                    } else if self.routine.clock.reached(self.routine.scaled.active) {
                        warn!(
                            "{} found no wall; stopping after {elapsed:.2}s",
                            self.routine.params.name
                        );
                    } else {
                        body.velocity.x = self.direction * self.routine.scaled.speed;
                        return AttackPoll::Pending;
                    }
                    body.safe_stop();
                    self.routine.clock.enter(AttackPhase::Resolution);
                }
                AttackPhase::Resolution | AttackPhase::Handover => {
                    if !self.routine.wind_down() {
                        return AttackPoll::Pending;
                    }
                    self.routine.finish();
                    return AttackPoll::Complete { dizzy: true };
                }
            }
        }
    }

    fn cancel(&mut self, body: &mut BossBody) {
        self.routine.finish();
        body.safe_stop();
    }

    fn upgrade(&mut self, phase: u8) {
        self.routine.upgrade(phase);
    }

    fn max_duration(&self) -> f32 {
        self.routine.params.max_duration
    }
}
