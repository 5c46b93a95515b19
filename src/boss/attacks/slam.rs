//! Stationary ground slam.

use super::Routine;
use crate::boss::attack::{AttackBehaviour, AttackParams, AttackPhase, AttackPoll, ScaledParams};
use crate::boss::body::BossBody;

/// Winds up, then keeps a damaging hitbox out for the scaled `active`
/// duration. Does not leave the boss dizzy.
#[derive(Debug, Clone)]
pub struct Slam {
    routine: Routine,
}

impl Slam {
    /// Creates a slam with phase 1 tuning.
    #[must_use]
    pub fn new(params: AttackParams) -> Self {
        Self {
            routine: Routine::new(params),
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
}

impl AttackBehaviour for Slam {
    fn name(&self) -> &str {
        &self.routine.params.name
    }

    fn initialise(&mut self, _body: &BossBody) {
        self.routine.start();
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
                    body.velocity.x = 0.0;
                    if !self.routine.clock.reached(self.routine.scaled.active) {
                        return AttackPoll::Pending;
                    }
                    body.deactivate_hitbox();
                    self.routine.clock.enter(AttackPhase::Resolution);
                }
                AttackPhase::Resolution | AttackPhase::Handover => {
                    if !self.routine.wind_down() {
                        return AttackPoll::Pending;
                    }
                    self.routine.finish();
                    return AttackPoll::Complete { dizzy: false };
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
