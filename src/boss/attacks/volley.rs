//! Projectile volley aimed at the target.

use glam::Vec2;
use log::debug;

use super::Routine;
use crate::boss::attack::{AttackBehaviour, AttackParams, AttackPhase, AttackPoll, ScaledParams};
use crate::boss::body::{BossBody, BossEvent};

/// Fires `shots` projectiles spread evenly across the scaled `active`
/// duration. The first shot leaves as soon as the wind-up ends.
#[derive(Debug, Clone)]
pub struct Volley {
    routine: Routine,
    shots: u16,
    fired: u16,
}

impl Volley {
    /// Creates a volley with phase 1 tuning. At least one shot is fired.
    #[must_use]
    pub fn new(params: AttackParams, shots: u16) -> Self {
        Self {
            routine: Routine::new(params),
            shots: shots.max(1),
            fired: 0,
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

    /// Projectiles fired in the current run.
    #[must_use]
    pub const fn fired(&self) -> u16 {
        self.fired
    }

    fn fire(&mut self, body: &mut BossBody) {
        let aim = (body.target - body.position)
            .try_normalize()
            .unwrap_or(Vec2::new(body.facing_sign(), 0.0));
        body.emit(BossEvent::ProjectileSpawned {
            origin: body.position,
            velocity: aim * self.routine.scaled.speed,
            damage: self.routine.scaled.damage,
        });
        self.fired += 1;
        debug!(
            "{} fired shot {}/{}",
            self.routine.params.name, self.fired, self.shots
        );
    }
}

impl AttackBehaviour for Volley {
    fn name(&self) -> &str {
        &self.routine.params.name
    }

    fn initialise(&mut self, body: &BossBody) {
        self.routine.start();
        self.fired = 0;
        debug!(
            "{} aiming from {:?} at {:?}",
            self.routine.params.name, body.position, body.target
        );
    }

    fn is_initialised(&self) -> bool {
        self.routine.initialised
    }

    fn tick(&mut self, body: &mut BossBody, dt: f32) -> AttackPoll {
        self.routine.clock.advance(dt);
        loop {
            match self.routine.clock.phase() {
                AttackPhase::Telegraph => {
                    let towards = body.target.x - body.position.x;
                    if towards != 0.0 {
                        body.facing_right = towards > 0.0;
                    }
                    if !self.routine.telegraph(body) {
                        return AttackPoll::Pending;
                    }
                    self.routine.clock.enter(AttackPhase::Active);
                }
                AttackPhase::Active => {
                    body.velocity.x = 0.0;
                    let interval = self.routine.scaled.active / f32::from(self.shots);
                    while self.fired < self.shots
                        && self.routine.clock.reached(interval * f32::from(self.fired))
                    {
                        self.fire(body);
                    }
                    let finished = self.routine.clock.reached(self.routine.scaled.active);
                    if self.fired < self.shots || !finished {
                        return AttackPoll::Pending;
                    }
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

#[cfg(test)]
mod tests {
    use super::*;

    fn volley() -> Volley {
        Volley::new(
            AttackParams {
                name: "volley".into(),
                speed: 6.0,
                damage: 5.0,
                telegraph: 0.0,
                active: 1.0,
                recovery: 0.0,
                max_duration: 4.0,
                cooldown_by_phase: Vec::new(),
            },
            4,
        )
    }

    fn shots(body: &BossBody) -> Vec<Vec2> {
        body.events()
            .iter()
            .filter_map(|event| match event {
                BossEvent::ProjectileSpawned { velocity, .. } => Some(*velocity),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn fires_all_shots_towards_target() {
        let mut attack = volley();
        let mut body = BossBody::new(Vec2::ZERO, true);
        body.target = Vec2::new(-3.0, 4.0);
        attack.initialise(&body);

        let mut ticks = 0;
        while attack.tick(&mut body, 0.25) == AttackPoll::Pending {
            ticks += 1;
            assert!(ticks < 10, "volley never finished");
            assert!(attack.fired() <= 4);
        }
        assert_eq!(attack.fired(), 4);

        let fired = shots(&body);
        assert_eq!(fired.len(), 4);
        assert!(fired
            .iter()
            .all(|v| (*v - Vec2::new(-3.6, 4.8)).length() < 1e-4));
        assert!(!body.facing_right);
    }
}
