//! Built-in boss attacks.
//!
//! Each attack keeps a [`Routine`] holding its tuning and phase clock, and
//! implements only the parts of the wind-up and damaging phases that differ.

mod rush;
mod slam;
mod volley;

pub use rush::Rush;
pub use slam::Slam;
pub use volley::Volley;

use log::debug;

use super::attack::{AttackParams, AttackPhase, PhaseClock, ScaledParams};
use super::body::{BossBody, BossEvent};

/// State shared by every built-in attack.
#[derive(Debug, Clone)]
struct Routine {
    params: AttackParams,
    scaled: ScaledParams,
    clock: PhaseClock,
    initialised: bool,
}

impl Routine {
    fn new(params: AttackParams) -> Self {
        let scaled = params.scaled(1);
        Self {
            params,
            scaled,
            clock: PhaseClock::default(),
            initialised: false,
        }
    }

    fn start(&mut self) {
        self.clock.restart();
        self.initialised = true;
    }

    fn finish(&mut self) {
        self.initialised = false;
    }

    fn upgrade(&mut self, phase: u8) {
        self.scaled = self.params.scaled(phase);
        debug!(
            "{} upgraded to phase {}: speed {:.2}, damage {:.2}",
            self.params.name, self.scaled.phase, self.scaled.speed, self.scaled.damage
        );
    }

    /// Holds the boss still through the wind-up. Returns `true` once the
    /// telegraph duration has elapsed.
    fn telegraph(&mut self, body: &mut BossBody) -> bool {
        if self.clock.take_entry() {
            body.emit(BossEvent::Telegraph {
                attack: self.params.name.clone(),
            });
        }
        body.velocity.x = 0.0;
        self.clock.reached(self.params.telegraph)
    }

    /// Runs recovery and cooldown. Returns `true` once both have elapsed.
    fn wind_down(&mut self) -> bool {
        loop {
            match self.clock.phase() {
                AttackPhase::Resolution => {
                    if !self.clock.reached(self.params.recovery) {
                        return false;
                    }
                    self.clock.enter(AttackPhase::Handover);
                }
                AttackPhase::Handover => return self.clock.reached(self.scaled.cooldown),
                AttackPhase::Telegraph | AttackPhase::Active => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn params() -> AttackParams {
        AttackParams {
            name: "sample".into(),
            speed: 4.0,
            damage: 2.0,
            telegraph: 0.5,
            active: 1.0,
            recovery: 0.25,
            max_duration: 5.0,
            cooldown_by_phase: vec![0.5],
        }
    }

    #[test]
    fn telegraph_announces_once_and_holds_still() {
        let mut routine = Routine::new(params());
        let mut body = BossBody::new(Vec2::ZERO, true);
        body.velocity = Vec2::new(3.0, -1.0);
        routine.start();

        assert!(!routine.telegraph(&mut body));
        assert!(!routine.telegraph(&mut body));

        assert_eq!(body.velocity, Vec2::new(0.0, -1.0));
        assert_eq!(body.events().len(), 1);
    }

    #[test]
    fn wind_down_waits_for_recovery_then_cooldown() {
        let mut routine = Routine::new(params());
        routine.start();
        routine.clock.enter(AttackPhase::Resolution);

        routine.clock.advance(0.25);
        assert!(!routine.wind_down());
        assert_eq!(routine.clock.phase(), AttackPhase::Handover);

        routine.clock.advance(0.5);
        assert!(routine.wind_down());
    }
}
