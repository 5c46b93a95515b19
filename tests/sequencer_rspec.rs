//! Behaviour tests for the boss sequencer lifecycle using rust-rspec.

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

use std::sync::{Arc, Mutex, MutexGuard};

use approx::assert_relative_eq;
use glam::Vec2;
use lantern::boss::{PatternSelector, SequencerSettings};
use lantern::{BossBody, BossPatternState, BossSequencer, ControlOwner};
use rspec::block::Context as Scenario;
use rspec_runner::run_serial;
use test_utils::{StubAttack, StubTally};

const DT: f32 = 1.0 / 60.0;
const DIZZY: f32 = 2.0;
const CEILING: f32 = 5.0;
const TICK_LIMIT: u32 = 1_000;

#[derive(Debug)]
struct Encounter {
    sequencer: BossSequencer,
    body: BossBody,
    tally: Arc<StubTally>,
    ticks_in_state: u16,
}

impl Encounter {
    fn new(attack: StubAttack) -> Self {
        let tally = attack.tally();
        let settings = SequencerSettings {
            dizzy_duration: DIZZY,
            dizzy_damage_multiplier: 2.0,
            phase_thresholds: vec![0.5],
        };
        let mut sequencer = BossSequencer::new(
            vec![attack.boxed()],
            Box::new(PatternSelector::new(vec![0])),
            settings,
        )
        .expect("one attack is registered");
        sequencer.start();
        Self {
            sequencer,
            body: BossBody::new(Vec2::new(4.0, 0.5), true),
            tally,
            ticks_in_state: 0,
        }
    }

    fn tick(&mut self) -> BossPatternState {
        self.sequencer
            .update(&mut self.body, DT)
            .expect("sequencer update failed")
    }

    fn tick_until(&mut self, state: BossPatternState) {
        for _ in 0..TICK_LIMIT {
            if self.tick() == state {
                return;
            }
        }
        panic!("never reached {state:?}");
    }

    /// Ticks while the sequencer stays in `state`, counting the update that
    /// leaves it.
    fn measure_while(&mut self, state: BossPatternState) {
        self.ticks_in_state = 0;
        for _ in 0..TICK_LIMIT {
            self.ticks_in_state += 1;
            if self.tick() != state {
                return;
            }
        }
        panic!("never left {state:?}");
    }
}

#[derive(Debug, Clone)]
struct EncounterFixture {
    encounter: Arc<Mutex<Option<Encounter>>>,
}

impl EncounterFixture {
    fn new() -> Self {
        Self {
            encounter: Arc::new(Mutex::new(None)),
        }
    }

    fn reset(&self, attack: StubAttack) {
        *self.lock() = Some(Encounter::new(attack));
    }

    fn lock(&self) -> MutexGuard<'_, Option<Encounter>> {
        self.encounter
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn with<R>(&self, f: impl FnOnce(&mut Encounter) -> R) -> R {
        let mut guard = self.lock();
        f(guard.as_mut().expect("fixture was not reset"))
    }
}

#[test]
fn dizzy_window_lasts_its_configured_duration() {
    run_serial(&rspec::given(
        "a boss whose only attack completes at once and requests a dizzy window",
        EncounterFixture::new(),
        |scenario: &mut Scenario<EncounterFixture>| {
            scenario.before_each(|fixture| {
                fixture.reset(StubAttack::one_shot("stub"));
                fixture.with(|encounter| {
                    encounter.tick_until(BossPatternState::Dizzy);
                    assert_relative_eq!(encounter.sequencer.damage_multiplier(), 2.0);
                    encounter.measure_while(BossPatternState::Dizzy);
                });
            });

            scenario.then("the window lasts exactly the dizzy duration", |fixture| {
                fixture.with(|encounter| {
                    assert_relative_eq!(
                        f32::from(encounter.ticks_in_state),
                        (DIZZY / DT).round()
                    );
                });
            });

            scenario.then("the boss goes back to choosing an attack", |fixture| {
                fixture.with(|encounter| {
                    assert_eq!(
                        encounter.sequencer.state(),
                        BossPatternState::SelectingAttack
                    );
                    assert_relative_eq!(encounter.sequencer.damage_multiplier(), 1.0);
                });
            });

            scenario.then("movement owns the body again", |fixture| {
                fixture.with(|encounter| {
                    assert_eq!(encounter.body.owner(), ControlOwner::Movement);
                });
            });
        },
    ));
}

#[test]
fn runaway_attack_is_cut_off_at_its_ceiling() {
    run_serial(&rspec::given(
        "a boss whose attack never finishes on its own",
        EncounterFixture::new(),
        |scenario: &mut Scenario<EncounterFixture>| {
            scenario.before_each(|fixture| {
                fixture.reset(StubAttack::endless("stuck", CEILING));
                fixture.with(|encounter| {
                    encounter.tick_until(BossPatternState::ExecutingAttack);
                    encounter.measure_while(BossPatternState::ExecutingAttack);
                });
            });

            scenario.then("execution ends on the tick that reaches five seconds", |fixture| {
                fixture.with(|encounter| {
                    assert_relative_eq!(
                        f32::from(encounter.ticks_in_state),
                        (CEILING / DT).round()
                    );
                });
            });

            scenario.then("the attack is cancelled and the body stopped", |fixture| {
                fixture.with(|encounter| {
                    assert_eq!(encounter.tally.cancelled(), 1);
                    assert_eq!(encounter.body.velocity, Vec2::ZERO);
                    assert!(!encounter.body.is_hitbox_active());
                });
            });

            scenario.then("no dizzy window is granted", |fixture| {
                fixture.with(|encounter| {
                    assert_eq!(
                        encounter.sequencer.state(),
                        BossPatternState::SelectingAttack
                    );
                });
            });
        },
    ));
}

#[test]
fn cancelling_mid_attack_stops_the_boss_immediately() {
    run_serial(&rspec::given(
        "a boss charging with its hitbox on",
        EncounterFixture::new(),
        |scenario: &mut Scenario<EncounterFixture>| {
            scenario.before_each(|fixture| {
                fixture.reset(StubAttack::endless("charge", 30.0));
                fixture.with(|encounter| {
                    encounter.tick_until(BossPatternState::ExecutingAttack);
                    encounter.tick();
                    encounter.tick();
                    assert!(encounter.body.is_hitbox_active());
                    assert!(encounter.body.velocity.x > 0.0);
                    encounter.sequencer.cancel_current(&mut encounter.body);
                });
            });

            scenario.then("velocity and hitbox are cleared in the same tick", |fixture| {
                fixture.with(|encounter| {
                    assert_eq!(encounter.body.velocity, Vec2::ZERO);
                    assert!(!encounter.body.is_hitbox_active());
                    assert_eq!(encounter.tally.cancelled(), 1);
                });
            });

            scenario.then("the sequencer is ready to select again", |fixture| {
                fixture.with(|encounter| {
                    assert_eq!(
                        encounter.sequencer.state(),
                        BossPatternState::SelectingAttack
                    );
                    assert_eq!(encounter.sequencer.current_attack(), None);
                });
            });
        },
    ));
}

#[test]
fn death_is_terminal() {
    run_serial(&rspec::given(
        "a boss killed in the middle of an attack",
        EncounterFixture::new(),
        |scenario: &mut Scenario<EncounterFixture>| {
            scenario.before_each(|fixture| {
                fixture.reset(StubAttack::endless("charge", 30.0));
                fixture.with(|encounter| {
                    encounter.tick_until(BossPatternState::ExecutingAttack);
                    encounter.tick();
                    encounter.sequencer.kill(&mut encounter.body);
                });
            });

            scenario.then("the body is stopped and disarmed", |fixture| {
                fixture.with(|encounter| {
                    assert_eq!(encounter.body.velocity, Vec2::ZERO);
                    assert!(!encounter.body.is_hitbox_active());
                });
            });

            scenario.then("further updates neither tick nor restart anything", |fixture| {
                fixture.with(|encounter| {
                    let ticks = encounter.tally.ticks();
                    for _ in 0..10 {
                        assert_eq!(encounter.tick(), BossPatternState::Dead);
                    }
                    encounter.sequencer.start();
                    assert!(encounter.sequencer.is_dead());
                    assert_eq!(encounter.tally.ticks(), ticks);
                });
            });
        },
    ));
}
