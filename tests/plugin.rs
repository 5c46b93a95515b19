//! Bevy integration of steering and boss sequencing.

use std::time::Duration;

use bevy::prelude::*;
use glam::Vec2;
use lantern::boss::{PatternSelector, SequencerSettings};
use lantern::plugin::{Boss, BossSignal, Facing, LanternError, Sensors, Steering, Velocity};
use lantern::steering::Pursue;
use lantern::{BossBody, BossEvent, BossPatternState, BossSequencer, LanternPlugin, SequencerError};
use rstest::{fixture, rstest};
use test_utils::{grounded, StubAttack};

#[derive(Resource, Default, Debug)]
struct Captured {
    errors: Vec<LanternError>,
    signals: Vec<BossEvent>,
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_error(event: On<LanternError>, mut captured: ResMut<Captured>) {
    captured.errors.push(event.event().clone());
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must take On<T> by value."
)]
fn record_signal(event: On<BossSignal>, mut captured: ResMut<Captured>) {
    captured.signals.push(event.event().event.clone());
}

#[fixture]
fn app() -> App {
    let mut app = App::new();
    app.add_plugins(LanternPlugin);
    app.init_resource::<Captured>();
    app.add_observer(record_error);
    app.add_observer(record_signal);
    app
}

fn boss(attack: StubAttack) -> Boss {
    let sequencer = BossSequencer::new(
        vec![attack.boxed()],
        Box::new(PatternSelector::new(vec![0])),
        SequencerSettings::default(),
    )
    .expect("one attack registered");
    Boss::new(sequencer, BossBody::new(Vec2::new(2.0, 0.5), true))
}

fn step(app: &mut App) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_millis(125));
    app.world_mut().run_schedule(FixedUpdate);
}

fn spawn_boss(app: &mut App, attack: StubAttack) -> Entity {
    app.world_mut()
        .spawn((
            Sensors(grounded(2.0, true)),
            Steering::new(Pursue::new(3.0, Vec2::new(15.0, 0.5), 1.0)),
            Velocity::default(),
            Facing(true),
            boss(attack),
        ))
        .id()
}

#[rstest]
fn steering_moves_agents_until_an_attack_takes_over(mut app: App) {
    let entity = spawn_boss(&mut app, StubAttack::endless("charge", 30.0));

    step(&mut app);
    let world = app.world();
    let steered = world.get::<Steering>(entity).map(Steering::last_output);
    assert_eq!(steered.map(|o| o.desired_velocity.x), Some(3.0));
    assert_eq!(
        world.get::<Boss>(entity).map(|b| b.sequencer.state()),
        Some(BossPatternState::ExecutingAttack)
    );

    step(&mut app);
    let world = app.world();
    assert_eq!(world.get::<Velocity>(entity), Some(&Velocity(Vec2::new(8.0, 0.0))));
    let captured = world.resource::<Captured>();
    assert!(captured
        .signals
        .iter()
        .any(|signal| matches!(signal, BossEvent::HitboxActivated { .. })));
}

#[rstest]
fn dizzy_boss_stands_still(mut app: App) {
    let entity = spawn_boss(&mut app, StubAttack::one_shot("slam"));

    step(&mut app);
    step(&mut app);
    step(&mut app);

    let world = app.world();
    assert_eq!(
        world.get::<Boss>(entity).map(|b| b.sequencer.is_dizzy()),
        Some(true)
    );
    assert_eq!(world.get::<Velocity>(entity).map(|v| v.0.x), Some(0.0));
}

#[rstest]
fn sequencer_failure_is_reported_and_kills_the_boss(mut app: App) {
    let entity = spawn_boss(&mut app, StubAttack::one_shot("broken").broken());

    step(&mut app);
    step(&mut app);

    let world = app.world();
    let captured = world.resource::<Captured>();
    let error = captured.errors.first().expect("error observed");
    assert_eq!(error.entity, entity);
    assert_eq!(
        error.source,
        SequencerError::NotInitialised {
            attack: "broken".to_owned()
        }
    );
    assert_eq!(
        world.get::<Boss>(entity).map(|b| b.sequencer.is_dead()),
        Some(true)
    );
}
