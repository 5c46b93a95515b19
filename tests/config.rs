//! Boss configuration parsing and validation.

use glam::Vec2;
use lantern::config::{AttackSpec, SelectorSpec};
use lantern::{BossBody, BossConfig, BossPatternState, ConfigError};
use rstest::rstest;

const TWO_ATTACKS: &str = r#"{
    "dizzy_duration": 1.5,
    "phase_thresholds": [0.5],
    "selector": { "kind": "pattern", "order": [1, 0] },
    "attacks": [
        { "kind": "rush", "params": {
            "name": "rush", "speed": 12.0, "damage": 20.0, "telegraph": 0.5,
            "active": 4.0, "recovery": 0.5, "max_duration": 8.0 } },
        { "kind": "volley", "shots": 3, "params": {
            "name": "volley", "speed": 9.0, "damage": 5.0, "telegraph": 0.25,
            "active": 1.5, "recovery": 0.25, "max_duration": 5.0,
            "cooldown_by_phase": [1.0, 0.5] } }
    ]
}"#;

#[rstest]
fn parses_a_complete_configuration() {
    let config = BossConfig::from_json_str(TWO_ATTACKS).expect("valid configuration");

    assert_eq!(config.dizzy_duration, 1.5);
    assert_eq!(config.attacks.len(), 2);
    assert_eq!(
        config.selector,
        SelectorSpec::Pattern { order: vec![1, 0] }
    );
    assert!(matches!(
        config.attacks.get(1),
        Some(AttackSpec::Volley { shots: 3, .. })
    ));
}

#[rstest]
fn built_sequencer_follows_the_pattern() {
    let config = BossConfig::from_json_str(TWO_ATTACKS).expect("valid configuration");
    let mut boss = config.build_sequencer(0).expect("sequencer");
    let mut body = BossBody::new(Vec2::new(3.0, 0.5), true);

    boss.start();
    assert_eq!(
        boss.update(&mut body, 0.1),
        Ok(BossPatternState::ExecutingAttack)
    );
    assert_eq!(boss.current_attack(), Some("volley"));
    assert_eq!(boss.attack_names().collect::<Vec<_>>(), vec!["rush", "volley"]);
}

#[rstest]
fn defaults_fill_missing_fields() {
    let config = BossConfig::from_json_str(
        r#"{ "attacks": [ { "kind": "slam", "params": {
            "name": "slam", "speed": 0.0, "damage": 30.0, "telegraph": 0.5,
            "active": 0.5, "recovery": 0.5, "max_duration": 4.0 } } ] }"#,
    )
    .expect("valid configuration");

    assert_eq!(config.dizzy_duration, lantern::DEFAULT_DIZZY_DURATION);
    assert_eq!(config.selector, SelectorSpec::Random { avoid_repeat: true });
    assert!(config.phase_thresholds.is_empty());
}

#[rstest]
#[case::no_attacks(r#"{ "attacks": [] }"#)]
#[case::other_fields_set(r#"{ "dizzy_duration": 3.0, "phase_thresholds": [0.5], "attacks": [] }"#)]
fn rejects_empty_attack_list(#[case] json: &str) {
    assert!(matches!(
        BossConfig::from_json_str(json),
        Err(ConfigError::NoAttacks)
    ));
}

#[rstest]
fn rejects_negative_dizzy_duration() {
    let config = BossConfig {
        dizzy_duration: -1.0,
        ..BossConfig::default()
    };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::Dizzy { field: "duration", .. })
    ));
}

#[rstest]
fn rejects_unknown_attack_kind() {
    let json = r#"{ "attacks": [ { "kind": "laser", "params": {} } ] }"#;
    assert!(matches!(
        BossConfig::from_json_str(json),
        Err(ConfigError::Parse(_))
    ));
}

#[rstest]
fn rejects_pattern_outside_attack_list() {
    let mut config = BossConfig::default();
    config.selector = SelectorSpec::Pattern { order: vec![0, 7] };
    assert!(matches!(
        config.validate(),
        Err(ConfigError::PatternOutOfRange { index: 7, count: 3 })
    ));
}

#[rstest]
fn rejects_empty_pattern() {
    let mut config = BossConfig::default();
    config.selector = SelectorSpec::Pattern { order: Vec::new() };
    assert!(matches!(config.validate(), Err(ConfigError::EmptyPattern)));
}

#[rstest]
#[case::zero_ceiling("max_duration", 0.0)]
#[case::negative_recovery("recovery", -0.5)]
fn rejects_bad_attack_timing(#[case] field: &str, #[case] value: f32) {
    let mut config = BossConfig::default();
    if let Some(AttackSpec::Rush { params }) = config.attacks.first_mut() {
        match field {
            "max_duration" => params.max_duration = value,
            _ => params.recovery = value,
        }
    }
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidParameter { .. })
    ));
}

#[rstest]
fn missing_file_reports_its_path() {
    let error = BossConfig::from_path("/definitely/not/here.json").expect_err("missing file");
    assert!(matches!(error, ConfigError::Io { .. }));
    assert!(error.to_string().contains("/definitely/not/here.json"));
}

#[rstest]
fn configuration_round_trips_through_json() {
    let config = BossConfig::default();
    let json = serde_json::to_string(&config).expect("serialise");
    assert_eq!(BossConfig::from_json_str(&json).expect("parse"), config);
}

#[rstest]
fn attack_longer_than_its_ceiling_is_accepted_but_always_cut_off() {
    let config = BossConfig::from_json_str(
        r#"{ "attacks": [ { "kind": "slam", "params": {
            "name": "slam", "speed": 0.0, "damage": 30.0, "telegraph": 0.5,
            "active": 2.0, "recovery": 0.5, "max_duration": 2.0 } } ] }"#,
    )
    .expect("an over-long attack only warns");
    assert!(config
        .attacks
        .first()
        .is_some_and(|spec| spec.params().outlasts_ceiling()));

    let mut boss = config.build_sequencer(0).expect("sequencer");
    let mut body = BossBody::new(Vec2::new(3.0, 0.5), true);
    boss.start();
    let states: Vec<_> = (0..21)
        .map(|_| boss.update(&mut body, 0.1).expect("update"))
        .collect();

    assert_eq!(states.last(), Some(&BossPatternState::SelectingAttack));
    assert!(!states.contains(&BossPatternState::Dizzy));
    assert!(!body.is_hitbox_active());
}
