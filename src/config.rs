//! Boss configuration loaded from JSON.
//!
//! ```json
//! {
//!   "dizzy_duration": 2.0,
//!   "phase_thresholds": [0.5, 0.25],
//!   "selector": { "kind": "pattern", "order": [0, 1, 0, 2] },
//!   "attacks": [
//!     { "kind": "rush", "params": { "name": "rush", "speed": 12.0, ... } },
//!     { "kind": "volley", "shots": 3, "params": { ... } }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::boss::{
    AttackBehaviour, AttackParams, AttackSelector, BossSequencer, PatternSelector,
    RandomSelector, Rush, SequencerSettings, Slam, Volley,
};
use crate::error::ConfigError;
use crate::sensor::SensorConfig;
use crate::{DEFAULT_DIZZY_DAMAGE_MULTIPLIER, DEFAULT_DIZZY_DURATION};

/// One configured attack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttackSpec {
    /// A [`Rush`].
    Rush {
        /// Base tuning.
        params: AttackParams,
    },
    /// A [`Slam`].
    Slam {
        /// Base tuning.
        params: AttackParams,
    },
    /// A [`Volley`].
    Volley {
        /// Base tuning.
        params: AttackParams,
        /// Projectiles per volley.
        shots: u16,
    },
}

impl AttackSpec {
    /// Base tuning of this attack.
    #[must_use]
    pub const fn params(&self) -> &AttackParams {
        match self {
            Self::Rush { params } | Self::Slam { params } | Self::Volley { params, .. } => params,
        }
    }

    /// Instantiates the attack at phase 1.
    #[must_use]
    pub fn build(&self) -> Box<dyn AttackBehaviour> {
        match self {
            Self::Rush { params } => Box::new(Rush::new(params.clone())),
            Self::Slam { params } => Box::new(Slam::new(params.clone())),
            Self::Volley { params, shots } => Box::new(Volley::new(params.clone(), *shots)),
        }
    }
}

/// How the next attack is chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectorSpec {
    /// Uniform random choice.
    Random {
        /// Never choose the same attack twice in a row.
        #[serde(default)]
        avoid_repeat: bool,
    },
    /// Fixed table of attack indices.
    Pattern {
        /// Indices into the attack list, cycled.
        order: Vec<usize>,
    },
}

impl Default for SelectorSpec {
    fn default() -> Self {
        Self::Random { avoid_repeat: true }
    }
}

impl SelectorSpec {
    fn build(&self, seed: u64) -> Box<dyn AttackSelector> {
        match self {
            Self::Random { avoid_repeat } => Box::new(RandomSelector::seeded(seed, *avoid_repeat)),
            Self::Pattern { order } => Box::new(PatternSelector::new(order.clone())),
        }
    }
}

const fn default_dizzy_duration() -> f32 {
    DEFAULT_DIZZY_DURATION
}

const fn default_dizzy_damage_multiplier() -> f32 {
    DEFAULT_DIZZY_DAMAGE_MULTIPLIER
}

/// Complete description of one boss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossConfig {
    /// Length of the vulnerability window.
    #[serde(default = "default_dizzy_duration")]
    pub dizzy_duration: f32,
    /// Damage multiplier while dizzy.
    #[serde(default = "default_dizzy_damage_multiplier")]
    pub dizzy_damage_multiplier: f32,
    /// Health fractions starting phases 2, 3, ... in descending order.
    #[serde(default)]
    pub phase_thresholds: Vec<f32>,
    /// Attack selection policy.
    #[serde(default)]
    pub selector: SelectorSpec,
    /// Ray tuning for the boss's own movement.
    #[serde(default)]
    pub sensors: SensorConfig,
    /// Attacks in registration order.
    pub attacks: Vec<AttackSpec>,
}

impl BossConfig {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and any validation
    /// error from [`BossConfig::validate`].
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON configuration file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`BossConfig::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = path.as_ref();
        let json = fs::read_to_string(file).map_err(|source| ConfigError::Io {
            path: file.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        info!(
            "loaded boss configuration {} with {} attacks",
            file.display(),
            config.attacks.len()
        );
        Ok(config)
    }

    /// Checks ranges and cross references.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attacks.is_empty() {
            return Err(ConfigError::NoAttacks);
        }
        for (field, value) in [
            ("duration", self.dizzy_duration),
            ("damage multiplier", self.dizzy_damage_multiplier),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Dizzy { field, value });
            }
        }
        let in_range = self
            .phase_thresholds
            .iter()
            .all(|t| t.is_finite() && *t > 0.0 && *t < 1.0);
        let descending = self.phase_thresholds.windows(2).all(|pair| match pair {
            [higher, lower] => higher > lower,
            _ => true,
        });
        if !in_range || !descending {
            return Err(ConfigError::PhaseThresholds(self.phase_thresholds.clone()));
        }
        for params in self.attacks.iter().map(AttackSpec::params) {
            params.validate()?;
            if params.outlasts_ceiling() {
                warn!(
                    "attack `{}` runs up to {:.2}s but is cancelled at {:.2}s",
                    params.name,
                    params.longest_run(),
                    params.max_duration
                );
            }
        }
        if let SelectorSpec::Pattern { order } = &self.selector {
            if order.is_empty() {
                return Err(ConfigError::EmptyPattern);
            }
            let count = self.attacks.len();
            if let Some(&index) = order.iter().find(|index| **index >= count) {
                return Err(ConfigError::PatternOutOfRange { index, count });
            }
        }
        Ok(())
    }

    /// Sequencer tuning described by this configuration.
    #[must_use]
    pub fn settings(&self) -> SequencerSettings {
        SequencerSettings {
            dizzy_duration: self.dizzy_duration,
            dizzy_damage_multiplier: self.dizzy_damage_multiplier,
            phase_thresholds: self.phase_thresholds.clone(),
        }
    }

    /// Builds an idle sequencer. `seed` feeds random selection.
    ///
    /// # Errors
    /// Returns any validation error.
    pub fn build_sequencer(&self, seed: u64) -> Result<BossSequencer, ConfigError> {
        self.validate()?;
        let attacks = self.attacks.iter().map(AttackSpec::build).collect();
        BossSequencer::new(attacks, self.selector.build(seed), self.settings())
            .map_err(ConfigError::from)
    }
}

fn attack(name: &str, speed: f32, damage: f32, active: f32, max_duration: f32) -> AttackParams {
    AttackParams {
        name: name.to_owned(),
        speed,
        damage,
        telegraph: 0.6,
        active,
        recovery: 0.4,
        max_duration,
        cooldown_by_phase: vec![1.0, 0.6, 0.3],
    }
}

impl Default for BossConfig {
    /// A three-attack boss with two phase thresholds.
    fn default() -> Self {
        Self {
            dizzy_duration: DEFAULT_DIZZY_DURATION,
            dizzy_damage_multiplier: DEFAULT_DIZZY_DAMAGE_MULTIPLIER,
            phase_thresholds: vec![0.6, 0.3],
            selector: SelectorSpec::default(),
            sensors: SensorConfig::default(),
            attacks: vec![
                AttackSpec::Rush {
                    params: attack("rush", 12.0, 20.0, 5.0, 10.0),
                },
                AttackSpec::Slam {
                    params: attack("slam", 0.0, 30.0, 0.5, 5.0),
                },
                AttackSpec::Volley {
                    params: attack("volley", 9.0, 8.0, 1.5, 6.0),
                    shots: 3,
                },
            ],
        }
    }
}
