//! Attack contract and the parameter scaling shared by all attacks.
//!
//! Attacks are resumable state machines. The sequencer calls
//! [`AttackBehaviour::tick`] once per simulation step and the attack walks
//! through [`AttackPhase`]s until it reports [`AttackPoll::Complete`].

use serde::{Deserialize, Serialize};

use super::body::BossBody;
use crate::error::ConfigError;
use crate::{PHASE_DAMAGE_STEP, PHASE_SPEED_STEP};

/// Progress reported by an attack after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackPoll {
    /// The attack wants another tick.
    Pending,
    /// The attack finished and handed control back.
    Complete {
        /// Whether the boss should now enter its vulnerability window.
        dizzy: bool,
    },
}

/// Stage of a running attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttackPhase {
    /// Visible wind-up; no damage yet.
    #[default]
    Telegraph,
    /// Damaging part of the attack.
    Active,
    /// Recovery after the damaging part.
    Resolution,
    /// Phase-specific cooldown before control returns to the sequencer.
    Handover,
}

/// A boss attack driven by [`crate::boss::BossSequencer`].
pub trait AttackBehaviour: Send + Sync {
    /// Name used in diagnostics and configuration.
    fn name(&self) -> &str;

    /// Prepares a fresh run. Must be called before every execution.
    fn initialise(&mut self, body: &BossBody);

    /// Whether [`AttackBehaviour::initialise`] has been called since the
    /// last completion or cancellation.
    fn is_initialised(&self) -> bool;

    /// Advances the attack by `dt` seconds.
    fn tick(&mut self, body: &mut BossBody, dt: f32) -> AttackPoll;

    /// Aborts a run. Implementations must leave the body with zero velocity
    /// and no active hitbox.
    fn cancel(&mut self, body: &mut BossBody);

    /// Recomputes derived parameters for difficulty `phase` from base values.
    fn upgrade(&mut self, phase: u8);

    /// Hard ceiling on one run, enforced by the sequencer.
    fn max_duration(&self) -> f32;
}

/// Base tuning of an attack as authored in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackParams {
    /// Attack name.
    pub name: String,
    /// Movement or projectile speed at phase 1.
    pub speed: f32,
    /// Contact damage at phase 1.
    pub damage: f32,
    /// Wind-up duration in seconds.
    pub telegraph: f32,
    /// Duration (or ceiling) of the damaging part at phase 1.
    pub active: f32,
    /// Recovery duration in seconds.
    pub recovery: f32,
    /// Hard ceiling on a whole run in seconds.
    pub max_duration: f32,
    /// Cooldown per phase; the last entry applies to later phases.
    #[serde(default)]
    pub cooldown_by_phase: Vec<f32>,
}

impl AttackParams {
    /// Checks that every duration and rate is usable.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidParameter`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("speed", self.speed),
            ("damage", self.damage),
            ("telegraph", self.telegraph),
            ("active", self.active),
            ("recovery", self.recovery),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(self.invalid(field, "finite and non-negative", value));
            }
        }
        if !self.max_duration.is_finite() || self.max_duration <= 0.0 {
            return Err(self.invalid("max_duration", "finite and positive", self.max_duration));
        }
        if let Some(&bad) = self
            .cooldown_by_phase
            .iter()
            .find(|c| !c.is_finite() || **c < 0.0)
        {
            return Err(self.invalid("cooldown_by_phase", "finite and non-negative", bad));
        }
        Ok(())
    }

    /// Longest an unobstructed phase 1 run takes on its own: wind-up, the
    /// whole damaging part, recovery and the longest cooldown.
    #[must_use]
    pub fn longest_run(&self) -> f32 {
        let cooldown = self.cooldown_by_phase.iter().copied().fold(0.0, f32::max);
        self.telegraph + self.active + self.recovery + cooldown
    }

    /// Whether the sequencer ceiling cancels an unobstructed run before it
    /// finishes. Such a run never reports completion, so it never opens a
    /// dizzy window either. A [`crate::boss::Rush`] that meets a wall early
    /// can still finish.
    #[must_use]
    pub fn outlasts_ceiling(&self) -> bool {
        self.longest_run() >= self.max_duration
    }

    fn invalid(&self, field: &'static str, requirement: &'static str, value: f32) -> ConfigError {
        ConfigError::InvalidParameter {
            attack: self.name.clone(),
            field,
            requirement,
            value,
        }
    }

    /// Derives the parameters used at difficulty `phase`.
    ///
    /// Always computed from the base values, so repeated calls with the same
    /// phase give identical results.
    ///
    /// # Examples
    /// ```
    /// use lantern::boss::AttackParams;
    ///
    /// let params = AttackParams {
    ///     name: "rush".into(),
    ///     speed: 10.0,
    ///     damage: 20.0,
    ///     telegraph: 0.5,
    ///     active: 3.0,
    ///     recovery: 0.5,
    ///     max_duration: 8.0,
    ///     cooldown_by_phase: vec![1.0, 0.5],
    /// };
    /// let scaled = params.scaled(2);
    /// assert!((scaled.speed - 12.0).abs() < 1e-5);
    /// assert!((scaled.damage - 25.0).abs() < 1e-5);
    /// assert_eq!(scaled.cooldown, 0.5);
    /// ```
    #[must_use]
    pub fn scaled(&self, phase: u8) -> ScaledParams {
        let tier = phase.max(1);
        let speed_factor = speed_multiplier(tier);
        let cooldown = self
            .cooldown_by_phase
            .get(usize::from(tier - 1))
            .or_else(|| self.cooldown_by_phase.last())
            .copied()
            .unwrap_or(0.0);
        ScaledParams {
            phase: tier,
            speed: self.speed * speed_factor,
            damage: self.damage * damage_multiplier(tier),
            active: self.active / speed_factor,
            cooldown,
        }
    }
}

/// Speed factor applied at difficulty `phase` (phase 1 is the baseline).
#[must_use]
pub fn speed_multiplier(phase: u8) -> f32 {
    1.0 + PHASE_SPEED_STEP * f32::from(phase.saturating_sub(1))
}

/// Damage factor applied at difficulty `phase` (phase 1 is the baseline).
#[must_use]
pub fn damage_multiplier(phase: u8) -> f32 {
    1.0 + PHASE_DAMAGE_STEP * f32::from(phase.saturating_sub(1))
}

/// Attack parameters after difficulty scaling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledParams {
    /// Phase these values were derived for.
    pub phase: u8,
    /// Scaled speed.
    pub speed: f32,
    /// Scaled damage.
    pub damage: f32,
    /// Scaled duration of the damaging part.
    pub active: f32,
    /// Cooldown for this phase.
    pub cooldown: f32,
}

/// Whether `elapsed` seconds, accumulated in steps of `dt`, cover
/// `duration`.
///
/// Summing a step that has no exact binary form drifts by far more than
/// `f32::EPSILON`, so the comparison allows half a step of slack. A duration
/// that is a whole number of steps therefore ends on exactly that step, and
/// any other duration ends on the nearest one.
#[must_use]
pub const fn elapsed_covers(elapsed: f32, duration: f32, dt: f32) -> bool {
    elapsed + dt * 0.5 >= duration
}

/// Tracks the current [`AttackPhase`] and time spent in it.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PhaseClock {
    phase: AttackPhase,
    elapsed: f32,
    step: f32,
    fresh: bool,
}

impl PhaseClock {
    /// Restarts at [`AttackPhase::Telegraph`].
    pub(crate) fn restart(&mut self) {
        self.enter(AttackPhase::Telegraph);
    }

    pub(crate) fn enter(&mut self, phase: AttackPhase) {
        self.phase = phase;
        self.elapsed = 0.0;
        self.fresh = true;
    }

    pub(crate) fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
        self.step = dt;
    }

    /// Whether the time spent in the current phase covers `duration`,
    /// judged against the most recent step length.
    pub(crate) const fn reached(&self, duration: f32) -> bool {
        elapsed_covers(self.elapsed, duration, self.step)
    }

    pub(crate) const fn phase(&self) -> AttackPhase {
        self.phase
    }

    pub(crate) const fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Returns `true` the first time it is called after entering a phase.
    pub(crate) fn take_entry(&mut self) -> bool {
        std::mem::replace(&mut self.fresh, false)
    }
}
