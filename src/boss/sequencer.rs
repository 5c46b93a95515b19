//! Finite state machine driving a boss through its attacks.
//!
//! ```text
//! Idle -> SelectingAttack -> ExecutingAttack -> (Dizzy) -> SelectingAttack ...
//!                                   any state -> Dead
//! ```
//!
//! Exactly one attack runs at a time. The sequencer advances only when the
//! owner calls [`BossSequencer::update`] once per simulation tick.

use log::{debug, info, warn};
use serde::Serialize;

use super::attack::{elapsed_covers, AttackBehaviour, AttackPoll};
use super::body::{BossBody, ControlOwner};
use super::selector::AttackSelector;
use crate::error::SequencerError;
use crate::{DEFAULT_DIZZY_DAMAGE_MULTIPLIER, DEFAULT_DIZZY_DURATION};

/// Lifecycle state of a boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum BossPatternState {
    /// Waiting for [`BossSequencer::start`].
    #[default]
    Idle,
    /// Choosing the next attack.
    SelectingAttack,
    /// An attack owns the boss.
    ExecutingAttack,
    /// Post-attack vulnerability window.
    Dizzy,
    /// Terminal.
    Dead,
}

/// Tuning of the sequencer itself.
#[derive(Debug, Clone, PartialEq)]
pub struct SequencerSettings {
    /// Length of the vulnerability window in seconds.
    pub dizzy_duration: f32,
    /// Damage multiplier reported while dizzy.
    pub dizzy_damage_multiplier: f32,
    /// Health fractions at which the next phase begins, highest first.
    pub phase_thresholds: Vec<f32>,
}

impl Default for SequencerSettings {
    fn default() -> Self {
        Self {
            dizzy_duration: DEFAULT_DIZZY_DURATION,
            dizzy_damage_multiplier: DEFAULT_DIZZY_DAMAGE_MULTIPLIER,
            phase_thresholds: vec![0.5],
        }
    }
}

/// Selects and drives attacks for one boss.
pub struct BossSequencer {
    attacks: Vec<Box<dyn AttackBehaviour>>,
    selector: Box<dyn AttackSelector>,
    settings: SequencerSettings,
    state: BossPatternState,
    current: Option<usize>,
    attack_elapsed: f32,
    dizzy_remaining: f32,
    phase: u8,
}

impl BossSequencer {
    /// Creates an idle sequencer at phase 1.
    ///
    /// # Errors
    /// Returns [`SequencerError::NoAttacks`] when `attacks` is empty.
    pub fn new(
        attacks: Vec<Box<dyn AttackBehaviour>>,
        selector: Box<dyn AttackSelector>,
        settings: SequencerSettings,
    ) -> Result<Self, SequencerError> {
        if attacks.is_empty() {
            return Err(SequencerError::NoAttacks);
        }
        Ok(Self {
            attacks,
            selector,
            settings,
            state: BossPatternState::Idle,
            current: None,
            attack_elapsed: 0.0,
            dizzy_remaining: 0.0,
            phase: 1,
        })
    }

    /// Leaves [`BossPatternState::Idle`]. Has no effect in any other state.
    pub fn start(&mut self) {
        if self.state == BossPatternState::Idle {
            self.transition(BossPatternState::SelectingAttack);
        }
    }

    /// Advances the state machine by `dt` seconds and returns the new state.
    ///
    /// # Errors
    /// Fails fast with [`SequencerError::NotInitialised`] if the running
    /// attack was never initialised, and with
    /// [`SequencerError::SelectionOutOfRange`] if the selector misbehaves.
    pub fn update(
        &mut self,
        body: &mut BossBody,
        dt: f32,
    ) -> Result<BossPatternState, SequencerError> {
        match self.state {
            BossPatternState::Idle | BossPatternState::Dead => {}
            BossPatternState::SelectingAttack => self.select_attack(body)?,
            BossPatternState::ExecutingAttack => self.run_attack(body, dt)?,
            BossPatternState::Dizzy => {
                self.dizzy_remaining -= dt;
                // Half a step of slack absorbs rounding in the countdown.
                if self.dizzy_remaining <= dt * 0.5 {
                    self.dizzy_remaining = 0.0;
                    self.transition(BossPatternState::SelectingAttack);
                }
            }
        }
        Ok(self.state)
    }

    fn select_attack(&mut self, body: &mut BossBody) -> Result<(), SequencerError> {
        let count = self.attacks.len();
        let index = self.selector.select(count, self.phase);
        let attack = self
            .attacks
            .get_mut(index)
            .ok_or(SequencerError::SelectionOutOfRange { index, count })?;
        attack.initialise(body);
        debug!("selected attack `{}`", attack.name());
        self.current = Some(index);
        self.attack_elapsed = 0.0;
        body.hand_to(ControlOwner::Attack);
        self.transition(BossPatternState::ExecutingAttack);
        Ok(())
    }

    fn run_attack(&mut self, body: &mut BossBody, dt: f32) -> Result<(), SequencerError> {
        let Some(index) = self.current else {
            self.transition(BossPatternState::SelectingAttack);
            return Ok(());
        };
        let count = self.attacks.len();
        let attack = self
            .attacks
            .get_mut(index)
            .ok_or(SequencerError::SelectionOutOfRange { index, count })?;
        if !attack.is_initialised() {
            return Err(SequencerError::NotInitialised {
                attack: attack.name().to_owned(),
            });
        }

        self.attack_elapsed += dt;
        let timed_out = elapsed_covers(self.attack_elapsed, attack.max_duration(), dt);
        let outcome = attack.tick(body, dt);
        let dizzy = match outcome {
            AttackPoll::Complete { dizzy } => dizzy,
            AttackPoll::Pending if timed_out => {
                warn!(
                    "attack `{}` exceeded its {:.2}s ceiling; cancelling",
                    attack.name(),
                    attack.max_duration()
                );
                attack.cancel(body);
                body.safe_stop();
                false
            }
            AttackPoll::Pending => return Ok(()),
        };
        self.finish_attack(body, dizzy);
        Ok(())
    }

    fn finish_attack(&mut self, body: &mut BossBody, dizzy: bool) {
        self.current = None;
        self.attack_elapsed = 0.0;
        body.hand_to(ControlOwner::Movement);
        if dizzy {
            self.dizzy_remaining = self.settings.dizzy_duration;
            self.transition(BossPatternState::Dizzy);
        } else {
            self.transition(BossPatternState::SelectingAttack);
        }
    }

    /// Aborts the running attack, if any, and returns to attack selection.
    ///
    /// Velocity and hitbox are cleared before this returns.
    pub fn cancel_current(&mut self, body: &mut BossBody) {
        if self.abort_running(body) {
            self.finish_attack(body, false);
        }
    }

    /// Kills the boss: aborts any running attack and enters the terminal
    /// [`BossPatternState::Dead`] state.
    pub fn kill(&mut self, body: &mut BossBody) {
        if self.state == BossPatternState::Dead {
            return;
        }
        self.abort_running(body);
        body.safe_stop();
        body.hand_to(ControlOwner::Movement);
        self.current = None;
        self.dizzy_remaining = 0.0;
        self.transition(BossPatternState::Dead);
    }

    fn abort_running(&mut self, body: &mut BossBody) -> bool {
        if self.state != BossPatternState::ExecutingAttack {
            return false;
        }
        if let Some(attack) = self.current.and_then(|index| self.attacks.get_mut(index)) {
            debug!("cancelling attack `{}`", attack.name());
            attack.cancel(body);
        }
        body.safe_stop();
        true
    }

    /// Applies difficulty `phase` to every attack.
    ///
    /// Attacks recompute from their base values, so repeating a phase is
    /// harmless.
    pub fn set_phase(&mut self, phase: u8) {
        let tier = phase.max(1);
        if tier != self.phase {
            info!("boss entering phase {tier}");
        }
        self.phase = tier;
        for attack in &mut self.attacks {
            attack.upgrade(tier);
        }
    }

    /// Maps a health fraction onto a phase and upgrades if it is higher
    /// than the current one. Returns the new phase when it changed.
    pub fn on_health_changed(&mut self, health_fraction: f32) -> Option<u8> {
        let crossed = self
            .settings
            .phase_thresholds
            .iter()
            .filter(|threshold| health_fraction <= **threshold)
            .count();
        let target = u8::try_from(crossed + 1).unwrap_or(u8::MAX);
        if target <= self.phase {
            return None;
        }
        self.set_phase(target);
        Some(target)
    }

    fn transition(&mut self, next: BossPatternState) {
        debug!("boss state {:?} -> {next:?}", self.state);
        self.state = next;
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> BossPatternState {
        self.state
    }

    /// Whether the vulnerability window is open.
    #[must_use]
    pub const fn is_dizzy(&self) -> bool {
        matches!(self.state, BossPatternState::Dizzy)
    }

    /// Whether the boss is dead.
    #[must_use]
    pub const fn is_dead(&self) -> bool {
        matches!(self.state, BossPatternState::Dead)
    }

    /// Current difficulty phase, starting at 1.
    #[must_use]
    pub const fn phase(&self) -> u8 {
        self.phase
    }

    /// Multiplier the damage system should apply to hits on the boss.
    #[must_use]
    pub fn damage_multiplier(&self) -> f32 {
        if self.is_dizzy() {
            self.settings.dizzy_damage_multiplier
        } else {
            1.0
        }
    }

    /// Seconds left in the current dizzy window.
    #[must_use]
    pub const fn dizzy_remaining(&self) -> f32 {
        self.dizzy_remaining
    }

    /// Name of the running attack.
    #[must_use]
    pub fn current_attack(&self) -> Option<&str> {
        self.current
            .and_then(|index| self.attacks.get(index))
            .map(|attack| attack.name())
    }

    /// Names of all registered attacks in registration order.
    pub fn attack_names(&self) -> impl Iterator<Item = &str> {
        self.attacks.iter().map(|attack| attack.name())
    }

    /// Sequencer tuning.
    #[must_use]
    pub const fn settings(&self) -> &SequencerSettings {
        &self.settings
    }
}

impl std::fmt::Debug for BossSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BossSequencer")
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("current", &self.current_attack())
            .field("attacks", &self.attack_names().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
