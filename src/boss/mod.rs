//! Boss attack sequencing.
//!
//! A [`BossSequencer`] owns the boss's [`AttackBehaviour`]s and a
//! [`AttackSelector`], and drives them against a [`BossBody`] one tick at a
//! time.

pub mod attack;
pub mod attacks;
pub mod body;
pub mod selector;
pub mod sequencer;

pub use attack::{
    damage_multiplier, speed_multiplier, AttackBehaviour, AttackParams, AttackPhase, AttackPoll,
    ScaledParams,
};
pub use attacks::{Rush, Slam, Volley};
pub use body::{BossBody, BossEvent, ControlOwner};
pub use selector::{AttackSelector, PatternSelector, RandomSelector};
pub use sequencer::{BossPatternState, BossSequencer, SequencerSettings};
