//! Scriptable attack used to exercise the sequencer.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use lantern::{AttackBehaviour, AttackPoll, BossBody};

/// Counters shared between a [`StubAttack`] and the test observing it.
#[derive(Debug, Default)]
pub struct StubTally {
    initialised: AtomicU32,
    ticks: AtomicU32,
    cancelled: AtomicU32,
    upgraded_to: AtomicU32,
}

impl StubTally {
    /// Times the attack was initialised.
    #[must_use]
    pub fn initialised(&self) -> u32 {
        self.initialised.load(Ordering::SeqCst)
    }

    /// Ticks received across all runs.
    #[must_use]
    pub fn ticks(&self) -> u32 {
        self.ticks.load(Ordering::SeqCst)
    }

    /// Times the attack was cancelled.
    #[must_use]
    pub fn cancelled(&self) -> u32 {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Phase passed to the latest upgrade, `0` when never upgraded.
    #[must_use]
    pub fn upgraded_to(&self) -> u32 {
        self.upgraded_to.load(Ordering::SeqCst)
    }
}

/// Attack that charges with its hitbox on and completes after a fixed number
/// of ticks, or never.
#[derive(Debug, Clone)]
pub struct StubAttack {
    name: String,
    completes_after: Option<u32>,
    dizzy: bool,
    max_duration: f32,
    marks_initialised: bool,
    initialised: bool,
    run_ticks: u32,
    tally: Arc<StubTally>,
}

impl StubAttack {
    /// Completes on its first tick and requests a dizzy window.
    #[must_use]
    pub fn one_shot(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            completes_after: Some(1),
            dizzy: true,
            max_duration: 5.0,
            marks_initialised: true,
            initialised: false,
            run_ticks: 0,
            tally: Arc::new(StubTally::default()),
        }
    }

    /// Never completes on its own.
    #[must_use]
    pub fn endless(name: &str, max_duration: f32) -> Self {
        Self {
            completes_after: None,
            max_duration,
            ..Self::one_shot(name)
        }
    }

    /// Completes after `ticks` ticks.
    #[must_use]
    pub fn completing_after(mut self, ticks: u32) -> Self {
        self.completes_after = Some(ticks);
        self
    }

    /// Sets whether completion requests a dizzy window.
    #[must_use]
    pub fn with_dizzy(mut self, dizzy: bool) -> Self {
        self.dizzy = dizzy;
        self
    }

    /// Makes `initialise` forget to mark the attack ready.
    #[must_use]
    pub fn broken(mut self) -> Self {
        self.marks_initialised = false;
        self
    }

    /// Counters observable after the attack is boxed.
    #[must_use]
    pub fn tally(&self) -> Arc<StubTally> {
        Arc::clone(&self.tally)
    }

    /// Boxes the attack for the sequencer.
    #[must_use]
    pub fn boxed(self) -> Box<dyn AttackBehaviour> {
        Box::new(self)
    }
}

impl AttackBehaviour for StubAttack {
    fn name(&self) -> &str {
        &self.name
    }

    fn initialise(&mut self, _body: &BossBody) {
        self.tally.initialised.fetch_add(1, Ordering::SeqCst);
        self.initialised = self.marks_initialised;
        self.run_ticks = 0;
    }

    fn is_initialised(&self) -> bool {
        self.initialised
    }

    fn tick(&mut self, body: &mut BossBody, _dt: f32) -> AttackPoll {
        self.tally.ticks.fetch_add(1, Ordering::SeqCst);
        self.run_ticks += 1;
        if !body.is_hitbox_active() {
            body.activate_hitbox(10.0);
        }
        body.velocity.x = 8.0 * body.facing_sign();
        match self.completes_after {
            Some(limit) if self.run_ticks >= limit => {
                body.safe_stop();
                self.initialised = false;
                AttackPoll::Complete { dizzy: self.dizzy }
            }
            _ => AttackPoll::Pending,
        }
    }

    fn cancel(&mut self, body: &mut BossBody) {
        self.tally.cancelled.fetch_add(1, Ordering::SeqCst);
        self.initialised = false;
        body.safe_stop();
    }

    fn upgrade(&mut self, phase: u8) {
        self.tally
            .upgraded_to
            .store(u32::from(phase), Ordering::SeqCst);
    }

    fn max_duration(&self) -> f32 {
        self.max_duration
    }
}
