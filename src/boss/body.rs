//! Mutable physical state of a boss shared between movement and attacks.

use glam::Vec2;
use log::debug;

/// Subsystem currently allowed to write the boss's velocity and hitbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlOwner {
    /// The steering driver moves the boss.
    #[default]
    Movement,
    /// The executing attack moves the boss.
    Attack,
}

/// Notification emitted by attacks for the host to act on.
#[derive(Debug, Clone, PartialEq)]
pub enum BossEvent {
    /// An attack began its wind-up.
    Telegraph {
        /// Name of the attack.
        attack: String,
    },
    /// The damaging hitbox was switched on.
    HitboxActivated {
        /// Damage dealt on contact.
        damage: f32,
    },
    /// The damaging hitbox was switched off.
    HitboxDeactivated,
    /// A projectile should be spawned.
    ProjectileSpawned {
        /// Spawn point.
        origin: Vec2,
        /// Initial velocity.
        velocity: Vec2,
        /// Damage dealt on contact.
        damage: f32,
    },
}

/// Position, velocity and collider flags of a boss.
#[derive(Debug, Clone, PartialEq)]
pub struct BossBody {
    /// World position.
    pub position: Vec2,
    /// Current velocity; the vertical component belongs to gravity unless an
    /// attack zeroes it.
    pub velocity: Vec2,
    /// Authoritative facing direction.
    pub facing_right: bool,
    /// Whether the body is pressed against a wall this tick.
    pub touching_wall: bool,
    /// Point attacks aim at, usually the player.
    pub target: Vec2,
    hitbox_damage: Option<f32>,
    owner: ControlOwner,
    events: Vec<BossEvent>,
}

impl BossBody {
    /// Creates a stationary body.
    #[must_use]
    pub const fn new(position: Vec2, facing_right: bool) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing_right,
            touching_wall: false,
            target: position,
            hitbox_damage: None,
            owner: ControlOwner::Movement,
            events: Vec::new(),
        }
    }

    /// `1.0` when facing right, `-1.0` otherwise.
    #[must_use]
    pub const fn facing_sign(&self) -> f32 {
        if self.facing_right {
            1.0
        } else {
            -1.0
        }
    }

    /// Switches the damaging hitbox on.
    pub fn activate_hitbox(&mut self, damage: f32) {
        self.hitbox_damage = Some(damage);
        self.events.push(BossEvent::HitboxActivated { damage });
    }

    /// Switches the damaging hitbox off. Emits an event only on change.
    pub fn deactivate_hitbox(&mut self) {
        if self.hitbox_damage.take().is_some() {
            self.events.push(BossEvent::HitboxDeactivated);
        }
    }

    /// Whether the damaging hitbox is on.
    #[must_use]
    pub const fn is_hitbox_active(&self) -> bool {
        self.hitbox_damage.is_some()
    }

    /// Contact damage while the hitbox is on.
    #[must_use]
    pub const fn hitbox_damage(&self) -> Option<f32> {
        self.hitbox_damage
    }

    /// Zeroes velocity and switches the hitbox off.
    ///
    /// Used on every cancellation path so an interrupted attack never leaves
    /// the boss sliding or dealing damage.
    pub fn safe_stop(&mut self) {
        self.velocity = Vec2::ZERO;
        self.deactivate_hitbox();
    }

    /// Subsystem that currently owns velocity and hitbox.
    #[must_use]
    pub const fn owner(&self) -> ControlOwner {
        self.owner
    }

    /// Transfers ownership to `owner`.
    pub fn hand_to(&mut self, owner: ControlOwner) {
        if self.owner != owner {
            debug!("boss control {:?} -> {owner:?}", self.owner);
            self.owner = owner;
        }
    }

    /// Queues an event for the host.
    pub fn emit(&mut self, event: BossEvent) {
        self.events.push(event);
    }

    /// Events queued since the last drain.
    #[must_use]
    pub fn events(&self) -> &[BossEvent] {
        &self.events
    }

    /// Removes and returns all queued events.
    pub fn drain_events(&mut self) -> Vec<BossEvent> {
        std::mem::take(&mut self.events)
    }
}
