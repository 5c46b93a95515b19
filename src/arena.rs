//! Minimal level geometry for headless runs and tests.
//!
//! An [`Arena`] is a flat floor between two walls, optionally broken by pits.
//! It answers [`Raycaster`] queries so sensing can run without an engine.

use glam::Vec2;

use crate::sensor::{LayerMask, Raycaster};

/// Flat floor at `floor_y` bounded by walls at `left_wall` and `right_wall`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arena {
    /// Height of the floor surface.
    pub floor_y: f32,
    /// X coordinate of the left wall face.
    pub left_wall: f32,
    /// X coordinate of the right wall face.
    pub right_wall: f32,
    /// Open intervals along x without floor.
    pub pits: Vec<(f32, f32)>,
    /// Layer the geometry lives on.
    pub layer: LayerMask,
}

impl Arena {
    /// Creates an arena without pits on the ground layer. Walls given in the
    /// wrong order are swapped.
    #[must_use]
    pub const fn new(left_wall: f32, right_wall: f32, floor_y: f32) -> Self {
        let swapped = left_wall > right_wall;
        Self {
            floor_y,
            left_wall: if swapped { right_wall } else { left_wall },
            right_wall: if swapped { left_wall } else { right_wall },
            pits: Vec::new(),
            layer: LayerMask::GROUND,
        }
    }

    /// Adds a pit spanning `(start, end)`.
    #[must_use]
    pub fn with_pit(mut self, start: f32, end: f32) -> Self {
        self.pits.push((start.min(end), start.max(end)));
        self
    }

    /// Whether there is floor at `x`.
    #[must_use]
    pub fn has_floor_at(&self, x: f32) -> bool {
        x >= self.left_wall
            && x <= self.right_wall
            && !self.pits.iter().any(|&(start, end)| x > start && x < end)
    }

    /// Keeps a body of `half_width` between the walls. Returns the clamped
    /// position and whether a wall stopped it.
    ///
    /// A body wider than the gap between the walls is pinned to the centre.
    #[must_use]
    pub fn confine(&self, position: Vec2, half_width: f32) -> (Vec2, bool) {
        let min_x = self.left_wall + half_width;
        let max_x = self.right_wall - half_width;
        let x = if min_x <= max_x {
            position.x.clamp(min_x, max_x)
        } else {
            self.centre_x()
        };
        let blocked = (x - position.x).abs() > f32::EPSILON;
        (Vec2::new(x, position.y), blocked)
    }

    /// Horizontal centre of the arena.
    #[must_use]
    pub const fn centre_x(&self) -> f32 {
        (self.left_wall + self.right_wall) * 0.5
    }
}

impl Raycaster for Arena {
    fn raycast(&self, origin: Vec2, direction: Vec2, max_distance: f32, mask: LayerMask) -> bool {
        if !mask.intersects(self.layer) {
            return false;
        }
        let Some(dir) = direction.try_normalize() else {
            return false;
        };
        let within = |t: f32| (0.0..=max_distance).contains(&t);

        let floor_hit = dir.y < 0.0 && {
            let t = (self.floor_y - origin.y) / dir.y;
            within(t) && self.has_floor_at(origin.x + dir.x * t)
        };
        let wall_hit = dir.x.abs() > f32::EPSILON
            && [self.left_wall, self.right_wall].iter().any(|&wall| {
                let t = (wall - origin.x) / dir.x;
                within(t) && origin.y + dir.y * t >= self.floor_y
            });

        floor_hit || wall_hit
    }
}
