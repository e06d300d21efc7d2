//! Collision detection between the entity and pipes
//!
//! Everything here is axis-aligned. The entity's hitbox is shrunk by a
//! forgiveness margin on every side before testing, so grazing a pipe with
//! the sprite's transparent padding does not end the run.

use glam::Vec2;

use super::obstacles::Obstacle;
use super::state::{Entity, World};
use crate::consts::*;

/// Axis-aligned box, `min` is the top-left corner (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box from its top-left corner and size
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin, origin + size)
    }

    /// Shrink by `margin` on all four sides
    pub fn shrink(&self, margin: f32) -> Self {
        Self::new(self.min + Vec2::splat(margin), self.max - Vec2::splat(margin))
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }
}

/// The entity's sprite box at its current position
pub fn entity_box(entity: &Entity) -> Aabb {
    Aabb::from_origin_size(
        Vec2::new(ENTITY_X, entity.position),
        Vec2::new(ENTITY_WIDTH, ENTITY_HEIGHT),
    )
}

/// The entity's hitbox after applying the forgiveness margin
pub fn entity_hitbox(entity: &Entity) -> Aabb {
    entity_box(entity).shrink(FORGIVENESS)
}

/// Whether a hitbox hits a pipe pair.
///
/// A hit needs horizontal overlap with the pipe and some part of the hitbox
/// outside the gap. Above the world top still counts as the upper pipe.
pub fn hits_obstacle(hitbox: &Aabb, obstacle: &Obstacle) -> bool {
    let horizontal = hitbox.right() > obstacle.left() && hitbox.left() < obstacle.right();
    if !horizontal {
        return false;
    }
    hitbox.top() < obstacle.gap_top || hitbox.bottom() > obstacle.gap_bottom()
}

/// Whether the entity collides with a pipe pair
pub fn entity_hits_obstacle(entity: &Entity, obstacle: &Obstacle) -> bool {
    hits_obstacle(&entity_hitbox(entity), obstacle)
}

/// Whether the entity touched the ground or left through the top
pub fn out_of_bounds(entity: &Entity, world: &World) -> bool {
    entity.position + ENTITY_SIZE >= world.floor() || entity.position <= 0.0
}

/// Whether the entity has fully cleared a pipe pair
pub fn has_passed(entity: &Entity, obstacle: &Obstacle) -> bool {
    entity_hitbox(entity).left() > obstacle.right()
}
