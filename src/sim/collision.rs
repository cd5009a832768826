//! Axis-aligned collision between the avatar and cups
//!
//! Screen coordinates: x grows right, y grows down from the playfield top.
//! Cups stand on the floor, so their boxes span `GAME_HEIGHT - height` to
//! `GAME_HEIGHT`.

use glam::Vec2;

use super::state::{Avatar, Obstacle};
use super::viewport::Viewport;
use crate::consts::*;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self {
            min: origin,
            max: origin + size,
        }
    }

    /// Strict overlap; boxes that only touch do not collide
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Avatar hitbox at its current altitude
pub fn avatar_box(avatar: &Avatar, viewport: &Viewport) -> Aabb {
    Aabb::from_origin_size(
        Vec2::new(viewport.avatar_x(), avatar.y),
        Vec2::new(AVATAR_WIDTH, AVATAR_HEIGHT),
    )
}

/// Ground-anchored cup box
pub fn obstacle_box(obstacle: &Obstacle) -> Aabb {
    Aabb::from_origin_size(
        Vec2::new(obstacle.x, GAME_HEIGHT - obstacle.height),
        Vec2::new(obstacle.width, obstacle.height),
    )
}

/// First obstacle overlapping the avatar, if any
pub fn find_collision<'a>(
    avatar: &Avatar,
    viewport: &Viewport,
    obstacles: &'a [Obstacle],
) -> Option<&'a Obstacle> {
    let hitbox = avatar_box(avatar, viewport);
    obstacles
        .iter()
        .find(|obstacle| hitbox.overlaps(&obstacle_box(obstacle)))
}
