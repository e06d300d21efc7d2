//! Read-only view of the engine for renderers
//!
//! A snapshot is an owned copy; mutating it has no effect on the engine.

use serde::{Deserialize, Serialize};

use super::obstacles::Obstacle;
use super::state::{Entity, Status};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub position: f32,
    pub velocity: f32,
    /// Tilt in degrees
    pub rotation: f32,
}

impl From<&Entity> for EntityView {
    fn from(entity: &Entity) -> Self {
        Self {
            position: entity.position,
            velocity: entity.velocity,
            rotation: entity.rotation_degrees(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObstacleView {
    pub id: u32,
    pub x: f32,
    pub gap_top: f32,
    pub gap_height: f32,
    pub passed: bool,
}

impl From<&Obstacle> for ObstacleView {
    fn from(obstacle: &Obstacle) -> Self {
        Self {
            id: obstacle.id,
            x: obstacle.x,
            gap_top: obstacle.gap_top,
            gap_height: obstacle.gap_size,
            passed: obstacle.passed,
        }
    }
}

/// Everything a renderer polls once per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub status: Status,
    pub score: u32,
    pub best_score: u32,
    pub paused: bool,
    pub entity: EntityView,
    pub obstacles: Vec<ObstacleView>,
}

impl Snapshot {
    /// JSON form for non-Rust front ends
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
