//! Session and entity state
//!
//! Everything the step function mutates lives here; the `Engine` owns one of
//! each and resets them wholesale on session boundaries.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    /// Start screen, nothing simulated
    #[default]
    Idle,
    /// Session prepared, entity hovering until the first impulse
    Ready,
    /// Active gameplay
    Playing,
    /// Session ended by a collision or leaving the world
    GameOver,
}

/// Logical world dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub width: f32,
    pub height: f32,
    pub ground_height: f32,
}

impl Default for World {
    fn default() -> Self {
        Self {
            width: DEFAULT_WORLD_WIDTH,
            height: WORLD_HEIGHT,
            ground_height: GROUND_HEIGHT,
        }
    }
}

impl World {
    /// Top of the ground strip
    #[inline]
    pub fn floor(&self) -> f32 {
        self.height - self.ground_height
    }

    /// Lowest valid entity position (top edge)
    #[inline]
    pub fn max_entity_position(&self) -> f32 {
        self.floor() - ENTITY_SIZE
    }

    /// Where the entity starts each session
    #[inline]
    pub fn start_position(&self) -> f32 {
        self.height / 2.0
    }

    /// Valid range for a pipe's gap top at the given gap size
    pub fn gap_top_range(&self, gap_size: f32) -> (f32, f32) {
        let min = MIN_PIPE_HEIGHT;
        let max = (self.floor() - gap_size - MIN_PIPE_HEIGHT).max(min);
        (min, max)
    }
}

/// The player-controlled body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Top edge, growing downward
    pub position: f32,
    /// Per-tick vertical velocity (negative is up)
    pub velocity: f32,
    /// Set by an impulse; the next tick moves with the impulse velocity
    /// before gravity applies again
    pub fresh_impulse: bool,
}

impl Entity {
    /// Entity at rest at the given position
    pub fn at(position: f32) -> Self {
        Self {
            position,
            velocity: 0.0,
            fresh_impulse: false,
        }
    }

    /// Tilt in degrees, derived from velocity and saturating at ±45°
    pub fn rotation_degrees(&self) -> f32 {
        use std::f32::consts::FRAC_PI_4;
        (self.velocity * TILT_FACTOR)
            .clamp(-FRAC_PI_4, FRAC_PI_4)
            .to_degrees()
    }

    /// Overwrite velocity with an upward impulse
    pub fn impulse(&mut self, jump_impulse: f32) {
        self.velocity = jump_impulse;
        self.fresh_impulse = true;
    }

    /// Advance velocity and position by one tick
    pub fn integrate(&mut self, gravity: f32) {
        if self.fresh_impulse {
            self.fresh_impulse = false;
        } else {
            self.velocity += gravity;
        }
        self.position += self.velocity;
    }
}

/// Score bookkeeping for the current and past sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Session {
    pub status: Status,
    pub score: u32,
    pub best_score: u32,
}

impl Session {
    pub fn new(best_score: u32) -> Self {
        Self {
            status: Status::Idle,
            score: 0,
            best_score,
        }
    }

    /// Close the session; returns true when the best score was beaten
    pub fn finish(&mut self) -> bool {
        self.status = Status::GameOver;
        if self.score > self.best_score {
            self.best_score = self.score;
            true
        } else {
            false
        }
    }
}
