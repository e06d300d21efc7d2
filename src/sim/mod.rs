//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering,
//! audio and storage concerns:
//! - One `tick` per logical frame, driven from outside
//! - Randomness only through the injected `GapSampler`
//! - Pipes kept in spawn order (oldest first)

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod engine;
pub mod obstacles;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use clock::FixedStep;
pub use collision::{Aabb, entity_hitbox, entity_hits_obstacle, hits_obstacle, out_of_bounds};
pub use engine::Engine;
pub use obstacles::{GapSampler, Obstacle, ObstacleRegistry, RandomGaps, ScriptedGaps};
pub use snapshot::{EntityView, ObstacleView, Snapshot};
pub use state::{Entity, Session, Status, World};
pub use tick::{EndCause, Playfield, TickOutcome, tick};
