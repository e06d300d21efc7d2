//! Flappy Engine - simulation core for a side-scrolling pipe-dodging game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (physics, pipes, collisions, session)
//! - `settings`: Runtime-tunable game configuration
//! - `highscores`: Best score persistence port
//! - `audio`: Events emitted for the audio collaborator

pub mod audio;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use audio::{EventLog, EventSink, GameEvent, SoundCue};
pub use highscores::{JsonFileScoreStore, MemoryScoreStore, ScoreStore};
pub use settings::{AudioTheme, ConfigPatch, GameConfig};
pub use sim::{Engine, Snapshot, Status};

/// World and entity constants (logical units)
pub mod consts {
    /// Logical world height; the renderer scales this to the viewport
    pub const WORLD_HEIGHT: f32 = 800.0;
    /// Default logical world width (the layout collaborator overrides it)
    pub const DEFAULT_WORLD_WIDTH: f32 = 600.0;
    /// Ground strip at the bottom of the world
    pub const GROUND_HEIGHT: f32 = 20.0;

    /// Fixed horizontal position of the entity's left edge
    pub const ENTITY_X: f32 = 40.0;
    /// Entity extent used by the world bounds check
    pub const ENTITY_SIZE: f32 = 34.0;
    /// Entity sprite box used for pipe collisions
    pub const ENTITY_WIDTH: f32 = 34.0;
    pub const ENTITY_HEIGHT: f32 = 24.0;
    /// Velocity to tilt factor (radians per unit of velocity)
    pub const TILT_FACTOR: f32 = 0.15;

    /// Pipe defaults
    pub const PIPE_WIDTH: f32 = 52.0;
    /// Shortest allowed upper or lower pipe
    pub const MIN_PIPE_HEIGHT: f32 = 50.0;
    /// New pipes appear this far past the right edge
    pub const SPAWN_MARGIN: f32 = 50.0;
    /// Pipes retire once their right edge is this far past the left edge
    pub const RETIRE_MARGIN: f32 = 48.0;

    /// Inward hitbox shrink on every side of the entity
    pub const FORGIVENESS: f32 = 10.0;

    /// Logical tick rate the default tuning was made for
    pub const TICK_HZ: f32 = 60.0;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_HZ;
    /// Maximum ticks per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}
