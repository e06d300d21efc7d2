//! Per-frame simulation step
//!
//! Advances the playfield by exactly one logical frame. Cadence is counted in
//! frames, not seconds, so a faster host frame rate speeds the game up.

use serde::{Deserialize, Serialize};

use super::collision::{entity_hits_obstacle, has_passed, out_of_bounds};
use super::obstacles::{GapSampler, ObstacleRegistry};
use super::state::{Entity, World};
use crate::consts::*;
use crate::settings::GameConfig;

/// Mutable simulation state of one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playfield {
    pub entity: Entity,
    pub obstacles: ObstacleRegistry,
    /// Frames simulated this session
    pub frame: u64,
    /// Frame of the most recent spawn (0 before the first)
    pub last_spawn_frame: u64,
}

impl Playfield {
    /// Fresh playfield with the entity at the world's start height
    pub fn new(world: &World) -> Self {
        Self {
            entity: Entity::at(world.start_position()),
            obstacles: ObstacleRegistry::new(),
            frame: 0,
            last_spawn_frame: 0,
        }
    }

    /// Overwrite everything with a fresh playfield
    pub fn reset(&mut self, world: &World) {
        *self = Self::new(world);
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    /// Hit the ground or left through the top
    OutOfBounds,
    /// Hit a pipe
    Collision { obstacle_id: u32 },
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Pipes newly cleared this tick
    pub passed: u32,
    /// Id of a pipe spawned this tick
    pub spawned: Option<u32>,
    /// Set when the session must end
    pub ended: Option<EndCause>,
}

/// Advance the playfield by one frame.
///
/// Callers only invoke this while a session is playing. When `ended` is set
/// the playfield is left frozen at the state that ended it.
pub fn tick(
    field: &mut Playfield,
    config: &GameConfig,
    world: &World,
    gaps: &mut dyn GapSampler,
) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    // Physics
    field.entity.integrate(config.gravity);

    if out_of_bounds(&field.entity, world) {
        field.entity.position = field
            .entity
            .position
            .clamp(0.0, world.max_entity_position());
        outcome.ended = Some(EndCause::OutOfBounds);
        return outcome;
    }

    // Spawning
    field.frame += 1;
    if field.frame - field.last_spawn_frame > u64::from(config.spawn_interval_ticks) {
        let spawned = field.obstacles.spawn(config, world, gaps);
        outcome.spawned = Some(spawned.id);
        field.last_spawn_frame = field.frame;
    }

    // Movement, then collision and scoring per pipe in order
    field.obstacles.advance_all(config.obstacle_speed);

    let entity = field.entity;
    for obstacle in field.obstacles.iter_mut() {
        if entity_hits_obstacle(&entity, obstacle) {
            outcome.ended = Some(EndCause::Collision {
                obstacle_id: obstacle.id,
            });
            return outcome;
        }
        if !obstacle.passed && has_passed(&entity, obstacle) {
            obstacle.passed = true;
            outcome.passed += 1;
        }
    }

    field.obstacles.retire_expired(RETIRE_MARGIN);

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacles::ScriptedGaps;

    fn setup() -> (Playfield, GameConfig, World) {
        let world = World::default();
        (Playfield::new(&world), GameConfig::default(), world)
    }

    #[test]
    fn test_gravity_integration() {
        let (mut field, config, world) = setup();
        let mut gaps = ScriptedGaps::new([200.0]);

        let outcome = tick(&mut field, &config, &world, &mut gaps);
        assert_eq!(outcome, TickOutcome::default());
        assert!((field.entity.velocity - 0.15).abs() < 1e-6);
        assert!((field.entity.position - 400.15).abs() < 1e-4);
        assert_eq!(field.frame, 1);
    }

    #[test]
    fn test_spawn_after_interval() {
        let (mut field, mut config, world) = setup();
        config.spawn_interval_ticks = 3;
        let mut gaps = ScriptedGaps::new([200.0]);

        for _ in 0..3 {
            assert!(tick(&mut field, &config, &world, &mut gaps).spawned.is_none());
        }
        let outcome = tick(&mut field, &config, &world, &mut gaps);
        assert_eq!(outcome.spawned, Some(1));
        assert_eq!(field.last_spawn_frame, 4);

        // Spawned at width + margin then moved once
        let pipe = field.obstacles.iter().next().unwrap();
        assert_eq!(pipe.x, 650.0 - 1.5);
        assert_eq!(pipe.gap_top, 200.0);
    }

    #[test]
    fn test_ground_ends_without_touching_pipes() {
        let (mut field, config, world) = setup();
        let mut gaps = ScriptedGaps::new([200.0]);
        field.obstacles.push(300.0, 200.0, 220.0);
        field.entity.position = 745.0;
        field.entity.velocity = 3.0;

        let outcome = tick(&mut field, &config, &world, &mut gaps);
        assert_eq!(outcome.ended, Some(EndCause::OutOfBounds));
        assert_eq!(field.entity.position, world.max_entity_position());
        assert_eq!(field.obstacles.iter().next().unwrap().x, 300.0);
        assert_eq!(field.frame, 0);
    }

    #[test]
    fn test_ceiling_clamps_to_zero() {
        let (mut field, config, world) = setup();
        let mut gaps = ScriptedGaps::new([200.0]);
        field.entity.position = 2.0;
        field.entity.impulse(-5.0);

        let outcome = tick(&mut field, &config, &world, &mut gaps);
        assert_eq!(outcome.ended, Some(EndCause::OutOfBounds));
        assert_eq!(field.entity.position, 0.0);
    }

    #[test]
    fn test_pipe_collision_ends() {
        let (mut field, config, world) = setup();
        let mut gaps = ScriptedGaps::new([200.0]);
        // Gap 100..320 while the hitbox sits near 410
        field.obstacles.push(50.0, 100.0, 220.0);

        let outcome = tick(&mut field, &config, &world, &mut gaps);
        assert_eq!(outcome.ended, Some(EndCause::Collision { obstacle_id: 1 }));
    }

    #[test]
    fn test_earlier_pipe_scores_before_later_hit() {
        let (mut field, config, world) = setup();
        let mut gaps = ScriptedGaps::new([200.0]);
        // Right edge 51.0 moves to 49.5 and clears the hitbox left edge at 50
        field.obstacles.push(-1.0, 300.0, 220.0);
        // Gap 100..320 while the hitbox sits near 410
        field.obstacles.push(50.0, 100.0, 220.0);

        let outcome = tick(&mut field, &config, &world, &mut gaps);
        assert_eq!(outcome.passed, 1);
        assert_eq!(outcome.ended, Some(EndCause::Collision { obstacle_id: 2 }));
        let flags: Vec<bool> = field.obstacles.iter().map(|o| o.passed).collect();
        assert_eq!(flags, vec![true, false]);
    }

    #[test]
    fn test_hit_stops_scoring_of_later_pipes() {
        let (mut field, config, world) = setup();
        let mut gaps = ScriptedGaps::new([200.0]);
        field.obstacles.push(50.0, 100.0, 220.0);
        // Would be cleared this tick, but sits behind the hit in spawn order
        field.obstacles.push(-1.0, 300.0, 220.0);

        let outcome = tick(&mut field, &config, &world, &mut gaps);
        assert_eq!(outcome.passed, 0);
        assert_eq!(outcome.ended, Some(EndCause::Collision { obstacle_id: 1 }));
    }

    #[test]
    fn test_pass_scores_once() {
        let (mut field, config, world) = setup();
        let mut gaps = ScriptedGaps::new([200.0]);
        // Right edge at 51.5 moves to 50.0, then 48.5
        field.obstacles.push(-0.5, 300.0, 220.0);

        let first = tick(&mut field, &config, &world, &mut gaps);
        assert_eq!(first.passed, 0);
        let second = tick(&mut field, &config, &world, &mut gaps);
        assert_eq!(second.passed, 1);
        assert!(field.obstacles.iter().next().unwrap().passed);
        let third = tick(&mut field, &config, &world, &mut gaps);
        assert_eq!(third.passed, 0);
    }

    #[test]
    fn test_head_retired_past_margin() {
        let (mut field, config, world) = setup();
        let mut gaps = ScriptedGaps::new([200.0]);
        field.obstacles.push(-99.0, 300.0, 220.0);
        field.obstacles.push(-99.5, 300.0, 220.0);

        tick(&mut field, &config, &world, &mut gaps);
        // Only the head goes in one tick
        assert_eq!(field.obstacles.len(), 1);
        tick(&mut field, &config, &world, &mut gaps);
        assert!(field.obstacles.is_empty());
    }
}
