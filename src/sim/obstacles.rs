//! Pipe pairs and the registry that spawns, moves and retires them

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::state::World;
use crate::consts::*;
use crate::settings::GameConfig;

/// One upper/lower pipe pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge
    pub x: f32,
    /// Bottom of the upper pipe (top of the gap)
    pub gap_top: f32,
    /// Gap size in effect when the pipe spawned
    pub gap_size: f32,
    /// Whether the entity already cleared this pair
    pub passed: bool,
}

impl Obstacle {
    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + PIPE_WIDTH
    }

    /// Top of the lower pipe
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_size
    }
}

/// Source of gap positions
pub trait GapSampler {
    /// Pick a gap top in `[min, max]`
    fn sample(&mut self, min: f32, max: f32) -> f32;
}

/// Uniform integer gap tops from a PCG32 stream
#[derive(Debug, Clone)]
pub struct RandomGaps {
    rng: Pcg32,
}

impl RandomGaps {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Unseeded generator (no reproducibility across runs)
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

impl GapSampler for RandomGaps {
    fn sample(&mut self, min: f32, max: f32) -> f32 {
        let lo = min.ceil() as i32;
        let hi = max.floor() as i32;
        if hi < lo {
            return min;
        }
        self.rng.random_range(lo..=hi) as f32
    }
}

/// Replays a fixed list of gap tops, cycling when exhausted.
///
/// Values are clamped into the requested range.
#[derive(Debug, Clone)]
pub struct ScriptedGaps {
    values: Vec<f32>,
    next: usize,
}

impl ScriptedGaps {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }
}

impl GapSampler for ScriptedGaps {
    fn sample(&mut self, min: f32, max: f32) -> f32 {
        let Some(&value) = self.values.get(self.next % self.values.len().max(1)) else {
            return min;
        };
        self.next += 1;
        value.clamp(min, max.max(min))
    }
}

/// Active pipes in spawn order, which is also left-to-right order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObstacleRegistry {
    obstacles: VecDeque<Obstacle>,
    next_id: u32,
}

impl ObstacleRegistry {
    pub fn new() -> Self {
        Self {
            obstacles: VecDeque::new(),
            next_id: 1,
        }
    }

    /// Spawn a pipe just past the right edge with a sampled gap. The pipe
    /// keeps the current gap size for its whole life.
    pub fn spawn(
        &mut self,
        config: &GameConfig,
        world: &World,
        sampler: &mut dyn GapSampler,
    ) -> &Obstacle {
        let (min, max) = world.gap_top_range(config.gap_size);
        let gap_top = sampler.sample(min, max);
        self.push(world.width + SPAWN_MARGIN, gap_top, config.gap_size)
    }

    /// Append a pipe at an explicit position
    pub fn push(&mut self, x: f32, gap_top: f32, gap_size: f32) -> &Obstacle {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.obstacles.push_back(Obstacle {
            id,
            x,
            gap_top,
            gap_size,
            passed: false,
        });
        log::debug!("Spawned pipe {} at x={} gap_top={}", id, x, gap_top);
        &self.obstacles[self.obstacles.len() - 1]
    }

    /// Drift every pipe left
    pub fn advance_all(&mut self, speed: f32) {
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed;
        }
    }

    /// Remove the oldest pipe once its right edge is `margin` past the left
    /// edge of the world. At most one pipe is removed per call.
    pub fn retire_expired(&mut self, margin: f32) -> Option<Obstacle> {
        let expired = self
            .obstacles
            .front()
            .is_some_and(|head| head.right() < -margin);
        if !expired {
            return None;
        }
        let retired = self.obstacles.pop_front();
        if let Some(o) = &retired {
            log::debug!("Retired pipe {}", o.id);
        }
        retired
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Obstacle> {
        self.obstacles.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    /// Drop all pipes and restart ids
    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.next_id = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_position_and_ids() {
        let mut registry = ObstacleRegistry::new();
        let config = GameConfig::default();
        let world = World::default();
        let mut gaps = ScriptedGaps::new([120.0, 300.0]);

        let first = *registry.spawn(&config, &world, &mut gaps);
        let second = *registry.spawn(&config, &world, &mut gaps);
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.x, 650.0);
        assert_eq!(first.gap_top, 120.0);
        assert_eq!(second.gap_top, 300.0);
        assert_eq!(first.gap_size, 220.0);
        assert_eq!(first.gap_bottom(), 340.0);
        assert!(!first.passed);
    }

    #[test]
    fn test_scripted_gaps_clamped_into_range() {
        let mut gaps = ScriptedGaps::new([0.0, 9999.0]);
        assert_eq!(gaps.sample(50.0, 510.0), 50.0);
        assert_eq!(gaps.sample(50.0, 510.0), 510.0);
        // Cycles
        assert_eq!(gaps.sample(50.0, 510.0), 50.0);

        let mut empty = ScriptedGaps::new(Vec::<f32>::new());
        assert_eq!(empty.sample(50.0, 510.0), 50.0);
    }

    #[test]
    fn test_random_gaps_in_range_and_integral() {
        let mut gaps = RandomGaps::new(7);
        for _ in 0..500 {
            let v = gaps.sample(50.0, 510.0);
            assert!((50.0..=510.0).contains(&v));
            assert_eq!(v, v.trunc());
        }
    }

    #[test]
    fn test_random_gaps_deterministic_per_seed() {
        let mut a = RandomGaps::new(99);
        let mut b = RandomGaps::new(99);
        for _ in 0..20 {
            assert_eq!(a.sample(50.0, 510.0), b.sample(50.0, 510.0));
        }
    }

    #[test]
    fn test_advance_and_retire_fifo() {
        let mut registry = ObstacleRegistry::new();
        registry.push(-90.0, 100.0, 220.0);
        registry.push(200.0, 100.0, 220.0);

        assert!(registry.retire_expired(RETIRE_MARGIN).is_none());
        registry.advance_all(15.0);
        let retired = registry.retire_expired(RETIRE_MARGIN).unwrap();
        assert_eq!(retired.id, 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.iter().next().unwrap().x, 185.0);
    }

    #[test]
    fn test_retire_empty_is_noop() {
        let mut registry = ObstacleRegistry::new();
        assert!(registry.retire_expired(RETIRE_MARGIN).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_clear_restarts_ids() {
        let mut registry = ObstacleRegistry::new();
        registry.push(0.0, 100.0, 220.0);
        registry.push(10.0, 100.0, 220.0);
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.push(0.0, 100.0, 220.0).id, 1);
    }
}
