//! Demo mode controller
//!
//! Plays the game from a snapshot alone: flap whenever the entity sinks below
//! a line just above the bottom of the next gap. Used by the headless runner
//! and as an attract-mode input source.

use super::snapshot::Snapshot;
use super::state::{Status, World};
use crate::consts::*;

/// How far above the gap bottom the entity's lower edge may sink
pub const FLAP_CLEARANCE: f32 = 40.0;

/// Whether the autopilot would issue an impulse this frame
pub fn wants_impulse(snapshot: &Snapshot, world: &World) -> bool {
    match snapshot.status {
        Status::Ready => return true,
        Status::Playing => {}
        Status::Idle | Status::GameOver => return false,
    }
    if snapshot.paused {
        return false;
    }

    let entity = &snapshot.entity;
    // Only flap on the way down so impulses do not stack up
    if entity.velocity < 0.0 {
        return false;
    }

    let hitbox_left = ENTITY_X + FORGIVENESS;
    let target = snapshot
        .obstacles
        .iter()
        .find(|o| o.x + PIPE_WIDTH >= hitbox_left)
        .map(|o| o.gap_top + o.gap_height)
        .unwrap_or(world.start_position() + ENTITY_HEIGHT + FLAP_CLEARANCE);

    entity.position + ENTITY_HEIGHT > target - FLAP_CLEARANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::snapshot::{EntityView, ObstacleView};

    fn snapshot(position: f32, velocity: f32, obstacles: Vec<ObstacleView>) -> Snapshot {
        Snapshot {
            status: Status::Playing,
            score: 0,
            best_score: 0,
            paused: false,
            entity: EntityView {
                position,
                velocity,
                rotation: 0.0,
            },
            obstacles,
        }
    }

    fn gap(x: f32, gap_top: f32) -> ObstacleView {
        ObstacleView {
            id: 1,
            x,
            gap_top,
            gap_height: 220.0,
            passed: false,
        }
    }

    #[test]
    fn test_holds_start_height_without_pipes() {
        let world = World::default();
        assert!(!wants_impulse(&snapshot(390.0, 1.0, vec![]), &world));
        assert!(wants_impulse(&snapshot(401.0, 1.0, vec![]), &world));
        // Never while rising
        assert!(!wants_impulse(&snapshot(600.0, -1.0, vec![]), &world));
    }

    #[test]
    fn test_targets_next_uncleared_gap() {
        let world = World::default();
        // First pipe already behind the hitbox, second has gap 100..320
        let pipes = vec![gap(-10.0, 400.0), gap(200.0, 100.0)];
        assert!(wants_impulse(&snapshot(260.0, 0.5, pipes.clone()), &world));
        assert!(!wants_impulse(&snapshot(250.0, 0.5, pipes), &world));
    }

    #[test]
    fn test_status_gating() {
        let world = World::default();
        let mut s = snapshot(400.0, 1.0, vec![]);
        s.status = Status::Ready;
        assert!(wants_impulse(&s, &world));
        s.status = Status::GameOver;
        assert!(!wants_impulse(&s, &world));
    }
}
