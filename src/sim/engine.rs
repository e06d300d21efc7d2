//! Session state machine
//!
//! `Engine` owns all simulation state and is the only thing collaborators talk
//! to. Rendering polls `snapshot()`, input calls the actions, audio listens on
//! the event sink and the best score goes through the injected store.
//!
//! ```text
//! Idle --prepare--> Ready --impulse--> Playing --hit/out--> GameOver
//!   ^                                                          |
//!   +------------------------- reset --------------------------+
//! ```
//!
//! Actions that are not valid in the current status are no-ops.

use super::obstacles::{GapSampler, Obstacle, RandomGaps};
use super::snapshot::{EntityView, ObstacleView, Snapshot};
use super::state::{Entity, Session, Status, World};
use super::tick::{EndCause, Playfield, TickOutcome, tick};
use crate::audio::{EventSink, GameEvent, NullSink};
use crate::consts::*;
use crate::highscores::ScoreStore;
use crate::settings::{ConfigPatch, GameConfig};

/// One game: session state, playfield and the injected collaborators
pub struct Engine {
    session: Session,
    field: Playfield,
    config: GameConfig,
    world: World,
    /// Settings panel open; freezes ticks and input
    paused: bool,
    gaps: Box<dyn GapSampler>,
    store: Box<dyn ScoreStore>,
    events: Box<dyn EventSink>,
}

impl Engine {
    /// Engine with default config, random gaps and no event listener.
    /// The best score is seeded from `store`.
    pub fn new(store: impl ScoreStore + 'static) -> Self {
        let best_score = store.load();
        let world = World::default();
        Self {
            session: Session::new(best_score),
            field: Playfield::new(&world),
            config: GameConfig::default(),
            world,
            paused: false,
            gaps: Box::new(RandomGaps::from_entropy()),
            store: Box::new(store),
            events: Box::new(NullSink),
        }
    }

    /// Replace the configuration (sanitized)
    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config.sanitized();
        self
    }

    /// Replace the gap source
    pub fn with_gaps(mut self, gaps: impl GapSampler + 'static) -> Self {
        self.gaps = Box::new(gaps);
        self
    }

    /// Attach the audio listener
    pub fn with_events(mut self, events: impl EventSink + 'static) -> Self {
        self.events = Box::new(events);
        self
    }

    // === Queries ===

    pub fn status(&self) -> Status {
        self.session.status
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn best_score(&self) -> u32 {
        self.session.best_score
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn entity(&self) -> &Entity {
        &self.field.entity
    }

    pub fn obstacles(&self) -> impl Iterator<Item = &Obstacle> {
        self.field.obstacles.iter()
    }

    /// Frames simulated this session
    pub fn frame(&self) -> u64 {
        self.field.frame
    }

    /// Owned copy of everything a renderer needs
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.session.status,
            score: self.session.score,
            best_score: self.session.best_score,
            paused: self.paused,
            entity: EntityView::from(&self.field.entity),
            obstacles: self
                .field
                .obstacles
                .iter()
                .map(ObstacleView::from)
                .collect(),
        }
    }

    // === Actions ===

    /// Idle -> Ready: fresh playfield and zero score
    pub fn prepare(&mut self) -> bool {
        if self.session.status != Status::Idle {
            return false;
        }
        self.field.reset(&self.world);
        self.session.score = 0;
        self.session.status = Status::Ready;
        log::info!("Session prepared");
        true
    }

    /// Upward impulse. The first impulse while Ready starts play.
    pub fn impulse(&mut self) -> bool {
        if self.paused {
            return false;
        }
        match self.session.status {
            Status::Ready => {
                self.session.status = Status::Playing;
                // Start from exact center rather than wherever the hover was
                self.field.entity.position = self.world.start_position();
                log::info!("Session started");
                self.events.emit(GameEvent::SessionStarted);
            }
            Status::Playing => {}
            Status::Idle | Status::GameOver => return false,
        }
        self.field.entity.impulse(self.config.jump_impulse);
        self.events.emit(GameEvent::Impulse);
        true
    }

    /// Advance one frame while playing
    pub fn tick(&mut self) -> TickOutcome {
        if self.paused || self.session.status != Status::Playing {
            return TickOutcome::default();
        }

        let outcome = tick(&mut self.field, &self.config, &self.world, self.gaps.as_mut());

        for _ in 0..outcome.passed {
            self.session.score += 1;
            self.events.emit(GameEvent::Scored {
                score: self.session.score,
            });
        }

        if let Some(cause) = outcome.ended {
            self.game_over(cause);
        }

        outcome
    }

    /// Any status -> Idle with a fresh playfield
    pub fn reset(&mut self) {
        if self.session.status != Status::Idle {
            log::info!("Session reset from {:?}", self.session.status);
        }
        self.session.status = Status::Idle;
        self.session.score = 0;
        self.field.reset(&self.world);
    }

    /// The single-button binding: reset after a loss, prepare from the start
    /// screen, impulse otherwise. Ignored while paused.
    pub fn press(&mut self) {
        if self.is_paused() {
            return;
        }
        match self.session.status {
            Status::GameOver => self.reset(),
            Status::Idle => {
                self.prepare();
            }
            Status::Ready | Status::Playing => {
                self.impulse();
            }
        }
    }

    /// Merge a partial config; takes effect on the next tick
    pub fn update_config(&mut self, patch: &ConfigPatch) {
        self.config.apply(patch);
        log::debug!("Config updated: {:?}", self.config);
    }

    /// Open or close the settings panel
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Logical width from the layout collaborator; affects where new pipes
    /// spawn. Widths narrower than one pipe are ignored.
    pub fn set_world_width(&mut self, width: f32) {
        if width.is_finite() && width >= PIPE_WIDTH {
            self.world.width = width;
        }
    }

    fn game_over(&mut self, cause: EndCause) {
        let new_best = self.session.finish();
        if new_best {
            self.store.save(self.session.best_score);
        }
        log::info!(
            "Game over ({:?}): score {}, best {}",
            cause,
            self.session.score,
            self.session.best_score
        );
        self.events.emit(GameEvent::GameOver {
            score: self.session.score,
            best_score: self.session.best_score,
            new_best,
        });
    }
}
