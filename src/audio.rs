//! Events for the audio collaborator
//!
//! The engine never plays sound itself. It reports what happened through an
//! `EventSink`, synchronously inside the action that caused the event, and the
//! audio layer maps events to cues of the selected theme.

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Something the audio layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// First impulse of a session (background music starts)
    SessionStarted,
    /// Player issued an impulse
    Impulse,
    /// A pipe pair was cleared
    Scored { score: u32 },
    /// Session ended
    GameOver {
        score: u32,
        best_score: u32,
        /// Whether this session set a new best score
        new_best: bool,
    },
}

/// Receiver for engine events
pub trait EventSink {
    fn emit(&mut self, event: GameEvent);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: GameEvent) {}
}

/// Records events in order (useful for tests and headless runs)
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Remove and return everything recorded so far
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn count(&self, pred: impl Fn(&GameEvent) -> bool) -> usize {
        self.events.iter().filter(|&e| pred(e)).count()
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

/// Shared sink, so the caller can inspect it while the engine holds a clone
impl<S: EventSink> EventSink for Rc<RefCell<S>> {
    fn emit(&mut self, event: GameEvent) {
        self.borrow_mut().emit(event);
    }
}

/// Closures can be used as sinks directly
impl<F: FnMut(GameEvent)> EventSink for F {
    fn emit(&mut self, event: GameEvent) {
        self(event)
    }
}

/// Sound files shipped with every audio theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Looping background music while playing
    Music,
    /// Impulse
    Jump,
    /// Pipe cleared
    Score,
    /// Session lost
    Die,
}

impl SoundCue {
    /// File name inside a theme folder
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundCue::Music => "playing.mp3",
            SoundCue::Jump => "jump.mp3",
            SoundCue::Score => "win.mp3",
            SoundCue::Die => "out.mp3",
        }
    }

    /// Cue to start for an event
    pub fn for_event(event: &GameEvent) -> SoundCue {
        match event {
            GameEvent::SessionStarted => SoundCue::Music,
            GameEvent::Impulse => SoundCue::Jump,
            GameEvent::Scored { .. } => SoundCue::Score,
            GameEvent::GameOver { .. } => SoundCue::Die,
        }
    }

    /// Whether the cue loops until stopped
    pub fn loops(&self) -> bool {
        matches!(self, SoundCue::Music)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_cues() {
        assert_eq!(SoundCue::for_event(&GameEvent::Impulse), SoundCue::Jump);
        assert_eq!(
            SoundCue::for_event(&GameEvent::Scored { score: 3 }),
            SoundCue::Score
        );
        let over = GameEvent::GameOver {
            score: 1,
            best_score: 4,
            new_best: false,
        };
        assert_eq!(SoundCue::for_event(&over).file_name(), "out.mp3");
        assert!(SoundCue::for_event(&GameEvent::SessionStarted).loops());
        assert!(!SoundCue::Jump.loops());
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |e: GameEvent| seen.push(e);
            sink.emit(GameEvent::Impulse);
        }
        assert_eq!(seen, vec![GameEvent::Impulse]);
    }
}
