//! Flappy Engine headless runner
//!
//! Plays one session with the autopilot and reports the result. Usage:
//! `flappy-engine [seed] [best-score-file]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::cell::RefCell;
    use std::rc::Rc;

    use flappy_engine::sim::autopilot::wants_impulse;
    use flappy_engine::sim::{FixedStep, RandomGaps, Status};
    use flappy_engine::{Engine, EventLog, GameEvent, JsonFileScoreStore, SoundCue};

    env_logger::init();
    log::info!("Flappy Engine (headless) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(rand::random);
    let store_path = args.next().unwrap_or_else(|| "flappy-best-score.json".to_string());
    log::info!("Seed {}, best score file {}", seed, store_path);

    let events = Rc::new(RefCell::new(EventLog::new()));
    let mut engine = Engine::new(JsonFileScoreStore::new(store_path))
        .with_gaps(RandomGaps::new(seed))
        .with_events(events.clone());

    // Two minutes of simulated 60 Hz frames at most
    let mut clock = FixedStep::default();
    let frame_dt = 1.0 / 60.0;
    let max_frames = 60 * 120;

    engine.prepare();
    clock.reset();
    for _ in 0..max_frames {
        let world = *engine.world();
        for _ in 0..clock.advance(frame_dt) {
            if wants_impulse(&engine.snapshot(), &world) {
                engine.impulse();
            }
            engine.tick();
        }
        for event in events.borrow_mut().drain() {
            log::debug!("{:?} -> {}", event, SoundCue::for_event(&event).file_name());
            if let GameEvent::Scored { score } = event {
                log::info!("Score {}", score);
            }
        }
        if engine.status() == Status::GameOver {
            break;
        }
    }

    let snapshot = engine.snapshot();
    println!(
        "status: {:?}  score: {}  best: {}  frames: {}",
        snapshot.status,
        snapshot.score,
        snapshot.best_score,
        engine.frame()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host page on wasm
}
