//! A running game: the current record plus everything that moves it.
//!
//! RULES:
//!   - The session is the only owner of the current `GameRecord`.
//!   - Each day replaces the game state wholesale, then persists.
//!   - Persistence after a day is last-write-wins and never fails the day.

use crate::{
    command::PlayerCommand,
    config::{EngineConfig, GameConfig},
    engine::{self, DayOutcome},
    error::{GameError, GameResult},
    notify::{Notification, Notifier},
    profile::{self, CeoProfile, ProfileDraft},
    rng::RandomSource,
    scheduler::{PlayState, Scheduler},
    startup::{self, StartupDraft},
    state::{GameRecord, GameState},
    store::ProfileStore,
    types::Millis,
};
use chrono::{DateTime, Utc};

pub struct GameSession<S, N, R> {
    record: GameRecord,
    store: S,
    notifier: N,
    rng: R,
    engine: EngineConfig,
    scheduler: Scheduler,
}

impl<S: ProfileStore, N: Notifier, R: RandomSource> GameSession<S, N, R> {
    pub fn new(record: GameRecord, store: S, notifier: N, rng: R, config: &GameConfig) -> Self {
        Self {
            record,
            store,
            notifier,
            rng,
            engine: config.engine.clone(),
            scheduler: Scheduler::new(config.scheduler.clone()),
        }
    }

    /// Resume the saved game. A missing record is reported through the
    /// notifier and returned as `MissingGameRecord`; the caller sends the
    /// player back to profile creation.
    pub fn load(store: S, mut notifier: N, rng: R, config: &GameConfig) -> GameResult<Self> {
        match store.load_record()? {
            Some(record) => {
                log::info!(
                    "Loaded '{}' at day {}",
                    record.startup.business_name,
                    record.game_state.day
                );
                Ok(Self::new(record, store, notifier, rng, config))
            }
            None => {
                let err = GameError::MissingGameRecord;
                notifier.notify(err.notification());
                Err(err)
            }
        }
    }

    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    pub fn state(&self) -> &GameState {
        &self.record.game_state
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn into_parts(self) -> (GameRecord, S, N, R) {
        (self.record, self.store, self.notifier, self.rng)
    }

    pub fn apply(&mut self, command: PlayerCommand, now: Millis) -> Option<DayOutcome> {
        match command {
            PlayerCommand::TogglePlay => {
                self.toggle_play(now);
                None
            }
            PlayerCommand::ChangeSpeed => {
                self.change_speed(now);
                None
            }
            PlayerCommand::NextDay => self.next_day(),
        }
    }

    pub fn toggle_play(&mut self, now: Millis) -> PlayState {
        let state = self.scheduler.toggle(now);
        let notification = match state {
            PlayState::Playing => {
                Notification::normal("Game Resumed", "Business simulation resumed")
            }
            PlayState::Paused => Notification::normal("Game Paused", "Business simulation paused"),
        };
        self.notifier.notify(notification);
        state
    }

    pub fn change_speed(&mut self, now: Millis) -> u32 {
        let speed = self.scheduler.cycle_speed(now);
        self.notifier.notify(Notification::normal(
            "Game Speed Changed",
            format!("Speed set to {speed}x"),
        ));
        speed
    }

    /// Advance one day by hand. Ignored while playing.
    pub fn next_day(&mut self) -> Option<DayOutcome> {
        if !self.scheduler.allows_manual_step() {
            log::debug!("next_day ignored while playing");
            return None;
        }
        Some(self.advance())
    }

    /// Advance one day if the scheduler's deadline has passed.
    pub fn poll(&mut self, now: Millis) -> Option<DayOutcome> {
        if self.scheduler.poll(now) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Fast-forward `days` days while paused. Returns how many ran.
    pub fn run_days(&mut self, days: u32) -> u32 {
        let mut ran = 0;
        for _ in 0..days {
            if self.next_day().is_none() {
                break;
            }
            ran += 1;
        }
        ran
    }

    fn advance(&mut self) -> DayOutcome {
        let outcome = engine::advance_day(
            &self.record.game_state,
            self.record.startup.product_price,
            &self.engine,
            &mut self.rng,
        );
        self.record.game_state = outcome.state.clone();

        if let Err(e) = self.store.save_record(&self.record) {
            log::warn!("day {}: failed to persist game record: {e}", outcome.state.day);
        }
        if let Some(notification) = outcome.notification() {
            self.notifier.notify(notification);
        }
        outcome
    }
}

/// Build and save a CEO profile from the creation form.
pub fn create_profile<S: ProfileStore, N: Notifier>(
    store: &mut S,
    notifier: &mut N,
    draft: ProfileDraft,
    now: DateTime<Utc>,
) -> GameResult<CeoProfile> {
    let profile = match profile::build_profile(draft, now) {
        Ok(p) => p,
        Err(e) => {
            notifier.notify(e.notification());
            return Err(e);
        }
    };
    store.save_profile(&profile)?;
    log::info!(
        "Profile created: {} ({:?}, {:?}) capital={}",
        profile.name,
        profile.personality,
        profile.industry,
        profile.starting_capital
    );
    notifier.notify(Notification::normal(
        "CEO Profile Created!",
        format!(
            "Welcome, {}! Ready to build your business empire?",
            profile.name
        ),
    ));
    Ok(profile)
}

/// Register the startup for the saved profile and save the new game.
pub fn setup_startup<S: ProfileStore, N: Notifier>(
    store: &mut S,
    notifier: &mut N,
    draft: StartupDraft,
    now: DateTime<Utc>,
) -> GameResult<GameRecord> {
    let result = store
        .load_profile()?
        .ok_or(GameError::MissingProfile)
        .and_then(|profile| startup::register_startup(profile, draft, now));
    let record = match result {
        Ok(r) => r,
        Err(e) => {
            notifier.notify(e.notification());
            return Err(e);
        }
    };
    store.save_record(&record)?;
    log::info!(
        "Startup registered: {} in {:?}",
        record.startup.business_name,
        record.startup.city
    );
    notifier.notify(Notification::normal(
        "Business Registered Successfully!",
        format!(
            "{} is now ready to conquer the market!",
            record.startup.business_name
        ),
    ));
    Ok(record)
}

/// Wipe the saved profile and game so a new one can begin.
pub fn start_new_game<S: ProfileStore>(store: &mut S) -> GameResult<()> {
    store.clear()?;
    log::info!("Store cleared, starting a new game");
    Ok(())
}
