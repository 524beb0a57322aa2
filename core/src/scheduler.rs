//! Play/pause state and day cadence.
//!
//! The scheduler is a pure state machine over injected time. It holds at
//! most one armed deadline; pausing disarms it, so once `pause()` returns
//! no poll can report a due day until play resumes.

use crate::{config::SchedulerConfig, types::Millis};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlayState {
    Paused,
    Playing,
}

#[derive(Debug, Clone)]
pub struct Scheduler {
    config: SchedulerConfig,
    state: PlayState,
    speed_index: usize,
    next_due: Option<Millis>,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            state: PlayState::Paused,
            speed_index: 0,
            next_due: None,
        }
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlayState::Playing
    }

    /// Current speed multiplier.
    pub fn speed(&self) -> u32 {
        self.config.speeds.get(self.speed_index).copied().unwrap_or(1).max(1)
    }

    /// Real time between days at the current speed.
    pub fn interval_ms(&self) -> Millis {
        (self.config.base_interval_ms / Millis::from(self.speed())).max(1)
    }

    /// The armed deadline, if playing.
    pub fn next_due(&self) -> Option<Millis> {
        self.next_due
    }

    pub fn play(&mut self, now: Millis) {
        if self.is_playing() {
            return;
        }
        self.state = PlayState::Playing;
        self.next_due = Some(now + self.interval_ms());
    }

    pub fn pause(&mut self) {
        self.state = PlayState::Paused;
        self.next_due = None;
    }

    pub fn toggle(&mut self, now: Millis) -> PlayState {
        match self.state {
            PlayState::Paused => self.play(now),
            PlayState::Playing => self.pause(),
        }
        self.state
    }

    /// Step to the next speed in the cycle. Play state is untouched; if
    /// playing, the deadline restarts from `now` at the new interval.
    pub fn cycle_speed(&mut self, now: Millis) -> u32 {
        self.speed_index = (self.speed_index + 1) % self.config.speeds.len().max(1);
        if self.is_playing() {
            self.next_due = Some(now + self.interval_ms());
        }
        self.speed()
    }

    /// Manual single steps are only accepted while paused.
    pub fn allows_manual_step(&self) -> bool {
        self.state == PlayState::Paused
    }

    /// Report whether a day is due at `now`, re-arming the deadline if so.
    /// At most one day per call; missed deadlines are dropped rather than
    /// replayed in a burst.
    pub fn poll(&mut self, now: Millis) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let interval = self.interval_ms();
        let next = due + interval;
        self.next_due = Some(if next > now { next } else { now + interval });
        true
    }

    /// How long until the armed deadline, or `None` while paused.
    pub fn time_until_due(&self, now: Millis) -> Option<Millis> {
        self.next_due.map(|due| due.saturating_sub(now))
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}
