//! Cosmetic "thinking" delays.
//!
//! The demo pauses before showing search results, answers and analyses. The
//! delay goes through [`Pacer`] so binaries can sleep while tests stay instant.

use std::thread;
use std::time::Duration;

use crate::config::PacingSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pause {
    Search,
    Answer,
    Analysis,
}

pub trait Pacer: Send + Sync {
    /// Wait for the given pause and report how long was spent.
    fn pause(&self, pause: Pause) -> Duration;
}

/// Never waits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPause;

impl Pacer for NoPause {
    fn pause(&self, _pause: Pause) -> Duration {
        Duration::ZERO
    }
}

/// Blocks the calling thread for a fixed duration per pause kind.
#[derive(Debug, Clone)]
pub struct SleepPacer {
    search: Duration,
    answer: Duration,
    analysis: Duration,
}

impl SleepPacer {
    pub fn from_settings(settings: &PacingSettings) -> Self {
        Self {
            search: Duration::from_millis(settings.search_ms),
            answer: Duration::from_millis(settings.answer_ms),
            analysis: Duration::from_millis(settings.analysis_ms),
        }
    }

    pub fn duration(&self, pause: Pause) -> Duration {
        match pause {
            Pause::Search => self.search,
            Pause::Answer => self.answer,
            Pause::Analysis => self.analysis,
        }
    }
}

impl Pacer for SleepPacer {
    fn pause(&self, pause: Pause) -> Duration {
        let d = self.duration(pause);
        thread::sleep(d);
        d
    }
}

pub fn pacer_from_settings(settings: &PacingSettings) -> Box<dyn Pacer> {
    if settings.enabled {
        Box::new(SleepPacer::from_settings(settings))
    } else {
        Box::new(NoPause)
    }
}
