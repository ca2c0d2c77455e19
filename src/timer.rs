//! Per-level stopwatch: runs from `LevelStarted` until `LevelCompleted`.

use crate::signals::GameSignal;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LevelTimer {
    elapsed: f32,
    running: bool,
}

impl LevelTimer {
    pub fn start(&mut self) {
        self.elapsed = 0.0;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn tick(&mut self, dt: f32) {
        if self.running {
            self.elapsed += dt;
        }
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn observe(&mut self, signal: &GameSignal) {
        match signal {
            GameSignal::LevelStarted { .. } => self.start(),
            GameSignal::LevelCompleted { .. } => self.stop(),
            _ => {}
        }
    }

    /// `MM:SS.cc`
    pub fn display(&self) -> String {
        format_clock(self.elapsed)
    }
}

pub fn format_clock(secs: f32) -> String {
    let centis = (secs.max(0.0) * 100.0) as u64;
    let minutes = centis / 6000;
    let seconds = (centis / 100) % 60;
    format!("{minutes:02}:{seconds:02}.{:02}", centis % 100)
}
