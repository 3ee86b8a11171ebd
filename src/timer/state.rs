use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Paused,
    Completed,
}

/// Countdown for a single guide step.
///
/// Elapsed time is `elapsed_baseline_ms` plus the time since `running_anchor`
/// while running, so it never drifts with tick jitter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepTimerState {
    pub status: TimerStatus,
    pub duration_ms: u64,
    pub elapsed_ms: u64,
    #[serde(skip)]
    pub elapsed_baseline_ms: u64,
    #[serde(skip)]
    pub running_anchor: Option<Instant>,
}

impl StepTimerState {
    pub fn new(duration: Duration) -> Self {
        Self {
            status: TimerStatus::Idle,
            duration_ms: duration.as_millis() as u64,
            elapsed_ms: 0,
            elapsed_baseline_ms: 0,
            running_anchor: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn current_elapsed_ms(&self, now: Instant) -> u64 {
        match (self.status, self.running_anchor) {
            (TimerStatus::Running, Some(anchor)) => {
                let since = now.saturating_duration_since(anchor).as_millis() as u64;
                self.elapsed_baseline_ms
                    .saturating_add(since)
                    .min(self.duration_ms)
            }
            _ => self.elapsed_ms,
        }
    }

    pub fn remaining_ms(&self, now: Instant) -> u64 {
        self.duration_ms - self.current_elapsed_ms(now)
    }

    /// Whole seconds left, rounded up so a fresh timer shows its full length.
    pub fn remaining_seconds(&self, now: Instant) -> u64 {
        self.remaining_ms(now).div_ceil(1000)
    }

    /// 0.0 at start, 1.0 when done.
    pub fn progress(&self, now: Instant) -> f64 {
        if self.duration_ms == 0 {
            return 1.0;
        }
        self.current_elapsed_ms(now) as f64 / self.duration_ms as f64
    }

    /// Brings `elapsed_ms` up to date and flips to `Completed` once the
    /// countdown reaches zero. Returns true on that transition.
    pub fn sync(&mut self, now: Instant) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }
        self.elapsed_ms = self.current_elapsed_ms(now);
        if self.elapsed_ms >= self.duration_ms {
            self.status = TimerStatus::Completed;
            self.running_anchor = None;
            self.elapsed_baseline_ms = self.duration_ms;
            return true;
        }
        false
    }

    pub fn start(&mut self, now: Instant) {
        match self.status {
            TimerStatus::Running => {}
            TimerStatus::Completed => self.restart(now),
            TimerStatus::Idle | TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                self.elapsed_baseline_ms = self.elapsed_ms;
                self.running_anchor = Some(now);
            }
        }
    }

    pub fn pause(&mut self, now: Instant) {
        if self.status != TimerStatus::Running {
            return;
        }
        if self.sync(now) {
            return;
        }
        self.status = TimerStatus::Paused;
        self.running_anchor = None;
        self.elapsed_baseline_ms = self.elapsed_ms;
    }

    /// Start/pause button.
    pub fn toggle(&mut self, now: Instant) {
        if self.is_running() {
            self.pause(now);
        } else {
            self.start(now);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(Duration::from_millis(self.duration_ms));
    }

    pub fn restart(&mut self, now: Instant) {
        self.reset();
        self.start(now);
    }
}

/// "2:05" with minutes, "45s" without.
pub fn format_countdown(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    if minutes > 0 {
        format!("{minutes}:{seconds:02}")
    } else {
        format!("{seconds}s")
    }
}
