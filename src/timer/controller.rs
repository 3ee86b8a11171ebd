use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{anyhow, Result};
use log::{debug, info};
use serde::Serialize;
use tokio::{
    sync::{broadcast, Mutex},
    time,
};
use tokio_util::sync::CancellationToken;

use crate::{db::models::BrewMethod, guides::BrewGuide};

use super::{format_countdown, StepTimerState, TimerStatus};

/// Identifies one timed step of one guide.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct StepTimerKey {
    pub method: BrewMethod,
    pub step_number: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    pub key: StepTimerKey,
    pub label: String,
    pub status: TimerStatus,
    pub duration_ms: u64,
    pub remaining_ms: u64,
    pub progress: f64,
    pub time_string: String,
}

struct TimerSlot {
    label: String,
    state: StepTimerState,
    ticker: Option<CancellationToken>,
}

impl TimerSlot {
    fn snapshot(&self, key: StepTimerKey, now: Instant) -> TimerSnapshot {
        TimerSnapshot {
            key,
            label: self.label.clone(),
            status: self.state.status,
            duration_ms: self.state.duration_ms,
            remaining_ms: self.state.remaining_ms(now),
            progress: self.state.progress(now),
            time_string: format_countdown(self.state.remaining_seconds(now)),
        }
    }

    fn cancel_ticker(&mut self) {
        if let Some(token) = self.ticker.take() {
            token.cancel();
        }
    }
}

type Slots = Arc<Mutex<HashMap<StepTimerKey, TimerSlot>>>;

/// Independent countdowns for guide steps. Each running timer owns a tick
/// task with its own cancellation token; snapshots go out on a broadcast
/// channel on every tick and state change.
#[derive(Clone)]
pub struct BrewTimers {
    slots: Slots,
    updates: broadcast::Sender<TimerSnapshot>,
    tick_interval: Duration,
}

impl Default for BrewTimers {
    fn default() -> Self {
        Self::new()
    }
}

impl BrewTimers {
    pub fn new() -> Self {
        Self::with_tick_interval(Duration::from_secs(1))
    }

    pub fn with_tick_interval(tick_interval: Duration) -> Self {
        let (updates, _) = broadcast::channel(64);
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
            updates,
            tick_interval,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TimerSnapshot> {
        self.updates.subscribe()
    }

    /// Creates the timer if it doesn't exist yet; an existing timer keeps
    /// its state.
    pub async fn register(
        &self,
        key: StepTimerKey,
        duration: Duration,
        label: impl Into<String>,
    ) -> TimerSnapshot {
        let mut slots = self.slots.lock().await;
        let slot = slots.entry(key).or_insert_with(|| TimerSlot {
            label: label.into(),
            state: StepTimerState::new(duration),
            ticker: None,
        });
        slot.snapshot(key, Instant::now())
    }

    /// Registers every timed step of `guide`.
    pub async fn register_guide(&self, guide: &BrewGuide) -> Vec<TimerSnapshot> {
        let mut snapshots = Vec::new();
        for step in &guide.steps {
            if let Some(timer) = &step.timer {
                let key = StepTimerKey {
                    method: guide.method,
                    step_number: step.step_number,
                };
                snapshots.push(
                    self.register(key, Duration::from_secs(u64::from(timer.seconds)), timer.label)
                        .await,
                );
            }
        }
        snapshots
    }

    pub async fn snapshot(&self, key: StepTimerKey) -> Option<TimerSnapshot> {
        let now = Instant::now();
        let mut slots = self.slots.lock().await;
        slots.get_mut(&key).map(|slot| {
            slot.state.sync(now);
            slot.snapshot(key, now)
        })
    }

    pub async fn snapshots(&self) -> Vec<TimerSnapshot> {
        let now = Instant::now();
        let mut slots = self.slots.lock().await;
        let mut all: Vec<TimerSnapshot> = slots
            .iter_mut()
            .map(|(key, slot)| {
                slot.state.sync(now);
                slot.snapshot(*key, now)
            })
            .collect();
        all.sort_by_key(|snapshot| (snapshot.key.method.as_str(), snapshot.key.step_number));
        all
    }

    /// Start or pause, like the play button on a step.
    pub async fn toggle(&self, key: StepTimerKey) -> Result<TimerSnapshot> {
        self.transition(key, |state, now| state.toggle(now)).await
    }

    pub async fn pause(&self, key: StepTimerKey) -> Result<TimerSnapshot> {
        self.transition(key, |state, now| state.pause(now)).await
    }

    pub async fn reset(&self, key: StepTimerKey) -> Result<TimerSnapshot> {
        self.transition(key, |state, _| state.reset()).await
    }

    pub async fn restart(&self, key: StepTimerKey) -> Result<TimerSnapshot> {
        self.transition(key, |state, now| state.restart(now)).await
    }

    /// Cancels every tick task and forgets all timers.
    pub async fn clear(&self) {
        let mut slots = self.slots.lock().await;
        for slot in slots.values_mut() {
            slot.cancel_ticker();
        }
        slots.clear();
    }

    async fn transition(
        &self,
        key: StepTimerKey,
        apply: impl FnOnce(&mut StepTimerState, Instant),
    ) -> Result<TimerSnapshot> {
        let now = Instant::now();
        let snapshot = {
            let mut slots = self.slots.lock().await;
            let slot = slots
                .get_mut(&key)
                .ok_or_else(|| anyhow!("no timer for {:?} step {}", key.method, key.step_number))?;
            slot.state.sync(now);
            apply(&mut slot.state, now);

            slot.cancel_ticker();
            if slot.state.is_running() {
                let token = CancellationToken::new();
                slot.ticker = Some(token.clone());
                self.spawn_ticker(key, token);
            }
            slot.snapshot(key, now)
        };

        debug!("Timer {:?} step {} -> {:?}", key.method, key.step_number, snapshot.status);
        let _ = self.updates.send(snapshot.clone());
        Ok(snapshot)
    }

    fn spawn_ticker(&self, key: StepTimerKey, token: CancellationToken) {
        let slots = self.slots.clone();
        let updates = self.updates.clone();
        let tick_interval = self.tick_interval;

        tokio::spawn(async move {
            let mut interval = time::interval(tick_interval);
            // First tick fires immediately.
            interval.tick().await;
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    _ = interval.tick() => {}
                }

                let (snapshot, finished) = {
                    let mut guard = slots.lock().await;
                    let Some(slot) = guard.get_mut(&key) else {
                        break;
                    };
                    if token.is_cancelled() || !slot.state.is_running() {
                        break;
                    }
                    let now = Instant::now();
                    let finished = slot.state.sync(now);
                    if finished {
                        slot.ticker = None;
                    }
                    (slot.snapshot(key, now), finished)
                };

                let _ = updates.send(snapshot);
                if finished {
                    info!("Timer {:?} step {} completed", key.method, key.step_number);
                    break;
                }
            }
        });
    }
}
