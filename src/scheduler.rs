//! Restartable tick source for the game loop.

use std::time::Duration;

use futures::future;
use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Drives game steps at a fixed cadence
///
/// The timer holds at most one schedule. While stopped, [`TickTimer::tick`]
/// stays pending forever, so a `select!` arm awaiting it simply never fires.
#[derive(Debug)]
pub struct TickTimer {
    interval: Option<Interval>,
}

impl TickTimer {
    pub fn new() -> Self {
        Self { interval: None }
    }

    /// Arm the timer; the first fire comes one full period from now
    ///
    /// Any previous schedule is replaced. Ticks missed during a stall are
    /// not replayed.
    pub fn start(&mut self, period: Duration) {
        let mut interval = time::interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    /// Disarm the timer; a no-op when already stopped
    pub fn stop(&mut self) {
        self.interval = None;
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_some()
    }

    /// Wait for the next tick
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => future::pending().await,
        }
    }
}

impl Default for TickTimer {
    fn default() -> Self {
        Self::new()
    }
}
