//! Wall-clock timers that feed day and dilemma ticks into the command queue.
//!
//! The scheduler never touches run state. It only sends [`Command::DayTick`]
//! and [`Command::DilemmaTick`]; the engine applies them in order with every
//! other command, so a tick can never interleave with a half-applied action.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::debug;

use crate::action::Command;
use crate::config::TimingConfig;

/// Periodic day and dilemma timers, armed only while a run is active
pub struct TickScheduler {
    day_length: Duration,
    dilemma_interval: Duration,
    tx: UnboundedSender<Command>,
    tasks: Vec<JoinHandle<()>>,
}

impl TickScheduler {
    pub fn new(day_length: Duration, dilemma_interval: Duration, tx: UnboundedSender<Command>) -> Self {
        Self {
            day_length,
            dilemma_interval,
            tx,
            tasks: Vec::new(),
        }
    }

    pub fn from_config(timing: &TimingConfig, tx: UnboundedSender<Command>) -> Self {
        Self::new(timing.day_length(), timing.dilemma_interval(), tx)
    }

    /// Arm both timers. The first tick of each fires one full period from now.
    /// Must be called from within a tokio runtime. Starting twice is a no-op.
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }
        self.tasks.clear();
        debug!(
            "Arming timers: day every {:?}, dilemma every {:?}",
            self.day_length, self.dilemma_interval
        );
        self.tasks.push(spawn_ticker(self.day_length, Command::DayTick, self.tx.clone()));
        self.tasks.push(spawn_ticker(
            self.dilemma_interval,
            Command::DilemmaTick,
            self.tx.clone(),
        ));
    }

    /// Cancel both timers
    pub fn stop(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        debug!("Disarming timers");
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }

    pub fn is_running(&self) -> bool {
        !self.tasks.is_empty() && self.tasks.iter().all(|t| !t.is_finished())
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}

fn spawn_ticker(period: Duration, command: Command, tx: UnboundedSender<Command>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if tx.send(command).is_err() {
                // Receiver gone: the game loop has exited
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;
    use tokio::time::sleep;
    use tokio_test::{assert_err, assert_ok};

    fn drain(rx: &mut tokio::sync::mpsc::UnboundedReceiver<Command>) -> Vec<Command> {
        let mut out = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            out.push(cmd);
        }
        out
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_after_one_period() {
        let (tx, mut rx) = unbounded_channel();
        let mut scheduler = TickScheduler::new(Duration::from_secs(15), Duration::from_secs(25), tx);
        scheduler.start();
        assert!(scheduler.is_running());

        sleep(Duration::from_secs(14)).await;
        assert_err!(rx.try_recv());

        sleep(Duration::from_secs(2)).await;
        assert_eq!(assert_ok!(rx.try_recv()), Command::DayTick);
        assert_err!(rx.try_recv());

        sleep(Duration::from_secs(10)).await;
        assert_eq!(drain(&mut rx), vec![Command::DilemmaTick]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_repeat() {
        let (tx, mut rx) = unbounded_channel();
        let mut scheduler = TickScheduler::new(Duration::from_secs(15), Duration::from_secs(25), tx);
        scheduler.start();

        sleep(Duration::from_secs(61)).await;
        let ticks = drain(&mut rx);
        let days = ticks.iter().filter(|c| **c == Command::DayTick).count();
        let dilemmas = ticks.iter().filter(|c| **c == Command::DilemmaTick).count();
        assert_eq!(days, 4);
        assert_eq!(dilemmas, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_cancels_timers() {
        let (tx, mut rx) = unbounded_channel();
        let mut scheduler = TickScheduler::new(Duration::from_secs(15), Duration::from_secs(25), tx);
        scheduler.start();
        sleep(Duration::from_secs(16)).await;
        scheduler.stop();
        assert!(!scheduler.is_running());
        drain(&mut rx);

        sleep(Duration::from_secs(120)).await;
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_rearms_full_period() {
        let (tx, mut rx) = unbounded_channel();
        let mut scheduler = TickScheduler::new(Duration::from_secs(15), Duration::from_secs(25), tx);
        scheduler.start();
        sleep(Duration::from_secs(10)).await;
        scheduler.stop();
        scheduler.start();

        sleep(Duration::from_secs(10)).await;
        assert!(drain(&mut rx).is_empty());
        sleep(Duration::from_secs(6)).await;
        assert_eq!(drain(&mut rx), vec![Command::DayTick]);
    }

    #[tokio::test]
    async fn test_from_config() {
        let (tx, _rx) = unbounded_channel();
        let mut scheduler = TickScheduler::from_config(&TimingConfig::default(), tx);
        assert!(!scheduler.is_running());
        scheduler.start();
        scheduler.start();
        assert_eq!(scheduler.tasks.len(), 2);
        scheduler.stop();
        assert!(!scheduler.is_running());
    }
}
