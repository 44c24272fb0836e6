//! Fixed-cadence scheduler driving the pipeline until shutdown

use crate::core::pipeline::{CycleOutcome, Pipeline};
use crate::error::PipelineError;
use cron::Schedule;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, error, info, info_span, Instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Idle,
    Running,
}

/// When the next cycle starts
#[derive(Debug, Clone)]
pub enum Cadence {
    /// Sleep a fixed duration after each cycle
    Fixed(Duration),
    /// Wait for the next cron tick; `fallback` is used if the schedule is exhausted
    Cron { schedule: Schedule, fallback: Duration },
}

impl Cadence {
    pub fn cron(expr: &str, fallback: Duration) -> Result<Self, PipelineError> {
        let schedule = Schedule::from_str(expr).map_err(|e| {
            PipelineError::Unexpected(format!("invalid cron expression '{}': {}", expr, e))
        })?;
        Ok(Cadence::Cron { schedule, fallback })
    }

    pub fn next_delay(&self) -> Duration {
        match self {
            Cadence::Fixed(interval) => *interval,
            Cadence::Cron { schedule, fallback } => {
                let now = chrono::Utc::now();
                match schedule.upcoming(chrono::Utc).next() {
                    Some(next_tick) if next_tick > now => {
                        (next_tick - now).to_std().unwrap_or(*fallback)
                    }
                    Some(_) => Duration::ZERO,
                    None => *fallback,
                }
            }
        }
    }
}

pub struct Scheduler {
    pipeline: Arc<Pipeline>,
    cadence: Cadence,
    state: Arc<RwLock<SchedulerState>>,
}

impl Scheduler {
    pub fn new(pipeline: Arc<Pipeline>, cadence: Cadence) -> Self {
        Self {
            pipeline,
            cadence,
            state: Arc::new(RwLock::new(SchedulerState::Idle)),
        }
    }

    /// Cadence taken from the pipeline's config: cron when configured,
    /// fixed interval otherwise
    pub fn from_pipeline(pipeline: Arc<Pipeline>) -> Result<Self, PipelineError> {
        let config = pipeline.config();
        let cadence = match config.schedule_cron {
            Some(ref expr) => Cadence::cron(expr, config.poll_interval)?,
            None => Cadence::Fixed(config.poll_interval),
        };
        Ok(Self::new(pipeline, cadence))
    }

    pub async fn state(&self) -> SchedulerState {
        *self.state.read().await
    }

    /// Run cycles until the process receives ctrl-c or SIGTERM
    pub async fn run_forever(&self) -> u64 {
        self.run_until(shutdown_signal()).await
    }

    /// Run cycles until `shutdown` resolves; returns the number of cycles run.
    ///
    /// Shutdown is observed between cycles, a running cycle always finishes.
    /// `shutdown` is polled once up front so signal listeners are registered
    /// before the first cycle starts.
    pub async fn run_until<F>(&self, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut cycles: u64 = 0;

        tokio::select! {
            biased;
            _ = &mut shutdown => {
                info!("Scheduler: shutdown requested before first cycle");
                return cycles;
            }
            _ = std::future::ready(()) => {}
        }

        info!(cadence = ?self.cadence, "Scheduler: started");

        loop {
            cycles += 1;
            self.run_one(cycles).await;

            let delay = self.cadence.next_delay();
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!(cycles, "Scheduler: shutdown requested");
                    break;
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }

        cycles
    }

    async fn run_one(&self, cycle: u64) -> CycleOutcome {
        *self.state.write().await = SchedulerState::Running;

        let span = info_span!("cycle", cycle, ticker = %self.pipeline.config().ticker);
        let pipeline = self.pipeline.clone();
        // a spawned task turns a panic into a JoinError instead of unwinding here
        let task = tokio::spawn(async move { pipeline.run_cycle().await }.instrument(span));
        let outcome = match task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                let failure = PipelineError::Unexpected(e.to_string());
                error!(cycle, error = %failure, "Scheduler: cycle aborted");
                CycleOutcome::Skipped(failure)
            }
        };
        debug!(cycle, outcome = ?outcome, "Scheduler: cycle finished");

        *self.state.write().await = SchedulerState::Idle;
        outcome
    }
}

/// Resolves on ctrl-c, or SIGTERM on unix
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
