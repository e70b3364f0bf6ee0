use crate::core::errors::{SimError, SimResult};
use crate::core::event_scheduler::EventScheduler;
use crate::core::execution::config::LineConfig;
use crate::core::lifecycle::{LineEvent, ProductionLine};
use crate::core::observer::SimulationObserver;
use crate::core::snapshot::LineSnapshot;
use crate::core::types::SimTime;
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle of the engine itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunStatus {
    /// Configured, `start` not called yet
    Idle,
    Running,
    /// Frozen by `stop`, may be resumed
    Stopped,
    /// A fatal fault occurred, stepping is refused
    Faulted,
}

/// One independent curing line simulation
///
/// The host drives it by calling `step` repeatedly; nothing runs in the
/// background.
pub struct SimulationEngine {
    run_id: Uuid,
    config: LineConfig,
    rng: StdRng,
    scheduler: EventScheduler<LineEvent>,
    line: ProductionLine,
    status: RunStatus,
    fault: Option<SimError>,
    observers: Vec<Box<dyn SimulationObserver>>,
}

impl SimulationEngine {
    /// Create an engine drawing its randomness from `rng`
    pub fn new(config: LineConfig, rng: StdRng) -> SimResult<Self> {
        let line = ProductionLine::new(&config)?;
        Ok(Self {
            run_id: Uuid::new_v4(),
            config,
            rng,
            scheduler: EventScheduler::new(),
            line,
            status: RunStatus::Idle,
            fault: None,
            observers: Vec::new(),
        })
    }

    /// Create an engine seeded from `config.seed`
    pub fn seeded(config: LineConfig) -> SimResult<Self> {
        let rng = StdRng::seed_from_u64(config.seed);
        Self::new(config, rng)
    }

    /// Add an observer to the simulation
    pub fn add_observer(&mut self, observer: Box<dyn SimulationObserver>) {
        self.observers.push(observer);
    }

    /// Reset the line to time zero and arm the first spawn
    ///
    /// Restarting keeps drawing from the same generator; build a fresh engine
    /// to replay a run.
    pub fn start(&mut self) -> SimResult<()> {
        self.line = ProductionLine::new(&self.config)?;
        self.scheduler = EventScheduler::new();
        self.fault = None;
        self.line.start(&mut self.scheduler, &mut self.rng)?;
        self.status = RunStatus::Running;
        info!(
            "run {} started: {} cavities, build {}±{}s, cure {}±{}s",
            self.run_id,
            self.config.pool_capacity,
            self.config.build.mean,
            self.config.build.spread,
            self.config.cure.mean,
            self.config.cure.spread
        );
        Ok(())
    }

    /// Advance the clock by `seconds` of simulated time
    ///
    /// Returns the number of events processed.
    pub fn step(&mut self, seconds: SimTime) -> SimResult<usize> {
        match self.status {
            RunStatus::Running => {}
            RunStatus::Faulted => {
                let reason = self
                    .fault
                    .as_ref()
                    .map(|fault| fault.to_string())
                    .unwrap_or_default();
                return Err(SimError::Halted(reason));
            }
            RunStatus::Idle | RunStatus::Stopped => {
                warn!("run {}: step requested while {:?}", self.run_id, self.status);
                return Err(SimError::NotRunning);
            }
        }
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(SimError::InvalidDuration { duration: seconds });
        }

        let target = self.scheduler.now() + seconds;
        let line = &mut self.line;
        let rng = &mut self.rng;
        let observers = &mut self.observers;
        let mut last_time = self.scheduler.now();

        let outcome = self.scheduler.advance(target, |scheduler, event| {
            let now = scheduler.now();
            if now != last_time {
                for observer in observers.iter_mut() {
                    observer.on_clock_advance(last_time, now);
                }
                last_time = now;
            }

            line.handle(scheduler, rng, event)?;

            for transition in line.drain_transitions() {
                for observer in observers.iter_mut() {
                    observer.on_transition(&transition);
                }
            }
            Ok::<(), SimError>(())
        });

        match outcome {
            Ok(events_processed) => {
                let now = self.scheduler.now();
                if now != last_time {
                    for observer in &mut self.observers {
                        observer.on_clock_advance(last_time, now);
                    }
                }
                for observer in &mut self.observers {
                    observer.on_step_complete(now, events_processed);
                }
                debug!(
                    "=== t={:.2}: {} events, {} queued, {}/{} cavities ===",
                    now,
                    events_processed,
                    self.line.queue_depth(),
                    self.line.pool().occupancy(),
                    self.line.pool().capacity()
                );
                Ok(events_processed)
            }
            Err(fault) => {
                if fault.is_fatal() {
                    error!(
                        "run {} halted at t={:.2}: {}",
                        self.run_id,
                        self.scheduler.now(),
                        fault
                    );
                    self.status = RunStatus::Faulted;
                    self.fault = Some(fault.clone());
                }
                Err(fault)
            }
        }
    }

    /// Freeze the simulation; the state stays readable
    pub fn stop(&mut self) {
        if self.status == RunStatus::Running {
            self.status = RunStatus::Stopped;
            info!("run {} stopped at t={:.2}", self.run_id, self.now());
        }
    }

    /// Continue a stopped simulation from where it froze
    pub fn resume(&mut self) -> SimResult<()> {
        match self.status {
            RunStatus::Stopped => {
                self.status = RunStatus::Running;
                info!("run {} resumed at t={:.2}", self.run_id, self.now());
                Ok(())
            }
            RunStatus::Running => Ok(()),
            RunStatus::Idle => Err(SimError::NotRunning),
            RunStatus::Faulted => Err(SimError::Halted(
                self.fault
                    .as_ref()
                    .map(|fault| fault.to_string())
                    .unwrap_or_default(),
            )),
        }
    }

    /// Current read-only view of the line
    pub fn snapshot(&self) -> LineSnapshot {
        LineSnapshot::capture(self.run_id, self.now(), self.status, &self.line)
    }

    /// Get current simulation time
    pub fn now(&self) -> SimTime {
        self.scheduler.now()
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// The fault that halted the run, if any
    pub fn fault(&self) -> Option<&SimError> {
        self.fault.as_ref()
    }

    pub fn run_id(&self) -> Uuid {
        self.run_id
    }

    pub fn config(&self) -> &LineConfig {
        &self.config
    }

    /// Check if there are pending events in the scheduler
    pub fn has_pending_events(&self) -> bool {
        self.scheduler.has_events()
    }

    /// Inject an event directly into the queue
    #[cfg(test)]
    pub(crate) fn inject(&mut self, delay: SimTime, event: LineEvent) -> SimResult<()> {
        self.scheduler.schedule_after(delay, event)
    }
}
