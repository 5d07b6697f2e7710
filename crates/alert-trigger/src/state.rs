//! Simulated workload state — gauges, counters and alert modes.
//!
//! A single `GaugeState` record lives behind one mutex inside
//! [`Simulator`]. Every scrape of `/` or `/metrics` runs [`GaugeState::tick`],
//! which drifts each gauge up (mode on) or back toward its baseline
//! (mode off). Trigger actions snap gauges to alert-worthy values.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Resting value for CPU and memory gauges. Drift never takes them below it.
pub const BASELINE_PERCENT: f64 = 50.0;

/// Upper bound for every percentage gauge.
pub const MAX_PERCENT: f64 = 100.0;

/// Errors added to `error_count` by a single `high_errors` trigger.
pub const ERROR_BURST: u64 = 100;

const HIGH_CPU_PERCENT: f64 = 85.0;
const HIGH_MEMORY_PERCENT: f64 = 95.0;
const HIGH_ERROR_RATE_PERCENT: f64 = 10.0;

// Per-tick drift ceilings.
const CPU_RISE: f64 = 2.0;
const CPU_FALL: f64 = 1.0;
const MEMORY_RISE: f64 = 2.0;
const MEMORY_FALL: f64 = 1.0;
const ERROR_RISE: f64 = 5.0;
const ERROR_FALL: f64 = 2.0;

/// Control actions accepted by `/trigger?action=...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAction {
    HighCpu,
    HighMemory,
    HighErrors,
    Reset,
}

impl TriggerAction {
    /// Parse the `action` query value. Unrecognized values yield `None`.
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            "high_cpu" => Some(Self::HighCpu),
            "high_memory" => Some(Self::HighMemory),
            "high_errors" => Some(Self::HighErrors),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }

    /// Query value for this action, as used in links.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HighCpu => "high_cpu",
            Self::HighMemory => "high_memory",
            Self::HighErrors => "high_errors",
            Self::Reset => "reset",
        }
    }

    /// Confirmation shown after the action has been applied.
    pub fn message(&self) -> &'static str {
        match self {
            Self::HighCpu => "High CPU mode activated! CPU usage set to 85%",
            Self::HighMemory => "High Memory mode activated! Memory usage set to 95%",
            Self::HighErrors => "High Error Rate mode activated! Error rate set to 10%",
            Self::Reset => "All metrics reset to normal values",
        }
    }
}

/// The whole mutable record of the simulated workload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeState {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub error_rate_percent: f64,
    pub request_count: u64,
    pub error_count: u64,
    pub high_cpu_mode: bool,
    pub high_memory_mode: bool,
    pub high_error_mode: bool,
}

impl Default for GaugeState {
    fn default() -> Self {
        Self {
            cpu_percent: BASELINE_PERCENT,
            memory_percent: BASELINE_PERCENT,
            error_rate_percent: 0.0,
            request_count: 0,
            error_count: 0,
            high_cpu_mode: false,
            high_memory_mode: false,
            high_error_mode: false,
        }
    }
}

impl GaugeState {
    /// Advance every gauge by one random drift step.
    ///
    /// CPU and memory floor at [`BASELINE_PERCENT`]; the error rate floors
    /// at zero. All gauges cap at [`MAX_PERCENT`].
    pub fn tick<R: Rng>(&mut self, rng: &mut R) {
        self.cpu_percent = if self.high_cpu_mode {
            (self.cpu_percent + rng.gen_range(0.0..=CPU_RISE)).min(MAX_PERCENT)
        } else {
            (self.cpu_percent - rng.gen_range(0.0..=CPU_FALL)).max(BASELINE_PERCENT)
        };

        self.memory_percent = if self.high_memory_mode {
            (self.memory_percent + rng.gen_range(0.0..=MEMORY_RISE)).min(MAX_PERCENT)
        } else {
            (self.memory_percent - rng.gen_range(0.0..=MEMORY_FALL)).max(BASELINE_PERCENT)
        };

        self.error_rate_percent = if self.high_error_mode {
            (self.error_rate_percent + rng.gen_range(0.0..=ERROR_RISE)).min(MAX_PERCENT)
        } else {
            (self.error_rate_percent - rng.gen_range(0.0..=ERROR_FALL)).max(0.0)
        };
    }

    /// Apply a trigger action. Counters other than `error_count` are untouched.
    pub fn apply(&mut self, action: TriggerAction) {
        match action {
            TriggerAction::HighCpu => {
                self.high_cpu_mode = true;
                self.cpu_percent = HIGH_CPU_PERCENT;
            }
            TriggerAction::HighMemory => {
                self.high_memory_mode = true;
                self.memory_percent = HIGH_MEMORY_PERCENT;
            }
            TriggerAction::HighErrors => {
                self.high_error_mode = true;
                self.error_rate_percent = HIGH_ERROR_RATE_PERCENT;
                self.error_count += ERROR_BURST;
            }
            TriggerAction::Reset => {
                self.high_cpu_mode = false;
                self.high_memory_mode = false;
                self.high_error_mode = false;
                self.cpu_percent = BASELINE_PERCENT;
                self.memory_percent = BASELINE_PERCENT;
                self.error_rate_percent = 0.0;
            }
        }
    }
}

struct Inner {
    state: GaugeState,
    rng: StdRng,
}

/// Shared handle to the simulated workload.
///
/// Cheap to clone; all clones observe and mutate the same record.
#[derive(Clone)]
pub struct Simulator {
    inner: Arc<Mutex<Inner>>,
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulator {
    /// Create a simulator seeded from OS entropy.
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Create a simulator with a fixed seed (for reproducible tests).
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                state: GaugeState::default(),
                rng,
            })),
        }
    }

    /// Drift the gauges, count the request, and return the state as it was
    /// before this request was counted.
    pub async fn scrape(&self) -> GaugeState {
        let mut inner = self.inner.lock().await;
        let Inner { state, rng } = &mut *inner;
        state.tick(rng);
        let observed = *state;
        state.request_count += 1;
        observed
    }

    /// Count a request that does not drift the gauges.
    pub async fn record_request(&self) {
        self.inner.lock().await.state.request_count += 1;
    }

    /// Apply `action` (if recognized) and count the request.
    pub async fn trigger(&self, action: Option<TriggerAction>) {
        let mut inner = self.inner.lock().await;
        match action {
            Some(action) => {
                inner.state.apply(action);
                info!(action = action.as_str(), "trigger applied");
            }
            None => debug!("unknown trigger action ignored"),
        }
        inner.state.request_count += 1;
    }

    /// Current state without drifting or counting.
    #[cfg(test)]
    async fn snapshot(&self) -> GaugeState {
        self.inner.lock().await.state
    }
}
