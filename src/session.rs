// ⏱️ Score Simulation Session - One guarded demo run at a time
// Animates the five sources, then computes and renders the scores

use crate::config::SimulationConfig;
use crate::scoring::{compute_report, parse_credit_input, resolve_name, ScoreReport};
use crate::seed::{clamp, seed_for};
use crate::sources::{progress_after, StepState, SOURCE_STEPS};
use crate::surface::{Ring, Surface, TRIGGER_BUSY_LABEL, TRIGGER_RERUN_LABEL};
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

// ============================================================================
// SUSPENSION
// ============================================================================

/// The only suspension points of a run go through this.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Real timers on the tokio runtime
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

// ============================================================================
// RUN OUTCOME
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub citizen_name: String,
    pub timestamp_ms: i64,
    pub report: ScoreReport,
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    Completed(RunSummary),
    /// Another run held the flag; nothing was touched
    AlreadyRunning,
}

impl RunOutcome {
    pub fn summary(&self) -> Option<&RunSummary> {
        match self {
            RunOutcome::Completed(summary) => Some(summary),
            RunOutcome::AlreadyRunning => None,
        }
    }
}

/// Clears the running flag when dropped.
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

// ============================================================================
// SESSION
// ============================================================================

/// Owns the rendering surface, the running flag, and the timing config.
pub struct Session<S, T = TokioSleeper> {
    surface: Mutex<S>,
    sleeper: T,
    running: AtomicBool,
    config: SimulationConfig,
}

impl<S: Surface + Send> Session<S, TokioSleeper> {
    pub fn new(surface: S, config: SimulationConfig) -> Self {
        Session::with_sleeper(surface, TokioSleeper, config)
    }
}

impl<S: Surface + Send, T: Sleeper> Session<S, T> {
    pub fn with_sleeper(surface: S, sleeper: T, config: SimulationConfig) -> Self {
        Session {
            surface: Mutex::new(surface),
            sleeper,
            running: AtomicBool::new(false),
            config,
        }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Run `f` with exclusive access to the surface. Never held across a suspension.
    pub fn with_surface<R>(&self, f: impl FnOnce(&mut S) -> R) -> R {
        let mut surface = self.surface.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut surface)
    }

    pub fn snapshot(&self) -> S
    where
        S: Clone,
    {
        self.with_surface(|s| s.clone())
    }

    /// One full demo run. Calling it while a run is active is a no-op.
    pub async fn run_demo(&self) -> RunOutcome {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("run already in progress, ignoring trigger");
            return RunOutcome::AlreadyRunning;
        }
        let guard = RunningGuard(&self.running);
        let run_id = Uuid::new_v4();

        // Setup
        let (citizen_name, credit_input) = self.with_surface(|s| {
            s.set_trigger(false, TRIGGER_BUSY_LABEL);
            let raw_name = s.citizen_name();
            let name = resolve_name(&raw_name, &self.config.default_name).to_string();
            let credit = parse_credit_input(&s.credit_input(), self.config.default_credit);
            (name, credit)
        });
        let timestamp_ms = self
            .config
            .fixed_timestamp_ms
            .unwrap_or_else(|| Utc::now().timestamp_millis());
        let seed = seed_for(&citizen_name, timestamp_ms);

        info!(%run_id, citizen = %citizen_name, credit_input, seed, "starting civic score run");

        self.with_surface(|s| {
            s.set_progress(0.0);
            s.reset_sources();
        });

        // Sources, strictly one after another
        for (i, step) in SOURCE_STEPS.iter().enumerate() {
            self.with_surface(|s| s.mark_source(step, StepState::InProgress));

            let delay = self.step_delay();
            debug!(%run_id, source = step.key, delay_ms = delay.as_millis() as u64, "fetching source");
            self.sleeper.sleep(delay).await;

            self.with_surface(|s| {
                s.mark_source(step, StepState::Done);
                s.set_progress(progress_after(i + 1));
            });
        }

        let report = compute_report(seed, credit_input);
        self.with_surface(|s| {
            render_report(s, &report);
            s.set_trigger(true, TRIGGER_RERUN_LABEL);
        });
        drop(guard);

        info!(
            %run_id,
            civic = report.civic,
            combined = report.combined,
            tier = report.tier.label(),
            "civic score run finished"
        );

        self.sleeper
            .sleep(Duration::from_millis(self.config.scroll_delay_ms))
            .await;
        self.with_surface(|s| s.scroll_results_into_view());

        RunOutcome::Completed(RunSummary {
            run_id,
            citizen_name,
            timestamp_ms,
            report,
        })
    }

    fn step_delay(&self) -> Duration {
        let min = self.config.step_delay_min_ms as f64;
        let max = self.config.step_delay_max_ms as f64;
        let ms = if min < max {
            rand::thread_rng().gen_range(min..max)
        } else {
            min
        };
        Duration::from_secs_f64(ms / 1000.0)
    }
}

// ============================================================================
// RENDERING
// ============================================================================

/// Ring percentages are clamped here; the literal values are not.
pub fn set_ring_progress<S: Surface + ?Sized>(surface: &mut S, ring: Ring, percentage: f64, value: i64) {
    surface.set_ring(ring, clamp(percentage, 0.0, 100.0), value);
}

/// Write every score slot of a finished report.
pub fn render_report<S: Surface + ?Sized>(surface: &mut S, report: &ScoreReport) {
    set_ring_progress(surface, Ring::Civic, report.civic_percent(), report.civic);
    set_ring_progress(surface, Ring::Credit, report.credit_percent(), report.credit_display);
    set_ring_progress(surface, Ring::Combined, report.combined_percent(), report.combined);

    for (field, value) in report.breakdown.entries() {
        let text = format!("{} / {}", value, field.max);
        let bar = (value as f64 / field.max as f64) * 100.0;
        surface.set_field(field, &text, bar);
    }

    surface.set_tier(report.tier.label());
    surface.set_benefit_band(report.benefit.label());
}

// ============================================================================
// TESTS
// ============================================================================
