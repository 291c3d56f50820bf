//! End-to-end demo runs against the in-memory dashboard.
//!
//! Each test drives a full session the way a click on the trigger would,
//! with instant timers so the five source pauses cost nothing.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use civic_trust::{
    compute_report, dashboard_router, seed_for, Dashboard, RunOutcome, Session, SimulationConfig,
    Sleeper, StepState,
};

const TS: i64 = 1_735_689_600_000;

#[derive(Default, Clone)]
struct InstantSleeper {
    calls: Arc<Mutex<usize>>,
}

#[async_trait]
impl Sleeper for InstantSleeper {
    async fn sleep(&self, _duration: Duration) {
        *self.calls.lock().unwrap() += 1;
        tokio::task::yield_now().await;
    }
}

fn session(name: &str, credit: &str) -> Session<Dashboard, InstantSleeper> {
    Session::with_sleeper(
        Dashboard::with_inputs(name, credit),
        InstantSleeper::default(),
        SimulationConfig::default().with_fixed_timestamp(TS),
    )
}

// ---------------------------------------------------------------------------
// Alice with a 742 credit score
// ---------------------------------------------------------------------------
#[tokio::test]
async fn alice_742_shows_737_credit() {
    let session = session("Alice", "742");
    let outcome = session.run_demo().await;

    let summary = outcome.summary().expect("completed");
    assert_eq!(summary.report.credit_display, 737);
    assert_eq!(session.snapshot().credit_ring.value, Some(737));
}

// ---------------------------------------------------------------------------
// Blank credit input behaves exactly like 742
// ---------------------------------------------------------------------------
#[tokio::test]
async fn blank_credit_matches_742() {
    let blank = session("Alice", "").run_demo().await;
    let explicit = session("Alice", "742").run_demo().await;

    let blank = blank.summary().unwrap();
    let explicit = explicit.summary().unwrap();
    assert_eq!(blank.report.credit_input, 742);
    assert_eq!(blank.report, explicit.report);
}

// ---------------------------------------------------------------------------
// Two triggers in quick succession animate the sources once
// ---------------------------------------------------------------------------
#[tokio::test]
async fn double_trigger_runs_once() {
    let sleeper = InstantSleeper::default();
    let session = Session::with_sleeper(
        Dashboard::with_inputs("Alice", "742"),
        sleeper.clone(),
        SimulationConfig::default().with_fixed_timestamp(TS),
    );

    let (a, b) = tokio::join!(session.run_demo(), session.run_demo());
    let completed = [&a, &b]
        .iter()
        .filter(|o| matches!(o, RunOutcome::Completed(_)))
        .count();

    assert_eq!(completed, 1);
    assert_eq!(*sleeper.calls.lock().unwrap(), 6);
}

// ---------------------------------------------------------------------------
// After a run: flag cleared, trigger enabled and relabelled
// ---------------------------------------------------------------------------
#[tokio::test]
async fn trigger_restored_after_run() {
    let session = session("Citizen", "");
    session.run_demo().await;

    assert!(!session.is_running());
    let dashboard = session.snapshot();
    assert!(dashboard.trigger.enabled);
    assert_eq!(dashboard.trigger.label, "Re-Calculate Score");
    assert!(dashboard.sources.iter().all(|s| s.state == StepState::Done));
    assert_eq!(dashboard.progress_percent, 100.0);
}

// ---------------------------------------------------------------------------
// Scores in the dashboard agree with the pure computation
// ---------------------------------------------------------------------------
#[tokio::test]
async fn dashboard_matches_report() {
    let session = session("Priya", "810");
    session.run_demo().await;

    let report = compute_report(seed_for("Priya", TS), 810);
    let dashboard = session.snapshot();

    assert_eq!(dashboard.civic_ring.value, Some(report.civic));
    assert_eq!(dashboard.combined_ring.value, Some(report.combined));
    assert_eq!(dashboard.tier.as_deref(), Some(report.tier.label()));
    assert_eq!(dashboard.benefit_band.as_deref(), Some(report.benefit.label()));

    for (field, value) in report.breakdown.entries() {
        let row = dashboard.field(field.key).unwrap();
        assert_eq!(row.text, format!("{} / {}", value, field.max));
        assert!(row.bar_percent >= 0.0 && row.bar_percent <= 100.0);
    }
}

// ---------------------------------------------------------------------------
// Different timestamps give different seeds for the same name
// ---------------------------------------------------------------------------
#[tokio::test]
async fn same_name_new_time_new_seed() {
    let first = session("Alice", "742").run_demo().await;
    let later = Session::with_sleeper(
        Dashboard::with_inputs("Alice", "742"),
        InstantSleeper::default(),
        SimulationConfig::default().with_fixed_timestamp(TS + 1),
    )
    .run_demo()
    .await;

    assert_ne!(
        first.summary().unwrap().report.seed,
        later.summary().unwrap().report.seed
    );
}

// ---------------------------------------------------------------------------
// View router and simulation touch disjoint state
// ---------------------------------------------------------------------------
#[tokio::test]
async fn navigation_independent_of_runs() {
    let mut router = dashboard_router();
    let session = session("Alice", "742");

    router.activate_target("breakdown");
    session.run_demo().await;

    assert_eq!(router.visible_panels(), vec!["breakdown"]);
    assert_eq!(router.breadcrumb(), Some("Score Breakdown"));
}
