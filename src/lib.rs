// Civic Trust Score - Core Library
// Exposes all modules for use in the TUI, the API server, and tests

pub mod config;
pub mod router;
pub mod scoring;
pub mod seed;
pub mod session;
pub mod sources;
pub mod surface;

// Re-export commonly used types
pub use config::SimulationConfig;
pub use router::{dashboard_router, NavEntry, Panel, RouterState, ViewRouter, DASHBOARD_VIEWS};
pub use scoring::{
    compute_report, parse_credit_input, resolve_name,
    BenefitBand, CitizenTier, ScoreBreakdown, ScoreField, ScoreReport,
    DEFAULT_CREDIT, DEFAULT_NAME, SCORE_FIELDS,
};
pub use seed::{hash_seed, random_from_seed, seed_for};
pub use session::{render_report, RunOutcome, RunSummary, Session, Sleeper, TokioSleeper};
pub use sources::{SourceStep, StatusDot, StepState, SOURCE_STEPS};
pub use surface::{Dashboard, Ring, Surface};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the stderr log subscriber shared by the binaries.
///
/// `RUST_LOG` wins; otherwise `civic_trust=info`.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::new("civic_trust=info"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))
}
