// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{bail, Context, Result};
use std::env;

// Use library instead of local modules
use civic_trust::{init_logging, Dashboard, RunOutcome, Session, SimulationConfig};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() > 1 && args[1] == "run" {
        // Headless mode
        run_headless(&args[2..])?;
    } else {
        // UI mode (default)
        run_ui_mode()?;
    }

    Ok(())
}

struct HeadlessArgs {
    name: String,
    credit: String,
}

fn parse_headless_args(args: &[String]) -> Result<HeadlessArgs> {
    let mut parsed = HeadlessArgs {
        name: String::new(),
        credit: String::new(),
    };

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "--name" => {
                parsed.name = iter.next().context("--name needs a value")?.clone();
            }
            "--credit" => {
                parsed.credit = iter.next().context("--credit needs a value")?.clone();
            }
            other => bail!("Unknown argument: {}", other),
        }
    }

    Ok(parsed)
}

fn run_headless(args: &[String]) -> Result<()> {
    init_logging()?;
    let args = parse_headless_args(args)?;
    let config = SimulationConfig::from_env()?;

    println!("🏛️  Civic Trust Score - Headless Run");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    let session = Session::new(Dashboard::with_inputs(&args.name, &args.credit), config);

    let summary = match runtime.block_on(session.run_demo()) {
        RunOutcome::Completed(summary) => summary,
        // fresh session, nothing else can hold the flag
        RunOutcome::AlreadyRunning => bail!("A run is already in progress"),
    };

    let report = &summary.report;
    println!("\n👤 Citizen: {}", summary.citizen_name);
    for (field, value) in report.breakdown.entries() {
        println!("   {:<38} {:>3} / {}", field.label, value, field.max);
    }
    println!("\n✓ Civic score:    {}", report.civic);
    println!("✓ Credit score:   {}", report.credit_display);
    println!("✓ Combined score: {}", report.combined);
    println!("🏅 {} | {}", report.tier.label(), report.benefit.label());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");

    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    // Logs would corrupt the alternate screen unless explicitly requested
    if env::var("RUST_LOG").is_ok() {
        init_logging()?;
    }

    let config = SimulationConfig::from_env()?;
    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;

    println!("🖥️  Loading Civic Trust Score UI...\n");

    let mut app = ui::App::new(Session::new(Dashboard::new(), config), runtime.handle().clone());
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed successfully");

    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or run headless: civic-trust run --name NAME --credit SCORE");
    std::process::exit(1);
}
