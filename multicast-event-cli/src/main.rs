//! Multicast Event CLI Application
//!
//! Command-line scenario runner for the multicast-event library.
//! It drives one dispatcher from a TOML script and adds:
//! - Named plain targets and enemy methods to attach/detach
//! - Built-in scenarios (number printer, enemies sharing an explosion)
//! - Text and JSON reports of what ran

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod builtin;
mod config;
mod report;
mod scenario;
mod targets;

use builtin::Builtin;

/// Multicast Event - Replay dispatcher scenarios
#[derive(Parser, Debug)]
#[command(name = "multicast-event-cli")]
#[command(about = "Run attach/detach/invoke scenarios against a multicast event", long_about = None)]
#[command(version)]
struct Args {
    /// Path to a scenario file (scenario.toml)
    #[arg(short, long, value_name = "FILE", conflicts_with = "builtin")]
    scenario: Option<PathBuf>,

    /// Run one of the built-in scenarios
    #[arg(short, long, value_enum)]
    builtin: Option<Builtin>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Multicast Event CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using multicast-event library v{}", multicast_event::VERSION);

    let scenario = if let Some(path) = &args.scenario {
        log::info!("Loading scenario from: {:?}", path);
        config::load_scenario(path)?
    } else if let Some(builtin) = args.builtin {
        log::info!("Using built-in scenario: {:?}", builtin);
        builtin.scenario()?
    } else {
        // No arguments - show help
        println!("Multicast Event - No scenario specified");
        println!("\nQuick Start:");
        println!("  multicast-event-cli --builtin print-num");
        println!("  multicast-event-cli --builtin enemies --json");
        println!("  multicast-event-cli --scenario scenario.toml");
        println!("\nUse --help for more options");
        return Ok(());
    };

    let report = scenario::run_scenario(&scenario)?;

    if args.json {
        println!("{}", report::render_json(&report)?);
    } else if !args.quiet {
        print!("{}", report::render_text(&report));
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
