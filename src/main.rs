//! MetaFinder: file metadata inventory tool.
//!
//! Thin binary entry point. All logic lives in the `metafinder-core`
//! and `metafinder-gui` crates.

use clap::{Args, Parser, Subcommand, ValueEnum};
use metafinder_core::config::{RunConfig, Schema};
use metafinder_core::orchestrator::{self, FixedSelector, RunOutcome, NO_SELECTION_NOTICE};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "metafinder",
    version,
    about = "Collect per-file metadata under a folder into a CSV report"
)]
struct Cli {
    /// Log every skipped file and owner lookup miss.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scan a folder and write file_metadata_<stamp>.csv inside it.
    Scan(ScanArgs),
    /// Open the desktop window (the default).
    Gui,
}

#[derive(Debug, Args)]
struct ScanArgs {
    /// Top-level folder to search. Omitting it aborts the run.
    path: Option<String>,

    /// Report column set.
    #[arg(long, value_enum)]
    schema: Option<SchemaArg>,

    /// Leave the File Owner column empty.
    #[arg(long)]
    no_owner: bool,

    /// JSON config file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SchemaArg {
    Base,
    Extended,
}

impl From<SchemaArg> for Schema {
    fn from(arg: SchemaArg) -> Self {
        match arg {
            SchemaArg::Base => Schema::Base,
            SchemaArg::Extended => Schema::Extended,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialise structured logging.
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let result = match cli.command {
        Some(Command::Scan(args)) => run_scan(args),
        Some(Command::Gui) | None => run_gui(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run_scan(args: ScanArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    if let Some(schema) = args.schema {
        config.schema = schema.into();
    }
    if args.no_owner {
        config.resolve_owner = false;
    }

    let mut selector = FixedSelector(args.path);
    match orchestrator::run(&mut selector, &config, None)? {
        RunOutcome::Aborted => {
            eprintln!("Error: {NO_SELECTION_NOTICE}");
        }
        RunOutcome::Completed {
            report_path,
            rows_written,
            stats,
            ..
        } => {
            println!(
                "{} files written to {} ({} skipped, {} unreadable)",
                rows_written,
                report_path.display(),
                stats.skipped,
                stats.failures.len() + stats.directory_failures.len()
            );
        }
    }
    Ok(())
}

fn run_gui() -> anyhow::Result<()> {
    tracing::info!("MetaFinder starting");

    let state = metafinder_gui::AppState::default();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("File Metadata Finder Tool")
            .with_inner_size([420.0, 240.0])
            .with_min_inner_size([400.0, 200.0]),
        ..Default::default()
    };

    eframe::run_native(
        "MetaFinder",
        options,
        Box::new(|cc| {
            Ok(Box::new(metafinder_gui::MetaFinderApp::with_state(
                cc, state,
            )))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}
