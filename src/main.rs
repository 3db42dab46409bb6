// OilLog - main.rs
//
// Command-line entry point. Handles:
// 1. CLI argument parsing
// 2. Config loading and logging initialisation (debug mode support)
// 3. Maintenance log selection (argument > last session > config default)
// 4. Dispatch to show / estimate / add / export

use clap::{Parser, Subcommand, ValueEnum};
use oillog::app::session::{self, SessionData};
use oillog::app::state::{AppState, EntryInput};
use oillog::core::export;
use oillog::platform::config::{self, AppConfig, PlatformPaths};
use oillog::ui::report;
use oillog::util;
use oillog::util::error::{ExportError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

/// OilLog - oil change history and mileage estimate from a maintenance log.
///
/// Reads a plain-text vehicle maintenance log, lists every oil and filter
/// change with its date, oil and filter type, and extrapolates the current
/// odometer reading.
#[derive(Parser, Debug)]
#[command(name = "oillog", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Alternative config.toml location.
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (equivalent to RUST_LOG=debug).
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the vehicle, all oil changes and the mileage estimate (default).
    Show {
        /// Maintenance log file.
        file: Option<PathBuf>,
    },

    /// Print only the estimated current mileage.
    Estimate {
        /// Maintenance log file.
        file: Option<PathBuf>,
    },

    /// Append a new oil change entry to the log.
    Add {
        /// Maintenance log file.
        file: Option<PathBuf>,

        /// Odometer reading; defaults to the current estimate.
        #[arg(short = 'm', long = "mileage")]
        mileage: Option<String>,

        /// Oil type, e.g. 5W-20; defaults to the last one used.
        #[arg(short = 'o', long = "oil")]
        oil: Option<String>,

        /// Filter type, e.g. XG9688; defaults to the last one used.
        #[arg(short = 'f', long = "filter")]
        filter: Option<String>,
    },

    /// Export the oil change records.
    Export {
        /// Maintenance log file.
        file: Option<PathBuf>,

        /// Output format.
        #[arg(long = "format", value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Output file (stdout if omitted).
        #[arg(long = "output")]
        output: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ExportFormat {
    Csv,
    Json,
}

impl Command {
    fn file(&self) -> Option<&Path> {
        match self {
            Command::Show { file }
            | Command::Estimate { file }
            | Command::Add { file, .. }
            | Command::Export { file, .. } => file.as_deref(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let platform_paths = PlatformPaths::resolve();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| platform_paths.config_file());
    let (app_config, config_warnings) = config::load_config(&config_path);

    util::logging::init(cli.debug, app_config.log_level.as_deref());

    tracing::info!(
        version = util::constants::APP_VERSION,
        debug = cli.debug,
        config = %config_path.display(),
        "OilLog starting"
    );
    for warning in &config_warnings {
        tracing::warn!("{}", warning);
    }

    let command = cli.command.unwrap_or(Command::Show { file: None });
    let session_file = session::session_path(&platform_paths.data_dir);

    let Some(path) = session::select_log_file(
        command.file(),
        &session_file,
        app_config.default_log_file.as_deref(),
    ) else {
        eprintln!(
            "Error: no maintenance log file selected. Pass a FILE or set [log] default_file in {}",
            config_path.display()
        );
        std::process::exit(2);
    };

    if let Err(e) = run(command, &path, &session_file, &app_config) {
        tracing::debug!(error = ?e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(command: Command, path: &Path, session_file: &Path, config: &AppConfig) -> Result<()> {
    let mut state = AppState::default();
    state.open(path)?;
    remember(path, session_file);

    let stdout = std::io::stdout();
    match command {
        Command::Show { .. } => {
            print_or_log(report::render_report(
                &state.log,
                state.estimate,
                &config.unknown_label,
                stdout.lock(),
            ));
        }
        Command::Estimate { .. } => {
            print_or_log(report::render_estimate(
                state.estimate,
                &config.unknown_label,
                stdout.lock(),
            ));
        }
        Command::Add {
            mileage,
            oil,
            filter,
            ..
        } => {
            let entry = state.add_entry(&EntryInput {
                mileage,
                oil_type: oil,
                filter_type: filter,
            })?;
            let mut out = stdout.lock();
            print_or_log(report::render_added(
                &entry,
                &state.log.summary(),
                &config.unknown_label,
                &mut out,
            ));
            print_or_log(report::render_report(
                &state.log,
                state.estimate,
                &config.unknown_label,
                out,
            ));
        }
        Command::Export { format, output, .. } => {
            let count = match output {
                Some(ref out_path) => {
                    let file = std::fs::File::create(out_path).map_err(|e| ExportError::Io {
                        path: out_path.clone(),
                        source: e,
                    })?;
                    export_records(&state, format, std::io::BufWriter::new(file), out_path)?
                }
                None => export_records(&state, format, stdout.lock(), Path::new("<stdout>"))?,
            };
            tracing::info!(count, format = ?format, "Records exported");
        }
    }
    Ok(())
}

fn export_records<W: Write>(
    state: &AppState,
    format: ExportFormat,
    writer: W,
    target: &Path,
) -> std::result::Result<usize, ExportError> {
    match format {
        ExportFormat::Csv => export::export_csv(&state.log.records, writer, target),
        ExportFormat::Json => export::export_json(&state.log.records, writer, target),
    }
}

/// Record `path` as the last selected file. Failures are logged only.
fn remember(path: &Path, session_file: &Path) {
    let absolute = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    if let Err(e) = session::save(&SessionData::new(Some(absolute)), session_file) {
        tracing::warn!(error = %e, "Could not save session");
    }
}

/// Stdout write failures (e.g. a closed pipe) are not worth an error exit.
fn print_or_log(result: std::io::Result<()>) {
    if let Err(e) = result {
        tracing::debug!(error = %e, "Failed to write to stdout");
    }
}
