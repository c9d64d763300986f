// SPDX-License-Identifier: Apache-2.0

#![forbid(unsafe_code)]

mod command_output_adapters;
mod workout_command_actions;

use clap::{error::ErrorKind, ArgAction, Parser, Subcommand};
use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode as ProcessExitCode;
use workout_finder_core::{ExitCode, MachineError, ENV_CALENDAR_ZONE, ENV_DATA_DIR};
use workout_finder_model::{CalendarZone, DEFAULT_SHARD_FILE_PREFIX};

pub const CRATE_NAME: &str = "workout-finder-cli";

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
Usage: {usage}

Options:
{options}

Commands:
{subcommands}
{after-help}";

#[derive(Parser)]
#[command(name = "workout-finder")]
#[command(about = "Browse a sharded workout catalog from the command line")]
#[command(version)]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_help = "Environment:\n  WORKOUT_FINDER_DATA_DIR        Dataset directory\n  WORKOUT_FINDER_CALENDAR_ZONE   Zone used for month filters\n  RUST_LOG                       Log filter override"
)]
struct Cli {
    #[arg(long, global = true, env = ENV_DATA_DIR, default_value = "data")]
    data_dir: PathBuf,
    #[arg(long, global = true, default_value_t = 20)]
    page_size: usize,
    #[arg(long, global = true, default_value_t = 50)]
    total_shards: usize,
    #[arg(long, global = true, default_value = DEFAULT_SHARD_FILE_PREFIX)]
    shard_file_prefix: String,
    #[arg(
        long,
        global = true,
        env = ENV_CALENDAR_ZONE,
        default_value = "local",
        value_parser = parse_calendar_zone
    )]
    calendar_zone: CalendarZone,
    #[arg(long, global = true, default_value = ".workout-finder")]
    state_dir: PathBuf,
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[arg(long, global = true, default_value_t = false)]
    quiet: bool,
    #[arg(long, global = true, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print one unfiltered page.
    Page {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        page: u64,
    },
    /// Look up a single workout by id.
    Get { id: String },
    /// Print a filtered page and remember the filter state.
    Filter {
        #[arg(long)]
        start_date: Option<String>,
        #[arg(long = "category")]
        categories: Vec<String>,
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
        page: u64,
    },
    /// Re-run the remembered filter state.
    Resume,
    /// Drop the remembered filter state.
    Forget,
    /// Strictly read every shard and report problems.
    Verify,
    /// Emit the OpenAPI document.
    Openapi {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn parse_calendar_zone(raw: &str) -> Result<CalendarZone, String> {
    CalendarZone::parse(raw).map_err(|e| e.to_string())
}

#[derive(Clone, Copy)]
pub(crate) struct OutputMode {
    pub(crate) json: bool,
}

/// Dataset and state locations shared by every subcommand.
pub(crate) struct CatalogArgs {
    pub(crate) data_dir: PathBuf,
    pub(crate) page_size: usize,
    pub(crate) total_shards: usize,
    pub(crate) shard_file_prefix: String,
    pub(crate) calendar_zone: CalendarZone,
    pub(crate) state_dir: PathBuf,
}

/// A failed command: what to print and how to exit.
#[derive(Debug)]
pub struct CliError {
    pub exit_code: ExitCode,
    pub machine: MachineError,
}

impl CliError {
    pub(crate) fn from_machine(machine: MachineError) -> Self {
        Self {
            exit_code: machine.exit_code(),
            machine,
        }
    }

    pub(crate) fn usage(message: &str) -> Self {
        Self {
            exit_code: ExitCode::Usage,
            machine: MachineError::new("usage", message),
        }
    }

    pub(crate) fn invalid_input(message: &str) -> Self {
        Self::from_machine(MachineError::new("invalid_input", message))
    }

    pub(crate) fn internal(message: String) -> Self {
        Self::from_machine(MachineError::new("internal_error", &message))
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.machine)
    }
}

impl std::error::Error for CliError {}

pub fn main_entry() -> ProcessExitCode {
    let wants_json = std::env::args().any(|arg| arg == "--json");
    let mut stdout = std::io::stdout().lock();
    match run_from(std::env::args_os(), &mut stdout) {
        Ok(()) => ProcessExitCode::from(ExitCode::Success.as_u8()),
        Err(err) => {
            emit_error(&err, wants_json);
            ProcessExitCode::from(err.exit_code.as_u8())
        }
    }
}

/// Parses `args` (program name first) and runs the command, writing its
/// output to `out`.
pub fn run_from<I, T>(args: I, out: &mut dyn Write) -> Result<(), CliError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                write!(out, "{err}").map_err(|e| CliError::internal(e.to_string()))?;
                return Ok(());
            }
            _ => {
                let mut usage = CliError::usage("invalid command line arguments");
                usage.machine = usage.machine.with_detail("error", &err.to_string());
                return Err(usage);
            }
        },
    };
    init_logging(cli.quiet, cli.verbose);

    let output_mode = OutputMode { json: cli.json };
    let catalog = CatalogArgs {
        data_dir: cli.data_dir,
        page_size: cli.page_size,
        total_shards: cli.total_shards,
        shard_file_prefix: cli.shard_file_prefix,
        calendar_zone: cli.calendar_zone,
        state_dir: cli.state_dir,
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::internal(format!("failed to start runtime: {e}")))?;
    runtime.block_on(dispatch(cli.command, &catalog, output_mode, out))
}

async fn dispatch(
    command: Commands,
    catalog: &CatalogArgs,
    output_mode: OutputMode,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    use workout_command_actions as actions;
    match command {
        Commands::Page { page } => actions::run_page(catalog, to_page(page)?, output_mode, out).await,
        Commands::Get { id } => actions::run_get(catalog, &id, output_mode, out).await,
        Commands::Filter {
            start_date,
            categories,
            page,
        } => {
            actions::run_filter(
                catalog,
                start_date.unwrap_or_default(),
                categories,
                to_page(page)?,
                output_mode,
                out,
            )
            .await
        }
        Commands::Resume => actions::run_resume(catalog, output_mode, out).await,
        Commands::Forget => actions::run_forget(catalog, output_mode, out),
        Commands::Verify => actions::run_verify(catalog, output_mode, out).await,
        Commands::Openapi { out: target } => actions::run_openapi(target, output_mode, out),
    }
}

fn to_page(page: u64) -> Result<usize, CliError> {
    usize::try_from(page).map_err(|_| CliError::invalid_input("page does not fit in usize"))
}

fn init_logging(quiet: bool, verbose: u8) {
    let default_level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn emit_error(error: &CliError, machine_json: bool) {
    if machine_json {
        match serde_json::to_string(&error.machine) {
            Ok(payload) => eprintln!("{payload}"),
            Err(_) => eprintln!(
                "{{\"code\":\"internal_error\",\"message\":\"failed to encode structured error\",\"details\":{{}}}}"
            ),
        }
    } else {
        eprintln!("{}", error.machine.message);
    }
}
