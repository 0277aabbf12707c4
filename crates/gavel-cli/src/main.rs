#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use output::{CliError, OutputMode, render_error};
use std::env;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "gavel: append-only governance ledger",
    long_about = None
)]
struct Cli {
    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Initialize the governance ledger",
        after_help = "EXAMPLES:\n    # Initialize in the current repository\n    gv init\n\n    # Record that governance was adopted on an existing codebase\n    gv init --mode brownfield"
    )]
    Init(cmd::init::InitArgs),

    #[command(
        about = "Record an artifact creation event",
        after_help = "EXAMPLES:\n    gv record prd PRD-1\n    gv record obpi OBPI-1 --parent PRD-1\n    gv record adr ADR-0.1.0 --parent OBPI-1 --lane full"
    )]
    Record {
        #[command(subcommand)]
        artifact: cmd::record::RecordArtifact,
    },

    #[command(
        about = "Record an attestation for an artifact",
        after_help = "EXAMPLES:\n    gv attest ADR-0.1.0 --status completed --by reviewer\n    gv attest ADR-0.1.0 --status completed --by reviewer --reason \"all gates green\""
    )]
    Attest(cmd::attest::AttestArgs),

    #[command(
        about = "Record a gate check result for a decision record",
        after_help = "EXAMPLES:\n    gv gate ADR-0.1.0 --gate 2 --status pass --command \"make test\" --returncode 0"
    )]
    Gate(cmd::gate::GateArgs),

    #[command(
        about = "Record an artifact rename",
        after_help = "EXAMPLES:\n    gv rename ADR-draft ADR-0.1.0 --reason \"version assigned\""
    )]
    Rename(cmd::rename::RenameArgs),

    #[command(
        about = "Record an edit to a tracked artifact file",
        long_about = "Record an edit to a tracked artifact file. Intended to be wired \
                      into editor or agent hooks; untracked paths and uninitialized \
                      repositories are silently ignored so the hook never breaks a save.",
        after_help = "EXAMPLES:\n    gv edit-hook docs/adr/ADR-0.1.0.md --session s-42"
    )]
    EditHook(cmd::edit_hook::EditHookArgs),

    #[command(
        about = "List recorded events",
        after_help = "EXAMPLES:\n    gv log\n    gv log --kind gate_checked --id ADR-0.1.0\n    gv log -n 10 --json"
    )]
    Log(cmd::log::LogArgs),

    #[command(
        about = "Show latest gate statuses for a decision record",
        after_help = "EXAMPLES:\n    gv gates ADR-0.1.0"
    )]
    Gates(cmd::gates::GatesArgs),

    #[command(
        about = "Show the derived artifact graph",
        after_help = "EXAMPLES:\n    gv status\n    gv status --json"
    )]
    Status(cmd::status::StatusArgs),

    #[command(
        about = "List decision records awaiting attestation",
        long_about = "List decision records awaiting attestation. Exits nonzero when \
                      any are pending, so CI can gate on it.",
        after_help = "EXAMPLES:\n    gv pending && echo \"all attested\""
    )]
    Pending(cmd::pending::PendingArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GAVEL_LOG")
        .unwrap_or_else(|_| EnvFilter::new("gavel=info,warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let project_root = env::current_dir()?;
    let output = cli.output_mode();

    match cli.command {
        Commands::Init(args) => cmd::init::run_init(&args, output, &project_root)?,
        Commands::Record { artifact } => cmd::record::run_record(&artifact, output, &project_root)?,
        Commands::Attest(args) => cmd::attest::run_attest(&args, output, &project_root)?,
        Commands::Gate(args) => cmd::gate::run_gate(&args, output, &project_root)?,
        Commands::Rename(args) => cmd::rename::run_rename(&args, output, &project_root)?,
        Commands::EditHook(args) => cmd::edit_hook::run_edit_hook(&args, output, &project_root)?,
        Commands::Log(args) => cmd::log::run_log(&args, output, &project_root)?,
        Commands::Gates(args) => cmd::gates::run_gates(&args, output, &project_root)?,
        Commands::Status(args) => cmd::status::run_status(&args, output, &project_root)?,
        Commands::Pending(args) => {
            let pending = cmd::pending::run_pending(&args, output, &project_root)?;
            if pending {
                return Ok(ExitCode::from(1));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let mode = cli.output_mode();
    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            render_error(mode, &CliError::from_anyhow(&err));
            ExitCode::from(2)
        }
    }
}
