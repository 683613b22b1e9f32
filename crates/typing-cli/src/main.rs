mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use typing_core::checker::{CheckerSettings, DEFAULT_COMMAND, DEFAULT_TIMEOUT_SECS};
use typing_core::level::Level;

#[derive(Parser)]
#[command(
    name = "typing",
    about = "Adopt pyright incrementally: scaffold the setup, then rank what to fix first",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: current directory)
    #[arg(long, global = true, env = "TYPING_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    /// Type checker command; `--outputjson` is appended
    #[arg(long, global = true, env = "TYPING_CHECKER", default_value = DEFAULT_COMMAND)]
    checker: String,

    /// Seconds to wait for the type checker before giving up
    #[arg(long, global = true, env = "TYPING_CHECKER_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set up pyright, typing rules, a findings log, and a pre-commit hook
    Init {
        /// Type checking strictness: strict, standard or basic
        #[arg(long, default_value = "strict")]
        level: Level,

        /// Also set up long-task-harness and the ralph-wiggum plugin
        #[arg(long)]
        full: bool,

        /// Skip typing discipline rules
        #[arg(long)]
        no_rules: bool,

        /// Skip the pre-commit hook
        #[arg(long)]
        no_hook: bool,

        /// Skip ralph-wiggum installation (with --full)
        #[arg(long)]
        no_ralph: bool,

        /// Skip long-task-harness initialization (with --full)
        #[arg(long)]
        no_harness: bool,

        /// Read rule documents from this directory instead of the built-in copies
        #[arg(long, env = "TYPING_ASSETS_DIR")]
        assets: Option<PathBuf>,
    },

    /// Run pyright and break its errors down by rule and by file
    Analyze {
        /// Read a saved `pyright --outputjson` report instead of running the checker (`-` for stdin)
        #[arg(long)]
        report: Option<PathBuf>,

        /// Pyright config to check with (passed as `-p`)
        #[arg(long, short = 'p')]
        project: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = CheckerSettings::from_command(&cli.checker)
        .map(|s| s.with_timeout(Duration::from_secs(cli.timeout)))
        .map_err(anyhow::Error::from)
        .and_then(|settings| match cli.command {
            Commands::Init {
                level,
                full,
                no_rules,
                no_hook,
                no_ralph,
                no_harness,
                assets,
            } => cmd::init::run(
                &root,
                cmd::init::InitOptions {
                    level,
                    rules: !no_rules,
                    hook: !no_hook,
                    harness: full && !no_harness,
                    ralph: full && !no_ralph,
                    assets,
                },
                settings,
                cli.json,
            ),
            Commands::Analyze { report, project } => cmd::analyze::run(
                &root,
                report,
                settings.with_project(project),
                cli.json,
            ),
        });

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
