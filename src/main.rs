//! Taskdeck command-line entry point.

use camino::Utf8Path;
use clap::Parser;
use eyre::WrapErr;
use mockable::DefaultClock;
use tracing::info;

use taskdeck::{
    command::{
        adapters::{ConsoleInput, ConsoleOutput},
        services::CommandDispatcher,
    },
    config::AppConfig,
    task::{
        adapters::{json::JsonFileTaskStorage, memory::InMemoryTaskStorage},
        ports::TaskStorage,
        services::TaskRepository,
    },
    telemetry::{init_tracing, log_filter_from_verbosity},
};

/// Personal task tracker
#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(author, version, about = "Personal task tracker with free-text dates", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, env = "TASKDECK_CONFIG")]
    config: Option<String>,

    /// Task file, overriding the configured one
    #[arg(short, long)]
    data_file: Option<String>,

    /// Keep tasks in memory only
    #[arg(long, conflicts_with = "data_file")]
    ephemeral: bool,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    let mut config = AppConfig::load(cli.config.as_deref()).wrap_err("loading configuration")?;
    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
        config.validate()?;
    }

    init_tracing(log_filter_from_verbosity(cli.verbose, &config.log_level))?;

    if cli.ephemeral {
        info!("using in-memory task storage");
        run_session(InMemoryTaskStorage::new(), &config)
    } else {
        let storage = JsonFileTaskStorage::open(Utf8Path::new(&config.data_file))
            .wrap_err_with(|| format!("opening task file {}", config.data_file))?;
        info!(path = %storage.path(), "using JSON task storage");
        run_session(storage, &config)
    }
}

fn run_session<S: TaskStorage>(storage: S, config: &AppConfig) -> eyre::Result<()> {
    let repository = TaskRepository::load(storage);
    let mut dispatcher = CommandDispatcher::new(repository, DefaultClock, config.history_limit);
    dispatcher
        .run(&mut ConsoleInput::stdin(), &mut ConsoleOutput::stdout())
        .wrap_err("console session failed")
}
