//! Energy Economy Simulation
//!
//! Runs the round loop against real agent CLIs, or against canned responses
//! with `--dry-run`. A saved world in the data directory is resumed unless
//! `--fresh` is given.

use clap::{Parser, ValueEnum};
use econ_events::Invoker;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use econ_core::config::{ConfigError, DEFAULT_CONFIG_PATH};
use econ_core::memory::NoteStore;
use econ_core::persist::{FilePersistence, Persistence};
use econ_core::{
    logging, setup, AgentInvoker, CliInvoker, DryRunInvoker, RoundOrchestrator, Simulation, SimulationConfig,
};

/// Command line arguments for the simulation
#[derive(Parser, Debug)]
#[command(name = "econ_sim")]
#[command(about = "Multi-agent energy economy simulation")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Number of agents in a new world
    #[arg(long)]
    agents: Option<usize>,

    /// Starting energy for new and respawned agents
    #[arg(long)]
    energy: Option<u64>,

    /// Maximum invocations in flight at once
    #[arg(long)]
    concurrency: Option<usize>,

    /// Per-invocation timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Use one invoker for every agent
    #[arg(long, value_enum)]
    invoker: Option<InvokerArg>,

    /// Use canned responses instead of spawning agent processes
    #[arg(long)]
    dry_run: bool,

    /// Stop after this many rounds
    #[arg(long)]
    max_rounds: Option<u64>,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for world.json, the shared workspace and agent directories
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Ignore any saved world and start over
    #[arg(long)]
    fresh: bool,
}

/// Invoker names accepted on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum InvokerArg {
    Claude,
    Codex,
}

impl From<InvokerArg> for Invoker {
    fn from(arg: InvokerArg) -> Self {
        match arg {
            InvokerArg::Claude => Invoker::Claude,
            InvokerArg::Codex => Invoker::Codex,
        }
    }
}

impl Args {
    /// Apply command line overrides on top of the file configuration
    fn apply(&self, config: &mut SimulationConfig) -> Result<(), ConfigError> {
        if let Some(n) = self.agents {
            config.initial_agent_count = n;
        }
        if let Some(e) = self.energy {
            config.initial_energy = e;
        }
        if let Some(c) = self.concurrency {
            config.concurrency = c;
        }
        if let Some(t) = self.timeout {
            config.round_timeout_secs = t;
        }
        if let Some(invoker) = self.invoker {
            config.invoker = Some(invoker.into());
        }
        if self.dry_run {
            config.dry_run = true;
        }
        if self.max_rounds.is_some() {
            config.max_rounds = self.max_rounds;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(dir) = &self.data_dir {
            config.shared_dir = dir.join("shared");
            config.agents_dir = dir.join("agents");
            config.data_dir = dir.clone();
        }
        config.validate()
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init() {
        eprintln!("Warning: {}", e);
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Simulation failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> econ_core::Result<()> {
    let mut config = SimulationConfig::load_or_default(&args.config)?;
    args.apply(&mut config)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(
        seed,
        agents = config.initial_agent_count,
        energy = config.initial_energy,
        concurrency = config.concurrency,
        timeout_secs = config.round_timeout_secs,
        dry_run = config.dry_run,
        "Energy economy starting"
    );

    let persist = if args.fresh {
        FilePersistence::fresh(config.world_path(), &config.logs_dir)?
    } else {
        FilePersistence::open(config.world_path(), &config.logs_dir)?
    };

    let world = match persist.load_world()? {
        Some(world) => {
            if world.agents.len() != config.initial_agent_count {
                tracing::warn!(
                    saved = world.agents.len(),
                    configured = config.initial_agent_count,
                    "Saved roster size differs from configuration; keeping the saved roster"
                );
            }
            fs::create_dir_all(&config.shared_dir)?;
            NoteStore::new(&config.agents_dir).ensure_dirs(&world.agents)?;
            tracing::info!(round = world.round, alive = world.alive_count(), "Resuming saved world");
            world
        }
        None => setup::create_world(&config)?,
    };

    let invoker: Arc<dyn AgentInvoker> = if config.dry_run {
        Arc::new(DryRunInvoker::new(seed))
    } else {
        Arc::new(CliInvoker::new(&config))
    };

    let max_rounds = config.max_rounds;
    let orchestrator = RoundOrchestrator::new(config, seed, invoker, Box::new(persist));
    let mut simulation = Simulation::new(world, orchestrator);
    simulation.run(max_rounds).await?;
    Ok(())
}
