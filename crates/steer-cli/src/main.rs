mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{
    agents::AgentsSubcommand, config::ConfigSubcommand, resolve::SignalArgs,
    rules::RulesSubcommand,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "steer",
    about = "Resolve the coding rules and agent persona that apply to a task",
    version,
    propagate_version = true
)]
struct Cli {
    /// Workspace root holding steer.yaml, rules/ and agents/ (default: auto-detect)
    #[arg(long, global = true, env = "STEER_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold steer.yaml, rules/ and agents/ in the workspace
    Init,

    /// Show the rules and agent selected for a task
    Resolve {
        #[command(flatten)]
        signal: SignalArgs,
    },

    /// Print the assembled instruction payload for a task
    Prompt {
        #[command(flatten)]
        signal: SignalArgs,
    },

    /// Inspect the rule repository
    Rules {
        #[command(subcommand)]
        subcommand: RulesSubcommand,
    },

    /// Inspect the agent registry
    Agents {
        #[command(subcommand)]
        subcommand: AgentsSubcommand,
    },

    /// Detect the project language from manifest files
    Detect {
        /// Project directory (default: workspace root)
        #[arg(long)]
        project: Option<PathBuf>,
    },

    /// Show or validate steer.yaml
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
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

    let result = match cli.command {
        Commands::Init => cmd::init::run(&root),
        Commands::Resolve { signal } => cmd::resolve::run(&root, &signal, cli.json),
        Commands::Prompt { signal } => cmd::resolve::prompt(&root, &signal, cli.json),
        Commands::Rules { subcommand } => cmd::rules::run(&root, subcommand, cli.json),
        Commands::Agents { subcommand } => cmd::agents::run(&root, subcommand, cli.json),
        Commands::Detect { project } => cmd::detect::run(&root, project.as_deref(), cli.json),
        Commands::Config { subcommand } => cmd::config::run(&root, subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
