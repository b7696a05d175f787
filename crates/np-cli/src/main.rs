//! CLI frontend for the Nightpool dice-pool engine.

mod commands;

use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use commands::StatArgs;
use commands::roll::RollArgs;

#[derive(Parser)]
#[command(
    name = "np",
    about = "Nightpool — d10 dice pools for storytelling games",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a dice pool from an expression such as "Strength + Brawl - 1"
    Roll(RollArgs),

    /// Show how an expression parses, without rolling
    Parse {
        /// Roll expression
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },

    /// Start an interactive roll session
    Play {
        #[command(flatten)]
        stats: StatArgs,

        /// Name shown for your rolls
        #[arg(short, long, default_value = "Player")]
        actor: String,

        /// RNG seed for reproducible rolls
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("NP_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Roll(args) => commands::roll::run(&args),
        Commands::Parse { expression } => commands::parse::run(&expression),
        Commands::Play {
            stats,
            actor,
            seed,
        } => commands::play::run(&stats, &actor, seed),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
