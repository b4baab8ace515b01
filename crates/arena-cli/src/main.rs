//! Command-line driver for the arena combat engine.

mod commands;

use std::path::PathBuf;
use std::process;

use arena_combat::{BattleConfig, TieBreak};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(
    name = "arena",
    about = "Arena: a turn-based combat engine",
    version,
    propagate_version = true
)]
struct Cli {
    /// Log rolls, damage and scheduling to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ingest a combatant snapshot and show its derived stats
    Stats {
        /// Combatant snapshot (JSON)
        file: PathBuf,

        /// Ability lexicon used to resolve ability keys (JSON)
        #[arg(short, long)]
        lexicon: Option<PathBuf>,

        /// Print the ingested record as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Fight an encounter, reading one command per round from stdin
    Fight {
        /// Player snapshot (JSON)
        player: PathBuf,

        /// Enemy snapshot (JSON)
        enemy: PathBuf,

        /// Ability lexicon used to resolve ability keys (JSON)
        #[arg(short, long)]
        lexicon: Option<PathBuf>,

        /// RNG seed for a reproducible encounter
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Who acts first on equal speed: player or enemy
        #[arg(long, default_value = "player")]
        ties: String,

        /// Battlefield tag (cosmetic)
        #[arg(short, long, default_value = "plains")]
        battlefield: String,

        /// Flee automatically once this many rounds have been fought
        #[arg(long)]
        max_rounds: Option<u32>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "warn,arena=debug,arena_core=debug,arena_combat=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Stats {
            file,
            lexicon,
            json,
        } => commands::stats::run(&file, lexicon.as_deref(), json),
        Commands::Fight {
            player,
            enemy,
            lexicon,
            seed,
            ties,
            battlefield,
            max_rounds,
        } => ties.parse::<TieBreak>().and_then(|tie_break| {
            let config = BattleConfig::default()
                .with_seed(seed)
                .with_tie_break(tie_break)
                .with_battlefield(battlefield);
            commands::fight::run(&player, &enemy, lexicon.as_deref(), config, max_rounds)
        }),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
