//! CLI frontend for the Dodeka rules engine.

mod commands;

use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dk",
    about = "Dodeka — character math and d12 checks",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a share string from KEY=VALUE property assignments
    Encode {
        /// Assignments like Level=2 Body=1 Muscles=1
        #[arg(value_name = "KEY=VALUE", required = true)]
        set: Vec<String>,
    },

    /// Show the character sheet encoded in a share string
    Sheet {
        /// The base64 share string
        share: String,
    },

    /// Roll a check against a stat
    Roll {
        /// Stat backing the roll (e.g. Muscles)
        stat: String,

        /// Character share string (defaults to a blank sheet)
        #[arg(short = 'c', long)]
        share: Option<String>,

        /// Target difficulty; omit for a raw roll
        #[arg(long)]
        dc: Option<i32>,

        /// Resolve as a resisted check instead of an active one
        #[arg(long)]
        resisted: bool,

        /// Contested difficulty mode (resolved against another roll)
        #[arg(long)]
        contested: bool,

        /// Add an extra die, valid at or under this threshold
        #[arg(long, value_name = "THRESHOLD")]
        extra: Option<i32>,

        /// Add a luck die, valid at or under this threshold
        #[arg(long, value_name = "THRESHOLD")]
        luck: Option<i32>,

        /// RNG seed for reproducible rolls
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Print the /d12 command line instead of rolling
        #[arg(long)]
        command: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encode { set } => commands::encode::run(&set),
        Commands::Sheet { share } => commands::sheet::run(&share),
        Commands::Roll {
            stat,
            share,
            dc,
            resisted,
            contested,
            extra,
            luck,
            seed,
            command,
        } => {
            let options = commands::roll::Options {
                stat,
                share,
                dc,
                resisted,
                contested,
                extra,
                luck,
                seed,
                print_command: command,
            };
            commands::roll::run(&options).await
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
