use clap::{Parser, Subcommand};
use keymorph::config::Config;
use keymorph::manager::Manager;
use std::path::PathBuf;
use std::process;
use tracing::{error, info};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML partition declaration. The built-in partition is used when absent.
    #[arg(global = true, short, long)]
    config: Option<PathBuf>,

    #[arg(global = true, short = 'S', long)]
    seed: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Create(cmd::create::CreateArgs),
    Mutate(cmd::mutate::MutateArgs),
    Check(cmd::check::CheckArgs),
}

fn main() {
    // Logs go to stderr so that stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from_file(path).unwrap_or_else(|e| {
            error!("{}", e);
            process::exit(1);
        }),
        None => {
            info!("No configuration given. Using the built-in partition.");
            Config::builtin()
        }
    };

    let seed = cli.seed.unwrap_or_else(|| fastrand::u64(..));
    info!("Seed: {}", seed);
    let manager = Manager::new(config, seed);

    let result = match cli.command {
        Commands::Create(args) => cmd::create::run(args, &manager, seed),
        Commands::Mutate(args) => cmd::mutate::run(args, manager),
        Commands::Check(args) => cmd::check::run(args, &manager),
    };

    if let Err(e) = result {
        error!("{}", e);
        process::exit(1);
    }
}
