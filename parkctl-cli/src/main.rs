//! parkctl CLI - parking facility tracker
//!
//! Entry point for the `parkctl` command-line tool, which provides:
//! - The HTTP API server (`serve`)
//! - Direct store operations (`entry`, `exit`, `list`, `lookup`, `info`)
//! - A scripted walkthrough of the entry/exit rules (`demo`)
//! - Configuration management (`config`)

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use parkctl_core::ParkctlConfig;

mod commands;
mod config;
mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "parkctl",
    author,
    version,
    about = "Track vehicles entering and leaving a parking facility",
    long_about = "Register entries and exits against a fixed-capacity facility, charge \
                  stay fees, and serve the same operations over a JSON HTTP API."
)]
struct Cli {
    /// Config file path (default: ~/.parkctl/config.toml)
    #[arg(long, global = true, env = "PARKCTL_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Register a vehicle entering the facility
    Entry(commands::vehicles::EntryArgs),
    /// Register a vehicle leaving and print the fee due
    Exit(commands::vehicles::ExitArgs),
    /// List vehicle records
    List(commands::vehicles::ListArgs),
    /// Look up a vehicle by plate
    Lookup(commands::vehicles::LookupArgs),
    /// Show capacity and occupancy
    Info(commands::vehicles::InfoArgs),
    /// Run a scripted walkthrough of entries, exits and rejections
    Demo(commands::demo::DemoArgs),
    /// Manage parkctl configuration (path, show, init)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// Load `.env` files: current directory first, then ~/.parkctl/.env.
/// Neither overwrites variables that are already set.
fn load_env_files() {
    dotenvy::dotenv().ok();
    dotenvy::from_path(parkctl_core::config::config_dir().join(".env")).ok();
}

/// Config file (explicit or default path) with environment overrides applied.
fn load_config(path: Option<&PathBuf>) -> Result<ParkctlConfig> {
    let path = path
        .cloned()
        .unwrap_or_else(ParkctlConfig::config_path);
    let mut config = ParkctlConfig::load_from(&path)?;
    config.apply_env_overrides()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    load_env_files();
    let cli = Cli::parse();

    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug }).ok();

    let settings = || load_config(cli.config.as_ref());

    match cli.command {
        Commands::Serve(args) => commands::run_serve(settings()?, args).await?,
        Commands::Entry(args) => commands::run_entry(settings()?, args).await?,
        Commands::Exit(args) => commands::run_exit(settings()?, args).await?,
        Commands::List(args) => commands::run_list(settings()?, args).await?,
        Commands::Lookup(args) => commands::run_lookup(settings()?, args).await?,
        Commands::Info(args) => commands::run_info(settings()?, args).await?,
        Commands::Demo(args) => commands::run_demo(settings()?, args).await?,
        Commands::Config(args) => config::run_config(cli.config.as_deref(), args)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
