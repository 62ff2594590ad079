use std::path::Path;

use anyhow::Result;
use clap::{Parser, Subcommand};
use parkctl_core::ParkctlConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show config file path
    Path,
    /// Print the effective config (file + environment overrides) as TOML
    Show,
    /// Write a config file with the default values
    Init(InitArgs),
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(path: Option<&Path>, args: ConfigArgs) -> Result<()> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(ParkctlConfig::config_path);

    match args.command {
        ConfigCommands::Path => run_path(&path),
        ConfigCommands::Show => run_show(&path),
        ConfigCommands::Init(args) => run_init(&path, args),
    }
}

fn run_path(path: &Path) -> Result<()> {
    println!("{}", path.display());
    Ok(())
}

fn run_show(path: &Path) -> Result<()> {
    let mut config = ParkctlConfig::load_from(path)?;
    config.apply_env_overrides()?;

    print!("{}", config.to_toml()?);
    Ok(())
}

fn run_init(path: &Path, args: InitArgs) -> Result<()> {
    if path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            path
        ));
    }

    ParkctlConfig::default().save_to(path)?;

    println!("✅ Created config at: {:?}", path);
    println!("\nNext steps:");
    println!("  1. Edit the config: $EDITOR {:?}", path);
    println!("  2. Set parking.capacity and the fee schedule");
    println!("  3. Run: parkctl config show");

    Ok(())
}
