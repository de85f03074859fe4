use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ideasjar_core::IdeasConfig;

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a starter config file
    Init(InitArgs),
    /// Show the effective configuration
    Show,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs, config: &IdeasConfig, endpoint: Option<&str>) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args),
        ConfigCommands::Show => run_show(config, endpoint),
        ConfigCommands::Path => run_path(),
    }
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = IdeasConfig::config_path();

    if config_path.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        ));
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {:?}", parent))?;
    }

    std::fs::write(&config_path, IdeasConfig::template())
        .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

    println!("✅ Created config at: {:?}", config_path);
    Ok(())
}

fn run_show(config: &IdeasConfig, endpoint: Option<&str>) -> Result<()> {
    println!("# file: {}", IdeasConfig::config_path().display());
    println!("# effective endpoint: {}", config.resolve_endpoint(endpoint));
    println!("{}", config.to_toml()?);
    Ok(())
}

fn run_path() -> Result<()> {
    println!("{}", IdeasConfig::config_path().display());
    Ok(())
}
