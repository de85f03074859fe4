//! ideasjar CLI - capture and manage ideas stored in an Ideas Jar API
//!
//! Every command loads what it needs from the server, applies one change,
//! and prints the result. Failures are logged to stderr and exit non-zero.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use ideasjar_core::IdeasConfig;

mod commands;
mod config;
mod tracing_setup;
mod ui;

use commands::ideas::{AddArgs, EditArgs, IdArgs, JsonArgs, ListArgs, SearchArgs, ShowArgs};
use commands::ApiContext;

#[derive(Parser, Debug)]
#[command(
    name = "ideasjar",
    author,
    version,
    about = "Capture, search and edit short ideas stored in an Ideas Jar API"
)]
struct Cli {
    /// API endpoint (default: https://ideas-jar.onrender.com)
    #[arg(long, env = "IDEASJAR_ENDPOINT", global = true)]
    endpoint: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long, global = true)]
    insecure: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Suppress spinners (for scripts)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List ideas, optionally filtered by text
    List(ListArgs),
    /// Show a single idea
    Show(ShowArgs),
    /// Search ideas on the server
    Search(SearchArgs),
    /// Add a new idea
    Add(AddArgs),
    /// Edit an existing idea
    Edit(EditArgs),
    /// Delete an idea
    #[command(alias = "delete")]
    Rm(IdArgs),
    /// Ask the server for an improved version of an idea
    Improve(IdArgs),
    /// Show idea statistics
    Stats(JsonArgs),
    /// Check API health
    Health(JsonArgs),
    /// Manage ideasjar configuration (init, show, path)
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

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let loaded = IdeasConfig::load();
    let level = loaded.as_ref().ok().and_then(|c| c.log.level.clone());
    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        level,
    })
    .ok();
    ui::init_quiet_mode(cli.quiet);

    let config = loaded.context("Failed to load config")?;
    let ctx = ApiContext {
        config,
        endpoint: cli.endpoint,
        insecure: cli.insecure,
    };
    tracing::debug!(endpoint = %ctx.endpoint(), "resolved API endpoint");

    match cli.command {
        Commands::List(args) => commands::run_list(&ctx, args).await?,
        Commands::Show(args) => commands::run_show(&ctx, args).await?,
        Commands::Search(args) => commands::run_search(&ctx, args).await?,
        Commands::Add(args) => commands::run_add(&ctx, args).await?,
        Commands::Edit(args) => commands::run_edit(&ctx, args).await?,
        Commands::Rm(args) => commands::run_remove(&ctx, args).await?,
        Commands::Improve(args) => commands::run_improve(&ctx, args).await?,
        Commands::Stats(args) => commands::run_stats(&ctx, args).await?,
        Commands::Health(args) => commands::run_health(&ctx, args).await?,
        Commands::Config(args) => config::run_config(args, &ctx.config, ctx.endpoint.as_deref())?,
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
