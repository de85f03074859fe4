//! Idea commands - drive an IdeaList against the ideas HTTP API
//!
//! Commands: list, show, search, add, edit, rm, improve, stats, health
//!
//! ```bash
//! ideasjar list --query garden
//! ideasjar list --priority high --ids
//! ideasjar show 42
//! ideasjar add -m "Build a rain barrel" --priority high
//! echo "dictated thought" | ideasjar add --voice
//! ideasjar list --json | jq '.[] | select(.is_voice)'
//! ```

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, ValueEnum};
use ideasjar_core::{
    format_relative_date, HttpIdeaApi, Idea, IdeaApi, IdeaId, IdeaList, IdeasConfig, Priority,
};

use crate::ui::with_spinner;

// ============================================================================
// Shared
// ============================================================================

/// Connection settings resolved from flags, env and config file
#[derive(Debug, Clone)]
pub struct ApiContext {
    pub config: IdeasConfig,
    pub endpoint: Option<String>,
    pub insecure: bool,
}

impl ApiContext {
    pub fn endpoint(&self) -> String {
        self.config.resolve_endpoint(self.endpoint.as_deref())
    }

    pub fn client(&self) -> Result<HttpIdeaApi> {
        let insecure = self.insecure || self.config.insecure();
        HttpIdeaApi::with_options(self.endpoint(), insecure).context("Failed to set up API client")
    }

    pub fn idea_list(&self) -> Result<IdeaList<HttpIdeaApi>> {
        Ok(IdeaList::new(self.client()?))
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (for piping to jq)
    Json,
    /// Quiet mode - IDs only
    Quiet,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum PriorityArg {
    High,
    Medium,
    Low,
}

impl From<PriorityArg> for Priority {
    fn from(p: PriorityArg) -> Self {
        match p {
            PriorityArg::High => Priority::High,
            PriorityArg::Medium => Priority::Medium,
            PriorityArg::Low => Priority::Low,
        }
    }
}

fn get_output_format(output: OutputFormat, json_flag: bool, quiet_flag: bool) -> OutputFormat {
    if json_flag {
        OutputFormat::Json
    } else if quiet_flag {
        OutputFormat::Quiet
    } else {
        output
    }
}

// ============================================================================
// Args
// ============================================================================

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only show ideas containing this text (case-insensitive)
    #[arg(long, short = 'Q')]
    pub query: Option<String>,

    /// Only load ideas with this priority (filtered by the server)
    #[arg(long, short, value_enum)]
    pub priority: Option<PriorityArg>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,

    /// Print IDs only (shorthand for --output quiet)
    #[arg(long, conflicts_with = "output")]
    pub ids: bool,
}

#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Text to search for on the server
    pub query: String,

    /// Output format
    #[arg(long, short, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Shorthand for --output json
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Inline idea content
    #[arg(long, short)]
    pub message: Option<String>,

    /// Read content from file
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Mark the idea as voice-originated
    #[arg(long)]
    pub voice: bool,

    /// Idea priority
    #[arg(long, short, value_enum, default_value = "medium")]
    pub priority: PriorityArg,

    /// Print the created idea as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Idea ID
    pub id: IdeaId,

    /// New inline content (keeps the current content when omitted)
    #[arg(long, short)]
    pub message: Option<String>,

    /// Read new content from file
    #[arg(long, conflicts_with = "message")]
    pub file: Option<PathBuf>,

    /// Mark as voice-originated
    #[arg(long, conflicts_with = "typed")]
    pub voice: bool,

    /// Mark as typed
    #[arg(long)]
    pub typed: bool,

    /// New priority
    #[arg(long, short, value_enum)]
    pub priority: Option<PriorityArg>,

    /// Print the updated idea as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct IdArgs {
    /// Idea ID
    pub id: IdeaId,
}

#[derive(Parser, Debug)]
pub struct JsonArgs {
    /// Print raw JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Idea ID
    pub id: IdeaId,

    /// Print raw JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// Content Resolution (stdin/file/inline)
// ============================================================================

/// Priority: -m inline > --file > piped stdin. `None` when nothing was given.
fn read_content(message: &Option<String>, file: &Option<PathBuf>) -> Result<Option<String>> {
    if let Some(msg) = message {
        return Ok(Some(msg.clone()));
    }

    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .map(|s| Some(s.trim_end().to_string()))
            .with_context(|| format!("Failed to read file: {}", path.display()));
    }

    if !std::io::stdin().is_terminal() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        let content = buf.trim().to_string();
        if !content.is_empty() {
            return Ok(Some(content));
        }
    }

    Ok(None)
}

// ============================================================================
// Output
// ============================================================================

fn idea_meta(idea: &Idea) -> String {
    let source = if idea.is_voice { "voice" } else { "typed" };
    match idea.timestamp() {
        Some(ts) => format!("{} · {} · {}", source, idea.priority, format_relative_date(ts)),
        None => format!("{} · {}", source, idea.priority),
    }
}

fn print_ideas(header: &str, ideas: &[&Idea], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(ideas)?);
        }
        OutputFormat::Quiet => {
            for idea in ideas {
                println!("{}", idea.id);
            }
        }
        OutputFormat::Human => {
            println!("┌─ {}", header);
            println!("│");

            if ideas.is_empty() {
                println!("│  (no ideas)");
            } else {
                for (i, idea) in ideas.iter().enumerate() {
                    let is_last = i == ideas.len() - 1;
                    let prefix = if is_last { "└─" } else { "├─" };
                    let cont_prefix = if is_last { "   " } else { "│  " };

                    println!("{} [{}] {}", prefix, idea.id, idea.content);
                    println!("{}{}", cont_prefix, idea_meta(idea));
                    if let Some(ref improved) = idea.improved_text {
                        println!("{}improved: {}", cont_prefix, improved);
                    }

                    if !is_last {
                        println!("│");
                    }
                }
            }
        }
    }
    Ok(())
}

fn idea_detail(idea: &Idea) -> Vec<String> {
    let mut lines = vec![
        format!("┌─ [{}] {}", idea.id, idea.content),
        format!("├─ {}", idea_meta(idea)),
    ];
    if let Some(ref improved) = idea.improved_text {
        lines.push(format!("├─ improved: {}", improved));
    }
    if let Some(updated) = idea.updated_at {
        lines.push(format!("└─ updated {}", format_relative_date(updated)));
    } else {
        lines.push("└─ (no update recorded)".to_string());
    }
    lines
}

fn print_idea(verb: &str, idea: &Idea, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(idea)?);
    } else {
        println!("✓ {} idea {}: {}", verb, idea.id, idea.content);
    }
    Ok(())
}

// ============================================================================
// Implementations
// ============================================================================

async fn load(list: &mut IdeaList<HttpIdeaApi>) -> Result<()> {
    with_spinner("Loading ideas", list.load())
        .await
        .context("Failed to load ideas")
}

pub async fn run_list(ctx: &ApiContext, args: ListArgs) -> Result<()> {
    let format = get_output_format(args.output, args.json, args.ids);
    let mut list = ctx.idea_list()?;
    list.set_priority(args.priority.map(Priority::from));
    load(&mut list).await?;

    if let Some(query) = args.query {
        list.set_query(query);
    }

    let shown: Vec<&Idea> = list.filtered().collect();
    let mut header = if list.query().is_empty() {
        format!("{} ideas", shown.len())
    } else {
        format!(
            "{} of {} ideas matching \"{}\"",
            shown.len(),
            list.ideas().len(),
            list.query()
        )
    };
    if let Some(priority) = list.priority() {
        header.push_str(&format!(" ({} priority)", priority));
    }

    print_ideas(&header, &shown, format)
}

pub async fn run_show(ctx: &ApiContext, args: ShowArgs) -> Result<()> {
    let api = ctx.client()?;
    let idea = with_spinner("Fetching idea", api.get(&args.id))
        .await
        .with_context(|| format!("Failed to fetch idea {}", args.id))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&idea)?);
    } else {
        for line in idea_detail(&idea) {
            println!("{}", line);
        }
    }
    Ok(())
}

pub async fn run_search(ctx: &ApiContext, args: SearchArgs) -> Result<()> {
    let format = get_output_format(args.output, args.json, false);
    let api = ctx.client()?;

    let ideas = with_spinner("Searching", api.search(&args.query))
        .await
        .context("Search failed")?;

    let shown: Vec<&Idea> = ideas.iter().collect();
    print_ideas(
        &format!("{} ideas matching \"{}\" (server)", shown.len(), args.query),
        &shown,
        format,
    )
}

pub async fn run_add(ctx: &ApiContext, args: AddArgs) -> Result<()> {
    let content = read_content(&args.message, &args.file)?.ok_or_else(|| {
        anyhow!("No content provided. Use -m, --file, or pipe content via stdin")
    })?;

    let mut list = ctx.idea_list()?;
    list.begin_create();
    {
        let draft = list.draft_mut();
        draft.content = content;
        draft.is_voice = args.voice;
        draft.priority = args.priority.into();
    }

    with_spinner("Saving idea", list.submit())
        .await
        .context("Failed to add idea")?;

    let created = list
        .ideas()
        .first()
        .ok_or_else(|| anyhow!("Server accepted the idea but returned nothing"))?;
    print_idea("Added", created, args.json)
}

pub async fn run_edit(ctx: &ApiContext, args: EditArgs) -> Result<()> {
    let mut list = ctx.idea_list()?;
    load(&mut list).await?;

    let idea = list
        .find(&args.id)
        .cloned()
        .ok_or_else(|| anyhow!("Idea {} not found", args.id))?;
    list.begin_edit(&idea);

    let content = if args.message.is_some() || args.file.is_some() {
        read_content(&args.message, &args.file)?
    } else {
        None
    };

    {
        let draft = list.draft_mut();
        if let Some(content) = content {
            draft.content = content;
        }
        if args.voice {
            draft.is_voice = true;
        } else if args.typed {
            draft.is_voice = false;
        }
        if let Some(priority) = args.priority {
            draft.priority = priority.into();
        }
    }

    with_spinner("Saving idea", list.submit())
        .await
        .with_context(|| format!("Failed to update idea {}", args.id))?;

    let updated = list
        .find(&args.id)
        .ok_or_else(|| anyhow!("Idea {} disappeared during update", args.id))?;
    print_idea("Updated", updated, args.json)
}

pub async fn run_remove(ctx: &ApiContext, args: IdArgs) -> Result<()> {
    let mut list = ctx.idea_list()?;

    with_spinner("Deleting idea", list.remove(&args.id))
        .await
        .with_context(|| format!("Failed to delete idea {}", args.id))?;

    println!("✓ Deleted idea {}", args.id);
    Ok(())
}

pub async fn run_improve(ctx: &ApiContext, args: IdArgs) -> Result<()> {
    let mut list = ctx.idea_list()?;
    load(&mut list).await?;

    with_spinner("Improving idea", list.improve(&args.id))
        .await
        .with_context(|| format!("Failed to improve idea {}", args.id))?;

    let idea = list
        .find(&args.id)
        .ok_or_else(|| anyhow!("Idea {} not found", args.id))?;
    println!("┌─ [{}] {}", idea.id, idea.content);
    println!(
        "└─ {}",
        idea.improved_text.as_deref().unwrap_or("(no improvement returned)")
    );
    Ok(())
}

pub async fn run_stats(ctx: &ApiContext, args: JsonArgs) -> Result<()> {
    let api = ctx.client()?;
    let stats = with_spinner("Fetching stats", api.stats())
        .await
        .context("Failed to fetch stats")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("┌─ {} ideas", stats.total_ideas);
    println!(
        "├─ voice: {} ({:.2}%)  typed: {}",
        stats.voice_ideas, stats.voice_percentage, stats.text_ideas
    );
    println!(
        "└─ priority: high {} · medium {} · low {}",
        stats.priority_breakdown.high, stats.priority_breakdown.medium, stats.priority_breakdown.low
    );
    Ok(())
}

pub async fn run_health(ctx: &ApiContext, args: JsonArgs) -> Result<()> {
    let api = ctx.client()?;
    let endpoint = api.endpoint().to_string();
    let health = with_spinner("Checking API", api.health())
        .await
        .with_context(|| format!("API at {} is unreachable", endpoint))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&health)?);
    } else if health.is_healthy() {
        println!(
            "✓ {} is {} (database: {})",
            endpoint,
            health.status,
            health.database.as_deref().unwrap_or("unknown")
        );
    } else {
        println!(
            "✗ {} is {}: {}",
            endpoint,
            health.status,
            health.error.as_deref().unwrap_or("no details")
        );
    }

    if health.is_healthy() {
        Ok(())
    } else {
        Err(anyhow!("API reported status '{}'", health.status))
    }
}
