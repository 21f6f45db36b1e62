//! health-tools CLI - inspect the tool catalog and run tool calls against a snapshot.
//!
//! Subcommands:
//! - `list`: tool names in catalog order
//! - `schema`: provider envelope (openai | gemini) as JSON
//! - `prompt`: plain-text tool listing
//! - `call`: execute one tool call against a JSON store snapshot

use clap::{Parser, Subcommand};
use health_tools_core::tools::Provider;
use health_tools_core::{Config, InMemoryStore, ToolExecutor, UserId};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "health-tools", version, about)]
struct Cli {
    /// JSON configuration file.
    #[arg(long, global = true, env = "HEALTH_TOOLS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List tool names.
    List,
    /// Print the tool catalog in a provider's wire format.
    Schema {
        /// openai or gemini
        #[arg(long, default_value = "openai")]
        provider: String,
        /// Prepend the provider's built-in web search tool.
        #[arg(long)]
        builtin_search: bool,
    },
    /// Print the plain-text tool listing.
    Prompt,
    /// Execute a tool call against a store snapshot.
    Call {
        /// Store snapshot: {"events": [..], "profiles": [..], "biomarker_standards": [..]}
        #[arg(long)]
        store: PathBuf,
        /// Caller identity every query is scoped to.
        #[arg(long)]
        user: String,
        #[arg(long)]
        tool: String,
        /// Tool arguments as a JSON object.
        #[arg(long, default_value = "{}")]
        args: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    health_tools_core::observability::init_tracing(&config.observability);

    let executor = ToolExecutor::new(config.tools.clone());

    match cli.command {
        Command::List => {
            for name in executor.catalog().list_names() {
                println!("{}", name);
            }
        }
        Command::Schema {
            provider,
            builtin_search,
        } => {
            let provider = Provider::parse(&provider)
                .ok_or_else(|| format!("unknown provider: {}", provider))?;
            let value = executor.catalog().for_provider(provider, builtin_search)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        Command::Prompt => {
            println!("{}", executor.catalog().generate_prompt(None));
        }
        Command::Call {
            store,
            user,
            tool,
            args,
        } => {
            let store = InMemoryStore::load(&store)?;
            let caller = UserId::from_string(user)?;
            let args: serde_json::Value = serde_json::from_str(&args)?;

            tracing::info!(tool = %tool, events = store.event_count(), "executing_tool_call");
            let result = executor.execute(&tool, &args, &caller, &store).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
