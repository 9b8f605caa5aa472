//! aitools: run catalog AI tools from the command line.
//!
//! Usage:
//!   aitools list [--category C]    List available tools
//!   aitools show <tool>            Show a tool's inputs and template
//!   aitools run <tool> -i k=v ...  Generate content with a tool
//!   aitools status                 Probe the generation endpoint
//!   aitools init                   Write a default config file

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing::info;

use aitools::config::{self, EngineConfig};
use aitools::inference::HttpGenerationClient;
use aitools::tools::{build_prompt, validate};
use aitools::types::*;
use aitools::ToolEngine;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "aitools")]
#[command(version)]
#[command(about = "Prompt-template AI tools over a hosted chat-completion API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the aitools home directory [default: ~/.aitools].
    #[arg(long)]
    home: Option<String>,

    /// Log level (debug, info, warn, error). Overrides the config file.
    #[arg(long)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available tools.
    List {
        /// Only tools in this category (content, business, creative, communication).
        #[arg(long)]
        category: Option<String>,

        /// Print descriptors as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show one tool's inputs and prompt template.
    Show { tool: String },

    /// Generate content with a tool.
    Run {
        tool: String,

        /// Input value as key=value. Repeatable.
        #[arg(short = 'i', long = "input", value_parser = parse_key_value)]
        inputs: Vec<(String, String)>,

        /// Inputs as a JSON object. Merged under any -i values.
        #[arg(long)]
        inputs_json: Option<String>,

        /// Validate and print the rendered prompt without calling the API.
        #[arg(long)]
        prompt_only: bool,
    },

    /// Probe the generation endpoint.
    Status,

    /// Write a default config file to the home directory.
    Init {
        /// Overwrite an existing config.
        #[arg(long)]
        force: bool,
    },
}

fn parse_key_value(s: &str) -> std::result::Result<(String, String), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{}'", s))?;
    if k.trim().is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((k.trim().to_string(), v.to_string()))
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let home_dir = match &cli.home {
        Some(h) => PathBuf::from(shellexpand::tilde(h).into_owned()),
        None => config::default_home_dir(),
    };
    let config_path = home_dir.join("aitools.toml");
    let mut cfg = config::load_config(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    config::apply_env_overrides(&mut cfg, |name| std::env::var(name).ok());

    // Initialize logging
    let level = cli.log_level.clone().unwrap_or_else(|| cfg.log_level.clone());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::List { category, json } => cmd_list(&cfg, category.as_deref(), json),
        Commands::Show { tool } => cmd_show(&cfg, &tool),
        Commands::Run {
            tool,
            inputs,
            inputs_json,
            prompt_only,
        } => cmd_run(&cfg, &tool, inputs, inputs_json.as_deref(), prompt_only).await,
        Commands::Status => cmd_status(&cfg).await,
        Commands::Init { force } => cmd_init(&config_path, force),
    }
}

// ---------------------------------------------------------------------------
// Command implementations
// ---------------------------------------------------------------------------

fn cmd_list(cfg: &EngineConfig, category: Option<&str>, json: bool) -> Result<()> {
    let engine = build_engine(cfg)?;
    let tools: Vec<&ToolDescriptor> = match category {
        Some(c) => {
            if c.parse::<ToolCategory>().is_err() {
                bail!(
                    "Unknown category '{}'. Categories: {}",
                    c,
                    ToolCategory::ALL.map(|c| c.as_str()).join(", ")
                );
            }
            engine.tools_by_category(c)
        }
        None => engine.all_tools().iter().collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    println!();
    for tool in tools {
        println!(
            "  {} {:<26} {:<14} {}",
            tool.icon,
            tool.id.bold(),
            colorize_category(tool.category),
            tool.description.dimmed()
        );
    }
    println!();
    Ok(())
}

fn cmd_show(cfg: &EngineConfig, tool_id: &str) -> Result<()> {
    let engine = build_engine(cfg)?;
    let tool = find_tool(&engine, tool_id)?;

    println!();
    println!("{} {}", tool.icon, tool.name.bold());
    println!("  {}", tool.description);
    println!(
        "  {}: {}   {}: {}   {}: {}",
        "Category".bold(),
        colorize_category(tool.category),
        "Max tokens".bold(),
        tool.max_tokens,
        "Temperature".bold(),
        tool.temperature
    );
    println!();
    println!("  {}:", "Inputs".bold());
    for field in &tool.inputs {
        let marker = if field.required {
            "*".red().to_string()
        } else {
            " ".to_string()
        };
        let mut line = format!("   {}{:<18} {:<9} {}", marker, field.id, field.kind.to_string(), field.label);
        if let Some(max) = field.max_length {
            line.push_str(&format!(" (max {})", max));
        }
        println!("{}", line);
        if !field.options.is_empty() {
            println!("{:>31}{}", "", field.options.join(" | ").dimmed());
        }
    }
    if !tool.examples.is_empty() {
        println!();
        println!("  {}:", "Examples".bold());
        for ex in &tool.examples {
            println!("    - {}", ex);
        }
    }
    println!();
    println!("  {}:", "Template".bold());
    for line in tool.prompt_template.lines() {
        println!("    {}", line.dimmed());
    }
    println!();
    Ok(())
}

async fn cmd_run(
    cfg: &EngineConfig,
    tool_id: &str,
    pairs: Vec<(String, String)>,
    inputs_json: Option<&str>,
    prompt_only: bool,
) -> Result<()> {
    let engine = build_engine(cfg)?;

    let mut inputs = match inputs_json {
        Some(raw) => {
            let value: serde_json::Value =
                serde_json::from_str(raw).context("--inputs-json is not valid JSON")?;
            aitools::engine::inputs_from_json(&value)
        }
        None => Inputs::new(),
    };
    inputs.extend(pairs);

    if prompt_only {
        let tool = find_tool(&engine, tool_id)?;
        let errors = validate(tool, &inputs);
        if !errors.is_empty() {
            for e in &errors {
                eprintln!("{} {}", "Invalid:".red().bold(), e);
            }
            std::process::exit(2);
        }
        println!("{}", build_prompt(tool, &inputs));
        return Ok(());
    }

    info!("Dispatching {} with {} input(s)", tool_id, inputs.len());
    let result = engine.process_tool(tool_id, &inputs).await;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.success {
        std::process::exit(1);
    }
    Ok(())
}

async fn cmd_status(cfg: &EngineConfig) -> Result<()> {
    let engine = build_engine(cfg)?;
    let client = HttpGenerationClient::from_config(cfg);
    let status = client.probe().await;

    println!();
    println!("{}", "=== AI Tools Status ===".bold());
    println!();
    println!("  {}:  {}", "Endpoint".bold(), cfg.api_base_url);
    println!("  {}:     {}", "Model".bold(), cfg.model);
    println!(
        "  {}:   {}",
        "API key".bold(),
        if cfg.has_api_key() {
            "configured".green().to_string()
        } else {
            "missing".red().to_string()
        }
    );
    println!("  {}:    {}", "Status".bold(), colorize_status(status));
    println!(
        "  {}:    {}s, max_tokens <= {}, temperature <= {}",
        "Limits".bold(),
        engine.budget().as_secs(),
        cfg.max_tokens_cap,
        cfg.temperature_cap
    );
    println!();
    Ok(())
}

fn cmd_init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Config already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }
    config::save_config(&EngineConfig::default(), config_path)?;
    println!(
        "{} Wrote default config to {}",
        ">>>".green().bold(),
        config_path.display()
    );
    println!(
        "    Set {} in the environment or api_key in the file.",
        config::API_KEY_ENV_VARS.join(" or ")
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn build_engine(cfg: &EngineConfig) -> Result<ToolEngine> {
    ToolEngine::from_config(cfg).context("Failed to load tool catalog")
}

fn find_tool<'a>(engine: &'a ToolEngine, tool_id: &str) -> Result<&'a ToolDescriptor> {
    match engine.registry().get(tool_id) {
        Some(tool) => Ok(tool),
        None => bail!(
            "Tool \"{}\" not found. Available tools: {}",
            tool_id,
            engine.registry().ids().join(", ")
        ),
    }
}

fn colorize_category(category: ToolCategory) -> String {
    match category {
        ToolCategory::Content => "content".cyan().to_string(),
        ToolCategory::Business => "business".blue().to_string(),
        ToolCategory::Creative => "creative".magenta().to_string(),
        ToolCategory::Communication => "communication".yellow().to_string(),
    }
}

fn colorize_status(status: ServiceStatus) -> String {
    match status {
        ServiceStatus::Available => "available".green().to_string(),
        ServiceStatus::Slow => "slow".yellow().to_string(),
        ServiceStatus::Unavailable => "unavailable".red().bold().to_string(),
    }
}
