use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jobhound_core::traits::{Prompt, Provider, Resource};
use jobhound_core::{config, providers, sampling, server};
use std::collections::HashMap;
use std::sync::Arc;
mod onboard;

#[derive(Parser)]
#[command(name = "jobhound")]
#[command(about = "jobhound - job search tools for MCP hosts", long_about = None)]
struct Cli {
    /// Log at debug level (to stderr)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive setup of API keys and storage
    Onboard,
    /// Run the MCP server on stdin/stdout
    Serve,
    /// Search jobs and cache the results for `save`
    Search {
        #[arg(short, long)]
        role: String,
        #[arg(short, long)]
        location: String,
        #[arg(short = 'n', long, default_value_t = jobhound_core::jobs::DEFAULT_MAX_RESULTS)]
        max_results: usize,
    },
    /// Save a job from the last search
    Save {
        job_id: String,
        #[arg(short, long)]
        salary: Option<String>,
    },
    /// Show saved jobs
    Saved,
    /// Show the resume text
    Resume,
    /// Render a prompt template
    Prompt {
        name: String,
        #[arg(short = 'a', long = "arg", value_parser = parse_key_val)]
        args: Vec<(String, String)>,
    },
    /// Send user messages to the configured model
    Sample {
        #[arg(short, long, required = true)]
        message: Vec<String>,
        #[arg(short, long)]
        system: Option<String>,
        #[arg(long)]
        max_tokens: Option<u32>,
    },
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{s}'"))?;
    Ok((key.to_string(), value.to_string()))
}

fn init_tracing(debug: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

async fn run_tool(
    registry: &server::Registry,
    name: &str,
    args: serde_json::Value,
) -> Result<()> {
    let result = registry.execute(name, args).await;
    if result.success {
        println!("{}", result.output);
        Ok(())
    } else {
        anyhow::bail!("{}", result.text())
    }
}

async fn show_resource(registry: &server::Registry, uri: &str) -> Result<()> {
    let resource = registry
        .resource(uri)
        .with_context(|| format!("Resource {uri} is not registered"))?;
    let markdown = resource.read().await?;
    termimad::print_text(&markdown);
    Ok(())
}

fn build_registry() -> Result<server::Registry> {
    let config = config::Config::load_or_init()?;
    server::build_registry(&config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let command = cli.command.unwrap_or_else(|| {
        if !config::config_exists() {
            Commands::Onboard
        } else {
            Commands::Serve
        }
    });

    match command {
        Commands::Onboard => {
            let onboard_config = onboard::run_onboard().map_err(|e| {
                eprintln!("❌ Onboarding failed: {}", e);
                anyhow::anyhow!("Onboarding failed: {}", e)
            })?;
            config::save_config(&onboard_config)?;
        }
        Commands::Serve => {
            let registry = build_registry()?;
            server::McpServer::new(registry).serve_stdio().await?;
        }
        Commands::Search {
            role,
            location,
            max_results,
        } => {
            let args = serde_json::json!({
                "role": role,
                "location": location,
                "max_results": max_results,
            });
            run_tool(&build_registry()?, "search_jobs", args).await?;
        }
        Commands::Save { job_id, salary } => {
            let args = serde_json::json!({ "job_id": job_id, "salary": salary });
            run_tool(&build_registry()?, "save_job", args).await?;
        }
        Commands::Saved => {
            show_resource(&build_registry()?, "jobs://saved").await?;
        }
        Commands::Resume => {
            show_resource(&build_registry()?, "resume://default").await?;
        }
        Commands::Prompt { name, args } => {
            let registry = build_registry()?;
            let prompt = registry
                .prompt(&name)
                .with_context(|| format!("Unknown prompt: {name}"))?;
            let args: HashMap<String, String> = args.into_iter().collect();
            println!("{}", prompt.render(&args)?);
        }
        Commands::Sample {
            message,
            system,
            max_tokens,
        } => {
            let config = config::Config::load_or_init()?;
            let provider: Arc<dyn Provider> = Arc::from(providers::create_provider(&config.llm)?);
            let handler = sampling::SamplingHandler::new(provider);
            let messages: Vec<sampling::SamplingMessage> = message
                .into_iter()
                .map(|text| sampling::SamplingMessage::text(sampling::Role::User, text))
                .collect();
            let params = sampling::SamplingParams {
                system_prompt: system,
                max_tokens,
                temperature: None,
            };
            println!("{}", handler.handle(&messages, &params).await);
        }
    }

    Ok(())
}
