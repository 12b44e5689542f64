use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, Select};
use jobhound_core::config::{Config, LlmConfig, SearchConfig, StorageConfig};

const BANNER: &str = r"
    -------------------------------------

       j o b h o u n d
       job search tools for MCP hosts

    -------------------------------------
";

const PROVIDERS: &[&str] = &["openai", "openrouter"];
const MODELS: &[&str] = &["gpt-4o", "gpt-4o-mini", "gpt-5", "gpt-5-mini"];

fn print_step(step: usize, total: usize, title: &str) {
    println!();
    println!(
        "{}",
        style(format!("[{}/{}] {}", step, total, title))
            .cyan()
            .bold()
    );
    println!();
}

fn read_optional_key(prompt: &str, env_hint: &str) -> Result<String> {
    let key: String = Input::new()
        .with_prompt(format!("{prompt} (leave empty to use ${env_hint})"))
        .allow_empty(true)
        .interact_text()
        .context("Failed to read API key")?;

    Ok(key.trim().to_string())
}

fn setup_search() -> Result<SearchConfig> {
    let api_key = read_optional_key("Enter your RapidAPI key for JSearch", "RAPIDAPI_KEY")?;

    Ok(SearchConfig {
        api_key,
        ..Default::default()
    })
}

fn setup_llm() -> Result<LlmConfig> {
    let provider = Select::new()
        .with_prompt("Select the completion provider for sampling")
        .items(PROVIDERS)
        .default(0)
        .interact()
        .context("Failed to select provider")?;

    let env_hint = match PROVIDERS[provider] {
        "openrouter" => "OPENROUTER_API_KEY",
        _ => "OPENAI_API_KEY",
    };
    let api_key = read_optional_key("Enter your LLM API key", env_hint)?;

    let model = Select::new()
        .with_prompt("Select your model")
        .items(MODELS)
        .default(0)
        .interact()
        .context("Failed to select model")?;

    Ok(LlmConfig {
        provider: Some(PROVIDERS[provider].to_string()),
        api_key,
        model: MODELS[model].to_string(),
        ..Default::default()
    })
}

fn setup_storage(storage: &StorageConfig) {
    match storage.ensure_dirs() {
        Ok(()) => {
            println!(
                "  {} Saved jobs will be written to {}",
                style("✓").green(),
                style(storage.jobs_dir.display()).cyan()
            );
            println!(
                "  {} Search results are cached in {}",
                style("✓").green(),
                style(storage.temp_dir.display()).cyan()
            );
        }
        Err(e) => {
            eprintln!(
                "  {} Warning: Could not create job folders: {}",
                style("!").yellow(),
                e
            );
        }
    }

    if storage.resume_path.exists() {
        println!(
            "  {} Resume found at {}",
            style("✓").green(),
            style(storage.resume_path.display()).cyan()
        );
    } else {
        println!(
            "  {} Put your resume PDF at {}",
            style("→").yellow(),
            style(storage.resume_path.display()).cyan()
        );
    }
}

pub fn run_onboard() -> Result<Config> {
    println!("{}", style(BANNER).cyan().bold());

    println!("  {}", style("Welcome to jobhound!").white().bold());
    println!(
        "  {}",
        style("This wizard sets up job search, sampling and storage.").dim()
    );
    println!();

    print_step(1, 3, "Job Search API");
    let search = setup_search()?;

    print_step(2, 3, "Sampling Model");
    let llm = setup_llm()?;

    print_step(3, 3, "Storage Setup");
    let storage = StorageConfig::default();
    setup_storage(&storage);

    println!();
    println!("  {} Configuration complete!", style("✓").green().bold());
    println!(
        "  {} Config saved to {}",
        style("→").green(),
        style(jobhound_core::config::get_config_path().display()).cyan()
    );
    println!();
    println!(
        "  {} Point your MCP host at: {}",
        style("→").green(),
        style("jobhound serve").cyan().bold()
    );
    println!();

    Ok(Config {
        search,
        storage,
        llm,
    })
}
