use crate::config::{LlmConfig, resolve_api_key_with_fallback};
use crate::providers::OpenAIProvider;
use crate::traits::Provider;
use anyhow::{Result, anyhow};

const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";

pub fn create_provider(config: &LlmConfig) -> Result<Box<dyn Provider>> {
    let provider_name = config.provider.as_deref().unwrap_or("openai");

    let (env_vars, default_base_url): (&[&str], &str) = match provider_name.to_lowercase().as_str() {
        "openai" => (
            &["OPENAI_API_KEY", "JOBHOUND_OPENAI_API_KEY"],
            super::openai::OPENAI_BASE_URL,
        ),
        "openrouter" => (
            &["OPENROUTER_API_KEY", "JOBHOUND_OPENROUTER_API_KEY"],
            OPENROUTER_BASE_URL,
        ),
        _ => {
            return Err(anyhow!(
                "Unknown provider: {}. Available: openai, openrouter",
                provider_name
            ));
        }
    };

    let api_key = resolve_api_key_with_fallback(env_vars, &config.api_key)?;
    let base_url = config.base_url.as_deref().unwrap_or(default_base_url);

    let provider = OpenAIProvider::new(api_key)
        .with_model(config.model.clone())
        .with_base_url(base_url)
        .with_temperature(config.temperature);

    Ok(Box::new(provider))
}
