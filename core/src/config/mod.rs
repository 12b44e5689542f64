use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const JOBHOUND_DIR: &str = ".jobhound";
const CACHE_FILE: &str = "fetched_jobs_temp.json";

pub const DEFAULT_SEARCH_HOST: &str = "jsearch.p.rapidapi.com";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SearchConfig {
    pub api_key: String,
    pub host: String,
    pub base_url: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            host: DEFAULT_SEARCH_HOST.to_string(),
            base_url: None,
        }
    }
}

impl SearchConfig {
    /// Base URL of the search API. Defaults to `https://{host}`.
    pub fn endpoint(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("https://{}", self.host))
    }

    pub fn resolve_api_key(&self) -> Result<String> {
        resolve_api_key_with_fallback(&["RAPIDAPI_KEY", "JOBHOUND_RAPIDAPI_KEY"], &self.api_key)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    pub jobs_dir: PathBuf,
    pub temp_dir: PathBuf,
    pub resume_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let base = get_jobhound_dir();
        Self {
            jobs_dir: base.join("jobs").join("saved_by_candidate"),
            temp_dir: base.join("jobs").join("temp"),
            resume_path: base.join("resume").join("resume.pdf"),
        }
    }
}

impl StorageConfig {
    pub fn cache_path(&self) -> PathBuf {
        self.temp_dir.join(CACHE_FILE)
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.jobs_dir, &self.temp_dir] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LlmConfig {
    pub provider: Option<String>,
    pub api_key: String,
    pub base_url: Option<String>,
    pub model: String,
    pub temperature: Option<f64>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: None,
            api_key: String::new(),
            base_url: None,
            model: "gpt-4o".to_string(),
            temperature: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub search: SearchConfig,
    pub storage: StorageConfig,
    pub llm: LlmConfig,
}

pub fn get_jobhound_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(JOBHOUND_DIR)
}

pub fn get_config_path() -> PathBuf {
    get_jobhound_dir().join("config.toml")
}

pub fn ensure_jobhound_dir() -> Result<PathBuf> {
    let jobhound_dir = get_jobhound_dir();

    if !jobhound_dir.exists() {
        std::fs::create_dir_all(&jobhound_dir).with_context(|| {
            format!(
                "Failed to create jobhound directory at {}",
                jobhound_dir.display()
            )
        })?;
    }

    Ok(jobhound_dir)
}

impl Config {
    pub fn load_or_init() -> Result<Self> {
        if config_exists() {
            load_config()
        } else {
            Ok(Config::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).with_context(|| "Failed to parse config")
    }
}

pub fn load_config() -> Result<Config> {
    let config_path = get_config_path();

    let content = std::fs::read_to_string(&config_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            anyhow!("Config file not found. Run 'jobhound onboard' to set up your configuration.")
        } else {
            anyhow!("Failed to read config from {}: {}", config_path.display(), e)
        }
    })?;

    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config from {}", config_path.display()))
}

pub fn save_config(config: &Config) -> Result<()> {
    ensure_jobhound_dir()?;

    let config_path = get_config_path();
    let content =
        toml::to_string_pretty(config).with_context(|| "Failed to serialize config to TOML")?;

    std::fs::write(&config_path, content)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    Ok(())
}

pub fn config_exists() -> bool {
    get_config_path().exists()
}

/// Environment variables win over the configured key; the first set variable is used.
pub fn resolve_api_key_with_fallback(env_vars: &[&str], config_key: &str) -> Result<String> {
    for var_name in env_vars {
        if let Ok(key) = std::env::var(var_name)
            && !key.is_empty()
        {
            return Ok(key);
        }
    }
    if !config_key.is_empty() {
        Ok(config_key.to_string())
    } else {
        Err(anyhow!(
            "No API key found (set one of {} or add it to the config)",
            env_vars.join(", ")
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml(
            r#"
[search]
api_key = "rapid"

[llm]
model = "gpt-4o-mini"
"#,
        )
        .unwrap();

        assert_eq!(config.search.api_key, "rapid");
        assert_eq!(config.search.host, DEFAULT_SEARCH_HOST);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert!(config.llm.provider.is_none());
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn endpoint_prefers_base_url() {
        let mut search = SearchConfig::default();
        assert_eq!(search.endpoint(), "https://jsearch.p.rapidapi.com");

        search.base_url = Some("http://127.0.0.1:9999".to_string());
        assert_eq!(search.endpoint(), "http://127.0.0.1:9999");
    }

    #[test]
    fn cache_path_lives_in_temp_dir() {
        let storage = StorageConfig {
            jobs_dir: PathBuf::from("/data/jobs"),
            temp_dir: PathBuf::from("/data/tmp"),
            resume_path: PathBuf::from("/data/resume.pdf"),
        };
        assert_eq!(
            storage.cache_path(),
            PathBuf::from("/data/tmp/fetched_jobs_temp.json")
        );
    }

    #[test]
    fn config_key_used_when_env_unset() {
        let key =
            resolve_api_key_with_fallback(&["JOBHOUND_TEST_KEY_THAT_IS_NEVER_SET"], "from-config")
                .unwrap();
        assert_eq!(key, "from-config");
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = resolve_api_key_with_fallback(&["JOBHOUND_TEST_KEY_THAT_IS_NEVER_SET"], "")
            .unwrap_err();
        assert!(err.to_string().contains("No API key found"));
    }

    #[test]
    fn roundtrips_through_toml() {
        let config = Config::default();
        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }
}
