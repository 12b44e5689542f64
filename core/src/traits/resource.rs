use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceSpec {
    pub uri: String,
    pub name: String,
    pub description: String,
    pub mime_type: String,
}

/// A read-only, named content source. Readers degrade to a descriptive
/// string for expected failures and only return `Err` for broken setups.
#[async_trait]
pub trait Resource: Send + Sync {
    fn uri(&self) -> &str;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn mime_type(&self) -> &str {
        "text/markdown"
    }

    async fn read(&self) -> anyhow::Result<String>;

    fn spec(&self) -> ResourceSpec {
        ResourceSpec {
            uri: self.uri().to_string(),
            name: self.name().to_string(),
            description: self.description().to_string(),
            mime_type: self.mime_type().to_string(),
        }
    }
}
