use crate::traits::{Prompt, PromptSpec, Resource, ResourceSpec, Tool, ToolResult, ToolSpec};
use std::sync::Arc;
use tracing::warn;

/// Everything the server exposes: tools, resources and prompt templates.
#[derive(Default)]
pub struct Registry {
    tools: Vec<Arc<dyn Tool>>,
    resources: Vec<Arc<dyn Resource>>,
    prompts: Vec<Arc<dyn Prompt>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_tool(&mut self, tool: Box<dyn Tool>) {
        self.tools.push(Arc::from(tool));
    }

    pub fn register_resource(&mut self, resource: Box<dyn Resource>) {
        self.resources.push(Arc::from(resource));
    }

    pub fn register_prompt(&mut self, prompt: Box<dyn Prompt>) {
        self.prompts.push(Arc::from(prompt));
    }

    pub fn tool_specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|t| t.spec()).collect()
    }

    pub fn resource_specs(&self) -> Vec<ResourceSpec> {
        self.resources.iter().map(|r| r.spec()).collect()
    }

    pub fn prompt_specs(&self) -> Vec<PromptSpec> {
        self.prompts.iter().map(|p| p.spec()).collect()
    }

    pub fn resource(&self, uri: &str) -> Option<Arc<dyn Resource>> {
        self.resources.iter().find(|r| r.uri() == uri).cloned()
    }

    pub fn prompt(&self, name: &str) -> Option<Arc<dyn Prompt>> {
        self.prompts.iter().find(|p| p.name() == name).cloned()
    }

    pub async fn execute(&self, name: &str, args: serde_json::Value) -> ToolResult {
        let tool = self.tools.iter().find(|t| t.name() == name).cloned();

        match tool {
            Some(tool) => match tool.execute(args).await {
                Ok(result) => result,
                Err(e) => {
                    warn!(tool = name, "Tool execution failed: {:#}", e);
                    ToolResult::error(format!("Execution failed: {:#}", e))
                }
            },
            None => ToolResult::error(format!("Tool '{}' not found", name)),
        }
    }
}
