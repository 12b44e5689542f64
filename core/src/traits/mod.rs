pub mod prompt;
pub mod provider;
pub mod resource;
pub mod tool;

pub use prompt::{Prompt, PromptArgument, PromptSpec};
pub use provider::{ChatMessage, ChatRequest, ChatResponse, Provider};
pub use resource::{Resource, ResourceSpec};
pub use tool::{Tool, ToolResult, ToolSpec};
