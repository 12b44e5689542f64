pub mod config;
pub mod error;
pub mod jobs;
pub mod prompts;
pub mod providers;
pub mod resources;
pub mod sampling;
pub mod server;
pub mod tools;
pub mod traits;

pub use config::*;
pub use error::{JobError, ResumeError, SamplingError};
pub use providers::*;
pub use sampling::{SamplingHandler, SamplingMessage, SamplingParams};
pub use server::{McpServer, Registry, build_registry};
pub use tools::*;
pub use traits::*;
