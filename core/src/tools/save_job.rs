use crate::jobs::JobStore;
use crate::tools::{extract_optional_string_arg, extract_string_arg};
use crate::traits::{Tool, ToolResult};
use async_trait::async_trait;
use serde_json::json;

pub struct SaveJobTool {
    store: JobStore,
}

impl SaveJobTool {
    pub fn new(store: JobStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for SaveJobTool {
    fn name(&self) -> &str {
        "save_job"
    }

    fn description(&self) -> &str {
        "Save a job from the most recent search into the candidate's saved jobs. If salary is not provided it is taken from the fetched job data."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "job_id": {
                    "type": "string",
                    "description": "The id of a job returned by search_jobs"
                },
                "salary": {
                    "type": "string",
                    "description": "Salary to record for the job (optional)"
                }
            },
            "required": ["job_id"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let job_id = extract_string_arg(&args, "job_id")?;
        let salary = extract_optional_string_arg(&args, "salary");

        match self.store.save(&job_id, salary.as_deref()) {
            Ok(outcome) => Ok(ToolResult::success(outcome.message())),
            Err(e) if e.is_user_facing() => Ok(ToolResult::error(e.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}
