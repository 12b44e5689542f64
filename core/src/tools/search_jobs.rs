use crate::error::JobError;
use crate::jobs::{self, DEFAULT_MAX_RESULTS, JobSource, JobStore};
use crate::tools::{extract_string_arg, extract_usize_arg_opt};
use crate::traits::{Tool, ToolResult};
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

pub struct SearchJobsTool {
    source: Arc<dyn JobSource>,
    store: JobStore,
}

impl SearchJobsTool {
    pub fn new(source: Arc<dyn JobSource>, store: JobStore) -> Self {
        Self { source, store }
    }
}

#[async_trait]
impl Tool for SearchJobsTool {
    fn name(&self) -> &str {
        "search_jobs"
    }

    fn description(&self) -> &str {
        "Fetch jobs from the job search API and store them temporarily. Returns id, title, company, location, description and apply link for each job."
    }

    fn parameters_schema(&self) -> serde_json::Value {
        json!({
            "type": "object",
            "properties": {
                "role": {
                    "type": "string",
                    "description": "The role to search for"
                },
                "location": {
                    "type": "string",
                    "description": "The location to search in"
                },
                "max_results": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Maximum number of jobs to return (default: 5)"
                }
            },
            "required": ["role", "location"]
        })
    }

    async fn execute(&self, args: serde_json::Value) -> anyhow::Result<ToolResult> {
        let role = extract_string_arg(&args, "role")?;
        let location = extract_string_arg(&args, "location")?;
        let Ok(max_results) = extract_usize_arg_opt(&args, "max_results", DEFAULT_MAX_RESULTS)
        else {
            return Ok(ToolResult::error(JobError::InvalidMaxResults.to_string()));
        };

        let outcome =
            match jobs::search_jobs(self.source.as_ref(), &self.store, &role, &location, max_results)
                .await
            {
                Ok(outcome) => outcome,
                Err(e) => {
                    if let Some(job_err) = e.downcast_ref::<JobError>()
                        && job_err.is_user_facing()
                    {
                        return Ok(ToolResult::error(job_err.to_string()));
                    }
                    return Err(e);
                }
            };

        Ok(ToolResult::success(serde_json::to_string_pretty(
            &outcome.to_json(),
        )?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::TempDir;

    struct FixedSource(Vec<Value>);

    #[async_trait]
    impl JobSource for FixedSource {
        async fn fetch(&self, _role: &str, _location: &str) -> anyhow::Result<Vec<Value>> {
            Ok(self.0.clone())
        }
    }

    fn tool(tmp: &TempDir, jobs: Vec<Value>) -> SearchJobsTool {
        SearchJobsTool::new(
            Arc::new(FixedSource(jobs)),
            JobStore::new(tmp.path().join("saved"), tmp.path().join("cache.json")),
        )
    }

    fn job(id: &str) -> Value {
        json!({
            "job_id": id,
            "job_title": "Backend Engineer",
            "job_apply_link": format!("https://jobs.example/{id}")
        })
    }

    #[tokio::test]
    async fn defaults_to_five_results() {
        let tmp = TempDir::new().unwrap();
        let tool = tool(&tmp, (0..7).map(|i| job(&i.to_string())).collect());

        let result = tool
            .execute(json!({"role": "backend", "location": "Remote"}))
            .await
            .unwrap();

        assert!(result.success);
        let summaries: Vec<serde_json::Value> = serde_json::from_str(&result.output).unwrap();
        assert_eq!(summaries.len(), 5);
        assert_eq!(summaries[0]["job_id"], "0");
        assert_eq!(summaries[0]["title"], "Backend Engineer");
        assert_eq!(summaries[4]["apply_link"], "https://jobs.example/4");
    }

    #[tokio::test]
    async fn no_jobs_returns_message_record() {
        let tmp = TempDir::new().unwrap();
        let result = tool(&tmp, vec![])
            .execute(json!({"role": "x", "location": "y", "max_results": 3}))
            .await
            .unwrap();

        assert!(result.success);
        let payload: serde_json::Value = serde_json::from_str(&result.output).unwrap();
        assert_eq!(payload, json!([{"message": "No jobs found."}]));
    }

    #[tokio::test]
    async fn zero_max_results_is_a_tool_error() {
        let tmp = TempDir::new().unwrap();
        let result = tool(&tmp, vec![job("a")])
            .execute(json!({"role": "x", "location": "y", "max_results": 0}))
            .await
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.text(), "max_results must be a positive integer");
    }

    #[tokio::test]
    async fn non_integer_max_results_is_a_tool_error() {
        let tmp = TempDir::new().unwrap();
        let tool = tool(&tmp, (0..7).map(|i| job(&i.to_string())).collect());

        for bad in [json!(-1), json!("2"), json!(2.0)] {
            let result = tool
                .execute(json!({"role": "x", "location": "y", "max_results": bad.clone()}))
                .await
                .unwrap();

            assert!(!result.success, "accepted max_results={bad}");
            assert_eq!(result.text(), "max_results must be a positive integer");
        }
        assert!(!tmp.path().join("cache.json").exists());
    }

    #[tokio::test]
    async fn missing_role_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let err = tool(&tmp, vec![])
            .execute(json!({"location": "y"}))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Missing 'role' parameter"));
    }
}
