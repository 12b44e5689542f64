use crate::jobs::JobStore;
use crate::traits::Resource;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::fmt::Write;
use std::path::Path;
use tracing::debug;

const HEADER: &str = "# Saved Jobs\n\n";
const EMPTY: &str = "# No saved jobs found.";

pub struct SavedJobsResource {
    store: JobStore,
}

impl SavedJobsResource {
    pub fn new(store: JobStore) -> Self {
        Self { store }
    }

    /// Renders every readable saved job; unreadable files are skipped.
    pub fn render(&self) -> String {
        let mut content = String::from(HEADER);

        for path in self.store.saved_files() {
            match load_job(&path) {
                Some(job) => render_job(&mut content, &job),
                None => debug!(path = %path.display(), "Skipping unreadable saved job"),
            }
        }

        if content == HEADER {
            EMPTY.to_string()
        } else {
            content
        }
    }
}

fn load_job(path: &Path) -> Option<Map<String, Value>> {
    let text = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&text).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

fn field<'a>(job: &'a Map<String, Value>, key: &str, default: &'a str) -> &'a str {
    job.get(key).and_then(Value::as_str).unwrap_or(default)
}

fn render_job(out: &mut String, job: &Map<String, Value>) {
    const MISSING: &str = "Not specified";

    let _ = writeln!(out, "## {}", field(job, "title", "Untitled"));
    let _ = writeln!(out, "- **Company**: {}", field(job, "company", MISSING));
    let _ = writeln!(out, "- **Location**: {}", field(job, "location", MISSING));
    let _ = writeln!(out, "- **Description**: {}", field(job, "description", MISSING));
    let _ = writeln!(
        out,
        "- **Employment Type**: {}",
        field(job, "employment_type", MISSING)
    );
    let _ = writeln!(out, "- **Apply**: [Link]({})", field(job, "apply_link", MISSING));
    let _ = writeln!(out, "- **Salary**: {}\n", field(job, "salary", MISSING));
}

#[async_trait]
impl Resource for SavedJobsResource {
    fn uri(&self) -> &str {
        "jobs://saved"
    }

    fn name(&self) -> &str {
        "saved_jobs"
    }

    fn description(&self) -> &str {
        "Markdown listing of all saved jobs"
    }

    async fn read(&self) -> anyhow::Result<String> {
        Ok(self.render())
    }
}
