use super::{FetchedJob, JobSource, JobStore, JobSummary};
use crate::error::JobError;
use anyhow::Context;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

pub const DEFAULT_MAX_RESULTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    NoJobs,
    Found(Vec<JobSummary>),
}

impl SearchOutcome {
    /// The caller-facing payload: summaries, or a single informational record.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::NoJobs => json!([{ "message": "No jobs found." }]),
            Self::Found(summaries) => serde_json::to_value(summaries).unwrap_or_default(),
        }
    }
}

/// Runs one search: fetch, truncate, cache the raw records, summarize.
///
/// An empty result leaves the previous cache in place.
pub async fn search_jobs(
    source: &dyn JobSource,
    store: &JobStore,
    role: &str,
    location: &str,
    max_results: usize,
) -> anyhow::Result<SearchOutcome> {
    if max_results == 0 {
        return Err(JobError::InvalidMaxResults.into());
    }

    let mut records = source.fetch(role, location).await?;
    records.truncate(max_results);

    if records.is_empty() {
        info!(role, location, "No jobs found");
        return Ok(SearchOutcome::NoJobs);
    }

    let jobs = records
        .iter()
        .map(FetchedJob::deserialize)
        .collect::<Result<Vec<_>, _>>()
        .context("Job search API returned a malformed job record")?;

    store.write_batch(&records)?;
    info!(role, location, count = records.len(), "Fetched jobs");

    Ok(SearchOutcome::Found(jobs.iter().map(JobSummary::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value;
    use tempfile::TempDir;

    struct FixedSource(Vec<Value>);

    #[async_trait]
    impl JobSource for FixedSource {
        async fn fetch(&self, _role: &str, _location: &str) -> anyhow::Result<Vec<Value>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl JobSource for FailingSource {
        async fn fetch(&self, _role: &str, _location: &str) -> anyhow::Result<Vec<Value>> {
            anyhow::bail!("connection refused")
        }
    }

    fn jobs(n: usize) -> Vec<Value> {
        (0..n)
            .map(|i| json!({"job_id": format!("job-{i}"), "job_description": "x".repeat(2500)}))
            .collect()
    }

    fn store(tmp: &TempDir) -> JobStore {
        JobStore::new(tmp.path().join("saved"), tmp.path().join("cache.json"))
    }

    fn cached_records(store: &JobStore) -> Value {
        serde_json::from_str(&std::fs::read_to_string(store.cache_path()).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn truncates_and_caches_in_order() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);

        let outcome = search_jobs(&FixedSource(jobs(8)), &store, "dev", "NYC", 3)
            .await
            .unwrap();

        let SearchOutcome::Found(summaries) = outcome else {
            panic!("expected jobs");
        };
        let cached = store.load_batch().unwrap();
        assert_eq!(cached.len(), 3);
        assert_eq!(summaries.len(), 3);
        for (summary, job) in summaries.iter().zip(&cached) {
            assert_eq!(summary.job_id, job.job_id);
        }
        assert!(summaries[0].description.contains("\n...\n"));
    }

    #[tokio::test]
    async fn cache_keeps_records_verbatim() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        let record = json!({
            "job_id": "a",
            "job_title": "Engineer",
            "employer_name": null,
            "job_min_salary": null,
            "job_is_remote": true,
            "job_highlights": {"Qualifications": ["Rust"]}
        });

        search_jobs(&FixedSource(vec![record.clone()]), &store, "dev", "NYC", 5)
            .await
            .unwrap();

        assert_eq!(cached_records(&store), json!([record]));
    }

    #[tokio::test]
    async fn malformed_record_is_an_error_and_not_cached() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);

        let err = search_jobs(&FixedSource(vec![json!({"job_id": 42})]), &store, "dev", "NYC", 5)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("malformed job record"));
        assert!(!store.cache_path().exists());
    }

    #[tokio::test]
    async fn fewer_jobs_than_limit_are_all_kept() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);

        search_jobs(&FixedSource(jobs(2)), &store, "dev", "NYC", 5)
            .await
            .unwrap();
        assert_eq!(store.load_batch().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn empty_result_keeps_previous_cache() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        store.write_batch(&jobs(1)).unwrap();

        let outcome = search_jobs(&FixedSource(vec![]), &store, "dev", "NYC", 5)
            .await
            .unwrap();

        assert_eq!(outcome, SearchOutcome::NoJobs);
        assert_eq!(outcome.to_json(), json!([{"message": "No jobs found."}]));
        assert_eq!(store.load_batch().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn zero_max_results_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let err = search_jobs(&FixedSource(jobs(1)), &store(&tmp), "dev", "NYC", 0)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<JobError>(),
            Some(JobError::InvalidMaxResults)
        ));
    }

    #[tokio::test]
    async fn source_errors_propagate() {
        let tmp = TempDir::new().unwrap();
        let store = store(&tmp);
        let err = search_jobs(&FailingSource, &store, "dev", "NYC", 5)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("connection refused"));
        assert!(!store.cache_path().exists());
    }
}
