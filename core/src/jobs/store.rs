use super::{FetchedJob, SavedJob, resolve_salary};
use crate::config::StorageConfig;
use crate::error::JobError;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Folder under the jobs directory that every saved job lands in.
pub const SAVE_CATEGORY: &str = "general";

/// Filesystem side of the job flows: the single temp cache holding the last
/// fetched batch, and the saved-jobs folder.
///
/// The cache is overwritten by every non-empty search without locking, so a
/// search racing a save may save from either batch.
#[derive(Debug, Clone)]
pub struct JobStore {
    jobs_dir: PathBuf,
    cache_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveOutcome {
    pub job_id: String,
    pub path: PathBuf,
    pub salary: String,
}

impl SaveOutcome {
    pub fn message(&self) -> String {
        format!(
            "Job {} saved successfully with salary: {}",
            self.job_id, self.salary
        )
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> JobError + '_ {
    move |source| JobError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn json_err(path: &Path) -> impl FnOnce(serde_json::Error) -> JobError + '_ {
    move |source| JobError::Json {
        path: path.to_path_buf(),
        source,
    }
}

impl JobStore {
    pub fn new(jobs_dir: impl Into<PathBuf>, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            jobs_dir: jobs_dir.into(),
            cache_path: cache_path.into(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(config.jobs_dir.clone(), config.cache_path())
    }

    pub fn jobs_dir(&self) -> &Path {
        &self.jobs_dir
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    /// Replaces the cached batch with `jobs`.
    pub fn write_batch<T: Serialize>(&self, jobs: &[T]) -> Result<(), JobError> {
        if let Some(parent) = self.cache_path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err(parent))?;
        }

        let content = serde_json::to_string_pretty(jobs).map_err(json_err(&self.cache_path))?;
        std::fs::write(&self.cache_path, content).map_err(io_err(&self.cache_path))?;

        debug!(count = jobs.len(), path = %self.cache_path.display(), "Cached fetched jobs");
        Ok(())
    }

    pub fn load_batch(&self) -> Result<Vec<FetchedJob>, JobError> {
        let content = match std::fs::read_to_string(&self.cache_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(JobError::NoCache),
            Err(e) => return Err(io_err(&self.cache_path)(e)),
        };

        serde_json::from_str(&content).map_err(json_err(&self.cache_path))
    }

    pub fn saved_job_path(&self, job_id: &str) -> PathBuf {
        self.jobs_dir
            .join(SAVE_CATEGORY)
            .join(format!("{job_id}.json"))
    }

    /// Persists the cached job `job_id`, overwriting any earlier save of it.
    pub fn save(&self, job_id: &str, salary: Option<&str>) -> Result<SaveOutcome, JobError> {
        let jobs = self.load_batch()?;

        let selected = jobs
            .iter()
            .find(|job| job.job_id.as_deref() == Some(job_id))
            .ok_or_else(|| JobError::NotFound(job_id.to_string()))?;

        let salary = resolve_salary(salary, selected);
        let record = SavedJob::from_fetched(selected, salary.clone());

        let path = self.saved_job_path(job_id);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err(parent))?;
        }
        let content = serde_json::to_string_pretty(&record).map_err(json_err(&path))?;
        std::fs::write(&path, content).map_err(io_err(&path))?;

        info!(job_id, path = %path.display(), "Saved job");

        Ok(SaveOutcome {
            job_id: job_id.to_string(),
            path,
            salary,
        })
    }

    /// Every `*.json` file under the jobs directory, in path order.
    pub fn saved_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = WalkDir::new(&self.jobs_dir)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        files.sort();
        files
    }
}
