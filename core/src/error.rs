use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("No fetched jobs available. Please run search_jobs first.")]
    NoCache,

    #[error("Job ID {0} not found in fetched data.")]
    NotFound(String),

    #[error("max_results must be a positive integer")]
    InvalidMaxResults,

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed job data in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl JobError {
    /// Failures reported back to the caller as a plain message rather than an error.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::NoCache | Self::NotFound(_) | Self::InvalidMaxResults
        )
    }
}

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Extract(String),
}

#[derive(Debug, Error)]
pub enum SamplingError {
    #[error("{0}")]
    Provider(#[from] anyhow::Error),

    #[error("completion contained no text")]
    EmptyCompletion,
}
