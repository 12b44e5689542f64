//! Job search and persistence.
//!
//! A search fetches a batch from the job API, caches the raw batch on disk and
//! returns bounded summaries. Saving resolves one job out of that cached batch
//! into a normalized record under the saved-jobs folder.

pub mod client;
pub mod description;
pub mod model;
pub mod salary;
pub mod search;
pub mod store;

pub use client::{JSearchClient, JobSource};
pub use description::summarize_description;
pub use model::{FetchedJob, JobSummary, SavedJob};
pub use salary::resolve_salary;
pub use search::{DEFAULT_MAX_RESULTS, SearchOutcome, search_jobs};
pub use store::{JobStore, SAVE_CATEGORY, SaveOutcome};

pub(crate) const NOT_SPECIFIED: &str = "Not specified";
