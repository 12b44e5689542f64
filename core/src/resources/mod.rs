pub mod resume;
pub mod saved_jobs;

pub use resume::ResumeResource;
pub use saved_jobs::SavedJobsResource;
