use super::NOT_SPECIFIED;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Typed view of one raw search record. Only the fields the crate reads;
/// the cache keeps the raw record itself.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FetchedJob {
    #[serde(default)]
    pub job_id: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub employer_name: Option<String>,
    #[serde(default)]
    pub job_city: Option<String>,
    #[serde(default)]
    pub job_description: Option<Value>,
    #[serde(default)]
    pub job_apply_link: Option<String>,
    #[serde(default)]
    pub job_employment_type: Option<String>,
    #[serde(default)]
    pub job_posted_at_datetime_utc: Option<String>,
    #[serde(default)]
    pub salary_currency: Option<String>,
    #[serde(default)]
    pub min_base_salary: Option<f64>,
    #[serde(default)]
    pub max_base_salary: Option<f64>,
    #[serde(default)]
    pub job_min_salary: Option<f64>,
    #[serde(default)]
    pub job_max_salary: Option<f64>,
    #[serde(default)]
    pub min_additional_pay: Option<f64>,
    #[serde(default)]
    pub max_additional_pay: Option<f64>,
    #[serde(default)]
    pub job_salary_period: Option<String>,
}

impl FetchedJob {
    /// The description when the API sent a string, `None` for any other shape.
    pub fn description_text(&self) -> Option<&str> {
        self.job_description.as_ref().and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JobSummary {
    pub job_id: Option<String>,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub description: String,
    pub apply_link: String,
}

impl From<&FetchedJob> for JobSummary {
    fn from(job: &FetchedJob) -> Self {
        Self {
            job_id: job.job_id.clone(),
            title: job.job_title.clone(),
            company: job.employer_name.clone(),
            location: job.job_city.clone(),
            description: job
                .description_text()
                .map(super::summarize_description)
                .unwrap_or_default(),
            apply_link: job
                .job_apply_link
                .clone()
                .unwrap_or_else(|| "Not provided".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub employment_type: String,
    pub posted_at: String,
    pub apply_link: String,
    pub salary: String,
}

fn or_not_specified(value: Option<&str>) -> String {
    value.unwrap_or(NOT_SPECIFIED).to_string()
}

impl SavedJob {
    pub fn from_fetched(job: &FetchedJob, salary: String) -> Self {
        Self {
            title: or_not_specified(job.job_title.as_deref()),
            company: or_not_specified(job.employer_name.as_deref()),
            location: or_not_specified(job.job_city.as_deref()),
            description: or_not_specified(job.description_text()),
            employment_type: or_not_specified(job.job_employment_type.as_deref()),
            posted_at: or_not_specified(job.job_posted_at_datetime_utc.as_deref()),
            apply_link: or_not_specified(job.job_apply_link.as_deref()),
            salary,
        }
    }
}
