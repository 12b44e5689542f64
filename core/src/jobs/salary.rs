use super::{FetchedJob, NOT_SPECIFIED};

fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Picks the display salary for a job.
///
/// A non-empty override wins. Otherwise the structured base and additional pay
/// fields are combined when currency, minimum and maximum base are all set.
pub fn resolve_salary(salary_override: Option<&str>, job: &FetchedJob) -> String {
    if let Some(salary) = non_empty(salary_override) {
        return salary.to_string();
    }

    structured_salary(job).unwrap_or_else(|| NOT_SPECIFIED.to_string())
}

fn structured_salary(job: &FetchedJob) -> Option<String> {
    let currency = non_empty(job.salary_currency.as_deref())?;
    let min_base = non_zero(job.min_base_salary).or(non_zero(job.job_min_salary))?;
    let max_base = non_zero(job.max_base_salary).or(non_zero(job.job_max_salary))?;

    let total_min = (min_base + job.min_additional_pay.unwrap_or(0.0)).trunc() as i64;
    let total_max = (max_base + job.max_additional_pay.unwrap_or(0.0)).trunc() as i64;

    let per = non_empty(job.job_salary_period.as_deref())
        .map(|period| format!(" per {}", period.to_lowercase()))
        .unwrap_or_default();

    Some(format!(
        "{currency} {} – {}{per}",
        format_thousands(total_min),
        format_thousands(total_max)
    ))
}

/// Formats an integer with comma thousands separators.
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
