//! Instruction templates offered to the host agent.

use crate::traits::{Prompt, PromptArgument};
use anyhow::{Context, Result, anyhow};
use std::collections::HashMap;

const DEFAULT_NUM_JOBS: usize = 5;

pub fn builtin_prompts() -> Vec<Box<dyn Prompt>> {
    vec![
        Box::new(MarketAnalysisPrompt),
        Box::new(JobRecommenderPrompt),
        Box::new(MatchReportPrompt),
    ]
}

fn required<'a>(args: &'a HashMap<String, String>, name: &str) -> Result<&'a str> {
    args.get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("Missing required argument '{}'", name))
}

pub struct MarketAnalysisPrompt;

impl Prompt for MarketAnalysisPrompt {
    fn name(&self) -> &str {
        "analyze_job_market"
    }

    fn description(&self) -> &str {
        "Analyze the job market for the top jobs for a role in a location"
    }

    fn arguments(&self) -> Vec<PromptArgument> {
        vec![
            PromptArgument::required("role", "Role to analyze"),
            PromptArgument::required("location", "Location to analyze"),
            PromptArgument::optional("num_jobs", "Number of jobs to review (default: 5)"),
        ]
    }

    fn render(&self, args: &HashMap<String, String>) -> Result<String> {
        let role = required(args, "role")?;
        let location = required(args, "location")?;
        let num_jobs = match args.get("num_jobs") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("num_jobs must be a positive integer, got '{raw}'"))?,
            None => DEFAULT_NUM_JOBS,
        };

        Ok(format!(
            "Analyze the job market for top {num_jobs} jobs for '{role}' in '{location}'.

Steps:
1. Run job search mcp tool with suitable roles and locations.
2. Review fields like title, company, type, and description.
3. Summarize:
   - Most common roles
   - Repeated skills or keywords
   - Salary trends (if any)
   - Remote vs onsite distribution

Structure insights clearly in markdown format."
        ))
    }
}

pub struct JobRecommenderPrompt;

impl Prompt for JobRecommenderPrompt {
    fn name(&self) -> &str {
        "personalized_job_recommender"
    }

    fn description(&self) -> &str {
        "Use the resume to extract key skills, interests, and preferred job types, then recommend jobs"
    }

    fn render(&self, _args: &HashMap<String, String>) -> Result<String> {
        Ok("Use the resume to extract key skills, interests, and preferred job types.
Then:
1. Call job search mcp tool with suitable roles and locations.
2. Review descriptions and recommend jobs.
3. Optionally call save job mcp tool on top matches.

Output sections:
- Top Matches
- Stretch Roles
- Company Highlights
"
        .to_string())
    }
}

pub struct MatchReportPrompt;

impl Prompt for MatchReportPrompt {
    fn name(&self) -> &str {
        "create_match_report"
    }

    fn description(&self) -> &str {
        "Summarize how well the resume matches the saved jobs"
    }

    fn render(&self, _args: &HashMap<String, String>) -> Result<String> {
        Ok("Given the attached jobs data and resume, create a concise and accurate summary of how well the resume matches the jobs.

Output sections:
- Job Summary
- Resume Summary
- Job Match Summary
"
        .to_string())
    }
}
