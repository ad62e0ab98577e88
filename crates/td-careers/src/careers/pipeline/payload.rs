use chrono::{DateTime, Local, SecondsFormat, Utc};
use serde::Serialize;

use super::summary::{freelancer_summary, fulltime_summary};
use crate::careers::form::{merge_portfolio_urls, FreelancerForm, FullTimeForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationType {
    FullTime,
    Freelancer,
}

impl ApplicationType {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationType::FullTime => "fulltime",
            ApplicationType::Freelancer => "freelancer",
        }
    }
}

/// JSON body posted for a full-time application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullTimePayload {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin_url: String,
    pub position: String,
    pub employment_type: String,
    pub experience: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub how_did_you_hear: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_start_date: Option<String>,
    pub expected_salary: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_message: Option<String>,
    pub application_type: ApplicationType,
    pub portfolio_urls: Vec<String>,
    /// Data URI of the resume, or empty when none is attached.
    pub resume_file: String,
    pub submitted_at: String,
    pub summary: String,
}

impl FullTimePayload {
    /// Assemble the body from an already validated form.
    pub fn build(form: &FullTimeForm, submitted_at: DateTime<Utc>) -> Self {
        let primary = Some(form.linkedin_url.as_str());
        let portfolio_urls = merge_portfolio_urls(primary, &form.links);
        let summary = fulltime_summary(form, &portfolio_urls, &submitted_at.with_timezone(&Local));

        Self {
            full_name: form.full_name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            linkedin_url: form.linkedin_url.clone(),
            position: form.position.clone(),
            employment_type: form.employment_type.clone(),
            experience: form.experience.clone(),
            how_did_you_hear: form.how_did_you_hear.clone(),
            available_start_date: form.available_start_date.clone(),
            expected_salary: form.expected_salary.amount().ok().flatten(),
            salary_type: form.salary_type.clone(),
            additional_message: form.additional_message.clone(),
            application_type: ApplicationType::FullTime,
            portfolio_urls,
            resume_file: form
                .resume()
                .map(|resume| resume.to_data_uri())
                .unwrap_or_default(),
            submitted_at: iso_timestamp(submitted_at),
            summary,
        }
    }
}

/// JSON body posted for a freelancer application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FreelancerPayload {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub portfolio_url: String,
    pub position: String,
    pub hourly_rate: Option<u64>,
    pub hours_per_week: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_message: Option<String>,
    pub application_type: ApplicationType,
    pub portfolio_urls: Vec<String>,
    pub submitted_at: String,
    pub summary: String,
}

impl FreelancerPayload {
    pub fn build(form: &FreelancerForm, submitted_at: DateTime<Utc>) -> Self {
        let primary = Some(form.portfolio_url.as_str());
        let portfolio_urls = merge_portfolio_urls(primary, &form.links);
        let summary =
            freelancer_summary(form, &portfolio_urls, &submitted_at.with_timezone(&Local));

        Self {
            full_name: form.full_name.clone(),
            email: form.email.clone(),
            phone: form.phone.clone(),
            portfolio_url: form.portfolio_url.clone(),
            position: form.position.clone(),
            hourly_rate: form.hourly_rate.amount().ok().flatten(),
            hours_per_week: form.hours_per_week.clone(),
            additional_message: form.additional_message.clone(),
            application_type: ApplicationType::Freelancer,
            portfolio_urls,
            submitted_at: iso_timestamp(submitted_at),
            summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SubmissionPayload {
    FullTime(FullTimePayload),
    Freelancer(FreelancerPayload),
}

impl SubmissionPayload {
    pub fn application_type(&self) -> ApplicationType {
        match self {
            SubmissionPayload::FullTime(payload) => payload.application_type,
            SubmissionPayload::Freelancer(payload) => payload.application_type,
        }
    }

    pub fn summary(&self) -> &str {
        match self {
            SubmissionPayload::FullTime(payload) => &payload.summary,
            SubmissionPayload::Freelancer(payload) => &payload.summary,
        }
    }
}

/// `2026-03-09T08:05:07.000Z`
fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
