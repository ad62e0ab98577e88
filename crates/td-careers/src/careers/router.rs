use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use super::form::{
    CurrencyInput, FileRejected, FullTimeForm, PositionOptions, SelectionSource, StaticOptions,
    SupplementaryLinks, MAX_RESUME_BYTES,
};
use super::pipeline::WebhookSink;
use super::shell::{CompanyPanel, DescriptionView, LandingPage};
use crate::error::AppError;

/// Body limit for the application intake. Base64 grows a resume by a third;
/// the remaining headroom covers the form fields and lets slightly oversized
/// files reach the resume size check.
pub const MAX_APPLICATION_BYTES: usize = (MAX_RESUME_BYTES as usize) * 8 / 5;

/// Full-time application as posted by the page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin_url: String,
    pub position: String,
    pub employment_type: String,
    pub experience: String,
    pub how_did_you_hear: Option<String>,
    pub available_start_date: Option<String>,
    /// As typed; only the digits are kept.
    pub expected_salary: Option<String>,
    pub salary_type: Option<String>,
    pub additional_message: Option<String>,
    pub links: Vec<String>,
    pub resume: Option<ResumeUpload>,
}

/// Resume sent inline with base64 content.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeUpload {
    pub file_name: String,
    pub content: String,
}

impl ApplicationRequest {
    pub fn into_form(self) -> Result<FullTimeForm, FileRejected> {
        let mut form = FullTimeForm::new();
        form.full_name = self.full_name;
        form.email = self.email;
        form.phone = self.phone;
        form.linkedin_url = self.linkedin_url;
        form.position = self.position;
        form.employment_type = self.employment_type;
        form.experience = self.experience;
        form.how_did_you_hear = self.how_did_you_hear;
        form.available_start_date = self.available_start_date;
        form.expected_salary =
            CurrencyInput::from_typed(self.expected_salary.as_deref().unwrap_or_default());
        form.salary_type = self.salary_type;
        form.additional_message = self.additional_message;
        form.links = SupplementaryLinks::from_urls(self.links);

        if let Some(upload) = self.resume {
            let content =
                BASE64
                    .decode(upload.content.as_bytes())
                    .map_err(|err| FileRejected::Unreadable {
                        file_name: upload.file_name.clone(),
                        reason: err.to_string(),
                    })?;
            form.attach_resume(upload.file_name, content, SelectionSource::FilePicker)?;
        }

        Ok(form)
    }
}

#[derive(Debug, Serialize)]
pub struct LandingResponse {
    pub positions: PositionOptions,
    pub company: Option<CompanyPanel>,
    pub description: DescriptionView,
    pub options: StaticOptions,
}

#[derive(Debug, Deserialize)]
pub struct DescriptionQuery {
    #[serde(default)]
    pub title: String,
}

/// Router exposing the landing page data and the full-time application intake.
pub fn careers_router<W>(page: Arc<LandingPage<W>>) -> Router
where
    W: WebhookSink,
{
    Router::new()
        .route("/api/v1/landing", get(landing_handler::<W>))
        .route(
            "/api/v1/positions/description",
            get(description_handler::<W>),
        )
        .route(
            "/api/v1/applications",
            post(submit_handler::<W>).layer(DefaultBodyLimit::max(MAX_APPLICATION_BYTES)),
        )
        .with_state(page)
}

pub(crate) async fn landing_handler<W>(State(page): State<Arc<LandingPage<W>>>) -> Response
where
    W: WebhookSink,
{
    let body = LandingResponse {
        positions: page.position_options().await,
        company: page.company_panel().await,
        description: DescriptionView::placeholder(),
        options: StaticOptions::get(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub(crate) async fn description_handler<W>(
    State(page): State<Arc<LandingPage<W>>>,
    Query(query): Query<DescriptionQuery>,
) -> Response
where
    W: WebhookSink,
{
    let view = page.description_for(&query.title).await;
    (StatusCode::OK, Json(view)).into_response()
}

pub(crate) async fn submit_handler<W>(
    State(page): State<Arc<LandingPage<W>>>,
    request: Result<Json<ApplicationRequest>, JsonRejection>,
) -> Result<Response, AppError>
where
    W: WebhookSink,
{
    let Json(request) = request?;
    let form = request.into_form()?;
    let receipt = page.deliver_application(&form).await?;
    Ok((StatusCode::ACCEPTED, Json(receipt)).into_response())
}
