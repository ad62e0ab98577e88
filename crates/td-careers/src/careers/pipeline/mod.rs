//! Validate, summarise and deliver an application to the webhook.

pub mod payload;
pub mod summary;
pub mod webhook;

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::careers::form::{FreelancerForm, FullTimeForm, PositionOptions, ValidationErrors};
use crate::careers::notice::Notice;

pub use payload::{ApplicationType, FreelancerPayload, FullTimePayload, SubmissionPayload};
pub use summary::{freelancer_summary, fulltime_summary};
pub use webhook::{DeliveryError, HttpWebhook, WebhookSink, SUBMISSION_FAILED};

/// Where a form is in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed { retryable: bool },
}

impl SubmissionState {
    /// The submit control is disabled while a request is in flight and once
    /// the application went through.
    pub fn can_submit(self) -> bool {
        !matches!(
            self,
            SubmissionState::Validating | SubmissionState::Submitting | SubmissionState::Succeeded
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error("a submission is already in flight")]
    InFlight,
    #[error("this application was already submitted")]
    AlreadySubmitted,
    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

impl SubmissionError {
    /// Toast for failures that are not shown inline.
    pub fn notice(&self) -> Option<Notice> {
        match self {
            SubmissionError::Delivery(error) => Some(error.notice()),
            SubmissionError::Validation(_)
            | SubmissionError::InFlight
            | SubmissionError::AlreadySubmitted => None,
        }
    }
}

/// Outcome of a delivered application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub application_type: ApplicationType,
    pub submitted_at: DateTime<Utc>,
    pub summary: String,
}

/// One submit cycle per form. A single POST per attempt; failures are left
/// for the applicant to retry.
pub struct SubmissionPipeline<W> {
    sink: Arc<W>,
    state: Mutex<SubmissionState>,
}

impl<W> SubmissionPipeline<W>
where
    W: WebhookSink,
{
    pub fn new(sink: Arc<W>) -> Self {
        Self {
            sink,
            state: Mutex::new(SubmissionState::Idle),
        }
    }

    pub fn sink(&self) -> &Arc<W> {
        &self.sink
    }

    pub fn state(&self) -> SubmissionState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn submit_full_time(
        &self,
        form: &FullTimeForm,
        positions: &PositionOptions,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        self.begin()?;
        if let Err(errors) = form.validate(positions) {
            self.set_state(SubmissionState::Idle);
            return Err(errors.into());
        }
        self.set_state(SubmissionState::Submitting);

        let submitted_at = Utc::now();
        let payload = SubmissionPayload::FullTime(FullTimePayload::build(form, submitted_at));
        self.deliver(payload, submitted_at).await
    }

    pub async fn submit_freelancer(
        &self,
        form: &FreelancerForm,
        positions: &PositionOptions,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        self.begin()?;
        if let Err(errors) = form.validate(positions) {
            self.set_state(SubmissionState::Idle);
            return Err(errors.into());
        }
        self.set_state(SubmissionState::Submitting);

        let submitted_at = Utc::now();
        let payload = SubmissionPayload::Freelancer(FreelancerPayload::build(form, submitted_at));
        self.deliver(payload, submitted_at).await
    }

    /// Back to `Idle`, as after "submit another". Also re-arms a pipeline
    /// whose application already went through.
    pub fn reset(&self) {
        self.set_state(SubmissionState::Idle);
    }

    fn begin(&self) -> Result<(), SubmissionError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        match *state {
            SubmissionState::Validating | SubmissionState::Submitting => {
                Err(SubmissionError::InFlight)
            }
            SubmissionState::Succeeded => Err(SubmissionError::AlreadySubmitted),
            SubmissionState::Idle | SubmissionState::Failed { .. } => {
                *state = SubmissionState::Validating;
                Ok(())
            }
        }
    }

    fn set_state(&self, next: SubmissionState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }

    async fn deliver(
        &self,
        payload: SubmissionPayload,
        submitted_at: DateTime<Utc>,
    ) -> Result<SubmissionReceipt, SubmissionError> {
        let application_type = payload.application_type();
        let _abandoned = AbandonedDelivery(&self.state);
        match self.sink.deliver(&payload).await {
            Ok(()) => {
                self.set_state(SubmissionState::Succeeded);
                info!(
                    application_type = application_type.label(),
                    "application delivered"
                );
                Ok(SubmissionReceipt {
                    application_type,
                    submitted_at,
                    summary: payload.summary().to_string(),
                })
            }
            Err(error) => {
                self.set_state(SubmissionState::Failed { retryable: true });
                warn!(
                    application_type = application_type.label(),
                    error = %error,
                    "application delivery failed"
                );
                Err(error.into())
            }
        }
    }
}

/// Marks a delivery whose future was dropped mid-request as failed, so the
/// form can be submitted again.
struct AbandonedDelivery<'a>(&'a Mutex<SubmissionState>);

impl Drop for AbandonedDelivery<'_> {
    fn drop(&mut self) {
        let mut state = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        if *state == SubmissionState::Submitting {
            *state = SubmissionState::Failed { retryable: true };
        }
    }
}
