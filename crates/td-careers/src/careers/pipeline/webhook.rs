use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use super::payload::SubmissionPayload;
use crate::careers::notice::Notice;
use crate::config::WebhookConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub const SUBMISSION_FAILED: Notice = Notice::destructive(
    "Submission Failed",
    "Unable to submit your application. Please try again.",
);

/// Destination for finished applications.
pub trait WebhookSink: Send + Sync + 'static {
    fn deliver(
        &self,
        payload: &SubmissionPayload,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("webhook responded with status {status}")]
    Status { status: u16 },
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl DeliveryError {
    pub fn notice(&self) -> Notice {
        SUBMISSION_FAILED
    }
}

/// Posts the payload as JSON, without authentication.
#[derive(Debug, Clone)]
pub struct HttpWebhook {
    http: Client,
    url: Url,
}

impl HttpWebhook {
    pub fn new(url: Url) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self::with_http(http, url)
    }

    pub fn with_http(http: Client, url: Url) -> Self {
        Self { http, url }
    }

    pub fn from_config(config: &WebhookConfig) -> Self {
        Self::new(config.url.clone())
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl WebhookSink for HttpWebhook {
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<(), DeliveryError> {
        let response = self.http.post(self.url.clone()).json(payload).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(DeliveryError::Status {
                status: status.as_u16(),
            })
        }
    }
}
