use crate::careers::form::{FileRejected, FILE_TOO_LARGE};
use crate::careers::pipeline::SubmissionError;
use crate::careers::remote::FetchError;
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Fetch(FetchError),
    Submission(SubmissionError),
    Resume(FileRejected),
    Request(JsonRejection),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Fetch(err) => write!(f, "remote data error: {}", err),
            AppError::Submission(err) => write!(f, "submission error: {}", err),
            AppError::Resume(err) => write!(f, "resume rejected: {}", err),
            AppError::Request(err) => write!(f, "invalid request: {}", err.body_text()),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Fetch(err) => Some(err),
            AppError::Submission(err) => Some(err),
            AppError::Resume(err) => Some(err),
            AppError::Request(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, body) = match self {
            AppError::Submission(SubmissionError::Validation(errors)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": message, "errors": errors }),
            ),
            AppError::Submission(SubmissionError::InFlight)
            | AppError::Submission(SubmissionError::AlreadySubmitted) => {
                (StatusCode::CONFLICT, json!({ "error": message }))
            }
            AppError::Submission(SubmissionError::Delivery(err)) => (
                StatusCode::BAD_GATEWAY,
                json!({ "error": message, "notice": err.notice() }),
            ),
            AppError::Resume(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": message, "notice": err.notice() }),
            ),
            AppError::Request(rejection)
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE =>
            {
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    json!({ "error": message, "notice": FILE_TOO_LARGE }),
                )
            }
            AppError::Request(rejection) => (rejection.status(), json!({ "error": message })),
            AppError::Fetch(_) => (StatusCode::BAD_GATEWAY, json!({ "error": message })),
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": message }))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<FetchError> for AppError {
    fn from(value: FetchError) -> Self {
        Self::Fetch(value)
    }
}

impl From<SubmissionError> for AppError {
    fn from(value: SubmissionError) -> Self {
        Self::Submission(value)
    }
}

impl From<FileRejected> for AppError {
    fn from(value: FileRejected) -> Self {
        Self::Resume(value)
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self::Request(value)
    }
}
