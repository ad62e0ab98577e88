use std::collections::HashMap;
use std::sync::atomic::{AtomicU16, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::Notify;
use url::Url;

use crate::careers::form::{FullTimeForm, SupplementaryLinks};
use crate::careers::pipeline::{DeliveryError, SubmissionPayload, WebhookSink};
use crate::careers::remote::NocoDbClient;
use crate::careers::shell::{LandingPage, LandingSources};

pub(super) const JOBS_TABLE: &str = "jobs-table";
pub(super) const COMPANY_TABLE: &str = "company-table";
pub(super) const TOKEN: &str = "test-token";

pub(super) async fn serve(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test listener");
    let addr = listener.local_addr().expect("listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("test server");
    });
    Url::parse(&format!("http://{addr}/")).expect("test url")
}

/// Canned reply for one NocoDB table.
#[derive(Clone)]
pub(super) enum TableReply {
    Rows(Value),
    Status(StatusCode),
}

#[derive(Clone, Default)]
pub(super) struct FakeNocoDb {
    replies: Arc<Mutex<HashMap<String, TableReply>>>,
    hits: Arc<Mutex<HashMap<String, usize>>>,
    tokens: Arc<Mutex<Vec<String>>>,
}

impl FakeNocoDb {
    pub(super) fn with_table(self, table: &str, reply: TableReply) -> Self {
        self.replies
            .lock()
            .expect("replies mutex poisoned")
            .insert(table.to_string(), reply);
        self
    }

    pub(super) fn set_reply(&self, table: &str, reply: TableReply) {
        self.replies
            .lock()
            .expect("replies mutex poisoned")
            .insert(table.to_string(), reply);
    }

    pub(super) fn hits(&self, table: &str) -> usize {
        self.hits
            .lock()
            .expect("hits mutex poisoned")
            .get(table)
            .copied()
            .unwrap_or(0)
    }

    pub(super) fn tokens(&self) -> Vec<String> {
        self.tokens.lock().expect("tokens mutex poisoned").clone()
    }

    pub(super) async fn start(&self) -> Url {
        let router = Router::new()
            .route("/api/v2/tables/:table/records", get(records_handler))
            .with_state(self.clone());
        serve(router).await
    }
}

async fn records_handler(
    State(fake): State<FakeNocoDb>,
    Path(table): Path<String>,
    headers: HeaderMap,
) -> Response {
    *fake
        .hits
        .lock()
        .expect("hits mutex poisoned")
        .entry(table.clone())
        .or_default() += 1;
    if let Some(token) = headers.get("xc-token").and_then(|value| value.to_str().ok()) {
        fake.tokens
            .lock()
            .expect("tokens mutex poisoned")
            .push(token.to_string());
    }

    let reply = fake
        .replies
        .lock()
        .expect("replies mutex poisoned")
        .get(&table)
        .cloned();
    match reply {
        Some(TableReply::Rows(rows)) => {
            Json(json!({ "list": rows, "pageInfo": { "totalRows": 1, "page": 1 } }))
                .into_response()
        }
        Some(TableReply::Status(status)) => status.into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

pub(super) fn job_rows() -> TableReply {
    TableReply::Rows(json!([
        { "Id": 1, "job_tittle": "3D Artist", "description": "## Role\nModel props." },
        { "Id": 2, "job_tittle": "Recruiter", "description": "Source candidates." },
        { "Id": 3, "job_tittle": null, "description": null },
    ]))
}

pub(super) fn company_rows() -> TableReply {
    TableReply::Rows(json!([{
        "Id": 1,
        "Name": "TD Consulting",
        "Phone": "+84 28 1234 5678",
        "Email": "hr@tdconsulting.vn",
        "Address": "District 1, Ho Chi Minh City",
        "Introduce": "Game art outsourcing.",
        "Website": "https://tdconsulting.vn",
        "Behance": "https://behance.net/td",
        "Facebook": "",
        "Artstation": null,
        "LinkedIn": "https://linkedin.com/company/td"
    }]))
}

pub(super) fn sources(base_url: Url) -> LandingSources {
    LandingSources {
        client: NocoDbClient::new(base_url, TOKEN),
        jobs_table_id: JOBS_TABLE.to_string(),
        company_table_id: COMPANY_TABLE.to_string(),
        retry_delay: Duration::from_millis(5),
    }
}

/// In-memory webhook capturing every payload.
#[derive(Default)]
pub(super) struct MemoryWebhook {
    payloads: Mutex<Vec<Value>>,
    fail_with: Option<u16>,
}

impl MemoryWebhook {
    pub(super) fn failing(status: u16) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::default()
        }
    }

    pub(super) fn payloads(&self) -> Vec<Value> {
        self.payloads.lock().expect("payload mutex poisoned").clone()
    }
}

impl WebhookSink for MemoryWebhook {
    async fn deliver(&self, payload: &SubmissionPayload) -> Result<(), DeliveryError> {
        let value = serde_json::to_value(payload).expect("payload serializes");
        self.payloads
            .lock()
            .expect("payload mutex poisoned")
            .push(value);
        match self.fail_with {
            Some(status) => Err(DeliveryError::Status { status }),
            None => Ok(()),
        }
    }
}

/// Webhook that holds each delivery until released.
#[derive(Default)]
pub(super) struct GatedWebhook {
    pub(super) entered: Notify,
    pub(super) release: Notify,
}

impl WebhookSink for GatedWebhook {
    async fn deliver(&self, _payload: &SubmissionPayload) -> Result<(), DeliveryError> {
        self.entered.notify_one();
        self.release.notified().await;
        Ok(())
    }
}

/// HTTP webhook double answering with a configurable status.
#[derive(Clone)]
pub(super) struct FakeWebhookServer {
    status: Arc<AtomicU16>,
    calls: Arc<AtomicUsize>,
    bodies: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

impl FakeWebhookServer {
    pub(super) fn new(status: u16) -> Self {
        Self {
            status: Arc::new(AtomicU16::new(status)),
            calls: Arc::new(AtomicUsize::new(0)),
            bodies: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(super) fn set_status(&self, status: u16) {
        self.status.store(status, Ordering::SeqCst);
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Content type and JSON body of each request.
    pub(super) fn bodies(&self) -> Vec<(Option<String>, Value)> {
        self.bodies.lock().expect("bodies mutex poisoned").clone()
    }

    pub(super) async fn start(&self) -> Url {
        let router = Router::new()
            .route("/webhook/apply", post(webhook_handler))
            .with_state(self.clone());
        let base = serve(router).await;
        base.join("webhook/apply").expect("webhook url")
    }
}

async fn webhook_handler(
    State(fake): State<FakeWebhookServer>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    fake.calls.fetch_add(1, Ordering::SeqCst);
    let content_type = headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    fake.bodies
        .lock()
        .expect("bodies mutex poisoned")
        .push((content_type, body));
    StatusCode::from_u16(fake.status.load(Ordering::SeqCst)).unwrap_or(StatusCode::OK)
}

pub(super) fn valid_form() -> FullTimeForm {
    let mut form = FullTimeForm::new();
    form.full_name = "Nguyễn Văn An".to_string();
    form.email = "an.nguyen@example.com".to_string();
    form.phone = "0901234567".to_string();
    form.linkedin_url = "https://linkedin.com/in/an-nguyen".to_string();
    form.position = "Recruiter".to_string();
    form.employment_type = "Full-time".to_string();
    form.experience = "3-5 years".to_string();
    form.links = SupplementaryLinks::from_urls(["https://an.dev", "", "https://github.com/an"]);
    form
}

pub(super) fn page_with<W: WebhookSink>(base_url: Url, sink: Arc<W>) -> LandingPage<W> {
    LandingPage::new(sources(base_url), sink)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
