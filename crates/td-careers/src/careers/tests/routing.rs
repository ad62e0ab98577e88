use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::careers::router::careers_router;

fn application_body() -> Value {
    json!({
        "fullName": "Nguyễn Văn An",
        "email": "an.nguyen@example.com",
        "phone": "0901234567",
        "linkedinUrl": "https://linkedin.com/in/an-nguyen",
        "position": "Recruiter",
        "employmentType": "Full-time",
        "experience": "3-5 years",
        "expectedSalary": "15.000.000đ",
        "salaryType": "Gross",
        "links": ["https://an.dev", ""]
    })
}

fn post_json(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/v1/applications")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

#[tokio::test]
async fn landing_returns_fallback_when_directory_is_down() {
    let nocodb = FakeNocoDb::default()
        .with_table(JOBS_TABLE, TableReply::Status(StatusCode::BAD_GATEWAY))
        .with_table(COMPANY_TABLE, company_rows());
    let page = page_with(nocodb.start().await, Arc::new(MemoryWebhook::default()));

    let response = careers_router(Arc::new(page))
        .oneshot(get("/api/v1/landing"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json_body(response).await;
    assert_eq!(body["positions"]["source"], "fallback");
    assert_eq!(body["positions"]["titles"].as_array().map(Vec::len), Some(12));
    assert_eq!(body["company"]["name"], "TD Consulting");
    assert_eq!(body["description"]["kind"], "placeholder");
    assert_eq!(body["options"]["salary_types"], json!(["Gross", "Net", "Base + Commission"]));
}

#[tokio::test]
async fn description_endpoint_matches_exact_titles() {
    let nocodb = FakeNocoDb::default().with_table(JOBS_TABLE, job_rows());
    let router = careers_router(Arc::new(page_with(
        nocodb.start().await,
        Arc::new(MemoryWebhook::default()),
    )));

    let response = router
        .clone()
        .oneshot(get("/api/v1/positions/description?title=3D%20Artist"))
        .await
        .expect("response");
    let body = read_json_body(response).await;
    assert_eq!(body["kind"], "position");
    assert_eq!(body["description"], "## Role\nModel props.");

    let response = router
        .oneshot(get("/api/v1/positions/description"))
        .await
        .expect("response");
    let body = read_json_body(response).await;
    assert_eq!(body["title"], "Select a Position");
}

#[tokio::test]
async fn valid_application_is_accepted() {
    let nocodb = FakeNocoDb::default().with_table(JOBS_TABLE, job_rows());
    let sink = Arc::new(MemoryWebhook::default());
    let router = careers_router(Arc::new(page_with(nocodb.start().await, sink.clone())));

    let response = router
        .oneshot(post_json(&application_body()))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = read_json_body(response).await;
    assert_eq!(body["applicationType"], "fulltime");

    let payloads = sink.payloads();
    assert_eq!(payloads.len(), 1);
    assert_eq!(payloads[0]["expectedSalary"], json!(15_000_000));
    assert_eq!(
        payloads[0]["portfolioUrls"],
        json!(["https://linkedin.com/in/an-nguyen", "https://an.dev"])
    );
}

#[tokio::test]
async fn invalid_application_lists_field_errors() {
    let nocodb = FakeNocoDb::default().with_table(JOBS_TABLE, job_rows());
    let sink = Arc::new(MemoryWebhook::default());
    let router = careers_router(Arc::new(page_with(nocodb.start().await, sink.clone())));

    let mut body = application_body();
    body["phone"] = json!("123");
    body["position"] = json!("Astronaut");

    let response = router.oneshot(post_json(&body)).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(
        body["errors"],
        json!([
            { "field": "phone", "message": "Please enter a valid phone number" },
            { "field": "position", "message": "Please select a position" }
        ])
    );
    assert!(sink.payloads().is_empty());
}

#[tokio::test]
async fn rejected_resume_returns_notice() {
    let nocodb = FakeNocoDb::default().with_table(JOBS_TABLE, job_rows());
    let sink = Arc::new(MemoryWebhook::default());
    let router = careers_router(Arc::new(page_with(nocodb.start().await, sink.clone())));

    let mut body = application_body();
    body["resume"] = json!({ "fileName": "portrait.png", "content": BASE64.encode(b"png") });

    let response = router.oneshot(post_json(&body)).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["notice"]["title"], "Invalid file type");
    assert_eq!(body["notice"]["variant"], "destructive");
    assert!(sink.payloads().is_empty());
}

#[tokio::test]
async fn delivery_failure_maps_to_bad_gateway() {
    let nocodb = FakeNocoDb::default().with_table(JOBS_TABLE, job_rows());
    let router = careers_router(Arc::new(page_with(
        nocodb.start().await,
        Arc::new(MemoryWebhook::failing(503)),
    )));

    let response = router
        .oneshot(post_json(&application_body()))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = read_json_body(response).await;
    assert_eq!(body["notice"]["title"], "Submission Failed");
    assert_eq!(
        body["notice"]["description"],
        "Unable to submit your application. Please try again."
    );
}

fn with_resume(file_name: &str, size: usize) -> Value {
    let mut body = application_body();
    body["resume"] = json!({
        "fileName": file_name,
        "content": BASE64.encode(vec![b'%'; size]),
    });
    body
}

#[tokio::test]
async fn multi_megabyte_resume_is_delivered() {
    let nocodb = FakeNocoDb::default().with_table(JOBS_TABLE, job_rows());
    let sink = Arc::new(MemoryWebhook::default());
    let router = careers_router(Arc::new(page_with(nocodb.start().await, sink.clone())));

    let response = router
        .oneshot(post_json(&with_resume("An_CV.pdf", 4 * 1024 * 1024)))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let payloads = sink.payloads();
    assert_eq!(payloads.len(), 1);
    let resume = payloads[0]["resumeFile"].as_str().expect("resume string");
    assert!(resume.starts_with("data:application/pdf;base64,JSUl"));
    assert_eq!(
        resume.len(),
        "data:application/pdf;base64,".len() + (4 * 1024 * 1024usize).div_ceil(3) * 4
    );
}

#[tokio::test]
async fn eleven_megabyte_resume_gets_the_size_notice() {
    let nocodb = FakeNocoDb::default().with_table(JOBS_TABLE, job_rows());
    let sink = Arc::new(MemoryWebhook::default());
    let router = careers_router(Arc::new(page_with(nocodb.start().await, sink.clone())));

    let response = router
        .oneshot(post_json(&with_resume("An_CV.pdf", 11 * 1024 * 1024)))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["notice"]["title"], "File too large");
    assert_eq!(body["notice"]["description"], "Maximum file size is 10MB");
    assert!(sink.payloads().is_empty());
}

#[tokio::test]
async fn body_over_the_intake_limit_gets_the_size_notice() {
    let nocodb = FakeNocoDb::default().with_table(JOBS_TABLE, job_rows());
    let sink = Arc::new(MemoryWebhook::default());
    let router = careers_router(Arc::new(page_with(nocodb.start().await, sink.clone())));

    let response = router
        .oneshot(post_json(&with_resume("An_CV.pdf", 13 * 1024 * 1024)))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert_eq!(body["notice"]["title"], "File too large");
    assert!(sink.payloads().is_empty());
}
