use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use backend_api::{create_router, GeneratorState, ObservationGenerator};

/// Generator that always answers with the same canned narrative.
struct FixedGenerator(&'static str);

#[async_trait]
impl ObservationGenerator for FixedGenerator {
    async fn generate(&self, _system_prompt: &str, _user_prompt: &str) -> anyhow::Result<String> {
        Ok(self.0.to_string())
    }
}

/// Generator that always fails, standing in for any upstream error.
struct FailingGenerator;

#[async_trait]
impl ObservationGenerator for FailingGenerator {
    async fn generate(&self, _system_prompt: &str, _user_prompt: &str) -> anyhow::Result<String> {
        Err(anyhow::anyhow!("quota exceeded for deployment"))
    }
}

/// Generator that records the conversation it was given.
struct CapturingGenerator {
    seen: Mutex<Option<(String, String)>>,
}

impl CapturingGenerator {
    fn new() -> Self {
        Self {
            seen: Mutex::new(None),
        }
    }
}

#[async_trait]
impl ObservationGenerator for CapturingGenerator {
    async fn generate(&self, system_prompt: &str, user_prompt: &str) -> anyhow::Result<String> {
        *self.seen.lock().unwrap() = Some((system_prompt.to_string(), user_prompt.to_string()));
        Ok("captured".to_string())
    }
}

fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../static")
}

fn app(generator: GeneratorState) -> Router {
    create_router(generator, static_dir())
}

fn sample_entry() -> Value {
    json!({
        "year": 1,
        "investment": 1000,
        "amcCost": 200,
        "revenue": 1500,
        "savings": 100,
        "totalRevenueSavings": 1600,
        "cumulativeTotalCost": 1200,
        "netProfitLoss": 400,
        "cumulativeProfitLoss": 400
    })
}

async fn post_observations(app: Router, payload: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/generate-ai-observations")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn test_valid_forecast_returns_observation() {
    let generator: GeneratorState = Some(Arc::new(FixedGenerator("ROI looks strong.")));
    let payload = json!({ "forecastData": [sample_entry()] });

    let (status, body) = post_observations(app(generator), payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["observation"], "ROI looks strong.");
}

#[tokio::test]
async fn test_observation_is_trimmed() {
    let generator: GeneratorState = Some(Arc::new(FixedGenerator("  ROI looks strong.\n\n")));
    let payload = json!({ "forecastData": [sample_entry()] });

    let (status, body) = post_observations(app(generator), payload).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["observation"], "ROI looks strong.");
}

#[tokio::test]
async fn test_empty_forecast_data_is_rejected() {
    let generator: GeneratorState = Some(Arc::new(FixedGenerator("unused")));
    let payload = json!({ "forecastData": [] });

    let (status, body) = post_observations(app(generator), payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No forecast data provided");
}

#[tokio::test]
async fn test_absent_forecast_data_is_rejected() {
    let generator: GeneratorState = Some(Arc::new(FixedGenerator("unused")));

    let (status, body) = post_observations(app(generator), json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No forecast data provided");
}

#[tokio::test]
async fn test_missing_key_names_the_key() {
    let generator: GeneratorState = Some(Arc::new(FixedGenerator("unused")));

    let mut broken = sample_entry();
    broken.as_object_mut().unwrap().remove("netProfitLoss");
    let payload = json!({ "forecastData": [sample_entry(), broken] });

    let (status, body) = post_observations(app(generator), payload).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required key: netProfitLoss");
}

#[tokio::test]
async fn test_upstream_failure_is_forwarded() {
    let generator: GeneratorState = Some(Arc::new(FailingGenerator));
    let payload = json!({ "forecastData": [sample_entry()] });

    let (status, body) = post_observations(app(generator), payload).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("OpenAI API error:"));
    assert!(message.contains("quota exceeded for deployment"));
}

#[tokio::test]
async fn test_uninitialized_client_is_a_server_error() {
    let payload = json!({ "forecastData": [sample_entry()] });

    let (status, body) = post_observations(app(None), payload).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Generation client not initialized");
}

#[tokio::test]
async fn test_prompt_carries_rendered_summary() {
    let capturing = Arc::new(CapturingGenerator::new());
    let generator: GeneratorState = Some(capturing.clone());
    let payload = json!({ "forecastData": [sample_entry()] });

    let (status, _) = post_observations(app(generator), payload).await;
    assert_eq!(status, StatusCode::OK);

    let (system, user) = capturing.seen.lock().unwrap().clone().unwrap();
    assert_eq!(system, "You are a financial analyst.");
    assert!(user.contains(
        "Year 1: Investment = $1000.00, AMC Cost = $200.00, Revenue = $1500.00, \
         Cost Savings = $100.00, Total Revenue & Savings = $1600.00, \
         Cumulative Cost = $1200.00, Net Profit/Loss = $400.00, \
         Cumulative Profit/Loss = $400.00"
    ));
    assert!(user.contains("#### **Financial Data:**"));
}

#[tokio::test]
async fn test_health_is_independent_of_generator_state() {
    let response = app(None)
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_root_and_named_path_serve_entry_page() {
    for uri in ["/", "/roi-calculator.html"] {
        let response = app(None)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK, "uri: {uri}");
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("ROI"), "uri: {uri}");
    }
}
