use api::{create_router, AppState, PredictionResponse};
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use feature_engine::{DefaultStrategy, FeatureSchema, VectorAssembler};
use inference_engine::{InferenceEngine, MockReply};
use metrics_exporter_prometheus::PrometheusBuilder;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn state_with(reply: MockReply, strategy: DefaultStrategy) -> Arc<AppState> {
    let schema = Arc::new(FeatureSchema::breast_cancer().unwrap());
    let assembler = VectorAssembler::new(schema, strategy);
    let engine = InferenceEngine::mock(reply, "prediction");
    let metrics = PrometheusBuilder::new().build_recorder().handle();
    Arc::new(AppState::new(assembler, engine, metrics))
}

fn fixed_state() -> Arc<AppState> {
    state_with(MockReply::Fixed("0.5".to_string()), DefaultStrategy::Median)
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: Method, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri("/predict/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn fields(payload: &str) -> Vec<String> {
    payload
        .trim_end_matches('\n')
        .split(',')
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn test_status() {
    let (status, body) = send(create_router(fixed_state()), get("/status")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"code": "200"}));
}

#[tokio::test]
async fn test_predict_from_query_fills_defaults() {
    let state = fixed_state();
    let (status, body) = send(
        create_router(state.clone()),
        get("/predict?mean_texture=10.38&mean_radius=17.99"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"prediction": "0.5"}));

    let payloads = state.engine.received_payloads();
    assert_eq!(payloads.len(), 1);
    assert!(payloads[0].ends_with('\n'));

    let values = fields(&payloads[0]);
    assert_eq!(values.len(), 30);
    assert_eq!(values[0], "17.99");
    assert_eq!(values[1], "10.38");
    assert_eq!(values[2], "85.98");
    assert_eq!(values[29], "0.08006");
}

#[tokio::test]
async fn test_predict_without_parameters_is_rejected() {
    let state = fixed_state();
    let (status, body) = send(create_router(state.clone()), get("/predict")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing query parameters");
    assert!(state.engine.received_payloads().is_empty());
}

#[tokio::test]
async fn test_repeated_query_parameter_uses_first() {
    let state = fixed_state();
    let (status, _) = send(
        create_router(state.clone()),
        get("/predict?mean_radius=5&mean_radius=7"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fields(&state.engine.received_payloads()[0])[0], "5");
}

#[tokio::test]
async fn test_unknown_parameters_only_yield_all_defaults() {
    let state = fixed_state();
    let (status, _) = send(create_router(state.clone()), get("/predict?colour=blue")).await;

    assert_eq!(status, StatusCode::OK);
    let expected = state
        .assembler
        .schema()
        .defaults(DefaultStrategy::Median)
        .join(",")
        + "\n";
    assert_eq!(state.engine.received_payloads()[0], expected);
}

#[tokio::test]
async fn test_mean_strategy_defaults() {
    let state = state_with(MockReply::Fixed("1".to_string()), DefaultStrategy::Mean);
    let (status, _) = send(create_router(state.clone()), get("/predict?worst_area=2019.0")).await;

    assert_eq!(status, StatusCode::OK);
    let values = fields(&state.engine.received_payloads()[0]);
    assert_eq!(values[0], "14.117635164835166");
    assert_eq!(values[23], "2019.0");
}

#[tokio::test]
async fn test_predict_from_json_post() {
    let state = fixed_state();
    let (status, body) = send(
        create_router(state.clone()),
        json_request(Method::POST, r#"{"worst_area": "2019.0", "mean_area": 1001}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let response: PredictionResponse = serde_json::from_value(body).unwrap();
    assert_eq!(response.prediction, "0.5");

    let values = fields(&state.engine.received_payloads()[0]);
    assert_eq!(values[3], "1001");
    assert_eq!(values[23], "2019.0");
}

#[tokio::test]
async fn test_predict_from_json_get_with_body() {
    let state = fixed_state();
    let (status, _) = send(
        create_router(state.clone()),
        json_request(Method::GET, r#"{"mean_radius": "20.57"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fields(&state.engine.received_payloads()[0])[0], "20.57");
}

#[tokio::test]
async fn test_predict_from_json_rejects_empty_and_malformed() {
    let (status, body) = send(create_router(fixed_state()), json_request(Method::POST, "{}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing JSON fields");

    let (status, _) = send(create_router(fixed_state()), json_request(Method::POST, "")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        create_router(fixed_state()),
        json_request(Method::POST, r#"{"mean_radius": "#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Malformed JSON body"));
}

#[tokio::test]
async fn test_empty_inference_response() {
    let state = state_with(MockReply::Empty, DefaultStrategy::Median);
    let (status, body) = send(create_router(state), get("/predict?mean_radius=1")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Empty response from inference service");
}

#[tokio::test]
async fn test_inference_failure() {
    let state = state_with(
        MockReply::Fail("connection refused".to_string()),
        DefaultStrategy::Median,
    );
    let (status, body) = send(create_router(state), get("/predict?mean_radius=1")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Failed to call inference service"));
    assert!(message.contains("connection refused"));
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let response = create_router(fixed_state())
        .oneshot(get("/metrics"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain"));
}

#[tokio::test]
async fn test_served_over_tcp() {
    let state = fixed_state();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(api::serve(listener, state.clone()));

    let response = reqwest::get(format!("http://{}/predict?mean_smoothness=0.1184", addr))
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: PredictionResponse = response.json().await.unwrap();
    assert_eq!(body.prediction, "0.5");
    assert_eq!(fields(&state.engine.received_payloads()[0])[4], "0.1184");
}

#[tokio::test]
async fn test_mock_backend_uses_configured_prediction_field() {
    let settings = api::Settings::from_toml(
        r#"
        [inference]
        backend = "mock"
        prediction_field = "predicted_label"
        mock_prediction = '{"predicted_label": "0", "probability": 0.97}'
        "#,
    )
    .unwrap();
    let metrics = PrometheusBuilder::new().build_recorder().handle();
    let state = Arc::new(AppState::from_settings(&settings, metrics).unwrap());

    let (status, body) = send(create_router(state), get("/predict?mean_radius=20.57")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({"prediction": "0"}));
}
