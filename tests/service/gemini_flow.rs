use runners_hub::config::{InfographicStyle, SearchOptions};
use runners_hub::providers::GeminiClient;
use runners_hub::services::{ComparisonService, GeminiComparisonService};
use runners_hub::view::{ImageSlot, SearchController, ViewPhase};
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEXT_PATH: &str = "/v1beta/models/text-model:generateContent";
const IMAGE_PATH: &str = "/v1beta/models/image-model:generateContent";
const FIXED_ERROR: &str = "Could not fetch data.";

fn service(server: &MockServer) -> GeminiComparisonService {
    GeminiComparisonService::new(
        GeminiClient::new(Some("test-key"), &server.uri(), 5),
        "text-model",
        "image-model",
        SearchOptions::default(),
        InfographicStyle::default(),
    )
    .expect("service should build")
}

fn controller(server: &MockServer) -> SearchController {
    SearchController::new(Arc::new(service(server)), FIXED_ERROR)
}

fn text_response(payload: &Value, grounding: &[Value]) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": payload.to_string()}]},
            "finishReason": "STOP",
            "groundingMetadata": {"groundingChunks": grounding}
        }]
    })
}

fn image_response(data: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [
                {"text": "Here is the chart."},
                {"inlineData": {"mimeType": "image/png", "data": data}}
            ]}
        }]
    })
}

fn shoe(brand: &str, model: &str, weight: &str, drop: &str) -> Value {
    json!({
        "brand": brand,
        "model": model,
        "price": "NT$8,000",
        "features": ["Carbon plate"],
        "weight": weight,
        "drop": drop,
        "link": "https://www.momo.com.tw/search?q=x"
    })
}

#[tokio::test]
async fn single_shoe_without_grounding_yields_empty_sources() {
    let server = MockServer::start().await;
    let payload = json!({
        "shoes": [{
            "brand": "Nike",
            "model": "Alphafly 3",
            "price": "$9,500",
            "features": ["ZoomX foam"],
            "weight": "165g",
            "drop": "8mm",
            "link": "https://momo.com.tw/x"
        }],
        "summary": "Nike is lightest."
    });

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": payload.to_string()}]}
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = service(&server)
        .request_comparison()
        .await
        .expect("comparison should succeed");

    assert_eq!(result.shoes.len(), 1);
    assert_eq!(result.shoes[0].brand, "Nike");
    assert_eq!(result.shoes[0].weight, "165g");
    assert_eq!(result.shoes[0].features, vec!["ZoomX foam"]);
    assert_eq!(result.summary, "Nike is lightest.");
    assert!(result.search_urls.is_empty());
}

#[tokio::test]
async fn comparison_request_enables_search_grounding() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(body_string_contains("googleSearch"))
        .and(body_string_contains("application/json"))
        .and(body_string_contains("Nike Alphafly 3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_response(&json!({"shoes": [], "summary": ""}), &[])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let result = service(&server).request_comparison().await.unwrap();
    assert!(result.shoes.is_empty());
}

#[tokio::test]
async fn search_urls_come_from_grounding_in_order() {
    let server = MockServer::start().await;
    let payload = json!({
        "shoes": [shoe("Nike", "Alphafly 3", "198g", "8mm")],
        "summary": "s",
        "searchUrls": ["https://ignored.example/"]
    });
    let grounding = [
        json!({"web": {"uri": "https://a.example/1", "title": "a"}}),
        json!({"web": {"uri": ""}}),
        json!({"retrievedContext": {}}),
        json!({"web": {"uri": "https://b.example/2"}}),
        json!({"web": {"uri": "https://a.example/1"}}),
    ];

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&payload, &grounding)))
        .mount(&server)
        .await;

    let result = service(&server).request_comparison().await.unwrap();
    assert_eq!(
        result.search_urls,
        vec![
            "https://a.example/1",
            "https://b.example/2",
            "https://a.example/1"
        ]
    );
}

#[tokio::test]
async fn three_shoes_with_failed_infographic_still_load() {
    let server = MockServer::start().await;
    let payload = json!({
        "shoes": [
            shoe("Adidas", "Adizero Adios Pro 4", "215g", "6.5mm"),
            shoe("Nike", "Alphafly 3", "198g", "8mm"),
            shoe("ASICS", "Metaspeed Sky Paris", "170g", "5mm"),
        ],
        "summary": "All three are fast."
    });

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&payload, &[])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("image backend down"))
        .expect(1)
        .mount(&server)
        .await;

    let state = controller(&server).search().await.unwrap();

    assert_eq!(state.phase(), ViewPhase::Loaded);
    let result = state.result().expect("result should be kept");
    assert_eq!(result.shoes.len(), 3);
    assert_eq!(result.shoes[0].brand, "Adidas");
    assert_eq!(result.shoes[2].brand, "ASICS");
    assert_eq!(state.image_slot(), ImageSlot::Unavailable);
    assert!(state.error_message().is_none());
}

#[tokio::test]
async fn infographic_prompt_describes_returned_shoes() {
    let server = MockServer::start().await;
    let payload = json!({
        "shoes": [
            shoe("Nike", "Alphafly 3", "198g", "8mm"),
            shoe("Adidas", "Adios Pro 4", "215g", "6.5mm"),
        ],
        "summary": "s"
    });

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(&payload, &[])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_string_contains(
            "Nike Alphafly 3 (Weight: 198g, Drop: 8mm), Adidas Adios Pro 4 (Weight: 215g, Drop: 6.5mm)",
        ))
        .and(body_string_contains("\"aspectRatio\":\"16:9\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response("iVBORw0KGgo=")))
        .expect(1)
        .mount(&server)
        .await;

    let state = controller(&server).search().await.unwrap();

    assert_eq!(state.phase(), ViewPhase::Loaded);
    let image = state.image().expect("image should be present");
    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.to_data_uri(), "data:image/png;base64,iVBORw0KGgo=");
}

#[tokio::test]
async fn comparison_failure_reaches_errored_without_image_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_response("AAA")))
        .expect(0)
        .mount(&server)
        .await;

    let state = controller(&server).search().await.unwrap();

    assert_eq!(state.phase(), ViewPhase::Errored);
    assert_eq!(state.error_message(), Some(FIXED_ERROR));
    assert!(state.result().is_none());
    assert!(state.trigger_enabled());
}

#[tokio::test]
async fn unreachable_service_reaches_errored() {
    let controller = SearchController::new(
        Arc::new(
            GeminiComparisonService::new(
                GeminiClient::new(Some("test-key"), "http://127.0.0.1:9", 2),
                "text-model",
                "image-model",
                SearchOptions::default(),
                InfographicStyle::default(),
            )
            .unwrap(),
        ),
        FIXED_ERROR,
    );

    let state = controller.search().await.unwrap();
    assert_eq!(state.phase(), ViewPhase::Errored);
    assert_eq!(state.error_message(), Some(FIXED_ERROR));
}

#[tokio::test]
async fn malformed_payload_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "not json at all"}]}}]
        })))
        .mount(&server)
        .await;

    assert!(service(&server).request_comparison().await.is_err());
}

#[tokio::test]
async fn empty_reply_becomes_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let result = service(&server).request_comparison().await.unwrap();
    assert!(result.shoes.is_empty());
    assert!(result.summary.is_empty());
    assert!(result.search_urls.is_empty());
}

#[tokio::test]
async fn blocked_reply_becomes_empty_result() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"finishReason": "SAFETY"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = service(&server).request_comparison().await.unwrap();
    assert!(result.shoes.is_empty());
    assert!(result.search_urls.is_empty());
}
