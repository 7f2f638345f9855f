use async_trait::async_trait;
use reqwest::StatusCode;
use runners_hub::catalog::{ComparisonResult, InfographicImage, ShoeRecord};
use runners_hub::gateway::{AppState, run_gateway_with_listener};
use runners_hub::services::ComparisonService;
use runners_hub::view::ViewContext;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Stub that holds the comparison until `release` is notified.
struct GatedService {
    release: Arc<Notify>,
    image: Option<InfographicImage>,
}

#[async_trait]
impl ComparisonService for GatedService {
    async fn request_comparison(&self) -> runners_hub::Result<ComparisonResult> {
        self.release.notified().await;
        Ok(ComparisonResult {
            shoes: vec![ShoeRecord {
                brand: "Nike".into(),
                model: "Alphafly 3".into(),
                category: None,
                price: "$9,500".into(),
                features: vec!["ZoomX foam".into()],
                weight: "165g".into(),
                drop: "8mm".into(),
                link: "https://momo.com.tw/x".into(),
            }],
            summary: "Nike is lightest.".into(),
            search_urls: vec![],
        })
    }

    async fn request_infographic(&self, _shoes: &[ShoeRecord]) -> Option<InfographicImage> {
        self.image.clone()
    }
}

struct GatewayTestServer {
    port: u16,
    release: Arc<Notify>,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

impl GatewayTestServer {
    async fn start(image: Option<InfographicImage>) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("ephemeral gateway listener should bind");
        let port = listener
            .local_addr()
            .expect("ephemeral gateway listener should expose local address")
            .port();

        let release = Arc::new(Notify::new());
        let service = Arc::new(GatedService {
            release: release.clone(),
            image,
        });
        let ctx = ViewContext {
            locale: "en".into(),
            retailer_name: "momo".into(),
            product_names: vec!["Nike Alphafly 3".into()],
        };
        let state = AppState::new(service, ctx).expect("app state should build");

        let handle = tokio::spawn(async move {
            run_gateway_with_listener("127.0.0.1", listener, state).await
        });

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(2))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("reqwest client should be built");

        let server = Self {
            port,
            release,
            client,
            handle,
        };
        server.wait_until_ready().await;
        server
    }

    fn url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{path}", self.port)
    }

    async fn wait_until_ready(&self) {
        for _ in 0..80 {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status().is_success() {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        panic!("gateway did not become ready");
    }

    async fn state(&self) -> Value {
        self.client
            .get(self.url("/api/state"))
            .send()
            .await
            .expect("state request should succeed")
            .json()
            .await
            .expect("state should be JSON")
    }

    async fn wait_for_phase(&self, phase: &str) -> Value {
        for _ in 0..80 {
            let state = self.state().await;
            if state["phase"] == phase {
                return state;
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        panic!("gateway never reached phase {phase}");
    }
}

impl Drop for GatewayTestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn idle_page_and_state() {
    let server = GatewayTestServer::start(None).await;

    let page = server
        .client
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("Elite Runner&#x27;s Hub"));
    assert!(page.contains(r#"<button type="submit">"#));

    let state = server.state().await;
    assert_eq!(state["phase"], "idle");
    assert_eq!(state["trigger_enabled"], true);
    assert_eq!(state["has_image"], false);
}

#[tokio::test]
async fn second_search_conflicts_while_loading() {
    let server = GatewayTestServer::start(None).await;

    let first = server
        .client
        .post(server.url("/search"))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::SEE_OTHER);
    assert_eq!(first.headers()["location"], "/");

    let state = server.state().await;
    assert_eq!(state["phase"], "loading");
    assert_eq!(state["trigger_enabled"], false);

    let page = server
        .client
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains("<button type=\"submit\" disabled>"));

    let second = server
        .client
        .post(server.url("/search"))
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    server.release.notify_one();
    let state = server.wait_for_phase("loaded").await;
    assert_eq!(state["result"]["shoes"][0]["brand"], "Nike");
    assert_eq!(state["trigger_enabled"], true);
}

#[tokio::test]
async fn infographic_is_served_as_bytes() {
    // "aGVsbG8=" is base64 for "hello"
    let server =
        GatewayTestServer::start(Some(InfographicImage::new("image/png", "aGVsbG8="))).await;

    let missing = server
        .client
        .get(server.url("/infographic"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    server
        .client
        .post(server.url("/search"))
        .send()
        .await
        .unwrap();
    server.release.notify_one();
    let state = server.wait_for_phase("loaded").await;
    assert_eq!(state["has_image"], true);

    let resp = server
        .client
        .get(server.url("/infographic"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "image/png");
    assert_eq!(resp.bytes().await.unwrap().as_ref(), b"hello");

    let page = server
        .client
        .get(server.url("/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(page.contains(r#"<a href="/infographic" target="_blank" rel="noopener noreferrer">"#));
}
