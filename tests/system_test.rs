use futures::future::join_all;
use serde_json::{json, Value};
use social_mcp_core::config::{AppConfig, TransportMode};
use social_mcp_gateway::{GatewayConfig, GatewayServer};
use social_mcp_model_gateway::{HttpContentBackend, WebhookPublishBackend};
use social_mcp_skills::SocialToolDispatcher;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::oneshot;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// =============================================================================
// Harness
// =============================================================================

struct RunningServer {
    base_url: String,
    client: reqwest::Client,
    stop: Option<oneshot::Sender<()>>,
    handle: tokio::task::JoinHandle<social_mcp_core::Result<()>>,
}

impl RunningServer {
    async fn rpc(&self, request: Value) -> Value {
        self.client
            .post(format!("{}/mcp", self.base_url))
            .json(&request)
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap()
    }

    async fn call_tool(&self, name: &str, arguments: Value) -> Value {
        let response = self
            .rpc(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "tools/call",
                "params": {"name": name, "arguments": arguments}
            }))
            .await;
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        serde_json::from_str(text).unwrap()
    }

    async fn shutdown(mut self) {
        if let Some(stop) = self.stop.take() {
            stop.send(()).unwrap();
        }
        self.handle.await.unwrap().unwrap();
    }
}

/// Start the full stack the way the binary wires it, with both backends
/// pointed at `backend`.
async fn start(backend: &MockServer, api_key: Option<&str>) -> RunningServer {
    let mut env = HashMap::new();
    env.insert("API_HOST", backend.uri());
    env.insert("N8N_WEBHOOK_URL", format!("{}/webhook/social", backend.uri()));
    env.insert("MCP_MODE", "http".to_string());
    if let Some(key) = api_key {
        env.insert("RAPIDAPI_KEY", key.to_string());
    }

    let config = AppConfig::load_with(|key| env.get(key).cloned()).unwrap();
    assert_eq!(config.server.mode, TransportMode::Http);

    let dispatcher = SocialToolDispatcher::new(
        Arc::new(HttpContentBackend::new(&config.content_api).unwrap()),
        Arc::new(WebhookPublishBackend::new(&config.publisher).unwrap()),
    );
    let server = GatewayServer::new(
        GatewayConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            enable_cors: true,
            enable_tracing: false,
            webhook_url: config.publisher.webhook_url.clone(),
        },
        Arc::new(dispatcher),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();
    let handle = tokio::spawn(server.serve(listener, async {
        let _ = stopped.await;
    }));

    RunningServer {
        base_url: format!("http://{}", addr),
        client: reqwest::Client::new(),
        stop: Some(stop),
        handle,
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[tokio::test]
async fn test_generate_through_content_api() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/LinkedIn"))
        .and(query_param("noqueue", "1"))
        .and(header("x-rapidapi-key", "secret-key"))
        .and(body_partial_json(json!({"lang": "de", "length": 1000})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "Wir starten!"})))
        .expect(1)
        .mount(&backend)
        .await;

    let server = start(&backend, Some("secret-key")).await;
    let envelope = server
        .call_tool(
            "generate_linkedin_content",
            json!({"text": "Product launch", "language": "de"}),
        )
        .await;

    assert_eq!(envelope["success"], true);
    assert_eq!(envelope["platform"], "Linkedin");
    assert_eq!(envelope["content"], json!({"text": "Wir starten!"}));
    assert_eq!(envelope["originalText"], "Product launch");
    assert_eq!(envelope["requestParameters"]["language"], "de");
    assert_eq!(envelope["requestParameters"]["emotion"], "friendly");
    assert_eq!(envelope["requestParameters"]["length"], 1000);

    server.shutdown().await;
}

#[tokio::test]
async fn test_content_api_failure_becomes_envelope() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Reddit"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&backend)
        .await;

    let server = start(&backend, None).await;
    let envelope = server
        .call_tool("generate_reddit_content", json!({"text": "AMA tomorrow", "length": 120}))
        .await;

    assert_eq!(envelope["success"], false);
    assert!(envelope["error"].as_str().unwrap().contains("503"));
    assert_eq!(envelope["platform"], "Reddit");
    assert_eq!(envelope["originalText"], "AMA tomorrow");
    assert_eq!(envelope["requestParameters"], json!({"length": 120}));

    let requests = backend.received_requests().await.unwrap();
    assert!(requests[0].headers.get("x-rapidapi-key").is_none());

    server.shutdown().await;
}

#[tokio::test]
async fn test_publish_through_webhook() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/webhook/social"))
        .and(body_partial_json(json!({
            "platform": "instagram",
            "content": "New drop",
            "imageUrl": "https://cdn.example.com/drop.png"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Workflow was started"})))
        .expect(1)
        .mount(&backend)
        .await;

    let server = start(&backend, None).await;
    let envelope = server
        .call_tool(
            "publish_instagram_content",
            json!({"content": "New drop", "imageUrl": "https://cdn.example.com/drop.png"}),
        )
        .await;

    assert_eq!(
        envelope,
        json!({
            "success": true,
            "platform": "instagram",
            "content": "New drop",
            "response": {"message": "Workflow was started"}
        })
    );

    server.shutdown().await;
}

#[tokio::test]
async fn test_health_reports_webhook() {
    let backend = MockServer::start().await;
    let server = start(&backend, None).await;

    let health: Value = server
        .client
        .get(format!("{}/health", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(health["status"], "ok");
    assert_eq!(
        health["webhookUrl"],
        format!("{}/webhook/social", backend.uri())
    );

    let response = server
        .client
        .get(format!("{}/mcp", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);

    server.shutdown().await;
}

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"text": "ok"})))
        .mount(&backend)
        .await;

    let server = start(&backend, None).await;

    let calls = ["Instagram", "Twitter", "Facebook", "Pinterest", "Blog"].map(|platform| {
        let name = format!("generate_{}_content", platform.to_lowercase());
        let server = &server;
        async move { (platform, server.call_tool(&name, json!({"text": "x"})).await) }
    });

    for (platform, envelope) in join_all(calls).await {
        assert_eq!(envelope["success"], true, "{}", platform);
        assert_eq!(envelope["platform"], platform);
    }

    assert_eq!(backend.received_requests().await.unwrap().len(), 5);
    server.shutdown().await;
}
