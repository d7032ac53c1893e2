use axum::{body::Body, http::Request};
use serde_json::{json, Value};
use social_mcp_core::mocks::{MockContentBackend, MockPublishBackend};
use social_mcp_gateway::{GatewayConfig, GatewayServer, StdioTransport};
use social_mcp_skills::SocialToolDispatcher;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tower::ServiceExt;

fn dispatcher() -> Arc<SocialToolDispatcher> {
    Arc::new(SocialToolDispatcher::new(
        Arc::new(MockContentBackend::responding(json!({"text": "Generated post"}))),
        Arc::new(MockPublishBackend::responding(json!({"message": "Workflow was started"}))),
    ))
}

/// Feed `frames` to a transport and collect every response line.
async fn exchange(frames: &[&str]) -> Vec<Value> {
    let transport = StdioTransport::new(dispatcher());
    let (client, server) = tokio::io::duplex(256 * 1024);
    let (server_read, server_write) = tokio::io::split(server);
    let (mut client_read, mut client_write) = tokio::io::split(client);

    let serving = tokio::spawn(async move { transport.serve(server_read, server_write).await });

    for frame in frames {
        client_write.write_all(frame.as_bytes()).await.unwrap();
        client_write.write_all(b"\n").await.unwrap();
    }
    client_write.shutdown().await.unwrap();

    let mut output = String::new();
    client_read.read_to_string(&mut output).await.unwrap();
    serving.await.unwrap().unwrap();

    output
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn by_id(responses: Vec<Value>) -> HashMap<String, Value> {
    responses
        .into_iter()
        .map(|response| (response["id"].to_string(), response))
        .collect()
}

#[tokio::test]
async fn test_initialize_and_notification() {
    let responses = exchange(&[
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
        r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
    ])
    .await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(responses[0]["result"]["protocolVersion"], "2024-11-05");
}

#[tokio::test]
async fn test_error_codes() {
    let responses = by_id(
        exchange(&[
            "{broken",
            r#"{"jsonrpc":"2.0","id":"m","method":"sampling/createMessage"}"#,
            r#"{"jsonrpc":"2.0","id":"n","method":"tools/call","params":{"arguments":{}}}"#,
            r#"{"jsonrpc":"2.0","id":"p","method":"ping"}"#,
        ])
        .await,
    );

    assert_eq!(responses.len(), 4);
    assert_eq!(responses["null"]["error"]["code"], -32700);
    assert_eq!(responses[r#""m""#]["error"]["code"], -32601);
    assert_eq!(responses[r#""n""#]["error"]["code"], -32602);
    assert_eq!(responses[r#""p""#]["result"], json!({}));
}

#[tokio::test]
async fn test_unknown_tool_is_error_block() {
    let responses = exchange(&[
        r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"delete_everything","arguments":{}}}"#,
    ])
    .await;

    let result = &responses[0]["result"];
    assert_eq!(result["isError"], true);
    assert_eq!(result["content"][0]["text"], "Error: Unknown tool: delete_everything");
}

#[tokio::test]
async fn test_tool_calls_answered_by_id() {
    let responses = by_id(
        exchange(&[
            r#"{"jsonrpc":"2.0","id":1,"method":"tools/call","params":{"name":"generate_linkedin_content","arguments":{"text":"Launch"}}}"#,
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"list_available_emotions"}}"#,
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"publish_telegram_content","arguments":{"content":"hi","telegramChatId":"@news"}}}"#,
        ])
        .await,
    );

    assert_eq!(responses.len(), 3);

    let text = responses["1"]["result"]["content"][0]["text"].as_str().unwrap();
    let envelope: Value = serde_json::from_str(text).unwrap();
    assert_eq!(envelope["platform"], "Linkedin");
    assert_eq!(envelope["success"], true);

    let text = responses["2"]["result"]["content"][0]["text"].as_str().unwrap();
    let emotions: Value = serde_json::from_str(text).unwrap();
    assert_eq!(emotions["emotions"].as_array().unwrap().len(), 10);

    let text = responses["3"]["result"]["content"][0]["text"].as_str().unwrap();
    let envelope: Value = serde_json::from_str(text).unwrap();
    assert_eq!(envelope["success"], true);
    assert_eq!(envelope["response"], json!({"message": "Workflow was started"}));
}

#[tokio::test]
async fn test_both_transports_list_the_same_catalog() {
    let stdio = exchange(&[r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#]).await;

    let app = GatewayServer::new(GatewayConfig::default(), dispatcher()).build_router();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/mcp")
                .body(Body::from(r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let http: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(stdio[0]["result"], http["result"]);
    assert!(!http["result"]["tools"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_long_session_answers_every_request() {
    let frames: Vec<String> = (0..500)
        .map(|i| format!(r#"{{"jsonrpc":"2.0","id":{},"method":"ping"}}"#, i))
        .collect();
    let frames: Vec<&str> = frames.iter().map(String::as_str).collect();

    let responses = by_id(exchange(&frames).await);

    assert_eq!(responses.len(), 500);
    assert!((0..500).all(|i| responses[&i.to_string()]["result"] == json!({})));
}
