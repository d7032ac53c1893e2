//! Newline-delimited JSON-RPC over a byte stream, normally stdin/stdout.

use serde_json::Value;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use uuid::Uuid;

use social_mcp_core::{traits::ToolDispatcher, Error, Result};

use crate::protocol::{
    call_tool_error_result, codes, JsonRpcRequest, JsonRpcResponse, McpMethod, McpService,
};

const OUTBOUND_QUEUE: usize = 64;

/// Serves one client over a line-oriented stream.
///
/// Each line is handled on its own task, so responses may be written in a
/// different order than their requests arrived.
pub struct StdioTransport {
    service: McpService,
}

impl StdioTransport {
    pub fn new(dispatcher: Arc<dyn ToolDispatcher>) -> Self {
        Self {
            service: McpService::new(dispatcher),
        }
    }

    /// Serve on the process's stdin and stdout until stdin closes.
    pub async fn run(&self) -> Result<()> {
        tracing::info!("MCP stdio server listening");
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve until `reader` reaches EOF and every in-flight request has been
    /// answered.
    pub async fn serve<R, W>(&self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin + Send,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel::<String>(OUTBOUND_QUEUE);
        let writer_task = tokio::spawn(write_frames(writer, rx));

        let mut lines = BufReader::new(reader).lines();
        let mut in_flight = InFlight::default();

        while let Some(line) = lines
            .next_line()
            .await
            .map_err(|e| Error::transport(format!("Failed to read request: {}", e)))?
        {
            if line.trim().is_empty() {
                continue;
            }

            let service = self.service.clone();
            let tx = tx.clone();
            in_flight.spawn(async move {
                let Some(response) = handle_message(&service, &line).await else {
                    return;
                };
                match serde_json::to_string(&response) {
                    Ok(frame) => {
                        if tx.send(frame).await.is_err() {
                            tracing::warn!("Output closed, dropping response");
                        }
                    }
                    Err(e) => tracing::error!(error = %e, "Failed to encode response"),
                }
            });
        }

        tracing::info!(pending = in_flight.len(), "Input closed, draining in-flight requests");
        in_flight.drain().await;
        drop(tx);

        writer_task
            .await
            .map_err(|e| Error::internal(format!("Writer task failed: {}", e)))?
            .map_err(|e| Error::transport(format!("Failed to write response: {}", e)))
    }
}

/// Request tasks of one session. Finished tasks are reaped on every spawn so
/// the set only holds work that is still running.
#[derive(Default)]
struct InFlight {
    tasks: JoinSet<()>,
}

impl InFlight {
    fn spawn<F>(&mut self, task: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        self.reap();
        self.tasks.spawn(task);
    }

    fn reap(&mut self) {
        while let Some(finished) = self.tasks.try_join_next() {
            log_join(finished);
        }
    }

    async fn drain(&mut self) {
        while let Some(finished) = self.tasks.join_next().await {
            log_join(finished);
        }
    }

    fn len(&self) -> usize {
        self.tasks.len()
    }
}

fn log_join(finished: std::result::Result<(), tokio::task::JoinError>) {
    if let Err(e) = finished {
        tracing::error!(error = %e, "Request task failed");
    }
}

async fn write_frames<W>(mut writer: W, mut rx: mpsc::Receiver<String>) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(frame) = rx.recv().await {
        writer.write_all(frame.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    writer.shutdown().await
}

/// Handle one frame. Notifications produce no response.
pub async fn handle_message(service: &McpService, line: &str) -> Option<JsonRpcResponse> {
    let request = match JsonRpcRequest::parse(line.as_bytes()) {
        Ok(request) => request,
        Err(rejection) => {
            tracing::warn!(error = %rejection.error, "Rejected JSON-RPC frame");
            return Some(JsonRpcResponse::error(
                rejection.id,
                rejection.code,
                rejection.error.to_string(),
            ));
        }
    };

    let method = McpMethod::parse(&request.method);

    if request.is_notification() {
        if let Err(e) = service.handle(&method, &request.params).await {
            tracing::debug!(method = %request.method, error = %e, "Notification failed");
        }
        return None;
    }

    let id = request.response_id();
    let trace_id = Uuid::new_v4().to_string();
    tracing::debug!(trace_id = %trace_id, method = %request.method, id = %id, "Processing JSON-RPC request");

    if method == McpMethod::ToolsCall
        && request.params.get("name").and_then(Value::as_str).is_none()
    {
        return Some(JsonRpcResponse::error(
            id,
            codes::INVALID_PARAMS,
            "Missing tool name",
        ));
    }

    let response = match service.handle(&method, &request.params).await {
        Ok(result) => JsonRpcResponse::success(id, result),
        Err(e) if method == McpMethod::ToolsCall => {
            tracing::warn!(trace_id = %trace_id, error = %e, "Tool call failed");
            JsonRpcResponse::success(id, call_tool_error_result(&e))
        }
        Err(e @ Error::MethodNotFound(_)) => {
            JsonRpcResponse::error(id, codes::METHOD_NOT_FOUND, e.to_string())
        }
        Err(e) => JsonRpcResponse::error(id, codes::INTERNAL_ERROR, e.to_string()),
    };

    Some(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_finished_requests_are_reaped() {
        let mut in_flight = InFlight::default();

        for _ in 0..1_000 {
            in_flight.spawn(async {});
            tokio::task::yield_now().await;
            assert!(in_flight.len() <= 8, "{} tasks retained", in_flight.len());
        }

        in_flight.drain().await;
        assert_eq!(in_flight.len(), 0);
    }
}
