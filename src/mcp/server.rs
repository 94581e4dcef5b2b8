//! MCP server over stdio.
//!
//! Newline-delimited JSON-RPC 2.0 messages are read from stdin and answered
//! on stdout. Every `tools/call` goes through the [`ToolRegistry`], so the
//! registry's error codes and the `isError` flag reach the client unchanged.

use std::io;
use std::sync::Arc;

use pmcp::{ErrorCode, Implementation, ServerCapabilities, ToolCapabilities};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::mcp::tools::{ToolError, ToolRegistry};

/// Name the server reports during initialization
pub const SERVER_NAME: &str = "seminar-generator";

/// The MCP server for seminar generation
#[derive(Debug, Clone)]
pub struct SeminarServer {
    registry: Arc<ToolRegistry>,
}

impl SeminarServer {
    /// Create a new MCP server over the given tools
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Get the tool registry
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Run the server on stdin/stdout until the client closes stdin
    pub async fn run(&self) -> io::Result<()> {
        tracing::info!(
            "Starting MCP server in stdio mode with {} tool(s)",
            self.registry.all().len()
        );

        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Answer each line of `reader` on `writer`, returning at end of input
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if let Some(response) = self.handle_line(&line).await {
                let mut bytes = serde_json::to_vec(&response)?;
                bytes.push(b'\n');
                writer.write_all(&bytes).await?;
                writer.flush().await?;
            }
        }

        tracing::debug!("End of input on stdio");
        Ok(())
    }

    /// Answer one raw line. Blank lines are skipped.
    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        match serde_json::from_str::<Value>(line) {
            Ok(message) => self.handle_message(message).await,
            Err(e) => {
                tracing::warn!("Discarding unparsable message: {}", e);
                Some(error_response(
                    Value::Null,
                    ErrorCode::PARSE_ERROR.0,
                    &format!("Parse error: {}", e),
                ))
            }
        }
    }

    /// Answer one JSON-RPC message. Notifications and client responses get no reply.
    pub async fn handle_message(&self, message: Value) -> Option<Value> {
        let id = message.get("id").cloned();

        let Some(method) = message.get("method").and_then(Value::as_str) else {
            if message.get("result").is_some() || message.get("error").is_some() {
                return None;
            }
            return Some(error_response(
                id.unwrap_or(Value::Null),
                ErrorCode::INVALID_REQUEST.0,
                "Invalid request",
            ));
        };

        let Some(id) = id else {
            tracing::debug!("Notification received: {}", method);
            return None;
        };

        let params = message.get("params").cloned().unwrap_or(Value::Null);
        let outcome = match method {
            "initialize" => Ok(self.initialize(&params)),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.registry.list()),
            "tools/call" => self.call_tool(&params).await,
            other => Err(ToolError::MethodNotFound(format!(
                "Method not found: {}",
                other
            ))),
        };

        Some(match outcome {
            Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
            Err(e) => error_response(id, e.code(), &e.to_string()),
        })
    }

    fn initialize(&self, params: &Value) -> Value {
        let requested = params.get("protocolVersion").and_then(Value::as_str);
        let protocol_version = match requested {
            Some(version) if pmcp::SUPPORTED_PROTOCOL_VERSIONS.contains(&version) => version,
            _ => pmcp::LATEST_PROTOCOL_VERSION,
        };

        let capabilities = ServerCapabilities {
            tools: Some(ToolCapabilities::default()),
            ..Default::default()
        };
        let server_info = Implementation {
            name: SERVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        };

        json!({
            "protocolVersion": protocol_version,
            "capabilities": capabilities,
            "serverInfo": server_info,
        })
    }

    async fn call_tool(&self, params: &Value) -> Result<Value, ToolError> {
        let name = params
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidParams("Missing tool name".to_string()))?;
        let args = params.get("arguments").cloned().unwrap_or_else(|| json!({}));

        tracing::debug!("Calling tool '{}'", name);
        self.registry.execute(name, args).await
    }
}

fn error_response(id: Value, code: i32, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": { "code": code, "message": message },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mcp::tools::{Tool, ToolHandler, ToolResponse};

    #[derive(Debug)]
    struct FailingHandler;

    #[async_trait::async_trait]
    impl ToolHandler for FailingHandler {
        async fn execute(&self, args: Value) -> Result<Value, ToolError> {
            if args.get("topic").is_none() {
                return Err(ToolError::InvalidParams("topic required".to_string()));
            }
            ToolResponse::error("disk full").into_value()
        }
    }

    fn server() -> SeminarServer {
        let mut registry = ToolRegistry::new();
        registry.register(Tool {
            name: "fail".to_string(),
            description: "Always reports a failure".to_string(),
            input_schema: json!({"type": "object"}),
            handler: Arc::new(FailingHandler),
        });
        SeminarServer::new(registry)
    }

    #[tokio::test]
    async fn test_initialize() {
        let response = server()
            .handle_message(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {"protocolVersion": "2024-11-05", "capabilities": {}}
            }))
            .await
            .unwrap();

        assert_eq!(response["id"], 1);
        assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(response["result"]["serverInfo"]["name"], SERVER_NAME);
        assert!(response["result"]["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn test_unsupported_protocol_version_gets_latest() {
        let response = server()
            .handle_message(json!({
                "jsonrpc": "2.0",
                "id": 1,
                "method": "initialize",
                "params": {"protocolVersion": "1999-01-01"}
            }))
            .await
            .unwrap();

        assert_eq!(
            response["result"]["protocolVersion"],
            pmcp::LATEST_PROTOCOL_VERSION
        );
    }

    #[tokio::test]
    async fn test_tool_error_keeps_is_error() {
        let response = server()
            .handle_message(json!({
                "jsonrpc": "2.0",
                "id": "a",
                "method": "tools/call",
                "params": {"name": "fail", "arguments": {"topic": "x"}}
            }))
            .await
            .unwrap();

        assert_eq!(
            response["result"],
            json!({"content": [{"type": "text", "text": "disk full"}], "isError": true})
        );
    }

    #[tokio::test]
    async fn test_error_codes_on_the_wire() {
        let server = server();

        let unknown = server
            .handle_message(json!({
                "jsonrpc": "2.0", "id": 2, "method": "tools/call",
                "params": {"name": "missing", "arguments": {}}
            }))
            .await
            .unwrap();
        assert_eq!(unknown["error"]["code"], -32601);
        assert_eq!(unknown["error"]["message"], "Unknown tool: missing");

        let invalid = server
            .handle_message(json!({
                "jsonrpc": "2.0", "id": 3, "method": "tools/call",
                "params": {"name": "fail"}
            }))
            .await
            .unwrap();
        assert_eq!(invalid["error"]["code"], -32602);

        let method = server
            .handle_message(json!({"jsonrpc": "2.0", "id": 4, "method": "resources/list"}))
            .await
            .unwrap();
        assert_eq!(method["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_notifications_get_no_reply() {
        let reply = server()
            .handle_message(json!({"jsonrpc": "2.0", "method": "notifications/initialized"}))
            .await;
        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn test_parse_error() {
        let reply = server().handle_line("{not json").await.unwrap();
        assert_eq!(reply["error"]["code"], -32700);
        assert_eq!(reply["id"], Value::Null);

        assert!(server().handle_line("   ").await.is_none());
    }

    #[tokio::test]
    async fn test_serve_returns_at_end_of_input() {
        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n",
        );
        let mut output = Vec::new();

        server().serve(input.as_bytes(), &mut output).await.unwrap();

        let replies: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0], json!({"jsonrpc": "2.0", "id": 1, "result": {}}));
        assert_eq!(replies[1]["result"]["tools"][0]["name"], "fail");
    }
}
