// MCP server: JSON-RPC 2.0 dispatch over line-delimited stdio

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::protocol::{
    CallToolParams, InitializeResult, ListToolsResult, Request, Response, RpcError,
    ServerCapabilities, ServerInfo, ToolsCapability, PROTOCOL_VERSION,
};
use crate::tools::ToolRegistry;

/// Server name advertised during `initialize`.
const SERVER_NAME: &str = "mccmap-mcp";

pub struct McpServer {
    registry: ToolRegistry,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// Serve requests from stdin until EOF. Responses go to stdout, one JSON
    /// object per line; logging stays on stderr.
    pub async fn run(&self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            let Some(response) = self.handle_line(&line).await else {
                continue;
            };
            let json = serde_json::to_string(&response)?;
            stdout.write_all(json.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one input line, producing at most one response (notifications
    /// and malformed notifications produce none).
    pub async fn handle_line(&self, line: &str) -> Option<Response> {
        match serde_json::from_str::<Request>(line) {
            Ok(request) => self.handle_request(request).await,
            Err(e) => {
                tracing::warn!("Failed to parse request: {}", e);
                Some(Response::error(
                    serde_json::Value::Null,
                    RpcError::parse_error(),
                ))
            }
        }
    }

    async fn handle_request(&self, request: Request) -> Option<Response> {
        let Some(id) = request.id else {
            tracing::debug!("Ignoring notification: {}", request.method);
            return None;
        };

        let response = match request.method.as_str() {
            "initialize" => self.initialize(id),
            "ping" => Response::success(id, serde_json::json!({})),
            "tools/list" => Response::success(
                id,
                ListToolsResult {
                    tools: self.registry.descriptors(),
                },
            ),
            "tools/call" => self.call_tool(id, request.params).await,
            other => Response::error(id, RpcError::method_not_found(other)),
        };
        Some(response)
    }

    fn initialize(&self, id: serde_json::Value) -> Response {
        Response::success(
            id,
            InitializeResult {
                protocol_version: PROTOCOL_VERSION.to_string(),
                capabilities: ServerCapabilities {
                    tools: Some(ToolsCapability {
                        list_changed: false,
                    }),
                },
                server_info: ServerInfo {
                    name: SERVER_NAME.to_string(),
                    version: env!("CARGO_PKG_VERSION").to_string(),
                },
            },
        )
    }

    async fn call_tool(
        &self,
        id: serde_json::Value,
        params: Option<serde_json::Value>,
    ) -> Response {
        let Some(params) = params else {
            return Response::error(id, RpcError::invalid_params("missing tools/call params"));
        };
        let params: CallToolParams = match serde_json::from_value(params) {
            Ok(params) => params,
            Err(e) => {
                return Response::error(
                    id,
                    RpcError::invalid_params(format!("invalid tools/call params: {}", e)),
                )
            }
        };

        let Some(tool) = self.registry.get(&params.name) else {
            return Response::error(
                id,
                RpcError::invalid_params(format!("unknown tool: {}", params.name)),
            );
        };

        tracing::debug!("Calling tool {}", params.name);
        match tool.execute(params.arguments).await {
            Ok(result) => Response::success(id, result),
            Err(e) => Response::error(id, RpcError::internal_error(format!("{:#}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{GetBillCodesTool, GetCodeInfoTool, GetMerchantCodesTool};
    use std::sync::Arc;
    use tempfile::TempDir;

    fn test_server() -> (McpServer, TempDir) {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("mcc.csv"),
            "mcc_code,description,bill,merchant\n\
             4814,Telecommunication Services,1,0\n\
             1771,Air Conditioning Contractors,0,1\n",
        )
        .unwrap();

        let data_dir = dir.path().to_path_buf();
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(GetBillCodesTool::new(data_dir.clone())));
        registry.register(Arc::new(GetMerchantCodesTool::new(data_dir.clone())));
        registry.register(Arc::new(GetCodeInfoTool::new(data_dir)));

        (McpServer::new(registry), dir)
    }

    #[tokio::test]
    async fn initialize_reports_tool_capability() {
        let (server, _dir) = test_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#)
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn tools_list_names_all_three_tools() {
        let (server, _dir) = test_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#)
            .await
            .unwrap();

        let tools = response.result.unwrap()["tools"].clone();
        let names: Vec<&str> = tools
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["get_bill_mcc", "get_mcc_info", "get_merchant_mcc"]);
    }

    #[tokio::test]
    async fn tools_call_round_trips_a_classification() {
        let (server, _dir) = test_server();
        let response = server
            .handle_line(
                r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"get_mcc_info","arguments":{"file_name":"mcc.csv","mcc":"1771"}}}"#,
            )
            .await
            .unwrap();

        let result = response.result.unwrap();
        assert_eq!(
            result["content"][0]["text"],
            "1771 is categorized as Merchant"
        );
        assert!(result.get("isError").is_none());
    }

    #[tokio::test]
    async fn tools_call_surfaces_domain_errors_as_tool_results() {
        let (server, _dir) = test_server();
        let response = server
            .handle_line(
                r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"name":"get_bill_mcc","arguments":{"file_name":"absent.csv"}}}"#,
            )
            .await
            .unwrap();

        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], serde_json::json!(true));
    }

    #[tokio::test]
    async fn unknown_tool_is_invalid_params() {
        let (server, _dir) = test_server();
        let response = server
            .handle_line(
                r#"{"jsonrpc":"2.0","id":5,"method":"tools/call","params":{"name":"nope","arguments":{}}}"#,
            )
            .await
            .unwrap();

        assert_eq!(response.error.unwrap().code, RpcError::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn unknown_method_is_method_not_found() {
        let (server, _dir) = test_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","id":6,"method":"resources/list"}"#)
            .await
            .unwrap();

        assert_eq!(response.error.unwrap().code, RpcError::METHOD_NOT_FOUND);
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let (server, _dir) = test_server();
        let response = server
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await;
        assert!(response.is_none());
    }

    #[tokio::test]
    async fn garbage_input_is_a_parse_error() {
        let (server, _dir) = test_server();
        let response = server.handle_line("{not json").await.unwrap();
        assert_eq!(response.error.unwrap().code, RpcError::PARSE_ERROR);
        assert!(response.id.is_null());
    }
}
