/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin
/// 2. Processes tool calls against the wellness tracker
/// 3. Sends JSON-RPC responses to stdout

use std::collections::HashMap;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::mcp::protocol::*;
use crate::tools;
use crate::{ServerError, WellnessServer};

/// MCP server that handles communication with clients
pub struct McpServer {
    /// The underlying wellness tracker server
    wellness: WellnessServer,
    /// Whether the server has been initialized
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(wellness: WellnessServer) -> Self {
        Self {
            wellness,
            initialized: false,
        }
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line) {
                        let response_str = serde_json::to_string(&response)?;

                        // Write response + newline
                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    json!(null),
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        Some(self.handle_request(request))
    }

    /// Handle a JSON-RPC request
    fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(request.id, json!(null))
            }
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request),
            _ => JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        }
    }

    /// Handle MCP initialization request
    fn handle_initialize(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability { list_changed: false }),
            },
            server_info: ServerInfo {
                name: "Wellness Tracker MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => JsonRpcResponse::error(
                request.id,
                error_codes::INTERNAL_ERROR,
                e.to_string(),
                None,
            ),
        }
    }

    /// Handle tools/list request
    fn handle_tools_list(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let user_id_prop = json!({"type": "string", "description": "ID of the user (UUID)"});

        let tools = vec![
            ToolDefinition {
                name: "metric_log".to_string(),
                description: "Log a health metric measurement (water, sleep, stress, steps, ...)"
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "user_id": user_id_prop.clone(),
                        "metric_type": {"type": "string", "description": "One of: water_ml, sleep_hours, stress_level, steps, sleep_deep_seconds, heart_rate"},
                        "value": {"type": "number", "description": "Measured value; unit implied by the metric type"},
                        "source": {"type": "string", "description": "Data source (manual, apple_health, oura, ...) - defaults to manual"}
                    },
                    "required": ["user_id", "metric_type", "value"]
                }),
            },
            ToolDefinition {
                name: "metric_history".to_string(),
                description: "Read back logged measurements, newest first".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "user_id": user_id_prop.clone(),
                        "metric_type": {"type": "string", "description": "Filter by metric type (optional)"},
                        "days": {"type": "number", "description": "How many days back to look (default 7)"},
                        "limit": {"type": "number", "description": "Maximum number of records (optional)"}
                    },
                    "required": ["user_id"]
                }),
            },
            ToolDefinition {
                name: "wellness_insights".to_string(),
                description: "Generate personalized wellness insights ranked by priority"
                    .to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {"user_id": user_id_prop.clone()},
                    "required": ["user_id"]
                }),
            },
            ToolDefinition {
                name: "dashboard".to_string(),
                description: "Dashboard rollup: recent logs, connected wearables and summary insights".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {"user_id": user_id_prop.clone()},
                    "required": ["user_id"]
                }),
            },
            ToolDefinition {
                name: "chat".to_string(),
                description: "Send a message to the wellness chat assistant (medical questions are refused)".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "user_id": user_id_prop.clone(),
                        "message": {"type": "string", "description": "The user's message"},
                        "locale": {"type": "string", "description": "Reply language: en or fr (default en)"}
                    },
                    "required": ["user_id", "message"]
                }),
            },
            ToolDefinition {
                name: "chat_history".to_string(),
                description: "Read back recent chat exchanges".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "user_id": user_id_prop.clone(),
                        "limit": {"type": "number", "description": "Maximum number of turns (default 50)"}
                    },
                    "required": ["user_id"]
                }),
            },
            ToolDefinition {
                name: "wearable_connect".to_string(),
                description: "Connect a wearable provider (free tier allows one)".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "user_id": user_id_prop.clone(),
                        "provider": {"type": "string", "description": "One of: apple_health, oura, garmin, whoop, google_fit"},
                        "tier": {"type": "string", "description": "Subscription tier: free, connect or baseline (default free)"}
                    },
                    "required": ["user_id", "provider"]
                }),
            },
            ToolDefinition {
                name: "wearable_list".to_string(),
                description: "List active wearable connections".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {"user_id": user_id_prop.clone()},
                    "required": ["user_id"]
                }),
            },
            ToolDefinition {
                name: "wearable_disconnect".to_string(),
                description: "Disconnect a wearable link".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "link_id": {"type": "string", "description": "ID of the wearable link to deactivate"}
                    },
                    "required": ["link_id"]
                }),
            },
            ToolDefinition {
                name: "wearable_sync".to_string(),
                description: "Pull data from a connected wearable provider".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "user_id": user_id_prop.clone(),
                        "provider": {"type": "string", "description": "The connected provider to sync"}
                    },
                    "required": ["user_id", "provider"]
                }),
            },
            ToolDefinition {
                name: "product_list".to_string(),
                description: "Browse the wellness product catalog".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "category": {"type": "string", "description": "Filter by category: sleep, energy, skin or fitness (optional)"}
                    },
                    "required": []
                }),
            },
            ToolDefinition {
                name: "product_get".to_string(),
                description: "Fetch one catalog product by ID".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "product_id": {"type": "string", "description": "ID of the product (UUID)"}
                    },
                    "required": ["product_id"]
                }),
            },
            ToolDefinition {
                name: "food_scan".to_string(),
                description: "Recognize food items and nutrition in a meal photo".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "image_base64": {"type": "string", "description": "Base64-encoded PNG or JPEG"}
                    },
                    "required": ["image_base64"]
                }),
            },
            ToolDefinition {
                name: "skin_scan".to_string(),
                description: "Wellness-only skin analysis of a face photo (no medical diagnosis)".to_string(),
                input_schema: json!({
                    "type": "object",
                    "properties": {
                        "image_base64": {"type": "string", "description": "Base64-encoded PNG or JPEG"}
                    },
                    "required": ["image_base64"]
                }),
            },
        ];

        JsonRpcResponse::success(request.id, json!({"tools": tools}))
    }

    /// Handle tools/call request
    fn handle_tools_call(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match request.params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        request.id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid parameters: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let result = match tool_params.name.as_str() {
            "metric_log" => self.call_metric_log(tool_params.arguments),
            "metric_history" => self.call_metric_history(tool_params.arguments),
            "wellness_insights" => self.call_wellness_insights(tool_params.arguments),
            "dashboard" => self.call_dashboard(tool_params.arguments),
            "chat" => self.call_chat(tool_params.arguments),
            "chat_history" => self.call_chat_history(tool_params.arguments),
            "wearable_connect" => self.call_wearable_connect(tool_params.arguments),
            "wearable_list" => self.call_wearable_list(tool_params.arguments),
            "wearable_disconnect" => self.call_wearable_disconnect(tool_params.arguments),
            "wearable_sync" => self.call_wearable_sync(tool_params.arguments),
            "product_list" => self.call_product_list(tool_params.arguments),
            "product_get" => self.call_product_get(tool_params.arguments),
            "food_scan" => self.call_food_scan(tool_params.arguments),
            "skin_scan" => self.call_skin_scan(tool_params.arguments),
            _ => ToolCallResult::error(format!("Unknown tool: {}", tool_params.name)),
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err(e) => JsonRpcResponse::error(
                request.id,
                error_codes::INTERNAL_ERROR,
                e.to_string(),
                None,
            ),
        }
    }

    fn call_metric_log(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = tools::MetricLogParams {
            user_id: arg_str(&args, "user_id"),
            metric_type: arg_str(&args, "metric_type"),
            value: args.get("value").and_then(|v| v.as_f64()).unwrap_or(f64::NAN),
            source: arg_opt_str(&args, "source"),
        };

        match tools::metric_log(self.wellness.storage(), params) {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    fn call_metric_history(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = tools::MetricHistoryParams {
            user_id: arg_str(&args, "user_id"),
            metric_type: arg_opt_str(&args, "metric_type"),
            days: args.get("days").and_then(|v| v.as_i64()),
            limit: args.get("limit").and_then(|v| v.as_u64()).map(|n| n as u32),
        };

        match tools::metric_history(self.wellness.storage(), params) {
            Ok(response) => json_result(&response),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    fn call_wellness_insights(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = tools::InsightsParams {
            user_id: arg_str(&args, "user_id"),
        };

        match tools::wellness_insights(self.wellness.storage(), params) {
            Ok(response) => json_result(&response),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    fn call_dashboard(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = tools::DashboardParams {
            user_id: arg_str(&args, "user_id"),
        };

        match tools::dashboard(self.wellness.storage(), params) {
            Ok(response) => json_result(&response),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    fn call_chat(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = tools::ChatParams {
            user_id: arg_str(&args, "user_id"),
            message: arg_str(&args, "message"),
            locale: arg_opt_str(&args, "locale"),
        };

        match tools::chat(self.wellness.storage(), self.wellness.safety(), params) {
            Ok(response) => json_result(&response),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    fn call_chat_history(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = tools::ChatHistoryParams {
            user_id: arg_str(&args, "user_id"),
            limit: args.get("limit").and_then(|v| v.as_u64()).map(|n| n as u32),
        };

        match tools::chat_history(self.wellness.storage(), params) {
            Ok(response) => json_result(&response),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    fn call_wearable_connect(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = tools::WearableConnectParams {
            user_id: arg_str(&args, "user_id"),
            provider: arg_str(&args, "provider"),
            tier: arg_opt_str(&args, "tier"),
        };

        match tools::wearable_connect(self.wellness.storage(), params) {
            Ok(response) => ToolCallResult::success(format!(
                "{}\nLink ID: {}",
                response.message,
                response.link.id.to_string()
            )),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    fn call_wearable_list(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = tools::WearableListParams {
            user_id: arg_str(&args, "user_id"),
        };

        match tools::wearable_list(self.wellness.storage(), params) {
            Ok(response) => json_result(&response),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    fn call_wearable_disconnect(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = tools::WearableDisconnectParams {
            link_id: arg_str(&args, "link_id"),
        };

        match tools::wearable_disconnect(self.wellness.storage(), params) {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    fn call_wearable_sync(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = tools::WearableSyncParams {
            user_id: arg_str(&args, "user_id"),
            provider: arg_str(&args, "provider"),
        };

        match tools::wearable_sync(self.wellness.storage(), params) {
            Ok(response) => json_result(&response),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    fn call_product_list(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = tools::ProductListParams {
            category: arg_opt_str(&args, "category"),
        };

        match tools::product_list(self.wellness.storage(), params) {
            Ok(response) => json_result(&response),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    fn call_product_get(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = tools::ProductGetParams {
            product_id: arg_str(&args, "product_id"),
        };

        match tools::product_get(self.wellness.storage(), params) {
            Ok(response) => json_result(&response),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    fn call_food_scan(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = tools::FoodScanParams {
            image_base64: arg_str(&args, "image_base64"),
        };

        match tools::food_scan(self.wellness.food_recognizer(), params) {
            Ok(response) => json_result(&response),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    fn call_skin_scan(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params = tools::SkinScanParams {
            image_base64: arg_str(&args, "image_base64"),
        };

        match tools::skin_scan(self.wellness.skin_analyzer(), params) {
            Ok(response) => json_result(&response),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }
}

fn arg_str(args: &HashMap<String, Value>, key: &str) -> String {
    args.get(key)
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string()
}

fn arg_opt_str(args: &HashMap<String, Value>, key: &str) -> Option<String> {
    args.get(key).and_then(|v| v.as_str()).map(|s| s.to_string())
}

/// Serialize a structured tool response into the text content slot
fn json_result<T: serde::Serialize>(response: &T) -> ToolCallResult {
    match serde_json::to_string_pretty(response) {
        Ok(text) => ToolCallResult::success(text),
        Err(e) => ToolCallResult::error(format!("Failed to serialize response: {}", e)),
    }
}
