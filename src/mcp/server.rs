/// Line-delimited JSON-RPC loop for the habit tools
///
/// Each input line is one request. Each request with an id gets exactly one
/// response line; notifications get none. Tool calls lock the shared habit
/// tracker for the duration of the call.

use std::collections::HashMap;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::mcp::protocol::*;
use crate::tools;
use crate::{HabitTrackerServer, ServerError};

/// JSON-RPC front end over a shared `HabitTrackerServer`
pub struct McpServer {
    /// Habit tracker state, shared with the reminder scheduler
    habit_tracker: Arc<Mutex<HabitTrackerServer>>,
    /// Whether the client has sent its initialized notification
    initialized: bool,
}

impl McpServer {
    pub fn new(habit_tracker: Arc<Mutex<HabitTrackerServer>>) -> Self {
        Self {
            habit_tracker,
            initialized: false,
        }
    }

    /// Run the MCP server over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");
        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.serve(reader, writer).await
    }

    /// Serve requests from any line-oriented reader until it closes
    pub async fn serve<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<(), ServerError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = String::new();

        loop {
            line.clear();

            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (input closed)");
                    break;
                }
                Ok(_) => {
                    if let Some(response) = self.process_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        writer.write_all(response_str.as_bytes()).await?;
                        writer.write_all(b"\n").await?;
                        writer.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read request: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    async fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
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

        self.handle_request(request).await
    }

    /// Handle a JSON-RPC request; notifications produce no response
    async fn handle_request(&mut self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let id = match request.id {
            Some(id) => id,
            None => {
                self.handle_notification(&request.method);
                return None;
            }
        };

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(id),
            "initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(id, json!(null))
            }
            "tools/list" => Self::handle_tools_list(id),
            "tools/call" => self.handle_tools_call(id, request.params).await,
            _ => JsonRpcResponse::error(
                id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        };

        Some(response)
    }

    fn handle_notification(&mut self, method: &str) {
        match method {
            "initialized" | "notifications/initialized" => {
                self.initialized = true;
                info!("MCP client initialized");
            }
            other => debug!("Ignoring notification: {}", other),
        }
    }

    /// Handle MCP initialization request
    fn handle_initialize(&mut self, id: Value) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Habit Streak MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        match serde_json::to_value(result) {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(e) => JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string(), None),
        }
    }

    /// Handle tools/list request
    fn handle_tools_list(id: Value) -> JsonRpcResponse {
        let tools = vec![
            tool_definition::<tools::CreateHabitParams>(
                "habit_create",
                "Create a new daily habit to track",
            ),
            tool_definition::<tools::UpdateHabitParams>(
                "habit_update",
                "Change a habit's name, color or reminder (streak history is kept)",
            ),
            tool_definition::<tools::DeleteHabitParams>(
                "habit_delete",
                "Permanently delete a habit and its history",
            ),
            tool_definition::<tools::ToggleHabitParams>(
                "habit_toggle",
                "Mark a habit done for today, or undo today's completion",
            ),
            tool_definition::<tools::ListHabitsParams>(
                "habit_list",
                "List all habits with streaks and today's completion",
            ),
            tool_definition::<tools::StatusParams>(
                "habit_status",
                "Check streak and today's status for one habit or all habits",
            ),
            tool_definition::<tools::RemindersParams>(
                "habit_reminders",
                "List habit reminders due at a time of day that are not yet done today",
            ),
        ];

        JsonRpcResponse::success(id, json!({ "tools": tools }))
    }

    /// Handle tools/call request
    async fn handle_tools_call(&mut self, id: Value, params: Option<Value>) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid parameters: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        if !self.initialized {
            debug!("Tool '{}' called before client sent initialized", tool_params.name);
        }

        let args = tool_params.arguments;
        let outcome = match tool_params.name.as_str() {
            "habit_create" => {
                self.call_tool(args, |server, p| tools::create_habit(server, p).map(|r| {
                    format!("{}\nHabit ID: {}", r.message, r.habit_id)
                }))
                .await
            }
            "habit_update" => {
                self.call_tool(args, |server, p| tools::update_habit(server, p).map(|r| r.message))
                    .await
            }
            "habit_delete" => {
                self.call_tool(args, |server, p| tools::delete_habit(server, p).map(|r| r.message))
                    .await
            }
            "habit_toggle" => {
                self.call_tool(args, |server, p| tools::toggle_habit(server, p).map(|r| r.message))
                    .await
            }
            "habit_list" => {
                self.call_tool(args, |server, p| tools::list_habits(server, p).map(format_habit_list))
                    .await
            }
            "habit_status" => {
                self.call_tool(args, |server, p| tools::get_habit_status(server, p).map(|r| r.message))
                    .await
            }
            "habit_reminders" => {
                self.call_tool(args, |server, p| tools::get_due_reminders(server, p).map(|r| r.message))
                    .await
            }
            other => Ok(ToolCallResult::error(format!("Unknown tool: {}", other))),
        };

        match outcome {
            Ok(result) => match serde_json::to_value(result) {
                Ok(value) => JsonRpcResponse::success(id, value),
                Err(e) => JsonRpcResponse::error(id, error_codes::INTERNAL_ERROR, e.to_string(), None),
            },
            Err(e) => {
                warn!("Tool '{}' failed: {}", tool_params.name, e);
                JsonRpcResponse::error(id, server_error_to_json_rpc_code(&e), e.to_string(), None)
            }
        }
    }

    /// Decode tool arguments, run the tool under the state lock
    ///
    /// Domain errors are reported to the client as tool errors. Bad
    /// arguments and storage failures become JSON-RPC errors.
    async fn call_tool<P, F>(
        &self,
        args: HashMap<String, Value>,
        tool: F,
    ) -> Result<ToolCallResult, ServerError>
    where
        P: DeserializeOwned,
        F: FnOnce(&mut HabitTrackerServer, P) -> Result<String, ServerError>,
    {
        let params: P = serde_json::from_value(Value::Object(args.into_iter().collect()))?;

        let mut server = self.habit_tracker.lock().await;
        match tool(&mut *server, params) {
            Ok(text) => Ok(ToolCallResult::success(text)),
            Err(ServerError::Domain(e)) => Ok(ToolCallResult::error(e.to_string())),
            Err(e) => Err(e),
        }
    }
}

/// Build a tool definition whose input schema comes from its parameter type
fn tool_definition<P: JsonSchema>(name: &str, description: &str) -> ToolDefinition {
    let input_schema = serde_json::to_value(schemars::schema_for!(P))
        .unwrap_or_else(|_| json!({ "type": "object" }));

    ToolDefinition {
        name: name.to_string(),
        description: description.to_string(),
        input_schema,
    }
}

fn format_habit_list(response: tools::ListHabitsResponse) -> String {
    if response.habits.is_empty() {
        return "No habits found. Create your first habit to get started!".to_string();
    }

    let header = format!("📋 **Habit Summary** ({} habits)\n\n", response.summary.total_habits);

    let detailed_list = response
        .habits
        .iter()
        .map(|h| {
            format!(
                "{} **{}** ({})\n   🔥 Streak: {} | ✅ Total: {}{}{}",
                if h.completed_today { "✅" } else { "🎯" },
                h.name,
                h.habit_id,
                h.current_streak,
                h.total_completions,
                h.last_completed
                    .as_ref()
                    .map(|d| format!(" | Last: {}", d))
                    .unwrap_or_default(),
                h.reminder
                    .as_ref()
                    .map(|r| format!(" | 🔔 {}", r))
                    .unwrap_or_default(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    let overall = format!(
        "\n\n📊 **Today**\n- Done: {} of {}\n- Longest current streak: {}",
        response.summary.completed_today,
        response.summary.total_habits,
        response.summary.longest_current_streak
    );

    format!("{}{}{}", header, detailed_list, overall)
}
