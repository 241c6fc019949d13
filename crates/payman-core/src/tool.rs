//! Tool System
//!
//! Every gateway operation is a [`Tool`]: it declares a parameter schema,
//! receives a validated [`ToolCall`] together with the caller's [`Session`],
//! and answers with a [`ToolResult`]. Tools are registered once at startup
//! and looked up by name for each call.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Result, ToolError};
use crate::session::Session;

/// Tool call request from the caller
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ToolCall {
    /// Tool identifier
    pub name: String,

    /// Arguments as key-value pairs
    #[serde(default)]
    pub arguments: HashMap<String, Value>,

    /// Optional call ID for tracking
    #[serde(default)]
    pub id: Option<String>,
}

impl ToolCall {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add one argument
    pub fn with_argument(mut self, key: impl Into<String>, value: Value) -> Self {
        self.arguments.insert(key.into(), value);
        self
    }

    /// Build a call from a JSON object of arguments; anything else is
    /// treated as "no arguments".
    pub fn from_json(name: impl Into<String>, arguments: Option<Value>) -> Self {
        let arguments = match arguments {
            Some(Value::Object(map)) => map.into_iter().collect(),
            _ => HashMap::new(),
        };
        Self {
            name: name.into(),
            arguments,
            id: None,
        }
    }

    /// Deserialize the arguments into a typed parameter struct
    pub fn parse_arguments<T: DeserializeOwned>(&self) -> Result<T> {
        let object: Map<String, Value> = self
            .arguments
            .iter()
            .filter(|(_, v)| !v.is_null())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        serde_json::from_value(Value::Object(object))
            .map_err(|e| ToolError::ToolValidation(format!("{}: {e}", self.name)))
    }
}

/// Result from tool execution
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolResult {
    /// Tool that was called
    pub name: String,

    /// Call ID (if provided in request)
    pub id: Option<String>,

    /// Whether execution succeeded
    pub success: bool,

    /// Output (success message or error)
    pub output: String,
}

impl ToolResult {
    pub fn success(name: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            success: true,
            output: output.into(),
        }
    }

    pub fn failure(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            success: false,
            output: error.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Convert into the uniform response envelope returned to the caller
    pub fn into_response(self) -> ToolResponse {
        ToolResponse {
            content: vec![Content::text(self.output)],
            is_error: (!self.success).then_some(true),
        }
    }
}

/// One content block of a tool response
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text { text: String },
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text { text: text.into() }
    }

    pub fn as_text(&self) -> &str {
        match self {
            Content::Text { text } => text,
        }
    }
}

/// Uniform envelope: a list of content blocks plus an error flag on failure
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    pub content: Vec<Content>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl ToolResponse {
    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }

    /// All text blocks joined by newlines
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(Content::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Parameter definition for tool schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterSchema {
    /// Parameter name
    pub name: String,

    /// JSON Schema type (string, number, boolean, object, array)
    #[serde(rename = "type")]
    pub param_type: String,

    /// Human-readable description
    pub description: String,

    /// Whether this parameter is required
    #[serde(default)]
    pub required: bool,

    /// Default value if not provided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Enum of allowed values
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    /// Numbers must be strictly greater than this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusive_minimum: Option<f64>,

    /// Element schema for arrays
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Value>,

    /// Property schemas for nested objects
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
}

impl ParameterSchema {
    fn new(name: &str, param_type: &str, description: &str, required: bool) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            description: description.into(),
            required,
            default: None,
            enum_values: None,
            exclusive_minimum: None,
            items: None,
            properties: None,
        }
    }

    pub fn required(name: &str, param_type: &str, description: &str) -> Self {
        Self::new(name, param_type, description, true)
    }

    pub fn optional(name: &str, param_type: &str, description: &str) -> Self {
        Self::new(name, param_type, description, false)
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = Some(values.into_iter().map(|v| Value::String(v.into())).collect());
        self
    }

    pub fn with_exclusive_minimum(mut self, minimum: f64) -> Self {
        self.exclusive_minimum = Some(minimum);
        self
    }

    pub fn with_items(mut self, items: Value) -> Self {
        self.items = Some(items);
        self
    }

    pub fn with_properties(mut self, properties: Value) -> Self {
        self.properties = Some(properties);
        self
    }

    /// JSON Schema fragment for this parameter
    pub fn json_schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".into(), json!(self.param_type));
        schema.insert("description".into(), json!(self.description));
        if let Some(default) = &self.default {
            schema.insert("default".into(), default.clone());
        }
        if let Some(values) = &self.enum_values {
            schema.insert("enum".into(), Value::Array(values.clone()));
        }
        if let Some(minimum) = self.exclusive_minimum {
            schema.insert("exclusiveMinimum".into(), json!(minimum));
        }
        if let Some(items) = &self.items {
            schema.insert("items".into(), items.clone());
        }
        if let Some(properties) = &self.properties {
            schema.insert("properties".into(), properties.clone());
        }
        Value::Object(schema)
    }

    fn matches_type(&self, value: &Value) -> bool {
        match self.param_type.as_str() {
            "string" => value.is_string(),
            "number" => value.is_number(),
            "integer" => value.is_i64() || value.is_u64(),
            "boolean" => value.is_boolean(),
            "array" => value.is_array(),
            "object" => value.is_object(),
            _ => true,
        }
    }

    /// Check one supplied value against this parameter's constraints
    fn check(&self, value: &Value) -> Result<()> {
        if !self.matches_type(value) {
            return Err(ToolError::ToolValidation(format!(
                "Parameter '{}' must be of type {}",
                self.name, self.param_type
            )));
        }

        if let Some(allowed) = &self.enum_values {
            if !allowed.contains(value) {
                return Err(ToolError::ToolValidation(format!(
                    "Parameter '{}' must be one of {}",
                    self.name,
                    Value::Array(allowed.clone())
                )));
            }
        }

        if let Some(minimum) = self.exclusive_minimum {
            match value.as_f64() {
                Some(n) if n > minimum => {}
                _ => {
                    return Err(ToolError::ToolValidation(format!(
                        "Parameter '{}' must be greater than {minimum}",
                        self.name
                    )));
                }
            }
        }

        Ok(())
    }
}

/// Tool definition schema
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolSchema {
    /// Unique tool identifier
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// Parameter definitions
    pub parameters: Vec<ParameterSchema>,
}

impl ToolSchema {
    /// JSON Schema object describing the tool's arguments
    pub fn input_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .parameters
            .iter()
            .map(|p| (p.name.clone(), p.json_schema()))
            .collect();

        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });
        if !required.is_empty() {
            schema["required"] = json!(required);
        }
        schema
    }
}

/// Tool trait - implement to add new operations
#[async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool's schema
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments.
    ///
    /// Remote failures are reported through an error-flagged [`ToolResult`];
    /// `Err` is reserved for input the schema should have rejected.
    async fn execute(&self, session: &mut Session, call: &ToolCall) -> Result<ToolResult>;

    /// Validate arguments before execution
    fn validate(&self, call: &ToolCall) -> Result<()> {
        let schema = self.schema();

        for param in &schema.parameters {
            match call.arguments.get(&param.name) {
                None | Some(Value::Null) if param.required => {
                    return Err(ToolError::ToolValidation(format!(
                        "Missing required parameter: {}",
                        param.name
                    )));
                }
                None | Some(Value::Null) => {}
                Some(value) => param.check(value)?,
            }
        }

        Ok(())
    }
}

/// Registry for available tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a new tool
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        let schema = tool.schema();
        self.tools.insert(schema.name.clone(), Arc::new(tool));
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Validate and execute a tool call against `session`
    pub async fn execute(&self, session: &mut Session, call: &ToolCall) -> Result<ToolResult> {
        let tool = self
            .get(&call.name)
            .ok_or_else(|| ToolError::ToolNotFound(call.name.clone()))?;

        tool.validate(call)?;

        tracing::debug!(tool = %call.name, session = %session.id, "Executing tool");
        let result = tool.execute(session, call).await?;

        match &call.id {
            Some(id) => Ok(result.with_id(id.clone())),
            None => Ok(result),
        }
    }

    /// All tool schemas, sorted by name
    pub fn schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<_> = self.tools.values().map(|t| t.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Tool names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.tools.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Echoes its `text` argument; fails when unauthenticated.
    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn schema(&self) -> ToolSchema {
            ToolSchema {
                name: "echo".into(),
                description: "Echo text back".into(),
                parameters: vec![
                    ParameterSchema::required("text", "string", "Text to echo"),
                    ParameterSchema::optional("mode", "string", "Echo mode")
                        .with_enum(["plain", "loud"])
                        .with_default(json!("plain")),
                    ParameterSchema::optional("times", "number", "Repeat count")
                        .with_exclusive_minimum(0.0),
                ],
            }
        }

        async fn execute(&self, session: &mut Session, call: &ToolCall) -> Result<ToolResult> {
            if !session.is_authenticated() {
                return Ok(ToolResult::failure("echo", "not authenticated"));
            }
            let text = call.arguments["text"].as_str().unwrap_or_default();
            Ok(ToolResult::success("echo", text))
        }
    }

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool);
        registry
    }

    #[test]
    fn test_tool_registry() {
        let registry = registry();
        assert_eq!(registry.len(), 1);
        assert!(registry.get("echo").is_some());
        assert!(registry.get("unknown").is_none());
        assert_eq!(registry.names(), vec!["echo"]);
    }

    #[tokio::test]
    async fn test_execute_unknown_tool() {
        let mut session = Session::new();
        let result = registry().execute(&mut session, &ToolCall::new("nope")).await;
        assert!(matches!(result, Err(ToolError::ToolNotFound(_))));
    }

    #[tokio::test]
    async fn test_execute_rejects_missing_required() {
        let mut session = Session::new();
        let result = registry().execute(&mut session, &ToolCall::new("echo")).await;
        assert!(matches!(result, Err(ToolError::ToolValidation(_))));
    }

    #[tokio::test]
    async fn test_execute_carries_call_id() {
        let mut session = Session::new();
        session.set_credential("key");
        let mut call = ToolCall::new("echo").with_argument("text", json!("hi"));
        call.id = Some("call-1".into());

        let result = registry().execute(&mut session, &call).await.unwrap();
        assert!(result.success);
        assert_eq!(result.output, "hi");
        assert_eq!(result.id.as_deref(), Some("call-1"));
    }

    #[test]
    fn test_validate_enum_and_minimum() {
        let bad_enum = ToolCall::new("echo")
            .with_argument("text", json!("x"))
            .with_argument("mode", json!("whisper"));
        assert!(EchoTool.validate(&bad_enum).is_err());

        let zero = ToolCall::new("echo")
            .with_argument("text", json!("x"))
            .with_argument("times", json!(0));
        assert!(EchoTool.validate(&zero).is_err());

        let wrong_type = ToolCall::new("echo").with_argument("text", json!(5));
        assert!(EchoTool.validate(&wrong_type).is_err());

        let ok = ToolCall::new("echo")
            .with_argument("text", json!("x"))
            .with_argument("mode", json!("loud"))
            .with_argument("times", json!(2));
        assert!(EchoTool.validate(&ok).is_ok());
    }

    #[test]
    fn test_input_schema() {
        let schema = EchoTool.schema().input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["required"], json!(["text"]));
        assert_eq!(schema["properties"]["mode"]["enum"], json!(["plain", "loud"]));
        assert_eq!(schema["properties"]["times"]["exclusiveMinimum"], json!(0.0));
    }

    #[test]
    fn test_input_schema_without_parameters() {
        let schema = ToolSchema {
            name: "noop".into(),
            description: String::new(),
            parameters: vec![],
        }
        .input_schema();
        assert_eq!(schema, json!({"type": "object", "properties": {}}));
    }

    #[test]
    fn test_response_envelope() {
        let ok = ToolResult::success("echo", "done").into_response();
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"content": [{"type": "text", "text": "done"}]})
        );

        let failed = ToolResult::failure("echo", "nope").into_response();
        assert!(failed.is_error());
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"content": [{"type": "text", "text": "nope"}], "isError": true})
        );
    }

    #[test]
    fn test_parse_arguments_skips_nulls() {
        #[derive(Deserialize)]
        struct Params {
            text: String,
            mode: Option<String>,
        }

        let call = ToolCall::from_json("echo", Some(json!({"text": "hi", "mode": null})));
        let params: Params = call.parse_arguments().unwrap();
        assert_eq!(params.text, "hi");
        assert!(params.mode.is_none());

        let missing = ToolCall::from_json("echo", None);
        assert!(missing.parse_arguments::<Params>().is_err());
    }
}
