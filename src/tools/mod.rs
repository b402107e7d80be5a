//! Tool endpoints exposed to agent transports.

mod knowledge;

pub use knowledge::{GatherKnowledgeInput, KnowledgeSearchTool, TOOL_DESCRIPTION, TOOL_NAME};

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

/// Transport-neutral tool contract.
///
/// A transport routes a call by [`name`](Self::name) and passes the raw JSON
/// arguments; the endpoint always answers with text, including for failures.
#[async_trait]
pub trait ToolEndpoint: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;
    fn input_schema(&self) -> serde_json::Value;
    async fn call(&self, arguments: serde_json::Value) -> String;
}

/// Typed tool whose JSON schema is derived from its input type.
#[async_trait]
pub trait SchemaTool: Send + Sync {
    type Input: JsonSchema + DeserializeOwned + Send;
    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    async fn handle(&self, input: Self::Input) -> String;

    fn input_schema() -> serde_json::Value {
        let schema = schemars::schema_for!(Self::Input);
        let mut value =
            serde_json::to_value(schema).unwrap_or_else(|_| serde_json::json!({"type": "object"}));

        if let Some(obj) = value.as_object_mut()
            && !obj.contains_key("properties")
        {
            obj.insert(
                "properties".to_string(),
                serde_json::Value::Object(serde_json::Map::new()),
            );
        }

        value
    }
}

#[async_trait]
impl<T: SchemaTool + 'static> ToolEndpoint for T {
    fn name(&self) -> &str {
        T::NAME
    }

    fn description(&self) -> &str {
        T::DESCRIPTION
    }

    fn input_schema(&self) -> serde_json::Value {
        T::input_schema()
    }

    async fn call(&self, arguments: serde_json::Value) -> String {
        match serde_json::from_value::<T::Input>(arguments) {
            Ok(typed) => SchemaTool::handle(self, typed).await,
            Err(e) => format!("Error: invalid arguments: {}", e),
        }
    }
}
