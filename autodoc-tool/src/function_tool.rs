use autodoc_core::{Result, Tool, ToolContext};
use async_trait::async_trait;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

type AsyncHandler = Box<
    dyn Fn(Arc<dyn ToolContext>, Value) -> Pin<Box<dyn Future<Output = Result<Value>> + Send>>
        + Send
        + Sync,
>;

/// A tool backed by an async closure.
pub struct FunctionTool {
    name: String,
    description: String,
    parameters: Option<Value>,
    handler: AsyncHandler,
}

impl FunctionTool {
    pub fn new<F, Fut>(name: impl Into<String>, description: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Arc<dyn ToolContext>, Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: None,
            handler: Box::new(move |ctx, args| Box::pin(handler(ctx, args))),
        }
    }

    pub fn with_parameters(mut self, schema: Value) -> Self {
        self.parameters = Some(schema);
        self
    }
}

impl std::fmt::Debug for FunctionTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionTool").field("name", &self.name).finish()
    }
}

#[async_trait]
impl Tool for FunctionTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters_schema(&self) -> Option<Value> {
        self.parameters.clone()
    }

    async fn execute(&self, ctx: Arc<dyn ToolContext>, args: Value) -> Result<Value> {
        (self.handler)(ctx, args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autodoc_core::AutodocError;
    use serde_json::json;

    struct Ctx;

    impl ToolContext for Ctx {
        fn invocation_id(&self) -> &str {
            "inv"
        }
        fn agent_name(&self) -> &str {
            "analyzer"
        }
        fn function_call_id(&self) -> &str {
            "call"
        }
    }

    #[tokio::test]
    async fn test_handler_is_invoked() {
        let tool = FunctionTool::new("double", "Doubles n", |_ctx, args| async move {
            let n = args["n"].as_i64().unwrap_or_default();
            Ok(json!(n * 2))
        })
        .with_parameters(json!({"type": "object", "properties": {"n": {"type": "integer"}}}));

        assert_eq!(tool.name(), "double");
        assert_eq!(tool.declaration()["parameters"]["properties"]["n"]["type"], "integer");
        let out = tool.execute(Arc::new(Ctx), json!({"n": 21})).await.unwrap();
        assert_eq!(out, json!(42));
    }

    #[tokio::test]
    async fn test_handler_error_propagates() {
        let tool = FunctionTool::new("broken", "Always fails", |_ctx, _args| async {
            Err(AutodocError::Tool("boom".to_string()))
        });
        let err = tool.execute(Arc::new(Ctx), json!({})).await.unwrap_err();
        assert_eq!(err.to_string(), "Tool error: boom");
    }
}
