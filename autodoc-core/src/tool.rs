use crate::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// A named capability an agent can invoke on behalf of the model.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    /// JSON schema of the arguments object, if the tool takes any.
    fn parameters_schema(&self) -> Option<Value> {
        None
    }

    async fn execute(&self, ctx: Arc<dyn ToolContext>, args: Value) -> Result<Value>;

    /// Function declaration in the shape models expect.
    fn declaration(&self) -> Value {
        let mut decl = serde_json::json!({
            "name": self.name(),
            "description": self.description(),
        });
        if let Some(params) = self.parameters_schema() {
            decl["parameters"] = params;
        }
        decl
    }
}

/// What a tool can see about the call that triggered it.
pub trait ToolContext: Send + Sync {
    fn invocation_id(&self) -> &str;
    fn agent_name(&self) -> &str;
    fn function_call_id(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }

        fn description(&self) -> &str {
            "Echoes its arguments"
        }

        fn parameters_schema(&self) -> Option<Value> {
            Some(json!({"type": "object", "properties": {"text": {"type": "string"}}}))
        }

        async fn execute(&self, ctx: Arc<dyn ToolContext>, args: Value) -> Result<Value> {
            Ok(json!({"call": ctx.function_call_id(), "args": args}))
        }
    }

    struct TestContext;

    impl ToolContext for TestContext {
        fn invocation_id(&self) -> &str {
            "inv-1"
        }
        fn agent_name(&self) -> &str {
            "researcher"
        }
        fn function_call_id(&self) -> &str {
            "call-1"
        }
    }

    #[test]
    fn test_declaration_includes_schema() {
        let decl = EchoTool.declaration();
        assert_eq!(decl["name"], "echo");
        assert_eq!(decl["description"], "Echoes its arguments");
        assert_eq!(decl["parameters"]["type"], "object");
    }

    #[tokio::test]
    async fn test_execute_sees_context() {
        let ctx: Arc<dyn ToolContext> = Arc::new(TestContext);
        let out = EchoTool.execute(ctx, json!({"text": "hi"})).await.unwrap();
        assert_eq!(out["call"], "call-1");
        assert_eq!(out["args"]["text"], "hi");
    }
}
