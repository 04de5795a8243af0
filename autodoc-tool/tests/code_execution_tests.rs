#![cfg(unix)]

use autodoc_core::{Tool, ToolContext};
use autodoc_tool::{CodeExecutionTool, ExecutionOutcome};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

struct TestContext;

impl ToolContext for TestContext {
    fn invocation_id(&self) -> &str {
        "inv-exec"
    }
    fn agent_name(&self) -> &str {
        "analyzer"
    }
    fn function_call_id(&self) -> &str {
        "call-exec"
    }
}

// `sh -s` reads its script from stdin the same way `python3 -` does.
fn shell() -> CodeExecutionTool {
    CodeExecutionTool::with_interpreter("sh", ["-s"])
}

#[tokio::test]
async fn test_successful_run_captures_stdout() {
    let outcome = shell().run("echo 'area: 15'").await;
    assert_eq!(outcome, ExecutionOutcome::Success("area: 15\n".to_string()));
}

#[tokio::test]
async fn test_non_zero_exit_reports_stderr() {
    let outcome = shell().run("echo 'ZeroDivisionError: division by zero' >&2; exit 1").await;
    assert_eq!(outcome, ExecutionOutcome::Failure("ZeroDivisionError: division by zero\n".into()));
}

#[tokio::test]
async fn test_missing_interpreter_is_reported_not_raised() {
    let tool = CodeExecutionTool::with_interpreter("autodoc-no-such-interpreter", ["-"]);
    let out = tool.execute(Arc::new(TestContext), json!({"code": "print(1)"})).await.unwrap();
    let text = out.as_str().unwrap();
    assert!(text.starts_with("Execution failed:\n"));
    assert!(text.contains("autodoc-no-such-interpreter"));
}

#[tokio::test]
async fn test_timeout_is_reported_as_failure() {
    let tool = shell().with_timeout(Duration::from_millis(200));
    let outcome = tool.run("sleep 5").await;
    match outcome {
        ExecutionOutcome::Failure(detail) => assert!(detail.contains("timed out")),
        other => panic!("expected timeout failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_tool_wraps_output_for_the_model() {
    let out = shell().execute(Arc::new(TestContext), json!({"code": "echo 4"})).await.unwrap();
    assert_eq!(out, json!("Execution successful:\n4\n"));
}

#[tokio::test]
async fn test_bad_arguments_become_failure_text() {
    let out = shell().execute(Arc::new(TestContext), json!({"source": "echo 4"})).await.unwrap();
    assert!(out.as_str().unwrap().starts_with("Execution failed:\ninvalid arguments"));
}
