use autodoc_agent::{LlmAgent, ToolErrorPolicy};
use autodoc_core::{AutodocError, Content, Part, ROLE_FUNCTION, ROLE_MODEL};
use autodoc_model::MockLlm;
use autodoc_tool::FunctionTool;
use futures::StreamExt;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn search_tool(calls: Arc<AtomicUsize>) -> FunctionTool {
    FunctionTool::new("search_library_info", "Search library docs", move |ctx, args| {
        let calls = calls.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(ctx.agent_name(), "researcher");
            let lib = args["library_name"].as_str().unwrap_or_default().to_string();
            Ok(json!(format!("Source: https://docs.python.org\nContent: {lib} docs...")))
        }
    })
}

#[tokio::test]
async fn test_tool_call_then_final_answer() {
    let calls = Arc::new(AtomicUsize::new(0));
    let model = Arc::new(
        MockLlm::new("mock")
            .with_function_call("search_library_info", json!({"library_name": "math"}))
            .with_text("The module uses math for pi."),
    );
    let agent = LlmAgent::builder("researcher")
        .model(model.clone())
        .tool(Arc::new(search_tool(calls.clone())))
        .build()
        .unwrap();

    let output = agent.ask("Analyze this Python code:\n\nimport math").await.unwrap();

    assert_eq!(output.text, "The module uses math for pi.");
    assert_eq!(output.turns, 2);
    assert_eq!(output.tool_calls, 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let requests = model.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].tools.contains_key("search_library_info"));
    // second turn sees: user, model call, function response
    let history = &requests[1].contents;
    assert_eq!(history.len(), 3);
    assert_eq!(history[1].role, ROLE_MODEL);
    assert_eq!(history[2].role, ROLE_FUNCTION);
    match &history[2].parts[0] {
        Part::FunctionResponse { function_response, .. } => {
            assert_eq!(function_response.name, "search_library_info");
            assert!(function_response.response.as_str().unwrap().contains("math docs"));
        }
        other => panic!("expected function response, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unknown_tool_is_reported_to_model() {
    let model = Arc::new(
        MockLlm::new("mock")
            .with_function_call("python_repl", json!({"code": "1/0"}))
            .with_text("Could not run the code."),
    );
    let agent = LlmAgent::builder("analyzer").model(model.clone()).build().unwrap();

    let output = agent.ask("test it").await.unwrap();
    assert_eq!(output.text, "Could not run the code.");

    let history = &model.requests()[1].contents;
    match &history[2].parts[0] {
        Part::FunctionResponse { function_response, .. } => {
            assert_eq!(function_response.response, json!({"error": "Tool python_repl not found"}));
        }
        other => panic!("expected function response, got {other:?}"),
    }
}

fn failing_tool() -> FunctionTool {
    FunctionTool::new("search_library_info", "always down", |_ctx, _args| async {
        Err(AutodocError::Tool("Search API error (503): unavailable".to_string()))
    })
}

#[tokio::test]
async fn test_tool_error_reported_by_default() {
    let model = Arc::new(
        MockLlm::new("mock")
            .with_function_call("search_library_info", json!({"library_name": "os"}))
            .with_text("Search was unavailable."),
    );
    let agent = LlmAgent::builder("researcher")
        .model(model.clone())
        .tool(Arc::new(failing_tool()))
        .build()
        .unwrap();

    let output = agent.ask("go").await.unwrap();
    assert_eq!(output.text, "Search was unavailable.");
    let history = &model.requests()[1].contents;
    assert!(matches!(
        &history[2].parts[0],
        Part::FunctionResponse { function_response, .. }
            if function_response.response["error"].as_str().unwrap().contains("503")
    ));
}

#[tokio::test]
async fn test_tool_error_propagates_when_configured() {
    let model = Arc::new(
        MockLlm::new("mock")
            .with_function_call("search_library_info", json!({"library_name": "os"}))
            .with_text("unreachable"),
    );
    let agent = LlmAgent::builder("researcher")
        .model(model.clone())
        .tool(Arc::new(failing_tool()))
        .tool_error_policy(ToolErrorPolicy::Propagate)
        .build()
        .unwrap();

    let err = agent.ask("go").await.unwrap_err();
    assert!(matches!(err, AutodocError::Tool(_)));
    assert_eq!(model.remaining(), 1);
}

#[tokio::test]
async fn test_model_error_aborts_run() {
    let model = Arc::new(MockLlm::new("mock").with_error("Gemini API error (500): internal"));
    let agent = LlmAgent::builder("documenter").model(model).build().unwrap();

    let err = agent.ask("document").await.unwrap_err();
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_max_iterations_exceeded() {
    let mut mock = MockLlm::new("looping");
    for _ in 0..3 {
        mock = mock.with_function_call("noop", json!({}));
    }
    let noop = FunctionTool::new("noop", "does nothing", |_ctx, _args| async { Ok(json!({})) });
    let agent = LlmAgent::builder("analyzer")
        .model(Arc::new(mock))
        .tool(Arc::new(noop))
        .max_iterations(2)
        .build()
        .unwrap();

    let err = agent.ask("loop").await.unwrap_err();
    assert_eq!(err.to_string(), "Agent error: Max iterations (2) exceeded");
}

#[tokio::test]
async fn test_stream_yields_model_and_function_events() {
    let model = Arc::new(
        MockLlm::new("mock")
            .with_function_call("noop", json!({}))
            .with_text("finished"),
    );
    let noop = FunctionTool::new("noop", "does nothing", |_ctx, _args| async { Ok(json!("ok")) });
    let agent = LlmAgent::builder("analyzer").model(model).tool(Arc::new(noop)).build().unwrap();

    let events: Vec<_> = agent.run_stream(Content::user("hi")).collect().await;
    let roles: Vec<String> = events
        .into_iter()
        .map(|e| e.unwrap().content.unwrap().role)
        .collect();
    assert_eq!(roles, vec![ROLE_MODEL, ROLE_FUNCTION, ROLE_MODEL]);
}
