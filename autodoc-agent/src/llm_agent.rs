use crate::context::AgentToolContext;
use crate::event::{Event, EventStream};
use autodoc_core::{
    AutodocError, Content, GenerateContentConfig, Llm, LlmRequest, Part, ROLE_FUNCTION,
    ROLE_MODEL, Result, Tool, ToolContext,
};
use futures::StreamExt;
use serde_json::Value;
use std::sync::Arc;
use tracing::instrument;

pub const DEFAULT_MAX_ITERATIONS: usize = 10;

/// What the loop does when a tool returns an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ToolErrorPolicy {
    /// Send `{"error": ...}` back to the model and keep going.
    #[default]
    ReportToModel,
    /// Abort the run with the tool's error.
    Propagate,
}

/// Calls the model, runs any tools it asks for, feeds the results back, and stops at the
/// first turn without function calls.
pub struct LlmAgent {
    name: String,
    model: Arc<dyn Llm>,
    instruction: Option<String>,
    tools: Vec<Arc<dyn Tool>>,
    generate_config: Option<GenerateContentConfig>,
    max_iterations: usize,
    tool_error_policy: ToolErrorPolicy,
}

pub struct LlmAgentBuilder {
    name: String,
    model: Option<Arc<dyn Llm>>,
    instruction: Option<String>,
    tools: Vec<Arc<dyn Tool>>,
    generate_config: Option<GenerateContentConfig>,
    max_iterations: usize,
    tool_error_policy: ToolErrorPolicy,
}

/// Result of a completed run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentOutput {
    /// Text of the final model turn.
    pub text: String,
    pub turns: usize,
    pub tool_calls: usize,
}

impl LlmAgentBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model: None,
            instruction: None,
            tools: Vec::new(),
            generate_config: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tool_error_policy: ToolErrorPolicy::default(),
        }
    }

    pub fn model(mut self, model: Arc<dyn Llm>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instruction = Some(instruction.into());
        self
    }

    pub fn tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn generate_config(mut self, config: GenerateContentConfig) -> Self {
        self.generate_config = Some(config);
        self
    }

    pub fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn tool_error_policy(mut self, policy: ToolErrorPolicy) -> Self {
        self.tool_error_policy = policy;
        self
    }

    pub fn build(self) -> Result<LlmAgent> {
        let model =
            self.model.ok_or_else(|| AutodocError::Agent("Model is required".to_string()))?;
        if self.max_iterations == 0 {
            return Err(AutodocError::Agent("max_iterations must be at least 1".to_string()));
        }

        Ok(LlmAgent {
            name: self.name,
            model,
            instruction: self.instruction,
            tools: self.tools,
            generate_config: self.generate_config,
            max_iterations: self.max_iterations,
            tool_error_policy: self.tool_error_policy,
        })
    }
}

impl LlmAgent {
    pub fn builder(name: impl Into<String>) -> LlmAgentBuilder {
        LlmAgentBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tools(&self) -> &[Arc<dyn Tool>] {
        &self.tools
    }

    /// Stream every model turn and tool-result batch of one run.
    pub fn run_stream(&self, input: Content) -> EventStream {
        let model = self.model.clone();
        let tools = self.tools.clone();
        let agent_name = self.name.clone();
        let instruction = self.instruction.clone();
        let generate_config = self.generate_config.clone();
        let max_iterations = self.max_iterations;
        let tool_error_policy = self.tool_error_policy;
        let invocation_id = uuid::Uuid::new_v4().to_string();

        let declarations: Vec<(String, Value)> =
            tools.iter().map(|t| (t.name().to_string(), t.declaration())).collect();

        let stream = async_stream::stream! {
            let mut conversation_history = vec![input];
            let mut iteration = 0;

            loop {
                iteration += 1;
                if iteration > max_iterations {
                    yield Err(AutodocError::Agent(
                        format!("Max iterations ({}) exceeded", max_iterations)
                    ));
                    return;
                }

                let mut request = LlmRequest::new(model.name(), conversation_history.clone());
                request.system_instruction = instruction.clone();
                request.config = generate_config.clone();
                for (name, decl) in &declarations {
                    request.tools.insert(name.clone(), decl.clone());
                }

                tracing::debug!(agent = %agent_name, iteration, "calling model");
                let mut response_stream = match model.generate_content(request, false).await {
                    Ok(stream) => stream,
                    Err(e) => {
                        yield Err(e);
                        return;
                    }
                };

                let mut accumulated: Option<Content> = None;
                let mut usage_metadata = None;
                while let Some(chunk) = response_stream.next().await {
                    let chunk = match chunk {
                        Ok(c) => c,
                        Err(e) => {
                            yield Err(e);
                            return;
                        }
                    };
                    if chunk.usage_metadata.is_some() {
                        usage_metadata = chunk.usage_metadata;
                    }
                    if let Some(chunk_content) = chunk.content {
                        match accumulated.as_mut() {
                            Some(acc) => acc.parts.extend(chunk_content.parts),
                            None => accumulated = Some(chunk_content),
                        }
                    }
                }

                let mut model_content = accumulated.unwrap_or_else(|| Content::new(ROLE_MODEL));
                model_content.role = ROLE_MODEL.to_string();

                let mut model_event = Event::new(&invocation_id)
                    .with_author(&agent_name)
                    .with_content(model_content.clone());
                model_event.usage_metadata = usage_metadata;
                yield Ok(model_event);

                let function_calls: Vec<(String, Value, Option<String>)> = model_content
                    .parts
                    .iter()
                    .filter_map(|part| match part {
                        Part::FunctionCall { name, args, id, .. } => {
                            Some((name.clone(), args.clone(), id.clone()))
                        }
                        _ => None,
                    })
                    .collect();
                conversation_history.push(model_content);

                if function_calls.is_empty() {
                    break;
                }

                let mut response_parts = Vec::with_capacity(function_calls.len());
                for (name, args, id) in function_calls {
                    let call_id =
                        id.clone().unwrap_or_else(|| format!("{}_{}", invocation_id, name));
                    let tool = tools.iter().find(|t| t.name() == name);
                    let tool_result = if let Some(tool) = tool {
                        tracing::debug!(agent = %agent_name, tool = %name, "executing tool");
                        let tool_ctx: Arc<dyn ToolContext> =
                            Arc::new(AgentToolContext::new(&invocation_id, &agent_name, call_id));
                        match tool.execute(tool_ctx, args).await {
                            Ok(result) => result,
                            Err(e) if tool_error_policy == ToolErrorPolicy::Propagate => {
                                yield Err(e);
                                return;
                            }
                            Err(e) => serde_json::json!({ "error": e.to_string() }),
                        }
                    } else {
                        tracing::warn!(
                            agent = %agent_name,
                            tool = %name,
                            "model requested unknown tool"
                        );
                        serde_json::json!({ "error": format!("Tool {} not found", name) })
                    };
                    response_parts.push(Part::function_response(name, tool_result, id));
                }

                let function_content =
                    Content { role: ROLE_FUNCTION.to_string(), parts: response_parts };
                yield Ok(Event::new(&invocation_id)
                    .with_author(&agent_name)
                    .with_content(function_content.clone()));
                conversation_history.push(function_content);
            }
        };

        Box::pin(stream)
    }

    /// Drive a run to completion and return the final reply.
    #[instrument(skip(self, input), fields(agent = %self.name))]
    pub async fn run(&self, input: Content) -> Result<AgentOutput> {
        let mut stream = self.run_stream(input);
        let mut output = AgentOutput::default();

        while let Some(event) = stream.next().await {
            let event = event?;
            let Some(content) = event.content else { continue };
            if content.role != ROLE_MODEL {
                continue;
            }
            output.turns += 1;
            let calls = content.function_calls().count();
            output.tool_calls += calls;
            if calls == 0 {
                output.text = content.text();
            }
        }

        tracing::info!(turns = output.turns, tool_calls = output.tool_calls, "agent run complete");
        Ok(output)
    }

    /// Convenience for a single user message.
    pub async fn ask(&self, message: impl Into<String>) -> Result<AgentOutput> {
        self.run(Content::user(message)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autodoc_model::MockLlm;

    #[test]
    fn test_build_requires_model() {
        let err = LlmAgent::builder("researcher").build().err().unwrap();
        assert_eq!(err.to_string(), "Agent error: Model is required");
    }

    #[test]
    fn test_build_rejects_zero_iterations() {
        let result = LlmAgent::builder("a")
            .model(Arc::new(MockLlm::new("m")))
            .max_iterations(0)
            .build();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_plain_reply() {
        let model = Arc::new(MockLlm::new("m").with_text("The code imports math."));
        let agent = LlmAgent::builder("researcher")
            .model(model.clone())
            .instruction("You are a Code Research Specialist.")
            .build()
            .unwrap();

        let output = agent.ask("Analyze this Python code").await.unwrap();
        assert_eq!(output.text, "The code imports math.");
        assert_eq!(output.turns, 1);
        assert_eq!(output.tool_calls, 0);

        let requests = model.requests();
        assert_eq!(
            requests[0].system_instruction.as_deref(),
            Some("You are a Code Research Specialist.")
        );
        assert_eq!(requests[0].contents[0].text(), "Analyze this Python code");
    }
}
