use autodoc_core::ToolContext;

/// Context handed to a tool for one function call.
#[derive(Debug, Clone)]
pub struct AgentToolContext {
    invocation_id: String,
    agent_name: String,
    function_call_id: String,
}

impl AgentToolContext {
    pub fn new(
        invocation_id: impl Into<String>,
        agent_name: impl Into<String>,
        function_call_id: impl Into<String>,
    ) -> Self {
        Self {
            invocation_id: invocation_id.into(),
            agent_name: agent_name.into(),
            function_call_id: function_call_id.into(),
        }
    }
}

impl ToolContext for AgentToolContext {
    fn invocation_id(&self) -> &str {
        &self.invocation_id
    }

    fn agent_name(&self) -> &str {
        &self.agent_name
    }

    fn function_call_id(&self) -> &str {
        &self.function_call_id
    }
}
