use serde::{Deserialize, Serialize};

pub const ROLE_USER: &str = "user";
pub const ROLE_MODEL: &str = "model";
pub const ROLE_FUNCTION: &str = "function";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponseData {
    pub name: String,
    pub response: serde_json::Value,
}

/// A role-tagged message exchanged with a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    FunctionCall {
        name: String,
        args: serde_json::Value,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
        /// Opaque signature some Gemini models attach to function calls. It has to be
        /// echoed back unchanged on the next turn.
        #[serde(skip_serializing_if = "Option::is_none")]
        thought_signature: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    FunctionResponse {
        function_response: FunctionResponseData,
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
}

impl Content {
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into(), parts: Vec::new() }
    }

    /// Shorthand for a single-text user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(ROLE_USER).with_text(text)
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Part::Text { text: text.into() });
        self
    }

    pub fn with_part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Concatenation of every text part, in order.
    pub fn text(&self) -> String {
        self.parts.iter().filter_map(Part::text).collect()
    }

    /// Function calls requested in this message.
    pub fn function_calls(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter().filter(|p| matches!(p, Part::FunctionCall { .. }))
    }

    pub fn has_function_calls(&self) -> bool {
        self.function_calls().next().is_some()
    }
}

impl Part {
    /// Returns the text content if this is a Text part, None otherwise
    pub fn text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn text_part(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn function_call(name: impl Into<String>, args: serde_json::Value) -> Self {
        Part::FunctionCall { name: name.into(), args, id: None, thought_signature: None }
    }

    pub fn function_response(
        name: impl Into<String>,
        response: serde_json::Value,
        id: Option<String>,
    ) -> Self {
        Part::FunctionResponse {
            function_response: FunctionResponseData { name: name.into(), response },
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_content_creation() {
        let content = Content::user("Analyze this Python code");
        assert_eq!(content.role, ROLE_USER);
        assert_eq!(content.parts.len(), 1);
        assert_eq!(content.text(), "Analyze this Python code");
    }

    #[test]
    fn test_text_joins_parts_and_skips_calls() {
        let content = Content::new(ROLE_MODEL)
            .with_text("first ")
            .with_part(Part::function_call("execute_code", json!({"code": "print(1)"})))
            .with_text("second");
        assert_eq!(content.text(), "first second");
        assert!(content.has_function_calls());
        assert_eq!(content.function_calls().count(), 1);
    }

    #[test]
    fn test_part_text_accessor() {
        assert_eq!(Part::text_part("hello").text(), Some("hello"));
        assert_eq!(Part::function_call("f", json!({})).text(), None);
    }

    #[test]
    fn test_function_response_serialization() {
        let part = Part::function_response("search_library_info", json!({"result": "ok"}), None);
        let value = serde_json::to_value(&part).unwrap();
        assert_eq!(value["functionResponse"]["name"], "search_library_info");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn test_untagged_text_deserialization() {
        let part: Part = serde_json::from_value(json!({"text": "hi"})).unwrap();
        assert_eq!(part, Part::text_part("hi"));
    }
}
