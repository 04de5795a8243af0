//! Wire types for the Gemini `generateContent` endpoint and conversions to core types.

use autodoc_core::{
    AutodocError, Content, FinishReason, LlmRequest, LlmResponse, Part, ROLE_MODEL, Result,
    UsageMetadata,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<WireContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<WireTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WireContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<WirePart>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<WireFunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<WireFunctionResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought_signature: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFunctionResponse {
    pub name: String,
    pub response: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTool {
    pub function_declarations: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub usage_metadata: Option<WireUsageMetadata>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<WireContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireUsageMetadata {
    #[serde(default)]
    pub prompt_token_count: i32,
    #[serde(default)]
    pub candidates_token_count: i32,
    #[serde(default)]
    pub total_token_count: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Gemini accepts only `user` and `model`; function results travel as user turns.
fn wire_role(role: &str) -> &'static str {
    if role == ROLE_MODEL { "model" } else { "user" }
}

fn part_to_wire(part: &Part) -> WirePart {
    match part {
        Part::Text { text } => WirePart { text: Some(text.clone()), ..Default::default() },
        Part::FunctionCall { name, args, thought_signature, .. } => WirePart {
            function_call: Some(WireFunctionCall { name: name.clone(), args: args.clone() }),
            thought_signature: thought_signature.clone(),
            ..Default::default()
        },
        Part::FunctionResponse { function_response, .. } => WirePart {
            function_response: Some(WireFunctionResponse {
                name: function_response.name.clone(),
                response: wrap_response(&function_response.response),
            }),
            ..Default::default()
        },
    }
}

/// `functionResponse.response` must be a JSON object.
fn wrap_response(value: &Value) -> Value {
    match value {
        Value::Object(_) => value.clone(),
        other => serde_json::json!({ "result": other }),
    }
}

pub fn content_to_wire(content: &Content) -> WireContent {
    WireContent {
        role: Some(wire_role(&content.role).to_string()),
        parts: content.parts.iter().map(part_to_wire).collect(),
    }
}

pub fn build_request(
    request: &LlmRequest,
    default_temperature: Option<f32>,
) -> GenerateContentRequest {
    let system_instruction = request.system_instruction.as_ref().map(|text| WireContent {
        role: None,
        parts: vec![WirePart { text: Some(text.clone()), ..Default::default() }],
    });

    // Sorted so request bodies are stable across runs.
    let mut names: Vec<&String> = request.tools.keys().collect();
    names.sort();
    let declarations: Vec<Value> = names.into_iter().map(|n| request.tools[n].clone()).collect();
    let tools = if declarations.is_empty() {
        Vec::new()
    } else {
        vec![WireTool { function_declarations: declarations }]
    };

    let config = request.config.clone().unwrap_or_default();
    let generation_config = GenerationConfig {
        temperature: config.temperature.or(default_temperature),
        top_p: config.top_p,
        top_k: config.top_k,
        max_output_tokens: config.max_output_tokens,
    };
    let has_config = generation_config.temperature.is_some()
        || generation_config.top_p.is_some()
        || generation_config.top_k.is_some()
        || generation_config.max_output_tokens.is_some();

    GenerateContentRequest {
        contents: request.contents.iter().map(content_to_wire).collect(),
        system_instruction,
        tools,
        generation_config: has_config.then_some(generation_config),
    }
}

fn convert_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "STOP" => FinishReason::Stop,
        "MAX_TOKENS" => FinishReason::MaxTokens,
        "SAFETY" | "PROHIBITED_CONTENT" | "BLOCKLIST" | "SPII" => FinishReason::Safety,
        "RECITATION" => FinishReason::Recitation,
        _ => FinishReason::Other,
    }
}

pub fn convert_response(response: GenerateContentResponse) -> Result<LlmResponse> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        let reason = response
            .prompt_feedback
            .and_then(|f| f.block_reason)
            .unwrap_or_else(|| "no candidates returned".to_string());
        return Err(AutodocError::Model(format!("Gemini returned no content: {reason}")));
    };

    let mut content = Content::new(ROLE_MODEL);
    for part in candidate.content.map(|c| c.parts).unwrap_or_default() {
        if part.thought == Some(true) {
            continue;
        }
        if let Some(call) = part.function_call {
            content.parts.push(Part::FunctionCall {
                name: call.name,
                args: call.args,
                id: None,
                thought_signature: part.thought_signature,
            });
        } else if let Some(text) = part.text {
            content.parts.push(Part::Text { text });
        }
    }

    let mut llm_response = LlmResponse::new(content);
    llm_response.finish_reason = candidate.finish_reason.as_deref().map(convert_finish_reason);
    llm_response.usage_metadata = response.usage_metadata.map(|u| UsageMetadata {
        prompt_token_count: u.prompt_token_count,
        candidates_token_count: u.candidates_token_count,
        total_token_count: u.total_token_count,
    });
    Ok(llm_response)
}
