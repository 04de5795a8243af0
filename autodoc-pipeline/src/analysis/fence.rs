const FENCE: &str = "```";

/// Pull the first fenced block out of a model reply.
///
/// A block tagged with `language` wins over an untagged one. The content between the opening
/// fence and the next fence (or the end of text) is returned trimmed. Text with no fence at all
/// is returned unchanged.
pub fn strip_code_fence(reply: &str, language: &str) -> String {
    let tagged = format!("{FENCE}{language}");
    let rest = if let Some((_, rest)) = reply.split_once(tagged.as_str()) {
        rest
    } else if let Some((_, rest)) = reply.split_once(FENCE) {
        rest
    } else {
        return reply.to_string();
    };

    let body = rest.split_once(FENCE).map_or(rest, |(body, _)| body);
    body.trim().to_string()
}
