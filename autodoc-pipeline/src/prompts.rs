//! System instructions and user messages for the three model-backed steps.

pub const RESEARCH_PROMPT: &str = "You are a Code Research Specialist. Analyze the provided \
Python code and:

1. Check if the code already has documentation (docstrings, comments)
2. Identify all imported libraries and understand their purpose
3. Understand what the code does and what kind of tests would be appropriate
4. Research any unfamiliar libraries using the search tool

Be thorough but concise in your analysis.";

pub const DOCUMENT_PROMPT: &str = "You are a Documentation Generator. Add simple, clear \
documentation to the code:

1. Add docstrings to functions and classes (keep them concise)
2. Add brief comments for complex logic
3. Maintain original code functionality
4. Use simple, readable formatting

Return ONLY the documented code, no explanations.";

pub const ANALYZE_PROMPT: &str = "You are a Code Analyzer and Tester. Your tasks:

1. Execute the code to test its functionality
2. Try different test scenarios and inputs
3. Identify any issues, errors, or potential problems
4. Document the input/output behavior

Use the code execution tool to run tests and capture results.";

pub fn research_message(code: &str) -> String {
    format!("Analyze this Python code:\n\n{}", code)
}

/// The documentation instructions are repeated ahead of the code, on top of the system
/// instruction.
pub fn document_message(code: &str, libraries: &[String]) -> String {
    format!(
        "{}\n\n\
         Code to document:\n{}\n\n\
         Libraries used: {}\n\n\
         Please add comprehensive documentation including:\n\
         - Detailed docstrings for all functions and classes\n\
         - Inline comments explaining complex logic\n\
         - Comments for important variables and calculations\n\
         - Warning comments for potential issues",
        DOCUMENT_PROMPT,
        code,
        libraries.join(", ")
    )
}

pub fn analyze_message(code: &str) -> String {
    format!(
        "Analyze and test this Python code:\n\n{}\n\n\
         Execute the code and try different test scenarios. \
         Document any issues and the input/output behavior.",
        code
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_keep_their_line_structure() {
        assert!(RESEARCH_PROMPT.starts_with("You are a Code Research Specialist. Analyze the"));
        assert!(RESEARCH_PROMPT.contains("\n\n1. Check if the code already has documentation"));
        assert!(DOCUMENT_PROMPT.ends_with("Return ONLY the documented code, no explanations."));
        assert!(ANALYZE_PROMPT.contains("4. Document the input/output behavior\n"));
    }

    #[test]
    fn test_research_message() {
        assert_eq!(research_message("import os"), "Analyze this Python code:\n\nimport os");
    }

    #[test]
    fn test_document_message_lists_libraries() {
        let msg = document_message("x = 1", &["math".to_string(), "random".to_string()]);
        assert!(msg.starts_with(DOCUMENT_PROMPT));
        assert!(msg.contains(
            "no explanations.\n\nCode to document:\nx = 1\n\nLibraries used: math, random\n"
        ));
        assert!(msg.ends_with("- Warning comments for potential issues"));
    }

    #[test]
    fn test_document_message_without_libraries() {
        let msg = document_message("x = 1", &[]);
        assert!(msg.contains("Libraries used: \n"));
    }

    #[test]
    fn test_analyze_message() {
        let msg = analyze_message("print(1)");
        assert!(msg.starts_with("Analyze and test this Python code:\n\nprint(1)\n\n"));
        assert!(msg.ends_with("Document any issues and the input/output behavior."));
    }
}
