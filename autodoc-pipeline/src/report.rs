//! The plain-text analysis report written at the end of a run.

use crate::state::PipelineState;
use std::fmt::Write;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Local wall-clock time in [`TIMESTAMP_FORMAT`].
pub fn report_timestamp() -> String {
    chrono::Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Render the report for `state`. `code_file` is the name the rewritten source was saved as.
pub fn render_report(state: &PipelineState, timestamp: &str, code_file: &str) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = writeln!(out, "# Code Analysis Results");
    let _ = writeln!(out, "Generated on: {}\n", timestamp);

    out.push_str("## Libraries Used\n");
    if state.libraries_used.is_empty() {
        out.push_str("- No libraries identified\n");
    }
    for lib in &state.libraries_used {
        let _ = writeln!(out, "- {}", lib);
    }
    out.push('\n');

    out.push_str("## Issues and Recommendations\n");
    if state.issues_found.is_empty() {
        out.push_str("- No critical issues identified\n");
    }
    for (i, issue) in state.issues_found.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, issue);
    }
    out.push('\n');

    out.push_str("## Test Results and I/O Behavior\n");
    if state.test_results.is_empty() {
        out.push_str("- No test results captured\n");
    }
    for (i, result) in state.test_results.iter().enumerate() {
        let _ = write!(out, "### Test {}\n{}\n\n", i + 1, result);
    }
    out.push('\n');

    out.push_str("## Usage Guidelines\n");
    let _ = writeln!(out, "1. Review the documented code in {}", code_file);
    out.push_str("2. Address any issues or recommendations listed above\n");
    out.push_str("3. Test the code with various input scenarios\n");
    out.push_str("4. Validate functionality before production use\n");

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_report() {
        let mut state = PipelineState::new("import math");
        state.libraries_used = vec!["math".into(), "random".into()];
        state.issues_found = vec!["divide_numbers(1, 0) raises ZeroDivisionError".into()];
        state.test_results = vec!["Results: 8, 78.54, 5.0, 20".into()];

        let report = render_report(&state, "2025-01-02 03:04:05", "code.py");
        let expected = "# Code Analysis Results\n\
                        Generated on: 2025-01-02 03:04:05\n\
                        \n\
                        ## Libraries Used\n\
                        - math\n\
                        - random\n\
                        \n\
                        ## Issues and Recommendations\n\
                        1. divide_numbers(1, 0) raises ZeroDivisionError\n\
                        \n\
                        ## Test Results and I/O Behavior\n\
                        ### Test 1\n\
                        Results: 8, 78.54, 5.0, 20\n\
                        \n\
                        \n\
                        ## Usage Guidelines\n\
                        1. Review the documented code in code.py\n\
                        2. Address any issues or recommendations listed above\n\
                        3. Test the code with various input scenarios\n\
                        4. Validate functionality before production use\n";
        assert_eq!(report, expected);
    }

    #[test]
    fn test_empty_sections() {
        let state = PipelineState::new("x = 1");
        let report = render_report(&state, "2025-01-02 03:04:05", "out.py");
        assert!(report.contains("## Libraries Used\n- No libraries identified\n\n"));
        assert!(
            report.contains("## Issues and Recommendations\n- No critical issues identified\n")
        );
        assert!(report.contains("## Test Results and I/O Behavior\n- No test results captured\n"));
        assert!(report.contains("1. Review the documented code in out.py\n"));
    }

    #[test]
    fn test_timestamp_shape() {
        let ts = report_timestamp();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, TIMESTAMP_FORMAT).is_ok());
    }
}
