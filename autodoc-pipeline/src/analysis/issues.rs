/// Lowercase keywords that mark a report line as an issue.
pub const ISSUE_KEYWORDS: [&str; 6] = ["error", "issue", "problem", "fail", "exception", "warning"];

/// Lines this short are never issues.
pub const MIN_ISSUE_CHARS: usize = 10;

pub const NO_ISSUES_SENTINEL: &str = "No critical issues identified during analysis.";
pub const NO_RESULTS_SENTINEL: &str = "Analysis completed but no detailed results captured";

/// What the Analyze step records from the analysis agent's final reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Findings {
    pub test_results: Vec<String>,
    pub issues: Vec<String>,
}

/// Trimmed lines mentioning an issue keyword and longer than [`MIN_ISSUE_CHARS`].
pub fn extract_issues(report: &str) -> Vec<String> {
    report
        .split('\n')
        .map(str::trim)
        .filter(|line| line.chars().count() > MIN_ISSUE_CHARS)
        .filter(|line| {
            let lower = line.to_lowercase();
            ISSUE_KEYWORDS.iter().any(|k| lower.contains(k))
        })
        .map(str::to_string)
        .collect()
}

/// The whole report as one test result, plus its issue lines. Both lists are never empty.
pub fn extract_findings(report: &str) -> Findings {
    let test_results = if report.is_empty() {
        vec![NO_RESULTS_SENTINEL.to_string()]
    } else {
        vec![report.to_string()]
    };

    let mut issues = extract_issues(report);
    if issues.is_empty() {
        issues.push(NO_ISSUES_SENTINEL.to_string());
    }

    Findings { test_results, issues }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lines_collected() {
        let report = "Ran 4 scenarios.\n\
                      - divide_numbers(1, 0) raises ZeroDivisionError\n\
                      WARNING: calculate_area returns 0 for unknown shapes\n\
                      Everything else fine.";
        assert_eq!(
            extract_issues(report),
            vec![
                "- divide_numbers(1, 0) raises ZeroDivisionError",
                "WARNING: calculate_area returns 0 for unknown shapes",
            ]
        );
    }

    #[test]
    fn test_short_lines_ignored() {
        // "No errors." is exactly 10 characters
        assert!(extract_issues("No errors.\n  error  \n").is_empty());
        assert_eq!(extract_issues("No errors!!"), vec!["No errors!!"]);
    }

    #[test]
    fn test_lines_are_trimmed() {
        assert_eq!(extract_issues("    Potential issue here   \n"), vec!["Potential issue here"]);
    }

    #[test]
    fn test_no_qualifying_lines_gives_sentinel() {
        let findings = extract_findings("All tests passed.\nOutput: 8, 78.54, 5.0, 20");
        assert_eq!(findings.issues, vec![NO_ISSUES_SENTINEL]);
        assert_eq!(findings.test_results, vec!["All tests passed.\nOutput: 8, 78.54, 5.0, 20"]);
    }

    #[test]
    fn test_empty_report_gives_both_sentinels() {
        let findings = extract_findings("");
        assert_eq!(findings.test_results, vec![NO_RESULTS_SENTINEL]);
        assert_eq!(findings.issues, vec![NO_ISSUES_SENTINEL]);
    }
}
