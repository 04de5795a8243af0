//! Static checks and reply post-processing used by the steps.

mod docs;
mod fence;
mod imports;
mod issues;

pub use docs::{DOCUMENTATION_MARKERS, has_documentation};
pub use fence::strip_code_fence;
pub use imports::extract_imports;
pub use issues::{
    Findings, ISSUE_KEYWORDS, MIN_ISSUE_CHARS, NO_ISSUES_SENTINEL, NO_RESULTS_SENTINEL,
    extract_findings, extract_issues,
};
