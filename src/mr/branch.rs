//! Title and description defaults derived from the source branch
//!
//! Branches are expected to be named `<issue>-<slug>`, e.g.
//! `42-fix-login`. All functions here are pure.

use regex::Regex;
use std::sync::LazyLock;

/// Marker prepended to work-in-progress titles
pub const WIP_PREFIX: &str = "WIP: ";

static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)").expect("valid regex"));

/// Issue number referenced by a branch name
///
/// Takes the leading digits of the text before the first `-`. Returns
/// `None` when there are no leading digits or they parse to `0`.
///
/// ```
/// use gitlab_flow::mr::issue_ref;
///
/// assert_eq!(issue_ref("42-fix-login"), Some(42));
/// assert_eq!(issue_ref("feature-login"), None);
/// assert_eq!(issue_ref("0-hotfix"), None);
/// ```
pub fn issue_ref(branch: &str) -> Option<u64> {
    let head = branch.split('-').next().unwrap_or_default();
    LEADING_NUMBER
        .captures(head)
        .and_then(|c| c[1].parse::<u64>().ok())
        .filter(|n| *n > 0)
}

/// Title used when none is given explicitly
///
/// `issue_title` is the title of the issue the branch references, when
/// there is one.
pub fn default_title(source: &str, issue_title: Option<&str>) -> String {
    format!("Resolve \"{}\"", issue_title.unwrap_or(source))
}

/// Apply the work-in-progress marker
pub fn with_wip(title: String, wip: bool) -> String {
    if wip { format!("{WIP_PREFIX}{title}") } else { title }
}

/// Description used when none is given explicitly
pub fn default_description(issue: Option<u64>) -> Option<String> {
    issue.map(|n| format!("Closes #{n}"))
}
