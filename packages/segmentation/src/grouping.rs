//! Grouping of lines into clause candidates.

use crate::structure::is_clause_start;

/// Group consecutive lines into clauses.
///
/// Each clause-start line closes the clause accumulated so far and opens a
/// new one; every other line continues the open clause. Lines within a clause
/// are joined with a single space.
///
/// Input without any clause-start line yields exactly one clause holding the
/// whole document. Deciding whether that is good enough is left to the caller.
///
/// # Examples
/// ```
/// use contract_risk_segmentation::group;
///
/// let lines = ["1 Scope of services", "as described below.", "2 Term"];
/// assert_eq!(group(&lines), vec!["1 Scope of services as described below.", "2 Term"]);
/// ```
pub fn group<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    let (mut clauses, open) = lines.iter().map(|line| line.as_ref()).fold(
        (Vec::new(), Vec::<&str>::new()),
        |(mut clauses, mut open), line| {
            if is_clause_start(line) && !open.is_empty() {
                clauses.push(close(&open));
                open.clear();
            }
            open.push(line);
            (clauses, open)
        },
    );

    if !open.is_empty() {
        clauses.push(close(&open));
    }

    clauses
}

/// Join an accumulated clause into its final text.
fn close(lines: &[&str]) -> String {
    lines.join(" ").trim().to_string()
}
