//! Human-readable summaries of scrub findings

use crate::types::PiiFinding;

/// Summary shown when nothing was removed
pub const NO_PII_DETECTED: &str = "No PII detected";

/// Render findings as a one-line summary.
///
/// Entries are emitted in category order whatever order `findings` arrives in.
pub fn format_summary(findings: &[PiiFinding]) -> String {
    if findings.is_empty() {
        return NO_PII_DETECTED.to_string();
    }

    let mut ordered: Vec<&PiiFinding> = findings.iter().collect();
    ordered.sort_by_key(|f| f.category.position());

    let parts: Vec<String> = ordered
        .into_iter()
        .map(|f| {
            let label = if f.count == 1 {
                f.category.label()
            } else {
                f.category.plural_label()
            };
            format!("{} {}", f.count, label)
        })
        .collect();

    format!("Found and removed: {}", parts.join(", "))
}
