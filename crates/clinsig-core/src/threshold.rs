//! Allele-frequency gate on decoded significance.

use clinsig_model::Significance;

/// Substring marking the pathogenic family of labels.
///
/// `likely-pathogenic` contains it too and therefore also passes.
pub const PATHOGENIC_MARKER: &str = "pathogenic";

/// True when the significance mentions `pathogenic` and `max_aaf_all` is
/// strictly above `aaf_cutoff`.
///
/// A composite is comma-joined into its string form and evaluated once more;
/// the type cannot nest further, so that is the only recursion.
pub fn is_actionable(significance: &Significance, max_aaf_all: f64, aaf_cutoff: f64) -> bool {
    match significance {
        Significance::Scalar(label) => is_actionable_label(label, max_aaf_all, aaf_cutoff),
        Significance::Composite(_) => {
            let canonical = Significance::Scalar(significance.canonical().into_owned());
            is_actionable(&canonical, max_aaf_all, aaf_cutoff)
        }
    }
}

/// [`is_actionable`] on an already canonical label string.
pub fn is_actionable_label(label: &str, max_aaf_all: f64, aaf_cutoff: f64) -> bool {
    label.contains(PATHOGENIC_MARKER) && max_aaf_all > aaf_cutoff
}
