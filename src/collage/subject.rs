//! Subject markers.
//!
//! Detection is literal substring containment against [`SUBJECT_MARKERS`];
//! there is no tokenization, so "我们" matches the "我" marker.

use crate::constants::SUBJECT_MARKERS;

/// Markers contained in `text`, in vocabulary order.
pub fn markers_in(text: &str) -> impl Iterator<Item = &'static str> + '_ {
    SUBJECT_MARKERS
        .iter()
        .copied()
        .filter(move |marker| text.contains(marker))
}

/// Whether some marker appears in both texts.
pub fn shares_subject(a: &str, b: &str) -> bool {
    markers_in(a).any(|marker| b.contains(marker))
}
