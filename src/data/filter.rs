use std::collections::BTreeSet;

use super::model::NormalizedRow;

// ---------------------------------------------------------------------------
// Filter predicate: free-text query and shift selection
// ---------------------------------------------------------------------------

/// Current user selection.
///
/// * `query` – case-insensitive substring matched against the full name,
///   the teacher id or the subject (any of the three).
/// * `shifts` – allowed shift values.
///
/// A blank query or an empty shift set means "no filter" on that
/// dimension. Both active dimensions must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowFilter {
    pub query: String,
    pub shifts: BTreeSet<String>,
}

impl RowFilter {
    /// Whether any dimension restricts the rows.
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty() || !self.shifts.is_empty()
    }
}

/// A [`RowFilter`] with the query lower-cased once.
struct Matcher<'f> {
    needle: Option<String>,
    shifts: &'f BTreeSet<String>,
}

impl<'f> Matcher<'f> {
    fn new(filter: &'f RowFilter) -> Self {
        let query = filter.query.trim();
        Matcher {
            needle: (!query.is_empty()).then(|| query.to_lowercase()),
            shifts: &filter.shifts,
        }
    }

    fn matches(&self, row: &NormalizedRow) -> bool {
        if !self.shifts.is_empty() && !self.shifts.contains(&row.shift) {
            return false;
        }
        match &self.needle {
            None => true,
            Some(needle) => [&row.full_name, &row.teacher_id, &row.subject]
                .iter()
                .any(|text| text.to_lowercase().contains(needle.as_str())),
        }
    }
}

/// Return indices of rows that pass the filter, in row order.
pub fn filtered_indices(rows: &[NormalizedRow], filter: &RowFilter) -> Vec<usize> {
    if !filter.is_active() {
        return (0..rows.len()).collect();
    }
    let matcher = Matcher::new(filter);
    rows.iter()
        .enumerate()
        .filter(|(_, row)| matcher.matches(row))
        .map(|(i, _)| i)
        .collect()
}

/// Rows that pass the filter, in row order.
pub fn filter_rows<'a>(rows: &'a [NormalizedRow], filter: &RowFilter) -> Vec<&'a NormalizedRow> {
    filtered_indices(rows, filter)
        .into_iter()
        .map(|i| &rows[i])
        .collect()
}
