use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

use super::model::NormalizedRow;

// ---------------------------------------------------------------------------
// TeacherSummary – one row per teacher
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct TeacherSummary {
    pub teacher_id: String,
    pub full_name: String,
    pub category: String,
    pub academic_info: String,
    /// Non-empty shifts the teacher's rows are taught in.
    pub shifts: BTreeSet<String>,
    pub subject_count: usize,
    pub total_hours: f64,
}

/// Group rows by teacher id and sum their hours.
///
/// Groups come out in order of first appearance. Name, category and
/// academic info are taken from the first row of each group.
pub fn summarize<'a, I>(rows: I) -> Vec<TeacherSummary>
where
    I: IntoIterator<Item = &'a NormalizedRow>,
{
    let mut slots: HashMap<&'a str, usize> = HashMap::new();
    let mut summaries: Vec<TeacherSummary> = Vec::new();

    for row in rows {
        let slot = *slots.entry(row.teacher_id.as_str()).or_insert_with(|| {
            summaries.push(TeacherSummary {
                teacher_id: row.teacher_id.clone(),
                full_name: row.full_name.clone(),
                category: row.category.clone(),
                academic_info: row.academic_info.clone(),
                shifts: BTreeSet::new(),
                subject_count: 0,
                total_hours: 0.0,
            });
            summaries.len() - 1
        });

        let summary = &mut summaries[slot];
        summary.total_hours += row.hours;
        summary.subject_count += 1;
        if !row.shift.is_empty() {
            summary.shifts.insert(row.shift.clone());
        }
    }

    summaries
}

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WorkloadMetrics {
    pub teachers: usize,
    pub total_hours: f64,
    /// `None` when there are no teachers.
    pub mean_hours: Option<f64>,
}

impl WorkloadMetrics {
    pub fn from_summaries(summaries: &[TeacherSummary]) -> Self {
        let teachers = summaries.len();
        let total_hours: f64 = summaries.iter().map(|s| s.total_hours).sum();
        WorkloadMetrics {
            teachers,
            total_hours,
            mean_hours: (teachers > 0).then(|| total_hours / teachers as f64),
        }
    }
}

// ---------------------------------------------------------------------------
// Load bands
// ---------------------------------------------------------------------------

/// Coarse classification of a teacher's total against the load ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadBand {
    /// Below half the ceiling.
    Light,
    /// At least half the ceiling.
    Full,
    /// At or above the ceiling.
    Over,
}

impl LoadBand {
    pub fn classify(total_hours: f64, ceiling: f64) -> Self {
        if total_hours >= ceiling {
            LoadBand::Over
        } else if total_hours >= ceiling / 2.0 {
            LoadBand::Full
        } else {
            LoadBand::Light
        }
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    /// First-appearance order, i.e. no re-sorting.
    File,
    TeacherId,
    Name,
    Category,
    Hours,
}

/// Re-sort summaries for display. Stable, so ties keep their current order.
pub fn sort_summaries(summaries: &mut [TeacherSummary], key: SortKey, ascending: bool) {
    if key == SortKey::File {
        return;
    }
    summaries.sort_by(|a, b| {
        let ord = match key {
            SortKey::File => Ordering::Equal,
            SortKey::TeacherId => compare_ids(&a.teacher_id, &b.teacher_id),
            SortKey::Name => a.full_name.cmp(&b.full_name),
            SortKey::Category => a.category.cmp(&b.category),
            SortKey::Hours => a.total_hours.total_cmp(&b.total_hours),
        };
        if ascending {
            ord
        } else {
            ord.reverse()
        }
    });
}

/// Numeric ids compare by value, anything else lexically after them.
fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
