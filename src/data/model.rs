use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::normalize::detect_interleaved_blocks;

// ---------------------------------------------------------------------------
// RawRow – one record of the export, as read
// ---------------------------------------------------------------------------

/// One data record of the source file. Empty cells are `None`; present
/// cells keep their text as written, whitespace included.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRow {
    pub teacher_id: Option<String>,
    pub paternal_surname: Option<String>,
    pub maternal_surname: Option<String>,
    pub first_name: Option<String>,
    pub category: Option<String>,
    pub curp: Option<String>,
    pub academic_info: Option<String>,
    pub subject: Option<String>,
    pub shift: Option<String>,
    /// Hours cell kept as text; coercion happens in the normalizer.
    pub hours: Option<String>,
}

impl RawRow {
    /// The teacher-identifying cells, which the export only writes on the
    /// first row of each teacher block.
    pub fn teacher_fields_mut(&mut self) -> [&mut Option<String>; 7] {
        [
            &mut self.teacher_id,
            &mut self.paternal_surname,
            &mut self.maternal_surname,
            &mut self.first_name,
            &mut self.category,
            &mut self.curp,
            &mut self.academic_info,
        ]
    }
}

// ---------------------------------------------------------------------------
// NormalizedRow – one subject assignment with teacher metadata filled in
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub teacher_id: String,
    pub paternal_surname: String,
    pub maternal_surname: String,
    pub first_name: String,
    pub category: String,
    pub curp: String,
    pub academic_info: String,
    /// `first_name paternal_surname maternal_surname`.
    pub full_name: String,
    /// Never empty.
    pub subject: String,
    pub shift: String,
    pub hours: f64,
}

// ---------------------------------------------------------------------------
// Load diagnostics
// ---------------------------------------------------------------------------

/// Counters collected while normalizing one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    /// Data records read after the header.
    pub raw_rows: usize,
    /// Separator rows dropped because they had no subject.
    pub dropped_without_subject: usize,
    /// Rows with a subject that appear before any teacher id.
    pub dropped_without_teacher: usize,
    /// Non-empty hours cells that could not be parsed and became 0.
    pub hours_defaulted: usize,
    /// Rows whose hours parsed to a negative number (kept as is).
    pub negative_hours: usize,
}

/// A teacher id that shows up again after another teacher's block started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterleavedBlock {
    pub teacher_id: String,
    /// Index into `Workload::rows` where the id reappears.
    pub row: usize,
}

// ---------------------------------------------------------------------------
// Workload – the complete cleaned table
// ---------------------------------------------------------------------------

/// The normalized table of one source file plus pre-computed indices.
/// Never mutated after construction; reloads build a new one.
#[derive(Debug, Clone)]
pub struct Workload {
    pub source: PathBuf,
    pub rows: Vec<NormalizedRow>,
    /// Distinct non-empty shifts of the unfiltered table, first-appearance order.
    pub shifts: Vec<String>,
    pub stats: NormalizeStats,
    pub interleaved: Vec<InterleavedBlock>,
}

impl Workload {
    /// Build the shift index and block diagnostics from normalized rows.
    pub fn new(source: &Path, rows: Vec<NormalizedRow>, stats: NormalizeStats) -> Self {
        let shifts = {
            let mut seen = BTreeSet::new();
            rows.iter()
                .map(|row| row.shift.as_str())
                .filter(|shift| !shift.is_empty() && seen.insert(*shift))
                .map(str::to_string)
                .collect()
        };
        let interleaved = detect_interleaved_blocks(&rows);

        Workload {
            source: source.to_path_buf(),
            rows,
            shifts,
            stats,
            interleaved,
        }
    }

    /// Number of normalized rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total hours of the unfiltered table.
    pub fn total_hours(&self) -> f64 {
        self.rows.iter().map(|row| row.hours).sum()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::row;
    use super::*;

    #[test]
    fn shifts_keep_first_appearance_order_and_skip_blanks() {
        let rows = vec![
            row("1", "ANA", "MATH", "VESPERTINO", 4.0),
            row("1", "ANA", "ART", "", 2.0),
            row("2", "LUIS", "BIO", "MATUTINO", 3.0),
            row("2", "LUIS", "CHEM", "VESPERTINO", 1.0),
        ];
        let workload = Workload::new(Path::new("x.csv"), rows, NormalizeStats::default());
        assert_eq!(workload.shifts, vec!["VESPERTINO", "MATUTINO"]);
        assert_eq!(workload.len(), 4);
        assert_eq!(workload.total_hours(), 10.0);
        assert!(workload.interleaved.is_empty());
    }

    #[test]
    fn teacher_fields_cover_identity_columns_only() {
        let mut raw = RawRow {
            subject: Some("MATH".into()),
            shift: Some("MATUTINO".into()),
            hours: Some("3".into()),
            ..Default::default()
        };
        for field in raw.teacher_fields_mut() {
            *field = Some("X".into());
        }
        assert_eq!(raw.curp.as_deref(), Some("X"));
        assert_eq!(raw.subject.as_deref(), Some("MATH"));
        assert_eq!(raw.shift.as_deref(), Some("MATUTINO"));
        assert_eq!(raw.hours.as_deref(), Some("3"));
    }
}
