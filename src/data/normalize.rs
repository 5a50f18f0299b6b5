use std::collections::HashSet;

use super::model::{InterleavedBlock, NormalizeStats, NormalizedRow, RawRow};

/// Output of [`normalize`].
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    pub rows: Vec<NormalizedRow>,
    pub stats: NormalizeStats,
}

// ---------------------------------------------------------------------------
// Forward fill
// ---------------------------------------------------------------------------

/// Carry each teacher-identifying cell down into the empty cells below it.
///
/// Subject, shift and hours are never filled. Each column is filled
/// independently, in file order.
pub fn forward_fill(rows: &[RawRow]) -> Vec<RawRow> {
    let mut last: [Option<String>; 7] = Default::default();

    rows.iter()
        .map(|row| {
            let mut filled = row.clone();
            for (cell, last) in filled.teacher_fields_mut().into_iter().zip(last.iter_mut()) {
                match cell {
                    Some(value) => *last = Some(value.clone()),
                    None => *cell = last.clone(),
                }
            }
            filled
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Hours coercion
// ---------------------------------------------------------------------------

/// Parse an hours cell. Missing, unparseable and non-finite values are 0;
/// negative values are returned unchanged.
pub fn coerce_hours(raw: Option<&str>) -> f64 {
    raw.and_then(|text| text.trim().parse::<f64>().ok())
        .filter(|hours| hours.is_finite())
        .unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Forward-fill, drop separator rows, derive the full name and coerce hours.
/// Row order is preserved.
pub fn normalize(raw: &[RawRow]) -> Normalized {
    let mut stats = NormalizeStats {
        raw_rows: raw.len(),
        ..Default::default()
    };
    let mut rows = Vec::with_capacity(raw.len());

    for row in forward_fill(raw) {
        let Some(subject) = row.subject else {
            stats.dropped_without_subject += 1;
            continue;
        };
        let Some(teacher_id) = row.teacher_id else {
            stats.dropped_without_teacher += 1;
            continue;
        };

        let hours = coerce_hours(row.hours.as_deref());
        if hours == 0.0 && row.hours.is_some() && !is_zero_literal(row.hours.as_deref()) {
            stats.hours_defaulted += 1;
        }
        if hours < 0.0 {
            stats.negative_hours += 1;
        }

        let first_name = row.first_name.unwrap_or_default();
        let paternal_surname = row.paternal_surname.unwrap_or_default();
        let maternal_surname = row.maternal_surname.unwrap_or_default();
        let full_name = format!("{first_name} {paternal_surname} {maternal_surname}");

        rows.push(NormalizedRow {
            teacher_id,
            paternal_surname,
            maternal_surname,
            first_name,
            category: row.category.unwrap_or_default(),
            curp: row.curp.unwrap_or_default(),
            academic_info: row.academic_info.unwrap_or_default(),
            full_name,
            subject,
            shift: row.shift.unwrap_or_default(),
            hours,
        });
    }

    Normalized { rows, stats }
}

fn is_zero_literal(raw: Option<&str>) -> bool {
    raw.and_then(|text| text.trim().parse::<f64>().ok()) == Some(0.0)
}

// ---------------------------------------------------------------------------
// Block ordering check
// ---------------------------------------------------------------------------

/// Find teacher ids that come back after a different teacher's rows.
///
/// Forward-fill assumes each teacher occupies one contiguous block; a
/// reappearing id means the export interleaved blocks and filled metadata
/// may belong to the wrong teacher. Every reappearance is reported.
pub fn detect_interleaved_blocks(rows: &[NormalizedRow]) -> Vec<InterleavedBlock> {
    let mut closed: HashSet<&str> = HashSet::new();
    let mut current: Option<&str> = None;
    let mut found = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        let id = row.teacher_id.as_str();
        if current == Some(id) {
            continue;
        }
        if let Some(previous) = current {
            closed.insert(previous);
        }
        if closed.contains(id) {
            found.push(InterleavedBlock {
                teacher_id: id.to_string(),
                row: idx,
            });
        }
        current = Some(id);
    }

    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::row;

    fn raw(id: Option<&str>, name: Option<&str>, subject: Option<&str>, hours: Option<&str>) -> RawRow {
        let teacher = id.is_some();
        let meta = |v: &str| teacher.then(|| v.to_string());
        RawRow {
            teacher_id: id.map(str::to_string),
            paternal_surname: meta("GARCÍA"),
            maternal_surname: meta("LUNA"),
            first_name: name.map(str::to_string),
            category: meta("A1"),
            curp: id.map(|i| format!("CURP{i}")),
            academic_info: meta("LICENCIATURA"),
            subject: subject.map(str::to_string),
            shift: Some("MATUTINO".to_string()),
            hours: hours.map(str::to_string),
        }
    }

    fn sample() -> Vec<RawRow> {
        vec![
            raw(Some("101"), Some("ANA"), Some("MATH"), Some("10")),
            raw(None, None, Some("PHYSICS"), Some("8")),
            raw(None, None, None, None),
            raw(Some("102"), Some("LUIS"), Some("ART"), None),
        ]
    }

    #[test]
    fn fills_teacher_fields_from_previous_row() {
        let filled = forward_fill(&sample());
        assert_eq!(filled[1].teacher_id.as_deref(), Some("101"));
        assert_eq!(filled[1].first_name.as_deref(), Some("ANA"));
        assert_eq!(filled[1].curp.as_deref(), Some("CURP101"));
        assert_eq!(filled[2].teacher_id.as_deref(), Some("101"));
        assert_eq!(filled[3].teacher_id.as_deref(), Some("102"));
    }

    #[test]
    fn fill_leaves_subject_shift_and_hours_alone() {
        let filled = forward_fill(&sample());
        assert_eq!(filled[2].subject, None);
        assert_eq!(filled[2].hours, None);
        assert_eq!(filled[3].hours, None);
    }

    #[test]
    fn forward_fill_is_idempotent() {
        let once = forward_fill(&sample());
        let twice = forward_fill(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn columns_fill_independently() {
        let mut rows = sample();
        // Second teacher block has no first name of its own.
        rows[3].first_name = None;
        let filled = forward_fill(&rows);
        assert_eq!(filled[3].teacher_id.as_deref(), Some("102"));
        assert_eq!(filled[3].first_name.as_deref(), Some("ANA"));
    }

    #[test]
    fn coerces_hours() {
        assert_eq!(coerce_hours(Some("12")), 12.0);
        assert_eq!(coerce_hours(Some(12.to_string().as_str())), 12.0);
        assert_eq!(coerce_hours(Some("12.5")), 12.5);
        assert_eq!(coerce_hours(Some(" 4 ")), 4.0);
        assert_eq!(coerce_hours(Some("")), 0.0);
        assert_eq!(coerce_hours(Some("abc")), 0.0);
        assert_eq!(coerce_hours(Some("NaN")), 0.0);
        assert_eq!(coerce_hours(None), 0.0);
    }

    #[test]
    fn negative_hours_pass_through() {
        assert_eq!(coerce_hours(Some("-3")), -3.0);
    }

    #[test]
    fn drops_rows_without_subject_and_keeps_order() {
        let out = normalize(&sample());
        let subjects: Vec<&str> = out.rows.iter().map(|r| r.subject.as_str()).collect();
        assert_eq!(subjects, vec!["MATH", "PHYSICS", "ART"]);
        assert!(out.rows.iter().all(|r| !r.subject.is_empty()));
        assert_eq!(out.stats.raw_rows, 4);
        assert_eq!(out.stats.dropped_without_subject, 1);
    }

    #[test]
    fn derives_full_name_and_hours() {
        let out = normalize(&sample());
        assert_eq!(out.rows[1].full_name, "ANA GARCÍA LUNA");
        assert_eq!(out.rows[1].teacher_id, "101");
        assert_eq!(out.rows[1].hours, 8.0);
        assert_eq!(out.rows[2].hours, 0.0);
        // A blank cell is not a parse failure.
        assert_eq!(out.stats.hours_defaulted, 0);
    }

    #[test]
    fn counts_recovered_values() {
        let rows = vec![
            raw(Some("1"), Some("A"), Some("X"), Some("n/a")),
            raw(None, None, Some("Y"), Some("0")),
            raw(None, None, Some("Z"), Some("-2")),
        ];
        let out = normalize(&rows);
        assert_eq!(out.stats.hours_defaulted, 1);
        assert_eq!(out.stats.negative_hours, 1);
        assert_eq!(out.rows[2].hours, -2.0);
    }

    #[test]
    fn rows_before_first_teacher_are_dropped() {
        let rows = vec![
            raw(None, None, Some("ORPHAN"), Some("3")),
            raw(Some("1"), Some("A"), Some("X"), Some("1")),
        ];
        let out = normalize(&rows);
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.stats.dropped_without_teacher, 1);
    }

    #[test]
    fn normalizing_filled_rows_changes_nothing() {
        let direct = normalize(&sample());
        let refilled = normalize(&forward_fill(&sample()));
        assert_eq!(direct.rows, refilled.rows);
    }

    #[test]
    fn detects_reappearing_teacher() {
        let rows = vec![
            row("1", "A", "X", "M", 1.0),
            row("1", "A", "Y", "M", 1.0),
            row("2", "B", "X", "M", 1.0),
            row("1", "A", "Z", "M", 1.0),
            row("2", "B", "W", "M", 1.0),
        ];
        let found = detect_interleaved_blocks(&rows);
        assert_eq!(
            found,
            vec![
                InterleavedBlock { teacher_id: "1".into(), row: 3 },
                InterleavedBlock { teacher_id: "2".into(), row: 4 },
            ]
        );
    }

    #[test]
    fn contiguous_blocks_are_clean() {
        let out = normalize(&sample());
        assert!(detect_interleaved_blocks(&out.rows).is_empty());
    }
}
