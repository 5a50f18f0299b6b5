use std::io;
use std::path::{Path, PathBuf};

use csv::StringRecord;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::model::{RawRow, Workload};
use super::normalize::normalize;
use super::schema::{ColumnIndex, Field, Schema};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal load failures. Any of these stops the pipeline for the current
/// file; value-level problems never surface here.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("source file {} not found or unreadable: {source}", path.display())]
    SourceNotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not valid {encoding} text (byte offset {offset})", path.display())]
    Decode {
        path: PathBuf,
        encoding: TextEncoding,
        offset: usize,
    },
    #[error("expected column(s) missing from header: {}", missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },
    #[error("file ends before the header record (expected at record {header_row})")]
    HeaderNotFound { header_row: usize },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// ISO-8859-1: every byte maps to the code point of the same value.
    #[default]
    #[serde(alias = "latin-1", alias = "iso-8859-1")]
    Latin1,
    #[serde(alias = "utf-8")]
    Utf8,
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextEncoding::Latin1 => write!(f, "ISO-8859-1"),
            TextEncoding::Utf8 => write!(f, "UTF-8"),
        }
    }
}

impl TextEncoding {
    /// Decode the whole file. On failure returns the offset of the first
    /// invalid byte.
    pub fn decode(self, bytes: Vec<u8>) -> Result<String, usize> {
        match self {
            TextEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            TextEncoding::Utf8 => {
                String::from_utf8(bytes).map_err(|e| e.utf8_error().valid_up_to())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Source layout
// ---------------------------------------------------------------------------

/// Fixed layout of the export: where the header sits, how it is encoded
/// and which labels identify the columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOptions {
    /// Zero-based record index of the header; earlier records are preamble.
    pub header_row: usize,
    pub encoding: TextEncoding,
    pub schema: Schema,
}

impl Default for SourceOptions {
    fn default() -> Self {
        SourceOptions {
            header_row: 7,
            encoding: TextEncoding::Latin1,
            schema: Schema::default(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load, normalize and index one export file.
pub fn load_workload(path: &Path, options: &SourceOptions) -> Result<Workload, LoadError> {
    let raw = read_raw_rows(path, options)?;
    let normalized = normalize(&raw);
    let workload = Workload::new(path, normalized.rows, normalized.stats);

    let stats = &workload.stats;
    log::info!(
        "Loaded {}: {} raw rows, {} assignments, {} shifts {:?}",
        path.display(),
        stats.raw_rows,
        workload.len(),
        workload.shifts.len(),
        workload.shifts
    );
    if stats.dropped_without_teacher > 0 {
        log::warn!(
            "{} row(s) with a subject precede the first teacher id and were dropped",
            stats.dropped_without_teacher
        );
    }
    if stats.hours_defaulted > 0 {
        log::warn!("{} hours cell(s) were not numeric and count as 0", stats.hours_defaulted);
    }
    if stats.negative_hours > 0 {
        log::warn!("{} row(s) carry negative hours", stats.negative_hours);
    }
    for block in &workload.interleaved {
        log::warn!(
            "Teacher {} reappears at row {} after another teacher's block",
            block.teacher_id,
            block.row
        );
    }

    Ok(workload)
}

/// Read the data records of the export in file order.
pub fn read_raw_rows(path: &Path, options: &SourceOptions) -> Result<Vec<RawRow>, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::SourceNotFound {
        path: path.to_path_buf(),
        source,
    })?;
    let text = options
        .encoding
        .decode(bytes)
        .map_err(|offset| LoadError::Decode {
            path: path.to_path_buf(),
            encoding: options.encoding,
            offset,
        })?;
    parse_rows(&text, options)
}

/// Parse already-decoded text.
pub fn parse_rows(text: &str, options: &SourceOptions) -> Result<Vec<RawRow>, LoadError> {
    // Preamble lines have a different field count than the table.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = reader.records();

    for _ in 0..options.header_row {
        if records.next().transpose()?.is_none() {
            return Err(LoadError::HeaderNotFound {
                header_row: options.header_row,
            });
        }
    }
    let header = records.next().transpose()?.ok_or(LoadError::HeaderNotFound {
        header_row: options.header_row,
    })?;
    let columns = options.schema.resolve(header.iter())?;

    records
        .map(|record| {
            record
                .map(|record| raw_row(&record, &columns))
                .map_err(LoadError::from)
        })
        .collect()
}

fn raw_row(record: &StringRecord, columns: &ColumnIndex) -> RawRow {
    let cell = |field: Field| -> Option<String> {
        record
            .get(columns.position(field))
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    };

    RawRow {
        teacher_id: cell(Field::TeacherId),
        paternal_surname: cell(Field::PaternalSurname),
        maternal_surname: cell(Field::MaternalSurname),
        first_name: cell(Field::FirstName),
        category: cell(Field::Category),
        curp: cell(Field::Curp),
        academic_info: cell(Field::AcademicInfo),
        subject: cell(Field::Subject),
        shift: cell(Field::Shift),
        hours: cell(Field::Hours),
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    const HEADER: &str = "NO.,ID DEL DOCENTE,APELLIDO PATERNO,APELLIDO MATERNO,NOMBRE (S),CATEGORÍA,CURP,INFORMACIÓN ACADÉMICA DEL DOCENTE,UNIDAD DE APRENDIZAJE CURRICULAR/ASIGNATURA,TURNO,HRS. POR UAC/ASIG";

    fn export(body: &[&str]) -> String {
        let mut lines: Vec<String> = (1..=7).map(|i| format!("PREAMBLE {i},,")).collect();
        lines.push(HEADER.to_string());
        lines.extend(body.iter().map(|l| l.to_string()));
        lines.join("\n")
    }

    fn write_latin1(dir: &TempDir, name: &str, text: &str) -> PathBuf {
        let bytes: Vec<u8> = text
            .chars()
            .map(|c| u8::try_from(u32::from(c)).expect("latin-1 fixture"))
            .collect();
        let path = dir.path().join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn reads_rows_after_preamble() {
        let dir = TempDir::new().unwrap();
        let text = export(&[
            "1,101,PÉREZ,LÓPEZ,ANA,A1,CURP1,LIC,MATEMÁTICAS,MATUTINO,10",
            ",,,,,,,,FÍSICA,MATUTINO, 8 ",
            ",,,,,,,,,,",
        ]);
        let path = write_latin1(&dir, "nomina.csv", &text);

        let rows = read_raw_rows(&path, &SourceOptions::default()).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].teacher_id.as_deref(), Some("101"));
        assert_eq!(rows[0].paternal_surname.as_deref(), Some("PÉREZ"));
        assert_eq!(rows[0].subject.as_deref(), Some("MATEMÁTICAS"));
        assert_eq!(rows[1].teacher_id, None);
        assert_eq!(rows[1].hours.as_deref(), Some(" 8 "));
        assert_eq!(rows[2], RawRow::default());
    }

    #[test]
    fn blank_cells_are_present_values() {
        let text = export(&[
            "1,101,GARCIA,LUNA,ANA ,A,C,L,MATH,MATUTINO,10",
            ",,,,,,,, ,MATUTINO,6",
        ]);
        let rows = parse_rows(&text, &SourceOptions::default()).unwrap();
        assert_eq!(rows[0].first_name.as_deref(), Some("ANA "));
        assert_eq!(rows[1].subject.as_deref(), Some(" "));

        let out = normalize(&rows);
        assert_eq!(out.rows.len(), 2);
        assert_eq!(out.rows[0].full_name, "ANA  GARCIA LUNA");
        assert_eq!(out.rows[1].teacher_id, "101");
        let total: f64 = out.rows.iter().map(|r| r.hours).sum();
        assert_eq!(total, 16.0);
    }

    #[test]
    fn short_records_yield_missing_cells() {
        let text = export(&["1,101,PÉREZ"]);
        let rows = parse_rows(&text, &SourceOptions::default()).unwrap();
        assert_eq!(rows[0].paternal_surname.as_deref(), Some("PÉREZ"));
        assert_eq!(rows[0].subject, None);
        assert_eq!(rows[0].hours, None);
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let dir = TempDir::new().unwrap();
        let err = read_raw_rows(&dir.path().join("absent.csv"), &SourceOptions::default())
            .unwrap_err();
        assert!(matches!(err, LoadError::SourceNotFound { .. }));
    }

    #[test]
    fn invalid_utf8_is_decode_error() {
        let dir = TempDir::new().unwrap();
        // Latin-1 bytes for "CATEGORÍA" are not valid UTF-8.
        let path = write_latin1(&dir, "latin.csv", &export(&[]));
        let options = SourceOptions {
            encoding: TextEncoding::Utf8,
            ..Default::default()
        };

        let err = read_raw_rows(&path, &options).unwrap_err();
        match err {
            LoadError::Decode { encoding, offset, .. } => {
                assert_eq!(encoding, TextEncoding::Utf8);
                assert!(offset > 0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn renamed_column_is_schema_mismatch() {
        let text = export(&[]).replace("TURNO", "JORNADA");
        let err = parse_rows(&text, &SourceOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::SchemaMismatch { ref missing } if missing == &["TURNO"]));
    }

    #[test]
    fn truncated_preamble_is_header_not_found() {
        let err = parse_rows("A,B\nC,D\n", &SourceOptions::default()).unwrap_err();
        assert!(matches!(err, LoadError::HeaderNotFound { header_row: 7 }));
    }

    #[test]
    fn header_row_is_configurable() {
        let text = format!("{HEADER}\n1,7,A,B,C,D,E,F,ART,VESPERTINO,2");
        let options = SourceOptions {
            header_row: 0,
            ..Default::default()
        };
        let rows = parse_rows(&text, &options).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].shift.as_deref(), Some("VESPERTINO"));
    }

    #[test]
    fn load_workload_runs_the_whole_pipeline() {
        let dir = TempDir::new().unwrap();
        let text = export(&[
            "1,101,PÉREZ,LÓPEZ,ANA,A1,CURP1,LIC,MATH,MATUTINO,10",
            ",,,,,,,,PHYSICS,VESPERTINO,8",
            ",,,,,,,,,,",
            "2,102,RUIZ,DÍAZ,LUIS,B2,CURP2,MTRA,ART,MATUTINO,",
        ]);
        let path = write_latin1(&dir, "nomina.csv", &text);

        let workload = load_workload(&path, &SourceOptions::default()).unwrap();
        assert_eq!(workload.len(), 3);
        assert_eq!(workload.stats.raw_rows, 4);
        assert_eq!(workload.stats.dropped_without_subject, 1);
        assert_eq!(workload.shifts, vec!["MATUTINO", "VESPERTINO"]);
        assert_eq!(workload.rows[1].full_name, "ANA PÉREZ LÓPEZ");
        assert_eq!(workload.total_hours(), 18.0);
    }

    #[test]
    fn encoding_names_accept_common_spellings() {
        let enc: TextEncoding = serde_json::from_str(r#""latin-1""#).unwrap();
        assert_eq!(enc, TextEncoding::Latin1);
        let enc: TextEncoding = serde_json::from_str(r#""utf8""#).unwrap();
        assert_eq!(enc, TextEncoding::Utf8);
    }
}
