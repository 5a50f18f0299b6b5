use serde::{Deserialize, Serialize};

use super::loader::LoadError;

// ---------------------------------------------------------------------------
// Field – logical columns the pipeline reads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    TeacherId,
    PaternalSurname,
    MaternalSurname,
    FirstName,
    Category,
    Curp,
    AcademicInfo,
    Subject,
    Shift,
    Hours,
}

impl Field {
    pub const ALL: [Field; 10] = [
        Field::TeacherId,
        Field::PaternalSurname,
        Field::MaternalSurname,
        Field::FirstName,
        Field::Category,
        Field::Curp,
        Field::AcademicInfo,
        Field::Subject,
        Field::Shift,
        Field::Hours,
    ];
}

// ---------------------------------------------------------------------------
// Schema – logical field → header label
// ---------------------------------------------------------------------------

/// Header labels of the export. Labels are matched verbatim against the
/// header record; the defaults are the ones the payroll system writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    pub teacher_id: String,
    pub paternal_surname: String,
    pub maternal_surname: String,
    pub first_name: String,
    pub category: String,
    pub curp: String,
    pub academic_info: String,
    pub subject: String,
    pub shift: String,
    pub hours: String,
}

impl Default for Schema {
    fn default() -> Self {
        Schema {
            teacher_id: "ID DEL DOCENTE".into(),
            paternal_surname: "APELLIDO PATERNO".into(),
            maternal_surname: "APELLIDO MATERNO".into(),
            first_name: "NOMBRE (S)".into(),
            category: "CATEGORÍA".into(),
            curp: "CURP".into(),
            academic_info: "INFORMACIÓN ACADÉMICA DEL DOCENTE".into(),
            subject: "UNIDAD DE APRENDIZAJE CURRICULAR/ASIGNATURA".into(),
            shift: "TURNO".into(),
            hours: "HRS. POR UAC/ASIG".into(),
        }
    }
}

impl Schema {
    /// Header label configured for a logical field.
    pub fn label(&self, field: Field) -> &str {
        match field {
            Field::TeacherId => &self.teacher_id,
            Field::PaternalSurname => &self.paternal_surname,
            Field::MaternalSurname => &self.maternal_surname,
            Field::FirstName => &self.first_name,
            Field::Category => &self.category,
            Field::Curp => &self.curp,
            Field::AcademicInfo => &self.academic_info,
            Field::Subject => &self.subject,
            Field::Shift => &self.shift,
            Field::Hours => &self.hours,
        }
    }

    /// Locate every configured label in the header record.
    ///
    /// All missing labels are reported together. When a label appears more
    /// than once the first occurrence wins.
    pub fn resolve<'h, I>(&self, headers: I) -> Result<ColumnIndex, LoadError>
    where
        I: IntoIterator<Item = &'h str>,
    {
        let headers: Vec<&str> = headers.into_iter().collect();
        let mut positions = [0usize; 10];
        let mut missing = Vec::new();

        for (slot, field) in positions.iter_mut().zip(Field::ALL) {
            let label = self.label(field);
            match headers.iter().position(|h| *h == label) {
                Some(idx) => *slot = idx,
                None => missing.push(label.to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(LoadError::SchemaMismatch { missing });
        }
        Ok(ColumnIndex { positions })
    }
}

/// Resolved column positions for one header record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnIndex {
    positions: [usize; 10],
}

impl ColumnIndex {
    pub fn position(&self, field: Field) -> usize {
        self.positions[field as usize]
    }
}
