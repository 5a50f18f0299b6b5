use std::path::Path;

use anyhow::{Context, Result};

const OUTPUT_PATH: &str = "SANTA ROSA ASIMILADOS 2025A.csv";

const HEADER: [&str; 11] = [
    "NO.",
    "ID DEL DOCENTE",
    "APELLIDO PATERNO",
    "APELLIDO MATERNO",
    "NOMBRE (S)",
    "CATEGORÍA",
    "CURP",
    "INFORMACIÓN ACADÉMICA DEL DOCENTE",
    "UNIDAD DE APRENDIZAJE CURRICULAR/ASIGNATURA",
    "TURNO",
    "HRS. POR UAC/ASIG",
];

const PATERNAL: [&str; 8] = ["GARCÍA", "HERNÁNDEZ", "LÓPEZ", "MARTÍNEZ", "PÉREZ", "RAMÍREZ", "SÁNCHEZ", "TORRES"];
const MATERNAL: [&str; 6] = ["NÚÑEZ", "DÍAZ", "CRUZ", "MORALES", "ORTIZ", "VARGAS"];
const FIRST: [&str; 7] = ["ANA", "JOSÉ", "MARÍA", "LUIS", "SOFÍA", "JESÚS", "ROCÍO"];
const CATEGORIES: [&str; 3] = ["ASIMILADO A", "ASIMILADO B", "ASIMILADO C"];
const DEGREES: [&str; 3] = ["LICENCIATURA", "MAESTRÍA", "DOCTORADO"];
const SUBJECTS: [&str; 10] = [
    "MATEMÁTICAS I",
    "FÍSICA I",
    "QUÍMICA I",
    "LENGUA Y COMUNICACIÓN",
    "INGLÉS I",
    "HISTORIA DE MÉXICO",
    "BIOLOGÍA",
    "PENSAMIENTO MATEMÁTICO",
    "CULTURA DIGITAL",
    "CIENCIAS SOCIALES",
];
const SHIFTS: [&str; 2] = ["MATUTINO", "VESPERTINO"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }
}

/// Build the export rows: teacher metadata only on the first row of each
/// block, a blank separator row after each block.
fn build_rows(rng: &mut SimpleRng, teachers: usize) -> Vec<Vec<String>> {
    let blank = || vec![String::new(); HEADER.len()];
    let mut rows = Vec::new();
    let mut line_no = 1;

    for t in 0..teachers {
        let id = format!("{}", 1001 + t);
        let curp = format!("XEXX{:06}HDFRRN0{}", 800101 + t * 37, t % 10);
        let subjects = 1 + rng.below(5);

        for s in 0..subjects {
            let mut row = blank();
            row[0] = line_no.to_string();
            line_no += 1;
            if s == 0 {
                row[1] = id.clone();
                row[2] = rng.pick(&PATERNAL).to_string();
                row[3] = rng.pick(&MATERNAL).to_string();
                row[4] = rng.pick(&FIRST).to_string();
                row[5] = rng.pick(&CATEGORIES).to_string();
                row[6] = curp.clone();
                row[7] = rng.pick(&DEGREES).to_string();
            }
            row[8] = rng.pick(&SUBJECTS).to_string();
            row[9] = rng.pick(&SHIFTS).to_string();
            row[10] = (2 + rng.below(9)).to_string();
            rows.push(row);
        }
        rows.push(blank());
    }

    // Messy cells the viewer has to recover from.
    if let Some(row) = rows.iter_mut().find(|r| !r[8].is_empty()) {
        row[10] = String::new();
    }
    if let Some(row) = rows.iter_mut().rev().find(|r| !r[8].is_empty()) {
        row[10] = "S/N".to_string();
    }
    rows
}

fn encode_latin1(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).with_context(|| format!("'{c}' has no Latin-1 encoding")))
        .collect()
}

fn write_export(path: &Path, rows: &[Vec<String>]) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(Vec::new());

    // Preamble, as printed by the payroll system above the table.
    writer.write_record(["SUBSISTEMA DE EDUCACIÓN MEDIA SUPERIOR"])?;
    writer.write_record(["PLANTEL SANTA ROSA"])?;
    writer.write_record(["RELACIÓN DE PERSONAL ASIMILADO"])?;
    writer.write_record(["SEMESTRE 2025A"])?;
    writer.write_record(["", "", ""])?;
    writer.write_record(["FECHA DE CORTE", "2025-02-15"])?;
    writer.write_record(["", "", ""])?;
    writer.write_record(HEADER)?;
    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing CSV buffer: {}", e.error()))?;
    let text = String::from_utf8(bytes).context("CSV writer produced invalid UTF-8")?;
    std::fs::write(path, encode_latin1(&text)?)
        .with_context(|| format!("writing {}", path.display()))
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = build_rows(&mut rng, 24);
    let assignments = rows.iter().filter(|r| !r[8].is_empty()).count();

    write_export(Path::new(OUTPUT_PATH), &rows)?;

    println!("Wrote {assignments} assignments for 24 teachers to {OUTPUT_PATH}");
    Ok(())
}
