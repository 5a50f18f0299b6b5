use std::collections::BTreeMap;

use eframe::egui::Color32;
use nomina_viewer::data::aggregate::LoadBand;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            hsl_to_color32(Hsl::new(hue, 0.75, 0.55))
        })
        .collect()
}

fn hsl_to_color32(hsl: Hsl) -> Color32 {
    let rgb: Srgb = hsl.into_color();
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

// ---------------------------------------------------------------------------
// Shift → Color32
// ---------------------------------------------------------------------------

/// Maps each distinct shift of the loaded file to its own colour.
#[derive(Debug, Clone)]
pub struct ShiftPalette {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ShiftPalette {
    pub fn new(shifts: &[String]) -> Self {
        let mapping = shifts
            .iter()
            .cloned()
            .zip(generate_palette(shifts.len()))
            .collect();
        ShiftPalette {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, shift: &str) -> Color32 {
        self.mapping
            .get(shift)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Load band → card fill
// ---------------------------------------------------------------------------

/// Muted fill for a teacher card: green light, amber full, red over.
pub fn band_fill(band: LoadBand) -> Color32 {
    let hue: f32 = match band {
        LoadBand::Light => 130.0,
        LoadBand::Full => 40.0,
        LoadBand::Over => 0.0,
    };
    hsl_to_color32(Hsl::new(hue, 0.45, 0.28))
}
