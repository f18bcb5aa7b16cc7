use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::model::predict::SalaryClass;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues,
/// starting at `offset` degrees.
pub fn generate_palette(n: usize, offset: f32) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = offset + (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.65, 0.45);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Class colours
// ---------------------------------------------------------------------------

/// Fixed colour per salary class, shared by result labels and the chart.
#[derive(Debug, Clone)]
pub struct ClassColors {
    colors: [Color32; 2],
}

impl Default for ClassColors {
    fn default() -> Self {
        // Hue 30° (amber) for ≤50K, 210° (blue) for >50K.
        let palette = generate_palette(SalaryClass::ALL.len(), 30.0);
        Self {
            colors: [palette[0], palette[1]],
        }
    }
}

impl ClassColors {
    pub fn color_for(&self, class: SalaryClass) -> Color32 {
        match class {
            SalaryClass::AtMost50K => self.colors[0],
            SalaryClass::Above50K => self.colors[1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0, 0.0).is_empty());
        assert_eq!(generate_palette(3, 0.0).len(), 3);
    }

    #[test]
    fn classes_get_distinct_colors() {
        let colors = ClassColors::default();
        assert_ne!(
            colors.color_for(SalaryClass::AtMost50K),
            colors.color_for(SalaryClass::Above50K)
        );
    }
}
