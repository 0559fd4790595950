use serde::{Deserialize, Serialize};

/// Font parameters tick labels are measured with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: String,
    pub size_px: f64,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_owned(),
            size_px: 11.0,
        }
    }
}

/// Black-box text width measurer consumed by the layout solver.
///
/// Hosts plug an implementation backed by their rasterizer; the solver never
/// measures text itself.
pub trait TextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> f64;
}

/// Glyph-class width approximation usable without a rasterizer.
///
/// Good enough for layout decisions in headless tests and for hosts that do
/// not care about sub-pixel label fitting.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, font: &FontSpec) -> f64 {
        let units: f64 = text
            .chars()
            .map(|ch| match ch {
                'i' | 'l' | 'j' | '.' | ',' | '\'' | '|' | ':' | ';' => 0.30,
                'f' | 't' | 'r' | ' ' | '(' | ')' | '[' | ']' | '-' => 0.40,
                'm' | 'w' | 'M' | 'W' | '@' => 0.90,
                'A'..='Z' => 0.70,
                '0'..='9' => 0.58,
                _ => 0.55,
            })
            .sum();
        units * font.size_px
    }
}
