use std::collections::BTreeMap;
use std::str::FromStr;

use eframe::egui::Color32;
use palette::Srgb;

use crate::error::DataError;

// ---------------------------------------------------------------------------
// Hex parsing
// ---------------------------------------------------------------------------

/// Parse `#rrggbb` / `#rgb` into a [`Color32`].
pub fn parse_hex(value: &str) -> Option<Color32> {
    let rgb = Srgb::<u8>::from_str(value.trim()).ok()?;
    Some(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

/// Fill colour for the male series of the two-series views.
pub fn male_series() -> Color32 {
    Color32::from_rgb(0x1f, 0x77, 0xb4)
}

/// Fill colour for the female series of the two-series views.
pub fn female_series() -> Color32 {
    Color32::from_rgb(0xe3, 0x77, 0xc2)
}

// ---------------------------------------------------------------------------
// Neighborhood palette: name → Color32
// ---------------------------------------------------------------------------

/// Fixed neighborhood colours, shared by every slide.
#[derive(Debug, Clone, PartialEq)]
pub struct NeighborhoodPalette {
    mapping: BTreeMap<String, Color32>,
}

impl NeighborhoodPalette {
    /// Build the palette from configured hex strings.
    pub fn from_hex(colors: &BTreeMap<String, String>) -> Result<Self, DataError> {
        let mapping = colors
            .iter()
            .map(|(name, hex)| {
                parse_hex(hex)
                    .map(|c| (name.clone(), c))
                    .ok_or_else(|| DataError::InvalidColor {
                        neighborhood: name.clone(),
                        value: hex.clone(),
                    })
            })
            .collect::<Result<BTreeMap<_, _>, _>>()?;
        Ok(NeighborhoodPalette { mapping })
    }

    /// Look up the colour for a neighborhood.
    pub fn color_for(&self, neighborhood: &str) -> Result<Color32, DataError> {
        self.mapping
            .get(neighborhood)
            .copied()
            .ok_or_else(|| DataError::MissingColor(neighborhood.to_string()))
    }

    /// Legend entries (name → colour) in name order.
    pub fn legend_entries(&self) -> Vec<(String, Color32)> {
        self.mapping
            .iter()
            .map(|(name, c): (&String, &Color32)| (name.clone(), *c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChartConfig;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#d62728"), Some(Color32::from_rgb(0xd6, 0x27, 0x28)));
        assert_eq!(parse_hex(" #fff "), Some(Color32::WHITE));
        assert_eq!(parse_hex("crimson"), None);
    }

    #[test]
    fn test_default_palette_is_total_and_stable() {
        let config = ChartConfig::default();
        let palette = NeighborhoodPalette::from_hex(&config.colors).unwrap();
        for name in &config.neighborhoods {
            let first = palette.color_for(name).unwrap();
            let second = palette.color_for(name).unwrap();
            assert_eq!(first, second);
        }
        assert_eq!(
            palette.color_for("Bangu").unwrap(),
            Color32::from_rgb(0xd6, 0x27, 0x28)
        );
    }

    #[test]
    fn test_default_colors_are_distinct() {
        let config = ChartConfig::default();
        let palette = NeighborhoodPalette::from_hex(&config.colors).unwrap();
        let entries = palette.legend_entries();
        assert_eq!(entries.len(), 6);
        for (i, (_, a)) in entries.iter().enumerate() {
            for (_, b) in &entries[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_missing_color() {
        let palette = NeighborhoodPalette::from_hex(&BTreeMap::new()).unwrap();
        assert!(matches!(
            palette.color_for("Bangu"),
            Err(DataError::MissingColor(ref n)) if n == "Bangu"
        ));
    }

    #[test]
    fn test_invalid_color() {
        let mut colors = BTreeMap::new();
        colors.insert("Bangu".to_string(), "#zzzzzz".to_string());
        assert!(matches!(
            NeighborhoodPalette::from_hex(&colors),
            Err(DataError::InvalidColor { .. })
        ));
    }
}
