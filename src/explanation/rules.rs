//! Threshold rules behind "why this crop"
//!
//! One row per reading, evaluated top to bottom. Within a row the first band
//! whose predicate holds contributes its phrase; bands are mutually
//! exclusive so order inside a row only matters for readability.

use crate::snapshot::{InputSnapshot, Reading};

/// One band of a reading: predicate plus phrase formatter
pub struct Band {
    pub name: &'static str,
    pub applies: fn(f64) -> bool,
    pub phrase: fn(f64) -> String,
}

/// All bands for one reading
pub struct FeatureRule {
    pub reading: Reading,
    pub bands: &'static [Band],
}

impl FeatureRule {
    /// Phrase for `value`, if any band matches
    pub fn phrase_for(&self, value: f64) -> Option<String> {
        self.bands
            .iter()
            .find(|band| (band.applies)(value))
            .map(|band| (band.phrase)(value))
    }
}

const RAINFALL: &[Band] = &[
    Band { name: "high", applies: |v| v > 250.0, phrase: |v| format!("high rainfall ({:.0}mm)", v) },
    // Both ends exclusive: 150 and 250 exactly produce no rainfall phrase.
    Band { name: "moderate", applies: |v| v > 150.0 && v < 250.0, phrase: |v| format!("moderate rainfall ({:.0}mm)", v) },
    Band { name: "low", applies: |v| v < 100.0, phrase: |v| format!("low rainfall ({:.0}mm)", v) },
];

const TEMPERATURE: &[Band] = &[
    Band { name: "warm", applies: |v| v > 32.0, phrase: |v| format!("warm temperature ({:.1}°C)", v) },
    Band { name: "cool", applies: |v| v < 22.0, phrase: |v| format!("cool temperature ({:.1}°C)", v) },
    Band { name: "optimal", applies: |v| (24.0..=30.0).contains(&v), phrase: |v| format!("optimal temperature ({:.1}°C)", v) },
];

const HUMIDITY: &[Band] = &[
    Band { name: "high", applies: |v| v > 75.0, phrase: |v| format!("high humidity ({:.0}%)", v) },
    Band { name: "low", applies: |v| v < 50.0, phrase: |v| format!("low humidity ({:.0}%)", v) },
];

const SOIL_MOISTURE: &[Band] = &[
    Band { name: "high", applies: |v| v > 60.0, phrase: |v| format!("high soil moisture ({:.0}%)", v) },
    Band { name: "low", applies: |v| v < 30.0, phrase: |v| format!("low soil moisture ({:.0}%)", v) },
];

const SUNLIGHT: &[Band] = &[
    Band { name: "abundant", applies: |v| v > 9.0, phrase: |v| format!("abundant sunlight ({:.1} hrs)", v) },
    Band { name: "limited", applies: |v| v < 5.0, phrase: |v| format!("limited sunlight ({:.1} hrs)", v) },
];

const SOIL_PH: &[Band] = &[
    Band { name: "neutral", applies: |v| (6.0..=7.0).contains(&v), phrase: |v| format!("neutral pH ({:.1})", v) },
    Band { name: "acidic", applies: |v| v < 6.0, phrase: |v| format!("acidic soil (pH {:.1})", v) },
    Band { name: "alkaline", applies: |v| v > 7.5, phrase: |v| format!("alkaline soil (pH {:.1})", v) },
];

const NITROGEN: &[Band] = &[
    Band { name: "rich", applies: |v| v > 80.0, phrase: |_| "rich nitrogen".to_string() },
];

const PHOSPHORUS: &[Band] = &[
    Band { name: "good", applies: |v| v > 50.0, phrase: |_| "good phosphorus".to_string() },
];

const POTASSIUM: &[Band] = &[
    Band { name: "high", applies: |v| v > 70.0, phrase: |_| "high potassium".to_string() },
];

/// Rule rows in evaluation order; season is appended after these
pub static FEATURE_RULES: &[FeatureRule] = &[
    FeatureRule { reading: Reading::Rainfall, bands: RAINFALL },
    FeatureRule { reading: Reading::Temperature, bands: TEMPERATURE },
    FeatureRule { reading: Reading::Humidity, bands: HUMIDITY },
    FeatureRule { reading: Reading::SoilMoisture, bands: SOIL_MOISTURE },
    FeatureRule { reading: Reading::Sunlight, bands: SUNLIGHT },
    FeatureRule { reading: Reading::SoilPh, bands: SOIL_PH },
    FeatureRule { reading: Reading::Nitrogen, bands: NITROGEN },
    FeatureRule { reading: Reading::Phosphorus, bands: PHOSPHORUS },
    FeatureRule { reading: Reading::Potassium, bands: POTASSIUM },
];

/// Name of the band `value` falls in for `reading`, if any
pub fn band_name(reading: Reading, value: f64) -> Option<&'static str> {
    FEATURE_RULES
        .iter()
        .find(|rule| rule.reading == reading)
        .and_then(|rule| rule.bands.iter().find(|band| (band.applies)(value)))
        .map(|band| band.name)
}

/// Phrase for the season; blank seasons contribute nothing
pub fn season_phrase(snapshot: &InputSnapshot) -> Option<String> {
    let season = snapshot.season.trim();
    if season.is_empty() {
        None
    } else {
        Some(format!("{} season", season))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(reading: Reading) -> &'static FeatureRule {
        FEATURE_RULES.iter().find(|r| r.reading == reading).unwrap()
    }

    #[test]
    fn test_rows_follow_reading_order() {
        let order: Vec<_> = FEATURE_RULES.iter().map(|r| r.reading).collect();
        assert_eq!(order, Reading::ALL.to_vec());
    }

    #[test]
    fn test_rainfall_boundaries() {
        let r = rule(Reading::Rainfall);
        assert_eq!(r.phrase_for(250.0), None);
        assert_eq!(r.phrase_for(250.1).as_deref(), Some("high rainfall (250mm)"));
        assert_eq!(r.phrase_for(249.0).as_deref(), Some("moderate rainfall (249mm)"));
        assert_eq!(r.phrase_for(150.0), None);
        assert_eq!(r.phrase_for(120.0), None);
        assert_eq!(r.phrase_for(100.0), None);
        assert_eq!(r.phrase_for(99.0).as_deref(), Some("low rainfall (99mm)"));
    }

    #[test]
    fn test_temperature_boundaries() {
        let r = rule(Reading::Temperature);
        assert_eq!(r.phrase_for(32.0), None);
        assert_eq!(r.phrase_for(32.5).as_deref(), Some("warm temperature (32.5°C)"));
        assert_eq!(r.phrase_for(22.0), None);
        assert_eq!(r.phrase_for(21.9).as_deref(), Some("cool temperature (21.9°C)"));
        assert_eq!(r.phrase_for(24.0).as_deref(), Some("optimal temperature (24.0°C)"));
        assert_eq!(r.phrase_for(30.0).as_deref(), Some("optimal temperature (30.0°C)"));
        assert_eq!(r.phrase_for(23.0), None);
        assert_eq!(r.phrase_for(31.0), None);
    }

    #[test]
    fn test_humidity_moisture_sunlight_boundaries() {
        assert_eq!(rule(Reading::Humidity).phrase_for(75.0), None);
        assert_eq!(rule(Reading::Humidity).phrase_for(50.0), None);
        assert_eq!(rule(Reading::Humidity).phrase_for(49.0).as_deref(), Some("low humidity (49%)"));
        assert_eq!(rule(Reading::SoilMoisture).phrase_for(60.0), None);
        assert_eq!(rule(Reading::SoilMoisture).phrase_for(30.0), None);
        assert_eq!(rule(Reading::SoilMoisture).phrase_for(29.0).as_deref(), Some("low soil moisture (29%)"));
        assert_eq!(rule(Reading::Sunlight).phrase_for(9.0), None);
        assert_eq!(rule(Reading::Sunlight).phrase_for(5.0), None);
        assert_eq!(rule(Reading::Sunlight).phrase_for(4.5).as_deref(), Some("limited sunlight (4.5 hrs)"));
    }

    #[test]
    fn test_ph_bands() {
        let r = rule(Reading::SoilPh);
        assert_eq!(r.phrase_for(6.0).as_deref(), Some("neutral pH (6.0)"));
        assert_eq!(r.phrase_for(7.0).as_deref(), Some("neutral pH (7.0)"));
        assert_eq!(r.phrase_for(5.9).as_deref(), Some("acidic soil (pH 5.9)"));
        assert_eq!(r.phrase_for(7.5), None);
        assert_eq!(r.phrase_for(7.2), None);
        assert_eq!(r.phrase_for(8.0).as_deref(), Some("alkaline soil (pH 8.0)"));
    }

    #[test]
    fn test_nutrient_thresholds_are_strict() {
        assert_eq!(rule(Reading::Nitrogen).phrase_for(80.0), None);
        assert_eq!(rule(Reading::Nitrogen).phrase_for(81.0).as_deref(), Some("rich nitrogen"));
        assert_eq!(rule(Reading::Phosphorus).phrase_for(50.0), None);
        assert_eq!(rule(Reading::Phosphorus).phrase_for(51.0).as_deref(), Some("good phosphorus"));
        assert_eq!(rule(Reading::Potassium).phrase_for(70.0), None);
        assert_eq!(rule(Reading::Potassium).phrase_for(71.0).as_deref(), Some("high potassium"));
    }

    #[test]
    fn test_band_name_lookup() {
        assert_eq!(band_name(Reading::Rainfall, 300.0), Some("high"));
        assert_eq!(band_name(Reading::SoilPh, 5.0), Some("acidic"));
        assert_eq!(band_name(Reading::Humidity, 60.0), None);
    }

    #[test]
    fn test_blank_season_has_no_phrase() {
        let snapshot = InputSnapshot::defaults("North", "  ");
        assert_eq!(season_phrase(&snapshot), None);
        let snapshot = InputSnapshot::defaults("North", "Winter");
        assert_eq!(season_phrase(&snapshot).as_deref(), Some("Winter season"));
    }
}
