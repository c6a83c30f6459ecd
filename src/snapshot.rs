//! Input snapshot: one complete set of user readings
//!
//! A snapshot is never mutated in place. Front-ends build a new one for every
//! change (`with_reading`, `with_region`, `with_season`) and hand the whole
//! value to the pipeline.

use crate::error::{AdvisorError, Result};
use serde::{Deserialize, Serialize};

/// One of the nine continuous readings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reading {
    Rainfall,
    Temperature,
    Humidity,
    SoilMoisture,
    Sunlight,
    SoilPh,
    Nitrogen,
    Phosphorus,
    Potassium,
}

/// Documented input range for a reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadingRange {
    pub min: f64,
    pub max: f64,
}

impl ReadingRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

impl Reading {
    /// Display order of the input controls
    pub const ALL: [Reading; 9] = [
        Reading::Rainfall,
        Reading::Temperature,
        Reading::Humidity,
        Reading::SoilMoisture,
        Reading::Sunlight,
        Reading::SoilPh,
        Reading::Nitrogen,
        Reading::Phosphorus,
        Reading::Potassium,
    ];

    /// Short key used by commands, CSV headers and JSON
    pub fn key(&self) -> &'static str {
        match self {
            Reading::Rainfall => "rainfall",
            Reading::Temperature => "temperature",
            Reading::Humidity => "humidity",
            Reading::SoilMoisture => "soil_moisture",
            Reading::Sunlight => "sunlight",
            Reading::SoilPh => "soil_ph",
            Reading::Nitrogen => "nitrogen",
            Reading::Phosphorus => "phosphorus",
            Reading::Potassium => "potassium",
        }
    }

    pub fn from_key(key: &str) -> Option<Reading> {
        let key = key.trim().to_ascii_lowercase();
        Reading::ALL.iter().copied().find(|r| r.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Reading::Rainfall => "Rainfall",
            Reading::Temperature => "Temperature",
            Reading::Humidity => "Humidity",
            Reading::SoilMoisture => "Soil Moisture",
            Reading::Sunlight => "Sunlight",
            Reading::SoilPh => "Soil pH",
            Reading::Nitrogen => "Nitrogen (N)",
            Reading::Phosphorus => "Phosphorus (P)",
            Reading::Potassium => "Potassium (K)",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Reading::Rainfall => "mm",
            Reading::Temperature => "°C",
            Reading::Humidity | Reading::SoilMoisture => "%",
            Reading::Sunlight => "hrs",
            Reading::SoilPh => "",
            Reading::Nitrogen | Reading::Phosphorus | Reading::Potassium => "kg/ha",
        }
    }

    pub fn range(&self) -> ReadingRange {
        let (min, max) = match self {
            Reading::Rainfall => (0.0, 361.0),
            Reading::Temperature => (17.0, 36.0),
            Reading::Humidity => (30.0, 100.0),
            Reading::SoilMoisture => (5.0, 78.0),
            Reading::Sunlight => (2.5, 12.0),
            Reading::SoilPh => (4.5, 8.5),
            Reading::Nitrogen => (5.0, 118.0),
            Reading::Phosphorus => (5.0, 70.0),
            Reading::Potassium => (5.0, 95.0),
        };
        ReadingRange { min, max }
    }

    /// Value restored by "reset to defaults"
    pub fn default_value(&self) -> f64 {
        match self {
            Reading::Rainfall => 200.0,
            Reading::Temperature => 28.0,
            Reading::Humidity => 70.0,
            Reading::SoilMoisture => 45.0,
            Reading::Sunlight => 7.0,
            Reading::SoilPh => 6.5,
            Reading::Nitrogen => 60.0,
            Reading::Phosphorus => 40.0,
            Reading::Potassium => 50.0,
        }
    }
}

/// Immutable record of one prediction request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub region: String,
    pub season: String,
    pub rainfall_mm: f64,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub soil_moisture_pct: f64,
    pub sunlight_hours: f64,
    pub soil_ph: f64,
    pub nitrogen_kg_ha: f64,
    pub phosphorus_kg_ha: f64,
    pub potassium_kg_ha: f64,
}

impl InputSnapshot {
    /// Default readings for the given region and season
    pub fn defaults(region: impl Into<String>, season: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            season: season.into(),
            rainfall_mm: Reading::Rainfall.default_value(),
            temperature_c: Reading::Temperature.default_value(),
            humidity_pct: Reading::Humidity.default_value(),
            soil_moisture_pct: Reading::SoilMoisture.default_value(),
            sunlight_hours: Reading::Sunlight.default_value(),
            soil_ph: Reading::SoilPh.default_value(),
            nitrogen_kg_ha: Reading::Nitrogen.default_value(),
            phosphorus_kg_ha: Reading::Phosphorus.default_value(),
            potassium_kg_ha: Reading::Potassium.default_value(),
        }
    }

    pub fn get(&self, reading: Reading) -> f64 {
        match reading {
            Reading::Rainfall => self.rainfall_mm,
            Reading::Temperature => self.temperature_c,
            Reading::Humidity => self.humidity_pct,
            Reading::SoilMoisture => self.soil_moisture_pct,
            Reading::Sunlight => self.sunlight_hours,
            Reading::SoilPh => self.soil_ph,
            Reading::Nitrogen => self.nitrogen_kg_ha,
            Reading::Phosphorus => self.phosphorus_kg_ha,
            Reading::Potassium => self.potassium_kg_ha,
        }
    }

    /// Copy of this snapshot with one reading replaced
    pub fn with_reading(&self, reading: Reading, value: f64) -> Self {
        let mut next = self.clone();
        let slot = match reading {
            Reading::Rainfall => &mut next.rainfall_mm,
            Reading::Temperature => &mut next.temperature_c,
            Reading::Humidity => &mut next.humidity_pct,
            Reading::SoilMoisture => &mut next.soil_moisture_pct,
            Reading::Sunlight => &mut next.sunlight_hours,
            Reading::SoilPh => &mut next.soil_ph,
            Reading::Nitrogen => &mut next.nitrogen_kg_ha,
            Reading::Phosphorus => &mut next.phosphorus_kg_ha,
            Reading::Potassium => &mut next.potassium_kg_ha,
        };
        *slot = value;
        next
    }

    pub fn with_region(&self, region: impl Into<String>) -> Self {
        Self { region: region.into(), ..self.clone() }
    }

    pub fn with_season(&self, season: impl Into<String>) -> Self {
        Self { season: season.into(), ..self.clone() }
    }

    /// Check every reading against its documented range
    ///
    /// Interactive controls clamp instead; this is for values arriving from
    /// files or the network.
    pub fn validate(&self) -> Result<()> {
        for reading in Reading::ALL {
            let value = self.get(reading);
            let range = reading.range();
            if !value.is_finite() || !range.contains(value) {
                return Err(AdvisorError::OutOfRange {
                    reading: reading.key(),
                    value,
                    min: range.min,
                    max: range.max,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_within_ranges() {
        let snapshot = InputSnapshot::defaults("North", "Winter");
        assert!(snapshot.validate().is_ok());
        assert_eq!(snapshot.rainfall_mm, 200.0);
        assert_eq!(snapshot.soil_ph, 6.5);
    }

    #[test]
    fn test_with_reading_leaves_original_untouched() {
        let base = InputSnapshot::defaults("North", "Winter");
        let next = base.with_reading(Reading::Potassium, 80.0);
        assert_eq!(base.potassium_kg_ha, 50.0);
        assert_eq!(next.potassium_kg_ha, 80.0);
        assert_eq!(next.get(Reading::Potassium), 80.0);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let snapshot = InputSnapshot::defaults("North", "Winter").with_reading(Reading::SoilPh, 9.1);
        match snapshot.validate() {
            Err(AdvisorError::OutOfRange { reading, .. }) => assert_eq!(reading, "soil_ph"),
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_nan() {
        let snapshot = InputSnapshot::defaults("North", "Winter").with_reading(Reading::Rainfall, f64::NAN);
        assert!(snapshot.validate().is_err());
    }

    #[test]
    fn test_reading_keys_round_trip() {
        for reading in Reading::ALL {
            assert_eq!(Reading::from_key(reading.key()), Some(reading));
        }
        assert_eq!(Reading::from_key(" Soil_Moisture "), Some(Reading::SoilMoisture));
        assert_eq!(Reading::from_key("wind"), None);
    }

    #[test]
    fn test_clamp_to_range() {
        let range = Reading::Sunlight.range();
        assert_eq!(range.clamp(1.0), 2.5);
        assert_eq!(range.clamp(13.0), 12.0);
        assert_eq!(range.clamp(8.0), 8.0);
    }
}
