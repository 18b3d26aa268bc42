//! Per-sensor extraction profiles
//!
//! The cleaning thresholds scale with cell size: a 10 m Sentinel-2 scene
//! needs a larger minimum water body in cells than a 30 m Landsat scene to
//! reject the same real-world area. The presets carry the operationally
//! proven values; every field is public so callers can tune them.

use serde::{Deserialize, Serialize};
use shorewatch_core::{Error, Result};

/// Thresholds and switches for one imagery source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceProfile {
    /// Profile name used in logs and reports
    pub name: String,
    /// Cell value classified as water. `None` uses the classified-scene
    /// convention of 1.0.
    pub raw_water_value: Option<f64>,
    /// Water bodies smaller than this many cells are reclassified as land
    pub min_water_size: usize,
    /// Land regions smaller than this many cells are reclassified as water
    pub min_land_size: usize,
    /// Majority filter window edge length, odd
    pub smoothing_window: usize,
    /// Trace only water connected to the raster border
    pub ocean_only: bool,
}

impl SourceProfile {
    /// Sentinel-2 classified scenes, 10 m cells
    pub fn sentinel() -> Self {
        Self {
            name: "sentinel".to_string(),
            raw_water_value: None,
            min_water_size: 10_000,
            min_land_size: 500,
            smoothing_window: 7,
            ocean_only: true,
        }
    }

    /// Landsat classified scenes, 30 m cells.
    ///
    /// Traces the corrected water mask directly instead of discriminating
    /// ocean from inland water first.
    pub fn landsat() -> Self {
        Self {
            name: "landsat".to_string(),
            raw_water_value: None,
            min_water_size: 5_000,
            min_land_size: 500,
            smoothing_window: 7,
            ocean_only: false,
        }
    }

    /// Land-cover rasters coding water as class 58
    pub fn custom() -> Self {
        Self {
            name: "custom".to_string(),
            raw_water_value: Some(58.0),
            min_water_size: 7_000,
            min_land_size: 500,
            smoothing_window: 7,
            ocean_only: true,
        }
    }

    /// Look up a preset by name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sentinel" => Some(Self::sentinel()),
            "landsat" => Some(Self::landsat()),
            "custom" => Some(Self::custom()),
            _ => None,
        }
    }

    /// Cell value treated as water when binarizing
    pub fn water_value(&self) -> f64 {
        self.raw_water_value.unwrap_or(1.0)
    }

    /// Check thresholds before running the pipeline
    pub fn validate(&self) -> Result<()> {
        if self.smoothing_window == 0 || self.smoothing_window % 2 == 0 {
            return Err(Error::InvalidParameter {
                name: "smoothing_window",
                value: self.smoothing_window.to_string(),
                reason: "must be odd and at least 1".to_string(),
            });
        }
        if self.min_water_size == 0 {
            return Err(Error::InvalidParameter {
                name: "min_water_size",
                value: self.min_water_size.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.min_land_size == 0 {
            return Err(Error::InvalidParameter {
                name: "min_land_size",
                value: self.min_land_size.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for SourceProfile {
    fn default() -> Self {
        Self::sentinel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let sentinel = SourceProfile::sentinel();
        assert_eq!(sentinel.min_water_size, 10_000);
        assert!(sentinel.ocean_only);
        assert_eq!(sentinel.water_value(), 1.0);

        let landsat = SourceProfile::landsat();
        assert_eq!(landsat.min_water_size, 5_000);
        assert!(!landsat.ocean_only);

        let custom = SourceProfile::custom();
        assert_eq!(custom.min_water_size, 7_000);
        assert_eq!(custom.water_value(), 58.0);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(
            SourceProfile::from_name("landsat").map(|p| p.name),
            Some("landsat".to_string())
        );
        assert!(SourceProfile::from_name("modis").is_none());
    }

    #[test]
    fn test_validate_rejects_even_window() {
        let mut profile = SourceProfile::sentinel();
        profile.smoothing_window = 4;
        assert!(matches!(
            profile.validate(),
            Err(Error::InvalidParameter { name: "smoothing_window", .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_sizes() {
        let mut profile = SourceProfile::sentinel();
        profile.min_water_size = 0;
        assert!(profile.validate().is_err());

        let mut profile = SourceProfile::sentinel();
        profile.min_land_size = 0;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_window_one_is_valid() {
        let mut profile = SourceProfile::sentinel();
        profile.smoothing_window = 1;
        assert!(profile.validate().is_ok());
    }
}
