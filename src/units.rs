//! Measurement unit conversions.
//!
//! Pure arithmetic, no validation: a NaN input propagates unchanged and is
//! caught by the entry-point validation before any formula runs.

use crate::{HeightUnit, WeightUnit};

/// Pounds per kilogram.
///
/// Canonical conversion factor. Some clinical references shorten this to
/// 2.2; all paths here use the full factor so the same input weight always
/// produces the same clearance.
pub const LBS_PER_KG: f64 = 2.20462;

/// Centimetres per inch
pub const CM_PER_IN: f64 = 2.54;

/// Convert a weight value to kilograms
pub fn weight_to_kg(value: f64, unit: WeightUnit) -> f64 {
    match unit {
        WeightUnit::Kg => value,
        WeightUnit::Lbs => value / LBS_PER_KG,
    }
}

/// Convert a height value to centimetres
pub fn height_to_cm(value: f64, unit: HeightUnit) -> f64 {
    match unit {
        HeightUnit::Cm => value,
        HeightUnit::In => value * CM_PER_IN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_kg_identity() {
        assert_eq!(weight_to_kg(70.0, WeightUnit::Kg), 70.0);
    }

    #[test]
    fn test_lbs_to_kg() {
        assert_relative_eq!(
            weight_to_kg(220.462, WeightUnit::Lbs),
            100.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_weight_round_trip() {
        let original = 82.3;
        let lbs = original * LBS_PER_KG;
        assert_relative_eq!(
            weight_to_kg(lbs, WeightUnit::Lbs),
            original,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_cm_identity() {
        assert_eq!(height_to_cm(170.0, HeightUnit::Cm), 170.0);
    }

    #[test]
    fn test_inches_to_cm() {
        assert_relative_eq!(height_to_cm(66.0, HeightUnit::In), 167.64, epsilon = 1e-9);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(weight_to_kg(f64::NAN, WeightUnit::Lbs).is_nan());
        assert!(height_to_cm(f64::NAN, HeightUnit::In).is_nan());
    }
}
