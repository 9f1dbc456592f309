//! Ideal/adjusted body-weight resolution for weight-capped dosing protocols.
//!
//! Only the Lovenox path uses this; the DOAC protocol feeds actual body
//! weight straight into the clearance formula.

use crate::units::CM_PER_IN;
use crate::{Gender, WeightMethod, WeightSelection};

/// IBW base for males, kg (Devine)
const IBW_BASE_MALE_KG: f64 = 50.0;
/// IBW base for females, kg (Devine)
const IBW_BASE_FEMALE_KG: f64 = 45.5;
/// Added per inch of height over five feet, kg
const IBW_KG_PER_INCH_OVER_5FT: f64 = 2.3;
/// Above this actual/ideal ratio the adjusted body weight is used
const ADJUSTED_WEIGHT_RATIO: f64 = 1.25;
/// ABW correction factor applied to the excess over ideal
const ABW_CORRECTION: f64 = 0.4;

/// Select the weight to feed into the clearance formula.
///
/// Selection rules, evaluated in order on `ratio = actual / ideal`:
/// 1. ratio > 1.25 -> adjusted body weight (IBW + 0.4 x excess)
/// 2. 1 < ratio <= 1.25 -> ideal body weight
/// 3. ratio <= 1 -> actual body weight
///
/// The three branches are exhaustive and mutually exclusive for any
/// positive actual weight.
pub fn resolve_dosing_weight(weight_kg: f64, height_cm: f64, gender: Gender) -> WeightSelection {
    let height_inches = height_cm / CM_PER_IN;
    let inches_over_5ft = (height_inches - 60.0).max(0.0);

    let base = match gender {
        Gender::Female => IBW_BASE_FEMALE_KG,
        Gender::Male => IBW_BASE_MALE_KG,
    };
    let ideal_weight_kg = base + IBW_KG_PER_INCH_OVER_5FT * inches_over_5ft;

    // ideal_weight_kg >= base > 0, so the ratio is always well defined
    let ratio = weight_kg / ideal_weight_kg;

    if ratio > ADJUSTED_WEIGHT_RATIO {
        let adjusted = ideal_weight_kg + ABW_CORRECTION * (weight_kg - ideal_weight_kg);
        tracing::debug!(
            "Weight ratio {:.2} > {}, using adjusted body weight {:.1} kg",
            ratio,
            ADJUSTED_WEIGHT_RATIO,
            adjusted
        );
        WeightSelection {
            ideal_weight_kg,
            adjusted_weight_kg: Some(adjusted),
            weight_used_kg: adjusted,
            method: WeightMethod::Adjusted,
        }
    } else if ratio > 1.0 {
        tracing::debug!(
            "Weight ratio {:.2} in (1, {}], using ideal body weight {:.1} kg",
            ratio,
            ADJUSTED_WEIGHT_RATIO,
            ideal_weight_kg
        );
        WeightSelection {
            ideal_weight_kg,
            adjusted_weight_kg: None,
            weight_used_kg: ideal_weight_kg,
            method: WeightMethod::Ideal,
        }
    } else {
        WeightSelection {
            ideal_weight_kg,
            adjusted_weight_kg: None,
            weight_used_kg: weight_kg,
            method: WeightMethod::Actual,
        }
    }
}
