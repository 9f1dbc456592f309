//! Renal function estimation.
//!
//! Two independent formula variants, selected by protocol:
//! - Cockcroft-Gault creatinine clearance for adults (mL/min)
//! - Bedside Schwartz eGFR for pediatrics (mL/min/1.73m2)

use crate::error::{Error, Result};
use crate::{AgeClass, AgeUnit, Gender, RenalFormula, RenalFunctionResult};

/// Schwartz k constant for children aged 1-18 years
pub const SCHWARTZ_K_CHILD: f64 = 0.413;
/// Schwartz k constant for term infants under 1 year
pub const SCHWARTZ_K_TERM_INFANT: f64 = 0.45;
/// Schwartz k constant for premature infants under 1 year
pub const SCHWARTZ_K_PREMATURE_INFANT: f64 = 0.33;

/// Cockcroft-Gault sex factor applied for female patients
pub const FEMALE_SEX_FACTOR: f64 = 0.85;

/// Adult creatinine clearance via Cockcroft-Gault.
///
/// `weight_kg` is whichever weight the protocol selected (actual for DOAC,
/// the resolved dosing weight for Lovenox). A non-finite or negative raw
/// result is clamped to 0 and flagged `degenerate` rather than failing;
/// callers should warn on the flag instead of presenting 0 mL/min as real.
pub fn cockcroft_gault(
    age: f64,
    weight_kg: f64,
    serum_creatinine: f64,
    gender: Gender,
) -> RenalFunctionResult {
    let sex_factor = match gender {
        Gender::Female => FEMALE_SEX_FACTOR,
        Gender::Male => 1.0,
    };

    let raw = ((140.0 - age) * weight_kg * sex_factor) / (72.0 * serum_creatinine);
    clamp_result(raw, RenalFormula::CockcroftGault)
}

/// Pediatric eGFR via Bedside Schwartz: `k * height_cm / SCr`.
///
/// Fails with `OutOfRange` on an invalid (age unit, age class, age)
/// combination; the k constant is never silently zero.
pub fn bedside_schwartz(
    age: f64,
    age_unit: AgeUnit,
    age_class: AgeClass,
    height_cm: f64,
    serum_creatinine: f64,
) -> Result<RenalFunctionResult> {
    let k = schwartz_k(age, age_unit, age_class)?;
    let raw = (k * height_cm) / serum_creatinine;
    Ok(clamp_result(raw, RenalFormula::BedsideSchwartz { k_constant: k }))
}

/// Select the Schwartz k constant.
///
/// Exhaustive over the valid (unit, class, range) pairings; anything else
/// is a validation error, never a fallthrough default.
pub fn schwartz_k(age: f64, age_unit: AgeUnit, age_class: AgeClass) -> Result<f64> {
    match (age_unit, age_class) {
        (AgeUnit::Years, AgeClass::Child) if (1.0..=18.0).contains(&age) => Ok(SCHWARTZ_K_CHILD),
        (AgeUnit::Months, AgeClass::TermInfant) if (1.0..12.0).contains(&age) => {
            Ok(SCHWARTZ_K_TERM_INFANT)
        }
        (AgeUnit::Months, AgeClass::PrematureInfant) if (1.0..12.0).contains(&age) => {
            Ok(SCHWARTZ_K_PREMATURE_INFANT)
        }
        (unit, class) => Err(Error::OutOfRange(format!(
            "Invalid pediatric age combination: {} {:?} as {:?}",
            age, unit, class
        ))),
    }
}

/// Clamp a raw formula output to a reportable value.
fn clamp_result(raw: f64, formula: RenalFormula) -> RenalFunctionResult {
    if raw.is_finite() && raw >= 0.0 {
        RenalFunctionResult {
            value: raw,
            formula,
            degenerate: false,
        }
    } else {
        tracing::warn!(
            "Renal function formula {:?} produced {}, clamping to 0",
            formula,
            raw
        );
        RenalFunctionResult {
            value: 0.0,
            formula,
            degenerate: true,
        }
    }
}
