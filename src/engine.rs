//! Calculation entry points, one per clinical protocol.
//!
//! Each function is pure and synchronous: validate the raw input, convert
//! units, estimate renal function, evaluate the protocol's dosing rules and
//! assemble the result. Validation always runs before any formula; a
//! validation error aborts the invocation with nothing partially computed.

use crate::error::{Error, Result};
use crate::rules::{self, DoacContext};
use crate::{
    renal, units, weight, CalculationResult, ConvertedMeasurements, DosingRecommendation,
    PatientInput,
};

/// Pull a required field out of the input, reporting absence or NaN.
fn require(value: Option<f64>, field: &'static str) -> Result<f64> {
    let value = value.ok_or(Error::MissingField(field))?;
    if value.is_nan() {
        return Err(Error::NotNumeric(field));
    }
    Ok(value)
}

fn require_adult_age(age: f64) -> Result<f64> {
    if age <= 18.0 {
        return Err(Error::OutOfRange(format!(
            "Adult protocols require age > 18 years, got {}",
            age
        )));
    }
    Ok(age)
}

fn require_positive(value: f64, field: &'static str) -> Result<f64> {
    if value <= 0.0 {
        return Err(Error::OutOfRange(format!(
            "{} must be greater than 0, got {}",
            field, value
        )));
    }
    Ok(value)
}

/// Adult DOAC dosing from actual body weight.
///
/// Requires age (> 18 years), weight and serum creatinine; height is
/// accepted and converted but plays no part in this protocol.
pub fn compute_adult_doac_dosing(input: &PatientInput) -> Result<CalculationResult> {
    let age = require_adult_age(require(input.age, "age")?)?;
    let weight = require_positive(require(input.weight, "weight")?, "weight")?;
    let scr = require_positive(
        require(input.serum_creatinine, "serum_creatinine")?,
        "serum_creatinine",
    )?;

    let weight_kg = units::weight_to_kg(weight, input.weight_unit);
    let height_cm = input.height.map(|h| units::height_to_cm(h, input.height_unit));
    let measurements = ConvertedMeasurements {
        weight_kg: Some(weight_kg),
        height_cm,
    };

    let renal_result = renal::cockcroft_gault(age, weight_kg, scr, input.gender);
    tracing::info!(
        "DOAC protocol: CrCl {:.2} mL/min (actual weight {:.1} kg)",
        renal_result.value,
        weight_kg
    );

    let recommendation = rules::doac_recommendations(&DoacContext {
        crcl: renal_result.value,
        age,
        weight_kg,
        serum_creatinine: scr,
    });

    Ok(CalculationResult::assemble(
        measurements,
        None,
        renal_result,
        recommendation,
    ))
}

/// Lovenox dosing with ideal/adjusted body-weight resolution.
///
/// Requires age (> 18 years), weight, height and serum creatinine. The
/// clearance uses the resolved dosing weight; the dose amounts use actual
/// body weight.
pub fn compute_lovenox_dosing(input: &PatientInput) -> Result<CalculationResult> {
    let age = require_adult_age(require(input.age, "age")?)?;
    let weight = require_positive(require(input.weight, "weight")?, "weight")?;
    let height = require_positive(require(input.height, "height")?, "height")?;
    let scr = require_positive(
        require(input.serum_creatinine, "serum_creatinine")?,
        "serum_creatinine",
    )?;

    let weight_kg = units::weight_to_kg(weight, input.weight_unit);
    let height_cm = units::height_to_cm(height, input.height_unit);
    let measurements = ConvertedMeasurements {
        weight_kg: Some(weight_kg),
        height_cm: Some(height_cm),
    };

    let selection = weight::resolve_dosing_weight(weight_kg, height_cm, input.gender);
    let renal_result =
        renal::cockcroft_gault(age, selection.weight_used_kg, scr, input.gender);
    tracing::info!(
        "Lovenox protocol: CrCl {:.2} mL/min using {:?} weight {:.1} kg",
        renal_result.value,
        selection.method,
        selection.weight_used_kg
    );

    let recommendation = rules::lovenox_recommendations(renal_result.value, weight_kg);

    Ok(CalculationResult::assemble(
        measurements,
        Some(selection),
        renal_result,
        recommendation,
    ))
}

/// Pediatric eGFR via Bedside Schwartz; no dosing rules on this protocol.
///
/// Requires age (> 0, with a valid age unit / age class pairing), height
/// and serum creatinine.
pub fn compute_pediatric_renal_function(input: &PatientInput) -> Result<CalculationResult> {
    let age = require_positive(require(input.age, "age")?, "age")?;
    let age_class = input.age_class.ok_or(Error::MissingField("age_class"))?;
    let height = require_positive(require(input.height, "height")?, "height")?;
    let scr = require_positive(
        require(input.serum_creatinine, "serum_creatinine")?,
        "serum_creatinine",
    )?;

    let height_cm = units::height_to_cm(height, input.height_unit);
    let measurements = ConvertedMeasurements {
        weight_kg: input.weight.map(|w| units::weight_to_kg(w, input.weight_unit)),
        height_cm: Some(height_cm),
    };

    let renal_result = renal::bedside_schwartz(age, input.age_unit, age_class, height_cm, scr)?;
    tracing::info!(
        "Pediatric protocol: eGFR {:.2} mL/min/1.73m2 ({:?})",
        renal_result.value,
        renal_result.formula
    );

    Ok(CalculationResult::assemble(
        measurements,
        None,
        renal_result,
        DosingRecommendation::RenalFunctionOnly,
    ))
}
