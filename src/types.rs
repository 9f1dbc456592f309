//! Core domain types for the renal dosing engine.
//!
//! This module defines the value types passed between the pure calculation
//! stages:
//! - Patient input and its measurement units
//! - Converted measurements and body-weight selection
//! - Renal function results (formula-tagged)
//! - Dose decisions and the per-protocol recommendation sets
//! - The aggregated calculation result

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Input Types
// ============================================================================

/// Patient gender as used by the clinical formulas
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

/// Unit of a supplied weight value
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
}

/// Unit of a supplied height value
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HeightUnit {
    #[default]
    Cm,
    In,
}

/// Unit of a supplied age value (pediatric protocol only)
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgeUnit {
    #[default]
    Years,
    Months,
}

/// Pediatric age sub-category, paired with [`AgeUnit`]
///
/// Valid pairings: Years + Child (age 1-18), Months + TermInfant or
/// PrematureInfant (age 1 to under 12 months). Term means gestational age
/// >= 37 weeks.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AgeClass {
    Child,
    TermInfant,
    PrematureInfant,
}

/// Raw patient measurements captured at calculation time.
///
/// Fields are optional so the engine can report which required input is
/// missing for the chosen protocol; a supplied NaN is reported as
/// non-numeric. The caller owns the value for the duration of one
/// calculation; the engine never retains it.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PatientInput {
    pub age: Option<f64>,
    pub age_unit: AgeUnit,
    pub age_class: Option<AgeClass>,
    pub weight: Option<f64>,
    pub weight_unit: WeightUnit,
    pub height: Option<f64>,
    pub height_unit: HeightUnit,
    /// Serum creatinine in mg/dL
    pub serum_creatinine: Option<f64>,
    pub gender: Gender,
}

// ============================================================================
// Measurement and Weight-Selection Types
// ============================================================================

/// Measurements normalized to metric units.
///
/// Each field is populated whenever the corresponding input was supplied,
/// even when unused downstream (e.g. height on the DOAC path).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct ConvertedMeasurements {
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
}

/// Which weight model was fed into the clearance formula
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeightMethod {
    Actual,
    Ideal,
    Adjusted,
}

/// Outcome of ideal/adjusted body-weight resolution (Lovenox path only)
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeightSelection {
    pub ideal_weight_kg: f64,
    /// Present iff actual weight / ideal weight > 1.25
    pub adjusted_weight_kg: Option<f64>,
    pub weight_used_kg: f64,
    pub method: WeightMethod,
}

// ============================================================================
// Renal Function Types
// ============================================================================

/// Formula used to estimate renal function
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum RenalFormula {
    /// Adult creatinine clearance, mL/min
    CockcroftGault,
    /// Pediatric eGFR, mL/min/1.73m2
    BedsideSchwartz { k_constant: f64 },
}

/// Renal function estimate with its provenance
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct RenalFunctionResult {
    pub value: f64,
    pub formula: RenalFormula,
    /// True when the raw formula output was non-finite or negative and the
    /// value was clamped to 0. Callers should surface a warning instead of
    /// presenting 0 as a real estimate.
    pub degenerate: bool,
}

// ============================================================================
// Dose Decision Types
// ============================================================================

/// Dosing frequency of a regimen
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DoseFrequency {
    OnceDaily,
    TwiceDaily,
}

/// Rendering hint for a numeric dose amount
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DoseRounding {
    Exact,
    NearestMilligram,
}

/// A fixed regimen from a protocol table.
///
/// `text` is the protocol wording verbatim; the structured fields describe
/// the initial dose of the regimen for programmatic consumers.
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct RegimenDose {
    pub amount_mg: f64,
    pub frequency: DoseFrequency,
    pub qualifier: Option<&'static str>,
    pub text: &'static str,
}

/// A dose derived from actual body weight (Lovenox).
///
/// `amount_mg` is unrounded; `rounding` tells the renderer the display
/// precision, so callers may choose their own.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct WeightBasedDose {
    pub amount_mg: f64,
    pub frequency: DoseFrequency,
    pub rounding: DoseRounding,
}

/// Outcome of one dosing rule: either a dose or a sentinel
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DoseDecision {
    Regimen(RegimenDose),
    WeightBased(WeightBasedDose),
    NotRecommended,
    NotApplicable,
    SeeRenalDosing,
}

impl fmt::Display for DoseDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DoseDecision::Regimen(dose) => f.write_str(dose.text),
            DoseDecision::WeightBased(dose) => {
                let freq = match dose.frequency {
                    DoseFrequency::OnceDaily => "once daily",
                    DoseFrequency::TwiceDaily => "twice daily",
                };
                match dose.rounding {
                    DoseRounding::NearestMilligram => {
                        write!(f, "{}mg {}", dose.amount_mg.round() as i64, freq)
                    }
                    DoseRounding::Exact => write!(f, "{}mg {}", dose.amount_mg, freq),
                }
            }
            DoseDecision::NotRecommended => f.write_str("Not Recommended"),
            DoseDecision::NotApplicable => f.write_str("Not Applicable"),
            DoseDecision::SeeRenalDosing => f.write_str("See Renal Dosing"),
        }
    }
}

/// Drug + indication pair in the DOAC rule-set
#[derive(
    Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum DoacRegimen {
    DabigatranAfib,
    DabigatranVte,
    ApixabanAfib,
    ApixabanVte,
    RivaroxabanAfib,
    RivaroxabanVte,
    EdoxabanAfib,
    EdoxabanVte,
}

impl DoacRegimen {
    /// All regimens in the rule-set, in display order
    pub const ALL: [DoacRegimen; 8] = [
        DoacRegimen::DabigatranAfib,
        DoacRegimen::DabigatranVte,
        DoacRegimen::ApixabanAfib,
        DoacRegimen::ApixabanVte,
        DoacRegimen::RivaroxabanAfib,
        DoacRegimen::RivaroxabanVte,
        DoacRegimen::EdoxabanAfib,
        DoacRegimen::EdoxabanVte,
    ];

    /// Stable identifier, e.g. `dabigatran_afib`
    pub fn id(&self) -> &'static str {
        match self {
            DoacRegimen::DabigatranAfib => "dabigatran_afib",
            DoacRegimen::DabigatranVte => "dabigatran_vte",
            DoacRegimen::ApixabanAfib => "apixaban_afib",
            DoacRegimen::ApixabanVte => "apixaban_vte",
            DoacRegimen::RivaroxabanAfib => "rivaroxaban_afib",
            DoacRegimen::RivaroxabanVte => "rivaroxaban_vte",
            DoacRegimen::EdoxabanAfib => "edoxaban_afib",
            DoacRegimen::EdoxabanVte => "edoxaban_vte",
        }
    }
}

/// Per-protocol dosing recommendation set
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "protocol", rename_all = "snake_case")]
pub enum DosingRecommendation {
    Doac {
        regimens: BTreeMap<DoacRegimen, DoseDecision>,
    },
    Lovenox {
        twice_daily: DoseDecision,
        once_daily: DoseDecision,
        renal: DoseDecision,
    },
    /// Pediatric protocol: renal function estimate only, no dosing rules
    RenalFunctionOnly,
}

// ============================================================================
// Calculation Result
// ============================================================================

/// Immutable result of one calculation invocation.
///
/// Self-describing: the formula, k constant and weight-selection method used
/// are all included so a caller can verify provenance without re-deriving
/// anything. Discard and recompute whenever any input changes.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CalculationResult {
    pub measurements: ConvertedMeasurements,
    /// Populated on the Lovenox path only
    pub weight_selection: Option<WeightSelection>,
    pub renal: RenalFunctionResult,
    pub recommendation: DosingRecommendation,
}

impl CalculationResult {
    /// Assemble the stage outputs into one result record.
    ///
    /// Pure structuring, no computation.
    pub fn assemble(
        measurements: ConvertedMeasurements,
        weight_selection: Option<WeightSelection>,
        renal: RenalFunctionResult,
        recommendation: DosingRecommendation,
    ) -> Self {
        Self {
            measurements,
            weight_selection,
            renal,
            recommendation,
        }
    }
}
