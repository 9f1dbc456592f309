//! Dosing rule engine.
//!
//! Maps a clearance estimate plus patient attributes to per-drug outcomes.
//! Each drug + indication pair is an independent rule: most are ordered
//! decision tables over sorted creatinine-clearance breakpoints (first
//! matching band wins, boundary inclusivity encoded per band); apixaban AFib
//! is a criteria rule that ignores clearance entirely, and the Lovenox
//! rules derive their amounts from actual body weight.

use crate::{
    DoacRegimen, DosingRecommendation, DoseDecision, DoseFrequency, DoseRounding, RegimenDose,
    WeightBasedDose,
};
use std::collections::BTreeMap;

/// Patient attributes consumed by the DOAC rule-set.
///
/// `weight_kg` and the clearance are both actual-body-weight based on this
/// protocol; no ideal/adjusted weight is involved.
#[derive(Clone, Copy, Debug)]
pub struct DoacContext {
    /// Creatinine clearance, mL/min
    pub crcl: f64,
    pub age: f64,
    pub weight_kg: f64,
    /// Serum creatinine, mg/dL
    pub serum_creatinine: f64,
}

// ============================================================================
// Decision table machinery
// ============================================================================

/// One row of an ordered decision table over creatinine clearance.
struct CrClBand {
    /// Upper breakpoint of this band; `f64::INFINITY` terminates the table
    upper: f64,
    /// Whether a clearance exactly at the breakpoint falls in this band
    inclusive: bool,
    outcome: BandOutcome,
}

enum BandOutcome {
    NotRecommended,
    Dose(RegimenDose),
    /// Dose splits on actual body weight relative to a cutoff
    ByWeight {
        cutoff_kg: f64,
        at_or_below: RegimenDose,
        above: RegimenDose,
    },
}

const fn regimen(
    amount_mg: f64,
    frequency: DoseFrequency,
    qualifier: Option<&'static str>,
    text: &'static str,
) -> RegimenDose {
    RegimenDose {
        amount_mg,
        frequency,
        qualifier,
        text,
    }
}

/// Walk a band table top to bottom; the first band containing the
/// clearance decides the outcome.
fn lookup(bands: &[CrClBand], ctx: &DoacContext) -> DoseDecision {
    for band in bands {
        let within = if band.inclusive {
            ctx.crcl <= band.upper
        } else {
            ctx.crcl < band.upper
        };
        if within {
            return match &band.outcome {
                BandOutcome::NotRecommended => DoseDecision::NotRecommended,
                BandOutcome::Dose(dose) => DoseDecision::Regimen(*dose),
                BandOutcome::ByWeight {
                    cutoff_kg,
                    at_or_below,
                    above,
                } => {
                    let dose = if ctx.weight_kg <= *cutoff_kg {
                        at_or_below
                    } else {
                        above
                    };
                    DoseDecision::Regimen(*dose)
                }
            };
        }
    }
    // Every table ends with an unbounded band, so a finite clearance always
    // matches one of the rows above.
    DoseDecision::NotRecommended
}

// ============================================================================
// DOAC rule tables
// ============================================================================

static DABIGATRAN_AFIB: &[CrClBand] = &[
    CrClBand {
        upper: 15.0,
        inclusive: false,
        outcome: BandOutcome::NotRecommended,
    },
    CrClBand {
        upper: 30.0,
        inclusive: true,
        outcome: BandOutcome::Dose(regimen(
            75.0,
            DoseFrequency::TwiceDaily,
            None,
            "75 mg twice daily",
        )),
    },
    CrClBand {
        upper: f64::INFINITY,
        inclusive: true,
        outcome: BandOutcome::Dose(regimen(
            150.0,
            DoseFrequency::TwiceDaily,
            None,
            "150 mg twice daily",
        )),
    },
];

static DABIGATRAN_VTE: &[CrClBand] = &[
    CrClBand {
        upper: 30.0,
        inclusive: true,
        outcome: BandOutcome::NotRecommended,
    },
    CrClBand {
        upper: f64::INFINITY,
        inclusive: true,
        outcome: BandOutcome::Dose(regimen(
            150.0,
            DoseFrequency::TwiceDaily,
            Some("after LMWH for at least 5 days"),
            "150 mg twice daily after LMWH for at least 5 days",
        )),
    },
];

static RIVAROXABAN_AFIB: &[CrClBand] = &[
    CrClBand {
        upper: 15.0,
        inclusive: false,
        outcome: BandOutcome::NotRecommended,
    },
    CrClBand {
        upper: 50.0,
        inclusive: true,
        outcome: BandOutcome::Dose(regimen(
            15.0,
            DoseFrequency::OnceDaily,
            Some("with food"),
            "15mg once daily with food",
        )),
    },
    CrClBand {
        upper: f64::INFINITY,
        inclusive: true,
        outcome: BandOutcome::Dose(regimen(
            20.0,
            DoseFrequency::OnceDaily,
            Some("with food"),
            "20mg once daily with food",
        )),
    },
];

static RIVAROXABAN_VTE: &[CrClBand] = &[
    CrClBand {
        upper: 15.0,
        inclusive: true,
        outcome: BandOutcome::NotRecommended,
    },
    CrClBand {
        upper: f64::INFINITY,
        inclusive: true,
        outcome: BandOutcome::Dose(regimen(
            15.0,
            DoseFrequency::TwiceDaily,
            Some("x21 days followed by 20mg once daily (with food)"),
            "15mg twice daily x21 days followed by 20mg once daily (with food)",
        )),
    },
];

static EDOXABAN_AFIB: &[CrClBand] = &[
    CrClBand {
        upper: 15.0,
        inclusive: false,
        outcome: BandOutcome::NotRecommended,
    },
    CrClBand {
        upper: 50.0,
        inclusive: true,
        outcome: BandOutcome::Dose(regimen(
            30.0,
            DoseFrequency::OnceDaily,
            None,
            "30mg once daily",
        )),
    },
    CrClBand {
        upper: 95.0,
        inclusive: true,
        outcome: BandOutcome::Dose(regimen(
            60.0,
            DoseFrequency::OnceDaily,
            None,
            "60mg once daily",
        )),
    },
    // Above 95 mL/min edoxaban loses efficacy for AFib
    CrClBand {
        upper: f64::INFINITY,
        inclusive: true,
        outcome: BandOutcome::NotRecommended,
    },
];

static EDOXABAN_VTE: &[CrClBand] = &[
    CrClBand {
        upper: 15.0,
        inclusive: false,
        outcome: BandOutcome::NotRecommended,
    },
    CrClBand {
        upper: 50.0,
        inclusive: true,
        outcome: BandOutcome::Dose(regimen(
            30.0,
            DoseFrequency::OnceDaily,
            Some("after at least 5 days of LMWH"),
            "30mg once daily, after at least 5 days of LMWH",
        )),
    },
    CrClBand {
        upper: 95.0,
        inclusive: true,
        outcome: BandOutcome::ByWeight {
            cutoff_kg: EDOXABAN_WEIGHT_CUTOFF_KG,
            at_or_below: regimen(
                30.0,
                DoseFrequency::OnceDaily,
                Some("after at least 5 days of LMWH"),
                "30mg once daily, after at least 5 days of LMWH",
            ),
            above: regimen(
                60.0,
                DoseFrequency::OnceDaily,
                Some("after at least 5 days of LMWH"),
                "60mg once daily, after at least 5 days of LMWH",
            ),
        },
    },
    CrClBand {
        upper: f64::INFINITY,
        inclusive: true,
        outcome: BandOutcome::NotRecommended,
    },
];

/// Body weight at or below which edoxaban VTE dosing is reduced, kg
const EDOXABAN_WEIGHT_CUTOFF_KG: f64 = 60.0;

// ============================================================================
// Criteria rules (no clearance term)
// ============================================================================

/// Age at or above which apixaban AFib dose reduction may apply
const APIXABAN_REDUCTION_AGE: f64 = 80.0;
/// Weight at or below which apixaban AFib dose reduction may apply, kg
const APIXABAN_REDUCTION_WEIGHT_KG: f64 = 60.0;
/// Serum creatinine at or above which apixaban AFib dose reduction applies
const APIXABAN_REDUCTION_SCR: f64 = 1.5;

/// Apixaban AFib dosing is criteria-based (age/weight/SCr) and
/// intentionally has no clearance term.
fn apixaban_afib(ctx: &DoacContext) -> DoseDecision {
    let reduced = (ctx.age >= APIXABAN_REDUCTION_AGE
        || ctx.weight_kg <= APIXABAN_REDUCTION_WEIGHT_KG)
        && ctx.serum_creatinine >= APIXABAN_REDUCTION_SCR;

    if reduced {
        DoseDecision::Regimen(regimen(
            2.5,
            DoseFrequency::TwiceDaily,
            None,
            "2.5mg twice daily",
        ))
    } else {
        DoseDecision::Regimen(regimen(
            5.0,
            DoseFrequency::TwiceDaily,
            None,
            "5mg twice daily",
        ))
    }
}

/// Apixaban VTE treatment dose carries no renal adjustment.
fn apixaban_vte(_ctx: &DoacContext) -> DoseDecision {
    DoseDecision::Regimen(regimen(
        10.0,
        DoseFrequency::TwiceDaily,
        Some("x 7 days, then 5 mg twice daily"),
        "10 mg twice daily x 7 days, then 5 mg twice daily",
    ))
}

// ============================================================================
// Rule-set evaluation
// ============================================================================

/// Evaluate a single drug + indication rule.
pub fn evaluate_regimen(regimen: DoacRegimen, ctx: &DoacContext) -> DoseDecision {
    match regimen {
        DoacRegimen::DabigatranAfib => lookup(DABIGATRAN_AFIB, ctx),
        DoacRegimen::DabigatranVte => lookup(DABIGATRAN_VTE, ctx),
        DoacRegimen::ApixabanAfib => apixaban_afib(ctx),
        DoacRegimen::ApixabanVte => apixaban_vte(ctx),
        DoacRegimen::RivaroxabanAfib => lookup(RIVAROXABAN_AFIB, ctx),
        DoacRegimen::RivaroxabanVte => lookup(RIVAROXABAN_VTE, ctx),
        DoacRegimen::EdoxabanAfib => lookup(EDOXABAN_AFIB, ctx),
        DoacRegimen::EdoxabanVte => lookup(EDOXABAN_VTE, ctx),
    }
}

/// Evaluate the full DOAC rule-set for one patient.
pub fn doac_recommendations(ctx: &DoacContext) -> DosingRecommendation {
    let regimens: BTreeMap<DoacRegimen, DoseDecision> = DoacRegimen::ALL
        .iter()
        .map(|&r| (r, evaluate_regimen(r, ctx)))
        .collect();

    tracing::debug!(
        "Evaluated {} DOAC regimens at CrCl {:.2} mL/min",
        regimens.len(),
        ctx.crcl
    );

    DosingRecommendation::Doac { regimens }
}

// ============================================================================
// Lovenox rules
// ============================================================================

/// Clearance at or below which Lovenox switches to renal dosing, mL/min
const LOVENOX_RENAL_CRCL: f64 = 30.0;
/// Once-daily Lovenox dose per kg of actual body weight
const LOVENOX_QD_MG_PER_KG: f64 = 1.5;

/// Evaluate the Lovenox rule-set.
///
/// Dose amounts use actual body weight in kg, independent of whichever
/// weight model produced the clearance. Amounts are returned unrounded with
/// a nearest-milligram rendering hint.
pub fn lovenox_recommendations(crcl: f64, actual_weight_kg: f64) -> DosingRecommendation {
    let weight_dose = |amount_mg: f64, frequency: DoseFrequency| {
        DoseDecision::WeightBased(WeightBasedDose {
            amount_mg,
            frequency,
            rounding: DoseRounding::NearestMilligram,
        })
    };

    let (twice_daily, once_daily, renal) = if crcl > LOVENOX_RENAL_CRCL {
        (
            weight_dose(actual_weight_kg, DoseFrequency::TwiceDaily),
            weight_dose(LOVENOX_QD_MG_PER_KG * actual_weight_kg, DoseFrequency::OnceDaily),
            DoseDecision::NotApplicable,
        )
    } else {
        (
            DoseDecision::SeeRenalDosing,
            DoseDecision::SeeRenalDosing,
            weight_dose(actual_weight_kg, DoseFrequency::OnceDaily),
        )
    };

    DosingRecommendation::Lovenox {
        twice_daily,
        once_daily,
        renal,
    }
}
