//! End-to-end protocol tests.
//!
//! Each test drives one of the public entry points with realistic patient
//! measurements and checks the clearance, the selected weight model and the
//! resulting dose texts together.

use approx::assert_relative_eq;
use renal_core::*;

fn doac_text(result: &CalculationResult, regimen: DoacRegimen) -> String {
    match &result.recommendation {
        DosingRecommendation::Doac { regimens } => regimens[&regimen].to_string(),
        other => panic!("expected DOAC recommendation, got {:?}", other),
    }
}

#[test]
fn test_doac_typical_adult_male() {
    // 70 y male, 70 kg, SCr 1.0 -> CrCl 68.06 mL/min
    let input = PatientInput {
        age: Some(70.0),
        weight: Some(70.0),
        serum_creatinine: Some(1.0),
        gender: Gender::Male,
        ..Default::default()
    };
    let result = compute_adult_doac_dosing(&input).unwrap();

    assert_relative_eq!(result.renal.value, 68.0556, epsilon = 1e-3);
    assert_eq!(result.renal.formula, RenalFormula::CockcroftGault);
    assert!(!result.renal.degenerate);
    assert!(result.weight_selection.is_none());

    assert_eq!(
        doac_text(&result, DoacRegimen::DabigatranAfib),
        "150 mg twice daily"
    );
    assert_eq!(
        doac_text(&result, DoacRegimen::RivaroxabanAfib),
        "20mg once daily with food"
    );
}

#[test]
fn test_doac_apixaban_dose_reduction() {
    // 85 y female, 55 kg, SCr 1.6: meets both reduction criteria
    let input = PatientInput {
        age: Some(85.0),
        weight: Some(55.0),
        serum_creatinine: Some(1.6),
        gender: Gender::Female,
        ..Default::default()
    };
    let result = compute_adult_doac_dosing(&input).unwrap();

    assert_eq!(
        doac_text(&result, DoacRegimen::ApixabanAfib),
        "2.5mg twice daily"
    );
}

#[test]
fn test_doac_severe_renal_impairment() {
    // 88 y female, 48 kg, SCr 3.5 -> CrCl ~ 8.4 mL/min
    let input = PatientInput {
        age: Some(88.0),
        weight: Some(48.0),
        serum_creatinine: Some(3.5),
        gender: Gender::Female,
        ..Default::default()
    };
    let result = compute_adult_doac_dosing(&input).unwrap();
    assert!(result.renal.value < 15.0);

    for regimen in [
        DoacRegimen::DabigatranAfib,
        DoacRegimen::DabigatranVte,
        DoacRegimen::RivaroxabanAfib,
        DoacRegimen::RivaroxabanVte,
        DoacRegimen::EdoxabanAfib,
        DoacRegimen::EdoxabanVte,
    ] {
        assert_eq!(doac_text(&result, regimen), "Not Recommended");
    }
    // Apixaban rules carry no clearance term and still produce a dose
    assert_eq!(
        doac_text(&result, DoacRegimen::ApixabanAfib),
        "2.5mg twice daily"
    );
    assert_eq!(
        doac_text(&result, DoacRegimen::ApixabanVte),
        "10 mg twice daily x 7 days, then 5 mg twice daily"
    );
}

#[test]
fn test_lovenox_obese_patient_uses_adjusted_weight_for_crcl_only() {
    // 50 y male, 150 kg at 170 cm: ratio > 1.25, ABW ~ 99.57 kg,
    // CrCl ~ 124.45 mL/min; the doses still use the actual 150 kg
    let input = PatientInput {
        age: Some(50.0),
        weight: Some(150.0),
        height: Some(170.0),
        serum_creatinine: Some(1.0),
        gender: Gender::Male,
        ..Default::default()
    };
    let result = compute_lovenox_dosing(&input).unwrap();

    let selection = result.weight_selection.expect("Lovenox resolves a weight");
    assert_eq!(selection.method, WeightMethod::Adjusted);
    assert_relative_eq!(selection.ideal_weight_kg, 65.937, epsilon = 1e-2);
    assert_relative_eq!(
        selection.adjusted_weight_kg.unwrap(),
        99.562,
        epsilon = 1e-2
    );
    assert_relative_eq!(result.renal.value, 124.45, epsilon = 1e-1);

    match &result.recommendation {
        DosingRecommendation::Lovenox {
            twice_daily,
            once_daily,
            renal,
        } => {
            assert_eq!(twice_daily.to_string(), "150mg twice daily");
            assert_eq!(once_daily.to_string(), "225mg once daily");
            assert_eq!(renal, &DoseDecision::NotApplicable);
        }
        other => panic!("expected Lovenox recommendation, got {:?}", other),
    }
}

#[test]
fn test_lovenox_imperial_units() {
    // Same patient as above, supplied in pounds and inches
    let input = PatientInput {
        age: Some(50.0),
        weight: Some(150.0 * 2.20462),
        weight_unit: WeightUnit::Lbs,
        height: Some(170.0 / 2.54),
        height_unit: HeightUnit::In,
        serum_creatinine: Some(1.0),
        gender: Gender::Male,
        ..Default::default()
    };
    let result = compute_lovenox_dosing(&input).unwrap();

    assert_relative_eq!(result.measurements.weight_kg.unwrap(), 150.0, epsilon = 1e-6);
    assert_relative_eq!(result.measurements.height_cm.unwrap(), 170.0, epsilon = 1e-6);
    assert_relative_eq!(result.renal.value, 124.45, epsilon = 1e-1);
}

#[test]
fn test_lovenox_renal_dosing_branch() {
    // 80 y female, 60 kg at 160 cm, SCr 2.8 -> CrCl well under 30
    let input = PatientInput {
        age: Some(80.0),
        weight: Some(60.0),
        height: Some(160.0),
        serum_creatinine: Some(2.8),
        gender: Gender::Female,
        ..Default::default()
    };
    let result = compute_lovenox_dosing(&input).unwrap();
    assert!(result.renal.value <= 30.0);

    match &result.recommendation {
        DosingRecommendation::Lovenox {
            twice_daily,
            once_daily,
            renal,
        } => {
            assert_eq!(twice_daily, &DoseDecision::SeeRenalDosing);
            assert_eq!(once_daily, &DoseDecision::SeeRenalDosing);
            assert_eq!(renal.to_string(), "60mg once daily");
        }
        other => panic!("expected Lovenox recommendation, got {:?}", other),
    }
}

#[test]
fn test_pediatric_child() {
    // 10 y child, 120 cm, SCr 0.5 -> eGFR 99.12 mL/min/1.73m2
    let input = PatientInput {
        age: Some(10.0),
        age_unit: AgeUnit::Years,
        age_class: Some(AgeClass::Child),
        height: Some(120.0),
        serum_creatinine: Some(0.5),
        ..Default::default()
    };
    let result = compute_pediatric_renal_function(&input).unwrap();

    assert_relative_eq!(result.renal.value, 99.12, epsilon = 1e-6);
    assert_eq!(
        result.renal.formula,
        RenalFormula::BedsideSchwartz { k_constant: 0.413 }
    );
    assert_eq!(result.recommendation, DosingRecommendation::RenalFunctionOnly);
    assert!(result.weight_selection.is_none());
    assert!(result.measurements.weight_kg.is_none());
}

#[test]
fn test_pediatric_premature_infant() {
    let input = PatientInput {
        age: Some(6.0),
        age_unit: AgeUnit::Months,
        age_class: Some(AgeClass::PrematureInfant),
        height: Some(60.0),
        serum_creatinine: Some(0.4),
        ..Default::default()
    };
    let result = compute_pediatric_renal_function(&input).unwrap();

    // 0.33 * 60 / 0.4
    assert_relative_eq!(result.renal.value, 49.5, epsilon = 1e-6);
    assert_eq!(
        result.renal.formula,
        RenalFormula::BedsideSchwartz { k_constant: 0.33 }
    );
}

#[test]
fn test_adult_validation_rejects_minor() {
    let input = PatientInput {
        age: Some(16.0),
        weight: Some(60.0),
        serum_creatinine: Some(0.9),
        ..Default::default()
    };
    assert!(matches!(
        compute_adult_doac_dosing(&input),
        Err(Error::OutOfRange(_))
    ));
}

#[test]
fn test_result_serializes_for_presentation_layer() {
    let input = PatientInput {
        age: Some(70.0),
        weight: Some(70.0),
        serum_creatinine: Some(1.0),
        ..Default::default()
    };
    let result = compute_adult_doac_dosing(&input).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    // Formula provenance and regimen keys are visible in the JSON shape
    assert_eq!(json["renal"]["formula"]["name"], "cockcroft_gault");
    assert_eq!(json["recommendation"]["protocol"], "doac");
    assert!(json["recommendation"]["regimens"]
        .as_object()
        .unwrap()
        .contains_key("dabigatran_afib"));
}

#[test]
fn test_results_are_independent_across_calls() {
    let input = PatientInput {
        age: Some(70.0),
        weight: Some(70.0),
        serum_creatinine: Some(1.0),
        ..Default::default()
    };
    let first = compute_adult_doac_dosing(&input).unwrap();
    let second = compute_adult_doac_dosing(&input).unwrap();
    assert_eq!(first, second);
}
