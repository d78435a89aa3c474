//! Validator tests against realistic request bodies

use serde_json::{json, Value};

use super::layout::{FieldKind, FEATURE_LAYOUT};
use super::validate::{validate, ValidationError};

/// Typical adult with all indicator flags cleared
pub(crate) fn sample_payload() -> Value {
    json!({
        "age": 45,
        "Systolic_BP_mmHg": 128.0,
        "Diastolic_BP_mmHg": 82.0,
        "Heart_Rate_bpm": 74.0,
        "Blood_Oxygen_Level_SpO2_percent": 97.5,
        "Temperature_C": 36.8,
        "height_cm": 172.0,
        "weight_kg": 78.5,
        "BMI_kg_per_m2": 26.5,
        "ecg_heart_rate_bpm": 73.0,
        "ecg_qrs_duration_ms": 96.0,
        "ecg_st_deviation_mV": 0.05,
        "ecg_r_peak_mV": 1.2,
        "ecg_abnormal": 0,
        "blood_sugar_mg_dL": 102.0,
        "family_history": 0,
        "sex_encoded": 0,
        "ecg_label_encoded": 0,
        "smoking_status_Former": 0,
        "smoking_status_Never": 0,
        "physical_activity_level_Low": 0,
        "physical_activity_level_Medium": 0,
        "diet_quality_Good": 0,
        "diet_quality_Poor": 0,
        "stress_level_Low": 0,
        "stress_level_Medium": 0
    })
}

fn with_field(field: &str, value: Value) -> Value {
    let mut payload = sample_payload();
    payload[field] = value;
    payload
}

fn binary_fields() -> impl Iterator<Item = &'static str> {
    FEATURE_LAYOUT
        .iter()
        .filter(|(_, kind)| *kind == FieldKind::Binary)
        .map(|(name, _)| *name)
}

#[test]
fn test_valid_payload() {
    let record = validate(&sample_payload()).expect("sample should validate");

    assert_eq!(record.age(), 45);
    assert_eq!(record.get("Systolic_BP_mmHg"), Some(128.0));
    assert_eq!(record.get("ecg_st_deviation_mV"), Some(0.05));
    assert_eq!(record.get("unknown"), None);
}

#[test]
fn test_canonical_order() {
    let record = validate(&sample_payload()).unwrap();
    let names: Vec<_> = record.iter().map(|(name, _)| name).collect();
    let expected: Vec<_> = FEATURE_LAYOUT.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, expected);
    assert_eq!(record.to_row()[0], 45.0);
    assert_eq!(record.to_row()[14], 102.0);
}

#[test]
fn test_each_missing_field_is_named() {
    for &(field, _) in FEATURE_LAYOUT {
        let mut payload = sample_payload();
        payload.as_object_mut().unwrap().remove(field);

        let errors = validate(&payload).unwrap_err();
        assert_eq!(
            errors.errors(),
            &[ValidationError::MissingField { field }],
            "missing {} should be reported alone",
            field
        );
    }
}

#[test]
fn test_all_errors_collected() {
    let errors = validate(&json!({ "age": "old", "ecg_abnormal": 3 })).unwrap_err();

    // 24 missing + wrong type + out of range
    assert_eq!(errors.errors().len(), FEATURE_LAYOUT.len());
    assert!(matches!(
        errors.for_field("age"),
        Some(ValidationError::WrongType { received: "string", .. })
    ));
    assert!(matches!(
        errors.for_field("ecg_abnormal"),
        Some(ValidationError::OutOfRange { .. })
    ));
    assert!(matches!(
        errors.for_field("BMI_kg_per_m2"),
        Some(ValidationError::MissingField { .. })
    ));
}

#[test]
fn test_binary_rejects_out_of_range() {
    for field in binary_fields() {
        for bad in [json!(2), json!(-1), json!(0.5)] {
            let errors = validate(&with_field(field, bad.clone())).unwrap_err();
            match errors.for_field(field) {
                Some(ValidationError::OutOfRange { allowed, .. }) => assert_eq!(*allowed, "[0,1]"),
                other => panic!("{} = {} should be out of range, got {:?}", field, bad, other),
            }
        }
    }
}

#[test]
fn test_binary_accepts_zero_and_one() {
    for field in binary_fields() {
        for ok in [json!(0), json!(1), json!(1.0)] {
            let record = validate(&with_field(field, ok)).unwrap();
            assert!(matches!(record.get(field), Some(v) if v == 0.0 || v == 1.0));
        }
    }
}

#[test]
fn test_age_must_be_integral() {
    let record = validate(&with_field("age", json!(45.0))).unwrap();
    assert_eq!(record.age(), 45);

    let errors = validate(&with_field("age", json!(45.5))).unwrap_err();
    assert_eq!(
        errors.errors(),
        &[ValidationError::WrongType { field: "age", expected: "integer", received: "float" }]
    );
}

#[test]
fn test_continuous_accepts_integers() {
    let record = validate(&with_field("weight_kg", json!(80))).unwrap();
    assert_eq!(record.get("weight_kg"), Some(80.0));

    let record = validate(&with_field("ecg_st_deviation_mV", json!(-0.2))).unwrap();
    assert_eq!(record.get("ecg_st_deviation_mV"), Some(-0.2));
}

#[test]
fn test_non_numeric_values_rejected() {
    let cases = [
        (json!(null), "null"),
        (json!(true), "boolean"),
        (json!("120"), "string"),
        (json!([120]), "array"),
        (json!({ "value": 120 }), "object"),
    ];

    for (value, received_type) in cases {
        let errors = validate(&with_field("Systolic_BP_mmHg", value)).unwrap_err();
        assert_eq!(
            errors.errors(),
            &[ValidationError::WrongType {
                field: "Systolic_BP_mmHg",
                expected: "number",
                received: received_type,
            }]
        );
    }
}

#[test]
fn test_unknown_fields_ignored() {
    let mut payload = sample_payload();
    payload["cholesterol_mg_dL"] = json!(210);
    payload["notes"] = json!("fasting");

    let record = validate(&payload).unwrap();
    assert_eq!(record, validate(&sample_payload()).unwrap());
}

#[test]
fn test_not_an_object() {
    let errors = validate(&json!([1, 2, 3])).unwrap_err();
    assert_eq!(errors.errors(), &[ValidationError::NotAnObject { received: "array" }]);
    assert_eq!(errors.errors()[0].field(), None);
}

#[test]
fn test_error_display() {
    let errors = validate(&with_field("family_history", json!(2))).unwrap_err();
    let text = errors.to_string();
    assert!(text.starts_with("1 validation error(s)"));
    assert!(text.contains("family_history"));
}

#[test]
fn test_log_entry_names_every_field() {
    let record = validate(&sample_payload()).unwrap();
    let entry = record.to_log_entry();
    let values = entry["values"].as_object().unwrap();
    assert_eq!(values.len(), FEATURE_LAYOUT.len());
    assert_eq!(values["age"], json!(45.0));

    let serialized = serde_json::to_value(&record).unwrap();
    assert_eq!(serialized["height_cm"], json!(172.0));
}
