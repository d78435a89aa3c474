//! Feature Layout - Centralized Input Schema
//!
//! **This file controls the column order the scoring model was trained on.**
//!
//! ## Rules:
//! 1. Add field → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove field → increment FEATURE_VERSION
//!
//! Model artifacts may carry the version + layout hash they were exported
//! with; a mismatch is rejected at load time.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FIELD KINDS
// ============================================================================

/// How a field is coerced and constrained during validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Whole number (JSON integer or float with no fractional part)
    Integer,
    /// Any finite real number
    Continuous,
    /// Indicator restricted to exactly 0 or 1
    Binary,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Integer => "integer",
            FieldKind::Continuous => "number",
            FieldKind::Binary => "binary",
        }
    }
}

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Field names and kinds in exact model column order
pub const FEATURE_LAYOUT: &[(&str, FieldKind)] = &[
    // === Demographics / vitals (0-8) ===
    ("age", FieldKind::Integer),
    ("Systolic_BP_mmHg", FieldKind::Continuous),
    ("Diastolic_BP_mmHg", FieldKind::Continuous),
    ("Heart_Rate_bpm", FieldKind::Continuous),
    ("Blood_Oxygen_Level_SpO2_percent", FieldKind::Continuous),
    ("Temperature_C", FieldKind::Continuous),
    ("height_cm", FieldKind::Continuous),
    ("weight_kg", FieldKind::Continuous),
    ("BMI_kg_per_m2", FieldKind::Continuous),

    // === ECG (9-13) ===
    ("ecg_heart_rate_bpm", FieldKind::Continuous),
    ("ecg_qrs_duration_ms", FieldKind::Continuous),
    ("ecg_st_deviation_mV", FieldKind::Continuous),
    ("ecg_r_peak_mV", FieldKind::Continuous),
    ("ecg_abnormal", FieldKind::Binary),

    // === Labs / history (14-17) ===
    ("blood_sugar_mg_dL", FieldKind::Continuous),
    ("family_history", FieldKind::Binary),
    ("sex_encoded", FieldKind::Binary),
    ("ecg_label_encoded", FieldKind::Binary),

    // === Lifestyle one-hot (18-25) ===
    ("smoking_status_Former", FieldKind::Binary),
    ("smoking_status_Never", FieldKind::Binary),
    ("physical_activity_level_Low", FieldKind::Binary),
    ("physical_activity_level_Medium", FieldKind::Binary),
    ("diet_quality_Good", FieldKind::Binary),
    ("diet_quality_Poor", FieldKind::Binary),
    ("stress_level_Low", FieldKind::Binary),
    ("stress_level_Medium", FieldKind::Binary),
];

/// Total number of fields
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 26;

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// CRC32 over the version and every field name in order
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    hasher.update(&[FEATURE_VERSION]);

    for (name, _) in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Layout description reported by the health endpoint
#[derive(Debug, Clone, Serialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub binary_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            binary_count: FEATURE_LAYOUT
                .iter()
                .filter(|(_, kind)| *kind == FieldKind::Binary)
                .count(),
            feature_names: FEATURE_LAYOUT.iter().map(|(name, _)| name.to_string()).collect(),
        }
    }
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Model artifact was exported against a different layout
#[derive(Debug, Clone, thiserror::Error)]
#[error("Feature layout mismatch: expected v{expected_version} (hash: {expected_hash:08x}), got v{actual_version} (hash: {actual_hash:08x})")]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

/// Validate that an incoming version/hash pair matches the current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get field index by name (O(n) but fields are few)
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|(n, _)| *n == name)
}

pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).map(|(name, _)| *name)
}
