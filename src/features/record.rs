//! Feature Record - validated model input for one patient
//!
//! Values are stored in `FEATURE_LAYOUT` order. A record can only be built
//! by the validator, and nothing mutates it afterwards.

use serde::Serialize;

use super::layout::{feature_index, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};

/// Single model input row in layout order
pub type FeatureRow = [f64; FEATURE_COUNT];

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    values: FeatureRow,
}

impl FeatureRecord {
    pub(crate) fn from_values(values: FeatureRow) -> Self {
        Self { values }
    }

    /// Get field by name
    pub fn get(&self, name: &str) -> Option<f64> {
        feature_index(name).map(|i| self.values[i])
    }

    pub fn age(&self) -> i64 {
        self.values[0] as i64
    }

    /// `(name, value)` pairs in layout order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_LAYOUT
            .iter()
            .zip(self.values.iter())
            .map(|((name, _), value)| (*name, *value))
    }

    /// Copy of the values in the column order the model expects
    pub fn to_row(&self) -> FeatureRow {
        self.values
    }

    /// JSON form for debug logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::json!({
            "feature_version": FEATURE_VERSION,
            "values": self.iter()
                .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
                .collect::<serde_json::Map<_, _>>(),
        })
    }
}

impl Serialize for FeatureRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}
