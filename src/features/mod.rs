//! Features Module - request validation and the model input schema
//!
//! The validator is the only place untyped JSON is inspected; everything
//! downstream works with [`FeatureRecord`].

pub mod layout;
pub mod record;
pub mod validate;

#[cfg(test)]
pub(crate) mod tests;

pub use layout::{FieldKind, LayoutInfo, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use record::{FeatureRecord, FeatureRow};
pub use validate::{validate, ValidationError, ValidationErrors};
