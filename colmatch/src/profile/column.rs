//! Column profiles and their value-returning build steps.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::DeclaredType;

/// Summary of one dataset column.
///
/// Profiles are assembled through a chain of `with_*` steps, each of which
/// consumes the profile and returns an enriched copy. Fields are read-only
/// outside the crate.
///
/// The JSON representation is field-order stable; [`super::ColumnProfileId`]
/// relies on that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    name: String,
    #[serde(rename = "dtype")]
    declared_type: Option<DeclaredType>,
    null_pct: f64,
    unique_pct: f64,
    #[serde(rename = "sample_values")]
    samples: Vec<String>,
}

impl ColumnProfile {
    /// Starts a profile from the schema facts of a column.
    ///
    /// `type_label` is validated against [`DeclaredType`]; an unrecognized
    /// label leaves the type unset instead of failing the build.
    pub fn new(name: impl Into<String>, type_label: &str) -> Self {
        let name = name.into();
        let declared_type = match type_label.parse::<DeclaredType>() {
            Ok(ty) => Some(ty),
            Err(e) => {
                debug!(column = %name, error = %e, "Leaving column type unset");
                None
            }
        };
        Self {
            name,
            declared_type,
            null_pct: 0.0,
            unique_pct: 0.0,
            samples: Vec::new(),
        }
    }

    /// Starts a profile with an already-validated type.
    pub fn with_type(name: impl Into<String>, declared_type: Option<DeclaredType>) -> Self {
        Self {
            name: name.into(),
            declared_type,
            null_pct: 0.0,
            unique_pct: 0.0,
            samples: Vec::new(),
        }
    }

    /// Returns a copy carrying the null and unique percentages.
    ///
    /// `unique_pct` is `None` when the column has no non-missing values; the
    /// ratio is then undefined and recorded as the `0.0` sentinel. Values are
    /// clamped to `[0, 100]` and non-finite inputs collapse to `0.0`.
    pub fn with_percentages(self, null_pct: f64, unique_pct: Option<f64>) -> Self {
        Self {
            null_pct: sanitize_pct(null_pct),
            unique_pct: unique_pct.map_or(0.0, sanitize_pct),
            ..self
        }
    }

    /// Returns a copy carrying the given sample values, in order.
    pub fn with_samples<I, S>(self, samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            samples: samples.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    /// Column name as reported by the engine.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Validated column type, or `None` when the engine's label was unknown.
    pub fn declared_type(&self) -> Option<DeclaredType> {
        self.declared_type
    }

    /// Percentage (0–100) of rows with a missing value.
    pub fn null_pct(&self) -> f64 {
        self.null_pct
    }

    /// Percentage (0–100) of distinct values among non-missing rows.
    pub fn unique_pct(&self) -> f64 {
        self.unique_pct
    }

    /// Stringified sample values drawn from the column.
    pub fn samples(&self) -> &[String] {
        &self.samples
    }
}

fn sanitize_pct(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
