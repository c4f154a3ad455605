//! Per-document feature records

use crate::indicators::{Category, Indicator};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Row identifier column
pub const ID_COLUMN: &str = "P_id";

/// Per-row failure flag column
pub const FAILED_COLUMN: &str = "extraction_failed";

/// Diagnostic key trailing every JSON record. It is not a schema column:
/// [`FeatureRecord::columns`] and TSV output leave it out.
pub const REASON_FIELD: &str = "failure_reason";

/// One indicator value. NaN means "missing" and serializes as `null`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndicatorResult {
    pub name: &'static str,
    pub category: Category,
    #[serde(serialize_with = "nan_as_null")]
    pub value: f64,
}

impl IndicatorResult {
    pub fn new(indicator: &Indicator, value: f64) -> Self {
        Self {
            name: indicator.name(),
            category: indicator.category(),
            value,
        }
    }

    pub fn is_missing(&self) -> bool {
        self.value.is_nan()
    }
}

fn nan_as_null<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() {
        serializer.serialize_f64(*value)
    } else {
        serializer.serialize_none()
    }
}

/// All indicator values of one document, in schema order.
///
/// A failed record carries the failure reason and a NaN for every indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    p_id: String,
    failure: Option<String>,
    column_prefix: String,
    results: Vec<IndicatorResult>,
}

impl FeatureRecord {
    pub fn success(p_id: impl Into<String>, results: Vec<IndicatorResult>) -> Self {
        Self {
            p_id: p_id.into(),
            failure: None,
            column_prefix: String::new(),
            results,
        }
    }

    pub fn failed<'a>(
        p_id: impl Into<String>,
        indicators: impl IntoIterator<Item = &'a Indicator>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            p_id: p_id.into(),
            failure: Some(reason.into()),
            column_prefix: String::new(),
            results: indicators
                .into_iter()
                .map(|i| IndicatorResult::new(i, f64::NAN))
                .collect(),
        }
    }

    pub fn with_column_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.column_prefix = prefix.into();
        self
    }

    pub fn p_id(&self) -> &str {
        &self.p_id
    }

    pub fn extraction_failed(&self) -> bool {
        self.failure.is_some()
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn results(&self) -> &[IndicatorResult] {
        &self.results
    }

    /// Value of one indicator by its unprefixed name
    pub fn get(&self, name: &str) -> Option<f64> {
        self.results.iter().find(|r| r.name == name).map(|r| r.value)
    }

    pub fn values(&self) -> Vec<f64> {
        self.results.iter().map(|r| r.value).collect()
    }

    /// Column names: id, failure flag, then prefixed indicator names
    pub fn columns(&self) -> Vec<String> {
        let mut columns = vec![ID_COLUMN.to_string(), FAILED_COLUMN.to_string()];
        columns.extend(self.indicator_columns());
        columns
    }

    fn indicator_columns(&self) -> impl Iterator<Item = String> + '_ {
        self.results
            .iter()
            .map(|r| format!("{}{}", self.column_prefix, r.name))
    }

    /// One tab-separated line; missing values are empty cells
    pub fn to_tsv_row(&self) -> String {
        let mut cells = vec![self.p_id.clone(), self.extraction_failed().to_string()];
        cells.extend(self.results.iter().map(|r| {
            if r.value.is_finite() {
                r.value.to_string()
            } else {
                String::new()
            }
        }));
        cells.join("\t")
    }
}

impl Serialize for FeatureRecord {
    /// A flat object in column order, followed by [`REASON_FIELD`]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        struct Value(f64);
        impl Serialize for Value {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                nan_as_null(&self.0, serializer)
            }
        }

        let mut map = serializer.serialize_map(Some(self.results.len() + 3))?;
        map.serialize_entry(ID_COLUMN, &self.p_id)?;
        map.serialize_entry(FAILED_COLUMN, &self.extraction_failed())?;
        for (column, result) in self.indicator_columns().zip(&self.results) {
            map.serialize_entry(&column, &Value(result.value))?;
        }
        map.serialize_entry(REASON_FIELD, &self.failure)?;
        map.end()
    }
}
