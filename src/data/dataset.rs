//! The immutable per-material, per-gas record store.
//!
//! On disk the dataset is a two-level JSON object
//! `{ material: { gas: { field: value } } }`. Loading flattens it into
//! [`MaterialRecord`]s ordered by material id, which is the row order every
//! projection starts from.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Deserializer};
use tracing::{debug, info};

use crate::data::gas::Gas;
use crate::error::{ExplorerError, Result};

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Everything recorded for one material and one gas.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GasRecord {
    /// Henry's constant (median over isotherms).
    #[serde(rename = "mKh", default)]
    pub henry: Option<f64>,
    #[serde(rename = "eKh", default)]
    pub henry_error: Option<f64>,
    /// Number of isotherms the Henry value was derived from.
    #[serde(rename = "lKh", default)]
    pub henry_count: Option<f64>,
    /// Median loading on the pressure grid (mmol/g).
    #[serde(rename = "mL", default, deserialize_with = "null_as_default")]
    pub loading: Vec<Option<f64>>,
    #[serde(rename = "eL", default, deserialize_with = "null_as_default")]
    pub loading_error: Vec<Option<f64>>,
    /// Number of isotherms contributing at each grid point.
    #[serde(rename = "lL", default, deserialize_with = "null_as_default")]
    pub loading_count: Vec<Option<f64>>,
    /// Opaque references understood by an [`IsothermFetch`](crate::isotherm::IsothermFetch).
    #[serde(rename = "iso", default, deserialize_with = "null_as_default")]
    pub isotherms: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialRecord {
    pub id: String,
    pub gases: HashMap<Gas, GasRecord>,
}

impl MaterialRecord {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self {
            id: id.into(),
            gases: HashMap::new(),
        }
    }

    pub fn with_gas(mut self, gas: Gas, record: GasRecord) -> Self {
        self.gases.insert(gas, record);
        self
    }

    pub fn gas(&self, gas: Gas) -> Option<&GasRecord> {
        self.gases.get(&gas)
    }

    /// Number of isotherm references recorded for `gas`.
    pub fn isotherm_count(&self, gas: Gas) -> usize {
        self.gas(gas).map_or(0, |r| r.isotherms.len())
    }
}

/// Read-only table of all materials.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    materials: Vec<MaterialRecord>,
}

impl Dataset {
    /// Build from already-flattened records. Records are sorted by id.
    pub fn from_materials(mut materials: Vec<MaterialRecord>) -> Self {
        materials.sort_by(|a, b| a.id.cmp(&b.id));
        Self { materials }
    }

    /// Parse the nested JSON layout.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let raw: BTreeMap<String, BTreeMap<String, GasRecord>> = serde_json::from_str(s)?;
        let materials = raw
            .into_iter()
            .map(|(id, per_gas)| {
                let mut record = MaterialRecord::new(id);
                for (gas_name, gas_record) in per_gas {
                    match gas_name.parse::<Gas>() {
                        Ok(gas) => {
                            record.gases.insert(gas, gas_record);
                        }
                        Err(_) => {
                            debug!(material = %record.id, gas = %gas_name, "ignoring gas outside the vocabulary");
                        }
                    }
                }
                record
            })
            .collect();
        Ok(Self::from_materials(materials))
    }

    /// Load a dataset file. Any failure is reported with the offending path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let wrap = |source: Box<dyn std::error::Error + Send + Sync>| ExplorerError::DatasetLoad {
            path: path.to_path_buf(),
            source,
        };
        let text = std::fs::read_to_string(path).map_err(|e| wrap(Box::new(e)))?;
        let dataset = Self::from_json_str(&text).map_err(|e| wrap(Box::new(e)))?;
        info!(path = %path.display(), materials = dataset.len(), "dataset loaded");
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    pub fn materials(&self) -> &[MaterialRecord] {
        &self.materials
    }

    pub fn material(&self, index: usize) -> Option<&MaterialRecord> {
        self.materials.get(index)
    }

    pub fn find(&self, id: &str) -> Option<&MaterialRecord> {
        self.materials.iter().find(|m| m.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "ZIF-8": {
            "methane": {"mKh": 2.0, "eKh": 0.1, "lKh": 3, "mL": [0.1, null, 0.3],
                        "eL": [0.01, 0.02], "lL": [3, 3], "iso": ["a", "b"]},
            "krypton": {"mKh": 1.0}
        },
        "MOF-5": {
            "nitrogen": {"mKh": null, "mL": null, "iso": null}
        }
    }"#;

    #[test]
    fn flattens_nested_layout() {
        let ds = Dataset::from_json_str(SAMPLE).unwrap();
        assert_eq!(ds.len(), 2);
        // sorted by id
        assert_eq!(ds.materials()[0].id, "MOF-5");
        let zif = ds.find("ZIF-8").unwrap();
        let methane = zif.gas(Gas::Methane).unwrap();
        assert_eq!(methane.henry, Some(2.0));
        assert_eq!(methane.loading, vec![Some(0.1), None, Some(0.3)]);
        assert_eq!(zif.isotherm_count(Gas::Methane), 2);
        assert_eq!(zif.gases.len(), 1);
    }

    #[test]
    fn nulls_become_empty() {
        let ds = Dataset::from_json_str(SAMPLE).unwrap();
        let n2 = ds.find("MOF-5").unwrap().gas(Gas::Nitrogen).unwrap();
        assert_eq!(n2.henry, None);
        assert!(n2.loading.is_empty());
        assert!(n2.isotherms.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Dataset::from_json_str("[1, 2]"),
            Err(ExplorerError::Json(_))
        ));
    }
}
