//! Isotherm lookup from a directory of isotherm-database JSON files.

use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{ExplorerError, Result};
use crate::isotherm::{FetchedIsotherm, IsothermFetch};

#[derive(Debug, Deserialize)]
struct IsothermFile {
    #[serde(default)]
    filename: Option<String>,
    #[serde(rename = "DOI", default)]
    doi: Option<String>,
    #[serde(default)]
    temperature: Option<f64>,
    #[serde(default)]
    isotherm_data: Vec<IsothermPoint>,
}

#[derive(Debug, Deserialize)]
struct IsothermPoint {
    pressure: f64,
    total_adsorption: f64,
}

/// Resolves `<root>/<reference>.json`.
#[derive(Debug, Clone)]
pub struct DirectoryFetcher {
    root: PathBuf,
}

impl DirectoryFetcher {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, reference: &str) -> Result<PathBuf> {
        let rel = Path::new(reference);
        if !rel.components().all(|c| matches!(c, Component::Normal(_))) {
            return Err(ExplorerError::Isotherm {
                reference: reference.to_string(),
                reason: "reference is not a plain relative name".to_string(),
            });
        }
        let path = self.root.join(rel);
        if path.extension().is_some_and(|e| e == "json") {
            return Ok(path);
        }
        let mut os = path.into_os_string();
        os.push(".json");
        Ok(PathBuf::from(os))
    }

    /// Parse one isotherm, reporting why it is unusable.
    pub fn try_fetch(&self, reference: &str) -> Result<FetchedIsotherm> {
        let path = self.path_for(reference)?;
        let text = std::fs::read_to_string(&path)?;
        let file: IsothermFile = serde_json::from_str(&text)?;
        let (pressure, loading): (Vec<f64>, Vec<f64>) = file
            .isotherm_data
            .iter()
            .filter(|p| p.pressure.is_finite() && p.total_adsorption.is_finite())
            .map(|p| (p.pressure, p.total_adsorption))
            .unzip();
        if pressure.is_empty() {
            return Err(ExplorerError::Isotherm {
                reference: reference.to_string(),
                reason: "no data points".to_string(),
            });
        }
        Ok(FetchedIsotherm {
            label: file.filename.unwrap_or_else(|| reference.to_string()),
            loading,
            pressure,
            source_url: file.doi.map(|doi| format!("https://doi.org/{doi}")),
            temperature: file.temperature,
        })
    }
}

impl IsothermFetch for DirectoryFetcher {
    fn fetch(&self, reference: &str) -> Option<FetchedIsotherm> {
        match self.try_fetch(reference) {
            Ok(iso) => Some(iso),
            Err(e) => {
                debug!(reference, error = %e, "isotherm dropped");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_references_are_rejected() {
        let f = DirectoryFetcher::new("/tmp/isotherms");
        assert!(f.path_for("../secret").is_err());
        assert!(f.path_for("/etc/passwd").is_err());
        assert_eq!(
            f.path_for("10.1021abc.Isotherm3").unwrap(),
            PathBuf::from("/tmp/isotherms/10.1021abc.Isotherm3.json")
        );
        assert_eq!(
            f.path_for("iso.json").unwrap(),
            PathBuf::from("/tmp/isotherms/iso.json")
        );
    }
}
