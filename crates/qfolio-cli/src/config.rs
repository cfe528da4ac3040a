//! Problem files.
//!
//! A problem is read from YAML (`.yaml`/`.yml`) or JSON (`.json`):
//!
//! ```yaml
//! name: three-equal-assets
//! assets: [AAA, BBB, CCC]
//! mu: [0.1, 0.1, 0.1]
//! sigma:
//!   - [0.01, 0.0, 0.0]
//!   - [0.0, 0.01, 0.0]
//!   - [0.0, 0.0, 0.01]
//! risk_aversion: 0.5
//! budget: 2
//! penalty: 3.0
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use qfolio_ising::ProblemSpec;

/// On-disk form of a portfolio problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProblemConfig {
    /// Optional label shown in output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional per-asset labels; empty or one per asset.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assets: Vec<String>,
    /// Expected return per asset.
    pub mu: Vec<f64>,
    /// Covariance matrix, row-major.
    pub sigma: Vec<Vec<f64>>,
    pub risk_aversion: f64,
    /// Number of assets to hold.
    pub budget: usize,
    pub penalty: f64,
}

impl ProblemConfig {
    /// Three identical assets, pick two.
    pub fn reference() -> Self {
        Self {
            name: Some("reference".into()),
            assets: Vec::new(),
            mu: vec![0.1; 3],
            sigma: vec![
                vec![0.01, 0.0, 0.0],
                vec![0.0, 0.01, 0.0],
                vec![0.0, 0.0, 0.01],
            ],
            risk_aversion: 0.5,
            budget: 2,
            penalty: 3.0,
        }
    }

    /// Load from a file, choosing the format by extension.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("File not found: {}", path.display());
        }
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let parsed = match ext.to_lowercase().as_str() {
            "yaml" | "yml" => Self::from_yaml_str(&source),
            "json" => Self::from_json_str(&source),
            other => anyhow::bail!(
                "Unsupported problem file extension '{other}'. Use .yaml, .yml or .json"
            ),
        };
        parsed.with_context(|| format!("Invalid problem file: {}", path.display()))
    }

    pub fn from_yaml_str(source: &str) -> Result<Self> {
        serde_yaml_ng::from_str(source).context("Failed to parse YAML")
    }

    pub fn from_json_str(source: &str) -> Result<Self> {
        serde_json::from_str(source).context("Failed to parse JSON")
    }

    /// Number of assets.
    pub fn num_assets(&self) -> usize {
        self.mu.len()
    }

    /// Display name for asset `i`.
    pub fn asset_label(&self, i: usize) -> String {
        self.assets
            .get(i)
            .cloned()
            .unwrap_or_else(|| format!("asset {i}"))
    }

    /// Convert to a [`ProblemSpec`].
    ///
    /// Ragged covariance rows and mislabelled assets are rejected here;
    /// size and range checks happen when the QUBO is built.
    pub fn to_spec(&self) -> Result<ProblemSpec> {
        let n = self.num_assets();
        if !self.assets.is_empty() && self.assets.len() != n {
            anyhow::bail!(
                "{} asset labels given for {n} assets",
                self.assets.len()
            );
        }

        let rows = self.sigma.len();
        let cols = self.sigma.first().map_or(0, Vec::len);
        if let Some((i, row)) = self.sigma.iter().enumerate().find(|(_, r)| r.len() != cols) {
            anyhow::bail!(
                "sigma row {i} has {} entries, expected {cols}",
                row.len()
            );
        }
        let sigma = Array2::from_shape_vec((rows, cols), self.sigma.concat())
            .context("Failed to assemble covariance matrix")?;

        Ok(ProblemSpec::new(
            n,
            self.mu.clone(),
            sigma,
            self.risk_aversion,
            self.budget,
            self.penalty,
        ))
    }
}
