use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Linear regression artifact exported from the offline training run.
/// `feature_names` must match the column schema exactly, order included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringModel {
    pub version: u32,
    pub generated_at: String,
    #[serde(default)]
    pub dataset_version: String,
    #[serde(default)]
    pub train_r2: f64,
    #[serde(default)]
    pub train_samples: usize,
    pub intercept: f64,
    pub feature_names: Vec<String>,
    pub coeffs: Vec<f64>,
}

impl ScoringModel {
    /// Projected points per game for a record already aligned to the
    /// model's column order.
    pub fn predict(&self, values: &[f64]) -> f64 {
        let mut sum = self.intercept;
        for (c, v) in self.coeffs.iter().zip(values) {
            sum += c * v;
        }
        sum
    }
}

/// Process-wide read-only artifacts: the scoring model, the ordered
/// column schema it expects, and the country set it was trained with.
#[derive(Debug, Clone)]
pub struct ModelContext {
    pub model: ScoringModel,
    pub columns: Vec<String>,
    pub known_countries: Vec<String>,
}

impl ModelContext {
    pub fn knows_country(&self, country: &str) -> bool {
        self.known_countries.iter().any(|c| c == country)
    }
}

const BUNDLED_MODEL: &str = include_str!("../assets/nba_model_v1.json");
const BUNDLED_COLUMNS: &str = include_str!("../assets/model_columns.json");
const BUNDLED_COUNTRIES: &str = include_str!("../assets/top_countries.json");

const MODEL_FILE: &str = "nba_model_v1.json";
const COLUMNS_FILE: &str = "model_columns.json";
const COUNTRIES_FILE: &str = "top_countries.json";

/// Loads and validates the artifact set. Any failure here is fatal to
/// startup; the form must never run against a partial context.
pub fn load_context() -> Result<ModelContext> {
    let dir = std::env::var("NBA_MODEL_DIR").ok();
    let dir = dir.as_deref().map(Path::new);

    let model_raw = read_artifact(dir, MODEL_FILE, BUNDLED_MODEL)?;
    let columns_raw = read_artifact(dir, COLUMNS_FILE, BUNDLED_COLUMNS)?;
    let countries_raw = read_artifact(dir, COUNTRIES_FILE, BUNDLED_COUNTRIES)?;

    let model: ScoringModel =
        serde_json::from_str(&model_raw).context("parse scoring model artifact")?;
    let columns: Vec<String> =
        serde_json::from_str(&columns_raw).context("parse model columns artifact")?;
    let known_countries: Vec<String> =
        serde_json::from_str(&countries_raw).context("parse top countries artifact")?;

    validate(&model, &columns, &known_countries)?;
    Ok(ModelContext {
        model,
        columns,
        known_countries,
    })
}

fn read_artifact(dir: Option<&Path>, name: &str, bundled: &str) -> Result<String> {
    match dir {
        Some(dir) => {
            let path = dir.join(name);
            fs::read_to_string(&path).with_context(|| format!("read artifact {}", path.display()))
        }
        None => Ok(bundled.to_string()),
    }
}

fn validate(model: &ScoringModel, columns: &[String], countries: &[String]) -> Result<()> {
    if columns.is_empty() {
        bail!("model columns artifact is empty");
    }
    if !columns.iter().any(|c| c == "country_Other") {
        bail!("model columns are missing the country_Other sentinel");
    }
    if countries.is_empty() {
        bail!("top countries artifact is empty");
    }
    if countries.iter().any(|c| c == "Other") {
        bail!("top countries must not contain the Other sentinel");
    }
    if model.feature_names != columns {
        bail!(
            "scoring model feature names ({}) do not match column schema ({})",
            model.feature_names.len(),
            columns.len()
        );
    }
    if model.coeffs.len() != model.feature_names.len() {
        bail!(
            "scoring model has {} coeffs for {} features",
            model.coeffs.len(),
            model.feature_names.len()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_model(names: &[&str], coeffs: Vec<f64>) -> ScoringModel {
        ScoringModel {
            version: 1,
            generated_at: "x".to_string(),
            dataset_version: "x".to_string(),
            train_r2: 0.5,
            train_samples: 10,
            intercept: 1.0,
            feature_names: names.iter().map(|s| s.to_string()).collect(),
            coeffs,
        }
    }

    #[test]
    fn predict_is_intercept_plus_dot_product() {
        let model = tiny_model(&["a", "b"], vec![2.0, -1.0]);
        assert_eq!(model.predict(&[3.0, 4.0]), 1.0 + 6.0 - 4.0);
    }

    #[test]
    fn bundled_artifacts_load_and_validate() {
        let ctx = load_context().expect("bundled artifacts should load");
        assert_eq!(ctx.model.feature_names, ctx.columns);
        assert!(ctx.knows_country("France"));
        assert!(!ctx.knows_country("Other"));
    }

    #[test]
    fn validate_rejects_coeff_length_mismatch() {
        let model = tiny_model(&["a", "country_Other"], vec![2.0]);
        let columns = vec!["a".to_string(), "country_Other".to_string()];
        let countries = vec!["USA".to_string()];
        assert!(validate(&model, &columns, &countries).is_err());
    }

    #[test]
    fn validate_rejects_schema_drift() {
        let model = tiny_model(&["a", "b"], vec![2.0, 3.0]);
        let columns = vec!["a".to_string(), "country_Other".to_string()];
        let countries = vec!["USA".to_string()];
        assert!(validate(&model, &columns, &countries).is_err());
    }
}
