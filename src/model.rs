use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{CoachError, Result};
use crate::models::FeatureVector;

/// Serialized form of the trained regression model: one weight per training
/// column, in training order, plus an intercept.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelArtifact {
    pub columns: Vec<String>,
    pub weights: Vec<f64>,
    pub intercept: f64,
}

/// Loaded once at startup and read-only afterwards.
#[derive(Debug)]
pub struct BurnoutModel {
    artifact: ModelArtifact,
}

impl BurnoutModel {
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        if artifact.columns.len() != artifact.weights.len() {
            return Err(CoachError::ModelUnavailable(format!(
                "artifact has {} columns but {} weights",
                artifact.columns.len(),
                artifact.weights.len()
            )));
        }
        Ok(Self { artifact })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|err| {
            CoachError::ModelUnavailable(format!("failed to read {}: {err}", path.display()))
        })?;
        let artifact: ModelArtifact = serde_json::from_str(&raw).map_err(|err| {
            CoachError::ModelUnavailable(format!("failed to parse {}: {err}", path.display()))
        })?;
        debug!(
            columns = artifact.columns.len(),
            "loaded model artifact from {}",
            path.display()
        );
        Self::from_artifact(artifact)
    }

    pub fn columns(&self) -> &[String] {
        &self.artifact.columns
    }

    /// Fails fast when the artifact's training columns diverge from the
    /// declared feature schema, instead of zero-filling at request time.
    pub fn check_schema(&self, declared: &[&str]) -> Result<()> {
        if self.artifact.columns.len() != declared.len() {
            return Err(CoachError::SchemaMismatch(format!(
                "artifact expects {} columns, schema declares {}",
                self.artifact.columns.len(),
                declared.len()
            )));
        }
        for (expected, actual) in self.artifact.columns.iter().zip(declared) {
            if expected != actual {
                return Err(CoachError::SchemaMismatch(format!(
                    "artifact column {expected:?} does not match declared column {actual:?}"
                )));
            }
        }
        Ok(())
    }

    pub fn predict(&self, features: &FeatureVector) -> f64 {
        self.artifact
            .weights
            .iter()
            .zip(&features.values)
            .map(|(weight, value)| weight * value)
            .sum::<f64>()
            + self.artifact.intercept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features;

    fn artifact(columns: Vec<String>, weights: Vec<f64>, intercept: f64) -> ModelArtifact {
        ModelArtifact {
            columns,
            weights,
            intercept,
        }
    }

    #[test]
    fn predict_is_a_dot_product_plus_intercept() {
        let model = BurnoutModel::from_artifact(artifact(
            vec!["a".to_string(), "b".to_string()],
            vec![2.0, 3.0],
            1.0,
        ))
        .unwrap();
        let features = FeatureVector {
            columns: vec!["a", "b"],
            values: vec![1.0, 2.0],
        };
        assert!((model.predict(&features) - 9.0).abs() < 1e-9);
    }

    #[test]
    fn rejects_artifact_with_mismatched_weight_count() {
        let result = BurnoutModel::from_artifact(artifact(
            vec!["a".to_string(), "b".to_string()],
            vec![2.0],
            0.0,
        ));
        assert!(matches!(result, Err(CoachError::ModelUnavailable(_))));
    }

    #[test]
    fn schema_check_accepts_matching_columns() {
        let columns: Vec<String> = features::schema_columns()
            .iter()
            .map(|name| name.to_string())
            .collect();
        let weights = vec![0.0; columns.len()];
        let model = BurnoutModel::from_artifact(artifact(columns, weights, 0.0)).unwrap();
        assert!(model.check_schema(&features::schema_columns()).is_ok());
    }

    #[test]
    fn schema_check_rejects_renamed_column() {
        let mut columns: Vec<String> = features::schema_columns()
            .iter()
            .map(|name| name.to_string())
            .collect();
        columns[0] = "Seniority".to_string();
        let weights = vec![0.0; columns.len()];
        let model = BurnoutModel::from_artifact(artifact(columns, weights, 0.0)).unwrap();

        let result = model.check_schema(&features::schema_columns());
        assert!(matches!(result, Err(CoachError::SchemaMismatch(_))));
    }

    #[test]
    fn schema_check_rejects_missing_column() {
        let mut columns: Vec<String> = features::schema_columns()
            .iter()
            .map(|name| name.to_string())
            .collect();
        columns.pop();
        let weights = vec![0.0; columns.len()];
        let model = BurnoutModel::from_artifact(artifact(columns, weights, 0.0)).unwrap();

        let result = model.check_schema(&features::schema_columns());
        assert!(matches!(result, Err(CoachError::SchemaMismatch(_))));
    }

    #[test]
    fn loading_a_missing_file_is_model_unavailable() {
        let result = BurnoutModel::load(Path::new("does-not-exist.json"));
        assert!(matches!(result, Err(CoachError::ModelUnavailable(_))));
    }
}
