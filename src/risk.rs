use crate::model::BurnoutModel;
use crate::models::{FeatureVector, PredictionResult, RiskCategory};

/// Buckets a predicted burnout score. Total over all of f64: out-of-range
/// scores land in the nearest bucket via the same comparisons.
pub fn classify(score: f64) -> (RiskCategory, &'static str) {
    if score < 0.4 {
        (RiskCategory::Low, "💚")
    } else if score < 0.7 {
        (RiskCategory::Moderate, "💛")
    } else {
        (RiskCategory::High, "❤️")
    }
}

pub fn assess(model: &BurnoutModel, features: &FeatureVector) -> PredictionResult {
    let burn_rate = model.predict(features);
    let (risk_category, emoji) = classify(burn_rate);
    PredictionResult {
        burn_rate,
        risk_category,
        emoji,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BurnoutModel, ModelArtifact};

    #[test]
    fn thresholds_follow_expected_buckets() {
        assert_eq!(classify(0.39).0, RiskCategory::Low);
        assert_eq!(classify(0.4).0, RiskCategory::Moderate);
        assert_eq!(classify(0.69).0, RiskCategory::Moderate);
        assert_eq!(classify(0.7).0, RiskCategory::High);
    }

    #[test]
    fn out_of_range_scores_are_still_bucketed() {
        assert_eq!(classify(-0.2).0, RiskCategory::Low);
        assert_eq!(classify(1.4).0, RiskCategory::High);
    }

    #[test]
    fn each_category_carries_its_emoji() {
        assert_eq!(classify(0.1).1, "💚");
        assert_eq!(classify(0.5).1, "💛");
        assert_eq!(classify(0.9).1, "❤️");
    }

    #[test]
    fn assess_combines_prediction_and_bucket() {
        let model = BurnoutModel::from_artifact(ModelArtifact {
            columns: vec!["x".to_string()],
            weights: vec![0.5],
            intercept: 0.0,
        })
        .unwrap();
        let features = FeatureVector {
            columns: vec!["x"],
            values: vec![1.0],
        };

        let prediction = assess(&model, &features);
        assert!((prediction.burn_rate - 0.5).abs() < 1e-9);
        assert_eq!(prediction.risk_category, RiskCategory::Moderate);
        assert_eq!(prediction.emoji, "💛");
    }
}
