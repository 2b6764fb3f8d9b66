//! Hosted-inference API response types.
//!
//! The only part of the contract the pipeline relies on is
//! `predictions[0].class`: the top-ranked label is authoritative and an
//! empty predictions list means "no classification" (the image is dropped
//! from the run without error). Everything else is passed through for
//! logging only.

use serde::Deserialize;

/// Top-level response from the inference endpoint.
#[derive(Debug, Deserialize)]
pub struct InferResponse {
    /// Ranked predictions, best first. May be empty.
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

/// One ranked prediction.
#[derive(Debug, Deserialize)]
pub struct Prediction {
    /// Predicted class label (e.g. `"bald"` / `"not_bald"`).
    pub class: String,
    /// Model confidence in [0, 1]. Absent on some model versions.
    #[serde(default)]
    pub confidence: Option<f64>,
}

impl InferResponse {
    /// The authoritative label, if any prediction was returned.
    #[must_use]
    pub fn top_label(&self) -> Option<&str> {
        self.predictions.first().map(|p| p.class.as_str())
    }
}
