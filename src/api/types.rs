//! Payloads exchanged with the attrition backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::employee::EmployeeRecord;

/// Evaluation scores of a trained model, each in `[0, 1]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
}

/// Random-forest hyperparameters forwarded to the trainer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelParams {
    pub n_estimators: u32,
    pub max_depth: u32,
    pub min_samples_leaf: u32,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            n_estimators: 1000,
            max_depth: 4,
            min_samples_leaf: 2,
        }
    }
}

/// Body of `POST /training/`. An empty feature list trains on every feature.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub model_params: ModelParams,
    pub features: Vec<String>,
}

/// A freshly trained model.
#[derive(Clone, Debug, PartialEq)]
pub struct TrainingResult {
    pub model_id: String,
    pub metrics: Metrics,
    /// Backend status text, e.g. "Model trained successfully".
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TrainingResponseWire {
    pub(super) model_id: Option<String>,
    #[serde(default)]
    pub(super) metrics: Metrics,
    pub(super) response: Option<String>,
}

/// Entry of the backend model registry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub model_id: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub metrics: Metrics,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ModelListWire {
    #[serde(default)]
    pub(super) models: Option<Vec<ModelSummary>>,
}

/// Full model record; fields beyond the summary are kept verbatim in `extra`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelDetails {
    pub model_id: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub metrics: Option<Metrics>,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Body of `POST /prediction/`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub model_id: String,
    pub data: EmployeeRecord,
}

/// Attrition verdict for one employee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// "Yes" when the employee is predicted to leave.
    pub prediction: String,
    /// Probability of attrition in `[0, 1]`.
    pub probability: f64,
    pub confidence: String,
    pub model_id: String,
}

impl PredictionResult {
    pub fn predicts_attrition(&self) -> bool {
        self.prediction.eq_ignore_ascii_case("yes")
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PredictionEnvelope {
    #[serde(default)]
    pub(super) response: Option<PredictionResult>,
}

/// Employee already present in the backend dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefilledEmployee {
    #[serde(rename = "employeeNumber")]
    pub employee_number: u32,
}

/// Outcome of `POST /employees/add/`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddEmployeeResponse {
    pub success: bool,
    pub employee_number: u32,
}

#[derive(Debug, Deserialize)]
pub(super) struct AddEmployeeWire {
    #[serde(default)]
    pub(super) success: bool,
    pub(super) employee_number: Option<u32>,
}
