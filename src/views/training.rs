use std::ops::RangeInclusive;

use crate::api::{ApiClient, ApiError, ModelParams, ModelSummary, TrainingConfig, TrainingResult};

use super::View;
use super::jobs::ViewJobs;

/// One-hot feature names the backend trains on.
pub const FEATURE_OPTIONS: [&str; 42] = [
    "Age",
    "DailyRate",
    "DistanceFromHome",
    "Education",
    "EnvironmentSatisfaction",
    "JobInvolvement",
    "JobLevel",
    "JobSatisfaction",
    "MonthlyIncome",
    "NumCompaniesWorked",
    "PercentSalaryHike",
    "PerformanceRating",
    "RelationshipSatisfaction",
    "StockOptionLevel",
    "TotalWorkingYears",
    "TrainingTimesLastYear",
    "WorkLifeBalance",
    "YearsAtCompany",
    "YearsInCurrentRole",
    "YearsSinceLastPromotion",
    "YearsWithCurrManager",
    "BusinessTravel_Travel_Frequently",
    "BusinessTravel_Travel_Rarely",
    "Department_Research & Development",
    "Department_Sales",
    "EducationField_Life Sciences",
    "EducationField_Marketing",
    "EducationField_Medical",
    "EducationField_Other",
    "EducationField_Technical Degree",
    "Gender_Male",
    "JobRole_Human Resources",
    "JobRole_Laboratory Technician",
    "JobRole_Manager",
    "JobRole_Manufacturing Director",
    "JobRole_Research Director",
    "JobRole_Research Scientist",
    "JobRole_Sales Executive",
    "JobRole_Sales Representative",
    "MaritalStatus_Married",
    "MaritalStatus_Single",
    "OverTime_Yes",
];

const N_ESTIMATORS_RANGE: RangeInclusive<u32> = 10..=2000;
const MAX_DEPTH_RANGE: RangeInclusive<u32> = 1..=20;
const MIN_SAMPLES_LEAF_RANGE: RangeInclusive<u32> = 1..=10;

/// Rejected edits to the training form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrainingFormError {
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        min: u32,
        max: u32,
        value: u32,
    },
    #[error("Unknown feature: {0}")]
    UnknownFeature(String),
}

/// Result of the last training run shown under the form.
#[derive(Debug, Clone, PartialEq)]
pub enum TrainingOutcome {
    Trained(TrainingResult),
    Failed(String),
}

enum TrainingMessage {
    Models(Vec<ModelSummary>),
    Trained {
        result: Result<TrainingResult, ApiError>,
        models: Option<Vec<ModelSummary>>,
    },
}

/// Model parameters, feature selection and the model registry.
pub struct TrainingView {
    api: ApiClient,
    params: ModelParams,
    selected_features: Vec<String>,
    models: Vec<ModelSummary>,
    outcome: Option<TrainingOutcome>,
    training: bool,
    jobs: ViewJobs<TrainingMessage>,
}

impl TrainingView {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            params: ModelParams::default(),
            selected_features: Vec::new(),
            models: Vec::new(),
            outcome: None,
            training: false,
            jobs: ViewJobs::new(),
        }
    }

    pub fn params(&self) -> ModelParams {
        self.params
    }

    /// Replace the model parameters if every value is within the form limits.
    pub fn set_params(&mut self, params: ModelParams) -> Result<(), TrainingFormError> {
        check_range("n_estimators", &N_ESTIMATORS_RANGE, params.n_estimators)?;
        check_range("max_depth", &MAX_DEPTH_RANGE, params.max_depth)?;
        check_range("min_samples_leaf", &MIN_SAMPLES_LEAF_RANGE, params.min_samples_leaf)?;
        self.params = params;
        Ok(())
    }

    /// Select or deselect a feature. Returns whether it is now selected.
    pub fn toggle_feature(&mut self, feature: &str) -> Result<bool, TrainingFormError> {
        if !FEATURE_OPTIONS.contains(&feature) {
            return Err(TrainingFormError::UnknownFeature(feature.to_string()));
        }
        if let Some(index) = self.selected_features.iter().position(|f| f == feature) {
            self.selected_features.remove(index);
            Ok(false)
        } else {
            self.selected_features.push(feature.to_string());
            Ok(true)
        }
    }

    /// Selected features in the order they were picked; empty means all.
    pub fn selected_features(&self) -> &[String] {
        &self.selected_features
    }

    pub fn models(&self) -> &[ModelSummary] {
        &self.models
    }

    pub fn outcome(&self) -> Option<&TrainingOutcome> {
        self.outcome.as_ref()
    }

    pub fn is_training(&self) -> bool {
        self.training
    }

    /// Submit the current form. Ignored while a run is in flight.
    pub fn start_training(&mut self) -> bool {
        if self.training {
            return false;
        }
        self.outcome = None;
        self.training = true;
        let api = self.api.clone();
        let config = TrainingConfig {
            model_params: self.params,
            features: self.selected_features.clone(),
        };
        self.jobs.spawn(move || {
            let result = api.submit_training(&config);
            let models = result.is_ok().then(|| api.list_models());
            TrainingMessage::Trained { result, models }
        });
        true
    }

    fn refresh_models(&mut self) {
        let api = self.api.clone();
        self.jobs
            .spawn(move || TrainingMessage::Models(api.list_models()));
    }
}

impl View for TrainingView {
    fn activate(&mut self) {
        self.refresh_models();
    }

    fn poll(&mut self) -> bool {
        let messages = self.jobs.drain();
        let changed = !messages.is_empty();
        for message in messages {
            match message {
                TrainingMessage::Models(models) => self.models = models,
                TrainingMessage::Trained { result, models } => {
                    self.training = false;
                    self.outcome = Some(match result {
                        Ok(result) => TrainingOutcome::Trained(result),
                        Err(err) => TrainingOutcome::Failed(err.to_string()),
                    });
                    if let Some(models) = models {
                        self.models = models;
                    }
                }
            }
        }
        changed
    }

    fn is_busy(&self) -> bool {
        self.jobs.pending() > 0
    }

    fn teardown(&mut self) {
        self.jobs.cancel();
        self.training = false;
    }
}

fn check_range(
    name: &'static str,
    range: &RangeInclusive<u32>,
    value: u32,
) -> Result<(), TrainingFormError> {
    if range.contains(&value) {
        Ok(())
    } else {
        Err(TrainingFormError::OutOfRange {
            name,
            min: *range.start(),
            max: *range.end(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpSettings;

    fn view() -> TrainingView {
        let api = ApiClient::with_base_url("http://127.0.0.1:9", &HttpSettings::default()).unwrap();
        TrainingView::new(api)
    }

    #[test]
    fn feature_toggle_preserves_selection_order() {
        let mut view = view();
        assert_eq!(view.toggle_feature("OverTime_Yes"), Ok(true));
        assert_eq!(view.toggle_feature("Age"), Ok(true));
        assert_eq!(view.toggle_feature("MonthlyIncome"), Ok(true));
        assert_eq!(view.toggle_feature("Age"), Ok(false));
        assert_eq!(view.selected_features(), ["OverTime_Yes", "MonthlyIncome"]);
    }

    #[test]
    fn unknown_features_are_rejected() {
        let mut view = view();
        assert!(matches!(
            view.toggle_feature("ShoeSize"),
            Err(TrainingFormError::UnknownFeature(_))
        ));
        assert!(view.selected_features().is_empty());
    }

    #[test]
    fn params_outside_form_limits_are_rejected() {
        let mut view = view();
        let err = view
            .set_params(ModelParams {
                n_estimators: 5,
                max_depth: 4,
                min_samples_leaf: 2,
            })
            .unwrap_err();
        assert_eq!(
            err,
            TrainingFormError::OutOfRange {
                name: "n_estimators",
                min: 10,
                max: 2000,
                value: 5
            }
        );
        assert_eq!(view.params(), ModelParams::default());
        let edge = ModelParams {
            n_estimators: 2000,
            max_depth: 20,
            min_samples_leaf: 1,
        };
        view.set_params(edge).unwrap();
        assert_eq!(view.params(), edge);
    }

    #[test]
    fn feature_catalogue_has_no_duplicates() {
        let mut names = FEATURE_OPTIONS.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FEATURE_OPTIONS.len());
    }
}
