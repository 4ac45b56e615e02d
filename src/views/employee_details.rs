use std::thread;

use crate::api::{ApiClient, ApiError, ModelSummary, PredictionRequest, PredictionResult};
use crate::employee::EmployeeRecord;

use super::View;
use super::jobs::ViewJobs;

/// Result of the last prediction request.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionOutcome {
    Predicted(PredictionResult),
    Failed(String),
}

enum DetailsMessage {
    Loaded {
        details: Result<EmployeeRecord, ApiError>,
        models: Vec<ModelSummary>,
    },
    Predicted(Result<PredictionResult, ApiError>),
}

/// One employee record with model selection and prediction.
pub struct EmployeeDetailsView {
    api: ApiClient,
    employee_number: u32,
    details: Option<EmployeeRecord>,
    models: Vec<ModelSummary>,
    selected_model: Option<String>,
    prediction: Option<PredictionOutcome>,
    load_error: Option<String>,
    predicting: bool,
    jobs: ViewJobs<DetailsMessage>,
}

impl EmployeeDetailsView {
    pub fn new(api: ApiClient, employee_number: u32) -> Self {
        Self {
            api,
            employee_number,
            details: None,
            models: Vec::new(),
            selected_model: None,
            prediction: None,
            load_error: None,
            predicting: false,
            jobs: ViewJobs::new(),
        }
    }

    pub fn employee_number(&self) -> u32 {
        self.employee_number
    }

    /// The fetched record; `None` while loading or after a failed load.
    pub fn details(&self) -> Option<&EmployeeRecord> {
        self.details.as_ref()
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn models(&self) -> &[ModelSummary] {
        &self.models
    }

    pub fn selected_model(&self) -> Option<&str> {
        self.selected_model.as_deref()
    }

    /// Choose one of the listed models. Returns false for an unknown id.
    pub fn select_model(&mut self, model_id: &str) -> bool {
        if self.predicting || !self.models.iter().any(|m| m.model_id == model_id) {
            return false;
        }
        self.selected_model = Some(model_id.to_string());
        true
    }

    pub fn prediction(&self) -> Option<&PredictionOutcome> {
        self.prediction.as_ref()
    }

    pub fn is_predicting(&self) -> bool {
        self.predicting
    }

    /// Request a prediction for the loaded record with the selected model.
    pub fn predict(&mut self) -> bool {
        if self.predicting {
            return false;
        }
        let (Some(model_id), Some(details)) = (&self.selected_model, &self.details) else {
            return false;
        };
        let request = PredictionRequest {
            model_id: model_id.clone(),
            data: details.clone(),
        };
        self.prediction = None;
        self.predicting = true;
        let api = self.api.clone();
        self.jobs
            .spawn(move || DetailsMessage::Predicted(api.submit_prediction(&request)));
        true
    }

    fn apply_loaded(
        &mut self,
        details: Result<EmployeeRecord, ApiError>,
        models: Vec<ModelSummary>,
    ) {
        match details {
            Ok(details) => {
                self.details = Some(details);
                self.selected_model = models.first().map(|m| m.model_id.clone());
                self.models = models;
                self.load_error = None;
            }
            Err(err) => self.load_error = Some(err.to_string()),
        }
    }
}

impl View for EmployeeDetailsView {
    fn activate(&mut self) {
        let api = self.api.clone();
        let employee_number = self.employee_number;
        self.jobs.spawn(move || {
            thread::scope(|scope| {
                let models = scope.spawn(|| api.list_models());
                let details = api.fetch_employee_details(employee_number);
                let models = models.join().unwrap_or_default();
                DetailsMessage::Loaded { details, models }
            })
        });
    }

    fn poll(&mut self) -> bool {
        let messages = self.jobs.drain();
        let changed = !messages.is_empty();
        for message in messages {
            match message {
                DetailsMessage::Loaded { details, models } => self.apply_loaded(details, models),
                DetailsMessage::Predicted(result) => {
                    self.predicting = false;
                    self.prediction = Some(match result {
                        Ok(result) => PredictionOutcome::Predicted(result),
                        Err(err) => PredictionOutcome::Failed(err.to_string()),
                    });
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
        self.predicting = false;
    }
}
