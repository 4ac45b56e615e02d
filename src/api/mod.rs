//! Client for the attrition backend.
//!
//! Every backend call in the crate goes through [`ApiClient`]. Operations that
//! back an explicit user action return `Result` so the caller must show the
//! failure. The two list operations feeding passive views degrade to an empty
//! or absent result and log instead; their `try_*` twins return the error.

mod errors;
mod types;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::config::{self, ClientSettings, ConfigError, HttpSettings};
use crate::employee::EmployeeRecord;
use crate::http_client::{self, RetryConfig};

pub use errors::{ApiError, Operation};
pub use types::{
    AddEmployeeResponse, Metrics, ModelDetails, ModelParams, ModelSummary, PredictionRequest,
    PredictionResult, PrefilledEmployee, TrainingConfig, TrainingResult,
};

use errors::{message_from_body, message_from_value};
use types::{AddEmployeeWire, ModelListWire, PredictionEnvelope, TrainingResponseWire};

/// Stateless handle on the backend; cheap to clone into worker threads.
#[derive(Clone)]
pub struct ApiClient {
    base: Url,
    agent: ureq::Agent,
    list_retry: RetryConfig,
    max_response_bytes: usize,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base", &self.base.as_str())
            .field("list_retry", &self.list_retry)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Client for the process-wide backend chosen from settings and environment.
    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ConfigError> {
        let base = config::process_base_url(settings)?;
        Self::with_base_url(base, &settings.http)
    }

    /// Client for an explicit backend address.
    pub fn with_base_url(base_url: &str, http: &HttpSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            base: config::parse_http_url(base_url)?,
            agent: http_client::build_agent(http),
            list_retry: RetryConfig::from_settings(http),
            max_response_bytes: http.max_response_bytes,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// `POST /training/`: train a model and return its id and metrics.
    pub fn submit_training(&self, config: &TrainingConfig) -> Result<TrainingResult, ApiError> {
        let op = Operation::SubmitTraining;
        let url = self.endpoint(&["training"]);
        self.post(op, &url, config)
            .and_then(|body| parse_value(op, &body))
            .and_then(|value| {
                let wire: TrainingResponseWire = decode(op, &value)?;
                match wire.model_id {
                    Some(model_id) => Ok(TrainingResult {
                        model_id,
                        metrics: wire.metrics,
                        message: wire.response,
                    }),
                    None => Err(ApiError::Application {
                        message: message_from_value(op, &value),
                    }),
                }
            })
            .inspect_err(|err| tracing::error!("Error during training: {err}"))
    }

    /// `GET /models/`; an unavailable backend yields an empty list.
    pub fn list_models(&self) -> Vec<ModelSummary> {
        self.try_list_models().unwrap_or_else(|err| {
            tracing::warn!("Error fetching available models: {err}");
            Vec::new()
        })
    }

    /// `GET /models/`, reporting failures. A body without `models` is empty.
    pub fn try_list_models(&self) -> Result<Vec<ModelSummary>, ApiError> {
        let op = Operation::ListModels;
        let body = self.get_with_retry(op, &self.endpoint(&["models"]))?;
        let wire: ModelListWire = decode(op, &parse_value(op, &body)?)?;
        Ok(wire.models.unwrap_or_default())
    }

    /// `POST /prediction/`: the result unwrapped from the `response` envelope.
    pub fn submit_prediction(
        &self,
        request: &PredictionRequest,
    ) -> Result<PredictionResult, ApiError> {
        let op = Operation::SubmitPrediction;
        let url = self.endpoint(&["prediction"]);
        self.post(op, &url, request)
            .and_then(|body| parse_value(op, &body))
            .and_then(|value| {
                let envelope: PredictionEnvelope = decode(op, &value)?;
                envelope.response.ok_or_else(|| ApiError::Application {
                    message: message_from_value(op, &value),
                })
            })
            .inspect_err(|err| tracing::error!("Error during prediction: {err}"))
    }

    /// `GET /prediction/prefilled-predictions/`; `None` when unavailable.
    pub fn list_prefilled_employees(&self) -> Option<Vec<PrefilledEmployee>> {
        self.try_list_prefilled_employees()
            .inspect_err(|err| tracing::warn!("Error fetching prefilled employees: {err}"))
            .ok()
    }

    /// `GET /prediction/prefilled-predictions/`, reporting failures.
    pub fn try_list_prefilled_employees(&self) -> Result<Vec<PrefilledEmployee>, ApiError> {
        let op = Operation::ListPrefilledEmployees;
        let url = self.endpoint(&["prediction", "prefilled-predictions"]);
        let body = self.get_with_retry(op, &url)?;
        decode(op, &parse_value(op, &body)?)
    }

    /// `GET /prediction/prefilled-predictions/{n}/`.
    pub fn fetch_employee_details(&self, employee_number: u32) -> Result<EmployeeRecord, ApiError> {
        let op = Operation::FetchEmployeeDetails;
        let number = employee_number.to_string();
        let url = self.endpoint(&["prediction", "prefilled-predictions", &number]);
        self.get(op, &url)
            .and_then(|body| decode(op, &parse_value(op, &body)?))
            .inspect_err(|err| {
                tracing::error!("Error fetching details for employee {employee_number}: {err}")
            })
    }

    /// `GET /models/{id}/`.
    pub fn fetch_model_details(&self, model_id: &str) -> Result<ModelDetails, ApiError> {
        let op = Operation::FetchModelDetails;
        let url = self.endpoint(&["models", model_id]);
        self.get(op, &url)
            .and_then(|body| decode(op, &parse_value(op, &body)?))
            .inspect_err(|err| tracing::error!("Error fetching details for model {model_id}: {err}"))
    }

    /// `POST /employees/add/`. Backend-assigned identity fields are never sent.
    pub fn submit_new_employee(
        &self,
        record: &EmployeeRecord,
    ) -> Result<AddEmployeeResponse, ApiError> {
        let op = Operation::SubmitNewEmployee;
        let url = self.endpoint(&["employees", "add"]);
        self.post(op, &url, &record.without_identity())
            .and_then(|body| parse_value(op, &body))
            .and_then(|value| {
                let wire: AddEmployeeWire = decode(op, &value)?;
                match (wire.success, wire.employee_number) {
                    (true, Some(employee_number)) => Ok(AddEmployeeResponse {
                        success: true,
                        employee_number,
                    }),
                    (true, None) => Err(ApiError::decode(op, "missing employee_number")),
                    (false, _) => Err(ApiError::Application {
                        message: message_from_value(op, &value),
                    }),
                }
            })
            .inspect_err(|err| tracing::error!("Error adding employee: {err}"))
    }

    fn endpoint(&self, segments: &[&str]) -> String {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments).push("");
        }
        url.into()
    }

    fn get(&self, op: Operation, url: &str) -> Result<String, ApiError> {
        tracing::info!("GET {url}");
        self.finish(op, self.agent.get(url).set("Accept", "application/json").call())
    }

    fn get_with_retry(&self, op: Operation, url: &str) -> Result<String, ApiError> {
        http_client::retry_with_backoff(
            self.list_retry,
            || self.get(op, url),
            |err| matches!(err, ApiError::Transport(_)),
        )
    }

    fn post<T: Serialize>(&self, op: Operation, url: &str, body: &T) -> Result<String, ApiError> {
        tracing::info!("POST {url}");
        let request = self.agent.post(url).set("Accept", "application/json");
        self.finish(op, request.send_json(body))
    }

    fn finish(
        &self,
        op: Operation,
        outcome: Result<ureq::Response, ureq::Error>,
    ) -> Result<String, ApiError> {
        match outcome {
            Ok(response) => self.read_body(response).map_err(ApiError::Transport),
            Err(ureq::Error::Status(code, response)) => {
                let message = self
                    .read_body(response)
                    .ok()
                    .and_then(|body| message_from_body(op, &body));
                Err(match message {
                    Some(message) => ApiError::Rejected {
                        status: code,
                        message,
                    },
                    None => ApiError::Transport(format!("Request failed with status code {code}")),
                })
            }
            Err(ureq::Error::Transport(err)) => Err(ApiError::Transport(err.to_string())),
        }
    }

    fn read_body(&self, response: ureq::Response) -> Result<String, String> {
        let bytes = http_client::read_response_bytes(response, self.max_response_bytes)
            .map_err(|err| err.to_string())?;
        String::from_utf8(bytes).map_err(|err| err.to_string())
    }
}

fn parse_value(op: Operation, body: &str) -> Result<Value, ApiError> {
    serde_json::from_str(body.trim()).map_err(|err| ApiError::decode(op, err))
}

fn decode<T: DeserializeOwned>(op: Operation, value: &Value) -> Result<T, ApiError> {
    T::deserialize(value).map_err(|err| ApiError::decode(op, err))
}
