use serde_json::Value;

/// Backend operations, used to pick error fields and fallback messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    SubmitTraining,
    ListModels,
    SubmitPrediction,
    ListPrefilledEmployees,
    FetchEmployeeDetails,
    FetchModelDetails,
    SubmitNewEmployee,
}

impl Operation {
    /// Message used when the backend supplies none.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::SubmitTraining => "Training failed",
            Self::ListModels => "Failed to fetch available models",
            Self::SubmitPrediction => "Prediction failed",
            Self::ListPrefilledEmployees => "Failed to fetch prefilled employees",
            Self::FetchEmployeeDetails => "Failed to fetch employee details",
            Self::FetchModelDetails => "Failed to fetch model details",
            Self::SubmitNewEmployee => "Failed to add employee",
        }
    }

    /// Body fields that may carry a message, in lookup order.
    fn message_fields(self) -> &'static [&'static str] {
        match self {
            Self::SubmitTraining => &["response"],
            Self::SubmitNewEmployee => &["error", "errors"],
            _ => &["error"],
        }
    }
}

/// Failure of a backend call. `Display` yields the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response whose body could be read.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// 2xx response carrying a failure payload.
    #[error("{message}")]
    Application { message: String },
    /// Network failure, or an error status with an unreadable body.
    #[error("{0}")]
    Transport(String),
    /// Success status but the body did not have the expected shape.
    #[error("{context}: {detail}")]
    Decode {
        context: &'static str,
        detail: String,
    },
}

impl ApiError {
    /// HTTP status when the backend answered with an error code.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(super) fn decode(operation: Operation, detail: impl ToString) -> Self {
        Self::Decode {
            context: operation.fallback_message(),
            detail: detail.to_string(),
        }
    }
}

/// Message for a failed response body: the first usable message field, else
/// the operation fallback. `None` when the body is not JSON at all.
pub(super) fn message_from_body(operation: Operation, body: &str) -> Option<String> {
    let value = serde_json::from_str::<Value>(body.trim()).ok()?;
    Some(message_from_value(operation, &value))
}

pub(super) fn message_from_value(operation: Operation, value: &Value) -> String {
    operation
        .message_fields()
        .iter()
        .find_map(|field| value.get(*field).and_then(field_message))
        .unwrap_or_else(|| operation.fallback_message().to_string())
}

fn field_message(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        Value::Object(map) if !map.is_empty() => Some(value.to_string()),
        Value::Array(items) if !items.is_empty() => Some(value.to_string()),
        _ => None,
    }
}
