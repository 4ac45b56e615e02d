use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::{EmployeeField, EmployeeRecord, FieldKind};

/// Reasons a draft value or a whole draft is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Unknown employee field: {0}")]
    UnknownField(String),
    #[error("{field} must be a whole number, got {value:?}")]
    NotANumber {
        field: EmployeeField,
        value: String,
    },
    #[error("{field} must be one of: {allowed}")]
    InvalidChoice {
        field: EmployeeField,
        allowed: String,
    },
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: EmployeeField,
        min: u32,
        max: u32,
    },
    #[error("Invalid employee record: {0}")]
    Shape(String),
}

/// Text values of the add-employee form, keyed by field.
///
/// Numeric fields only ever hold digits or the empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeDraft {
    values: BTreeMap<EmployeeField, String>,
}

impl Default for EmployeeDraft {
    fn default() -> Self {
        let values = EmployeeField::ALL
            .into_iter()
            .map(|field| (field, field.default_value().to_string()))
            .collect();
        Self { values }
    }
}

impl EmployeeDraft {
    pub fn get(&self, field: EmployeeField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    /// Update one field. Rejected input leaves the draft unchanged.
    pub fn set(&mut self, field: EmployeeField, value: &str) -> Result<(), DraftError> {
        match field.kind() {
            FieldKind::Number { .. } => {
                if !value.chars().all(|ch| ch.is_ascii_digit()) {
                    return Err(DraftError::NotANumber {
                        field,
                        value: value.to_string(),
                    });
                }
            }
            FieldKind::NumberChoice(options) | FieldKind::Choice(options) => {
                check_choice(field, options, value)?;
            }
        }
        self.values.insert(field, value.to_string());
        Ok(())
    }

    /// Update a field by its backend name.
    pub fn set_by_name(&mut self, name: &str, value: &str) -> Result<(), DraftError> {
        let field =
            EmployeeField::from_name(name).ok_or_else(|| DraftError::UnknownField(name.into()))?;
        self.set(field, value)
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Convert the draft into a record ready to send.
    ///
    /// Empty numeric fields become explicit nulls; everything else is parsed
    /// and checked against its vocabulary or range.
    pub fn normalize(&self) -> Result<EmployeeRecord, DraftError> {
        let mut payload = Map::new();
        for field in EmployeeField::ALL {
            let raw = self.get(field);
            let value = match field.kind() {
                FieldKind::Number { range } => normalize_number(field, raw, range)?,
                FieldKind::NumberChoice(options) => {
                    check_choice(field, options, raw)?;
                    normalize_number(field, raw, None)?
                }
                FieldKind::Choice(options) => {
                    check_choice(field, options, raw)?;
                    Value::String(raw.to_string())
                }
            };
            payload.insert(field.name().to_string(), value);
        }
        serde_json::from_value(Value::Object(payload))
            .map_err(|err| DraftError::Shape(err.to_string()))
    }
}

fn normalize_number(
    field: EmployeeField,
    raw: &str,
    range: Option<(u32, u32)>,
) -> Result<Value, DraftError> {
    if raw.is_empty() {
        return Ok(Value::Null);
    }
    let not_a_number = || DraftError::NotANumber {
        field,
        value: raw.to_string(),
    };
    if !raw.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(not_a_number());
    }
    let number = raw.parse::<u32>().map_err(|_| not_a_number())?;
    if let Some((min, max)) = range
        && !(min..=max).contains(&number)
    {
        return Err(DraftError::OutOfRange { field, min, max });
    }
    Ok(Value::from(number))
}

fn check_choice(
    field: EmployeeField,
    options: &'static [&'static str],
    value: &str,
) -> Result<(), DraftError> {
    if options.contains(&value) {
        Ok(())
    } else {
        Err(DraftError::InvalidChoice {
            field,
            allowed: options.join(", "),
        })
    }
}
