use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::VehicleBody;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    pub field: String,
    pub error_type: ValidationErrorType,
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorType {
    MissingRequiredProperty,
    TypeMismatch,
    InvalidValue,
}

impl ValidationError {
    pub fn missing(field: &str) -> Self {
        Self {
            field: field.to_string(),
            error_type: ValidationErrorType::MissingRequiredProperty,
            message: format!("Field '{}' is required", field),
            expected: None,
            actual: None,
        }
    }

    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            error_type: ValidationErrorType::InvalidValue,
            message: message.into(),
            expected: None,
            actual: None,
        }
    }

    fn type_mismatch(field: &str, kind: FieldKind, actual: &Value) -> Self {
        Self {
            field: field.to_string(),
            error_type: ValidationErrorType::TypeMismatch,
            message: format!("Field '{}' should be {}", field, kind.describe()),
            expected: Some(kind.name().to_string()),
            actual: Some(json_type_name(actual).to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    String,
    Integer,
    Number,
    Object,
}

impl FieldKind {
    fn name(self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Number => "number",
            FieldKind::Object => "object",
        }
    }

    fn describe(self) -> &'static str {
        match self {
            FieldKind::String => "a valid string",
            FieldKind::Integer => "a valid integer",
            FieldKind::Number => "a valid number",
            FieldKind::Object => "a JSON object",
        }
    }
}

/// Required fields of every vehicle body. `vin` is handled separately.
const REQUIRED_FIELDS: &[(&str, FieldKind)] = &[
    ("manufacturer_name", FieldKind::String),
    ("description", FieldKind::String),
    ("horse_power", FieldKind::Integer),
    ("model_name", FieldKind::String),
    ("model_year", FieldKind::Integer),
    ("purchase_price", FieldKind::Number),
    ("fuel_type", FieldKind::String),
];

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "number",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn out_of_range(field: &str, actual: String) -> ValidationError {
    ValidationError {
        expected: Some("32-bit integer".to_string()),
        actual: Some(actual),
        ..ValidationError::invalid(field, format!("Field '{}' is out of range", field))
    }
}

/// Whole numbers given as floats or numeric strings are accepted for integers
fn coerce_integer(field: &str, value: &Value) -> Result<Value, ValidationError> {
    let whole = match value {
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from))
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i128)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i128>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite() && f.fract() == 0.0)
                    .map(|f| f as i128)
            })
        }
        _ => None,
    };

    let Some(whole) = whole else {
        return Err(ValidationError::type_mismatch(field, FieldKind::Integer, value));
    };
    i32::try_from(whole)
        .map(Value::from)
        .map_err(|_| out_of_range(field, whole.to_string()))
}

/// Numeric strings are accepted for numbers
fn coerce_number(field: &str, value: &Value) -> Result<Value, ValidationError> {
    match value {
        Value::Number(_) => Ok(value.clone()),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Value::from)
            .ok_or_else(|| ValidationError::type_mismatch(field, FieldKind::Number, value)),
        _ => Err(ValidationError::type_mismatch(field, FieldKind::Number, value)),
    }
}

/// Check one field and return it in the form `VehicleBody` expects
fn check_field(field: &str, kind: FieldKind, value: &Value) -> Result<Value, ValidationError> {
    match (kind, value) {
        (FieldKind::String, Value::String(_)) => Ok(value.clone()),
        (FieldKind::Integer, _) => coerce_integer(field, value),
        (FieldKind::Number, _) => coerce_number(field, value),
        _ => Err(ValidationError::type_mismatch(field, kind, value)),
    }
}

/// Check the shape of a vehicle body, collecting every problem found.
///
/// Unknown fields are ignored. A `vin` that is absent or `null` comes back as
/// `None`; any other non-string `vin` is a type mismatch, even where the
/// policy ignores it.
pub fn validate_vehicle_body(payload: &Value) -> Result<VehicleBody, Vec<ValidationError>> {
    let Some(object) = payload.as_object() else {
        return Err(vec![ValidationError::type_mismatch(
            "body",
            FieldKind::Object,
            payload,
        )]);
    };

    let mut errors = Vec::new();
    let mut checked = serde_json::Map::new();

    match object.get("vin") {
        None | Some(Value::Null) => {}
        Some(vin @ Value::String(_)) => {
            checked.insert("vin".to_string(), vin.clone());
        }
        Some(other) => errors.push(ValidationError::type_mismatch("vin", FieldKind::String, other)),
    }

    for (field, kind) in REQUIRED_FIELDS {
        match object.get(*field).map(|value| check_field(field, *kind, value)) {
            None => errors.push(ValidationError::missing(field)),
            Some(Ok(value)) => {
                checked.insert(field.to_string(), value);
            }
            Some(Err(e)) => errors.push(e),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    serde_json::from_value(Value::Object(checked))
        .map_err(|e| vec![ValidationError::invalid("body", e.to_string())])
}

/// A client-supplied VIN must contain something besides whitespace
pub fn validate_client_vin(vin: Option<String>) -> Result<String, ValidationError> {
    match vin {
        None => Err(ValidationError::missing("vin")),
        Some(vin) if vin.trim().is_empty() => {
            Err(ValidationError::invalid("vin", "Field 'vin' must not be empty"))
        }
        Some(vin) => Ok(vin),
    }
}
