//! Sensor reading model
//!
//! Turns a raw event into a validated [`Reading`]. The event either carries
//! the reading under `payload` or is the reading itself, and the payload may
//! be a JSON object or a string holding one.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{PipelineError, PipelineResult};

/// Fields every reading must carry, in storage order.
pub const REQUIRED_FIELDS: [&str; 5] = [
    "timestamp",
    "temperature",
    "humidity",
    "air_quality",
    "air_state",
];

/// Older firmware reports the air state label under this key.
const LEGACY_AIR_STATE: &str = "estado_aire";

/// One validated sensor observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    pub timestamp: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub temperature: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub humidity: Decimal,
    pub air_quality: i64,
    pub air_state: String,
}

impl Reading {
    /// Validate a raw event into a reading.
    pub fn from_event(event: &Value) -> PipelineResult<Self> {
        let payload = extract_payload(event)?;
        let fields = payload.as_object().ok_or_else(|| {
            PipelineError::Validation("Payload must be a JSON object".to_string())
        })?;
        Self::from_fields(fields)
    }

    /// Validate an already-decoded payload mapping.
    pub fn from_fields(fields: &Map<String, Value>) -> PipelineResult<Self> {
        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|name| field(fields, name).is_none())
            .collect();

        if !missing.is_empty() {
            return Err(PipelineError::MissingFields(
                missing.into_iter().map(String::from).collect(),
            ));
        }

        // Presence was checked above, so Value::Null only shows up for wrong types below.
        let get = |name: &str| field(fields, name).unwrap_or(&Value::Null);

        let timestamp = text(get("timestamp"), "timestamp")?.trim().to_string();
        if timestamp.is_empty() {
            return Err(PipelineError::Validation(
                "timestamp must not be empty".to_string(),
            ));
        }

        Ok(Self {
            timestamp,
            temperature: decimal(get("temperature"), "temperature")?,
            humidity: decimal(get("humidity"), "humidity")?,
            air_quality: integer(get("air_quality"), "air_quality")?,
            air_state: text(get("air_state"), "air_state")?.to_string(),
        })
    }
}

/// Unwrap the `payload` envelope and decode string payloads.
pub fn extract_payload(event: &Value) -> PipelineResult<Value> {
    let payload = match event {
        Value::Object(map) => map.get("payload").unwrap_or(event),
        _ => event,
    };

    match payload {
        Value::String(raw) => Ok(serde_json::from_str(raw)?),
        other => Ok(other.clone()),
    }
}

/// Look up a field, treating explicit nulls as absent.
fn field<'a>(fields: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    let value = match fields.get(name) {
        Some(value) => Some(value),
        None if name == "air_state" => fields.get(LEGACY_AIR_STATE),
        None => None,
    };
    value.filter(|v| !v.is_null())
}

fn text<'a>(value: &'a Value, name: &str) -> PipelineResult<&'a str> {
    value
        .as_str()
        .ok_or_else(|| PipelineError::Validation(format!("{} must be a string", name)))
}

/// Parse a decimal from a JSON number or numeric string without going through f64 arithmetic.
fn decimal(value: &Value, name: &str) -> PipelineResult<Decimal> {
    let raw = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => {
            return Err(PipelineError::Validation(format!(
                "{} must be a number",
                name
            )))
        }
    };

    Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .map_err(|_| {
            // Decimal holds 28 significant digits below 7.9e28 in magnitude.
            if raw.parse::<f64>().is_ok_and(f64::is_finite) {
                PipelineError::Validation(format!("{} is outside the decimal range: {}", name, raw))
            } else {
                PipelineError::Validation(format!("{} is not a valid decimal: {}", name, raw))
            }
        })
}

fn integer(value: &Value, name: &str) -> PipelineResult<i64> {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| {
        let integral = value.as_f64().is_some_and(|f| f.fract() == 0.0);
        if integral {
            PipelineError::Validation(format!("{} is outside the 64-bit integer range", name))
        } else {
            PipelineError::Validation(format!("{} must be an integer", name))
        }
    })
}
