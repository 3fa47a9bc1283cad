//! Adapter from loosely typed JSON rows to `PatientRecord`s
//!
//! Uploaded rows arrive with inconsistent types: ages as strings, blank
//! waiting times, timestamps instead of dates. Numeric fields that cannot be
//! read as numbers become `None` and are later skipped by the numeric
//! analyses; they never fail the record. Identity, sex and visit date are
//! required.

use chrono::{DateTime, NaiveDate};
use serde_json::{Map, Value};

use crate::error::{AnalyticsError, Result};
use crate::models::patient::{PatientRecord, Sex};

/// Look up a key under its camelCase or snake_case spelling
fn field<'a>(row: &'a Map<String, Value>, camel: &str, snake: &str) -> Option<&'a Value> {
    row.get(camel).or_else(|| row.get(snake)).filter(|v| !v.is_null())
}

fn text(row: &Map<String, Value>, camel: &str, snake: &str) -> Option<String> {
    match field(row, camel, snake)? {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Read a value as a number, accepting numeric strings
#[must_use]
pub fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn whole_number<T: TryFrom<i64>>(row: &Map<String, Value>, camel: &str, snake: &str) -> Option<T> {
    let number = coerce_number(field(row, camel, snake)?)?;
    if number.fract() != 0.0 {
        return None;
    }
    T::try_from(number as i64).ok()
}

/// Parse a visit date from `YYYY-MM-DD` or an RFC 3339 timestamp
pub fn parse_visit_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| AnalyticsError::malformed_record(format!("Unparseable visit date: {raw}")))
}

/// Adapt one JSON object into a `PatientRecord`
pub fn record_from_value(value: &Value) -> Result<PatientRecord> {
    let row = value
        .as_object()
        .ok_or_else(|| AnalyticsError::malformed_record("record is not a JSON object"))?;

    let id = text(row, "id", "id")
        .ok_or_else(|| AnalyticsError::malformed_record("missing id"))?;
    let sex: Sex = text(row, "sex", "sex")
        .ok_or_else(|| AnalyticsError::malformed_record(format!("record {id}: missing sex")))?
        .parse()?;
    let visit_date = text(row, "visitDate", "visit_date")
        .ok_or_else(|| AnalyticsError::malformed_record(format!("record {id}: missing visit date")))
        .and_then(|raw| parse_visit_date(&raw))?;

    Ok(PatientRecord {
        dataset_id: text(row, "datasetId", "dataset_id").unwrap_or_default(),
        patient_id: text(row, "patientId", "patient_id").unwrap_or_default(),
        age: whole_number(row, "age", "age"),
        sex,
        department: text(row, "department", "department").unwrap_or_default(),
        diagnosis: text(row, "diagnosis", "diagnosis").unwrap_or_default(),
        icd10_code: text(row, "icd10Code", "icd10_code").filter(|c| !c.is_empty()),
        service_provided: text(row, "serviceProvided", "service_provided").unwrap_or_default(),
        visit_date,
        outcome: text(row, "outcome", "outcome").unwrap_or_default(),
        referral_status: text(row, "referralStatus", "referral_status").unwrap_or_default(),
        waiting_time: whole_number(row, "waitingTime", "waiting_time"),
        length_of_stay: whole_number(row, "lengthOfStay", "length_of_stay"),
        id,
    })
}

/// Adapt a JSON array of rows
pub fn records_from_json(json: &str) -> Result<Vec<PatientRecord>> {
    let value: Value = serde_json::from_str(json)?;
    let rows = value
        .as_array()
        .ok_or_else(|| AnalyticsError::malformed_record("expected a JSON array of records"))?;
    rows.iter().map(record_from_value).collect()
}
