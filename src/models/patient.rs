//! Patient visit record model
//!
//! A `PatientRecord` represents one hospital encounter. Records are
//! immutable once constructed; the analytics engine only ever borrows them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AnalyticsError;

/// Lowest age accepted into numeric aggregates
pub const MIN_VALID_AGE: i32 = 0;
/// Highest age accepted into numeric aggregates
pub const MAX_VALID_AGE: i32 = 120;

/// Outcome recorded when a patient died during the encounter
pub const OUTCOME_DIED: &str = "Died";

/// Outcome categories used for contingency tables
pub const OUTCOME_VOCABULARY: [&str; 4] = ["Discharged", "Admitted", "Referred", OUTCOME_DIED];

/// Biological sex of the patient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Male
    Male,
    /// Female
    Female,
}

impl FromStr for Sex {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Sex::Male),
            "female" | "f" => Ok(Sex::Female),
            other => Err(AnalyticsError::malformed_record(format!(
                "Unrecognized sex: {other}"
            ))),
        }
    }
}

/// Numeric fields that can be summarised or compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumericField {
    /// Age in years
    Age,
    /// Waiting time in minutes
    WaitingTime,
    /// Length of stay in days
    LengthOfStay,
}

impl NumericField {
    /// Field name as used in the JSON contract
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            NumericField::Age => "age",
            NumericField::WaitingTime => "waitingTime",
            NumericField::LengthOfStay => "lengthOfStay",
        }
    }

    /// Unit the field is measured in
    #[must_use]
    pub fn unit(&self) -> &'static str {
        match self {
            NumericField::Age => "years",
            NumericField::WaitingTime => "minutes",
            NumericField::LengthOfStay => "days",
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NumericField {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "").as_str() {
            "age" => Ok(NumericField::Age),
            "waitingtime" => Ok(NumericField::WaitingTime),
            "lengthofstay" => Ok(NumericField::LengthOfStay),
            other => Err(AnalyticsError::invalid_parameter(format!(
                "Unknown numeric field: {other}"
            ))),
        }
    }
}

/// One hospital visit or encounter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    /// Store-generated unique identifier
    pub id: String,
    /// Owning dataset
    pub dataset_id: String,
    /// De-identified patient token
    pub patient_id: String,
    /// Age in years, if known
    pub age: Option<i32>,
    /// Patient sex
    pub sex: Sex,
    /// Department that saw the patient
    pub department: String,
    /// Free-text diagnosis
    pub diagnosis: String,
    /// ICD-10 code for the diagnosis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icd10_code: Option<String>,
    /// Service delivered during the visit
    pub service_provided: String,
    /// Date of the encounter
    pub visit_date: NaiveDate,
    /// Encounter outcome, e.g. "Discharged" or "Died"
    pub outcome: String,
    /// Referral status
    pub referral_status: String,
    /// Waiting time in minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waiting_time: Option<u32>,
    /// Length of stay in days
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length_of_stay: Option<u32>,
}

impl PatientRecord {
    /// Create a record with the required fields; optional fields start empty
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        dataset_id: impl Into<String>,
        sex: Sex,
        visit_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            dataset_id: dataset_id.into(),
            patient_id: String::new(),
            age: None,
            sex,
            department: String::new(),
            diagnosis: String::new(),
            icd10_code: None,
            service_provided: String::new(),
            visit_date,
            outcome: String::new(),
            referral_status: String::new(),
            waiting_time: None,
            length_of_stay: None,
        }
    }

    /// Set the patient token
    #[must_use]
    pub fn with_patient_id(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = patient_id.into();
        self
    }

    /// Set the age
    #[must_use]
    pub fn with_age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    /// Set the department
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Set the diagnosis
    #[must_use]
    pub fn with_diagnosis(mut self, diagnosis: impl Into<String>) -> Self {
        self.diagnosis = diagnosis.into();
        self
    }

    /// Set the ICD-10 code
    #[must_use]
    pub fn with_icd10_code(mut self, code: impl Into<String>) -> Self {
        self.icd10_code = Some(code.into());
        self
    }

    /// Set the service provided
    #[must_use]
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service_provided = service.into();
        self
    }

    /// Set the outcome
    #[must_use]
    pub fn with_outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = outcome.into();
        self
    }

    /// Set the referral status
    #[must_use]
    pub fn with_referral_status(mut self, status: impl Into<String>) -> Self {
        self.referral_status = status.into();
        self
    }

    /// Set the waiting time in minutes
    #[must_use]
    pub fn with_waiting_time(mut self, minutes: u32) -> Self {
        self.waiting_time = Some(minutes);
        self
    }

    /// Set the length of stay in days
    #[must_use]
    pub fn with_length_of_stay(mut self, days: u32) -> Self {
        self.length_of_stay = Some(days);
        self
    }

    /// Value of a numeric field, or `None` when the record has no usable value
    ///
    /// Ages outside `[0, 120]` are treated as unusable.
    #[must_use]
    pub fn numeric_value(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::Age => self
                .age
                .filter(|age| (MIN_VALID_AGE..=MAX_VALID_AGE).contains(age))
                .map(f64::from),
            NumericField::WaitingTime => self.waiting_time.map(f64::from),
            NumericField::LengthOfStay => self.length_of_stay.map(f64::from),
        }
    }

    /// Whether the encounter ended in death
    #[must_use]
    pub fn died(&self) -> bool {
        self.outcome == OUTCOME_DIED
    }
}

/// Extract the usable values of a numeric field, preserving record order
#[must_use]
pub fn numeric_values(records: &[PatientRecord], field: NumericField) -> Vec<f64> {
    records
        .iter()
        .filter_map(|record| record.numeric_value(field))
        .collect()
}
