//! Synthetic visit records for demos and tests
//!
//! Generates realistic-looking OPD, IPD and seasonal outbreak data. A fixed
//! seed reproduces the same records on every run.

use chrono::{Datelike, Days, NaiveDate};
use log::debug;
use rand::prelude::*;

use crate::error::{AnalyticsError, Result};
use crate::models::patient::{PatientRecord, Sex};

/// Diagnoses seen in the OPD and IPD departments, with ICD-10 codes
pub const COMMON_DIAGNOSES: [(&str, &str); 15] = [
    ("Malaria", "B54"),
    ("Pneumonia", "J18.9"),
    ("Diarrhea", "A09"),
    ("Hypertension", "I10"),
    ("Diabetes Mellitus", "E14.9"),
    ("Upper Respiratory Infection", "J06.9"),
    ("Gastroenteritis", "A09.9"),
    ("Typhoid Fever", "A01.0"),
    ("Urinary Tract Infection", "N39.0"),
    ("Dengue Fever", "A91"),
    ("COVID-19", "U07.1"),
    ("Anemia", "D64.9"),
    ("Peptic Ulcer Disease", "K27.9"),
    ("Asthma", "J45.9"),
    ("Meningitis", "G03.9"),
];

const OPD_SERVICES: [&str; 7] = [
    "Consultation",
    "Laboratory Test",
    "X-Ray",
    "Ultrasound",
    "ECG",
    "Vaccination",
    "Health Education",
];

const IPD_SERVICES: [&str; 6] = [
    "Admission",
    "Surgery",
    "Blood Transfusion",
    "IV Therapy",
    "Oxygen Therapy",
    "Physiotherapy",
];

const OPD_OUTCOMES: [&str; 4] = ["Discharged", "Referred", "Admitted", "Left Against Medical Advice"];

const IPD_OUTCOMES: [&str; 5] = [
    "Discharged",
    "Transferred",
    "Referred",
    "Died",
    "Left Against Medical Advice",
];

/// Monthly case multipliers, January first
const SEASONAL_PATTERNS: [(&str, [f64; 12]); 3] = [
    // Rainy season peak
    ("Malaria", [0.5, 0.6, 0.8, 1.2, 1.5, 1.8, 2.0, 1.9, 1.6, 1.2, 0.8, 0.6]),
    // Cold season peak
    ("Pneumonia", [1.2, 1.1, 0.9, 0.7, 0.6, 0.5, 0.5, 0.6, 0.8, 1.0, 1.3, 1.4]),
    ("Diarrhea", [0.8, 0.9, 1.1, 1.3, 1.2, 1.0, 0.9, 0.8, 0.9, 1.0, 1.1, 1.0]),
];

/// Department a generated record belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Department {
    Opd,
    Ipd,
}

impl Department {
    const fn name(self) -> &'static str {
        match self {
            Self::Opd => "opd",
            Self::Ipd => "ipd",
        }
    }
}

/// Monthly multipliers for `diagnosis`; flat for unknown diagnoses
#[must_use]
pub fn seasonal_pattern(diagnosis: &str) -> [f64; 12] {
    SEASONAL_PATTERNS
        .iter()
        .find(|(name, _)| *name == diagnosis)
        .map_or([1.0; 12], |(_, pattern)| *pattern)
}

/// ICD-10 code for one of the common diagnoses
#[must_use]
pub fn icd10_code(diagnosis: &str) -> Option<&'static str> {
    COMMON_DIAGNOSES
        .iter()
        .find(|(name, _)| *name == diagnosis)
        .map(|(_, code)| *code)
}

/// Seeded generator of synthetic patient records
pub struct SyntheticDataGenerator {
    rng: StdRng,
}

impl SyntheticDataGenerator {
    /// Create a generator; `None` seeds from the operating system
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self { rng }
    }

    /// Outpatient visits between `start` and `end`, with waiting times
    pub fn opd_records(
        &mut self,
        count: usize,
        start: NaiveDate,
        end: NaiveDate,
        dataset_id: &str,
    ) -> Result<Vec<PatientRecord>> {
        self.department_records(Department::Opd, count, start, end, dataset_id)
    }

    /// Inpatient admissions between `start` and `end`, with lengths of stay
    pub fn ipd_records(
        &mut self,
        count: usize,
        start: NaiveDate,
        end: NaiveDate,
        dataset_id: &str,
    ) -> Result<Vec<PatientRecord>> {
        self.department_records(Department::Ipd, count, start, end, dataset_id)
    }

    /// Daily OPD cases of one diagnosis following its monthly pattern
    ///
    /// Each day in `[start, end)` gets between 5 and 14 base cases scaled by
    /// the month's multiplier and truncated.
    pub fn seasonal_records(
        &mut self,
        diagnosis: &str,
        start: NaiveDate,
        end: NaiveDate,
        dataset_id: &str,
    ) -> Result<Vec<PatientRecord>> {
        let days = day_span(start, end)?;
        let pattern = seasonal_pattern(diagnosis);
        let mut records = Vec::new();

        for offset in 0..days {
            let Some(date) = start.checked_add_days(Days::new(offset)) else {
                break;
            };
            let multiplier = pattern[date.month0() as usize];
            let base_cases = f64::from(self.rng.random_range(5_u32..15));
            let daily_cases = (base_cases * multiplier).floor() as usize;
            for _ in 0..daily_cases {
                let record = self
                    .visit(Department::Opd, date, dataset_id)
                    .with_diagnosis(diagnosis);
                let record = match icd10_code(diagnosis) {
                    Some(code) => record.with_icd10_code(code),
                    None => record,
                };
                records.push(record);
            }
        }

        debug!(
            "Generated {} seasonal {diagnosis} records over {days} days",
            records.len()
        );
        Ok(assign_ids(records, dataset_id))
    }

    fn department_records(
        &mut self,
        department: Department,
        count: usize,
        start: NaiveDate,
        end: NaiveDate,
        dataset_id: &str,
    ) -> Result<Vec<PatientRecord>> {
        let days = day_span(start, end)?;
        let mut records = Vec::with_capacity(count);

        for _ in 0..count {
            let offset = if days == 0 { 0 } else { self.rng.random_range(0..days) };
            let date = start.checked_add_days(Days::new(offset)).unwrap_or(start);
            let (diagnosis, code) = *COMMON_DIAGNOSES.choose(&mut self.rng).unwrap_or(&COMMON_DIAGNOSES[0]);
            records.push(
                self.visit(department, date, dataset_id)
                    .with_diagnosis(diagnosis)
                    .with_icd10_code(code),
            );
        }

        records.sort_by_key(|record| record.visit_date);
        debug!(
            "Generated {} {} records for dataset {dataset_id}",
            records.len(),
            department.name()
        );
        Ok(assign_ids(records, dataset_id))
    }

    /// One visit with the department's services, outcomes and measures
    fn visit(&mut self, department: Department, date: NaiveDate, dataset_id: &str) -> PatientRecord {
        let sex = if self.rng.random_bool(0.5) { Sex::Male } else { Sex::Female };
        let (services, outcomes, referral_rate): (&[&str], &[&str], f64) = match department {
            Department::Opd => (&OPD_SERVICES[..], &OPD_OUTCOMES[..], 0.2),
            Department::Ipd => (&IPD_SERVICES[..], &IPD_OUTCOMES[..], 0.3),
        };
        let referral = if self.rng.random_bool(referral_rate) {
            "Referred"
        } else {
            "Not Referred"
        };

        let record = PatientRecord::new("", dataset_id, sex, date)
            .with_patient_id(format!("PAT-{:05}", self.rng.random_range(0..100_000)))
            .with_age(self.age())
            .with_department(department.name())
            .with_service(pick(&mut self.rng, services))
            .with_outcome(pick(&mut self.rng, outcomes))
            .with_referral_status(referral);

        match department {
            Department::Opd => record.with_waiting_time(self.rng.random_range(10..130)),
            Department::Ipd => record.with_length_of_stay(self.rng.random_range(1..15)),
        }
    }

    /// Age drawn from the outpatient age bands
    fn age(&mut self) -> i32 {
        let band: f64 = self.rng.random();
        if band < 0.15 {
            self.rng.random_range(0..5)
        } else if band < 0.35 {
            self.rng.random_range(5..20)
        } else if band < 0.75 {
            self.rng.random_range(20..50)
        } else if band < 0.90 {
            self.rng.random_range(50..70)
        } else {
            self.rng.random_range(70..100)
        }
    }
}

fn pick<'a>(rng: &mut StdRng, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn day_span(start: NaiveDate, end: NaiveDate) -> Result<u64> {
    u64::try_from((end - start).num_days()).map_err(|_| {
        AnalyticsError::invalid_parameter(format!("end date {end} is before start date {start}"))
    })
}

/// Number records `{dataset_id}-000000` upwards in their current order
#[must_use]
pub fn assign_ids(mut records: Vec<PatientRecord>, dataset_id: &str) -> Vec<PatientRecord> {
    for (index, record) in records.iter_mut().enumerate() {
        record.id = format!("{dataset_id}-{index:06}");
    }
    records
}
