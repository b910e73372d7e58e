//! Intake form validation and request construction.

use tracing::debug;

use triage_contracts::{
    error::{DeskError, DeskResult},
    pipeline::{IntakeRequest, IntakeVitals},
};

/// Raw intake as typed by the operator. Every field is text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntakeForm {
    pub patient_name: String,
    pub age: String,
    pub sex: String,
    /// Comma- or newline-separated; passed through unparsed.
    pub symptoms_text: String,
    pub duration_hours: String,
    pub location_hint: String,
    pub heart_rate: String,
    pub systolic_bp: String,
    pub diastolic_bp: String,
    pub spo2: String,
    pub temperature_c: String,
}

impl IntakeForm {
    /// Check required fields and build the pipeline request.
    ///
    /// Required: patient name, age, sex, symptoms, duration and location;
    /// age and duration must be numeric. Vitals are optional and a
    /// non-numeric reading is dropped.
    ///
    /// # Errors
    ///
    /// `DeskError::InvalidInput` naming every offending field, in form order.
    pub fn validate(&self) -> DeskResult<IntakeRequest> {
        let mut invalid = Vec::new();

        let patient_name = required(&self.patient_name, "patientName", &mut invalid);
        let age = numeric(&self.age, "age", &mut invalid);
        let sex = required(&self.sex, "sex", &mut invalid);
        let symptoms_text = required(&self.symptoms_text, "symptomsText", &mut invalid);
        let duration_hours = numeric(&self.duration_hours, "durationHours", &mut invalid);
        let location_hint = required(&self.location_hint, "locationHint", &mut invalid);

        if !invalid.is_empty() {
            debug!(fields = ?invalid, "intake rejected");
            return Err(DeskError::InvalidInput { fields: invalid });
        }

        Ok(IntakeRequest {
            patient_name,
            age,
            sex,
            symptoms_text,
            duration_hours,
            vitals: IntakeVitals {
                heart_rate: optional_number(&self.heart_rate),
                systolic_bp: optional_number(&self.systolic_bp),
                diastolic_bp: optional_number(&self.diastolic_bp),
                spo2: optional_number(&self.spo2),
                temperature_c: optional_number(&self.temperature_c),
            },
            location_hint,
        })
    }
}

fn required(value: &str, field: &str, invalid: &mut Vec<String>) -> String {
    let value = value.trim();
    if value.is_empty() {
        invalid.push(field.to_string());
    }
    value.to_string()
}

fn numeric(value: &str, field: &str, invalid: &mut Vec<String>) -> f64 {
    match parse_number(value) {
        Some(n) => n,
        None => {
            invalid.push(field.to_string());
            0.0
        }
    }
}

fn optional_number(value: &str) -> Option<f64> {
    parse_number(value)
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
