//! Patient case value object
//!
//! A case arrives from an external data provider as an opaque JSON mapping.
//! Only a fixed set of keys is interpreted; every one of them is optional
//! and an absent or empty value renders as [`NOT_SPECIFIED`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder rendered for any absent case field.
pub const NOT_SPECIFIED: &str = "Not specified";

/// Clinical fields recognized in a patient case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseField {
    PatientId,
    Age,
    Sex,
    ChiefComplaint,
    Symptoms,
    Duration,
    Severity,
    PastMedicalHistory,
    Medications,
    Allergies,
    FamilyHistory,
    SocialHistory,
    VitalSigns,
    PhysicalExam,
}

impl CaseField {
    pub const ALL: [CaseField; 14] = [
        CaseField::PatientId,
        CaseField::Age,
        CaseField::Sex,
        CaseField::ChiefComplaint,
        CaseField::Symptoms,
        CaseField::Duration,
        CaseField::Severity,
        CaseField::PastMedicalHistory,
        CaseField::Medications,
        CaseField::Allergies,
        CaseField::FamilyHistory,
        CaseField::SocialHistory,
        CaseField::VitalSigns,
        CaseField::PhysicalExam,
    ];

    /// Key used in the case mapping
    pub fn key(&self) -> &'static str {
        match self {
            CaseField::PatientId => "patient_id",
            CaseField::Age => "age",
            CaseField::Sex => "sex",
            CaseField::ChiefComplaint => "chief_complaint",
            CaseField::Symptoms => "symptoms",
            CaseField::Duration => "duration",
            CaseField::Severity => "severity",
            CaseField::PastMedicalHistory => "past_medical_history",
            CaseField::Medications => "medications",
            CaseField::Allergies => "allergies",
            CaseField::FamilyHistory => "family_history",
            CaseField::SocialHistory => "social_history",
            CaseField::VitalSigns => "vital_signs",
            CaseField::PhysicalExam => "physical_exam",
        }
    }
}

impl std::fmt::Display for CaseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A patient case (Value Object)
///
/// Wraps the provider's mapping untouched, so unknown keys survive a
/// round trip through the session and into reports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatientCase(Map<String, Value>);

impl PatientCase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for a recognized field.
    pub fn with(mut self, field: CaseField, value: impl Into<Value>) -> Self {
        self.0.insert(field.key().to_string(), value.into());
        self
    }

    /// Raw access to the underlying mapping.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn get(&self, field: CaseField) -> Option<&Value> {
        self.0.get(field.key())
    }

    /// Render a field as display text, or `None` when absent or empty.
    ///
    /// Lists are comma-joined and objects are rendered as `key: value` pairs,
    /// which covers vital signs supplied as structured data.
    pub fn text(&self, field: CaseField) -> Option<String> {
        self.get(field).and_then(render_value)
    }

    /// Render a field, substituting [`NOT_SPECIFIED`] when absent.
    pub fn text_or_placeholder(&self, field: CaseField) -> String {
        self.text(field).unwrap_or_else(|| NOT_SPECIFIED.to_string())
    }

    /// Render a field, substituting a caller-chosen phrase when absent.
    pub fn text_or(&self, field: CaseField, fallback: &str) -> String {
        self.text(field).unwrap_or_else(|| fallback.to_string())
    }

    /// Symptom list; a single string is treated as one symptom.
    pub fn symptoms(&self) -> Vec<String> {
        match self.get(CaseField::Symptoms) {
            Some(Value::Array(items)) => items.iter().filter_map(render_value).collect(),
            Some(other) => render_value(other).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// Patient identifier for audit records.
    pub fn patient_id(&self) -> Option<String> {
        self.text(CaseField::PatientId)
    }
}

impl From<Map<String, Value>> for PatientCase {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn render_value(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .filter_map(render_value)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .iter()
            .filter_map(|(k, v)| render_value(v).map(|v| format!("{}: {}", k, v)))
            .collect::<Vec<_>>()
            .join(", "),
    };
    if text.is_empty() { None } else { Some(text) }
}
