//! Partial Updates
//!
//! A PUT body is a JSON object keyed by field name. Unknown keys are ignored,
//! known keys are validated and turned into [`FieldUpdate`]s that the store
//! applies one column at a time.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use thiserror::Error;

use super::dimension::Ratings;
use super::model::{parse_timestamp, Candidate};

/// Free-text fields of a candidate record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    SelfReflection,
    ReflectionConsistency,
    Conclusion,
    Notes,
    StarNotes,
    VesierNotes,
}

impl TextField {
    pub const ALL: [TextField; 6] = [
        TextField::SelfReflection,
        TextField::ReflectionConsistency,
        TextField::Conclusion,
        TextField::Notes,
        TextField::StarNotes,
        TextField::VesierNotes,
    ];

    /// JSON key and database column
    pub fn name(&self) -> &'static str {
        match self {
            TextField::SelfReflection => "self_reflection",
            TextField::ReflectionConsistency => "reflection_consistency",
            TextField::Conclusion => "conclusion",
            TextField::Notes => "notes",
            TextField::StarNotes => "star_notes",
            TextField::VesierNotes => "vesier_notes",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        TextField::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// One validated field change
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    Text(TextField, String),
    Ratings(Ratings),
    Consented(bool),
    ConsentDate(Option<DateTime<Utc>>),
}

impl FieldUpdate {
    /// Name of the field this update touches
    pub fn field_name(&self) -> &'static str {
        match self {
            FieldUpdate::Text(field, _) => field.name(),
            FieldUpdate::Ratings(_) => "ratings",
            FieldUpdate::Consented(_) => "consented",
            FieldUpdate::ConsentDate(_) => "consent_date",
        }
    }

    /// Apply this change to an in-memory record
    pub fn apply(&self, candidate: &mut Candidate) {
        match self {
            FieldUpdate::Text(field, value) => {
                let slot = match field {
                    TextField::SelfReflection => &mut candidate.self_reflection,
                    TextField::ReflectionConsistency => &mut candidate.reflection_consistency,
                    TextField::Conclusion => &mut candidate.conclusion,
                    TextField::Notes => &mut candidate.notes,
                    TextField::StarNotes => &mut candidate.star_notes,
                    TextField::VesierNotes => &mut candidate.vesier_notes,
                };
                *slot = value.clone();
            }
            FieldUpdate::Ratings(ratings) => candidate.ratings = ratings.clone(),
            FieldUpdate::Consented(consented) => candidate.consented = *consented,
            FieldUpdate::ConsentDate(date) => candidate.consent_date = *date,
        }
    }
}

/// Errors while validating a PUT body
#[derive(Debug, Error, PartialEq)]
pub enum UpdateError {
    #[error("Update body must be a JSON object")]
    NotAnObject,

    #[error("No valid fields to update")]
    NoValidFields,

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Validated set of field changes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateUpdate {
    changes: Vec<FieldUpdate>,
}

impl CandidateUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, change: FieldUpdate) -> Self {
        self.changes.push(change);
        self
    }

    pub fn changes(&self) -> &[FieldUpdate] {
        &self.changes
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn field_names(&self) -> Vec<&'static str> {
        self.changes.iter().map(FieldUpdate::field_name).collect()
    }

    /// Validate a JSON body into an update
    pub fn from_json(body: &Value) -> Result<Self, UpdateError> {
        let object = body.as_object().ok_or(UpdateError::NotAnObject)?;
        let update = Self::from_map(object)?;

        if update.is_empty() {
            return Err(UpdateError::NoValidFields);
        }
        Ok(update)
    }

    fn from_map(object: &Map<String, Value>) -> Result<Self, UpdateError> {
        let mut update = CandidateUpdate::new();

        for (key, value) in object {
            let change = match key.as_str() {
                "ratings" => FieldUpdate::Ratings(match value {
                    Value::Null => Ratings::new(),
                    v => Ratings::from_json(v).map_err(|reason| invalid(key, reason))?,
                }),
                "consented" => FieldUpdate::Consented(parse_consented(value).ok_or_else(|| {
                    invalid(key, "expected a boolean".to_string())
                })?),
                "consent_date" => FieldUpdate::ConsentDate(match value {
                    Value::Null => None,
                    Value::String(s) if s.is_empty() => None,
                    Value::String(s) => Some(parse_timestamp(s).ok_or_else(|| {
                        invalid(key, format!("cannot parse timestamp '{}'", s))
                    })?),
                    _ => return Err(invalid(key, "expected a timestamp string".to_string())),
                }),
                name => match TextField::from_name(name) {
                    Some(field) => FieldUpdate::Text(
                        field,
                        match value {
                            Value::Null => String::new(),
                            Value::String(s) => s.clone(),
                            _ => return Err(invalid(key, "expected a string".to_string())),
                        },
                    ),
                    None => {
                        tracing::debug!(field = %name, "Ignoring unknown update field");
                        continue;
                    }
                },
            };
            update.changes.push(change);
        }

        Ok(update)
    }
}

fn invalid(field: &str, reason: String) -> UpdateError {
    UpdateError::InvalidValue {
        field: field.to_string(),
        reason,
    }
}

/// Booleans, plus the 0/1 integers older clients send
fn parse_consented(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        _ => None,
    }
}
