//! Candidate Records
//!
//! Client-side view of the API's candidate record, plus the PUT bodies the
//! wizard sends back. Pure Rust so it can be unit tested off the browser.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// Number of dimensions that must be rated
pub const REQUIRED_RATINGS: usize = 7;

/// Rating scale bounds
pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// One of the seven rated dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Communication,
    Teamwork,
    ProblemSolving,
    Expertise,
    Motivation,
    Reliability,
    Adaptability,
}

impl Dimension {
    pub const ALL: [Dimension; REQUIRED_RATINGS] = [
        Dimension::Communication,
        Dimension::Teamwork,
        Dimension::ProblemSolving,
        Dimension::Expertise,
        Dimension::Motivation,
        Dimension::Reliability,
        Dimension::Adaptability,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Communication => "Communication",
            Dimension::Teamwork => "Teamwork",
            Dimension::ProblemSolving => "Problem solving",
            Dimension::Expertise => "Professional expertise",
            Dimension::Motivation => "Motivation",
            Dimension::Reliability => "Reliability",
            Dimension::Adaptability => "Adaptability",
        }
    }

    /// Guiding question shown under the rating scale
    pub fn hint(&self) -> &'static str {
        match self {
            Dimension::Communication => "Expresses ideas clearly and listens actively",
            Dimension::Teamwork => "Cooperates, shares credit, supports others",
            Dimension::ProblemSolving => "Structures problems and reaches workable solutions",
            Dimension::Expertise => "Depth of knowledge relevant to the role",
            Dimension::Motivation => "Interest in the role and drive to grow",
            Dimension::Reliability => "Keeps commitments and works carefully",
            Dimension::Adaptability => "Handles change and feedback constructively",
        }
    }
}

/// Free-text fields the wizard and sidebar edit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextField {
    SelfReflection,
    ReflectionConsistency,
    Conclusion,
    Notes,
    StarNotes,
    VesierNotes,
}

impl TextField {
    /// JSON key in the API record
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
}

/// Row in the candidate list
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub id: String,
    pub created_at: String,
    #[serde(default)]
    pub consented: bool,
}

/// Full interview record
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub created_at: String,
    #[serde(default)]
    pub consented: bool,
    #[serde(default)]
    pub consent_date: Option<String>,
    #[serde(default)]
    pub self_reflection: String,
    #[serde(default)]
    pub reflection_consistency: String,
    #[serde(default)]
    pub ratings: BTreeMap<Dimension, u8>,
    #[serde(default)]
    pub conclusion: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub star_notes: String,
    #[serde(default)]
    pub vesier_notes: String,
}

impl Candidate {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::SelfReflection => &self.self_reflection,
            TextField::ReflectionConsistency => &self.reflection_consistency,
            TextField::Conclusion => &self.conclusion,
            TextField::Notes => &self.notes,
            TextField::StarNotes => &self.star_notes,
            TextField::VesierNotes => &self.vesier_notes,
        }
    }

    pub fn set_text(&mut self, field: TextField, value: String) {
        let slot = match field {
            TextField::SelfReflection => &mut self.self_reflection,
            TextField::ReflectionConsistency => &mut self.reflection_consistency,
            TextField::Conclusion => &mut self.conclusion,
            TextField::Notes => &mut self.notes,
            TextField::StarNotes => &mut self.star_notes,
            TextField::VesierNotes => &mut self.vesier_notes,
        };
        *slot = value;
    }

    pub fn rating(&self, dimension: Dimension) -> Option<u8> {
        self.ratings.get(&dimension).copied()
    }

    /// Set a rating locally; values off the scale are ignored
    pub fn set_rating(&mut self, dimension: Dimension, value: u8) -> bool {
        if !(MIN_RATING..=MAX_RATING).contains(&value) {
            return false;
        }
        self.ratings.insert(dimension, value);
        true
    }

    pub fn set_consent(&mut self, consented: bool, now: &str) {
        self.consented = consented;
        self.consent_date = consented.then(|| now.to_string());
    }

    pub fn completeness(&self) -> Completeness {
        Completeness {
            rated: Dimension::ALL
                .iter()
                .filter(|d| self.ratings.contains_key(d))
                .count(),
            required: REQUIRED_RATINGS,
        }
    }
}

/// Display-only check shown in the conclusion step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Completeness {
    pub rated: usize,
    pub required: usize,
}

impl Completeness {
    pub fn is_complete(&self) -> bool {
        self.rated >= self.required
    }

    pub fn message(&self) -> String {
        if self.is_complete() {
            format!("All {} dimensions rated", self.required)
        } else {
            format!("{} of {} dimensions rated", self.rated, self.required)
        }
    }
}

// ============ PUT Bodies ============

pub fn text_update(field: TextField, value: &str) -> Value {
    let mut body = serde_json::Map::new();
    body.insert(field.name().to_string(), Value::String(value.to_string()));
    Value::Object(body)
}

/// The API replaces the whole mapping, so always send every rating
pub fn ratings_update(candidate: &Candidate) -> Value {
    json!({ "ratings": candidate.ratings })
}

pub fn consent_update(candidate: &Candidate) -> Value {
    json!({
        "consented": candidate.consented,
        "consent_date": candidate.consent_date,
    })
}

// ============ Delete Confirmation ============

pub fn delete_prompt(id: &str) -> String {
    format!("Delete candidate {}? This cannot be undone.", id)
}

/// Ask before deleting; the request is only sent when this returns true
pub fn confirm_delete(id: &str, confirm: impl FnOnce(&str) -> bool) -> bool {
    confirm(&delete_prompt(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> Candidate {
        serde_json::from_value(json!({
            "id": "BW-2026-00017",
            "created_at": "2026-03-01T09:30:00Z",
            "consented": false,
            "consent_date": null,
            "self_reflection": "",
            "ratings": {},
            "conclusion": "",
            "notes": ""
        }))
        .unwrap()
    }

    #[test]
    fn test_fresh_candidate_is_empty() {
        let candidate = fresh();
        assert!(!candidate.consented);
        assert!(candidate.consent_date.is_none());
        assert!(candidate.ratings.is_empty());
        assert_eq!(candidate.star_notes, "");
        assert_eq!(candidate.completeness().message(), "0 of 7 dimensions rated");
    }

    #[test]
    fn test_completeness_flips_when_all_rated() {
        let mut candidate = fresh();
        for (i, dimension) in Dimension::ALL.into_iter().enumerate() {
            assert!(!candidate.completeness().is_complete());
            candidate.set_rating(dimension, (i % 5) as u8 + 1);
        }
        assert!(candidate.completeness().is_complete());
        assert_eq!(candidate.completeness().message(), "All 7 dimensions rated");
    }

    #[test]
    fn test_set_rating_rejects_out_of_scale() {
        let mut candidate = fresh();
        assert!(!candidate.set_rating(Dimension::Teamwork, 0));
        assert!(!candidate.set_rating(Dimension::Teamwork, 6));
        assert!(candidate.set_rating(Dimension::Teamwork, 5));
        assert_eq!(candidate.rating(Dimension::Teamwork), Some(5));
    }

    #[test]
    fn test_ratings_body_carries_whole_map() {
        let mut candidate = fresh();
        candidate.set_rating(Dimension::ProblemSolving, 4);
        candidate.set_rating(Dimension::Communication, 2);
        assert_eq!(
            ratings_update(&candidate),
            json!({ "ratings": { "communication": 2, "problem_solving": 4 } })
        );
    }

    #[test]
    fn test_text_and_consent_bodies() {
        assert_eq!(
            text_update(TextField::VesierNotes, "Ve: calm"),
            json!({ "vesier_notes": "Ve: calm" })
        );

        let mut candidate = fresh();
        candidate.set_consent(true, "2026-03-01T10:00:00Z");
        assert_eq!(
            consent_update(&candidate),
            json!({ "consented": true, "consent_date": "2026-03-01T10:00:00Z" })
        );

        candidate.set_consent(false, "2026-03-01T11:00:00Z");
        assert_eq!(
            consent_update(&candidate),
            json!({ "consented": false, "consent_date": null })
        );
    }

    #[test]
    fn test_set_text_round_trips_through_accessor() {
        let mut candidate = fresh();
        candidate.set_text(TextField::ReflectionConsistency, "Matches".to_string());
        assert_eq!(candidate.text(TextField::ReflectionConsistency), "Matches");
    }

    #[test]
    fn test_declined_delete_sends_nothing() {
        let mut asked = None;
        let confirmed = confirm_delete("BW-2026-00017", |msg| {
            asked = Some(msg.to_string());
            false
        });
        assert!(!confirmed);
        assert_eq!(
            asked.as_deref(),
            Some("Delete candidate BW-2026-00017? This cannot be undone.")
        );

        assert!(confirm_delete("BW-2026-00017", |_| true));
    }
}
