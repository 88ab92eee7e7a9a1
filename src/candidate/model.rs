//! Candidate Records
//!
//! The interview record kept per candidate and the summary shown in lists.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::dimension::Ratings;

/// Prefix of every anonymised candidate id
pub const ID_PREFIX: &str = "BW";

/// Full interview record for one candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub consented: bool,
    #[serde(default)]
    pub consent_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub self_reflection: String,
    #[serde(default)]
    pub reflection_consistency: String,
    #[serde(default)]
    pub ratings: Ratings,
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
    /// A fresh record with every interview field empty
    pub fn new(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            created_at,
            consented: false,
            consent_date: None,
            self_reflection: String::new(),
            reflection_consistency: String::new(),
            ratings: Ratings::new(),
            conclusion: String::new(),
            notes: String::new(),
            star_notes: String::new(),
            vesier_notes: String::new(),
        }
    }

    pub fn summary(&self) -> CandidateSummary {
        CandidateSummary {
            id: self.id.clone(),
            created_at: self.created_at,
            consented: self.consented,
        }
    }
}

/// Row in the candidate list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateSummary {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub consented: bool,
}

/// Generate an anonymised id of the form `BW-YYYY-NNNNN`
pub fn generate_candidate_id(now: DateTime<Utc>) -> String {
    let number = uuid::Uuid::new_v4().as_u128() % 100_000;
    format!("{}-{}-{:05}", ID_PREFIX, now.year(), number)
}

/// Format a timestamp the way it is stored and sent over the wire
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a stored or client-supplied timestamp
///
/// Accepts RFC 3339 and the naive `YYYY-MM-DDTHH:MM:SS[.f]` form (read as UTC).
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
