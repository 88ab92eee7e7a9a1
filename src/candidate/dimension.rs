//! Rating Dimensions
//!
//! The seven fixed dimensions a candidate is rated on, the 1-5 rating scale
//! and the sparse ratings map stored per candidate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Lowest value on the rating scale
pub const MIN_RATING: u8 = 1;
/// Highest value on the rating scale
pub const MAX_RATING: u8 = 5;

/// A rated dimension of the interview
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
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
    /// All dimensions in display order
    pub const ALL: [Dimension; 7] = [
        Dimension::Communication,
        Dimension::Teamwork,
        Dimension::ProblemSolving,
        Dimension::Expertise,
        Dimension::Motivation,
        Dimension::Reliability,
        Dimension::Adaptability,
    ];

    /// Wire name used in JSON and the database
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Communication => "communication",
            Dimension::Teamwork => "teamwork",
            Dimension::ProblemSolving => "problem_solving",
            Dimension::Expertise => "expertise",
            Dimension::Motivation => "motivation",
            Dimension::Reliability => "reliability",
            Dimension::Adaptability => "adaptability",
        }
    }

    /// Human-readable label for reports
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
}

impl Dimension {
    /// Exact match on the stored key, as used in the JSON API
    pub fn from_wire(key: &str) -> Option<Dimension> {
        Dimension::ALL.into_iter().find(|d| d.as_str() == key)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lenient parse for command-line input: case, `-` and spaces are forgiven
impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        Dimension::ALL
            .into_iter()
            .find(|d| d.as_str() == normalized)
            .ok_or_else(|| {
                format!(
                    "Unknown dimension: {}. Use one of: {}",
                    s,
                    Dimension::ALL.map(|d| d.as_str()).join(", ")
                )
            })
    }
}

/// A single rating on the 1-5 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: i64) -> Result<Self, String> {
        if (MIN_RATING as i64..=MAX_RATING as i64).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(format!(
                "Rating must be between {} and {}, got {}",
                MIN_RATING, MAX_RATING, value
            ))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Rating {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> u8 {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Sparse mapping of dimension to rating
///
/// Keys can only be [`Dimension`]s and values only [`Rating`]s, so the
/// "subset of seven dimensions, values in 1..=5" rule holds by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ratings(BTreeMap<Dimension, Rating>);

impl Ratings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, dimension: Dimension) -> Option<Rating> {
        self.0.get(&dimension).copied()
    }

    pub fn set(&mut self, dimension: Dimension, rating: Rating) {
        self.0.insert(dimension, rating);
    }

    pub fn clear(&mut self, dimension: Dimension) {
        self.0.remove(&dimension);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, Rating)> + '_ {
        self.0.iter().map(|(d, r)| (*d, *r))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Completeness of this rating set against all seven dimensions
    pub fn completeness(&self) -> Completeness {
        Completeness {
            rated: self.len(),
            required: Dimension::ALL.len(),
        }
    }

    /// Parse a ratings object, rejecting unknown dimensions and out-of-range values
    pub fn from_json(value: &serde_json::Value) -> Result<Self, String> {
        let object = value
            .as_object()
            .ok_or_else(|| "ratings must be an object".to_string())?;

        let mut ratings = Ratings::new();
        for (key, raw) in object {
            let dimension = Dimension::from_wire(key).ok_or_else(|| {
                format!(
                    "Unknown dimension: {}. Use one of: {}",
                    key,
                    Dimension::ALL.map(|d| d.as_str()).join(", ")
                )
            })?;
            let number = raw
                .as_i64()
                .ok_or_else(|| format!("Rating for {} must be an integer", key))?;
            ratings.set(dimension, Rating::new(number)?);
        }
        Ok(ratings)
    }
}

/// How many of the required dimensions have a rating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completeness {
    pub rated: usize,
    pub required: usize,
}

impl Completeness {
    pub fn is_complete(&self) -> bool {
        self.rated >= self.required
    }

    pub fn missing(&self) -> usize {
        self.required.saturating_sub(self.rated)
    }

    /// Message shown in the conclusion step
    pub fn message(&self) -> String {
        if self.is_complete() {
            format!("All {} dimensions rated", self.required)
        } else {
            format!("{} of {} dimensions rated", self.rated, self.required)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_parse() {
        assert_eq!("teamwork".parse::<Dimension>(), Ok(Dimension::Teamwork));
        assert_eq!(
            "Problem-Solving".parse::<Dimension>(),
            Ok(Dimension::ProblemSolving)
        );
        assert!("charisma".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_dimension_from_wire_is_exact() {
        assert_eq!(
            Dimension::from_wire("problem_solving"),
            Some(Dimension::ProblemSolving)
        );
        assert_eq!(Dimension::from_wire("Teamwork"), None);
        assert_eq!(Dimension::from_wire("problem-solving"), None);
        assert_eq!(Dimension::from_wire(" teamwork"), None);
    }

    #[test]
    fn test_rating_bounds() {
        assert!(Rating::new(0).is_err());
        assert!(Rating::new(6).is_err());
        assert_eq!(Rating::new(1).unwrap().value(), 1);
        assert_eq!(Rating::new(5).unwrap().value(), 5);
    }

    #[test]
    fn test_ratings_serde_shape() {
        let mut ratings = Ratings::new();
        ratings.set(Dimension::Motivation, Rating::new(4).unwrap());
        let json = serde_json::to_value(&ratings).unwrap();
        assert_eq!(json, serde_json::json!({"motivation": 4}));

        let back: Ratings = serde_json::from_value(json).unwrap();
        assert_eq!(back, ratings);
    }

    #[test]
    fn test_ratings_deserialize_rejects_out_of_range() {
        let result: Result<Ratings, _> = serde_json::from_str(r#"{"teamwork": 9}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_ratings_from_json() {
        let value = serde_json::json!({"teamwork": 3, "expertise": 5});
        let ratings = Ratings::from_json(&value).unwrap();
        assert_eq!(ratings.len(), 2);
        assert_eq!(ratings.get(Dimension::Expertise).map(|r| r.value()), Some(5));

        assert!(Ratings::from_json(&serde_json::json!({"teamwork": 2.5})).is_err());
        assert!(Ratings::from_json(&serde_json::json!({"luck": 3})).is_err());
        assert!(Ratings::from_json(&serde_json::json!({"Teamwork": 3})).is_err());
        assert!(Ratings::from_json(&serde_json::json!({"teamwork": 1, "TEAMWORK": 5})).is_err());
        assert!(Ratings::from_json(&serde_json::json!([1, 2])).is_err());
    }

    #[test]
    fn test_completeness_message_flips_when_all_rated() {
        let mut ratings = Ratings::new();
        for dimension in Dimension::ALL.into_iter().take(6) {
            ratings.set(dimension, Rating::new(3).unwrap());
        }
        let partial = ratings.completeness();
        assert!(!partial.is_complete());
        assert_eq!(partial.missing(), 1);
        assert_eq!(partial.message(), "6 of 7 dimensions rated");

        ratings.set(Dimension::Adaptability, Rating::new(2).unwrap());
        let full = ratings.completeness();
        assert!(full.is_complete());
        assert_eq!(full.message(), "All 7 dimensions rated");
    }
}
