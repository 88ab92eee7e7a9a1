//! Candidate Domain
//!
//! Types shared by the store, the REST API, the report renderer and the CLI:
//!
//! - [`Candidate`]: the interview record
//! - [`Dimension`], [`Rating`], [`Ratings`]: the seven-dimension rating scale
//! - [`CandidateUpdate`]: validated partial updates keyed by field name

pub mod dimension;
pub mod model;
pub mod update;

pub use dimension::{Completeness, Dimension, Rating, Ratings, MAX_RATING, MIN_RATING};
pub use model::{
    format_timestamp, generate_candidate_id, parse_timestamp, Candidate, CandidateSummary,
};
pub use update::{CandidateUpdate, FieldUpdate, TextField, UpdateError};
