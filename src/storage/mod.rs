//! Candidate storage
//!
//! SQLite persistence for interview records.
//!
//! # Layout
//!
//! ```text
//! <database_path>            (e.g. ~/.local/share/interviewer/candidates.db)
//!   candidates               one row per candidate
//!     id                     BW-YYYY-NNNNN, primary key
//!     created_at             RFC 3339
//!     ratings                JSON object {dimension: 1..=5}
//!     consented/consent_date consent given in the intro step
//!     ...text columns        reflection, conclusion, notes
//! ```

mod error;
mod store;

pub use error::{StorageError, StorageResult};
pub use store::CandidateStore;
