//! API Routes
//!
//! Route handlers organized by functionality.

pub mod candidates;
pub mod export;
pub mod health;
