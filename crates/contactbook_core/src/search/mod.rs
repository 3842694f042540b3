//! Contact search filter.
//!
//! # Responsibility
//! - Turn free-text search box input into a safe SQL `LIKE` pattern.
//! - Keep matching rules in one place for the repository queries.
//!
//! # See also
//! - `repo::contact_repo` for the query that consumes these patterns.

pub mod filter;
