//! Contact book domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep validation rules next to the records they protect.
//!
//! # Invariants
//! - Every stored contact is identified by a storage-assigned `ContactId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod contact;
