//! Contact use-case service.
//!
//! # Responsibility
//! - Provide add/update/delete/search entry points for core callers.
//! - Return stored records after writes so callers can re-render directly.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.
//! - `update_contact` uses whole-record replacement semantics.

use crate::model::contact::{Contact, ContactDraft, ContactId};
use crate::repo::contact_repo::{ContactListQuery, ContactRepository, RepoError, RepoResult};

/// Use-case service wrapper for contact operations.
pub struct ContactService<R: ContactRepository> {
    repo: R,
}

impl<R: ContactRepository> ContactService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Adds a new contact and returns the stored record with its assigned ID.
    pub fn add_contact(&self, draft: ContactDraft) -> RepoResult<Contact> {
        let id = self.repo.create_contact(&draft)?;
        self.read_back(id)
    }

    /// Replaces all editable fields of an existing contact.
    ///
    /// Returns repository-level not-found or validation errors unchanged.
    pub fn update_contact(&self, id: ContactId, draft: ContactDraft) -> RepoResult<Contact> {
        self.repo.update_contact(id, &draft)?;
        self.read_back(id)
    }

    /// Permanently deletes a contact by ID.
    pub fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        self.repo.delete_contact(id)
    }

    /// Gets one contact by ID.
    pub fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        self.repo.get_contact(id)
    }

    /// Lists contacts using filter and pagination options.
    pub fn list_contacts(&self, query: &ContactListQuery) -> RepoResult<Vec<Contact>> {
        self.repo.list_contacts(query)
    }

    /// Lists every contact matching `filter`, or all contacts when blank.
    pub fn search_contacts(&self, filter: Option<&str>) -> RepoResult<Vec<Contact>> {
        let query = ContactListQuery {
            filter: filter.map(str::to_owned),
            ..ContactListQuery::default()
        };
        self.repo.list_contacts(&query)
    }

    /// Returns the number of stored contacts.
    pub fn count_contacts(&self) -> RepoResult<u64> {
        self.repo.count_contacts()
    }

    fn read_back(&self, id: ContactId) -> RepoResult<Contact> {
        self.repo.get_contact(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("contact {id} missing right after write"))
        })
    }
}
