//! Contact domain model.
//!
//! # Responsibility
//! - Define the stored contact record and its editable draft form.
//! - Enforce required-field rules before persistence.
//!
//! # Invariants
//! - `id` is assigned by storage and never reused for another contact.
//! - `name` and `phone` are never empty.
//! - `email` and `address` may be empty.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned identifier of a contact.
///
/// Backed by SQLite `INTEGER PRIMARY KEY AUTOINCREMENT`.
pub type ContactId = i64;

/// Editable contact fields, without identity.
///
/// Used as the input of both create and whole-record update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
}

impl ContactDraft {
    /// Creates a draft from the four editable fields.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
        }
    }

    /// Validates required fields.
    ///
    /// # Errors
    /// - `EmptyName` when `name` is empty.
    /// - `EmptyPhone` when `phone` is empty.
    ///
    /// Whitespace-only values are accepted; trimming is up to the caller.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.is_empty() {
            return Err(ContactValidationError::EmptyName);
        }
        if self.phone.is_empty() {
            return Err(ContactValidationError::EmptyPhone);
        }
        Ok(())
    }

    /// Attaches a storage identity, producing a full record.
    pub fn into_contact(self, id: ContactId) -> Contact {
        Contact {
            id,
            name: self.name,
            phone: self.phone,
            email: self.email,
            address: self.address,
        }
    }
}

/// Stored address-book entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
}

impl Contact {
    /// Returns the editable fields of this record.
    pub fn to_draft(&self) -> ContactDraft {
        ContactDraft {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
        }
    }

    /// Validates the editable fields of a stored record.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        self.to_draft().validate()
    }
}

/// Validation errors for contact invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactValidationError {
    /// `name` is required.
    EmptyName,
    /// `phone` is required.
    EmptyPhone,
}

impl Display for ContactValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name is required"),
            Self::EmptyPhone => write!(f, "phone is required"),
        }
    }
}

impl Error for ContactValidationError {}

#[cfg(test)]
mod tests {
    use super::{ContactDraft, ContactValidationError};

    #[test]
    fn validate_accepts_empty_optional_fields() {
        let draft = ContactDraft::new("Alice", "555-0001", "", "");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_name_before_phone() {
        let draft = ContactDraft::new("", "", "", "");
        assert_eq!(draft.validate(), Err(ContactValidationError::EmptyName));
    }

    #[test]
    fn validate_rejects_empty_phone() {
        let draft = ContactDraft::new("Alice", "", "a@x.com", "");
        assert_eq!(draft.validate(), Err(ContactValidationError::EmptyPhone));
    }

    #[test]
    fn validate_accepts_whitespace_only_required_fields() {
        let draft = ContactDraft::new(" ", "\t", "", "");
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn into_contact_keeps_fields_verbatim() {
        let contact = ContactDraft::new(" Bob ", "555", "b@x.com", "2 Elm St").into_contact(7);
        assert_eq!(contact.id, 7);
        assert_eq!(contact.name, " Bob ");
        assert_eq!(contact.to_draft().address, "2 Elm St");
    }
}
