//! Owned contact store handle.
//!
//! # Responsibility
//! - Own the single SQLite connection used by the contact book.
//! - Serialize operations and map repository errors to the UI boundary.
//! - Emit metadata-only diagnostic events per operation.
//!
//! # Invariants
//! - Every operation holds the connection lock for its whole duration and
//!   releases it on every exit path.
//! - Contact field values never appear in log lines.
//! - Opening a store always leaves the schema initialized.

use crate::db::migrations::apply_migrations;
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
use crate::repo::contact_repo::{ContactListQuery, RepoError, RepoResult, SqliteContactRepository};
use crate::service::contact_service::ContactService;
use log::{debug, error, info, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error surfaced to UI callers of [`ContactStore`].
#[derive(Debug)]
pub enum StoreError {
    /// Required field missing; nothing was written.
    Validation(ContactValidationError),
    /// Target contact does not exist; nothing was written.
    NotFound(ContactId),
    /// Lower-level storage failure.
    Storage(RepoError),
    /// A previous operation panicked while holding the connection.
    LockPoisoned,
}

impl StoreError {
    /// Stable machine-readable code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::NotFound(_) => "not_found",
            Self::Storage(_) => "storage_failed",
            Self::LockPoisoned => "lock_poisoned",
        }
    }

    fn is_caller_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_))
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::LockPoisoned => write!(f, "contact store is unavailable after a failed operation"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::NotFound(_) | Self::LockPoisoned => None,
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::NotFound(id) => Self::NotFound(id),
            other => Self::Storage(other),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Storage(RepoError::Db(value))
    }
}

/// Single owned storage handle for contacts.
///
/// `Send + Sync`: concurrent callers are serialized on the inner lock.
pub struct ContactStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl ContactStore {
    /// Opens (or creates) the contacts database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let conn = open_db(&path)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path),
        })
    }

    /// Opens a store that lives only as long as this handle.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = open_db_in_memory()?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Database file backing this store, `None` for in-memory stores.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Ensures the contacts table exists. Idempotent.
    pub fn initialize(&self) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self
            .conn
            .lock()
            .map_err(|_| StoreError::LockPoisoned)
            .and_then(|mut conn| apply_migrations(&mut conn).map_err(StoreError::from));
        log_outcome("store_init", started_at, &result, None);
        result
    }

    /// Lists contacts matching `filter` ordered by name.
    ///
    /// A `None` or empty filter lists everything.
    pub fn list(&self, filter: Option<&str>) -> StoreResult<Vec<Contact>> {
        let started_at = Instant::now();
        let result = self.with_service(|service| service.search_contacts(filter));
        match &result {
            Ok(contacts) => debug!(
                "event=contact_list module=store status=ok filtered={} count={} duration_ms={}",
                filter.is_some_and(|text| !text.is_empty()),
                contacts.len(),
                started_at.elapsed().as_millis()
            ),
            Err(_) => log_outcome("contact_list", started_at, &result, None),
        }
        result
    }

    /// Lists contacts with pagination options.
    pub fn list_page(&self, query: &ContactListQuery) -> StoreResult<Vec<Contact>> {
        let started_at = Instant::now();
        let result = self.with_service(|service| service.list_contacts(query));
        log_outcome("contact_list_page", started_at, &result, None);
        result
    }

    /// Gets one contact by ID.
    pub fn get(&self, id: ContactId) -> StoreResult<Option<Contact>> {
        let started_at = Instant::now();
        let result = self.with_service(|service| service.get_contact(id));
        log_outcome("contact_get", started_at, &result, Some(id));
        result
    }

    /// Adds a contact and returns it with its assigned ID.
    pub fn add(&self, draft: ContactDraft) -> StoreResult<Contact> {
        let started_at = Instant::now();
        let result = self.with_service(|service| service.add_contact(draft));
        let id = result.as_ref().ok().map(|contact| contact.id);
        log_outcome("contact_add", started_at, &result, id);
        result
    }

    /// Replaces all editable fields of contact `id`.
    pub fn update(&self, id: ContactId, draft: ContactDraft) -> StoreResult<Contact> {
        let started_at = Instant::now();
        let result = self.with_service(|service| service.update_contact(id, draft));
        log_outcome("contact_update", started_at, &result, Some(id));
        result
    }

    /// Permanently deletes contact `id`.
    pub fn delete(&self, id: ContactId) -> StoreResult<()> {
        let started_at = Instant::now();
        let result = self.with_service(|service| service.delete_contact(id));
        log_outcome("contact_delete", started_at, &result, Some(id));
        result
    }

    /// Returns the number of stored contacts.
    pub fn count(&self) -> StoreResult<u64> {
        let started_at = Instant::now();
        let result = self.with_service(|service| service.count_contacts());
        log_outcome("contact_count", started_at, &result, None);
        result
    }

    fn with_service<T>(
        &self,
        f: impl FnOnce(&ContactService<SqliteContactRepository<'_>>) -> RepoResult<T>,
    ) -> StoreResult<T> {
        let conn = self.conn.lock().map_err(|_| StoreError::LockPoisoned)?;
        let service = ContactService::new(SqliteContactRepository::new(&conn));
        f(&service).map_err(StoreError::from)
    }
}

fn log_outcome<T>(
    event: &str,
    started_at: Instant,
    result: &StoreResult<T>,
    contact_id: Option<ContactId>,
) {
    let duration_ms = started_at.elapsed().as_millis();
    let contact_id = contact_id.map_or_else(|| "-".to_string(), |id| id.to_string());
    match result {
        Ok(_) => info!(
            "event={event} module=store status=ok contact_id={contact_id} duration_ms={duration_ms}"
        ),
        Err(err) if err.is_caller_error() => warn!(
            "event={event} module=store status=rejected contact_id={contact_id} duration_ms={duration_ms} error_code={}",
            err.code()
        ),
        Err(err) => error!(
            "event={event} module=store status=error contact_id={contact_id} duration_ms={duration_ms} error_code={} error={err}",
            err.code()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactStore, StoreError};
    use crate::model::contact::ContactDraft;
    use crate::repo::contact_repo::RepoError;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn store_is_shareable_across_threads() {
        assert_send_sync::<ContactStore>();
    }

    #[test]
    fn repo_errors_map_to_boundary_kinds() {
        assert!(matches!(
            StoreError::from(RepoError::NotFound(4)),
            StoreError::NotFound(4)
        ));
        assert!(matches!(
            StoreError::from(RepoError::InvalidData("x".to_string())),
            StoreError::Storage(_)
        ));
    }

    #[test]
    fn in_memory_store_has_no_path() {
        let store = ContactStore::open_in_memory().unwrap();
        assert!(store.path().is_none());
        store.initialize().unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn failed_add_reports_validation_code() {
        let store = ContactStore::open_in_memory().unwrap();
        let err = store
            .add(ContactDraft::new("Alice", "", "", ""))
            .unwrap_err();
        assert_eq!(err.code(), "validation_failed");
    }
}
