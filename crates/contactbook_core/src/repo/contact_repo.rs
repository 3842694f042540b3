//! Contact repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and search APIs over the `contacts` table.
//! - Keep SQL details inside core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `ContactDraft::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - List order is `name ASC, id ASC`.

use crate::db::DbError;
use crate::model::contact::{Contact, ContactDraft, ContactId, ContactValidationError};
use crate::search::filter::{build_like_pattern, like_clause, normalize_filter};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CONTACT_SELECT_SQL: &str = "SELECT
    id,
    name,
    phone,
    email,
    address
FROM contacts";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for contact persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ContactValidationError),
    Db(DbError),
    NotFound(ContactId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "contact not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted contact data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<ContactValidationError> for RepoError {
    fn from(value: ContactValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing contacts.
#[derive(Debug, Clone, Default)]
pub struct ContactListQuery {
    /// Substring matched against name, phone, email and address.
    /// `None` or empty lists everything.
    pub filter: Option<String>,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for contact CRUD operations.
pub trait ContactRepository {
    fn create_contact(&self, draft: &ContactDraft) -> RepoResult<ContactId>;
    fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<()>;
    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>>;
    fn list_contacts(&self, query: &ContactListQuery) -> RepoResult<Vec<Contact>>;
    fn delete_contact(&self, id: ContactId) -> RepoResult<()>;
    fn count_contacts(&self) -> RepoResult<u64>;
}

/// SQLite-backed contact repository.
pub struct SqliteContactRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteContactRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ContactRepository for SqliteContactRepository<'_> {
    fn create_contact(&self, draft: &ContactDraft) -> RepoResult<ContactId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO contacts (
                name,
                phone,
                email,
                address
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                draft.name.as_str(),
                draft.phone.as_str(),
                draft.email.as_str(),
                draft.address.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_contact(&self, id: ContactId, draft: &ContactDraft) -> RepoResult<()> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE contacts
             SET
                name = ?1,
                phone = ?2,
                email = ?3,
                address = ?4
             WHERE id = ?5;",
            params![
                draft.name.as_str(),
                draft.phone.as_str(),
                draft.email.as_str(),
                draft.address.as_str(),
                id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn get_contact(&self, id: ContactId) -> RepoResult<Option<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONTACT_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_contact_row(row)?));
        }

        Ok(None)
    }

    fn list_contacts(&self, query: &ContactListQuery) -> RepoResult<Vec<Contact>> {
        let mut sql = format!("{CONTACT_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(text) = normalize_filter(query.filter.as_deref()) {
            bind_values.push(Value::Text(build_like_pattern(text)));
            sql.push_str(&format!(" AND ({})", like_clause(bind_values.len())));
        }

        sql.push_str(" ORDER BY name ASC, id ASC");

        if let Some(limit) = query.limit {
            bind_values.push(Value::Integer(i64::from(limit)));
            sql.push_str(&format!(" LIMIT ?{}", bind_values.len()));
            if query.offset > 0 {
                bind_values.push(Value::Integer(i64::from(query.offset)));
                sql.push_str(&format!(" OFFSET ?{}", bind_values.len()));
            }
        } else if query.offset > 0 {
            bind_values.push(Value::Integer(i64::from(query.offset)));
            sql.push_str(&format!(" LIMIT -1 OFFSET ?{}", bind_values.len()));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut contacts = Vec::new();

        while let Some(row) = rows.next()? {
            contacts.push(parse_contact_row(row)?);
        }

        Ok(contacts)
    }

    fn delete_contact(&self, id: ContactId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?1;", [id])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn count_contacts(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative contact count `{count}`")))
    }
}

fn parse_contact_row(row: &Row<'_>) -> RepoResult<Contact> {
    let contact = Contact {
        id: row.get("id")?,
        name: row.get("name")?,
        phone: row.get("phone")?,
        email: row.get::<_, Option<String>>("email")?.unwrap_or_default(),
        address: row.get::<_, Option<String>>("address")?.unwrap_or_default(),
    };

    contact.validate().map_err(|err| {
        RepoError::InvalidData(format!("contact {} violates invariant: {err}", contact.id))
    })?;
    Ok(contact)
}
