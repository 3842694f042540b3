use contactbook_core::db::open_db_in_memory;
use contactbook_core::{
    ContactDraft, ContactListQuery, ContactRepository, ContactService, RepoError,
    SqliteContactRepository,
};
use rusqlite::Connection;

fn alice() -> ContactDraft {
    ContactDraft::new("Alice Smith", "555-0001", "a@x.com", "1 Main St")
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let id = repo.create_contact(&alice()).unwrap();

    let loaded = repo.get_contact(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.to_draft(), alice());
}

#[test]
fn get_missing_contact_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    assert!(repo.get_contact(42).unwrap().is_none());
}

#[test]
fn update_replaces_whole_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);
    let id = repo.create_contact(&alice()).unwrap();

    let replacement = ContactDraft::new("Alice Jones", "555-0009", "", "");
    repo.update_contact(id, &replacement).unwrap();

    let loaded = repo.get_contact(id).unwrap().unwrap();
    assert_eq!(loaded.to_draft(), replacement);
}

#[test]
fn update_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let err = repo.update_contact(99, &alice()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(99)));
    assert_eq!(repo.count_contacts().unwrap(), 0);
}

#[test]
fn delete_removes_row_and_second_delete_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);
    let id = repo.create_contact(&alice()).unwrap();

    repo.delete_contact(id).unwrap();
    assert!(repo.get_contact(id).unwrap().is_none());

    let err = repo.delete_contact(id).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(missing) if missing == id));
}

#[test]
fn validation_failure_blocks_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let create_err = repo
        .create_contact(&ContactDraft::new("", "555-1234", "", ""))
        .unwrap_err();
    assert!(matches!(create_err, RepoError::Validation(_)));
    assert_eq!(repo.count_contacts().unwrap(), 0);

    let id = repo.create_contact(&alice()).unwrap();
    let update_err = repo
        .update_contact(id, &ContactDraft::new("Alice", "", "", ""))
        .unwrap_err();
    assert!(matches!(update_err, RepoError::Validation(_)));
    assert_eq!(repo.get_contact(id).unwrap().unwrap().to_draft(), alice());
}

#[test]
fn list_orders_by_name_then_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);
    for name in ["Charlie", "Alice", "Bob", "Alice"] {
        repo.create_contact(&ContactDraft::new(name, "555", "", ""))
            .unwrap();
    }

    let listed = repo.list_contacts(&ContactListQuery::default()).unwrap();
    let names = listed.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, ["Alice", "Alice", "Bob", "Charlie"]);
    assert!(listed[0].id < listed[1].id);
}

#[test]
fn list_supports_limit_and_offset() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);
    for name in ["Dana", "Carl", "Bea", "Abe"] {
        repo.create_contact(&ContactDraft::new(name, "555", "", ""))
            .unwrap();
    }

    let page = repo
        .list_contacts(&ContactListQuery {
            limit: Some(2),
            offset: 1,
            ..ContactListQuery::default()
        })
        .unwrap();
    let names = page.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, ["Bea", "Carl"]);

    let tail = repo
        .list_contacts(&ContactListQuery {
            offset: 3,
            ..ContactListQuery::default()
        })
        .unwrap();
    assert_eq!(tail.len(), 1);
    assert_eq!(tail[0].name, "Dana");
}

#[test]
fn filtered_list_combines_with_pagination() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);
    for (name, phone) in [("Ann", "111"), ("Ben", "222"), ("Cid", "111"), ("Dot", "111")] {
        repo.create_contact(&ContactDraft::new(name, phone, "", ""))
            .unwrap();
    }

    let page = repo
        .list_contacts(&ContactListQuery {
            filter: Some("111".to_string()),
            limit: Some(1),
            offset: 1,
        })
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].name, "Cid");
}

#[test]
fn legacy_null_optional_fields_read_as_empty() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO contacts (name, phone, email, address) VALUES ('Old', '555', NULL, NULL);",
        [],
    )
    .unwrap();
    let repo = SqliteContactRepository::new(&conn);

    let listed = repo.list_contacts(&ContactListQuery::default()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].email, "");
    assert_eq!(listed[0].address, "");
}

#[test]
fn invalid_persisted_row_is_reported_not_masked() {
    let conn = open_db_in_memory().unwrap();
    insert_raw(&conn, "", "555");
    let repo = SqliteContactRepository::new(&conn);

    let err = repo.list_contacts(&ContactListQuery::default()).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn service_returns_stored_records_after_writes() {
    let conn = open_db_in_memory().unwrap();
    let service = ContactService::new(SqliteContactRepository::new(&conn));

    let created = service.add_contact(alice()).unwrap();
    assert_eq!(created.name, "Alice Smith");

    let updated = service
        .update_contact(created.id, ContactDraft::new("Al", "1", "", ""))
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Al");

    assert_eq!(service.search_contacts(Some("al")).unwrap(), vec![updated]);
    assert_eq!(service.count_contacts().unwrap(), 1);
}

fn insert_raw(conn: &Connection, name: &str, phone: &str) {
    conn.execute(
        "INSERT INTO contacts (name, phone, email, address) VALUES (?1, ?2, '', '');",
        [name, phone],
    )
    .unwrap();
}
