use projdoc_core::db::migrations::latest_version;
use projdoc_core::db::{open_store, open_store_in_memory, DbError, Store};
use rusqlite::Connection;

#[test]
fn projects_store_in_memory_applies_all_migrations() {
    let conn = open_store_in_memory(Store::Projects).unwrap();

    assert_eq!(schema_version(&conn), latest_version(Store::Projects));
    assert_table_exists(&conn, "projects");
    assert_table_exists(&conn, "project_milestones");
    assert_table_exists(&conn, "project_stages");
    assert_table_exists(&conn, "project_documents");
}

#[test]
fn documents_store_in_memory_applies_all_migrations() {
    let conn = open_store_in_memory(Store::Documents).unwrap();

    assert_eq!(schema_version(&conn), latest_version(Store::Documents));
    assert_table_exists(&conn, "documents");
    assert_table_exists(&conn, "document_versions");
    assert_table_exists(&conn, "approval_routes");
    assert_table_exists(&conn, "approval_stages");
}

#[test]
fn reopening_store_file_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(Store::Projects.file_name());

    let first = open_store(&path, Store::Projects).unwrap();
    first
        .execute(
            "INSERT INTO projects (name, type, status, start_date, end_date, manager)
             VALUES ('p', 'corporate', 'planned', '2024-01-01', '2024-02-01', 'm');",
            [],
        )
        .unwrap();
    drop(first);

    let second = open_store(&path, Store::Projects).unwrap();
    assert_eq!(schema_version(&second), latest_version(Store::Projects));
    let count: i64 = second
        .query_row("SELECT COUNT(*) FROM projects;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn store_created_by_older_tooling_is_adopted() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legacy.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE documents (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            status TEXT NOT NULL,
            author TEXT NOT NULL,
            version TEXT NOT NULL,
            creation_date TEXT,
            description TEXT,
            file_path TEXT
        );
        INSERT INTO documents (name, category, status, author, version, creation_date)
        VALUES ('Старый', 'Шаблоны', 'Черновик', 'Автор', '1.0', '2023-05-01');",
    )
    .unwrap();
    drop(conn);

    let conn = open_store(&path, Store::Documents).unwrap();
    assert_eq!(schema_version(&conn), latest_version(Store::Documents));
    assert_table_exists(&conn, "document_versions");
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_store(&path, Store::Documents).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            store,
            db_version,
            latest_supported,
        } => {
            assert_eq!(store, Store::Documents);
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version(Store::Documents));
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
