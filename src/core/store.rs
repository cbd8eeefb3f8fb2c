//! SQLite-backed store for the shop schema
//!
//! The store owns the single connection used by an interactive session and
//! exposes a small parameterized-statement surface:
//! - `execute` for writes, returning rows affected
//! - `query` for reads, returning rows of string-rendered column values
//! - `row_count` for scalar COUNT-style queries
//! - `transaction` for wrapping multi-entity workflows
//!
//! All statements are parameterized; operator input is never interpolated
//! into SQL text.

use std::fs;
use std::path::Path;

use rusqlite::{params, Connection, ToSql, Transaction};

use crate::core::error::Result;

/// Current schema version - the database is rebuilt on version mismatch
const SCHEMA_VERSION: i32 = 1;

/// The shop database, backed by SQLite
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open or create the shop database at the given path.
    ///
    /// Creates parent directories as needed. If the schema version on disk
    /// does not match the current version, all tables are dropped and
    /// recreated.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let needs_init = !path.exists();
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;

        let store = Self { conn };

        if needs_init {
            store.init_schema()?;
        } else if store.needs_schema_rebuild()? {
            store.reinitialize_schema()?;
        }

        Ok(store)
    }

    /// Open an in-memory database (tests)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// Check whether the on-disk schema version matches the current version
    fn needs_schema_rebuild(&self) -> Result<bool> {
        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        Ok(current != SCHEMA_VERSION)
    }

    /// Drop all tables and recreate the schema
    fn reinitialize_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            DROP TABLE IF EXISTS schema_version;
            DROP TABLE IF EXISTS id_seq;
            DROP TABLE IF EXISTS closed_request;
            DROP TABLE IF EXISTS service_request;
            DROP TABLE IF EXISTS owns;
            DROP TABLE IF EXISTS car;
            DROP TABLE IF EXISTS mechanic;
            DROP TABLE IF EXISTS customer;
            "#,
        )?;
        self.init_schema()
    }

    /// Initialize the database schema
    fn init_schema(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            -- Schema version tracking
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            -- Next available id per entity kind
            CREATE TABLE IF NOT EXISTS id_seq (
                kind TEXT PRIMARY KEY,
                next_id INTEGER NOT NULL DEFAULT 1
            );

            CREATE TABLE IF NOT EXISTS customer (
                id INTEGER PRIMARY KEY,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                phone TEXT NOT NULL,
                address TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_customer_last_name ON customer(last_name);

            CREATE TABLE IF NOT EXISTS mechanic (
                id INTEGER PRIMARY KEY,
                first_name TEXT NOT NULL,
                last_name TEXT NOT NULL,
                experience INTEGER NOT NULL
            );

            -- VIN is the natural key, never generated
            CREATE TABLE IF NOT EXISTS car (
                vin TEXT PRIMARY KEY,
                make TEXT NOT NULL,
                model TEXT NOT NULL,
                year INTEGER NOT NULL
            );

            -- Many-to-many: a car may have any number of owners
            CREATE TABLE IF NOT EXISTS owns (
                ownership_id INTEGER PRIMARY KEY,
                customer_id INTEGER NOT NULL REFERENCES customer(id),
                car_vin TEXT NOT NULL REFERENCES car(vin)
            );
            CREATE INDEX IF NOT EXISTS idx_owns_customer ON owns(customer_id);
            CREATE INDEX IF NOT EXISTS idx_owns_car ON owns(car_vin);

            CREATE TABLE IF NOT EXISTS service_request (
                rid INTEGER PRIMARY KEY,
                customer_id INTEGER NOT NULL REFERENCES customer(id),
                car_vin TEXT NOT NULL REFERENCES car(vin),
                date TEXT NOT NULL,
                odometer INTEGER NOT NULL,
                complaint TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_request_customer ON service_request(customer_id);
            CREATE INDEX IF NOT EXISTS idx_request_car ON service_request(car_vin);

            CREATE TABLE IF NOT EXISTS closed_request (
                wid INTEGER PRIMARY KEY,
                rid INTEGER NOT NULL UNIQUE REFERENCES service_request(rid),
                mid INTEGER NOT NULL REFERENCES mechanic(id),
                date TEXT NOT NULL,
                comment TEXT NOT NULL,
                bill INTEGER NOT NULL
            );
            "#,
        )?;

        self.conn.execute(
            "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
            params![SCHEMA_VERSION],
        )?;

        Ok(())
    }

    /// Execute a parameterized write statement, returning rows affected
    pub fn execute(&self, sql: &str, params: &[&dyn ToSql]) -> Result<usize> {
        Ok(self.conn.execute(sql, params)?)
    }

    /// Run a parameterized query, returning each row as string-rendered
    /// column values in result order
    pub fn query(&self, sql: &str, params: &[&dyn ToSql]) -> Result<Vec<Vec<String>>> {
        let mut stmt = self.conn.prepare(sql)?;
        let column_count = stmt.column_count();

        let rows = stmt.query_map(params, |row| {
            let mut values = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let value = match row.get::<_, rusqlite::types::Value>(i)? {
                    rusqlite::types::Value::Null => "NULL".to_string(),
                    rusqlite::types::Value::Integer(n) => n.to_string(),
                    rusqlite::types::Value::Real(f) => f.to_string(),
                    rusqlite::types::Value::Text(s) => s,
                    rusqlite::types::Value::Blob(_) => "<blob>".to_string(),
                };
                values.push(value);
            }
            Ok(values)
        })?;

        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    /// Run a parameterized scalar query returning a single integer
    pub fn row_count(&self, sql: &str, params: &[&dyn ToSql]) -> Result<i64> {
        Ok(self.conn.query_row(sql, params, |row| row.get(0))?)
    }

    /// Begin a transaction. Dropping the returned handle without committing
    /// rolls back every statement issued through it.
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        Ok(self.conn.transaction()?)
    }

    /// Direct access to the connection for typed queries
    pub fn conn(&self) -> &Connection {
        &self.conn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_initializes() {
        let store = Store::open_in_memory().unwrap();
        let count = store
            .row_count(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='customer'",
                &[],
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_execute_and_query_are_parameterized() {
        let store = Store::open_in_memory().unwrap();
        let affected = store
            .execute(
                "INSERT INTO customer (id, first_name, last_name, phone, address) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                &[&1i64, &"Ana", &"O'Brien", &"555-0000", &"1 Elm St"],
            )
            .unwrap();
        assert_eq!(affected, 1);

        // The quote in the surname must survive untouched
        let rows = store
            .query(
                "SELECT id, last_name FROM customer WHERE last_name = ?1",
                &[&"O'Brien"],
            )
            .unwrap();
        assert_eq!(rows, vec![vec!["1".to_string(), "O'Brien".to_string()]]);
    }

    #[test]
    fn test_row_count() {
        let store = Store::open_in_memory().unwrap();
        let count = store
            .row_count("SELECT COUNT(*) FROM customer", &[])
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_schema_rebuild_on_version_mismatch() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("shop.db");

        {
            let store = Store::open(&path).unwrap();
            store
                .execute(
                    "INSERT INTO customer (id, first_name, last_name, phone, address) \
                     VALUES (1, 'A', 'B', 'p', 'a')",
                    &[],
                )
                .unwrap();
            store
                .execute("UPDATE schema_version SET version = 999", &[])
                .unwrap();
        }

        // Reopen: version mismatch drops and recreates all tables
        let store = Store::open(&path).unwrap();
        let count = store
            .row_count("SELECT COUNT(*) FROM customer", &[])
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_dropped_transaction_rolls_back() {
        let mut store = Store::open_in_memory().unwrap();
        {
            let tx = store.transaction().unwrap();
            tx.execute(
                "INSERT INTO customer (id, first_name, last_name, phone, address) \
                 VALUES (1, 'A', 'B', 'p', 'a')",
                [],
            )
            .unwrap();
            // dropped without commit
        }
        let count = store
            .row_count("SELECT COUNT(*) FROM customer", &[])
            .unwrap();
        assert_eq!(count, 0);
    }
}
