//! Sequence-backed identifier allocation
//!
//! Each integer-keyed entity kind draws ids from a per-kind counter in the
//! `id_seq` table. The counter is clamped against `MAX(id) + 1` of the
//! kind's table so rows inserted outside the allocator (fixtures, imports)
//! can never cause a collision. Read and write happen on the same
//! connection, so allocation inside a transaction is atomic with the insert
//! that uses the id.

use rusqlite::{params, Connection, OptionalExtension};

use crate::core::error::Result;

/// Entity kinds with allocator-assigned integer ids.
///
/// Cars are absent: the VIN is a caller-supplied natural key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Customer,
    Mechanic,
    Ownership,
    Request,
    ClosedRequest,
}

impl EntityKind {
    /// Counter key in `id_seq`
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Customer => "customer",
            EntityKind::Mechanic => "mechanic",
            EntityKind::Ownership => "ownership",
            EntityKind::Request => "request",
            EntityKind::ClosedRequest => "closed_request",
        }
    }

    fn table(&self) -> &'static str {
        match self {
            EntityKind::Customer => "customer",
            EntityKind::Mechanic => "mechanic",
            EntityKind::Ownership => "owns",
            EntityKind::Request => "service_request",
            EntityKind::ClosedRequest => "closed_request",
        }
    }

    fn id_column(&self) -> &'static str {
        match self {
            EntityKind::Customer | EntityKind::Mechanic => "id",
            EntityKind::Ownership => "ownership_id",
            EntityKind::Request => "rid",
            EntityKind::ClosedRequest => "wid",
        }
    }
}

/// Allocate the next id for an entity kind.
///
/// Monotonic within a single-writer session: two sequential calls for the
/// same kind never return the same value.
pub fn next_id(conn: &Connection, kind: EntityKind) -> Result<i64> {
    let reserved: Option<i64> = conn
        .query_row(
            "SELECT next_id FROM id_seq WHERE kind = ?1",
            params![kind.as_str()],
            |row| row.get(0),
        )
        .optional()?;

    // Table and column names come from the enum above, never from input.
    let floor: i64 = conn.query_row(
        &format!(
            "SELECT COALESCE(MAX({}), 0) + 1 FROM {}",
            kind.id_column(),
            kind.table()
        ),
        [],
        |row| row.get(0),
    )?;

    let id = reserved.unwrap_or(1).max(floor);

    conn.execute(
        "INSERT OR REPLACE INTO id_seq (kind, next_id) VALUES (?1, ?2)",
        params![kind.as_str(), id + 1],
    )?;

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::store::Store;

    #[test]
    fn test_allocation_is_monotonic() {
        let store = Store::open_in_memory().unwrap();
        let a = next_id(store.conn(), EntityKind::Customer).unwrap();
        let b = next_id(store.conn(), EntityKind::Customer).unwrap();
        assert!(b > a);
    }

    #[test]
    fn test_kinds_have_independent_counters() {
        let store = Store::open_in_memory().unwrap();
        let a = next_id(store.conn(), EntityKind::Customer).unwrap();
        let b = next_id(store.conn(), EntityKind::Ownership).unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, 1);
    }

    #[test]
    fn test_allocator_skips_rows_inserted_externally() {
        let store = Store::open_in_memory().unwrap();
        store
            .execute(
                "INSERT INTO customer (id, first_name, last_name, phone, address) \
                 VALUES (7, 'Dana', 'Kim', '555-2222', '9 Oak Ave')",
                &[],
            )
            .unwrap();

        let id = next_id(store.conn(), EntityKind::Customer).unwrap();
        assert_eq!(id, 8);
    }

    #[test]
    fn test_first_id_is_one() {
        let store = Store::open_in_memory().unwrap();
        assert_eq!(next_id(store.conn(), EntityKind::Request).unwrap(), 1);
    }
}
