//! Embedded DuckDB store holding the e-commerce schema.
//!
//! The store is a single DuckDB database file (or an in-memory database in
//! tests). DuckDB enforces primary key, foreign key, NOT NULL and CHECK
//! constraints on every insert, so the loader relies on it for value
//! validation.

pub mod schema;

pub use schema::{reset_sql, TableSpec, CREATE_ORDER, DROP_ORDER, LOAD_ORDER};

use crate::error::{PipelineError, Result};
use duckdb::{AccessMode, Config, Connection};
use std::path::{Path, PathBuf};

/// Default database file name
pub const DEFAULT_DB: &str = "ecommerce.duckdb";

/// One column as reported by the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub table: String,
    pub column: String,
    pub data_type: String,
    pub nullable: bool,
}

/// Owned connection to the store; closed when dropped
pub struct Store {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Store {
    /// Open (creating if needed) a database file for writing
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an existing database file read-only
    pub fn open_existing(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(PipelineError::MissingInputFile {
                path: path.to_path_buf(),
                hint: "Run `ecom-pipeline load` first.",
            });
        }
        let config = Config::default().access_mode(AccessMode::ReadOnly)?;
        let conn = Connection::open_with_flags(path, config)?;
        Ok(Self {
            conn,
            path: Some(path.to_path_buf()),
        })
    }

    /// Create an in-memory store
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
            path: None,
        })
    }

    /// Drop all five tables (children first) and recreate them empty.
    ///
    /// Safe to run any number of times; the result is always the same
    /// empty schema.
    pub fn reset_schema(&self) -> Result<()> {
        self.conn.execute_batch(&schema::reset_sql())?;
        Ok(())
    }

    /// Get list of tables in the database
    pub fn list_tables(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema = 'main' ORDER BY table_name",
        )?;
        let tables = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(tables)
    }

    /// True when all five tables exist
    pub fn has_schema(&self) -> Result<bool> {
        let tables = self.list_tables()?;
        Ok(LOAD_ORDER
            .iter()
            .all(|spec| tables.iter().any(|t| t == spec.name)))
    }

    /// Fail with [`PipelineError::StoreNotLoaded`] unless the schema exists
    pub fn require_schema(&self) -> Result<()> {
        if self.has_schema()? {
            Ok(())
        } else {
            Err(PipelineError::StoreNotLoaded {
                path: self.path.clone().unwrap_or_else(|| PathBuf::from(":memory:")),
            })
        }
    }

    /// Number of rows in one of the schema tables
    pub fn row_count(&self, spec: &TableSpec) -> Result<i64> {
        let count = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", spec.name),
            [],
            |row| row.get::<_, i64>(0),
        )?;
        Ok(count)
    }

    /// Row counts for all five tables, in load order
    pub fn row_counts(&self) -> Result<Vec<(&'static str, i64)>> {
        LOAD_ORDER
            .iter()
            .map(|spec| Ok((spec.name, self.row_count(spec)?)))
            .collect()
    }

    /// Column catalog for the schema tables, ordered by table then position
    pub fn describe_schema(&self) -> Result<Vec<ColumnInfo>> {
        let mut stmt = self.conn.prepare(
            "SELECT table_name, column_name, data_type, is_nullable \
             FROM information_schema.columns \
             WHERE table_schema = 'main' \
             ORDER BY table_name, ordinal_position",
        )?;
        let columns = stmt
            .query_map([], |row| {
                Ok(ColumnInfo {
                    table: row.get(0)?,
                    column: row.get(1)?,
                    data_type: row.get(2)?,
                    nullable: row.get::<_, String>(3)? == "YES",
                })
            })?
            .collect::<std::result::Result<Vec<ColumnInfo>, _>>()?;

        // Tables created by hand next to ours are not part of the schema
        Ok(columns
            .into_iter()
            .filter(|c| schema::table(&c.table).is_some())
            .collect())
    }

    /// Get the underlying DuckDB connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Mutable connection access, needed to open a transaction
    pub(crate) fn connection_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}
