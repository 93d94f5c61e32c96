//! Live schema introspection and verification.

use super::TelemetryStore;
use crate::{
    error::{TelemetryError, TelemetryResult},
    schema::{ColumnDef, TableDef, PARENT_TABLE, TABLES},
};
use rusqlite::params;

/// One row of `pragma_table_info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub decl_type: String,
    pub not_null: bool,
    pub primary_key: bool,
}

impl ColumnInfo {
    fn matches(&self, def: &ColumnDef) -> bool {
        self.name == def.name
            && self.decl_type.eq_ignore_ascii_case(def.decl_type)
            && self.not_null == def.not_null
            && self.primary_key == def.primary_key
    }
}

/// One row of `pragma_foreign_key_list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyInfo {
    pub from: String,
    pub table: String,
    pub to: Option<String>,
}

impl TelemetryStore {
    /// User tables present in the database, sorted by name.
    pub fn table_names(&self) -> TelemetryResult<Vec<String>> {
        let mut stmt = self.conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Columns of `table` in declaration order. Empty if the table is absent.
    pub fn columns(&self, table: &str) -> TelemetryResult<Vec<ColumnInfo>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, type, \"notnull\", pk FROM pragma_table_info(?1) ORDER BY cid",
        )?;
        let rows = stmt.query_map(params![table], |row| {
            Ok(ColumnInfo {
                name: row.get(0)?,
                decl_type: row.get(1)?,
                not_null: row.get::<_, i64>(2)? != 0,
                primary_key: row.get::<_, i64>(3)? != 0,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    pub fn foreign_keys(&self, table: &str) -> TelemetryResult<Vec<ForeignKeyInfo>> {
        let mut stmt = self.conn.prepare(
            "SELECT \"from\", \"table\", \"to\" FROM pragma_foreign_key_list(?1) ORDER BY id, seq",
        )?;
        let rows = stmt.query_map(params![table], |row| {
            Ok(ForeignKeyInfo {
                from: row.get(0)?,
                table: row.get(1)?,
                to: row.get(2)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Check every table against its definition.
    /// Reports the first difference found.
    pub fn verify(&self) -> TelemetryResult<()> {
        for table in TABLES.iter() {
            self.verify_table(table)?;
        }
        log::info!("schema: verified {} tables", TABLES.len());
        Ok(())
    }

    fn verify_table(&self, table: &TableDef) -> TelemetryResult<()> {
        let mismatch = |detail: String| TelemetryError::SchemaMismatch {
            table: table.name.to_string(),
            detail,
        };

        let live = self.columns(table.name)?;
        if live.is_empty() {
            return Err(mismatch("table does not exist".into()));
        }
        if live.len() != table.columns.len() {
            return Err(mismatch(format!(
                "expected {} columns, found {}",
                table.columns.len(),
                live.len()
            )));
        }
        for (actual, expected) in live.iter().zip(table.columns) {
            if !actual.matches(expected) {
                return Err(mismatch(format!(
                    "expected {expected:?}, found {actual:?}"
                )));
            }
        }

        if let Some(column) = table.run_reference {
            let refs = self.foreign_keys(table.name)?;
            let linked = refs.iter().any(|fk| {
                fk.from == column
                    && fk.table == PARENT_TABLE
                    && fk.to.as_deref().map_or(true, |to| to == "id")
            });
            if !linked {
                return Err(mismatch(format!(
                    "missing foreign key {column} -> {PARENT_TABLE}(id)"
                )));
            }
        }
        Ok(())
    }
}
