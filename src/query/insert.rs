//! The insert builder: marks one entity added.

use rusqlite::{types::Value, Connection, ToSql};

use crate::{error::Result, expr::Col};

/// Builds one INSERT into an entity table.
pub struct InsertQuery<'c> {
    conn: &'c Connection,
    table: &'static str,
    columns: Vec<&'static str>,
    values: Vec<Value>,
}

impl<'c> InsertQuery<'c> {
    pub fn into_table(conn: &'c Connection, table: &'static str) -> Self {
        Self {
            conn,
            table,
            columns: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Sets one column.
    pub fn set<T, V: Into<Value>>(mut self, col: Col<T>, value: V) -> Self {
        self.columns.push(col.name);
        self.values.push(value.into());
        self
    }

    /// Sets every column from pre-rendered pairs, as produced by
    /// [`crate::Entity::to_row`].
    pub fn set_row(mut self, row: Vec<(&'static str, Value)>) -> Self {
        for (column, value) in row {
            self.columns.push(column);
            self.values.push(value);
        }
        self
    }

    /// Executes the insert and returns the store-assigned rowid.
    pub fn execute(self) -> Result<i64> {
        let (sql, params) = self.render();
        tracing::debug!(sql = %sql, "executing insert");

        let params_ref: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
        self.conn.execute(&sql, params_ref.as_slice())?;
        Ok(self.conn.last_insert_rowid())
    }

    fn render(&self) -> (String, Vec<Value>) {
        let columns = self.columns.join(", ");
        let placeholders = vec!["?"; self.values.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table, columns, placeholders
        );
        (sql, self.values.clone())
    }
}
