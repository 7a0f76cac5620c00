//! The delete builder: marks one entity deleted.

use rusqlite::{types::Value, Connection, ToSql};

use crate::{error::Result, traits::Predicate};

/// Builds one DELETE against an entity table.
pub struct DeleteQuery<'c> {
    conn: &'c Connection,
    table: &'static str,
    wheres: Vec<Box<dyn Fn(&mut Vec<Value>) -> String>>,
}

impl<'c> DeleteQuery<'c> {
    pub fn from_table(conn: &'c Connection, table: &'static str) -> Self {
        Self {
            conn,
            table,
            wheres: Vec::new(),
        }
    }

    /// Narrows the delete to rows matching `predicate`.
    pub fn filter<P: Predicate + 'static>(mut self, predicate: P) -> Self {
        self.wheres
            .push(Box::new(move |params| predicate.render(params)));
        self
    }

    /// Executes and returns the number of rows deleted.
    pub fn execute(self) -> Result<usize> {
        let (sql, params) = self.render();
        tracing::debug!(sql = %sql, "executing delete");

        let params_ref: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
        Ok(self.conn.execute(&sql, params_ref.as_slice())?)
    }

    fn render(&self) -> (String, Vec<Value>) {
        let mut params = Vec::new();
        let mut sql = format!("DELETE FROM {}", self.table);

        if !self.wheres.is_empty() {
            sql.push_str(" WHERE ");
            let conditions: Vec<String> = self.wheres.iter().map(|w| w(&mut params)).collect();
            sql.push_str(&conditions.join(" AND "));
        }

        (sql, params)
    }
}
