//! The update builder: marks one entity modified.

use rusqlite::{types::Value, Connection, ToSql};

use crate::{error::Result, expr::Col, traits::Predicate};

/// Builds one UPDATE against an entity table.
pub struct UpdateQuery<'c> {
    conn: &'c Connection,
    table: &'static str,
    sets: Vec<(&'static str, Value)>,
    wheres: Vec<Box<dyn Fn(&mut Vec<Value>) -> String>>,
}

impl<'c> UpdateQuery<'c> {
    pub fn table(conn: &'c Connection, table: &'static str) -> Self {
        Self {
            conn,
            table,
            sets: Vec::new(),
            wheres: Vec::new(),
        }
    }

    /// Sets one column.
    pub fn set<T, V: Into<Value>>(mut self, col: Col<T>, value: V) -> Self {
        self.sets.push((col.name, value.into()));
        self
    }

    /// Sets every column from pre-rendered pairs, as produced by
    /// [`crate::Entity::to_row`].
    pub fn set_row(mut self, row: Vec<(&'static str, Value)>) -> Self {
        self.sets.extend(row);
        self
    }

    /// Narrows the update to rows matching `predicate`.
    pub fn filter<P: Predicate + 'static>(mut self, predicate: P) -> Self {
        self.wheres
            .push(Box::new(move |params| predicate.render(params)));
        self
    }

    /// Executes and returns the number of rows changed.
    pub fn execute(self) -> Result<usize> {
        let (sql, params) = self.render();
        tracing::debug!(sql = %sql, "executing update");

        let params_ref: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
        Ok(self.conn.execute(&sql, params_ref.as_slice())?)
    }

    fn render(&self) -> (String, Vec<Value>) {
        let mut params = Vec::new();

        let sets: Vec<String> = self
            .sets
            .iter()
            .map(|(column, value)| {
                params.push(value.clone());
                format!("{column} = ?")
            })
            .collect();

        let mut sql = format!("UPDATE {} SET {}", self.table, sets.join(", "));

        if !self.wheres.is_empty() {
            sql.push_str(" WHERE ");
            let conditions: Vec<String> = self.wheres.iter().map(|w| w(&mut params)).collect();
            sql.push_str(&conditions.join(" AND "));
        }

        (sql, params)
    }
}
