//! The read-side query builder.

use std::marker::PhantomData;

use rusqlite::{types::Value, Connection, ToSql};

use crate::{
    error::Result,
    fetch::Include,
    order::OrderSpec,
    query::clause::WhereClause,
    traits::{FromRow, Predicate},
};

/// Builds one SELECT over an entity table.
///
/// `R` is the result shape: the entity itself for identity reads, or any
/// [`FromRow`] projection shape when a column subset is selected. Results
/// are materialized, detached snapshots.
///
/// Clause order in the rendered statement is fixed: joins, WHERE,
/// ORDER BY, then the page window, so ordering always applies before
/// skip/take.
pub struct SelectQuery<'c, R> {
    conn: &'c Connection,
    table: &'static str,
    columns: Vec<String>,
    joins: Vec<String>,
    wheres: Vec<WhereClause>,
    orders: Vec<OrderSpec>,
    skip: u32,
    take: u32,
    _shape: PhantomData<R>,
}

impl<'c, R> SelectQuery<'c, R> {
    /// Starts a query over `table` on the given session connection.
    pub fn over(conn: &'c Connection, table: &'static str) -> Self {
        Self {
            conn,
            table,
            columns: Vec::new(),
            joins: Vec::new(),
            wheres: Vec::new(),
            orders: Vec::new(),
            skip: 0,
            take: 0,
            _shape: PhantomData,
        }
    }

    /// Applies an eager-load hint.
    pub fn include(mut self, include: Include) -> Self {
        self.joins.push(include.clause);
        self
    }

    /// Narrows the result to rows matching `predicate`.
    pub fn filter<P: Predicate + 'static>(self, predicate: P) -> Self {
        self.filter_clause(WhereClause::from_predicate(predicate))
    }

    pub(crate) fn filter_clause(mut self, clause: WhereClause) -> Self {
        self.wheres.push(clause);
        self
    }

    /// Projects onto the given select expressions instead of `*`.
    pub(crate) fn columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }

    /// Adds an ORDER BY term.
    pub fn order_by(mut self, order: OrderSpec) -> Self {
        self.orders.push(order);
        self
    }

    /// Drops the first `n` rows. Zero is a no-op.
    pub fn skip(mut self, n: u32) -> Self {
        self.skip = n;
        self
    }

    /// Caps the result at `n` rows. Zero is a no-op.
    pub fn take(mut self, n: u32) -> Self {
        self.take = n;
        self
    }

    fn render(&self) -> (String, Vec<Value>) {
        let mut params = vec![];

        let select = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(", ")
        };

        let mut sql = format!("SELECT {} FROM {}", select, self.table);
        self.render_tail(&mut sql, &mut params);

        if !self.orders.is_empty() {
            sql.push_str(" ORDER BY ");
            let orders = self
                .orders
                .iter()
                .map(OrderSpec::render)
                .collect::<Vec<_>>();
            sql.push_str(&orders.join(", "));
        }

        // Ordering is already rendered; the window cuts the sorted rows.
        match (self.take, self.skip) {
            (t, s) if t > 0 && s > 0 => sql.push_str(&format!(" LIMIT {t} OFFSET {s}")),
            (t, _) if t > 0 => sql.push_str(&format!(" LIMIT {t}")),
            (_, s) if s > 0 => sql.push_str(&format!(" LIMIT -1 OFFSET {s}")),
            _ => {}
        }

        (sql, params)
    }

    fn render_tail(&self, sql: &mut String, params: &mut Vec<Value>) {
        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }

        if !self.wheres.is_empty() {
            sql.push_str(" WHERE ");
            let conditions = self
                .wheres
                .iter()
                .map(|w| (w.render)(params))
                .collect::<Vec<_>>();
            sql.push_str(&conditions.join(" AND "));
        }
    }
}

impl<R: FromRow> SelectQuery<'_, R> {
    /// Executes and materializes every matching row.
    pub fn fetch(self) -> Result<Vec<R>> {
        let (sql, params) = self.render();
        tracing::debug!(sql = %sql, "executing select");

        let mut stmt = self.conn.prepare(&sql)?;
        let params_ref: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
        let rows = stmt.query_map(params_ref.as_slice(), R::from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    /// Executes a first-match-or-none fetch.
    ///
    /// Which row is "first" under a multi-row match is store-order
    /// dependent unless an ORDER BY term was added.
    pub fn first(self) -> Result<Option<R>> {
        let mut rows = self.take(1).fetch()?;
        Ok(rows.pop())
    }

    /// Asks the store whether any row matches, without materializing one.
    pub fn exists(self) -> Result<bool> {
        let mut params = vec![];
        let mut inner = format!("SELECT 1 FROM {}", self.table);
        self.render_tail(&mut inner, &mut params);

        let sql = format!("SELECT EXISTS({inner})");
        tracing::debug!(sql = %sql, "executing existence check");

        let params_ref: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
        let found: i64 = self
            .conn
            .query_row(&sql, params_ref.as_slice(), |row| row.get(0))?;
        Ok(found != 0)
    }

    /// Counts matching rows.
    pub fn count(self) -> Result<u64> {
        let mut params = vec![];
        let mut sql = format!("SELECT COUNT(*) FROM {}", self.table);
        self.render_tail(&mut sql, &mut params);
        tracing::debug!(sql = %sql, "executing count");

        let params_ref: Vec<&dyn ToSql> = params.iter().map(|v| v as &dyn ToSql).collect();
        Ok(self
            .conn
            .query_row(&sql, params_ref.as_slice(), |row| row.get(0))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Col;

    const ID: Col<i64> = Col::new("id");
    const NAME: Col<String> = Col::new("name");

    struct Row {
        id: i64,
        name: String,
    }

    impl FromRow for Row {
        fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
            Ok(Self {
                id: row.get("id")?,
                name: row.get("name")?,
            })
        }
    }

    fn seeded() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE items (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
             INSERT INTO items (id, name) VALUES (1, 'a'), (2, 'b'), (3, 'c');",
        )
        .unwrap();
        conn
    }

    #[test]
    fn fetch_applies_filter_and_order() {
        let conn = seeded();
        let rows: Vec<Row> = SelectQuery::over(&conn, "items")
            .filter(ID.gt(1i64))
            .order_by(OrderSpec::desc(ID))
            .fetch()
            .unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2]);
    }

    #[test]
    fn window_cuts_sorted_rows() {
        let conn = seeded();
        let rows: Vec<Row> = SelectQuery::over(&conn, "items")
            .order_by(OrderSpec::asc(ID))
            .skip(1)
            .take(1)
            .fetch()
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, 2);
        assert_eq!(rows[0].name, "b");
    }

    #[test]
    fn skip_without_take_drops_leading_rows() {
        let conn = seeded();
        let rows: Vec<Row> = SelectQuery::over(&conn, "items")
            .order_by(OrderSpec::asc(ID))
            .skip(2)
            .fetch()
            .unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn exists_is_a_pure_existence_check() {
        let conn = seeded();
        assert!(SelectQuery::<Row>::over(&conn, "items")
            .filter(NAME.eq("b".to_string()))
            .exists()
            .unwrap());
        assert!(!SelectQuery::<Row>::over(&conn, "items")
            .filter(NAME.eq("zzz".to_string()))
            .exists()
            .unwrap());
    }

    #[test]
    fn first_on_empty_match_is_none() {
        let conn = seeded();
        let row: Option<Row> = SelectQuery::over(&conn, "items")
            .filter(ID.gt(100i64))
            .first()
            .unwrap();
        assert!(row.is_none());
    }

    #[test]
    fn count_respects_filters() {
        let conn = seeded();
        let n = SelectQuery::<Row>::over(&conn, "items")
            .filter(ID.ge(2i64))
            .count()
            .unwrap();
        assert_eq!(n, 2);
    }
}
