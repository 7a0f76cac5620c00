//! Core traits that power query composition.
//!
//! - [`Predicate`]: opaque, composable filter tokens over an entity shape
//! - [`FromRow`]: materializing detached row snapshots into Rust types

use rusqlite::{types::Value, Row};

use crate::expr::ops::{Cmp, InSet, Junction, Null, Pattern};

/// A boolean-valued filter expression over an entity.
///
/// Callers never see SQL: they build predicates from typed columns
/// ([`crate::expr::Col`]) and the combinators below, and the store side
/// translates the finished token into a parameterized fragment.
///
/// `render` appends bound parameters to `params` and returns the SQL
/// fragment with `?` placeholders.
///
/// # Example
///
/// ```rust
/// use larder::expr::Col;
/// use larder::traits::Predicate as _;
///
/// const NAME: Col<String> = Col::new("name");
///
/// let mut params = vec![];
/// let sql = NAME.eq("b".to_string()).render(&mut params);
/// assert_eq!(sql, "name = ?");
/// ```
pub trait Predicate: Sized {
    /// Renders this predicate into a SQL fragment, pushing bound values.
    fn render(&self, params: &mut Vec<Value>) -> String;

    /// `=` comparison.
    fn eq<V: Into<Value>>(self, value: V) -> Cmp<Self> {
        Cmp::new(self, "=", value.into())
    }

    /// `!=` comparison.
    fn ne<V: Into<Value>>(self, value: V) -> Cmp<Self> {
        Cmp::new(self, "!=", value.into())
    }

    /// `>` comparison.
    fn gt<V: Into<Value>>(self, value: V) -> Cmp<Self> {
        Cmp::new(self, ">", value.into())
    }

    /// `<` comparison.
    fn lt<V: Into<Value>>(self, value: V) -> Cmp<Self> {
        Cmp::new(self, "<", value.into())
    }

    /// `>=` comparison.
    fn ge<V: Into<Value>>(self, value: V) -> Cmp<Self> {
        Cmp::new(self, ">=", value.into())
    }

    /// `<=` comparison.
    fn le<V: Into<Value>>(self, value: V) -> Cmp<Self> {
        Cmp::new(self, "<=", value.into())
    }

    /// `LIKE` substring match.
    fn like(self, pattern: impl Into<String>) -> Pattern<Self> {
        Pattern::new(self, pattern.into(), false)
    }

    /// Case-insensitive substring match.
    fn ilike(self, pattern: impl Into<String>) -> Pattern<Self> {
        Pattern::new(self, pattern.into(), true)
    }

    /// `IN` set membership.
    fn one_of<V, I>(self, values: I) -> InSet<Self>
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        InSet::new(self, values.into_iter().map(Into::into).collect(), false)
    }

    /// `NOT IN` set membership.
    fn not_in<V, I>(self, values: I) -> InSet<Self>
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        InSet::new(self, values.into_iter().map(Into::into).collect(), true)
    }

    /// `IS NULL` check.
    fn is_null(self) -> Null<Self> {
        Null::new(self, true)
    }

    /// `IS NOT NULL` check.
    fn is_not_null(self) -> Null<Self> {
        Null::new(self, false)
    }

    /// Conjunction with another predicate.
    fn and<P: Predicate>(self, other: P) -> Junction<Self, P> {
        Junction::new(self, other, "AND")
    }

    /// Disjunction with another predicate.
    fn or<P: Predicate>(self, other: P) -> Junction<Self, P> {
        Junction::new(self, other, "OR")
    }
}

/// A type that can be materialized from a result row.
///
/// Implemented by entities and by projection shapes. Results are detached
/// snapshots: nothing holds onto the row or tracks changes after this
/// returns.
///
/// # Example
///
/// ```rust
/// use larder::FromRow;
///
/// struct Track {
///     id: i64,
///     name: String,
/// }
///
/// impl FromRow for Track {
///     fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
///         Ok(Track {
///             id: row.get("id")?,
///             name: row.get("name")?,
///         })
///     }
/// }
/// ```
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}
