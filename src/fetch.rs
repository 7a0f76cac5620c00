//! Per-call read parameters: paging, eager-load hints, projections.
//!
//! Every read call receives its parameters explicitly and they die with
//! the call. Nothing here is instance state, so two callers sharing a
//! repository can never leak paging intent into each other's reads.

use std::marker::PhantomData;

use crate::{expr::Col, order::OrderSpec, traits::FromRow};

/// A result window for one read call.
///
/// `skip` rows are dropped, then at most `take` rows are returned. Zero
/// means "no skip" / "no limit", so `Page::default()` is a no-op. The
/// window is applied after ordering; see [`OrderSpec`] for the hazard of
/// paging without an explicit order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub take: u32,
}

impl Page {
    pub fn new(skip: u32, take: u32) -> Self {
        Self { skip, take }
    }

    /// Window that drops the first `n` rows.
    pub fn skip(n: u32) -> Self {
        Self { skip: n, take: 0 }
    }

    /// Window of at most `n` rows from the start.
    pub fn take(n: u32) -> Self {
        Self { skip: 0, take: n }
    }
}

/// An eager-load hint: one `LEFT JOIN` materializing a related table
/// alongside the primary entity.
///
/// Hints are applied in the order given. Duplicates are harmless but
/// wasteful.
#[derive(Debug, Clone)]
pub struct Include {
    pub(crate) clause: String,
}

impl Include {
    /// Joins `table` on the given condition.
    ///
    /// # Example
    ///
    /// ```rust
    /// use larder::Include;
    ///
    /// let hint = Include::new("albums", "tracks.album_id = albums.id");
    /// ```
    pub fn new(table: &str, on: &str) -> Self {
        Self {
            clause: format!("LEFT JOIN {table} ON {on}"),
        }
    }

    /// Supplies a complete join clause verbatim.
    pub fn raw(clause: impl Into<String>) -> Self {
        Self {
            clause: clause.into(),
        }
    }
}

/// A transform from the entity shape to a result shape `R`.
///
/// A projection names the columns to select; `R` is any [`FromRow`] type
/// that can materialize them. Projection changes the element type of the
/// result only: filtering, ordering, and paging all operate on the
/// pre-projection entity shape.
pub struct Projection<R> {
    pub(crate) columns: Vec<String>,
    _shape: PhantomData<R>,
}

impl<R: FromRow> Projection<R> {
    pub fn new() -> Self {
        Self {
            columns: Vec::new(),
            _shape: PhantomData,
        }
    }

    /// Adds a column to the projected shape.
    pub fn col<T>(mut self, col: Col<T>) -> Self {
        self.columns.push(col.select_expr());
        self
    }
}

impl<R: FromRow> Default for Projection<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// The declarative parameter set for one list read.
///
/// Collects includes, optional ordering, and an optional page, in the
/// shape the read pipeline consumes them: includes first, then order,
/// then the page window.
#[derive(Debug, Clone, Default)]
pub struct Fetch {
    pub(crate) includes: Vec<Include>,
    pub(crate) order: Option<OrderSpec>,
    pub(crate) page: Option<Page>,
}

impl Fetch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an eager-load hint.
    pub fn include(mut self, include: Include) -> Self {
        self.includes.push(include);
        self
    }

    /// Sets the ordering.
    pub fn order(mut self, order: OrderSpec) -> Self {
        self.order = Some(order);
        self
    }

    /// Sets the result window.
    pub fn page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_is_a_noop_window() {
        let page = Page::default();
        assert_eq!(page.skip, 0);
        assert_eq!(page.take, 0);
    }

    #[test]
    fn include_builds_a_left_join() {
        let hint = Include::new("albums", "tracks.album_id = albums.id");
        assert_eq!(hint.clause, "LEFT JOIN albums ON tracks.album_id = albums.id");
    }
}
