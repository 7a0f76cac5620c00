//! Ordering parameters for read operations.

use crate::expr::Col;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// Pairs a sort direction with the column it sorts on.
///
/// Constructed per call and consumed by that call. When no `OrderSpec` is
/// supplied, results come back in store default order, which is
/// unspecified and must not be assumed stable. In particular, paging
/// without an explicit order makes the skipped/taken window
/// caller-dependent.
#[derive(Debug, Clone)]
pub struct OrderSpec {
    column: &'static str,
    direction: Direction,
}

impl OrderSpec {
    /// Sorts ascending on `col`.
    pub fn asc<T>(col: Col<T>) -> Self {
        Self {
            column: col.name,
            direction: Direction::Asc,
        }
    }

    /// Sorts descending on `col`.
    pub fn desc<T>(col: Col<T>) -> Self {
        Self {
            column: col.name,
            direction: Direction::Desc,
        }
    }

    pub(crate) fn render(&self) -> String {
        let dir = match self.direction {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        };
        format!("{} {}", self.column, dir)
    }
}
