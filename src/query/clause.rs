//! Internal clause representation shared by the query builders.

use rusqlite::types::Value;

use crate::traits::Predicate;

/// A WHERE condition, erased to a closure that renders SQL and pushes its
/// bound parameters.
pub(crate) struct WhereClause {
    pub render: Box<dyn Fn(&mut Vec<Value>) -> String>,
}

impl WhereClause {
    pub(crate) fn from_predicate<P: Predicate + 'static>(predicate: P) -> Self {
        Self {
            render: Box::new(move |params| predicate.render(params)),
        }
    }
}
