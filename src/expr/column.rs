//! Typed references to store columns.

use std::marker::PhantomData;

use rusqlite::types::Value;

use crate::traits::Predicate;

/// A typed reference to a column.
///
/// `T` records the Rust type expected when reading the column. It is not
/// enforced at runtime; keep the `FromRow` implementation in agreement.
///
/// # Example
///
/// ```rust
/// use larder::expr::Col;
///
/// const NAME: Col<String> = Col::new("name");
/// ```
#[derive(Clone, Copy)]
pub struct Col<T> {
    pub name: &'static str,
    pub is_json: bool,
    _type: PhantomData<T>,
}

impl<T> Col<T> {
    /// References a column by its name in the store.
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            is_json: false,
            _type: PhantomData,
        }
    }

    /// References a column holding JSON text.
    pub const fn json(name: &'static str) -> Self {
        Self {
            name,
            is_json: true,
            _type: PhantomData,
        }
    }

    /// How this column is spelled in a SELECT list.
    pub fn select_expr(&self) -> String {
        if self.is_json {
            format!("json({}) AS {}", self.name, self.name)
        } else {
            self.name.to_string()
        }
    }
}

impl<T> Predicate for Col<T> {
    fn render(&self, _params: &mut Vec<Value>) -> String {
        self.name.to_string()
    }
}
