//! Building blocks of query filters.
//!
//! A predicate starts from a typed column ([`Col`]) and is composed with
//! the combinators on [`crate::traits::Predicate`].

pub mod column;
pub mod ops;

pub use column::Col;
