//! The query builders.
//!
//! These are the store-side composition primitives the repository drives.
//! Each builder borrows the connection of the session that created it,
//! chains clauses, and renders one parameterized statement on execute:
//!
//! - [`SelectQuery`] — reads: includes, filters, ordering, paging,
//!   projection, existence checks, counts
//! - [`InsertQuery`] — marks one entity added
//! - [`UpdateQuery`] — marks one entity modified
//! - [`DeleteQuery`] — marks one entity deleted
//!
//! Mutation builders execute a single statement each; the repository
//! wraps a batch of them in one transaction when a call must be atomic.

pub mod clause;
pub mod delete;
pub mod insert;
pub mod select;
pub mod update;

pub use delete::DeleteQuery;
pub use insert::InsertQuery;
pub use select::SelectQuery;
pub use update::UpdateQuery;
