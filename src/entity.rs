//! Entity capability traits.
//!
//! Entities satisfy these structurally; there is no base type to inherit
//! from. An entity is any owned struct with one designated key column,
//! a table name, and a way to spell itself as column/value pairs for
//! writes.

use rusqlite::types::Value;

/// A key type the store can persist and, where supported, assign itself.
///
/// Integer keys can be recovered from a store-assigned rowid after an
/// insert. String keys are client-assigned only: inserting an entity with
/// an unset string key is a composition error.
pub trait KeyValue: Clone + Into<Value> + 'static {
    /// Whether the store can assign this key type on insert.
    const STORE_ASSIGNED: bool;

    /// Recovers a key from a store-assigned rowid.
    ///
    /// Returns `None` when the type cannot represent the rowid (or cannot
    /// be store-assigned at all).
    fn from_rowid(rowid: i64) -> Option<Self>;
}

impl KeyValue for i64 {
    const STORE_ASSIGNED: bool = true;

    fn from_rowid(rowid: i64) -> Option<Self> {
        Some(rowid)
    }
}

impl KeyValue for i32 {
    const STORE_ASSIGNED: bool = true;

    fn from_rowid(rowid: i64) -> Option<Self> {
        i32::try_from(rowid).ok()
    }
}

impl KeyValue for String {
    const STORE_ASSIGNED: bool = false;

    fn from_rowid(_rowid: i64) -> Option<Self> {
        None
    }
}

/// Exposes the designated key of an entity.
///
/// The key is set by the store on insert (or supplied by the caller) and
/// is immutable afterwards from the repository's point of view.
pub trait HasKey {
    type Key: KeyValue;

    /// Name of the key column.
    const KEY: &'static str;

    /// The key value, or `None` when the store has not assigned one yet.
    fn key(&self) -> Option<Self::Key>;
}

/// A record persisted in the store, identified by its key.
pub trait Entity: HasKey {
    /// Table holding this entity.
    const TABLE: &'static str;

    /// Column/value pairs for writes, excluding the key column.
    fn to_row(&self) -> Vec<(&'static str, Value)>;
}

/// An entity that additionally carries a human-readable name.
///
/// The non-empty invariant on the name is enforced by the store schema
/// (`NOT NULL` plus whatever check the schema declares), not re-validated
/// here.
pub trait NamedEntity: Entity {
    /// Name of the name column.
    const NAME: &'static str = "name";

    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_keys_recover_from_rowid() {
        assert_eq!(i64::from_rowid(42), Some(42));
        assert_eq!(i32::from_rowid(42), Some(42));
        assert_eq!(i32::from_rowid(i64::MAX), None);
    }

    #[test]
    fn string_keys_are_client_assigned() {
        assert!(!String::STORE_ASSIGNED);
        assert_eq!(String::from_rowid(1), None);
    }
}
