//! The generic repository.
//!
//! `Repository<E>` translates a declarative set of {predicate, projection,
//! ordering, includes, paging} into one statement against the store,
//! executes it inside a per-call session, and returns materialized,
//! detached results. It keeps no state between calls: paging and every
//! other read parameter is per-call, so a repository can be shared
//! freely.

use std::marker::PhantomData;

use crate::{
    entity::{Entity, KeyValue, NamedEntity},
    error::{LarderError, Result},
    expr::Col,
    fetch::{Fetch, Include, Projection},
    query::{clause::WhereClause, DeleteQuery, InsertQuery, SelectQuery, UpdateQuery},
    session::SessionFactory,
    traits::{FromRow, Predicate},
};

/// A typed repository over one entity table.
///
/// # Example
///
/// ```rust,ignore
/// let sessions = SessionFactory::open("library.db")?;
/// let tracks: Repository<Track> = Repository::new(sessions.clone());
///
/// let id = tracks.add(&track)?;
/// let loud = tracks.get_filtered_with(
///     tracks_cols::PLAYS.gt(100i64),
///     Fetch::new().order(OrderSpec::desc(tracks_cols::PLAYS)).page(Page::take(10)),
/// )?;
/// ```
pub struct Repository<E> {
    sessions: SessionFactory,
    _entity: PhantomData<E>,
}

impl<E: Entity + FromRow> Repository<E> {
    /// Creates a repository backed by the given session factory.
    pub fn new(sessions: SessionFactory) -> Self {
        Self {
            sessions,
            _entity: PhantomData,
        }
    }

    /// Inserts `entity` and returns its key as visible after commit.
    ///
    /// A client-assigned key is echoed back; otherwise the key the store
    /// assigned is returned. Inserting an entity whose key type cannot be
    /// store-assigned without a key set is a composition error. Atomicity
    /// covers this single entity only; callers needing multi-entity
    /// inserts batch at the session layer themselves.
    pub fn add(&self, entity: &E) -> Result<E::Key> {
        if entity.key().is_none() && !E::Key::STORE_ASSIGNED {
            return Err(LarderError::Composition(format!(
                "{}: key must be assigned before insert for this key type",
                E::TABLE
            )));
        }

        let mut session = self.sessions.session()?;
        let tx = session.transaction()?;

        let mut row = entity.to_row();
        if let Some(key) = entity.key() {
            row.push((E::KEY, key.into()));
        }

        let rowid = InsertQuery::into_table(&tx, E::TABLE)
            .set_row(row)
            .execute()?;
        tx.commit()?;

        match entity.key() {
            Some(key) => Ok(key),
            None => E::Key::from_rowid(rowid).ok_or_else(|| {
                LarderError::Composition(format!(
                    "{}: store-assigned rowid {rowid} does not fit the key type",
                    E::TABLE
                ))
            }),
        }
    }

    /// Whether any row matches `predicate`.
    ///
    /// Runs an existence check, never a count, and materializes nothing.
    pub fn exists<P: Predicate + 'static>(&self, predicate: P) -> Result<bool> {
        let session = self.sessions.session()?;
        SelectQuery::<E>::over(session.conn(), E::TABLE)
            .filter(predicate)
            .exists()
    }

    /// Fetches every entity.
    pub fn get_all(&self) -> Result<Vec<E>> {
        self.read(None, None, Fetch::new())
    }

    /// Fetches every entity with includes, ordering, and paging.
    pub fn get_all_with(&self, fetch: Fetch) -> Result<Vec<E>> {
        self.read(None, None, fetch)
    }

    /// Fetches every entity, projected onto `R`.
    pub fn get_all_as<R: FromRow>(&self, projection: Projection<R>, fetch: Fetch) -> Result<Vec<R>> {
        self.read(None, Some(projection.columns), fetch)
    }

    /// Fetches the entities matching `predicate`.
    pub fn get_filtered<P: Predicate + 'static>(&self, predicate: P) -> Result<Vec<E>> {
        self.read(Some(WhereClause::from_predicate(predicate)), None, Fetch::new())
    }

    /// Fetches the entities matching `predicate`, with includes, ordering,
    /// and paging.
    pub fn get_filtered_with<P: Predicate + 'static>(
        &self,
        predicate: P,
        fetch: Fetch,
    ) -> Result<Vec<E>> {
        self.read(Some(WhereClause::from_predicate(predicate)), None, fetch)
    }

    /// Fetches the entities matching `predicate`, projected onto `R`.
    ///
    /// The predicate, ordering, and paging all operate on the entity
    /// shape; only the result element type changes.
    pub fn get_filtered_as<R: FromRow, P: Predicate + 'static>(
        &self,
        predicate: P,
        projection: Projection<R>,
        fetch: Fetch,
    ) -> Result<Vec<R>> {
        self.read(
            Some(WhereClause::from_predicate(predicate)),
            Some(projection.columns),
            fetch,
        )
    }

    /// Fetches the first entity matching `predicate`, or `None`.
    ///
    /// Zero matches is absence, not an error. Under a multi-row match,
    /// which row is "first" is store-order dependent; supply a predicate
    /// selective enough or accept the nondeterminism.
    pub fn get_single<P: Predicate + 'static>(&self, predicate: P) -> Result<Option<E>> {
        self.read_one(WhereClause::from_predicate(predicate), None, Vec::new())
    }

    /// Like [`get_single`](Self::get_single), with eager-load hints.
    pub fn get_single_with<P: Predicate + 'static>(
        &self,
        predicate: P,
        includes: Vec<Include>,
    ) -> Result<Option<E>> {
        self.read_one(WhereClause::from_predicate(predicate), None, includes)
    }

    /// Like [`get_single`](Self::get_single), projected onto `R`.
    pub fn get_single_as<R: FromRow, P: Predicate + 'static>(
        &self,
        predicate: P,
        projection: Projection<R>,
        includes: Vec<Include>,
    ) -> Result<Option<R>> {
        self.read_one(
            WhereClause::from_predicate(predicate),
            Some(projection.columns),
            includes,
        )
    }

    /// Fetches the entity with the given key, or `None`.
    pub fn get_by_key(&self, key: E::Key) -> Result<Option<E>> {
        self.get_single(Col::<E::Key>::new(E::KEY).eq(key))
    }

    /// Counts the entities matching `predicate`.
    pub fn count<P: Predicate + 'static>(&self, predicate: P) -> Result<u64> {
        let session = self.sessions.session()?;
        SelectQuery::<E>::over(session.conn(), E::TABLE)
            .filter(predicate)
            .count()
    }

    /// Counts every entity.
    pub fn count_all(&self) -> Result<u64> {
        let session = self.sessions.session()?;
        SelectQuery::<E>::over(session.conn(), E::TABLE).count()
    }

    /// Marks every given entity modified and commits once.
    ///
    /// The batch is atomic: one transaction covers the whole call, so a
    /// failure on any entity rolls back every change. An entity with no
    /// assigned key is a composition error, raised before any statement
    /// reaches the store. Returns the number of rows changed.
    pub fn update(&self, entities: &[E]) -> Result<usize> {
        let keys = Self::keys_of(entities)?;

        let mut session = self.sessions.session()?;
        let tx = session.transaction()?;

        let mut changed = 0;
        for (entity, key) in entities.iter().zip(keys) {
            changed += UpdateQuery::table(&tx, E::TABLE)
                .set_row(entity.to_row())
                .filter(Col::<E::Key>::new(E::KEY).eq(key))
                .execute()?;
        }
        tx.commit()?;

        tracing::debug!(table = E::TABLE, changed, "updated batch");
        Ok(changed)
    }

    /// Marks every given entity deleted and commits once.
    ///
    /// Same batch atomicity and key requirements as
    /// [`update`](Self::update). Returns the number of rows deleted.
    pub fn remove(&self, entities: &[E]) -> Result<usize> {
        let keys = Self::keys_of(entities)?;

        let mut session = self.sessions.session()?;
        let tx = session.transaction()?;

        let mut deleted = 0;
        for key in keys {
            deleted += DeleteQuery::from_table(&tx, E::TABLE)
                .filter(Col::<E::Key>::new(E::KEY).eq(key))
                .execute()?;
        }
        tx.commit()?;

        tracing::debug!(table = E::TABLE, deleted, "removed batch");
        Ok(deleted)
    }

    /// The shared read pipeline. Every list read is a specialization of
    /// this routine; `get_all` is the match-all case.
    fn read<R: FromRow>(
        &self,
        filter: Option<WhereClause>,
        projection: Option<Vec<String>>,
        fetch: Fetch,
    ) -> Result<Vec<R>> {
        let session = self.sessions.session()?;
        let mut query = SelectQuery::<R>::over(session.conn(), E::TABLE);

        for include in fetch.includes {
            query = query.include(include);
        }
        if let Some(clause) = filter {
            query = query.filter_clause(clause);
        }
        if let Some(order) = fetch.order {
            query = query.order_by(order);
        }
        if let Some(page) = fetch.page {
            query = query.skip(page.skip).take(page.take);
        }
        if let Some(columns) = projection {
            query = query.columns(columns);
        }

        query.fetch()
    }

    /// Single-item variant of the pipeline: no ordering, no paging.
    fn read_one<R: FromRow>(
        &self,
        filter: WhereClause,
        projection: Option<Vec<String>>,
        includes: Vec<Include>,
    ) -> Result<Option<R>> {
        let session = self.sessions.session()?;
        let mut query = SelectQuery::<R>::over(session.conn(), E::TABLE);

        for include in includes {
            query = query.include(include);
        }
        query = query.filter_clause(filter);
        if let Some(columns) = projection {
            query = query.columns(columns);
        }

        query.first()
    }

    fn keys_of(entities: &[E]) -> Result<Vec<E::Key>> {
        entities
            .iter()
            .map(|entity| {
                entity.key().ok_or_else(|| {
                    LarderError::Composition(format!(
                        "{}: entity has no key; it was never added",
                        E::TABLE
                    ))
                })
            })
            .collect()
    }
}

impl<E: NamedEntity + FromRow> Repository<E> {
    /// Fetches the first entity with the given name, or `None`.
    pub fn get_by_name(&self, name: &str) -> Result<Option<E>> {
        self.get_single(Col::<String>::new(E::NAME).eq(name.to_string()))
    }
}
