//! larder — a typed generic repository over SQLite.
//!
//! A [`Repository<E>`] wraps create/read/update/delete operations for one
//! entity type behind a uniform query interface. Reads compose a set of
//! per-call parameters — a [`Predicate`], a [`Projection`], an
//! [`OrderSpec`], [`Include`] hints, and a [`Page`] window — into a single
//! parameterized statement; writes mark entities added, modified, or
//! deleted and commit once per call. Every operation runs inside its own
//! short-lived [`Session`] from an injected [`SessionFactory`].
//!
//! Results are detached snapshots: plain owned structs with no change
//! tracking and no live connection behind them.
//!
//! # Example
//!
//! ```rust
//! use larder::{
//!     columns, Entity, Fetch, FromRow, HasKey, OrderSpec, Page, Repository, SessionFactory,
//! };
//! use larder::traits::Predicate as _;
//! use rusqlite::types::Value;
//!
//! columns!(users: "users" {
//!     ID: i64 => "id",
//!     NAME: String => "name",
//! });
//!
//! #[derive(Debug)]
//! struct User {
//!     id: Option<i64>,
//!     name: String,
//! }
//!
//! impl HasKey for User {
//!     type Key = i64;
//!     const KEY: &'static str = "id";
//!     fn key(&self) -> Option<i64> {
//!         self.id
//!     }
//! }
//!
//! impl Entity for User {
//!     const TABLE: &'static str = users::TABLE;
//!     fn to_row(&self) -> Vec<(&'static str, Value)> {
//!         vec![("name", self.name.clone().into())]
//!     }
//! }
//!
//! impl FromRow for User {
//!     fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
//!         Ok(User {
//!             id: row.get("id")?,
//!             name: row.get("name")?,
//!         })
//!     }
//! }
//!
//! let sessions = SessionFactory::in_memory().unwrap();
//! sessions
//!     .session()
//!     .unwrap()
//!     .conn()
//!     .execute("CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT NOT NULL)", [])
//!     .unwrap();
//!
//! let repo: Repository<User> = Repository::new(sessions);
//! let id = repo
//!     .add(&User { id: None, name: "ada".to_string() })
//!     .unwrap();
//!
//! let page = repo
//!     .get_filtered_with(
//!         users::ID.ge(1i64),
//!         Fetch::new().order(OrderSpec::asc(users::ID)).page(Page::take(10)),
//!     )
//!     .unwrap();
//! assert_eq!(page[0].id, Some(id));
//! ```

pub mod entity;
pub mod error;
pub mod expr;
pub mod fetch;
pub mod helpers;
pub mod macros;
pub mod order;
pub mod query;
pub mod repository;
pub mod session;
pub mod traits;

pub use entity::{Entity, HasKey, KeyValue, NamedEntity};
pub use error::{LarderError, Result};
pub use expr::Col;
pub use fetch::{Fetch, Include, Page, Projection};
pub use helpers::*;
pub use order::{Direction, OrderSpec};
pub use query::{DeleteQuery, InsertQuery, SelectQuery, UpdateQuery};
pub use repository::Repository;
pub use session::{Session, SessionFactory};
pub use traits::{FromRow, Predicate};

#[cfg(test)]
mod tests {
    use rusqlite::types::Value;

    use super::*;

    columns!(albums: "albums" {
        ID: i64 => "id",
        TITLE: String => "title",
    });

    columns!(tracks: "tracks" {
        ID: i64 => "id",
        ALBUM_ID: i64 => "album_id",
        NAME: String => "name",
        TAGS: Option<Vec<String>> => "tags",
    });

    #[derive(Debug, Clone)]
    struct Album {
        id: Option<i64>,
        title: String,
    }

    impl HasKey for Album {
        type Key = i64;
        const KEY: &'static str = "id";

        fn key(&self) -> Option<i64> {
            self.id
        }
    }

    impl Entity for Album {
        const TABLE: &'static str = albums::TABLE;

        fn to_row(&self) -> Vec<(&'static str, Value)> {
            vec![("title", self.title.clone().into())]
        }
    }

    impl FromRow for Album {
        fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
            Ok(Self {
                id: row.get("id")?,
                title: row.get("title")?,
            })
        }
    }

    #[derive(Debug, Clone)]
    struct Track {
        id: Option<i64>,
        album_id: i64,
        name: String,
        tags: Option<Vec<String>>,
    }

    impl HasKey for Track {
        type Key = i64;
        const KEY: &'static str = "id";

        fn key(&self) -> Option<i64> {
            self.id
        }
    }

    impl Entity for Track {
        const TABLE: &'static str = tracks::TABLE;

        fn to_row(&self) -> Vec<(&'static str, Value)> {
            vec![
                ("album_id", self.album_id.into()),
                ("name", self.name.clone().into()),
                ("tags", self.tags.as_ref().map(to_json).into()),
            ]
        }
    }

    impl FromRow for Track {
        fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
            Ok(Self {
                id: row.get("id")?,
                album_id: row.get("album_id")?,
                name: row.get("name")?,
                tags: from_optional_json(row.get("tags")),
            })
        }
    }

    /// Projection shape spanning a track and its eagerly loaded album.
    struct TrackWithAlbum {
        name: String,
        album_title: Option<String>,
    }

    impl FromRow for TrackWithAlbum {
        fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
            Ok(Self {
                name: row.get("name")?,
                album_title: row.get("title")?,
            })
        }
    }

    /// A client-assigned string key.
    #[derive(Debug, Clone)]
    struct Setting {
        slug: Option<String>,
        value: String,
    }

    impl HasKey for Setting {
        type Key = String;
        const KEY: &'static str = "slug";

        fn key(&self) -> Option<String> {
            self.slug.clone()
        }
    }

    impl Entity for Setting {
        const TABLE: &'static str = "settings";

        fn to_row(&self) -> Vec<(&'static str, Value)> {
            vec![("value", self.value.clone().into())]
        }
    }

    impl FromRow for Setting {
        fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
            Ok(Self {
                slug: row.get("slug")?,
                value: row.get("value")?,
            })
        }
    }

    fn library() -> SessionFactory {
        let sessions = SessionFactory::in_memory().unwrap();
        sessions
            .session()
            .unwrap()
            .conn()
            .execute_batch(
                "CREATE TABLE albums (
                    id INTEGER PRIMARY KEY,
                    title TEXT NOT NULL
                );
                CREATE TABLE tracks (
                    id INTEGER PRIMARY KEY,
                    album_id INTEGER NOT NULL,
                    name TEXT NOT NULL,
                    tags TEXT
                );
                CREATE TABLE settings (
                    slug TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .unwrap();
        sessions
    }

    #[test]
    fn include_eagerly_loads_the_related_album() {
        let sessions = library();
        let albums: Repository<Album> = Repository::new(sessions.clone());
        let tracks: Repository<Track> = Repository::new(sessions);

        let album_id = albums
            .add(&Album {
                id: None,
                title: "Debut".to_string(),
            })
            .unwrap();
        tracks
            .add(&Track {
                id: None,
                album_id,
                name: "Opening".to_string(),
                tags: None,
            })
            .unwrap();

        let hit = tracks
            .get_single_as::<TrackWithAlbum, _>(
                tracks::NAME.eq("Opening".to_string()),
                Projection::new()
                    .col(Col::<String>::new("tracks.name"))
                    .col(Col::<String>::new("albums.title")),
                vec![Include::new("albums", "tracks.album_id = albums.id")],
            )
            .unwrap()
            .unwrap();

        assert_eq!(hit.name, "Opening");
        assert_eq!(hit.album_title, Some("Debut".to_string()));
    }

    #[test]
    fn json_tags_round_trip_through_the_column_helpers() {
        let sessions = library();
        let tracks: Repository<Track> = Repository::new(sessions);

        let tags = vec!["live".to_string(), "remaster".to_string()];
        let id = tracks
            .add(&Track {
                id: None,
                album_id: 1,
                name: "Encore".to_string(),
                tags: Some(tags.clone()),
            })
            .unwrap();

        let found = tracks.get_by_key(id).unwrap().unwrap();
        assert_eq!(found.tags, Some(tags));
    }

    #[test]
    fn client_assigned_string_keys_echo_back() {
        let sessions = library();
        let settings: Repository<Setting> = Repository::new(sessions);

        let key = settings
            .add(&Setting {
                slug: Some("theme".to_string()),
                value: "dark".to_string(),
            })
            .unwrap();
        assert_eq!(key, "theme");

        let found = settings.get_by_key("theme".to_string()).unwrap().unwrap();
        assert_eq!(found.value, "dark");
    }

    #[test]
    fn unset_string_key_is_a_composition_error() {
        let sessions = library();
        let settings: Repository<Setting> = Repository::new(sessions);

        let err = settings
            .add(&Setting {
                slug: None,
                value: "dark".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, LarderError::Composition(_)));
        assert_eq!(settings.count_all().unwrap(), 0);
    }
}
