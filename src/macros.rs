//! Macros for declaring entity column sets.
//!
//! [`columns!`](crate::columns) generates a module of typed
//! [`Col`](crate::expr::Col) constants plus the table name, tying store
//! column names to Rust types in one place.

/// Declares a module of typed column constants for an entity table.
///
/// # Syntax
///
/// ```ignore
/// columns!(tracks: "tracks" {
///     ID: i64 => "id",
///     NAME: String => "name",
///     TAGS: Option<Vec<String>> => "tags",
/// });
/// ```
///
/// expands to
///
/// ```ignore
/// pub mod tracks {
///     pub const TABLE: &str = "tracks";
///     pub const ID: Col<i64> = Col::new("id");
///     pub const NAME: Col<String> = Col::new("name");
///     pub const TAGS: Col<Option<String>> = Col::json("tags");
/// }
/// ```
///
/// `Vec<T>` and `Option<Vec<T>>` column types map to JSON text columns;
/// use the helpers in [`crate::helpers`] to read and write them.
#[macro_export]
macro_rules! columns {
    (
        $entity:ident: $table:literal {
            $($col_name:ident: $col_type:ty => $db_col:literal),+ $(,)?
        }
    ) => {
        pub mod $entity {
            use $crate::expr::Col;

            pub const TABLE: &str = $table;

            $(
                $crate::column!($col_name, $col_type, $db_col);
            )+
        }
    };
}

#[macro_export]
macro_rules! column {
    // Vec<T> is stored as JSON text
    ($name:ident, Vec<$inner:ty>, $db_col:literal) => {
        pub const $name: Col<String> = Col::json($db_col);
    };

    // Option<Vec<T>> likewise
    ($name:ident, Option<Vec<$inner:ty>>, $db_col:literal) => {
        pub const $name: Col<Option<String>> = Col::json($db_col);
    };

    ($name:ident, Option<$inner:ty>, $db_col:literal) => {
        pub const $name: Col<Option<$inner>> = Col::new($db_col);
    };

    ($name:ident, $type:ty, $db_col:literal) => {
        pub const $name: Col<$type> = Col::new($db_col);
    };
}
