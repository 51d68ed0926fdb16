use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

/// A single author.
#[derive(SimpleObject, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[graphql(complex)]
pub struct Author {
    pub id: i32,
    pub name: String,
}

/// A single book.
#[derive(SimpleObject, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[graphql(complex)]
pub struct Book {
    pub id: i32,
    pub name: String,
    /// Soft reference to `Author::id`, not checked on write.
    #[graphql(name = "authorID")]
    #[serde(rename = "authorID")]
    pub author_id: i32,
}

/// The whole datastore as it is laid out on disk.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Database {
    #[serde(default)]
    pub authors: Vec<Author>,
    #[serde(default)]
    pub books: Vec<Book>,
}

/// Ids are handed out as `count + 1`, so they are reused after a deletion.
pub fn next_id(len: usize) -> i32 {
    i32::try_from(len).map_or(i32::MAX, |len| len.saturating_add(1))
}
