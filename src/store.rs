use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::datamodel::{Author, Book, Database, next_id};
use crate::error::{StoreError, StoreResult};

/// Fields of a book that `update_book` may replace.
#[derive(Debug, Default)]
pub struct BookPatch {
    pub name: Option<String>,
    pub author_id: Option<i32>,
}

impl BookPatch {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.author_id.is_none()
    }
}

/// Fields of an author that `update_author` may replace.
#[derive(Debug, Default)]
pub struct AuthorPatch {
    pub name: Option<String>,
}

struct StoreInner {
    path: PathBuf,
    db: Mutex<Database>,
    writes: AtomicU64,
}

/// The in-memory datastore, mirrored to a single JSON file.
///
/// Every mutation rewrites the whole file before it returns. The datastore
/// lock is held across the write, so concurrent mutations are persisted in
/// the order they were applied.
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Clone for Store {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl Store {
    /// Loads the datastore at `path`, starting empty if the file does not exist yet.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref().to_path_buf();
        let db = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "datastore not found, starting empty");
                Database::default()
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        Ok(Self::with_database(path, db))
    }

    pub fn with_database(path: impl Into<PathBuf>, db: Database) -> Self {
        let inner = StoreInner {
            path: path.into(),
            db: Mutex::new(db),
            writes: AtomicU64::new(0),
        };
        Self {
            inner: Arc::new(inner),
        }
    }

    pub fn path(&self) -> &Path {
        &self.inner.path
    }

    /// Number of completed writes to the datastore file.
    pub fn writes(&self) -> u64 {
        self.inner.writes.load(Ordering::Acquire)
    }

    #[cfg(test)]
    pub async fn snapshot(&self) -> Database {
        self.inner.db.lock().await.clone()
    }

    pub async fn authors(&self) -> Vec<Author> {
        self.inner.db.lock().await.authors.clone()
    }

    pub async fn books(&self) -> Vec<Book> {
        self.inner.db.lock().await.books.clone()
    }

    pub async fn author(&self, id: i32) -> Option<Author> {
        let db = self.inner.db.lock().await;
        db.authors.iter().find(|author| author.id == id).cloned()
    }

    pub async fn book(&self, id: i32) -> Option<Book> {
        let db = self.inner.db.lock().await;
        db.books.iter().find(|book| book.id == id).cloned()
    }

    pub async fn books_by_author(&self, author_id: i32) -> Vec<Book> {
        let db = self.inner.db.lock().await;
        db.books
            .iter()
            .filter(|book| book.author_id == author_id)
            .cloned()
            .collect()
    }

    /// The author a book points at, if it still exists.
    pub async fn author_of(&self, book: &Book) -> Option<Author> {
        self.author(book.author_id).await
    }

    pub async fn create_book(&self, name: String, author_id: i32) -> StoreResult<Book> {
        let mut db = self.inner.db.lock().await;
        let mut next = db.clone();
        let book = Book {
            id: next_id(next.books.len()),
            name,
            author_id,
        };
        next.books.push(book.clone());
        self.commit(&mut db, next).await?;

        info!(id = book.id, "saved book");
        Ok(book)
    }

    /// Applies `patch` in place. An empty patch or an unknown id leaves the file untouched.
    pub async fn update_book(&self, id: i32, patch: BookPatch) -> StoreResult<Option<Book>> {
        let mut db = self.inner.db.lock().await;
        let Some(pos) = db.books.iter().position(|book| book.id == id) else {
            return Ok(None);
        };
        if patch.is_empty() {
            return Ok(Some(db.books[pos].clone()));
        }

        let mut next = db.clone();
        let book = &mut next.books[pos];
        if let Some(name) = patch.name {
            book.name = name;
        }
        if let Some(author_id) = patch.author_id {
            book.author_id = author_id;
        }
        let book = book.clone();
        self.commit(&mut db, next).await?;

        info!(id, "updated book");
        Ok(Some(book))
    }

    /// Removes every book with `id`, returning the first one removed.
    pub async fn delete_book(&self, id: i32) -> StoreResult<Option<Book>> {
        let mut db = self.inner.db.lock().await;
        let Some(book) = db.books.iter().find(|book| book.id == id).cloned() else {
            return Ok(None);
        };
        let mut next = db.clone();
        next.books.retain(|book| book.id != id);
        self.commit(&mut db, next).await?;

        info!(id, "deleted book");
        Ok(Some(book))
    }

    pub async fn create_author(&self, name: String) -> StoreResult<Author> {
        let mut db = self.inner.db.lock().await;
        let mut next = db.clone();
        let author = Author {
            id: next_id(next.authors.len()),
            name,
        };
        next.authors.push(author.clone());
        self.commit(&mut db, next).await?;

        info!(id = author.id, "saved author");
        Ok(author)
    }

    pub async fn update_author(&self, id: i32, patch: AuthorPatch) -> StoreResult<Option<Author>> {
        let mut db = self.inner.db.lock().await;
        let Some(pos) = db.authors.iter().position(|author| author.id == id) else {
            return Ok(None);
        };
        let Some(name) = patch.name else {
            return Ok(Some(db.authors[pos].clone()));
        };

        let mut next = db.clone();
        next.authors[pos].name = name;
        let author = next.authors[pos].clone();
        self.commit(&mut db, next).await?;

        info!(id, "updated author");
        Ok(Some(author))
    }

    /// Removes every author with `id`. Books referencing it are kept.
    pub async fn delete_author(&self, id: i32) -> StoreResult<Option<Author>> {
        let mut db = self.inner.db.lock().await;
        let Some(author) = db.authors.iter().find(|author| author.id == id).cloned() else {
            return Ok(None);
        };
        let mut next = db.clone();
        next.authors.retain(|author| author.id != id);
        self.commit(&mut db, next).await?;

        info!(id, "deleted author");
        Ok(Some(author))
    }

    /// Writes `next` to disk and only then makes it the in-memory state.
    async fn commit(&self, db: &mut MutexGuard<'_, Database>, next: Database) -> StoreResult<()> {
        let bytes = serde_json::to_vec(&next)?;
        tokio::fs::write(&self.inner.path, bytes)
            .await
            .map_err(|source| StoreError::Write {
                path: self.inner.path.clone(),
                source,
            })?;
        **db = next;

        let writes = self.inner.writes.fetch_add(1, Ordering::AcqRel) + 1;
        debug!(path = %self.inner.path.display(), writes, "persisted datastore");
        Ok(())
    }
}
