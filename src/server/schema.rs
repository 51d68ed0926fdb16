use async_graphql::{ComplexObject, Context, ErrorExtensions, Object, Result};
use tracing::debug;

use crate::datamodel::{Author, Book};
use crate::store::{AuthorPatch, BookPatch};

use super::context::StoreContext;

#[ComplexObject]
impl Author {
    /// List of books the author has written.
    async fn books(&self, ctx: &Context<'_>) -> Vec<Book> {
        ctx.store().books_by_author(self.id).await
    }
}

#[ComplexObject]
impl Book {
    async fn author(&self, ctx: &Context<'_>) -> Option<Author> {
        ctx.store().author_of(self).await
    }
}

/// Root query to retrieve all information stored in the database.
pub struct QueryRoot;

#[Object(name = "Query")]
impl QueryRoot {
    /// List of all books in the database.
    async fn books(&self, ctx: &Context<'_>) -> Vec<Book> {
        ctx.store().books().await
    }

    /// List of all authors in the database.
    async fn authors(&self, ctx: &Context<'_>) -> Vec<Author> {
        ctx.store().authors().await
    }

    /// A single book identified by its id.
    async fn book(&self, ctx: &Context<'_>, id: Option<i32>) -> Option<Book> {
        let Some(id) = id else { return None };
        ctx.store().book(id).await
    }

    /// A single author identified by its id.
    async fn author(&self, ctx: &Context<'_>, id: Option<i32>) -> Option<Author> {
        let Some(id) = id else { return None };
        ctx.store().author(id).await
    }
}

/// Root mutation to manipulate all information stored in the database.
pub struct MutationRoot;

#[Object(name = "Mutation")]
impl MutationRoot {
    /// Adds a single book to the database.
    async fn create_book(
        &self,
        ctx: &Context<'_>,
        name: String,
        #[graphql(name = "authorID")] author_id: i32,
    ) -> Result<Book> {
        ctx.store()
            .create_book(name, author_id)
            .await
            .map_err(|err| err.extend())
    }

    /// Updates a single book in the database.
    async fn update_book(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "ID of the book to update.")] id: i32,
        #[graphql(desc = "New name of the book.")] name: Option<String>,
        #[graphql(name = "authorID", desc = "ID of the new author of the book.")]
        author_id: Option<i32>,
    ) -> Result<Option<Book>> {
        debug!(id, ?name, ?author_id, "updateBook");
        let patch = BookPatch { name, author_id };
        ctx.store()
            .update_book(id, patch)
            .await
            .map_err(|err| err.extend())
    }

    /// Deletes a single book from the database.
    async fn delete_book(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "ID of the book to delete.")] id: i32,
    ) -> Result<Option<Book>> {
        ctx.store()
            .delete_book(id)
            .await
            .map_err(|err| err.extend())
    }

    /// Adds a single author to the database.
    async fn create_author(&self, ctx: &Context<'_>, name: String) -> Result<Author> {
        ctx.store()
            .create_author(name)
            .await
            .map_err(|err| err.extend())
    }

    /// Updates a single author in the database.
    async fn update_author(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "ID of the author to update.")] id: i32,
        #[graphql(desc = "New name of the author.")] name: Option<String>,
    ) -> Result<Option<Author>> {
        debug!(id, ?name, "updateAuthor");
        ctx.store()
            .update_author(id, AuthorPatch { name })
            .await
            .map_err(|err| err.extend())
    }

    /// Deletes a single author from the database.
    async fn delete_author(
        &self,
        ctx: &Context<'_>,
        #[graphql(desc = "ID of the author to delete.")] id: i32,
    ) -> Result<Option<Author>> {
        ctx.store()
            .delete_author(id)
            .await
            .map_err(|err| err.extend())
    }
}
