use async_graphql::Context;

use crate::store::Store;

/// Access to the datastore injected into the schema.
pub trait StoreContext {
    fn store(&self) -> &Store;
}

impl StoreContext for Context<'_> {
    fn store(&self) -> &Store {
        self.data_unchecked::<Store>()
    }
}
