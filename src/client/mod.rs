use cynic::http::ReqwestExt;
use cynic::serde;
use reqwest::Url;

/// Typed client for the library endpoint, used by the HTTP tests.
pub struct Client {
    http: reqwest::Client,
    endpoint: Url,
}

impl Client {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Runs `op` and returns its data, panicking if the server reported any error.
    pub async fn data<Query, Input>(&self, op: cynic::Operation<Query, Input>) -> Query
    where
        Input: serde::Serialize,
        Query: serde::de::DeserializeOwned + 'static,
    {
        let res = self
            .http
            .post(self.endpoint.clone())
            .run_graphql(op)
            .await
            .unwrap();
        if let Some(errors) = res.errors.filter(|errors| !errors.is_empty()) {
            panic!("graphql errors: {errors:?}");
        }
        res.data.expect("response without data")
    }
}

#[cynic::schema("library")]
mod schema {}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query")]
pub struct Library {
    pub authors: Vec<Author>,
}

#[derive(cynic::QueryFragment, Debug)]
pub struct Author {
    pub id: i32,
    pub name: String,
    pub books: Vec<Book>,
}

#[derive(cynic::QueryFragment, Debug)]
pub struct Book {
    pub id: i32,
    pub name: String,
    #[cynic(rename = "authorID")]
    pub author_id: i32,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Author")]
pub struct CreatedAuthor {
    pub id: i32,
    pub name: String,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct CreateAuthorVariables {
    pub name: String,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Mutation", variables = "CreateAuthorVariables")]
pub struct CreateAuthor {
    #[arguments(name: $name)]
    pub create_author: CreatedAuthor,
}
