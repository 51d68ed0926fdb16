use cynic::{MutationBuilder as _, QueryBuilder as _};

use crate::client::{CreateAuthor, CreateAuthorVariables, Library};
use crate::datamodel::Database;
use crate::store::Store;


use testserver::Server;

fn temp_store(dir: &tempfile::TempDir) -> Store {
    Store::with_database(dir.path().join("database.json"), Database::default())
}

#[tokio::test]
async fn test_request() {
    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(&dir);
    let server = Server::start(store.clone());
    let client = server.client();

    let created = client
        .data(CreateAuthor::build(CreateAuthorVariables {
            name: "Tolkien".into(),
        }))
        .await
        .create_author;
    assert_eq!(created.id, 1);
    assert_eq!(created.name, "Tolkien");
    store.create_book("The Hobbit".into(), 1).await.unwrap();

    let library = client.data(Library::build(())).await;
    let [author] = &library.authors[..] else {
        panic!("expected a single author, got {:?}", library.authors);
    };
    assert_eq!(author.name, "Tolkien");
    assert_eq!(author.books.len(), 1);
    assert_eq!(author.books[0].name, "The Hobbit");
    assert_eq!(author.books[0].author_id, author.id);

    let on_disk = std::fs::read_to_string(store.path()).unwrap();
    assert!(on_disk.contains(r#""authorID":1"#));
}

#[tokio::test]
async fn get_without_query_serves_graphiql() {
    let dir = tempfile::tempdir().unwrap();
    let server = Server::start(temp_store(&dir));

    let res = reqwest::get(server.endpoint()).await.unwrap();
    assert!(res.status().is_success());
    let body = res.text().await.unwrap();
    assert!(body.to_lowercase().contains("graphiql"));
}

#[tokio::test]
async fn get_with_query_executes_it() {
    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(&dir);
    store.create_author("Le Guin".into()).await.unwrap();
    let server = Server::start(store);

    let res: serde_json::Value = reqwest::Client::new()
        .get(server.endpoint())
        .query(&[("query", "{ authors { id name } }")])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(
        res,
        serde_json::json!({ "data": { "authors": [{ "id": 1, "name": "Le Guin" }] } })
    );
}

#[tokio::test]
async fn get_refuses_mutations() {
    let dir = tempfile::tempdir().unwrap();
    let store = temp_store(&dir);
    let server = Server::start(store.clone());
    let http = reqwest::Client::new();

    let res = http
        .get(server.endpoint())
        .query(&[("query", r#"mutation { createAuthor(name: "Via GET") { id } }"#)])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()[reqwest::header::ALLOW], "POST");

    // the named operation decides, not the first one in the document
    let res = http
        .get(server.endpoint())
        .query(&[
            (
                "query",
                r#"query Read { authors { id } } mutation Write { createAuthor(name: "x") { id } }"#,
            ),
            ("operationName", "Write"),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED);

    let res = http
        .get(server.endpoint())
        .query(&[
            (
                "query",
                r#"query Read { authors { id } } mutation Write { createAuthor(name: "x") { id } }"#,
            ),
            ("operationName", "Read"),
        ])
        .send()
        .await
        .unwrap();
    assert!(res.status().is_success());

    assert_eq!(store.writes(), 0);
    assert!(store.authors().await.is_empty());
}

#[tokio::test]
async fn unknown_path_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let server = Server::start(temp_store(&dir));

    let res = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
}
