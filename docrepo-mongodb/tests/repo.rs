//! Tests against a live MongoDB server.
//!
//! They are ignored by default. Point `MONGODB_URL` at a disposable server and run
//! `cargo test -p docrepo-mongodb -- --ignored`.

use std::time::Duration;

use bson::doc;
use docrepo_core::{config::RepoConfig, document::Document, error::RepoError};
use docrepo_mongodb::MongoRepo;
use uuid::Uuid;

async fn connected_repo() -> MongoRepo {
    let database = format!("docrepo_test_{}", Uuid::new_v4().simple());
    let mut repo = MongoRepo::new(Default::default(), RepoConfig::from_env(database));

    repo.init().await.expect("MONGODB_URL should point at a running server");
    repo
}

#[tokio::test]
#[ignore = "requires a running MongoDB server"]
async fn insert_then_find_by_id() {
    let mut repo = connected_repo().await;

    let inserted = repo
        .insert(&Document::new("users", [doc! { "name": "Ana", "tags": ["a", "b"] }]))
        .await
        .unwrap();
    let found = repo.find_by_id(&inserted).await.unwrap().unwrap();

    assert_eq!(found.collection(), "users");
    assert_eq!(found.id(), inserted.id());
    assert_eq!(found.data().get_str("name").unwrap(), "Ana");
    assert!(found.data().get("_id").is_none());
    assert_eq!(found.created_at(), inserted.created_at());
    assert_eq!(found.updated_at(), inserted.updated_at());

    repo.done().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running MongoDB server"]
async fn update_sets_fields_and_refreshes_updated_at() {
    let mut repo = connected_repo().await;

    let inserted = repo
        .insert(&Document::new("users", [doc! { "name": "Ana", "city": "Lisbon" }]))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(5)).await;

    let change = Document::new(
        "users",
        [doc! { inserted.id_key(): inserted.id(), "name": "Ana Maria" }],
    );
    repo.update(&change).await.unwrap();

    let stored = repo.find_by_id(&inserted).await.unwrap().unwrap();

    assert_eq!(stored.data().get_str("name").unwrap(), "Ana Maria");
    assert_eq!(stored.data().get_str("city").unwrap(), "Lisbon");
    assert_eq!(stored.created_at(), inserted.created_at());
    assert!(stored.updated_at() > inserted.updated_at());

    repo.done().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running MongoDB server"]
async fn unknown_ids_are_not_found_and_not_created() {
    let mut repo = connected_repo().await;

    let ghost = Document::new("users", [doc! { "user_id": Uuid::new_v4().to_string() }]);

    assert!(repo.find_by_id(&ghost).await.unwrap().is_none());
    repo.update(&ghost).await.unwrap();
    assert!(repo.find_by_id(&ghost).await.unwrap().is_none());

    repo.done().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a running MongoDB server"]
async fn second_init_keeps_the_connection() {
    let mut repo = connected_repo().await;

    assert!(matches!(repo.init().await, Err(RepoError::AlreadyInitialized)));

    let inserted = repo.insert(&Document::empty("people")).await.unwrap();
    assert!(inserted.data().contains_key("person_id"));

    repo.done().await.unwrap();
}

#[tokio::test]
async fn unreachable_server_fails_init() {
    let config = RepoConfig::new("docrepo_test")
        .with_url("mongodb://127.0.0.1:1")
        .with_connect_timeout(Duration::from_millis(200));
    let mut repo = MongoRepo::new(Default::default(), config);

    assert!(repo.init().await.is_err());
    assert!(!repo.is_initialized());
}
