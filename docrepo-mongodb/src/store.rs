use async_trait::async_trait;
use bson::{Document, doc};
use mongodb::{Client, Collection as MongoCollection, options::ClientOptions};
use tracing::info;
use docrepo_core::{
    backend::{StoreBackend, StoreBackendBuilder},
    config::RepoConfig,
    error::{RepoError, RepoResult},
};

/// Key MongoDB assigns to every stored document.
const OBJECT_ID_KEY: &str = "_id";


#[derive(Debug)]
pub struct MongoDbStore {
    client: Client,
    database: String,
}

impl MongoDbStore {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }

    pub fn builder() -> MongoDbStoreBuilder {
        MongoDbStoreBuilder::default()
    }

    fn get_collection(&self, collection_name: &str) -> MongoCollection<Document> {
        self.client
            .database(&self.database)
            .collection(collection_name)
    }

    fn id_filter(id_key: &str, id: &str) -> Document {
        doc! { id_key: { "$eq": id } }
    }

    fn restore_document(mut document: Document) -> Document {
        document.remove(OBJECT_ID_KEY);
        document
    }

    async fn shutdown(self) -> RepoResult<()> {
        info!(database = %self.database, "shutting down mongodb client");
        self.client.shutdown().await;

        Ok(())
    }
}

#[async_trait]
impl StoreBackend for MongoDbStore {
    async fn insert_document(&self, collection: &str, document: Document) -> RepoResult<()> {
        self.get_collection(collection)
            .insert_one(document)
            .await
            .map_err(RepoError::backend)?;

        Ok(())
    }

    async fn set_fields(
        &self,
        collection: &str,
        id_key: &str,
        id: &str,
        fields: Document,
    ) -> RepoResult<u64> {
        Ok(
            self.get_collection(collection)
                .update_one(
                    Self::id_filter(id_key, id),
                    doc! { "$set": fields },
                )
                .await
                .map_err(RepoError::backend)?
                .matched_count
        )
    }

    async fn find_one(
        &self,
        collection: &str,
        id_key: &str,
        id: &str,
    ) -> RepoResult<Option<Document>> {
        Ok(
            self.get_collection(collection)
                .find_one(Self::id_filter(id_key, id))
                .await
                .map_err(RepoError::backend)?
                .map(Self::restore_document)
        )
    }

    async fn shutdown(self) -> RepoResult<()> {
        self.shutdown().await
    }
}

/// Builds [`MongoDbStore`] backends from a [`RepoConfig`].
///
/// The connection URL is parsed into driver options, with connection and server
/// selection bounded by the configured connect timeout. The server is pinged before
/// the backend is handed out.
#[derive(Debug, Default, Clone)]
pub struct MongoDbStoreBuilder {
    app_name: Option<String>,
}

impl MongoDbStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name reported to the server in the connection handshake.
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    fn client_options(&self, mut options: ClientOptions, config: &RepoConfig) -> ClientOptions {
        options.connect_timeout = Some(config.connect_timeout);
        options.server_selection_timeout = Some(config.connect_timeout);

        if let Some(app_name) = &self.app_name {
            options.app_name = Some(app_name.clone());
        }

        options
    }
}

#[async_trait]
impl StoreBackendBuilder for MongoDbStoreBuilder {
    type Backend = MongoDbStore;

    async fn build(&self, config: &RepoConfig) -> RepoResult<Self::Backend> {
        let options = ClientOptions::parse(&config.url)
            .await
            .map_err(RepoError::connection)?;

        let client = Client::with_options(self.client_options(options, config))
            .map_err(RepoError::connection)?;

        if let Err(err) = client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
        {
            client.shutdown().await;
            return Err(RepoError::connection(err));
        }

        info!(url = %config.redacted_url(), database = %config.database, "connected to mongodb");

        Ok(MongoDbStore::new(client, config.database.clone()))
    }
}
