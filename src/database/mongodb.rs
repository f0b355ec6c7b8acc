use crate::config::MongoDbConfig;
use crate::database::collections;
use anyhow::{anyhow, Result};
use log::{debug, error, info};
use mongodb::{
    bson::{doc, Document},
    options::{ClientOptions, IndexOptions, ServerApi, ServerApiVersion},
    Client, Collection, Database as MongoDatabase, IndexModel,
};
use std::sync::Arc;
use std::time::Duration;

/// Connected database handle; indexes are ensured on startup
#[derive(Debug, Clone)]
pub struct MongoDbClient {
    _client: Client,
    database: MongoDatabase,
}

impl MongoDbClient {
    /// Connect, ping and ensure indexes
    pub async fn init(config: &MongoDbConfig) -> Result<Arc<Self>> {
        info!("Connecting to MongoDB database {}", config.database);

        let mut options = ClientOptions::parse(&config.uri)
            .await
            .map_err(|e| anyhow!("Invalid MongoDB URI: {}", e))?;
        options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());
        let timeout = Duration::from_millis(config.connection_timeout_ms);
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);
        options.max_pool_size = config.max_pool_size.or(options.max_pool_size);

        let client = Client::with_options(options)
            .map_err(|e| anyhow!("Could not build MongoDB client: {}", e))?;
        let database = client.database(&config.database);

        if let Err(e) = database.run_command(doc! { "ping": 1 }).await {
            error!("MongoDB ping failed: {}", e);
            return Err(anyhow!("MongoDB is unreachable: {}", e));
        }
        info!("Connected to MongoDB database {}", config.database);

        let handle = Arc::new(Self {
            _client: client,
            database,
        });
        handle.create_indexes().await?;

        Ok(handle)
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.database.collection(name)
    }

    pub fn database(&self) -> MongoDatabase {
        self.database.clone()
    }

    pub async fn create_indexes(&self) -> Result<()> {
        let plan = index_plan();
        debug!("Ensuring indexes on {} collections", plan.len());

        for (collection, indexes) in plan {
            self.create_collection_indexes(collection, indexes).await?;
        }

        info!("MongoDB indexes are in place");
        Ok(())
    }

    async fn create_collection_indexes(
        &self,
        name: &str,
        indexes: Vec<(Document, IndexOptions)>,
    ) -> Result<()> {
        let collection = self.collection::<Document>(name);

        for (keys, options) in indexes {
            collection
                .create_index(IndexModel::builder().keys(keys).options(options).build())
                .await
                .map_err(|e| anyhow!("Failed to create {} index: {}", name, e))?;
        }

        Ok(())
    }
}

fn unique() -> IndexOptions {
    IndexOptions::builder().unique(true).build()
}

/// Indexes backing the storefront queries, grouped by collection
fn index_plan() -> Vec<(&'static str, Vec<(Document, IndexOptions)>)> {
    vec![
        (
            collections::PRODUCTS,
            vec![
                (doc! { "sku": 1 }, unique()),
                // Listing scope used by every diamond/jewelry query
                (
                    doc! { "product_type": 1, "is_active": 1, "created_at": -1 },
                    IndexOptions::default(),
                ),
                (doc! { "category": 1 }, IndexOptions::default()),
                (doc! { "price": 1 }, IndexOptions::default()),
                (doc! { "diamond.carat": 1 }, IndexOptions::default()),
                (doc! { "created_at": -1 }, IndexOptions::default()),
            ],
        ),
        (
            collections::CATEGORIES,
            vec![
                (doc! { "slug": 1 }, unique()),
                (doc! { "parent": 1 }, IndexOptions::default()),
            ],
        ),
        (collections::GUESTS, vec![(doc! { "guest_id": 1 }, unique())]),
        (
            collections::WISHLISTS,
            vec![
                (doc! { "guest_id": 1 }, unique()),
                (doc! { "product_ids": 1 }, IndexOptions::default()),
            ],
        ),
        (
            collections::QUOTES,
            vec![
                (doc! { "status": 1 }, IndexOptions::default()),
                (doc! { "created_at": -1 }, IndexOptions::default()),
            ],
        ),
        (
            collections::TESTIMONIALS,
            vec![(
                doc! { "published": 1, "created_at": -1 },
                IndexOptions::default(),
            )],
        ),
        (
            collections::EVENTS,
            vec![(doc! { "starts_at": 1 }, IndexOptions::default())],
        ),
        (
            collections::FORMS,
            vec![
                (doc! { "created_at": -1 }, IndexOptions::default()),
                (doc! { "kind": 1, "handled": 1 }, IndexOptions::default()),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_plan_has_unique_business_keys() {
        let plan = index_plan();
        let unique_keys: Vec<(&str, String)> = plan
            .iter()
            .flat_map(|(collection, indexes)| {
                indexes
                    .iter()
                    .filter(|(_, options)| options.unique == Some(true))
                    .map(move |(keys, _)| {
                        (*collection, keys.keys().next().cloned().unwrap_or_default())
                    })
            })
            .collect();

        assert!(unique_keys.contains(&(collections::PRODUCTS, "sku".to_string())));
        assert!(unique_keys.contains(&(collections::CATEGORIES, "slug".to_string())));
        assert!(unique_keys.contains(&(collections::GUESTS, "guest_id".to_string())));
        assert!(unique_keys.contains(&(collections::WISHLISTS, "guest_id".to_string())));
    }
}
