//! DynamoDB table provisioning.
//!
//! # Environment Variables
//!
//! Same store variables as the server: `TABLE_NAME`, `AWS_REGION`,
//! `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`, `DYNAMODB_ENDPOINT`.

use fixit_server::config::{ConfigError, StoreBackend, StoreConfig};
use fixit_server::store::{DynamoTicketStore, StoreError};
use thiserror::Error;

/// Errors that can occur during table operations.
#[derive(Debug, Error)]
pub enum TableError {
    /// Store configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// `STORE_BACKEND` is not DynamoDB.
    #[error("STORE_BACKEND is 'memory'; nothing to provision")]
    NotDynamo,

    /// DynamoDB rejected the request.
    #[error("DynamoDB error: {0}")]
    Store(#[from] StoreError),
}

/// Create the ticket table; an existing table is reported, not an error.
///
/// # Errors
///
/// Returns `TableError` if configuration is invalid or DynamoDB fails.
pub async fn create() -> Result<(), TableError> {
    dotenvy::dotenv().ok();

    let config = StoreConfig::from_env()?;
    if config.backend != StoreBackend::DynamoDb {
        return Err(TableError::NotDynamo);
    }

    tracing::info!(
        table = %config.table_name,
        region = %config.region,
        "Creating ticket table..."
    );
    let store = DynamoTicketStore::from_config(&config).await;

    if store.create_table().await? {
        tracing::info!(table = %store.table_name(), "Table created");
    } else {
        tracing::info!(table = %store.table_name(), "Table already exists");
    }

    Ok(())
}
