//! DynamoDB ticket store.
//!
//! Maps the [`TicketStore`] contract onto single DynamoDB requests:
//!
//! | Operation | Request |
//! |---|---|
//! | `get` | `GetItem` (strongly consistent) |
//! | `put` | `PutItem` |
//! | `patch` | `UpdateItem` with one `SET` clause per patch entry |
//! | `delete` | `DeleteItem` with `ReturnValues=ALL_OLD` |
//! | `scan_all` | `Scan`, following `LastEvaluatedKey` until exhausted |
//! | `health_check` | `DescribeTable` |

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::{
    Client,
    config::Credentials,
    error::DisplayErrorContext,
    types::{
        AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
        ReturnValue, ScalarAttributeType,
    },
};
use fixit_core::{Ticket, TicketId, TicketPatch, Timestamp};
use secrecy::ExposeSecret;

use super::{StoreError, TicketStore};
use crate::config::StoreConfig;

/// Partition key attribute.
const KEY_ATTRIBUTE: &str = "id";

type Item = HashMap<String, AttributeValue>;

/// DynamoDB-backed ticket store.
#[derive(Debug, Clone)]
pub struct DynamoTicketStore {
    client: Client,
    table_name: String,
}

impl DynamoTicketStore {
    /// Create a store from an existing SDK client.
    #[must_use]
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Create a store from configuration.
    ///
    /// Uses static keys when configured, otherwise the SDK default provider
    /// chain (environment, shared profile, web identity / assumed role,
    /// instance metadata).
    pub async fn from_config(config: &StoreConfig) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));

        if let Some(creds) = &config.credentials {
            loader = loader.credentials_provider(Credentials::new(
                creds.access_key_id.clone(),
                creds.secret_access_key.expose_secret().to_owned(),
                None,
                None,
                "fixit-static",
            ));
        }

        if let Some(endpoint) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        tracing::info!(
            table = %config.table_name,
            region = %config.region,
            static_credentials = config.credentials.is_some(),
            "DynamoDB client configured"
        );

        Self::new(Client::new(&sdk_config), config.table_name.clone())
    }

    /// Table this store reads and writes.
    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Create the ticket table (on-demand billing, `id` string hash key).
    ///
    /// Returns `Ok(false)` if the table already exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Backend` if the request fails for any other reason.
    pub async fn create_table(&self) -> Result<bool, StoreError> {
        let key_schema = KeySchemaElement::builder()
            .attribute_name(KEY_ATTRIBUTE)
            .key_type(KeyType::Hash)
            .build()
            .map_err(|e| StoreError::Backend(format!("invalid key schema: {e}")))?;
        let attribute = AttributeDefinition::builder()
            .attribute_name(KEY_ATTRIBUTE)
            .attribute_type(ScalarAttributeType::S)
            .build()
            .map_err(|e| StoreError::Backend(format!("invalid attribute definition: {e}")))?;

        let result = self
            .client
            .create_table()
            .table_name(&self.table_name)
            .key_schema(key_schema)
            .attribute_definitions(attribute)
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(e)
                if e.as_service_error()
                    .is_some_and(|se| se.is_resource_in_use_exception()) =>
            {
                Ok(false)
            }
            Err(e) => Err(backend_error("CreateTable", e)),
        }
    }

    fn key(id: &TicketId) -> Item {
        HashMap::from([(
            KEY_ATTRIBUTE.to_string(),
            AttributeValue::S(id.as_str().to_owned()),
        )])
    }
}

#[async_trait]
impl TicketStore for DynamoTicketStore {
    async fn get(&self, id: &TicketId) -> Result<Option<Ticket>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key(id)))
            .consistent_read(true)
            .send()
            .await
            .map_err(|e| backend_error("GetItem", e))?;

        output.item.map(item_to_ticket).transpose()
    }

    async fn put(&self, ticket: &Ticket) -> Result<(), StoreError> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(ticket_to_item(ticket)))
            .send()
            .await
            .map_err(|e| backend_error("PutItem", e))?;
        Ok(())
    }

    async fn patch(&self, id: &TicketId, patch: &TicketPatch) -> Result<(), StoreError> {
        let expression = UpdateExpression::from_patch(patch);

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key(id)))
            .update_expression(expression.set_clause)
            // Never upsert a ticket deleted since the existence check
            .condition_expression("attribute_exists(#id)")
            .set_expression_attribute_names(Some(expression.names))
            .set_expression_attribute_values(Some(expression.values))
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e)
                if e.as_service_error()
                    .is_some_and(|se| se.is_conditional_check_failed_exception()) =>
            {
                Err(StoreError::NotFound)
            }
            Err(e) => Err(backend_error("UpdateItem", e)),
        }
    }

    async fn delete(&self, id: &TicketId) -> Result<(), StoreError> {
        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key(id)))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| backend_error("DeleteItem", e))?;

        if output.attributes.is_some_and(|attrs| !attrs.is_empty()) {
            Ok(())
        } else {
            Err(StoreError::NotFound)
        }
    }

    async fn scan_all(&self) -> Result<Vec<Ticket>, StoreError> {
        let mut tickets = Vec::new();
        let mut start_key: Option<Item> = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| backend_error("Scan", e))?;

            for item in output.items.unwrap_or_default() {
                tickets.push(item_to_ticket(item)?);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(tickets)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| backend_error("DescribeTable", e))?;
        Ok(())
    }
}

/// `SET` expression with placeholder names and values.
///
/// Attribute names always go through `#placeholders` (`status` is a DynamoDB
/// reserved word).
#[derive(Debug)]
struct UpdateExpression {
    set_clause: String,
    names: HashMap<String, String>,
    values: Item,
}

impl UpdateExpression {
    fn from_patch(patch: &TicketPatch) -> Self {
        let mut clauses = Vec::with_capacity(patch.entries().len());
        let mut names = HashMap::from([("#id".to_string(), KEY_ATTRIBUTE.to_string())]);
        let mut values = HashMap::new();

        for entry in patch.entries() {
            let attribute = entry.field().attribute_name();
            clauses.push(format!("#{attribute} = :{attribute}"));
            names.insert(format!("#{attribute}"), attribute.to_string());
            values.insert(format!(":{attribute}"), AttributeValue::S(entry.value()));
        }

        Self {
            set_clause: format!("SET {}", clauses.join(", ")),
            names,
            values,
        }
    }
}

fn backend_error<E>(operation: &str, err: E) -> StoreError
where
    E: std::error::Error,
{
    let message = format!("{operation}: {}", DisplayErrorContext(err));
    tracing::error!(operation, error = %message, "DynamoDB request failed");
    StoreError::Backend(message)
}

// =============================================================================
// Item Conversion
// =============================================================================

fn ticket_to_item(ticket: &Ticket) -> Item {
    let s = |v: &str| AttributeValue::S(v.to_owned());
    HashMap::from([
        (KEY_ATTRIBUTE.to_string(), s(ticket.id.as_str())),
        ("title".to_string(), s(&ticket.title)),
        ("description".to_string(), s(&ticket.description)),
        ("priority".to_string(), s(ticket.priority.as_str())),
        ("status".to_string(), s(ticket.status.as_str())),
        ("created_by".to_string(), s(&ticket.created_by)),
        ("created_at".to_string(), s(&ticket.created_at.to_string())),
        ("updated_at".to_string(), s(&ticket.updated_at.to_string())),
    ])
}

fn item_to_ticket(item: Item) -> Result<Ticket, StoreError> {
    let text = |name: &str| -> Result<&str, StoreError> {
        match item.get(name) {
            Some(AttributeValue::S(value)) => Ok(value.as_str()),
            Some(_) => Err(StoreError::DataCorruption(format!(
                "attribute '{name}' is not a string"
            ))),
            None => Err(StoreError::DataCorruption(format!(
                "missing attribute '{name}'"
            ))),
        }
    };
    let timestamp = |name: &str| -> Result<Timestamp, StoreError> {
        Timestamp::parse(text(name)?)
            .map_err(|e| StoreError::DataCorruption(format!("attribute '{name}': {e}")))
    };

    let id = TicketId::new(text(KEY_ATTRIBUTE)?);
    let priority = text("priority")?.parse().map_err(|e: String| {
        StoreError::DataCorruption(format!("ticket {id}: {e}"))
    })?;
    let status = text("status")?.parse().map_err(|e: String| {
        StoreError::DataCorruption(format!("ticket {id}: {e}"))
    })?;

    Ok(Ticket {
        title: text("title")?.to_owned(),
        description: text("description")?.to_owned(),
        priority,
        status,
        created_by: text("created_by")?.to_owned(),
        created_at: timestamp("created_at")?,
        updated_at: timestamp("updated_at")?,
        id,
    })
}
