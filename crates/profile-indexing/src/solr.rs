//! Solr index client.
//!
//! Upserts go through the v2 collections API, retracts through the classic
//! core update handler with a delete-by-query. Both commit immediately:
//!
//! - `POST {base}/api/collections/{collection}/update?commit=true`
//! - `POST {base}/solr/{collection}/update?commit=true`

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::client::{IndexClient, IndexOutcome};
use crate::error::IndexError;
use profile_types::{IndexDocument, ProfileRecord, SolrSettings};

/// Index client over the Solr HTTP update API.
#[derive(Clone)]
pub struct SolrIndexClient {
    client: Client,
    base_url: String,
    collection: String,
}

impl SolrIndexClient {
    /// Build a client whose every request is bounded by the configured timeout.
    pub fn new(settings: &SolrSettings) -> Result<Self, IndexError> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| IndexError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: settings.url.trim_end_matches('/').to_string(),
            collection: settings.collection.clone(),
        })
    }

    pub fn upsert_url(&self) -> String {
        format!(
            "{}/api/collections/{}/update?commit=true",
            self.base_url, self.collection
        )
    }

    pub fn retract_url(&self) -> String {
        format!("{}/solr/{}/update?commit=true", self.base_url, self.collection)
    }

    /// Delete-by-query body matching exactly one identifier.
    pub fn retract_body(id: Uuid) -> serde_json::Value {
        json!({ "delete": { "query": format!("id:\"{}\"", id) } })
    }

    async fn upsert(&self, record: &ProfileRecord) -> Result<IndexOutcome, IndexError> {
        let document = IndexDocument::from(record);
        let body = document.to_bytes()?;

        debug!(profile_id = %record.id, version = record.version, "Upserting profile document");
        let response = self
            .client
            .post(self.upsert_url())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        Self::check(response, record.id).await?;
        Ok(IndexOutcome::Upserted)
    }

    async fn retract(&self, record: &ProfileRecord) -> Result<IndexOutcome, IndexError> {
        debug!(profile_id = %record.id, "Retracting profile document");
        let response = self
            .client
            .post(self.retract_url())
            .json(&Self::retract_body(record.id))
            .send()
            .await?;

        Self::check(response, record.id).await?;
        Ok(IndexOutcome::Retracted)
    }

    async fn check(response: reqwest::Response, id: Uuid) -> Result<(), IndexError> {
        let status = response.status();
        if status == StatusCode::OK {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        warn!(profile_id = %id, status = status.as_u16(), "Solr rejected update");
        Err(IndexError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl IndexClient for SolrIndexClient {
    async fn apply(&self, record: &ProfileRecord) -> Result<IndexOutcome, IndexError> {
        if record.is_deleted {
            self.retract(record).await
        } else {
            self.upsert(record).await
        }
    }

    fn name(&self) -> &str {
        "solr"
    }
}
