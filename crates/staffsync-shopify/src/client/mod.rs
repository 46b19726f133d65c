//! HTTP client for the Shopify Admin GraphQL API.

mod assign;
mod locations;
mod staff;

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use staffsync_core::{AppConfig, StaffResolution};

use crate::error::ShopifyError;
use crate::retry::retry_with_backoff;
use crate::types::GraphQlResponse;

pub use staff::first_staff_email;

/// Maximum number of location pages to fetch before returning an error.
/// Prevents infinite loops on a cursor that never terminates.
pub(crate) const MAX_PAGES: usize = 500;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Tuning knobs for [`AdminClient`].
#[derive(Debug, Clone)]
pub struct AdminClientOptions {
    pub timeout_secs: u64,
    /// Additional attempts for read queries on transient errors.
    pub read_max_retries: u32,
    pub backoff_base_ms: u64,
    pub staff_resolution: StaffResolution,
    pub metafield_namespace: String,
    pub metafield_key: String,
}

impl Default for AdminClientOptions {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            read_max_retries: 1,
            backoff_base_ms: 500,
            staff_resolution: StaffResolution::Contacts,
            metafield_namespace: "custom".to_string(),
            metafield_key: "assigned_staff_email".to_string(),
        }
    }
}

impl AdminClientOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            timeout_secs: config.http_timeout_secs,
            read_max_retries: config.read_max_retries,
            backoff_base_ms: config.retry_backoff_base_ms,
            staff_resolution: config.staff_resolution,
            metafield_namespace: config.staff_metafield_namespace.clone(),
            metafield_key: config.staff_metafield_key.clone(),
        }
    }
}

/// Client for one store's Admin GraphQL endpoint.
///
/// Reads (location pages, staff lookups) are retried on transient errors
/// up to `read_max_retries` times. The assignment mutation is sent exactly
/// once.
pub struct AdminClient {
    client: Client,
    endpoint: Url,
    access_token: String,
    options: AdminClientOptions,
}

impl AdminClient {
    /// Creates a client for the given GraphQL endpoint
    /// (`https://{shop}/admin/api/{version}/graphql.json`).
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ShopifyError::InvalidEndpoint`] if
    /// `endpoint` is not a valid URL.
    pub fn new(
        endpoint: &str,
        access_token: &str,
        options: AdminClientOptions,
    ) -> Result<Self, ShopifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("staffsync/0.1 (location-staff-sync)")
            .build()?;

        let endpoint = Url::parse(endpoint).map_err(|e| ShopifyError::InvalidEndpoint {
            endpoint: endpoint.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            endpoint,
            access_token: access_token.to_owned(),
            options,
        })
    }

    /// Creates a client from the store domain, token, and tuning in `config`.
    ///
    /// # Errors
    ///
    /// See [`AdminClient::new`].
    pub fn from_app_config(config: &AppConfig) -> Result<Self, ShopifyError> {
        Self::new(
            &config.shopify_graphql_endpoint(),
            &config.shopify_admin_token,
            AdminClientOptions::from_app_config(config),
        )
    }

    /// Posts a GraphQL document and returns the `data` member.
    ///
    /// A non-empty `errors` array is an error even when `data` is present.
    /// `THROTTLED` errors and HTTP 429 map to [`ShopifyError::RateLimited`] so
    /// the retry loop can back off.
    async fn execute<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        query: &'static str,
        variables: serde_json::Value,
        max_retries: u32,
    ) -> Result<T, ShopifyError> {
        let body = serde_json::json!({ "query": query, "variables": variables });

        retry_with_backoff(max_retries, self.options.backoff_base_ms, || {
            let body = &body;
            async move {
                let response = self
                    .client
                    .post(self.endpoint.clone())
                    .header(ACCESS_TOKEN_HEADER, &self.access_token)
                    .json(body)
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(2);
                    return Err(ShopifyError::RateLimited {
                        operation: operation.to_owned(),
                        retry_after_secs,
                    });
                }

                if !status.is_success() {
                    return Err(ShopifyError::UnexpectedStatus {
                        status: status.as_u16(),
                        operation: operation.to_owned(),
                    });
                }

                let text = response.text().await?;
                let envelope: GraphQlResponse<T> =
                    serde_json::from_str(&text).map_err(|e| ShopifyError::Deserialize {
                        context: operation.to_owned(),
                        source: e,
                    })?;

                if let Some(errors) = envelope.errors.filter(|errs| !errs.is_empty()) {
                    if errors.iter().any(crate::types::GraphQlError::is_throttled) {
                        return Err(ShopifyError::RateLimited {
                            operation: operation.to_owned(),
                            retry_after_secs: 1,
                        });
                    }
                    return Err(ShopifyError::GraphQl {
                        operation: operation.to_owned(),
                        messages: errors.into_iter().map(|e| e.message).collect(),
                    });
                }

                envelope.data.ok_or_else(|| ShopifyError::MissingData {
                    operation: operation.to_owned(),
                    what: "data".to_owned(),
                })
            }
        })
        .await
    }
}
