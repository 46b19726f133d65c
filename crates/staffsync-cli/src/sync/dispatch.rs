//! Out-of-process forwarding of new locations to the assignment service.

use std::time::Duration;

use reqwest::Client;
use staffsync_core::AppConfig;

/// Result of forwarding one location. Never an `Err`: the batch only
/// counts and logs failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DispatchOutcome {
    Assigned { status: u16 },
    Failed { reason: String },
}

impl DispatchOutcome {
    pub(crate) fn is_assigned(&self) -> bool {
        matches!(self, Self::Assigned { .. })
    }
}

/// Client for `POST {base_url}/assign-staff`.
///
/// Each location is sent once. A non-2xx status or a transport error is
/// reported as [`DispatchOutcome::Failed`] and not retried.
pub(crate) struct AssignServiceClient {
    client: Client,
    endpoint: String,
    bearer_token: Option<String>,
}

impl AssignServiceClient {
    pub(crate) fn new(
        base_url: &str,
        bearer_token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/assign-staff", base_url.trim_end_matches('/')),
            bearer_token,
        })
    }

    pub(crate) fn from_app_config(config: &AppConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            &config.assign_service_url,
            config.assign_service_token.clone(),
            config.http_timeout_secs,
        )
    }

    /// Forwards `location_id` as `{ "admin_graphql_api_id": ... }`.
    pub(crate) async fn dispatch(&self, location_id: &str) -> DispatchOutcome {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "admin_graphql_api_id": location_id }));
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        match request.send().await {
            Ok(response) if response.status().is_success() => DispatchOutcome::Assigned {
                status: response.status().as_u16(),
            },
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                DispatchOutcome::Failed {
                    reason: format!("assignment service returned {status}: {}", snippet(&body)),
                }
            }
            Err(e) => DispatchOutcome::Failed {
                reason: format!("request to assignment service failed: {e}"),
            },
        }
    }
}

fn snippet(body: &str) -> String {
    const MAX: usize = 200;
    let trimmed = body.trim();
    if trimmed.chars().count() > MAX {
        format!("{}...", trimmed.chars().take(MAX).collect::<String>())
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let client = AssignServiceClient::new("http://svc.internal:8080/", None, 5).unwrap();
        assert_eq!(client.endpoint, "http://svc.internal:8080/assign-staff");
    }

    #[test]
    fn snippet_caps_long_bodies() {
        let body = "x".repeat(500);
        assert_eq!(snippet(&body).chars().count(), 203);
        assert_eq!(snippet("  short  "), "short");
    }
}
