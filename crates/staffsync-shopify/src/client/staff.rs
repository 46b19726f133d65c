//! Staff owner lookup through company contact metafields.

use staffsync_core::StaffResolution;

use crate::error::ShopifyError;
use crate::types::{
    StaffLookupData, CONTACTS_SCAN_LIMIT, STAFF_BY_CONTACTS_QUERY, STAFF_BY_MAIN_CONTACT_QUERY,
};

use super::AdminClient;

/// Returns the first present, non-blank value in iteration order.
///
/// A blank or whitespace-only value counts as absent and is skipped, so
/// `["", "a@x.com"]` yields `a@x.com`. Later values are ignored even if they
/// differ; contact order is the only tie-break.
pub fn first_staff_email<'a, I>(values: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    values
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(ToOwned::to_owned)
}

impl AdminClient {
    /// Resolves the staff email recorded on the location's company contacts.
    ///
    /// Never fails: an unknown location, a company without contacts, a
    /// missing metafield, or any transport/GraphQL error all yield `None`.
    /// Errors are logged at `warn`.
    pub async fn resolve_staff_email(&self, location_id: &str) -> Option<String> {
        match self.try_resolve_staff_email(location_id).await {
            Ok(email) => email,
            Err(e) => {
                tracing::warn!(
                    location_id,
                    strategy = %self.options.staff_resolution,
                    error = %e,
                    "staff lookup failed; treating as no candidate"
                );
                None
            }
        }
    }

    /// Same lookup as [`Self::resolve_staff_email`] but with errors surfaced.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError`] for transport, GraphQL, or parse failures.
    pub async fn try_resolve_staff_email(
        &self,
        location_id: &str,
    ) -> Result<Option<String>, ShopifyError> {
        let namespace = &self.options.metafield_namespace;
        let key = &self.options.metafield_key;

        let data: StaffLookupData = match self.options.staff_resolution {
            StaffResolution::Contacts => {
                self.execute(
                    "staffByContacts",
                    STAFF_BY_CONTACTS_QUERY,
                    serde_json::json!({
                        "id": location_id,
                        "first": CONTACTS_SCAN_LIMIT,
                        "namespace": namespace,
                        "key": key,
                    }),
                    self.options.read_max_retries,
                )
                .await?
            }
            StaffResolution::MainContact => {
                self.execute(
                    "staffByMainContact",
                    STAFF_BY_MAIN_CONTACT_QUERY,
                    serde_json::json!({
                        "id": location_id,
                        "namespace": namespace,
                        "key": key,
                    }),
                    self.options.read_max_retries,
                )
                .await?
            }
        };

        let Some(company) = data.company_location.and_then(|loc| loc.company) else {
            tracing::warn!(location_id, "company location or its company not found");
            return Ok(None);
        };

        let email = match self.options.staff_resolution {
            StaffResolution::Contacts => company.contacts.and_then(|contacts| {
                first_staff_email(contacts.edges.iter().map(|edge| edge.node.staff_email()))
            }),
            StaffResolution::MainContact => company
                .main_contact
                .and_then(|contact| first_staff_email([contact.staff_email()])),
        };

        Ok(email)
    }
}
