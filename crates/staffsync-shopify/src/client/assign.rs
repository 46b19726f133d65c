use staffsync_core::AssignmentResult;

use crate::error::ShopifyError;
use crate::types::{AssignStaffData, ASSIGN_STAFF_MUTATION};

use super::AdminClient;

impl AdminClient {
    /// Assigns `staff_member_id` to the company location.
    ///
    /// Sent once with no automatic retry. Shopify treats re-assigning the same
    /// staff member as a no-op, so callers may repeat the call safely.
    ///
    /// `userErrors` come back inside `Ok`; check
    /// [`AssignmentResult::is_success`].
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::GraphQl`] for a top-level `errors` array.
    /// - [`ShopifyError::MissingData`] if the mutation payload is `null`.
    /// - [`ShopifyError::Http`] / [`ShopifyError::UnexpectedStatus`] /
    ///   [`ShopifyError::Deserialize`] for transport and parse failures.
    pub async fn assign_staff(
        &self,
        company_location_id: &str,
        staff_member_id: &str,
    ) -> Result<AssignmentResult, ShopifyError> {
        let data: AssignStaffData = self
            .execute(
                "companyLocationAssignStaffMembers",
                ASSIGN_STAFF_MUTATION,
                serde_json::json!({
                    "companyLocationId": company_location_id,
                    "staffMemberIds": [staff_member_id],
                }),
                0,
            )
            .await?;

        let payload = data
            .company_location_assign_staff_members
            .ok_or_else(|| ShopifyError::MissingData {
                operation: "companyLocationAssignStaffMembers".to_owned(),
                what: "mutation payload".to_owned(),
            })?;

        Ok(AssignmentResult {
            user_errors: payload.user_errors,
        })
    }
}
