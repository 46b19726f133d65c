//! `POST /assign-staff`: resolve a staff owner for one company location and
//! assign them through the Admin API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use super::{ApiError, AppState, ResponseMeta};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct AssignStaffRequest {
    #[serde(default)]
    admin_graphql_api_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct AssignStaffResponse {
    success: bool,
    staff_member_id: String,
    /// How the staff member was chosen: `mapped`, `unknown_email`, or `no_candidate`.
    resolution: &'static str,
    meta: ResponseMeta,
}

pub(super) async fn assign_staff(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<AssignStaffRequest>, JsonRejection>,
) -> Result<Json<AssignStaffResponse>, ApiError> {
    let request_id = req_id.0;

    let Json(body) = payload.map_err(|rejection| {
        ApiError::new(request_id.clone(), "bad_request", "request body is not valid JSON")
            .with_details(serde_json::Value::String(rejection.body_text()))
    })?;

    let location_id = body
        .admin_graphql_api_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            ApiError::new(
                request_id.clone(),
                "validation_error",
                "admin_graphql_api_id is required",
            )
            .with_details(serde_json::json!({ "field": "admin_graphql_api_id" }))
        })?;

    let email = state.client.resolve_staff_email(location_id).await;
    let assignment = state.directory.staff_for(email.as_deref());

    if assignment.source.is_default() {
        let misses = state.record_resolution_miss();
        tracing::info!(
            location_id,
            staff_member_id = %assignment.staff_member_id,
            resolution = "default",
            source = assignment.source.label(),
            resolution_misses = misses,
            "no mapped staff member; assigning default"
        );
    }

    let result = state
        .client
        .assign_staff(location_id, &assignment.staff_member_id)
        .await
        .map_err(|e| {
            tracing::error!(location_id, error = %e, "staff assignment mutation failed");
            ApiError::new(
                request_id.clone(),
                "upstream_error",
                "Shopify Admin API request failed",
            )
            .with_details(serde_json::Value::String(e.to_string()))
        })?;

    if !result.is_success() {
        tracing::warn!(
            location_id,
            staff_member_id = %assignment.staff_member_id,
            user_errors = result.user_errors.len(),
            "staff assignment rejected"
        );
        let details = serde_json::to_value(&result.user_errors).unwrap_or_default();
        return Err(ApiError::new(
            request_id,
            "assignment_rejected",
            "Shopify rejected the staff assignment",
        )
        .with_details(details));
    }

    tracing::info!(
        location_id,
        staff_member_id = %assignment.staff_member_id,
        resolution = assignment.source.label(),
        "staff member assigned"
    );

    Ok(Json(AssignStaffResponse {
        success: true,
        staff_member_id: assignment.staff_member_id,
        resolution: assignment.source.label(),
        meta: ResponseMeta::new(request_id),
    }))
}
