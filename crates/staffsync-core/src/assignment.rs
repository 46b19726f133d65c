use serde::{Deserialize, Serialize};

/// A field-level error returned by an Admin API mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserError {
    /// Path to the offending input field. Shopify sends `null` for
    /// errors that are not tied to a field.
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// Outcome of a `companyLocationAssignStaffMembers` call that reached Shopify.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentResult {
    pub user_errors: Vec<UserError>,
}

impl AssignmentResult {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.user_errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_user_errors_is_success() {
        assert!(AssignmentResult::default().is_success());
    }

    #[test]
    fn any_user_error_is_failure() {
        let result = AssignmentResult {
            user_errors: vec![UserError {
                field: Some(vec!["staffMemberIds".to_string()]),
                message: "Staff member does not exist".to_string(),
            }],
        };
        assert!(!result.is_success());
    }

    #[test]
    fn user_error_accepts_null_field() {
        let err: UserError =
            serde_json::from_value(serde_json::json!({"field": null, "message": "nope"}))
                .expect("parse");
        assert!(err.field.is_none());
    }
}
