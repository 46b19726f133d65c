//! Admin GraphQL request documents and response shapes.
//!
//! Every response is wrapped in the standard `{ data, errors? }` envelope.
//! Shopify reports query-level problems (unknown fields, access scopes,
//! throttling) in `errors` with an HTTP 200, so the envelope has to be
//! inspected even on success statuses.

use serde::Deserialize;
use staffsync_core::{LocationRecord, UserError};

/// Locations requested per page.
pub const LOCATIONS_PAGE_SIZE: u32 = 100;

/// Contacts scanned per company when resolving the staff owner.
pub const CONTACTS_SCAN_LIMIT: u32 = 10;

pub(crate) const COMPANY_LOCATIONS_QUERY: &str = r"
query CompanyLocationsPage($first: Int!, $after: String) {
  companyLocations(first: $first, after: $after) {
    pageInfo {
      hasNextPage
      endCursor
    }
    edges {
      node {
        id
        name
        company {
          id
          name
        }
      }
    }
  }
}
";

pub(crate) const STAFF_BY_CONTACTS_QUERY: &str = r"
query StaffByContacts($id: ID!, $first: Int!, $namespace: String!, $key: String!) {
  companyLocation(id: $id) {
    company {
      contacts(first: $first) {
        edges {
          node {
            customer {
              metafield(namespace: $namespace, key: $key) {
                value
              }
            }
          }
        }
      }
    }
  }
}
";

pub(crate) const STAFF_BY_MAIN_CONTACT_QUERY: &str = r"
query StaffByMainContact($id: ID!, $namespace: String!, $key: String!) {
  companyLocation(id: $id) {
    company {
      mainContact {
        customer {
          metafield(namespace: $namespace, key: $key) {
            value
          }
        }
      }
    }
  }
}
";

pub(crate) const ASSIGN_STAFF_MUTATION: &str = r"
mutation AssignStaffToLocation($companyLocationId: ID!, $staffMemberIds: [ID!]!) {
  companyLocationAssignStaffMembers(companyLocationId: $companyLocationId, staffMemberIds: $staffMemberIds) {
    userErrors {
      field
      message
    }
  }
}
";

// ---------------------------------------------------------------------------
// Envelope
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<GraphQlErrorExtensions>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GraphQlErrorExtensions {
    pub code: Option<String>,
}

impl GraphQlError {
    pub(crate) fn is_throttled(&self) -> bool {
        self.extensions
            .as_ref()
            .and_then(|e| e.code.as_deref())
            .is_some_and(|code| code == "THROTTLED")
    }
}

// ---------------------------------------------------------------------------
// Connections
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub end_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Connection<T> {
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
    pub page_info: Option<PageInfo>,
}

/// One page of company locations with its pagination cursor.
#[derive(Debug)]
pub struct LocationsPage {
    pub locations: Vec<LocationRecord>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CompanyLocationsData {
    pub company_locations: Connection<LocationRecord>,
}

// ---------------------------------------------------------------------------
// Staff lookup
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StaffLookupData {
    pub company_location: Option<StaffLookupLocation>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StaffLookupLocation {
    pub company: Option<StaffLookupCompany>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StaffLookupCompany {
    #[serde(default)]
    pub contacts: Option<Connection<ContactNode>>,
    #[serde(default)]
    pub main_contact: Option<ContactNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContactNode {
    pub customer: Option<CustomerNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CustomerNode {
    pub metafield: Option<MetafieldNode>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MetafieldNode {
    pub value: Option<String>,
}

impl ContactNode {
    pub(crate) fn staff_email(&self) -> Option<&str> {
        self.customer
            .as_ref()?
            .metafield
            .as_ref()?
            .value
            .as_deref()
    }
}

// ---------------------------------------------------------------------------
// Assignment mutation
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssignStaffData {
    pub company_location_assign_staff_members: Option<AssignStaffPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AssignStaffPayload {
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}
