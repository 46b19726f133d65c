//! Shopify Admin GraphQL client for company locations and staff assignment.

pub mod client;
pub mod error;
mod retry;
pub mod types;

pub use client::{first_staff_email, AdminClient, AdminClientOptions};
pub use error::ShopifyError;
pub use types::{LocationsPage, PageInfo, CONTACTS_SCAN_LIMIT, LOCATIONS_PAGE_SIZE};
