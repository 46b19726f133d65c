//! Cursor-paginated company location fetch for `AdminClient`.

use staffsync_core::LocationRecord;

use crate::error::ShopifyError;
use crate::types::{
    CompanyLocationsData, LocationsPage, COMPANY_LOCATIONS_QUERY, LOCATIONS_PAGE_SIZE,
};

use super::{AdminClient, MAX_PAGES};

impl AdminClient {
    /// Fetches one page of company locations starting after `after`.
    ///
    /// # Errors
    ///
    /// - [`ShopifyError::GraphQl`] if the response carries an `errors` array.
    /// - [`ShopifyError::MissingData`] if `pageInfo` is absent.
    /// - [`ShopifyError::Http`] / [`ShopifyError::UnexpectedStatus`] /
    ///   [`ShopifyError::Deserialize`] for transport and parse failures, after
    ///   the configured read retries.
    pub async fn fetch_company_locations_page(
        &self,
        after: Option<&str>,
    ) -> Result<LocationsPage, ShopifyError> {
        let data: CompanyLocationsData = self
            .execute(
                "companyLocations",
                COMPANY_LOCATIONS_QUERY,
                serde_json::json!({ "first": LOCATIONS_PAGE_SIZE, "after": after }),
                self.options.read_max_retries,
            )
            .await?;

        let connection = data.company_locations;
        let page_info = connection
            .page_info
            .ok_or_else(|| ShopifyError::MissingData {
                operation: "companyLocations".to_owned(),
                what: "pageInfo".to_owned(),
            })?;

        Ok(LocationsPage {
            locations: connection.edges.into_iter().map(|e| e.node).collect(),
            page_info,
        })
    }

    /// Fetches every company location by following `endCursor` until
    /// `hasNextPage` is false.
    ///
    /// Locations are returned in server order. Any page failure, including a
    /// GraphQL `errors` response, discards the pages already fetched and
    /// returns the error: a truncated list would make every missing location
    /// look deleted and every later one look new.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_company_locations_page`].
    /// Returns [`ShopifyError::PaginationLimit`] past [`MAX_PAGES`] pages and
    /// [`ShopifyError::MissingCursor`] if a page claims more results without
    /// a cursor.
    pub async fn fetch_all_company_locations(&self) -> Result<Vec<LocationRecord>, ShopifyError> {
        let mut all_locations: Vec<LocationRecord> = Vec::new();
        let mut after: Option<String> = None;
        let mut page_count = 0usize;

        loop {
            page_count += 1;
            if page_count > MAX_PAGES {
                return Err(ShopifyError::PaginationLimit {
                    max_pages: MAX_PAGES,
                });
            }

            let page = self.fetch_company_locations_page(after.as_deref()).await?;
            tracing::debug!(
                page = page_count,
                received = page.locations.len(),
                has_next_page = page.page_info.has_next_page,
                "fetched company locations page"
            );
            all_locations.extend(page.locations);

            if !page.page_info.has_next_page {
                break;
            }
            after = Some(
                page.page_info
                    .end_cursor
                    .ok_or(ShopifyError::MissingCursor { page: page_count })?,
            );
        }

        Ok(all_locations)
    }
}
