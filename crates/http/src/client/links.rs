//! Short link client methods

use super::{ClientError, LinkQrClient, RequestDescriptor};
use crate::types::{LinkListQuery, ShortenRequest, UrlInfo, UrlResponse, UrlUpdateRequest};
use linkqr_core::validation::validate_lookup_code;

impl LinkQrClient {
    /// Shorten a URL anonymously
    pub async fn shorten(&self, request: &ShortenRequest) -> Result<UrlResponse, ClientError> {
        let descriptor = RequestDescriptor::post("/api/shorten").json(&request.validated()?)?;
        self.execute_public_json(&descriptor).await
    }

    /// Public information about a short code
    pub async fn link_info(&self, short_code: &str) -> Result<UrlInfo, ClientError> {
        validate_lookup_code(short_code)?;
        let descriptor = RequestDescriptor::get(format!("/api/info/{short_code}"));
        self.execute_public_json(&descriptor).await
    }

    /// Create a short link owned by the current user
    pub async fn create_link(&self, request: &ShortenRequest) -> Result<UrlResponse, ClientError> {
        let descriptor = RequestDescriptor::post(self.api_path("/links")).json(&request.validated()?)?;
        self.execute_json(&descriptor).await
    }

    /// List the current user's links
    pub async fn list_links(&self, query: &LinkListQuery) -> Result<Vec<UrlResponse>, ClientError> {
        query.validate()?;
        let mut descriptor = RequestDescriptor::get(self.api_path("/links"))
            .query_param("skip", query.skip)
            .query_param("limit", query.limit)
            .query_param("active_only", query.active_only);
        if let Some(search) = &query.search {
            descriptor = descriptor.query_param("search", search);
        }
        self.execute_json(&descriptor).await
    }

    /// Get link details
    pub async fn get_link(&self, id: i64) -> Result<UrlInfo, ClientError> {
        self.execute_json(&RequestDescriptor::get(self.api_path(&format!("/links/{id}"))))
            .await
    }

    /// Update title, tags or active flag of a link
    pub async fn update_link(
        &self,
        id: i64,
        request: &UrlUpdateRequest,
    ) -> Result<UrlResponse, ClientError> {
        let descriptor =
            RequestDescriptor::patch(self.api_path(&format!("/links/{id}"))).json(request)?;
        self.execute_json(&descriptor).await
    }

    /// Delete a link
    pub async fn delete_link(&self, id: i64) -> Result<(), ClientError> {
        self.execute_empty(&RequestDescriptor::delete(self.api_path(&format!("/links/{id}"))))
            .await
    }
}
