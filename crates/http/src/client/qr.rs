//! QR code client methods

use super::{ClientError, LinkQrClient, RequestDescriptor};
use crate::types::{
    DownloadFormat, QrCodeCreateRequest, QrCodeListResponse, QrCodePreviewRequest,
    QrCodePreviewResponse, QrCodeResponse, QrCodeUpdateRequest,
};
use bytes::Bytes;
use linkqr_core::QrListQuery;

impl LinkQrClient {
    /// List the current user's QR codes, newest first
    pub async fn list_qr_codes(&self, query: &QrListQuery) -> Result<QrCodeListResponse, ClientError> {
        query.validate()?;
        let mut descriptor = RequestDescriptor::get(self.api_path("/qr"))
            .query_param("page", query.page)
            .query_param("per_page", query.per_page);
        if let Some(search) = &query.search {
            descriptor = descriptor.query_param("search", search);
        }
        self.execute_json(&descriptor).await
    }

    /// Get a QR code by id
    pub async fn get_qr_code(&self, id: i64) -> Result<QrCodeResponse, ClientError> {
        self.execute_json(&RequestDescriptor::get(self.api_path(&format!("/qr/{id}"))))
            .await
    }

    /// Render a QR code without storing it
    pub async fn preview_qr_code(
        &self,
        request: &QrCodePreviewRequest,
    ) -> Result<QrCodePreviewResponse, ClientError> {
        let descriptor =
            RequestDescriptor::post(self.api_path("/qr/preview")).json(&request.validated()?)?;
        self.execute_json(&descriptor).await
    }

    /// Create and store a QR code
    pub async fn create_qr_code(
        &self,
        request: &QrCodeCreateRequest,
    ) -> Result<QrCodeResponse, ClientError> {
        let descriptor = RequestDescriptor::post(self.api_path("/qr")).json(&request.validated()?)?;
        self.execute_json(&descriptor).await
    }

    /// Change the title of a QR code
    pub async fn update_qr_code(
        &self,
        id: i64,
        request: &QrCodeUpdateRequest,
    ) -> Result<QrCodeResponse, ClientError> {
        let descriptor =
            RequestDescriptor::patch(self.api_path(&format!("/qr/{id}"))).json(request)?;
        self.execute_json(&descriptor).await
    }

    /// Delete a QR code
    pub async fn delete_qr_code(&self, id: i64) -> Result<(), ClientError> {
        self.execute_empty(&RequestDescriptor::delete(self.api_path(&format!("/qr/{id}"))))
            .await
    }

    /// Download the rendered image; the server counts the download
    pub async fn download_qr_code(
        &self,
        id: i64,
        format: DownloadFormat,
    ) -> Result<Bytes, ClientError> {
        let path = self.api_path(&format!("/qr/{id}/download/{format}"));
        self.execute_bytes(&RequestDescriptor::get(path)).await
    }
}
