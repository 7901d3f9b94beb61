//! User preference client methods

use super::{ClientError, LinkQrClient, RequestDescriptor};
use crate::types::{DetailResponse, ThemeUpdateRequest};
use linkqr_core::Theme;

impl LinkQrClient {
    /// Store the theme preference on the server
    ///
    /// Best effort and usable without a session: an expired session is
    /// reported as an error but never refreshed or sent to the login surface.
    pub async fn update_theme(&self, theme: Theme) -> Result<DetailResponse, ClientError> {
        let descriptor = RequestDescriptor::patch(self.api_path("/users/me/theme"))
            .json(&ThemeUpdateRequest { theme })?;
        self.execute_public_json(&descriptor).await
    }
}
