//! Authentication API client methods

use super::{ClientError, LinkQrClient, RequestDescriptor};
use crate::types::{LoginRequest, RegisterRequest, UserResponse};
use tracing::{info, warn};

impl LinkQrClient {
    /// Log in; the backend answers with session cookies kept by the transport
    pub async fn login(&self, request: &LoginRequest) -> Result<UserResponse, ClientError> {
        request.validate()?;
        let descriptor = RequestDescriptor::post(self.api_path("/auth/login")).json(request)?;
        let user: UserResponse = self.execute_public_json(&descriptor).await?;
        info!(user_id = user.id, "Logged in");
        Ok(user)
    }

    /// Create an account
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserResponse, ClientError> {
        request.validate()?;
        let descriptor = RequestDescriptor::post(self.api_path("/auth/register")).json(request)?;
        self.execute_public_json(&descriptor).await
    }

    /// Get current user info (requires authentication)
    pub async fn me(&self) -> Result<UserResponse, ClientError> {
        self.execute_json(&RequestDescriptor::get(self.api_path("/auth/me")))
            .await
    }

    /// End the session and send the user to the login surface
    ///
    /// The backend clears its cookies whatever the status, so only a
    /// transport failure is an error here.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let url = self.url(&self.api_path("/auth/logout"));
        let response = self.client.post(url).send().await.inspect_err(|err| {
            warn!(error = %err, "Logout request failed");
        })?;
        info!(status = %response.status(), "Logged out");
        self.navigator.redirect_to_login(&self.login_path);
        Ok(())
    }
}
