//! Authenticated request gateway
//!
//! Every authenticated call goes through [`LinkQrClient::request`]:
//!
//! 1. the descriptor is sent with the default headers merged under the
//!    caller's;
//! 2. a `401` triggers one session refresh (`POST {api}/auth/refresh`);
//! 3. after a successful refresh the identical request is sent once more and
//!    whatever comes back is returned, even another `401`;
//! 4. if the refresh fails the navigator is asked to show the login surface
//!    and [`GatewayOutcome::Unauthenticated`] is returned.
//!
//! Concurrent callers that hit a `401` at the same time each run their own
//! refresh; the backend's refresh endpoint has to tolerate that.

use super::descriptor::RequestDescriptor;
use super::error::{ClientError, error_message};
use super::LinkQrClient;
use bytes::Bytes;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

/// Result of a call through the gateway
#[derive(Debug)]
pub enum GatewayOutcome {
    /// The transport response, passed through untouched
    Ok(Response),
    /// The session expired and could not be refreshed
    Unauthenticated,
}

impl GatewayOutcome {
    /// The response, or [`ClientError::Unauthenticated`]
    pub fn into_response(self) -> Result<Response, ClientError> {
        match self {
            Self::Ok(response) => Ok(response),
            Self::Unauthenticated => Err(ClientError::Unauthenticated),
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::Unauthenticated)
    }
}

impl LinkQrClient {
    /// Send a request, refreshing the session and retrying once on `401`
    ///
    /// Statuses other than `401` are returned as they are; interpreting them
    /// is up to the caller. Transport failures of the request itself are
    /// returned as errors.
    #[instrument(skip_all, fields(method = %descriptor.method(), target = descriptor.target()))]
    pub async fn request(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<GatewayOutcome, ClientError> {
        let response = self.dispatch(descriptor).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(GatewayOutcome::Ok(response));
        }

        info!("Request unauthorized, refreshing session");
        if !self.refresh().await {
            warn!(login_path = %self.login_path, "Session refresh failed, redirecting to login");
            self.navigator.redirect_to_login(&self.login_path);
            return Ok(GatewayOutcome::Unauthenticated);
        }

        let retried = self.dispatch(descriptor).await?;
        debug!(status = %retried.status(), "Retried request after session refresh");
        Ok(GatewayOutcome::Ok(retried))
    }

    /// Ask the backend to renew the session
    ///
    /// Returns `true` for any 2xx answer. Other statuses and transport
    /// failures return `false`; this never fails.
    pub async fn refresh(&self) -> bool {
        let url = self.url(&self.api_path("/auth/refresh"));
        match self.client.post(url).send().await {
            Ok(response) if response.status().is_success() => {
                debug!(status = %response.status(), "Session refreshed");
                true
            }
            Ok(response) => {
                debug!(status = %response.status(), "Session refresh rejected");
                false
            }
            Err(err) => {
                warn!(error = %err, "Session refresh request failed");
                false
            }
        }
    }

    /// Send a descriptor once, without any session handling
    pub async fn dispatch(&self, descriptor: &RequestDescriptor) -> Result<Response, ClientError> {
        let headers = descriptor.merged_headers()?;
        let mut request = self
            .client
            .request(descriptor.method().clone(), self.url(descriptor.target()))
            .headers(headers);

        if !descriptor.query().is_empty() {
            request = request.query(descriptor.query());
        }
        if let Some(body) = descriptor.body_bytes() {
            request = request.body(body.clone());
        }

        debug!(method = %descriptor.method(), target = descriptor.target(), "Sending request");
        Ok(request.send().await?)
    }

    /// Send through the gateway and decode a JSON success body
    pub async fn execute_json<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<T, ClientError> {
        let response = self.request(descriptor).await?.into_response()?;
        decode_json(check_status(response).await?).await
    }

    /// Send through the gateway and discard a success body
    pub async fn execute_empty(&self, descriptor: &RequestDescriptor) -> Result<(), ClientError> {
        let response = self.request(descriptor).await?.into_response()?;
        check_status(response).await?;
        Ok(())
    }

    /// Send through the gateway and return the raw success body
    pub async fn execute_bytes(&self, descriptor: &RequestDescriptor) -> Result<Bytes, ClientError> {
        let response = self.request(descriptor).await?.into_response()?;
        Ok(check_status(response).await?.bytes().await?)
    }

    /// Send without session handling and decode a JSON success body
    pub async fn execute_public_json<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<T, ClientError> {
        let response = self.dispatch(descriptor).await?;
        decode_json(check_status(response).await?).await
    }
}

/// Turn a non-success status into the matching error
async fn check_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ClientError::from_status(status, error_message(status, body)))
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}
