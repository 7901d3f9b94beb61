//! linkqr HTTP module
//!
//! Wire types for the linkqr backend and, behind the `client` feature, the
//! session-aware client that talks to it.

pub mod types;

#[cfg(feature = "client")]
pub mod client;

#[cfg(feature = "client")]
pub use client::{
    ClientError, GatewayOutcome, LinkQrClient, LinkQrClientBuilder, Navigator, RequestDescriptor,
};
