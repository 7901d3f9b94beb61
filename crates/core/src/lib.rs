//! linkqr core types and utilities

pub mod config;
pub mod error;
pub mod validation;
pub mod view;

pub use config::ClientConfig;
pub use error::{CoreError, CoreResult};
pub use view::{ErrorCorrection, QrListQuery, QrStyle, StyleSettings, Theme, ViewState};
