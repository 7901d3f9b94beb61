//! Wire types for the linkqr backend API

use linkqr_core::validation::{
    normalize_qr_content, validate_email, validate_not_empty, validate_range, validate_short_code,
};
use linkqr_core::{CoreError, CoreResult, StyleSettings, Theme, ViewState};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================
// Auth
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> CoreResult<()> {
        validate_email(&self.email, "email")?;
        validate_not_empty(&self.password, "password")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> CoreResult<()> {
        validate_email(&self.email, "email")?;

        let username_ok = (3..=30).contains(&self.username.chars().count())
            && self
                .username
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !username_ok {
            return Err(CoreError::validation(
                "username",
                "3-30 characters, letters, digits, underscore",
            ));
        }

        let mut missing = Vec::new();
        if self.password.chars().count() < 8 {
            missing.push("at least 8 characters");
        }
        if !self.password.chars().any(|c| c.is_ascii_uppercase()) {
            missing.push("an uppercase letter");
        }
        if !self.password.chars().any(|c| c.is_ascii_digit()) {
            missing.push("a number");
        }
        if !missing.is_empty() {
            return Err(CoreError::validation(
                "password",
                format!("use {}", missing.join(", ")),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub role: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub theme_preference: String,
    pub created_at: String,
}

/// Generic `{"detail": "..."}` acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailResponse {
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeUpdateRequest {
    pub theme: Theme,
}

// ============================================
// Links
// ============================================

/// Body of both the anonymous shortener and the authenticated link creation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

impl ShortenRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Trim the URL and check the custom code, if any
    pub fn validated(&self) -> CoreResult<Self> {
        let url = self.url.trim();
        validate_not_empty(url, "url")?;
        let custom_code = self
            .custom_code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty());
        if let Some(code) = custom_code {
            validate_short_code(code)?;
        }
        Ok(Self {
            url: url.to_string(),
            custom_code: custom_code.map(str::to_string),
            ..self.clone()
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlResponse {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    #[serde(default)]
    pub title: Option<String>,
    pub clicks_count: u64,
    pub is_active: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlInfo {
    #[serde(flatten)]
    pub link: UrlResponse,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}

/// Paging and filtering for the link list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkListQuery {
    pub skip: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub active_only: bool,
}

impl Default for LinkListQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 50,
            search: None,
            active_only: false,
        }
    }
}

impl LinkListQuery {
    pub fn validate(&self) -> CoreResult<()> {
        validate_range(self.limit, 1, 100, "limit")
    }
}

// ============================================
// QR codes
// ============================================

/// Request to create and store a QR code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrCodeCreateRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url_id: Option<i64>,
    #[serde(flatten)]
    pub style: StyleSettings,
    pub logo_base64: Option<String>,
}

impl QrCodeCreateRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            title: None,
            url_id: None,
            style: StyleSettings::default(),
            logo_base64: None,
        }
    }

    /// Use the style and logo currently selected in the view
    pub fn from_view(content: impl Into<String>, title: Option<String>, view: &ViewState) -> Self {
        Self {
            content: content.into(),
            title,
            url_id: None,
            style: view.style.clone(),
            logo_base64: view.logo_base64.clone(),
        }
    }

    /// Check content and style, dropping a blank title
    pub fn validated(&self) -> CoreResult<Self> {
        Ok(Self {
            content: normalize_qr_content(&self.content)?,
            title: self
                .title
                .as_deref()
                .map(str::trim)
                .filter(|title| !title.is_empty())
                .map(str::to_string),
            url_id: self.url_id,
            style: self.style.validate()?,
            logo_base64: self.logo_base64.clone(),
        })
    }
}

/// Request to render a QR code without storing it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrCodePreviewRequest {
    pub content: String,
    #[serde(flatten)]
    pub style: StyleSettings,
    pub logo_base64: Option<String>,
}

impl QrCodePreviewRequest {
    pub fn from_view(content: impl Into<String>, view: &ViewState) -> Self {
        Self {
            content: content.into(),
            style: view.style.clone(),
            logo_base64: view.logo_base64.clone(),
        }
    }

    pub fn validated(&self) -> CoreResult<Self> {
        Ok(Self {
            content: normalize_qr_content(&self.content)?,
            style: self.style.validate()?,
            logo_base64: self.logo_base64.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrCodePreviewResponse {
    pub qr_image_base64: String,
}

/// A stored QR code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrCodeResponse {
    pub id: i64,
    pub content: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url_id: Option<i64>,
    pub qr_image_base64: String,
    pub foreground_color: String,
    pub background_color: String,
    pub style: String,
    pub box_size: u32,
    pub border_size: u32,
    pub error_correction: String,
    #[serde(default)]
    pub logo_base64: Option<String>,
    pub downloads_count: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub linked_short_code: Option<String>,
    #[serde(default)]
    pub linked_clicks: Option<u64>,
}

/// One page of QR codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrCodeListResponse {
    pub items: Vec<QrCodeResponse>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub pages: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrCodeUpdateRequest {
    pub title: Option<String>,
}

/// Image format offered by the download endpoint
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadFormat {
    #[default]
    Png,
    Svg,
}

impl DownloadFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }

    /// Default file name for a downloaded QR code
    pub fn file_name(self, id: i64) -> String {
        format!("qr_{id}.{}", self.as_str())
    }
}

impl fmt::Display for DownloadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DownloadFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            other => Err(format!("unsupported format '{other}', expected png or svg")),
        }
    }
}
