//! Presentation-layer view state
//!
//! Everything the front end needs to remember between actions (paging,
//! search, the QR style being edited, the uploaded logo, the theme) lives in
//! a [`ViewState`] value that callers own and pass around explicitly.

use crate::error::CoreResult;
use crate::validation::{normalize_hex_color, validate_range};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of QR codes per page
pub const DEFAULT_PER_PAGE: u32 = 12;
/// Largest page size the backend accepts
pub const MAX_PER_PAGE: u32 = 50;

/// Module shape used when rendering a QR code
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrStyle {
    #[default]
    Square,
    Rounded,
    Dots,
    Circle,
}

impl QrStyle {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Square => "square",
            Self::Rounded => "rounded",
            Self::Dots => "dots",
            Self::Circle => "circle",
        }
    }
}

impl fmt::Display for QrStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QrStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "square" => Ok(Self::Square),
            "rounded" => Ok(Self::Rounded),
            "dots" => Ok(Self::Dots),
            "circle" => Ok(Self::Circle),
            other => Err(format!(
                "unknown style '{other}', expected square, rounded, dots or circle"
            )),
        }
    }
}

/// QR error correction level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCorrection {
    L,
    #[default]
    M,
    Q,
    H,
}

impl FromStr for ErrorCorrection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            other => Err(format!("unknown error correction '{other}', expected L, M, Q or H")),
        }
    }
}

/// Visual settings applied to previews and newly created QR codes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleSettings {
    pub foreground_color: String,
    pub background_color: String,
    pub style: QrStyle,
    pub box_size: u8,
    pub border_size: u8,
    pub error_correction: ErrorCorrection,
}

impl Default for StyleSettings {
    fn default() -> Self {
        Self {
            foreground_color: "#000000".to_string(),
            background_color: "#FFFFFF".to_string(),
            style: QrStyle::Square,
            box_size: 10,
            border_size: 4,
            error_correction: ErrorCorrection::M,
        }
    }
}

impl StyleSettings {
    /// Check ranges and return a copy with colours normalised
    pub fn validate(&self) -> CoreResult<Self> {
        validate_range(self.box_size, 5, 20, "box_size")?;
        validate_range(self.border_size, 0, 10, "border_size")?;
        Ok(Self {
            foreground_color: normalize_hex_color(&self.foreground_color, "foreground_color")?,
            background_color: normalize_hex_color(&self.background_color, "background_color")?,
            ..self.clone()
        })
    }
}

/// Colour theme of the interface
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme '{other}', expected light or dark")),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paging parameters for the QR code list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrListQuery {
    pub page: u32,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for QrListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            search: None,
        }
    }
}

impl QrListQuery {
    pub fn validate(&self) -> CoreResult<()> {
        validate_range(self.page, 1, u32::MAX, "page")?;
        validate_range(self.per_page, 1, MAX_PER_PAGE, "per_page")
    }
}

/// State owned by the presentation layer between user actions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub page: u32,
    /// Page count reported by the last listing
    pub pages: u32,
    pub per_page: u32,
    pub search: String,
    pub style: StyleSettings,
    pub logo_base64: Option<String>,
    pub theme: Theme,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            page: 1,
            pages: 1,
            per_page: DEFAULT_PER_PAGE,
            search: String::new(),
            style: StyleSettings::default(),
            logo_base64: None,
            theme: Theme::default(),
        }
    }
}

impl ViewState {
    /// Query for the page currently shown
    pub fn list_query(&self) -> QrListQuery {
        let search = self.search.trim();
        QrListQuery {
            page: self.page.max(1),
            per_page: self.per_page.clamp(1, MAX_PER_PAGE),
            search: (!search.is_empty()).then(|| search.to_string()),
        }
    }

    /// Change the search term; paging restarts at the first page
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.reset_paging();
    }

    /// Change the page size; paging restarts at the first page
    pub fn set_per_page(&mut self, per_page: u32) {
        self.per_page = per_page.clamp(1, MAX_PER_PAGE);
        self.reset_paging();
    }

    pub fn reset_paging(&mut self) {
        self.page = 1;
    }

    /// Remember the page count of a listing, pulling the page back into range
    pub fn record_pages(&mut self, pages: u32) {
        self.pages = pages.max(1);
        self.page = self.page.clamp(1, self.pages);
    }

    /// Advance one page, staying within `pages`. Returns whether it moved.
    pub fn next_page(&mut self, pages: u32) -> bool {
        if self.page < pages.max(1) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page, stopping at the first. Returns whether it moved.
    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Jump to a page, clamped to `[1, pages]`
    pub fn go_to_page(&mut self, page: u32, pages: u32) {
        self.page = page.clamp(1, pages.max(1));
    }
}
