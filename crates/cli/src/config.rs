//! CLI configuration and on-disk view state

use anyhow::{Context, Result};
use linkqr_core::{ClientConfig, ViewState};
use std::path::{Path, PathBuf};

const VIEW_STATE_FILE: &str = "view.json";

/// Determine the data directory with default fallback
pub fn resolve_data_dir(data_dir: Option<PathBuf>) -> PathBuf {
    data_dir.unwrap_or_else(|| {
        // Check environment variable first, then fall back to system data dir
        if let Ok(state_dir) = std::env::var("LINKQR_STATE_DIR") {
            PathBuf::from(state_dir)
        } else {
            dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("linkqr")
        }
    })
}

/// Load client configuration, letting `--base-url` win over file and environment
pub fn load_client_config(path: Option<&Path>, base_url: Option<String>) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(path).context("Failed to load configuration")?;
    if let Some(base_url) = base_url {
        config.base_url = base_url;
        config.validate()?;
    }
    Ok(config)
}

/// Load the view state saved by the previous invocation
pub fn load_view_state(data_dir: &Path) -> Result<ViewState> {
    let path = data_dir.join(VIEW_STATE_FILE);
    if !path.exists() {
        return Ok(ViewState::default());
    }
    let content = std::fs::read_to_string(&path)?;
    let view = serde_json::from_str(&content)
        .with_context(|| format!("Corrupt view state at {}", path.display()))?;
    Ok(view)
}

/// Save view state for the next invocation
pub fn save_view_state(data_dir: &Path, view: &ViewState) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let content = serde_json::to_string_pretty(view)?;
    std::fs::write(data_dir.join(VIEW_STATE_FILE), content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use linkqr_core::{QrStyle, Theme};

    #[test]
    fn test_explicit_data_dir_wins() {
        let dir = PathBuf::from("/tmp/linkqr-test");
        assert_eq!(resolve_data_dir(Some(dir.clone())), dir);
    }

    #[test]
    fn test_missing_view_state_is_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_view_state(dir.path()).unwrap(), ViewState::default());
    }

    #[test]
    fn test_view_state_survives_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");

        let mut view = ViewState::default();
        view.set_search("menu");
        view.style.style = QrStyle::Circle;
        view.theme = Theme::Dark;
        save_view_state(&nested, &view).unwrap();

        assert_eq!(load_view_state(&nested).unwrap(), view);
    }

    #[test]
    fn test_base_url_override_is_validated() {
        assert!(load_client_config(None, Some("not a url".into())).is_err());
        let config = load_client_config(None, Some("https://links.example.com".into())).unwrap();
        assert_eq!(config.base_url, "https://links.example.com");
    }
}
