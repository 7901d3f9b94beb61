//! Session persistence and the CLI's login surface
//!
//! The backend keeps the session in HTTP-only cookies. Between invocations
//! the CLI stores the cookie header for the base URL in the data directory
//! and seeds the client's cookie jar from it on start-up.

use anyhow::{Context, Result};
use linkqr_http::Navigator;
use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

const SESSION_FILE: &str = "session";

/// Cookie header persisted in the data directory
pub struct SessionStore {
    path: PathBuf,
    url: Url,
}

impl SessionStore {
    pub fn new(data_dir: &Path, base_url: &str) -> Result<Self> {
        let url = Url::parse(base_url).with_context(|| format!("Invalid base URL {base_url}"))?;
        Ok(Self {
            path: data_dir.join(SESSION_FILE),
            url,
        })
    }

    /// Cookie jar seeded with the saved session, if any
    pub fn load_jar(&self) -> Result<Arc<Jar>> {
        let jar = Arc::new(Jar::default());
        if self.path.exists() {
            let header = std::fs::read_to_string(&self.path)?;
            for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
                jar.add_cookie_str(&format!("{pair}; Path=/"), &self.url);
            }
            debug!(path = %self.path.display(), "Restored session cookies");
        }
        Ok(jar)
    }

    /// Persist whatever cookies the jar holds for the base URL
    pub fn save(&self, jar: &Jar) -> Result<()> {
        match jar.cookies(&self.url) {
            Some(header) => {
                if let Some(parent) = self.path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&self.path, header.to_str()?)?;
                debug!(path = %self.path.display(), "Saved session cookies");
                Ok(())
            }
            None => self.clear(),
        }
    }

    /// Forget the saved session
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
            debug!(path = %self.path.display(), "Cleared session cookies");
        }
        Ok(())
    }
}

/// Login surface for a terminal: tell the user to sign in again
#[derive(Clone, Default)]
pub struct LoginPrompt {
    requested: Arc<AtomicBool>,
}

impl LoginPrompt {
    /// Whether a redirect to the login surface happened during this run
    pub fn was_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

impl Navigator for LoginPrompt {
    fn redirect_to_login(&self, login_path: &str) {
        // A run triggers at most one prompt even if several calls fail.
        if !self.requested.swap(true, Ordering::SeqCst) {
            eprintln!("Not logged in (login page: {login_path}). Run `linkqr login` to sign in.");
        }
    }
}
