//! Host navigation hook
//!
//! When a session cannot be re-established the gateway asks the host to send
//! the user to the login surface. Browsers change `location`, a CLI tells the
//! user to log in again; the gateway only knows this trait.

/// Navigation primitive supplied by the host environment
pub trait Navigator: Send + Sync {
    /// Send the user to the login surface at `login_path`
    fn redirect_to_login(&self, login_path: &str);
}

/// Navigator used when the host supplies none: records the redirect in the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect_to_login(&self, login_path: &str) {
        tracing::warn!(login_path, "Login required");
    }
}
