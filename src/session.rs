//! Read-only access to the externally owned session cookie store.
//!
//! The login flow that writes the token lives elsewhere; this side only
//! reads it, once per fetch.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::constants::constants;

pub trait TokenStore: Send + Sync {
  /// Look up a cookie value by name.
  fn get(&self, key: &str) -> Option<String>;
}

/// Cookie jar persisted as a flat TOML table of `name = "value"` pairs.
#[derive(Debug, Clone)]
pub struct CookieFile {
  path: PathBuf,
}

impl CookieFile {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// Default location: `cookies.toml` in the platform data dir.
  pub fn default_location() -> Option<Self> {
    crate::config::data_dir().map(|dir| Self::new(dir.join("cookies.toml")))
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl TokenStore for CookieFile {
  fn get(&self, key: &str) -> Option<String> {
    let content = match std::fs::read_to_string(&self.path) {
      Ok(content) => content,
      Err(e) => {
        debug!(path = %self.path.display(), err = %e, "session: cookie file unreadable");
        return None;
      }
    };
    match toml::from_str::<HashMap<String, String>>(&content) {
      Ok(mut jar) => jar.remove(key),
      Err(e) => {
        warn!(path = %self.path.display(), err = %e, "session: cookie file is not a flat TOML table");
        None
      }
    }
  }
}

/// Store with no cookies at all, used when no data dir can be resolved.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCookies;

impl TokenStore for NoCookies {
  fn get(&self, _key: &str) -> Option<String> {
    None
  }
}

/// Bearer token for the next request.
///
/// Fails open: a missing token yields an empty string so the request still
/// goes out and the API answers 401.
pub fn bearer_token(store: &dyn TokenStore) -> String {
  match store.get(&constants().token_cookie) {
    Some(token) => token,
    None => {
      warn!("session: no jwtToken cookie, sending empty bearer token");
      String::new()
    }
  }
}
