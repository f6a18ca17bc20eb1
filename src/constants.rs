//! Application constants loaded from `constants.ron` at compile time.
//!
//! The RON file is embedded via `include_str!` so it's always available,
//! with no runtime file I/O. Parsed once on first access via `LazyLock`.

use serde::Deserialize;
use std::sync::LazyLock;

/// All tuneable application constants.
#[derive(Debug, Deserialize)]
pub struct Constants {
  pub app_name: String,

  // Videos API
  pub api_base_url: String,
  pub videos_path: String,
  pub token_cookie: String,

  // Banner
  pub banner_logo_alt: String,
  pub banner_text: String,
  pub banner_button: String,

  // Static illustrations
  pub no_results_image_url: String,
  pub failure_light_image_url: String,
  pub failure_dark_image_url: String,

  // Event loop
  pub poll_millis: u64,
  pub spinner_millis: u64,
}

static CONSTANTS: LazyLock<Constants> = LazyLock::new(|| {
  // Safety: the RON file is embedded at compile time; a malformed file fails the first test run.
  ron::from_str(include_str!("../constants.ron")).expect("constants.ron must be valid RON (embedded at compile time)")
});

/// Returns a reference to the parsed application constants.
pub fn constants() -> &'static Constants {
  &CONSTANTS
}
