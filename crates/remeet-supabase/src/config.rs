//! Backend settings, resolved once at startup.
//!
//! Sources, lowest precedence first: an optional TOML file, `REMEET_*`
//! environment variables, then explicit [`Overrides`] (CLI flags).
//!
//! ```toml
//! url                   = "https://abcd.supabase.co"
//! anon_key              = "eyJhbGciOi..."
//! business_cards_bucket = "business-cards"
//! avatars_bucket        = "avatars"
//! n8n_webhook_url       = "https://automation.example.com/webhook/ocr"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::{Error, Result};

/// Endpoint used when no automation webhook is configured. Requests to it are
/// expected to fail; the rest of the client keeps working.
pub const PLACEHOLDER_WEBHOOK_URL: &str = "https://placeholder.invalid/webhook";

fn default_business_cards_bucket() -> String { "business-cards".into() }

fn default_avatars_bucket() -> String { "avatars".into() }

// ─── SupabaseConfig ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseConfig {
  /// Project URL, e.g. `https://abcd.supabase.co`.
  #[serde(default)]
  pub url:                   String,
  /// Public (anon) API key.
  #[serde(default)]
  pub anon_key:              String,
  /// Storage bucket holding scanned business-card images.
  #[serde(default = "default_business_cards_bucket")]
  pub business_cards_bucket: String,
  #[serde(default = "default_avatars_bucket")]
  pub avatars_bucket:        String,
  /// Workflow-automation webhook. Optional.
  #[serde(default)]
  pub n8n_webhook_url:       Option<String>,
}

/// Values that take precedence over the file and the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
  pub url:      Option<String>,
  pub anon_key: Option<String>,
}

impl SupabaseConfig {
  /// Resolve settings from `path` (if given), the environment and
  /// `overrides`.
  ///
  /// Fails if the project URL or the anon key is missing.
  pub fn load(path: Option<&Path>, overrides: Overrides) -> Result<Self> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
      builder = builder.add_source(config::File::from(path).required(true));
    }
    let settings = builder
      .add_source(config::Environment::with_prefix("REMEET"))
      .set_override_option("url", overrides.url)?
      .set_override_option("anon_key", overrides.anon_key)?
      .build()?;

    settings.try_deserialize::<Self>()?.validated()
  }

  /// Parse settings from a TOML string, without consulting the environment.
  pub fn from_toml_str(raw: &str) -> Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from_str(raw, config::FileFormat::Toml))
      .build()?;
    settings.try_deserialize::<Self>()?.validated()
  }

  fn validated(mut self) -> Result<Self> {
    self.url = self.url.trim().trim_end_matches('/').to_owned();
    self.anon_key = self.anon_key.trim().to_owned();

    if self.url.is_empty() {
      return Err(Error::MissingSetting("url"));
    }
    if self.anon_key.is_empty() {
      return Err(Error::MissingSetting("anon_key"));
    }

    self.n8n_webhook_url = self
      .n8n_webhook_url
      .take()
      .map(|u| u.trim().to_owned())
      .filter(|u| !u.is_empty());
    if self.n8n_webhook_url.is_none() {
      tracing::warn!(
        "no automation webhook configured; using {PLACEHOLDER_WEBHOOK_URL}"
      );
    }

    Ok(self)
  }

  /// The automation webhook, or [`PLACEHOLDER_WEBHOOK_URL`] when unset.
  pub fn automation_endpoint(&self) -> &str {
    self
      .n8n_webhook_url
      .as_deref()
      .unwrap_or(PLACEHOLDER_WEBHOOK_URL)
  }
}
