//! Async HTTP client for the Supabase PostgREST and Storage endpoints.

use std::time::Duration;

use remeet_core::{
  contact::{Contact, decode_contacts},
  source::ContactSource,
};
use reqwest::{Client, RequestBuilder};

use crate::{Error, Result, config::SupabaseConfig};

/// PostgREST `select` for contacts with the company row embedded under the
/// `company` key.
pub const CONTACTS_SELECT: &str = "*,company:companies(*)";

/// Async client for one Supabase project.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct SupabaseClient {
  client:       Client,
  config:       SupabaseConfig,
  /// Bearer token sent with every request. Defaults to the anon key.
  access_token: String,
}

impl SupabaseClient {
  pub fn new(config: SupabaseConfig) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    let access_token = config.anon_key.clone();
    Ok(Self {
      client,
      config,
      access_token,
    })
  }

  /// Send `token` instead of the anon key, e.g. a signed-in user's session
  /// JWT so row-level security scopes results to that user.
  pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
    self.access_token = token.into();
    self
  }

  fn rest_url(&self, table: &str) -> String {
    format!("{}/rest/v1/{table}", self.config.url)
  }

  fn auth(&self, req: RequestBuilder) -> RequestBuilder {
    req
      .header("apikey", &self.config.anon_key)
      .bearer_auth(&self.access_token)
  }

  // ── Contacts ──────────────────────────────────────────────────────────────

  /// `GET /rest/v1/contacts?select=*,company:companies(*)&order=created_at.desc`
  pub async fn fetch_contacts(&self) -> Result<Vec<Contact>> {
    let resp = self
      .auth(self.client.get(self.rest_url("contacts")))
      .query(&[("select", CONTACTS_SELECT), ("order", "created_at.desc")])
      .send()
      .await?;

    let status = resp.status();
    tracing::debug!(%status, "GET /rest/v1/contacts");
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      return Err(Error::Status {
        method: "GET",
        path: "/rest/v1/contacts".into(),
        status,
        body,
      });
    }

    let body = resp.bytes().await?;
    Ok(decode_contacts(&body)?)
  }

  // ── Storage ───────────────────────────────────────────────────────────────

  /// Public URL of `path` inside `bucket`.
  pub fn public_object_url(&self, bucket: &str, path: &str) -> String {
    format!(
      "{}/storage/v1/object/public/{bucket}/{}",
      self.config.url,
      path.trim_start_matches('/')
    )
  }

  /// Public URL of a scanned business-card image.
  pub fn card_image_url(&self, path: &str) -> String {
    self.public_object_url(&self.config.business_cards_bucket, path)
  }

  pub fn avatar_url(&self, path: &str) -> String {
    self.public_object_url(&self.config.avatars_bucket, path)
  }
}

impl ContactSource for SupabaseClient {
  type Error = Error;

  async fn fetch_contacts(&self) -> Result<Vec<Contact>> {
    SupabaseClient::fetch_contacts(self).await
  }
}
