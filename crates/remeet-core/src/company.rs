//! Company — the organisation a contact works for.
//!
//! Companies are owned by the backend; the client only ever sees them as a
//! snapshot embedded in a contact row by the `company:companies(*)` join.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the `companies` table as delivered inside a contact join.
///
/// Only `id`, `name` and `industry` are relied upon by the aggregation; the
/// descriptive fields are optional so the backend can grow its shape without
/// breaking older clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
  pub id:          Uuid,
  pub name:        String,
  #[serde(default)]
  pub industry:    Option<String>,
  #[serde(default)]
  pub website:     Option<String>,
  #[serde(default)]
  pub logo_url:    Option<String>,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub created_at:  Option<DateTime<Utc>>,
  #[serde(default)]
  pub updated_at:  Option<DateTime<Utc>>,
}

impl Company {
  /// Convenience constructor with all descriptive fields left empty.
  pub fn new(id: Uuid, name: impl Into<String>) -> Self {
    Self {
      id,
      name: name.into(),
      industry: None,
      website: None,
      logo_url: None,
      description: None,
      created_at: None,
      updated_at: None,
    }
  }

  pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
    self.industry = Some(industry.into());
    self
  }
}
