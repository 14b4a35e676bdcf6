//! Contact — one row of the backend `contacts` table.
//!
//! Field names match the table's snake_case columns exactly; they are the
//! wire contract with the backend and must not be renamed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Result, company::Company};

// ─── Contact ─────────────────────────────────────────────────────────────────

/// A contact, usually created from a scanned business card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
  pub id:                   Uuid,
  /// The account that owns this contact.
  pub user_id:              Uuid,
  /// The business card this contact was scanned from, if any.
  #[serde(default)]
  pub card_id:              Option<Uuid>,
  #[serde(default)]
  pub company_id:           Option<Uuid>,
  pub full_name:            String,
  #[serde(default)]
  pub title:                Option<String>,
  #[serde(default)]
  pub department:           Option<String>,
  #[serde(default)]
  pub phone:                Option<String>,
  #[serde(default)]
  pub email:                Option<String>,
  #[serde(default)]
  pub website:              Option<String>,
  #[serde(default)]
  pub address:              Option<String>,
  #[serde(default)]
  pub linkedin_url:         Option<String>,
  #[serde(default)]
  pub twitter_url:          Option<String>,
  /// OCR confidence in `0.0..=1.0`, present only for scanned contacts.
  #[serde(default)]
  pub ocr_confidence_score: Option<f64>,
  pub is_verified:          bool,
  pub is_favorite:          bool,
  #[serde(default)]
  pub tags:                 Option<Vec<String>>,
  #[serde(default)]
  pub notes:                Option<String>,
  pub created_at:           DateTime<Utc>,
  pub updated_at:           DateTime<Utc>,
  #[serde(default)]
  pub last_contacted_at:    Option<DateTime<Utc>>,
  /// Snapshot of the referenced company, populated by the fetch-time join.
  #[serde(default)]
  pub company:              Option<Company>,
}

impl Contact {
  /// Minimal contact with every optional field empty and both timestamps set
  /// to `now`.
  pub fn new(user_id: Uuid, full_name: impl Into<String>) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      user_id,
      card_id: None,
      company_id: None,
      full_name: full_name.into(),
      title: None,
      department: None,
      phone: None,
      email: None,
      website: None,
      address: None,
      linkedin_url: None,
      twitter_url: None,
      ocr_confidence_score: None,
      is_verified: false,
      is_favorite: false,
      tags: None,
      notes: None,
      created_at: now,
      updated_at: now,
      last_contacted_at: None,
      company: None,
    }
  }

  /// The `(company_id, company)` pair, only when both the foreign key and the
  /// joined snapshot are present.
  pub fn company_ref(&self) -> Option<(Uuid, &Company)> {
    match (self.company_id, self.company.as_ref()) {
      (Some(id), Some(company)) => Some((id, company)),
      _ => None,
    }
  }

  /// Up to two uppercase initials taken from the words of `full_name`.
  pub fn initials(&self) -> String {
    self
      .full_name
      .split_whitespace()
      .filter_map(|word| word.chars().next())
      .take(2)
      .flat_map(char::to_uppercase)
      .collect()
  }
}

// ─── Decoding ────────────────────────────────────────────────────────────────

/// Decode a JSON array of contact rows.
///
/// Decoding is all-or-nothing: one malformed row fails the whole batch.
pub fn decode_contacts(body: &[u8]) -> Result<Vec<Contact>> {
  Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn row() -> serde_json::Value {
    json!({
      "id": "6f1c1d1e-0000-4000-8000-000000000001",
      "user_id": "6f1c1d1e-0000-4000-8000-0000000000aa",
      "card_id": null,
      "company_id": "6f1c1d1e-0000-4000-8000-0000000000c1",
      "full_name": "Ada Lovelace",
      "title": "Engineer",
      "department": null,
      "phone": "+44 20 7946 0000",
      "email": "ada@example.com",
      "website": null,
      "address": null,
      "linkedin_url": null,
      "twitter_url": null,
      "ocr_confidence_score": 0.92,
      "is_verified": true,
      "is_favorite": false,
      "tags": ["conference", "2024"],
      "notes": null,
      "created_at": "2024-03-01T10:00:00.123456+00:00",
      "updated_at": "2024-03-02T10:00:00+00:00",
      "last_contacted_at": null,
      "company": {
        "id": "6f1c1d1e-0000-4000-8000-0000000000c1",
        "name": "Analytical Engines",
        "industry": "Computing"
      }
    })
  }

  #[test]
  fn decodes_joined_row() {
    let body = serde_json::to_vec(&json!([row()])).unwrap();
    let contacts = decode_contacts(&body).unwrap();
    assert_eq!(contacts.len(), 1);

    let c = &contacts[0];
    assert_eq!(c.full_name, "Ada Lovelace");
    assert_eq!(c.ocr_confidence_score, Some(0.92));
    assert!(c.is_verified);
    assert_eq!(
      c.tags.as_deref(),
      Some(["conference".to_string(), "2024".to_string()].as_slice())
    );

    let (id, company) = c.company_ref().unwrap();
    assert_eq!(id, company.id);
    assert_eq!(company.industry.as_deref(), Some("Computing"));
  }

  #[test]
  fn serializes_with_column_names() {
    let body = serde_json::to_vec(&json!([row()])).unwrap();
    let contact = decode_contacts(&body).unwrap().remove(0);
    let value = serde_json::to_value(&contact).unwrap();
    let obj = value.as_object().unwrap();

    for key in [
      "id",
      "user_id",
      "card_id",
      "company_id",
      "full_name",
      "title",
      "department",
      "phone",
      "email",
      "website",
      "address",
      "linkedin_url",
      "twitter_url",
      "ocr_confidence_score",
      "is_verified",
      "is_favorite",
      "tags",
      "notes",
      "created_at",
      "updated_at",
      "last_contacted_at",
      "company",
    ] {
      assert!(obj.contains_key(key), "missing column {key}");
    }
    assert_eq!(obj.len(), 22);
  }

  #[test]
  fn one_bad_row_fails_the_batch() {
    let mut bad = row();
    bad["is_favorite"] = json!("yes");
    let body = serde_json::to_vec(&json!([row(), bad])).unwrap();
    assert!(decode_contacts(&body).is_err());
  }

  #[test]
  fn company_ref_requires_both_halves() {
    let mut c = Contact::new(Uuid::new_v4(), "Grace Hopper");
    assert!(c.company_ref().is_none());

    c.company_id = Some(Uuid::new_v4());
    assert!(c.company_ref().is_none());

    c.company_id = None;
    c.company = Some(Company::new(Uuid::new_v4(), "Navy"));
    assert!(c.company_ref().is_none());
  }

  #[test]
  fn initials_from_name() {
    let user = Uuid::new_v4();
    assert_eq!(Contact::new(user, "grace brewster hopper").initials(), "GB");
    assert_eq!(Contact::new(user, "Cher").initials(), "C");
    assert_eq!(Contact::new(user, "  ").initials(), "");
  }
}
