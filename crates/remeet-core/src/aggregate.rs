//! Company aggregation — the derived, read-only projections over a contact
//! list.
//!
//! Nothing here is cached. Every projection is a pure function of the contact
//! slice it is handed and is recomputed on each call.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use icu::casemap::CaseMapper;
use uuid::Uuid;

use crate::{company::Company, contact::Contact};

// ─── CompanyWithContacts ─────────────────────────────────────────────────────

/// One company together with the contacts that reference it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyWithContacts {
  pub company:          Company,
  /// Members in the order they appeared in the source list.
  pub contacts:         Vec<Contact>,
  /// The most recent `last_contacted_at` among `contacts`, if any is set.
  pub last_interaction: Option<DateTime<Utc>>,
}

impl CompanyWithContacts {
  pub fn contact_count(&self) -> usize { self.contacts.len() }
}

// ─── Projections ─────────────────────────────────────────────────────────────

/// Group contacts by company and sort the groups by size, largest first.
///
/// Contacts without both a `company_id` and a joined `company` are left out.
/// Groups are formed in order of first appearance and the sort is stable, so
/// equal-sized groups keep that order and repeated calls agree.
///
/// The company snapshot of a group is taken from its first member. Members
/// are not checked for agreement beyond a debug log.
pub fn companies_with_stats(contacts: &[Contact]) -> Vec<CompanyWithContacts> {
  let mut slots: HashMap<Uuid, usize> = HashMap::new();
  let mut groups: Vec<CompanyWithContacts> = Vec::new();

  for contact in contacts {
    let Some((company_id, company)) = contact.company_ref() else {
      continue;
    };

    let slot = *slots.entry(company_id).or_insert_with(|| {
      groups.push(CompanyWithContacts {
        company:          company.clone(),
        contacts:         Vec::new(),
        last_interaction: None,
      });
      groups.len() - 1
    });

    let group = &mut groups[slot];
    if group.company != *company {
      tracing::debug!(
        %company_id,
        contact_id = %contact.id,
        "divergent company snapshot in one fetch; keeping the first"
      );
    }
    group.last_interaction = group.last_interaction.max(contact.last_contacted_at);
    group.contacts.push(contact.clone());
  }

  groups.sort_by(|a, b| b.contact_count().cmp(&a.contact_count()));
  groups
}

/// Keep the companies whose name or industry contains `query`, ignoring case.
///
/// Both sides go through Unicode full case folding, so `STRASSE` finds
/// `Straße`. An empty query returns `companies` untouched. Order is preserved.
pub fn filter_companies(
  companies: Vec<CompanyWithContacts>,
  query: &str,
) -> Vec<CompanyWithContacts> {
  if query.is_empty() {
    return companies;
  }
  let mapper = CaseMapper::new();
  let needle = mapper.fold_string(query);
  let contains = |haystack: &str| mapper.fold_string(haystack).contains(&*needle);

  companies
    .into_iter()
    .filter(|entry| {
      contains(&entry.company.name)
        || entry.company.industry.as_deref().is_some_and(contains)
    })
    .collect()
}

/// Number of contacts that carry a `company_id`, whether or not the join
/// delivered the company itself.
///
/// This intentionally differs from the sum of group sizes in
/// [`companies_with_stats`], which only counts joined contacts.
pub fn total_contacts_count(contacts: &[Contact]) -> usize {
  contacts.iter().filter(|c| c.company_id.is_some()).count()
}
