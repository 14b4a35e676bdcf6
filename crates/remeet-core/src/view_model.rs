//! The companies view-model.
//!
//! [`CompaniesState`] is a plain state container: the contact list from the
//! last successful load plus the transient loading / error / search state.
//! Loads are expressed as two explicit transitions, [`CompaniesState::begin_load`]
//! and [`CompaniesState::finish_load`], so the state machine can be driven and
//! inspected without a backend.
//!
//! [`CompaniesViewModel`] pairs that state with an injected [`ContactSource`].

use std::{fmt::Display, sync::Arc};

use crate::{
  aggregate::{self, CompanyWithContacts},
  contact::Contact,
  source::ContactSource,
};

// ─── LoadOutcome ─────────────────────────────────────────────────────────────

/// The result of one fetch, as delivered to the state container.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
  /// The complete, freshly fetched contact list.
  Loaded(Vec<Contact>),
  /// A human-readable description of why the fetch failed.
  Failed(String),
}

impl LoadOutcome {
  pub fn from_result<E: Display>(result: Result<Vec<Contact>, E>) -> Self {
    match result {
      Ok(contacts) => Self::Loaded(contacts),
      Err(e) => Self::Failed(e.to_string()),
    }
  }
}

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct CompaniesState {
  /// Contacts in fetch order. Replaced wholesale, never merged.
  pub contacts:      Vec<Contact>,
  pub is_loading:    bool,
  pub error_message: Option<String>,
  pub search_query:  String,
}

impl CompaniesState {
  pub fn new() -> Self { Self::default() }

  /// Enter the loading state and clear any previous error.
  pub fn begin_load(&mut self) {
    self.is_loading = true;
    self.error_message = None;
  }

  /// Apply the outcome of a fetch and leave the loading state.
  ///
  /// On failure the previous contact list is kept as-is.
  pub fn finish_load(&mut self, outcome: LoadOutcome) {
    match outcome {
      LoadOutcome::Loaded(contacts) => {
        self.contacts = contacts;
        self.error_message = None;
      }
      LoadOutcome::Failed(message) => {
        self.error_message = Some(message);
      }
    }
    self.is_loading = false;
  }

  pub fn set_search_query(&mut self, query: impl Into<String>) {
    self.search_query = query.into();
  }

  pub fn clear_error(&mut self) { self.error_message = None; }

  // ── Derived views ─────────────────────────────────────────────────────────

  /// See [`aggregate::companies_with_stats`].
  pub fn companies_with_stats(&self) -> Vec<CompanyWithContacts> {
    aggregate::companies_with_stats(&self.contacts)
  }

  /// [`Self::companies_with_stats`] narrowed by the current search query.
  pub fn filtered_companies(&self) -> Vec<CompanyWithContacts> {
    aggregate::filter_companies(self.companies_with_stats(), &self.search_query)
  }

  pub fn total_companies_count(&self) -> usize {
    self.companies_with_stats().len()
  }

  /// See [`aggregate::total_contacts_count`].
  pub fn total_contacts_count(&self) -> usize {
    aggregate::total_contacts_count(&self.contacts)
  }
}

// ─── View-model ──────────────────────────────────────────────────────────────

/// Companies state bound to the source it loads from.
///
/// A load is split into [`begin_load`](Self::begin_load), a detached
/// [`fetch`](Self::fetch) and [`finish_load`](Self::finish_load) so a front
/// end can keep drawing while the request is in flight. `load_data` runs all
/// three in sequence and, taking `&mut self`, never has two loads in flight.
pub struct CompaniesViewModel<S> {
  pub state: CompaniesState,
  source:    Arc<S>,
}

impl<S: ContactSource + 'static> CompaniesViewModel<S> {
  /// Create a view-model with an empty contact list.
  pub fn new(source: Arc<S>) -> Self {
    Self {
      state: CompaniesState::new(),
      source,
    }
  }

  /// Fetch contacts and replace the list, or record the failure.
  ///
  /// Never fails: errors end up in [`CompaniesState::error_message`].
  pub async fn load_data(&mut self) {
    self.begin_load();
    let outcome = self.fetch().await;
    self.finish_load(outcome);
  }

  pub fn begin_load(&mut self) {
    self.state.begin_load();
    tracing::debug!("loading contacts");
  }

  /// The fetch half of a load, detached from `self` so it can be spawned.
  pub fn fetch(&self) -> impl Future<Output = LoadOutcome> + Send + 'static {
    let source = Arc::clone(&self.source);
    async move {
      let result = source.fetch_contacts().await;
      match &result {
        Ok(contacts) => tracing::info!(count = contacts.len(), "contacts loaded"),
        Err(e) => tracing::warn!(error = %e, "failed to load contacts"),
      }
      LoadOutcome::from_result(result)
    }
  }

  pub fn finish_load(&mut self, outcome: LoadOutcome) {
    self.state.finish_load(outcome);
  }

  // ── Read-through accessors ────────────────────────────────────────────────

  pub fn contacts(&self) -> &[Contact] { &self.state.contacts }

  pub fn is_loading(&self) -> bool { self.state.is_loading }

  pub fn error_message(&self) -> Option<&str> {
    self.state.error_message.as_deref()
  }

  pub fn clear_error(&mut self) { self.state.clear_error(); }

  pub fn search_query(&self) -> &str { &self.state.search_query }

  pub fn set_search_query(&mut self, query: impl Into<String>) {
    self.state.set_search_query(query);
  }

  pub fn companies_with_stats(&self) -> Vec<CompanyWithContacts> {
    self.state.companies_with_stats()
  }

  pub fn filtered_companies(&self) -> Vec<CompanyWithContacts> {
    self.state.filtered_companies()
  }

  pub fn total_companies_count(&self) -> usize {
    self.state.total_companies_count()
  }

  pub fn total_contacts_count(&self) -> usize {
    self.state.total_contacts_count()
  }
}
