//! The `ContactSource` trait — where the view-model gets its contacts from.
//!
//! The trait is implemented by backend clients (e.g. `remeet-supabase`) and by
//! in-memory fakes in tests. The view-model depends on this abstraction, never
//! on a concrete client.

use std::future::Future;

use crate::contact::Contact;

/// Abstraction over the remote data client.
///
/// Implementations are expected to perform the company join so that
/// [`Contact::company`] is populated wherever [`Contact::company_id`] resolves.
/// A row that fails to decode must fail the whole fetch rather than be
/// skipped.
///
/// The returned future is `Send` so the trait can be used from a
/// multi-threaded tokio runtime.
pub trait ContactSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch every contact visible to the current session.
  fn fetch_contacts(
    &self,
  ) -> impl Future<Output = Result<Vec<Contact>, Self::Error>> + Send + '_;
}
