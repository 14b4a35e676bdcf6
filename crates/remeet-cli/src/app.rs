//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use remeet_core::{
  aggregate::CompanyWithContacts,
  source::ContactSource,
  view_model::{CompaniesViewModel, LoadOutcome},
};
use tokio::task::JoinHandle;
use uuid::Uuid;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
  /// Focus on the company list; right pane previews the cursor company.
  CompanyList,
  /// Focus on the contacts of the selected company.
  CompanyDetail,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App<S> {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// Contacts, derived company views and the search query.
  pub view_model: CompaniesViewModel<S>,

  /// Whether the user is typing a search query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* company list.
  pub list_cursor: usize,

  /// Scroll offset within the detail contacts list.
  pub detail_scroll: usize,

  /// Company shown in the detail pane.
  pub selected_company_id: Option<Uuid>,

  /// The fetch in flight, if any. At most one load runs at a time.
  pending: Option<JoinHandle<LoadOutcome>>,
}

impl<S: ContactSource + 'static> App<S> {
  /// Create an [`App`] with nothing loaded yet.
  pub fn new(source: Arc<S>) -> Self {
    Self {
      screen: Screen::CompanyList,
      view_model: CompaniesViewModel::new(source),
      filter_active: false,
      list_cursor: 0,
      detail_scroll: 0,
      selected_company_id: None,
      pending: None,
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Start a background (re)load unless one is already running.
  ///
  /// The view-model enters its loading state immediately so the next frame
  /// shows it; the previous list stays on screen until the fetch completes.
  pub fn start_load(&mut self) {
    if self.pending.is_some() {
      tracing::debug!("reload ignored; a load is already in flight");
      return;
    }
    self.view_model.begin_load();
    self.pending = Some(tokio::spawn(self.view_model.fetch()));
  }

  /// Apply the outcome of the background load once it has completed.
  pub async fn poll_load(&mut self) {
    if !self.pending.as_ref().is_some_and(JoinHandle::is_finished) {
      return;
    }
    let Some(handle) = self.pending.take() else {
      return;
    };
    let outcome = handle
      .await
      .unwrap_or_else(|e| LoadOutcome::Failed(format!("load task failed: {e}")));
    self.view_model.finish_load(outcome);
    self.clamp_cursor();
  }

  pub fn load_in_flight(&self) -> bool { self.pending.is_some() }

  fn clamp_cursor(&mut self) {
    let len = self.filtered_companies().len();
    self.list_cursor = self.list_cursor.min(len.saturating_sub(1));
  }

  // ── Derived views ─────────────────────────────────────────────────────────

  pub fn filtered_companies(&self) -> Vec<CompanyWithContacts> {
    self.view_model.filtered_companies()
  }

  /// The company under the list cursor in the filtered view, if any.
  pub fn cursor_company(&self) -> Option<CompanyWithContacts> {
    self
      .filtered_companies()
      .into_iter()
      .nth(self.list_cursor)
  }

  /// The company open in the detail pane, looked up in the unfiltered view.
  pub fn selected_company(&self) -> Option<CompanyWithContacts> {
    let id = self.selected_company_id?;
    self
      .view_model
      .companies_with_stats()
      .into_iter()
      .find(|entry| entry.company.id == id)
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub fn handle_key(&mut self, key: KeyEvent) -> bool {
    // Global: Ctrl-C quits from anywhere.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    if self.filter_active {
      self.handle_filter_key(key);
      return true;
    }

    match self.screen {
      Screen::CompanyList => self.handle_list_key(key),
      Screen::CompanyDetail => self.handle_detail_key(key),
    }
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.view_model.set_search_query("");
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.list_cursor = 0;
        // Jump straight to the only match.
        let list = self.filtered_companies();
        if let [only] = list.as_slice() {
          self.open_detail(only.company.id);
        }
      }
      KeyCode::Backspace => {
        let mut query = self.view_model.search_query().to_owned();
        query.pop();
        self.view_model.set_search_query(query);
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        let mut query = self.view_model.search_query().to_owned();
        query.push(c);
        self.view_model.set_search_query(query);
        self.list_cursor = 0;
      }
      _ => {}
    }
  }

  fn handle_list_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_companies().len();
        if self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }

      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if let Some(id) = self.cursor_company().map(|c| c.company.id) {
          self.open_detail(id);
        }
      }

      KeyCode::Esc => self.view_model.clear_error(),

      KeyCode::Char('/') => {
        self.filter_active = true;
        self.view_model.set_search_query("");
        self.list_cursor = 0;
      }

      KeyCode::Char('r') => self.start_load(),

      _ => {}
    }
    true
  }

  fn handle_detail_key(&mut self, key: KeyEvent) -> bool {
    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.screen = Screen::CompanyList;
        self.selected_company_id = None;
      }

      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.selected_company().map_or(0, |c| c.contact_count());
        if self.detail_scroll + 1 < len {
          self.detail_scroll += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
      }

      // Quick switching between companies without leaving the detail pane.
      KeyCode::Char(']') | KeyCode::PageDown => {
        let len = self.filtered_companies().len();
        if self.list_cursor + 1 < len {
          self.list_cursor += 1;
          if let Some(id) = self.cursor_company().map(|c| c.company.id) {
            self.open_detail(id);
          }
        }
      }
      KeyCode::Char('[') | KeyCode::PageUp => {
        if self.list_cursor > 0 {
          self.list_cursor -= 1;
          if let Some(id) = self.cursor_company().map(|c| c.company.id) {
            self.open_detail(id);
          }
        }
      }

      KeyCode::Char('r') => self.start_load(),

      _ => {}
    }
    true
  }

  fn open_detail(&mut self, company_id: Uuid) {
    self.selected_company_id = Some(company_id);
    self.detail_scroll = 0;
    self.screen = Screen::CompanyDetail;
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Mutex;

  use ratatui::{Terminal, backend::TestBackend};
  use remeet_core::{company::Company, contact::Contact};

  use super::*;

  #[derive(Debug, thiserror::Error)]
  #[error("offline")]
  struct Offline;

  /// Serves a fixed list, or fails once `fail` is set.
  struct FixedSource {
    contacts: Vec<Contact>,
    fail:     Mutex<bool>,
    calls:    Mutex<usize>,
  }

  impl ContactSource for FixedSource {
    type Error = Offline;

    async fn fetch_contacts(&self) -> Result<Vec<Contact>, Offline> {
      *self.calls.lock().unwrap() += 1;
      if *self.fail.lock().unwrap() {
        Err(Offline)
      } else {
        Ok(self.contacts.clone())
      }
    }
  }

  fn member(company: &Company, name: &str) -> Contact {
    let mut c = Contact::new(Uuid::nil(), name);
    c.company_id = Some(company.id);
    c.company = Some(company.clone());
    c
  }

  fn key(code: KeyCode) -> KeyEvent { KeyEvent::new(code, KeyModifiers::NONE) }

  fn fixture() -> (App<FixedSource>, Arc<FixedSource>) {
    let acme = Company::new(Uuid::new_v4(), "Acme Corp").with_industry("Tech");
    let globex = Company::new(Uuid::new_v4(), "Globex");
    let source = Arc::new(FixedSource {
      contacts: vec![
        member(&globex, "g1"),
        member(&acme, "a1"),
        member(&acme, "a2"),
      ],
      fail:     Mutex::new(false),
      calls:    Mutex::new(0),
    });
    (App::new(source.clone()), source)
  }

  /// Drive the background load to completion.
  async fn settle(app: &mut App<FixedSource>) {
    while app.load_in_flight() {
      tokio::task::yield_now().await;
      app.poll_load().await;
    }
  }

  async fn loaded_app() -> (App<FixedSource>, Arc<FixedSource>) {
    let (mut app, source) = fixture();
    app.start_load();
    settle(&mut app).await;
    (app, source)
  }

  fn status_row(app: &App<FixedSource>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 8)).unwrap();
    terminal.draw(|f| crate::ui::draw(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let y = buffer.area.height - 1;
    (0..buffer.area.width).map(|x| buffer[(x, y)].symbol()).collect()
  }

  #[tokio::test]
  async fn load_populates_list() {
    let (app, _) = loaded_app().await;
    assert!(!app.view_model.is_loading());
    assert!(app.view_model.error_message().is_none());
    let names: Vec<_> = app
      .filtered_companies()
      .into_iter()
      .map(|c| c.company.name)
      .collect();
    assert_eq!(names, ["Acme Corp", "Globex"]);
  }

  #[tokio::test]
  async fn loading_state_is_drawn_until_fetch_lands() {
    let (mut app, _) = fixture();
    app.start_load();
    assert!(app.view_model.is_loading());
    assert!(status_row(&app).contains("Loading"));

    settle(&mut app).await;
    assert!(!app.view_model.is_loading());
    assert!(!status_row(&app).contains("Loading"));
    assert_eq!(app.filtered_companies().len(), 2);
  }

  #[tokio::test]
  async fn reload_while_loading_is_ignored() {
    let (mut app, source) = fixture();
    app.start_load();
    assert!(app.handle_key(key(KeyCode::Char('r'))));
    settle(&mut app).await;
    assert_eq!(*source.calls.lock().unwrap(), 1);
  }

  #[tokio::test]
  async fn search_then_enter_opens_single_match() {
    let (mut app, _) = loaded_app().await;
    assert!(app.handle_key(key(KeyCode::Char('/'))));
    for c in "glob".chars() {
      app.handle_key(key(KeyCode::Char(c)));
    }
    assert_eq!(app.view_model.search_query(), "glob");
    assert_eq!(app.filtered_companies().len(), 1);

    app.handle_key(key(KeyCode::Enter));
    assert!(!app.filter_active);
    assert_eq!(app.screen, Screen::CompanyDetail);
    assert_eq!(app.selected_company().unwrap().company.name, "Globex");
  }

  #[tokio::test]
  async fn escape_clears_search() {
    let (mut app, _) = loaded_app().await;
    app.handle_key(key(KeyCode::Char('/')));
    for c in "zzz".chars() {
      app.handle_key(key(KeyCode::Char(c)));
    }
    assert!(app.filtered_companies().is_empty());

    app.handle_key(key(KeyCode::Esc));
    assert!(!app.filter_active);
    assert!(app.view_model.search_query().is_empty());
    assert_eq!(app.filtered_companies().len(), 2);
  }

  #[tokio::test]
  async fn cursor_stays_in_bounds() {
    let (mut app, _) = loaded_app().await;
    for _ in 0..5 {
      app.handle_key(key(KeyCode::Char('j')));
    }
    assert_eq!(app.list_cursor, 1);
    for _ in 0..5 {
      app.handle_key(key(KeyCode::Char('k')));
    }
    assert_eq!(app.list_cursor, 0);
  }

  #[tokio::test]
  async fn failed_reload_keeps_companies_and_reports() {
    let (mut app, source) = loaded_app().await;
    *source.fail.lock().unwrap() = true;

    app.handle_key(key(KeyCode::Char('r')));
    settle(&mut app).await;
    assert_eq!(app.view_model.error_message(), Some("offline"));
    assert!(status_row(&app).contains("Error: offline"));
    assert_eq!(app.filtered_companies().len(), 2);
  }

  #[tokio::test]
  async fn escape_dismisses_error() {
    let (mut app, source) = loaded_app().await;
    *source.fail.lock().unwrap() = true;
    app.handle_key(key(KeyCode::Char('r')));
    settle(&mut app).await;
    assert!(app.view_model.error_message().is_some());

    app.handle_key(key(KeyCode::Esc));
    assert!(app.view_model.error_message().is_none());
    assert_eq!(app.screen, Screen::CompanyList);
    assert_eq!(app.filtered_companies().len(), 2);
  }

  #[tokio::test]
  async fn quit_keys() {
    let (mut app, _) = loaded_app().await;
    assert!(!app.handle_key(key(KeyCode::Char('q'))));
    let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
    assert!(!app.handle_key(ctrl_c));
  }
}
