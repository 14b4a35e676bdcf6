//! TUI rendering — orchestrates all panes.

pub mod company_detail;
pub mod company_list;

use chrono::Local;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};
use remeet_core::source::ContactSource;

use crate::app::{App, Screen};

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<S: ContactSource + 'static>(f: &mut Frame, app: &App<S>) {
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(f.area());

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<S: ContactSource + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let date = Local::now().format("%Y-%m-%d").to_string();

  let left = Span::styled(
    " Re:Meet  [/] search  [r] reload  [q] quit",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );
  let right = Span::styled(
    format!(
      "{} contacts at {} companies  {date} ",
      app.view_model.total_contacts_count(),
      app.view_model.total_companies_count(),
    ),
    Style::default().fg(Color::Gray),
  );

  let pad = area
    .width
    .saturating_sub(left.width() as u16)
    .saturating_sub(right.width() as u16);

  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body<S: ContactSource + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
    .split(area);

  company_list::draw(f, cols[0], app);
  company_detail::draw(f, cols[1], app);
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<S: ContactSource + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let (mode_label, hints) = match &app.screen {
    Screen::CompanyList if app.filter_active => (
      "SEARCH",
      "Type to filter by name or industry  Esc cancel  Enter select",
    ),
    Screen::CompanyList => (
      "NORMAL",
      "↑↓/jk navigate  / search  Enter detail  r reload  q quit",
    ),
    Screen::CompanyDetail => (
      "DETAIL",
      "↑↓/jk scroll  Esc back  [ prev  ] next  r reload  q quit",
    ),
  };

  let (status, status_color) = if app.view_model.is_loading() {
    ("Loading…".to_string(), Color::Yellow)
  } else if let Some(error) = app.view_model.error_message() {
    (format!("Error: {error}  (Esc dismiss, r retry)"), Color::Red)
  } else {
    (hints.to_string(), Color::DarkGray)
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), Style::default().fg(status_color));

  f.render_widget(
    Paragraph::new(Line::from(vec![mode_span, hint_span]))
      .style(Style::default().bg(Color::Black)),
    area,
  );
}
