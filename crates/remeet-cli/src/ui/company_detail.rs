//! Company detail pane — right panel, one line per contact.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};
use remeet_core::{
  aggregate::CompanyWithContacts,
  contact::Contact,
  source::ContactSource,
};

use crate::app::{App, Screen};

// ─── Public entry ─────────────────────────────────────────────────────────────

/// Render the detail pane into `area`.
///
/// Shows the selected company when the detail pane has focus, otherwise a
/// preview of the company under the list cursor.
pub fn draw<S: ContactSource + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let entry = match app.screen {
    Screen::CompanyDetail => app.selected_company(),
    Screen::CompanyList => app.cursor_company(),
  };

  let Some(entry) = entry else {
    draw_empty(f, area);
    return;
  };

  let block = Block::default()
    .title(format!(" {} ", entry.company.name))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut lines = summary_lines(&entry);
  lines.push(Line::from(""));
  lines.extend(entry.contacts.iter().map(contact_line));

  // Scrolling only applies once the pane has focus.
  let scroll = match app.screen {
    Screen::CompanyDetail => app.detail_scroll as u16,
    Screen::CompanyList => 0,
  };
  f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), inner);
}

fn draw_empty(f: &mut Frame, area: Rect) {
  let block = Block::default()
    .title(" Contacts ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(
    Paragraph::new("No companies yet. Press r to reload.")
      .style(Style::default().fg(Color::DarkGray)),
    inner,
  );
}

// ─── Line builders ────────────────────────────────────────────────────────────

fn summary_lines(entry: &CompanyWithContacts) -> Vec<Line<'static>> {
  let last = entry
    .last_interaction
    .map(|t| {
      t.with_timezone(&chrono::Local)
        .format("%Y-%m-%d")
        .to_string()
    })
    .unwrap_or_else(|| "never".into());

  let label = Style::default()
    .fg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

  vec![
    Line::from(vec![
      Span::styled(format!("{:<14}", "industry"), label),
      Span::raw(entry.company.industry.clone().unwrap_or_else(|| "—".into())),
    ]),
    Line::from(vec![
      Span::styled(format!("{:<14}", "contacts"), label),
      Span::raw(entry.contact_count().to_string()),
      Span::styled(format!("   last contact {last}"), Style::default().fg(Color::DarkGray)),
    ]),
  ]
}

fn contact_line(contact: &Contact) -> Line<'static> {
  let mut spans = vec![Span::styled(
    format!("{:<3}", contact.initials()),
    Style::default().fg(Color::Magenta),
  )];

  spans.push(Span::styled(
    contact.full_name.clone(),
    Style::default().add_modifier(Modifier::BOLD),
  ));
  if contact.is_favorite {
    spans.push(Span::styled(" ★", Style::default().fg(Color::Yellow)));
  }
  if contact.is_verified {
    spans.push(Span::styled(" ✓", Style::default().fg(Color::Green)));
  }

  let extra: Vec<&str> = [
    contact.title.as_deref(),
    contact.email.as_deref(),
    contact.phone.as_deref(),
  ]
  .into_iter()
  .flatten()
  .collect();
  if !extra.is_empty() {
    spans.push(Span::styled(
      format!("  {}", extra.join(" · ")),
      Style::default().fg(Color::DarkGray),
    ));
  }
  if let Some(tags) = contact.tags.as_deref().filter(|t| !t.is_empty()) {
    spans.push(Span::styled(
      format!("  [{}]", tags.join(", ")),
      Style::default().fg(Color::Blue),
    ));
  }

  Line::from(spans)
}
