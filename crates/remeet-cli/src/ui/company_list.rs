//! Company list pane — left panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use remeet_core::source::ContactSource;

use crate::app::{App, Screen};

/// Render the company list into `area`.
pub fn draw<S: ContactSource + 'static>(f: &mut Frame, area: Rect, app: &App<S>) {
  let filtered = app.filtered_companies();
  let total = app.view_model.total_companies_count();
  let query = app.view_model.search_query();

  // Title with count.
  let title = if app.filter_active || !query.is_empty() {
    format!(" Companies ({}/{}) ", filtered.len(), total)
  } else {
    format!(" Companies ({total}) ")
  };

  // Dim the list while the detail pane has focus.
  let text_style = if app.screen == Screen::CompanyDetail {
    Style::default().fg(Color::DarkGray)
  } else {
    Style::default()
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let items: Vec<ListItem> = filtered
    .iter()
    .map(|entry| {
      let mut spans = vec![
        Span::styled(entry.company.name.clone(), text_style),
        Span::styled(
          format!("  {}", entry.contact_count()),
          Style::default().fg(Color::Cyan),
        ),
      ];
      if let Some(industry) = &entry.company.industry {
        spans.push(Span::styled(
          format!("  {industry}"),
          Style::default().fg(Color::DarkGray),
        ));
      }
      ListItem::new(Line::from(spans))
    })
    .collect();

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  // Search bar along the bottom edge of the pane.
  if (app.filter_active || !query.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height = inner_area.height.saturating_sub(1);

    let filter_text = if app.filter_active {
      format!("/{query}_")
    } else {
      format!("/{query}")
    };
    f.render_widget(
      Paragraph::new(filter_text).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  let mut state = ListState::default();
  state.select(if filtered.is_empty() {
    None
  } else {
    Some(app.list_cursor)
  });

  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default()
        .bg(Color::Blue)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD),
    ),
    inner_area,
    &mut state,
  );
}
