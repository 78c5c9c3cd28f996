//! Limit list pane, left panel.

use colliery_core::{report::LimitAssessment, status::Status};
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::{app::App, ui::status_color};

/// The worst status across a line's metrics, for the list badge.
fn worst(line: &LimitAssessment) -> Option<Status> {
  let rank = |s: Status| match s {
    Status::Met => 0,
    Status::Warning => 1,
    Status::Deficient | Status::Excessive => 2,
  };
  line.metrics.iter().map(|m| m.status).max_by_key(|s| rank(*s))
}

/// Render the list of limits into `area`.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let filtered = app.filtered_lines();
  let total = app.lines().len();

  let title = if app.filter_active || !app.filter.is_empty() {
    format!(" Sections ({}/{}) ", filtered.len(), total)
  } else {
    format!(" Sections ({total}) ")
  };

  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));

  let items: Vec<ListItem> = filtered
    .iter()
    .map(|line| {
      let badge = match worst(line) {
        Some(status) => Span::styled("● ", Style::default().fg(status_color(status))),
        None => Span::raw("  "),
      };
      ListItem::new(Line::from(vec![badge, Span::raw(line.section_name.clone())]))
    })
    .collect();

  let mut inner_area = block.inner(area);
  f.render_widget(block, area);

  if (app.filter_active || !app.filter.is_empty()) && inner_area.height > 2 {
    let filter_area = Rect {
      x:      inner_area.x,
      y:      inner_area.y + inner_area.height - 1,
      width:  inner_area.width,
      height: 1,
    };
    inner_area.height -= 1;

    let cursor = if app.filter_active { "_" } else { "" };
    f.render_widget(
      Paragraph::new(format!("/{}{cursor}", app.filter)).style(Style::default().fg(Color::Yellow)),
      filter_area,
    );
  }

  if total == 0 {
    f.render_widget(
      Paragraph::new("No limits for this month.").style(Style::default().fg(Color::DarkGray)),
      inner_area,
    );
    return;
  }

  let mut state = ListState::default();
  state.select((!filtered.is_empty()).then_some(app.list_cursor));

  f.render_stateful_widget(
    List::new(items).highlight_style(
      Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD),
    ),
    inner_area,
    &mut state,
  );
}
