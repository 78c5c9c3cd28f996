//! TUI rendering; orchestrates all panes.

pub mod limit_detail;
pub mod limit_list;

use chrono::Local;
use colliery_core::status::Status;
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::Paragraph,
};

use crate::app::{App, Screen};

/// Colour a status is drawn in everywhere.
pub fn status_color(status: Status) -> Color {
  match status {
    Status::Met => Color::Green,
    Status::Warning => Color::Yellow,
    Status::Deficient => Color::Red,
    Status::Excessive => Color::LightRed,
  }
}

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw(f: &mut Frame, app: &App) {
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

fn draw_header(f: &mut Frame, area: Rect, app: &App) {
  let left = Span::styled(
    format!(" colliery  limits for {}", app.period),
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
  );

  let generated = app
    .report
    .as_ref()
    .map(|r| r.generated_at.with_timezone(&Local).format("as of %H:%M:%S").to_string())
    .unwrap_or_default();
  let right = Span::styled(format!("{generated} "), Style::default().fg(Color::Gray));

  let pad = area
    .width
    .saturating_sub(left.width() as u16)
    .saturating_sub(right.width() as u16);

  let line = Line::from(vec![left, Span::raw(" ".repeat(pad as usize)), right]);
  f.render_widget(Paragraph::new(line).style(Style::default().bg(Color::DarkGray)), area);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body(f: &mut Frame, area: Rect, app: &App) {
  let cols = Layout::default()
    .direction(Direction::Horizontal)
    .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
    .split(area);

  limit_list::draw(f, cols[0], app);

  match (app.screen, app.cursor_line()) {
    (Screen::LimitDetail, Some(line)) => limit_detail::draw_line(f, cols[1], line),
    _ => limit_detail::draw_totals(f, cols[1], app),
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status(f: &mut Frame, area: Rect, app: &App) {
  let (mode_label, hints) = match app.screen {
    _ if app.filter_active => ("FILTER", "Type to filter  Esc cancel  Enter select"),
    Screen::LimitList => {
      ("NORMAL", "↑↓/jk move  Enter detail  r recalc  g reload  p/n month  / filter  q quit")
    }
    Screen::LimitDetail => ("DETAIL", "Esc back  [ prev  ] next  r recalc  q quit"),
  };

  let status = if app.status_msg.is_empty() { hints } else { app.status_msg.as_str() };

  let line = Line::from(vec![
    Span::styled(
      format!(" {mode_label} "),
      Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD),
    ),
    Span::styled(format!("  {status}"), Style::default().fg(Color::Gray)),
  ]);
  f.render_widget(Paragraph::new(line).style(Style::default().bg(Color::Black)), area);
}
