//! Right panel: one limit's metrics, or the period totals.

use colliery_core::report::{LimitAssessment, MetricAssessment};
use ratatui::{
  Frame,
  layout::{Constraint, Layout, Rect},
  style::{Color, Modifier, Style},
  text::Line,
  widgets::{Block, Borders, Cell, Paragraph, Row, Table},
};

use crate::{app::App, ui::status_color};

const WIDTHS: [Constraint; 5] = [
  Constraint::Length(12),
  Constraint::Length(14),
  Constraint::Length(14),
  Constraint::Length(9),
  Constraint::Min(10),
];

fn metrics_table(metrics: &[MetricAssessment]) -> Table<'_> {
  let header = Row::new(["Metric", "Plan", "Actual", "%", "Status"])
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

  let rows = metrics.iter().map(|m| {
    let unit = m.metric.unit();
    Row::new([
      Cell::from(m.metric.to_string()),
      Cell::from(format!("{:.1} {unit}", m.plan)),
      Cell::from(format!("{:.1} {unit}", m.actual)),
      Cell::from(format!("{:.2}", m.percent)),
      Cell::from(m.status.to_string()).style(Style::default().fg(status_color(m.status))),
    ])
  });

  Table::new(rows, WIDTHS).header(header).column_spacing(1)
}

fn framed(f: &mut Frame, area: Rect, title: String) -> Rect {
  let block = Block::default()
    .title(title)
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  inner
}

/// Plan against actual for one section.
pub fn draw_line(f: &mut Frame, area: Rect, line: &LimitAssessment) {
  let inner = framed(f, area, format!(" {} {}-{:02} ", line.section_name, line.year, line.month));
  f.render_widget(metrics_table(&line.metrics), inner);
}

/// Totals across every listed section, with the dashboard counters.
pub fn draw_totals(f: &mut Frame, area: Rect, app: &App) {
  let inner = framed(f, area, format!(" All sections {} ", app.period));

  let Some(report) = &app.report else {
    f.render_widget(
      Paragraph::new("Not loaded.").style(Style::default().fg(Color::DarkGray)),
      inner,
    );
    return;
  };

  let [table_area, summary_area] =
    Layout::vertical([Constraint::Length(6), Constraint::Min(0)]).areas(inner);
  f.render_widget(metrics_table(&report.totals), table_area);

  if let Some(d) = &app.dashboard {
    let summary = vec![
      Line::from(""),
      Line::from(format!("Workers   {}", d.workers)),
      Line::from(format!("Sections  {}", d.sections)),
      Line::from(format!("Mined     {:.1} t", d.mined_volume)),
    ];
    f.render_widget(Paragraph::new(summary), summary_area);
  }
}
