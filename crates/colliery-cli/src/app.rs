//! Application state machine and event dispatcher.

use std::sync::Arc;

use chrono::{Datelike as _, Months};
use colliery_core::{
  limit::Period,
  report::{Dashboard, LimitAssessment, LimitReport},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};

use crate::client::ApiClient;

// ─── Screen ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
  /// Focus on the limit list; right pane shows the period totals.
  LimitList,
  /// Focus on one limit's metrics.
  LimitDetail,
}

// ─── App ──────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  pub screen: Screen,

  /// The month whose limits are on screen.
  pub period: Period,

  /// Last report fetched for `period`.
  pub report: Option<LimitReport>,

  pub dashboard: Option<Dashboard>,

  /// Fuzzy filter over section names (only edited while `filter_active`).
  pub filter: String,

  pub filter_active: bool,

  /// Cursor position within the *filtered* lines.
  pub list_cursor: usize,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  pub client: Arc<ApiClient>,
}

impl App {
  pub fn new(client: ApiClient, period: Period) -> Self {
    Self {
      screen: Screen::LimitList,
      period,
      report: None,
      dashboard: None,
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Fetch the limit report and dashboard for `self.period`.
  pub async fn load(&mut self) -> anyhow::Result<()> {
    self.status_msg = format!("Loading {}…", self.period);
    let loaded = async {
      let report = self.client.limit_report(self.period).await?;
      let dashboard = self.client.dashboard(self.period).await?;
      anyhow::Ok((report, dashboard))
    }
    .await;

    match loaded {
      Ok((report, dashboard)) => {
        self.report = Some(report);
        self.dashboard = Some(dashboard);
        self.clamp_cursor();
        self.status_msg = String::new();
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e)
      }
    }
  }

  /// Ask the server to refresh every limit's actuals, then reload.
  async fn recalculate(&mut self) {
    self.status_msg = "Recalculating…".into();
    match self.client.recalculate().await {
      Ok(summary) => {
        if self.load().await.is_ok() {
          self.status_msg = format!(
            "Recalculated {} limits at {}",
            summary.limits_refreshed,
            summary.recalculated_at.format("%H:%M:%S"),
          );
        }
      }
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  /// Move the period by `months` (negative for earlier) and reload.
  async fn shift_period(&mut self, months: i32) {
    self.period = shifted(self.period, months);
    self.list_cursor = 0;
    self.screen = Screen::LimitList;
    // A failed reload is already reported in the status bar.
    let _ = self.load().await;
  }

  // ── Filtered list ─────────────────────────────────────────────────────────

  pub fn lines(&self) -> &[LimitAssessment] {
    self.report.as_ref().map(|r| r.lines.as_slice()).unwrap_or_default()
  }

  /// Lines whose section name matches the current filter query.
  pub fn filtered_lines(&self) -> Vec<&LimitAssessment> {
    if self.filter.is_empty() {
      return self.lines().iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .lines()
      .iter()
      .filter(|l| matcher.fuzzy_match(&l.section_name, &self.filter).is_some())
      .collect()
  }

  /// The line under the list cursor in the filtered view, if any.
  pub fn cursor_line(&self) -> Option<&LimitAssessment> {
    self.filtered_lines().get(self.list_cursor).copied()
  }

  fn clamp_cursor(&mut self) {
    let len = self.filtered_lines().len();
    self.list_cursor = self.list_cursor.min(len.saturating_sub(1));
    if len == 0 {
      self.screen = Screen::LimitList;
    }
  }

  fn move_cursor(&mut self, down: bool) {
    let len = self.filtered_lines().len();
    if down && self.list_cursor + 1 < len {
      self.list_cursor += 1;
    } else if !down && self.list_cursor > 0 {
      self.list_cursor -= 1;
    }
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return false;
    }

    if self.filter_active {
      self.handle_filter_key(key);
      return true;
    }

    match key.code {
      KeyCode::Char('q') => return false,

      KeyCode::Char('r') => self.recalculate().await,
      KeyCode::Char('g') => {
        let _ = self.load().await;
      }
      KeyCode::Char('p') | KeyCode::Char('<') => self.shift_period(-1).await,
      KeyCode::Char('n') | KeyCode::Char('>') => self.shift_period(1).await,

      KeyCode::Down | KeyCode::Char('j') | KeyCode::Char(']') => self.move_cursor(true),
      KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('[') => self.move_cursor(false),

      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if self.cursor_line().is_some() {
          self.screen = Screen::LimitDetail;
        }
      }
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => self.screen = Screen::LimitList,

      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
        self.screen = Screen::LimitList;
      }

      _ => {}
    }
    true
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.list_cursor = 0;
        // Jump straight to the detail when exactly one section matches.
        if self.filtered_lines().len() == 1 {
          self.screen = Screen::LimitDetail;
        }
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.list_cursor = 0;
      }
      _ => {}
    }
  }
}

/// `period` moved by a whole number of months.
pub fn shifted(period: Period, months: i32) -> Period {
  let start = period.first_day();
  let moved = if months >= 0 {
    start.checked_add_months(Months::new(months.unsigned_abs()))
  } else {
    start.checked_sub_months(Months::new(months.unsigned_abs()))
  };
  // Out-of-range periods are rejected by the server; stay put at the edges.
  moved
    .and_then(|d| Period::new(d.year(), d.month()).ok())
    .unwrap_or(period)
}
