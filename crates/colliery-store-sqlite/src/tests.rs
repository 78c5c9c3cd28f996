//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use colliery_core::{
  Classify, ErrorKind,
  ids::{GradeName, LimitId, PositionId, SectionId, TabNumber},
  journal::{
    CostDraft, CostEvent, EventFilter, MiningDraft, MiningEvent, Shift, TimeSheetDraft,
    TimeSheetEntry, TimeSheetFilter, TimeSheetKey,
  },
  limit::{Limit, LimitDraft, LimitFilter, Metrics, Period},
  record::NoFilter,
  reference::{CoalGrade, Position, PositionDraft, Section, SectionDraft, Worker, WorkerFilter},
  report::Tariffs,
  status::{MetricKind, Status},
  store::{MineStore, Repository},
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

// ─── Fixtures ────────────────────────────────────────────────────────────────

async fn section(s: &SqliteStore, name: &str) -> SectionId {
  let created: Section = Repository::<Section>::create(s, SectionDraft::named(name))
    .await
    .unwrap();
  created.section_id
}

async fn position(s: &SqliteStore, name: &str) -> PositionId {
  let created: Position =
    Repository::<Position>::create(s, PositionDraft { name: name.into() }).await.unwrap();
  created.position_id
}

fn worker(tab: i64, section_id: SectionId, position_id: PositionId) -> Worker {
  Worker {
    tab_number: TabNumber(tab),
    full_name: format!("Worker {tab}"),
    section_id,
    position_id,
    iin: format!("{tab:012}"),
    address: None,
    phone: None,
    gender: None,
    birth_date: None,
  }
}

async fn grade(s: &SqliteStore, name: &str, price_per_ton: f64) -> GradeName {
  let g = CoalGrade {
    grade: name.into(),
    ash_content: 5.5,
    moisture: 3.2,
    calorific_value: 8100,
    price_per_ton,
  };
  Repository::<CoalGrade>::create(s, g).await.unwrap().grade
}

async fn mine(s: &SqliteStore, section_id: SectionId, on: NaiveDate, coal: f64, rock: f64) {
  let draft = MiningDraft {
    date: on,
    shift: Shift::First,
    section_id,
    grade: "Anthracite".into(),
    coal_volume: coal,
    rock_volume: rock,
  };
  Repository::<MiningEvent>::create(s, draft).await.unwrap();
}

async fn spend(s: &SqliteStore, section_id: SectionId, on: NaiveDate, kwh: f64, litres: f64) {
  let draft = CostDraft {
    date: on,
    shift: Shift::Second,
    section_id,
    electricity: kwh,
    fuel: litres,
  };
  Repository::<CostEvent>::create(s, draft).await.unwrap();
}

async fn plan(
  s: &SqliteStore,
  section_id: SectionId,
  year: i32,
  month: u32,
  plan: Metrics,
) -> Limit {
  Repository::<Limit>::create(s, LimitDraft { section_id, month, year, plan })
    .await
    .unwrap()
}

async fn reload(s: &SqliteStore, id: LimitId) -> Limit {
  Repository::<Limit>::get(s, id).await.unwrap().expect("limit exists")
}

/// One section with the Anthracite grade registered.
async fn mine_with_one_section() -> (SqliteStore, SectionId) {
  let s = store().await;
  let north = section(&s, "North").await;
  grade(&s, "Anthracite", 8500.0).await;
  (s, north)
}

// ─── Repository ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_get_update_delete_section() {
  let s = store().await;

  let mut draft = SectionDraft::named("North");
  draft.area = Some(1250.5);
  let created: Section = Repository::<Section>::create(&s, draft.clone()).await.unwrap();
  assert_eq!(created.name, "North");
  assert_eq!(created.area, Some(1250.5));

  let fetched = Repository::<Section>::get(&s, created.section_id).await.unwrap();
  assert_eq!(fetched.as_ref(), Some(&created));

  draft.name = "North-East".into();
  let updated = Repository::<Section>::update(&s, created.section_id, draft).await.unwrap();
  assert_eq!(updated.name, "North-East");
  assert_eq!(updated.section_id, created.section_id);

  Repository::<Section>::delete(&s, created.section_id).await.unwrap();
  let gone = Repository::<Section>::get(&s, created.section_id).await.unwrap();
  assert!(gone.is_none());
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  let missing = Repository::<Worker>::get(&s, TabNumber(4242)).await.unwrap();
  assert!(missing.is_none());
}

#[tokio::test]
async fn update_and_delete_missing_are_not_found() {
  let s = store().await;

  let err = Repository::<Section>::update(&s, SectionId(99), SectionDraft::named("Ghost"))
    .await
    .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);

  let err = Repository::<Section>::delete(&s, SectionId(99)).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn invalid_draft_is_rejected_before_the_store() {
  let s = store().await;
  let north = section(&s, "North").await;

  let draft = MiningDraft {
    date:        date(2024, 6, 1),
    shift:       Shift::First,
    section_id:  north,
    grade:       "Anthracite".into(),
    coal_volume: -5.0,
    rock_volume: 0.0,
  };
  let err = Repository::<MiningEvent>::create(&s, draft).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[tokio::test]
async fn deleting_a_referenced_section_is_rejected() {
  let s = store().await;
  let north = section(&s, "North").await;
  let miner = position(&s, "Miner").await;
  Repository::<Worker>::create(&s, worker(1001, north, miner)).await.unwrap();

  let err = Repository::<Section>::delete(&s, north).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::ConstraintViolation);

  let still_there = Repository::<Section>::get(&s, north).await.unwrap();
  assert!(still_there.is_some());
}

#[tokio::test]
async fn duplicate_limit_for_a_period_is_rejected() {
  let s = store().await;
  let north = section(&s, "North").await;
  let p = Metrics { production: 1000.0, ..Default::default() };
  plan(&s, north, 2024, 6, p).await;

  let err = Repository::<Limit>::create(
    &s,
    LimitDraft { section_id: north, month: 6, year: 2024, plan: p },
  )
  .await
  .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::ConstraintViolation);

  let limits = Repository::<Limit>::list(&s, LimitFilter::default()).await.unwrap();
  assert_eq!(limits.len(), 1);
}

#[tokio::test]
async fn limit_for_unknown_section_is_a_constraint_violation() {
  let s = store().await;
  let err = Repository::<Limit>::create(
    &s,
    LimitDraft {
      section_id: SectionId(77),
      month:      6,
      year:       2024,
      plan:       Metrics { production: 1.0, ..Default::default() },
    },
  )
  .await
  .unwrap_err();
  assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
}

#[tokio::test]
async fn duplicate_iin_is_rejected() {
  let s = store().await;
  let north = section(&s, "North").await;
  let miner = position(&s, "Miner").await;
  Repository::<Worker>::create(&s, worker(1001, north, miner)).await.unwrap();

  let mut twin = worker(1002, north, miner);
  twin.iin = format!("{:012}", 1001);
  let err = Repository::<Worker>::create(&s, twin).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
}

#[tokio::test]
async fn removing_a_manager_clears_the_section_reference() {
  let s = store().await;
  let north = section(&s, "North").await;
  let chief = position(&s, "Chief").await;
  Repository::<Worker>::create(&s, worker(1001, north, chief)).await.unwrap();

  let mut draft = SectionDraft::named("North");
  draft.manager = Some(TabNumber(1001));
  Repository::<Section>::update(&s, north, draft).await.unwrap();

  Repository::<Worker>::delete(&s, TabNumber(1001)).await.unwrap();

  let section = Repository::<Section>::get(&s, north).await.unwrap().unwrap();
  assert_eq!(section.manager, None);
}

#[tokio::test]
async fn workers_filter_by_section() {
  let s = store().await;
  let north = section(&s, "North").await;
  let south = section(&s, "South").await;
  let miner = position(&s, "Miner").await;
  Repository::<Worker>::create(&s, worker(1001, north, miner)).await.unwrap();
  Repository::<Worker>::create(&s, worker(1002, south, miner)).await.unwrap();
  Repository::<Worker>::create(&s, worker(1003, north, miner)).await.unwrap();

  let filter = WorkerFilter { section_id: Some(north), position_id: None };
  let in_north = Repository::<Worker>::list(&s, filter).await.unwrap();
  let tabs: Vec<i64> = in_north.iter().map(|w| w.tab_number.0).collect();
  assert_eq!(tabs, vec![1001, 1003]);
}

#[tokio::test]
async fn coal_grade_keyed_by_name_survives_rename() {
  let s = store().await;
  grade(&s, "Anthracite", 8500.0).await;

  let renamed = CoalGrade {
    grade:           "Anthracite A1".into(),
    ash_content:     5.0,
    moisture:        3.0,
    calorific_value: 8200,
    price_per_ton:   8700.0,
  };
  let updated = Repository::<CoalGrade>::update(&s, "Anthracite".into(), renamed)
    .await
    .unwrap();
  assert_eq!(updated.grade.as_str(), "Anthracite A1");

  let old = Repository::<CoalGrade>::get(&s, "Anthracite".into()).await.unwrap();
  assert!(old.is_none());
  let all = Repository::<CoalGrade>::list(&s, NoFilter::default()).await.unwrap();
  assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn journal_filters_are_inclusive_on_dates() {
  let (s, north) = mine_with_one_section().await;
  mine(&s, north, date(2024, 5, 31), 1.0, 0.0).await;
  mine(&s, north, date(2024, 6, 1), 2.0, 0.0).await;
  mine(&s, north, date(2024, 6, 30), 3.0, 0.0).await;
  mine(&s, north, date(2024, 7, 1), 4.0, 0.0).await;

  let filter = EventFilter {
    section_id: Some(north),
    from:       Some(date(2024, 6, 1)),
    to:         Some(date(2024, 6, 30)),
  };
  let events = Repository::<MiningEvent>::list(&s, filter).await.unwrap();
  let volumes: Vec<f64> = events.iter().map(|e| e.coal_volume).collect();
  // Newest first.
  assert_eq!(volumes, vec![3.0, 2.0]);
}

// ─── Time sheet ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn timesheet_section_comes_from_the_worker() {
  let s = store().await;
  let north = section(&s, "North").await;
  let south = section(&s, "South").await;
  let miner = position(&s, "Miner").await;
  Repository::<Worker>::create(&s, worker(1001, north, miner)).await.unwrap();

  let draft = TimeSheetDraft {
    date:         date(2024, 6, 3),
    shift:        Shift::First,
    tab_number:   TabNumber(1001),
    hours_worked: 8.0,
  };
  let entry: TimeSheetEntry =
    Repository::<TimeSheetEntry>::create(&s, draft.clone()).await.unwrap();
  assert_eq!(entry.section_id, north);

  // Transfer the worker, then edit the entry: the section follows.
  let mut moved = worker(1001, south, miner);
  moved.full_name = "Worker 1001".into();
  Repository::<Worker>::update(&s, TabNumber(1001), moved).await.unwrap();

  let key = draft.key();
  let edited = Repository::<TimeSheetEntry>::update(
    &s,
    key,
    TimeSheetDraft { hours_worked: 10.0, ..draft },
  )
  .await
  .unwrap();
  assert_eq!(edited.section_id, south);
  assert_eq!(edited.hours_worked, 10.0);

  let by_section = TimeSheetFilter { section_id: Some(south), ..Default::default() };
  let listed = Repository::<TimeSheetEntry>::list(&s, by_section).await.unwrap();
  assert_eq!(listed.len(), 1);
}

#[tokio::test]
async fn timesheet_for_unknown_worker_is_rejected() {
  let s = store().await;
  let draft = TimeSheetDraft {
    date:         date(2024, 6, 3),
    shift:        Shift::Second,
    tab_number:   TabNumber(9999),
    hours_worked: 8.0,
  };
  let err = Repository::<TimeSheetEntry>::create(&s, draft).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::ConstraintViolation);
}

#[tokio::test]
async fn timesheet_key_is_unique_per_shift() {
  let s = store().await;
  let north = section(&s, "North").await;
  let miner = position(&s, "Miner").await;
  Repository::<Worker>::create(&s, worker(1001, north, miner)).await.unwrap();

  let draft = TimeSheetDraft {
    date:         date(2024, 6, 3),
    shift:        Shift::First,
    tab_number:   TabNumber(1001),
    hours_worked: 8.0,
  };
  Repository::<TimeSheetEntry>::create(&s, draft.clone()).await.unwrap();
  let err = Repository::<TimeSheetEntry>::create(&s, draft).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::ConstraintViolation);

  let key: TimeSheetKey = "2024-06-03_1_1001".parse().unwrap();
  assert!(Repository::<TimeSheetEntry>::get(&s, key).await.unwrap().is_some());
}

// ─── Limits aggregator ───────────────────────────────────────────────────────

#[tokio::test]
async fn recalculation_sums_production_for_the_period() {
  let (s, north) = mine_with_one_section().await;
  let limit = plan(&s, north, 2024, 6, Metrics { production: 1000.0, ..Default::default() }).await;
  assert_eq!(limit.actual, Metrics::default());

  mine(&s, north, date(2024, 6, 3), 300.0, 0.0).await;
  mine(&s, north, date(2024, 6, 17), 250.0, 0.0).await;

  let summary = s.recalculate_actuals().await.unwrap();
  assert_eq!(summary.limits_refreshed, 1);

  let limit = reload(&s, limit.limit_id).await;
  assert_eq!(limit.actual.production, 550.0);

  let report = s.limit_report(LimitFilter::default()).await.unwrap();
  let production = report.lines[0].metric(MetricKind::Production).unwrap();
  assert_eq!(production.percent, 55.0);
  assert_eq!(production.status, Status::Deficient);
}

#[tokio::test]
async fn rock_overrun_is_a_warning() {
  let s = store().await;
  let _north = section(&s, "North").await;
  let south = section(&s, "South").await;
  grade(&s, "Anthracite", 8500.0).await;
  let limit = plan(&s, south, 2024, 3, Metrics { rock: 500.0, ..Default::default() }).await;

  mine(&s, south, date(2024, 3, 4), 100.0, 300.0).await;
  mine(&s, south, date(2024, 3, 25), 100.0, 250.0).await;
  s.recalculate_actuals().await.unwrap();

  let limit = reload(&s, limit.limit_id).await;
  assert_eq!(limit.actual.rock, 550.0);

  let filter = LimitFilter { section_id: Some(south), ..Default::default() };
  let report = s.limit_report(filter).await.unwrap();
  let rock = report.lines[0].metric(MetricKind::Rock).unwrap();
  assert_eq!(rock.percent, 110.0);
  assert_eq!(rock.status, Status::Warning);
}

#[tokio::test]
async fn recalculation_sums_costs() {
  let (s, north) = mine_with_one_section().await;
  let limit = plan(
    &s,
    north,
    2024,
    6,
    Metrics { electricity: 1000.0, fuel: 100.0, ..Default::default() },
  )
  .await;
  spend(&s, north, date(2024, 6, 1), 400.0, 30.0).await;
  spend(&s, north, date(2024, 6, 30), 200.0, 20.0).await;
  spend(&s, north, date(2024, 7, 1), 999.0, 99.0).await;

  s.recalculate_actuals().await.unwrap();

  let limit = reload(&s, limit.limit_id).await;
  assert_eq!(limit.actual.electricity, 600.0);
  assert_eq!(limit.actual.fuel, 50.0);
}

#[tokio::test]
async fn limit_without_matching_events_gets_zero() {
  let (s, north) = mine_with_one_section().await;
  mine(&s, north, date(2024, 5, 20), 100.0, 10.0).await;
  let limit = plan(&s, north, 2024, 6, Metrics { production: 1000.0, ..Default::default() }).await;

  s.recalculate_actuals().await.unwrap();

  assert_eq!(reload(&s, limit.limit_id).await.actual, Metrics::default());
}

#[tokio::test]
async fn recalculation_is_idempotent() {
  let (s, north) = mine_with_one_section().await;
  let limit = plan(
    &s,
    north,
    2024,
    6,
    Metrics { production: 1000.0, rock: 100.0, electricity: 50.0, fuel: 5.0 },
  )
  .await;
  mine(&s, north, date(2024, 6, 3), 0.1, 0.2).await;
  mine(&s, north, date(2024, 6, 4), 0.7, 0.3).await;
  spend(&s, north, date(2024, 6, 5), 1.1, 2.2).await;

  s.recalculate_actuals().await.unwrap();
  let first = reload(&s, limit.limit_id).await;
  s.recalculate_actuals().await.unwrap();
  let second = reload(&s, limit.limit_id).await;

  assert_eq!(first, second);
  assert_eq!(first.actual.production.to_bits(), second.actual.production.to_bits());
}

#[tokio::test]
async fn recalculation_reflects_deleted_events() {
  let (s, north) = mine_with_one_section().await;
  let limit = plan(&s, north, 2024, 6, Metrics { production: 1000.0, ..Default::default() }).await;
  mine(&s, north, date(2024, 6, 3), 300.0, 0.0).await;
  s.recalculate_actuals().await.unwrap();
  assert_eq!(reload(&s, limit.limit_id).await.actual.production, 300.0);

  let events = Repository::<MiningEvent>::list(&s, EventFilter::default()).await.unwrap();
  Repository::<MiningEvent>::delete(&s, events[0].mining_id).await.unwrap();
  s.recalculate_actuals().await.unwrap();

  assert_eq!(reload(&s, limit.limit_id).await.actual.production, 0.0);
}

#[tokio::test]
async fn month_boundaries_and_leap_day() {
  let (s, north) = mine_with_one_section().await;
  let p = Metrics { production: 100.0, ..Default::default() };
  let feb = plan(&s, north, 2024, 2, p).await;
  let dec = plan(&s, north, 2023, 12, p).await;

  mine(&s, north, date(2024, 1, 31), 1.0, 0.0).await;
  mine(&s, north, date(2024, 2, 1), 2.0, 0.0).await;
  mine(&s, north, date(2024, 2, 29), 4.0, 0.0).await;
  mine(&s, north, date(2024, 3, 1), 8.0, 0.0).await;
  mine(&s, north, date(2023, 12, 31), 16.0, 0.0).await;
  // Same month, wrong year.
  mine(&s, north, date(2023, 2, 15), 32.0, 0.0).await;

  s.recalculate_actuals().await.unwrap();

  assert_eq!(reload(&s, feb.limit_id).await.actual.production, 6.0);
  assert_eq!(reload(&s, dec.limit_id).await.actual.production, 16.0);
}

#[tokio::test]
async fn sections_do_not_leak_into_each_other() {
  let (s, north) = mine_with_one_section().await;
  let south = section(&s, "South").await;
  let p = Metrics { production: 100.0, ..Default::default() };
  let north_limit = plan(&s, north, 2024, 6, p).await;
  let south_limit = plan(&s, south, 2024, 6, p).await;

  mine(&s, north, date(2024, 6, 10), 40.0, 0.0).await;
  mine(&s, south, date(2024, 6, 10), 70.0, 0.0).await;

  let summary = s.recalculate_actuals().await.unwrap();
  assert_eq!(summary.limits_refreshed, 2);
  assert_eq!(reload(&s, north_limit.limit_id).await.actual.production, 40.0);
  assert_eq!(reload(&s, south_limit.limit_id).await.actual.production, 70.0);
}

#[tokio::test]
async fn updating_a_limit_keeps_actuals() {
  let (s, north) = mine_with_one_section().await;
  let limit = plan(&s, north, 2024, 6, Metrics { production: 1000.0, ..Default::default() }).await;
  mine(&s, north, date(2024, 6, 3), 300.0, 0.0).await;
  s.recalculate_actuals().await.unwrap();

  let updated = Repository::<Limit>::update(
    &s,
    limit.limit_id,
    LimitDraft {
      section_id: north,
      month:      6,
      year:       2024,
      plan:       Metrics { production: 600.0, ..Default::default() },
    },
  )
  .await
  .unwrap();
  assert_eq!(updated.plan.production, 600.0);
  assert_eq!(updated.actual.production, 300.0);
}

#[tokio::test]
async fn failed_recalculation_rolls_back_every_limit() {
  let (s, north) = mine_with_one_section().await;
  let limit = plan(&s, north, 2024, 6, Metrics { production: 1000.0, ..Default::default() }).await;
  mine(&s, north, date(2024, 6, 3), 550.0, 0.0).await;
  s.recalculate_actuals().await.unwrap();

  // New mining data, then break the second half of the unit of work.
  mine(&s, north, date(2024, 6, 4), 100.0, 0.0).await;
  s.conn
    .call(|conn| {
      conn.execute_batch("DROP TABLE costs")?;
      Ok(())
    })
    .await
    .unwrap();

  let err = s.recalculate_actuals().await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::TransactionFailure);

  // The mining half ran before the failure and must have been undone.
  assert_eq!(reload(&s, limit.limit_id).await.actual.production, 550.0);
}

// ─── Reports ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn mining_journal_values_output_at_grade_price() {
  let (s, north) = mine_with_one_section().await;
  mine(&s, north, date(2024, 6, 3), 10.0, 1.0).await;
  mine(&s, north, date(2024, 6, 4), 5.0, 2.0).await;

  let journal = s.mining_journal(EventFilter::default()).await.unwrap();
  assert_eq!(journal.lines.len(), 2);
  assert_eq!(journal.lines[0].section_name, "North");
  assert_eq!(journal.total_volume, 15.0);
  assert_eq!(journal.total_rock, 3.0);
  assert_eq!(journal.total_value, 15.0 * 8500.0);
}

#[tokio::test]
async fn cost_journal_applies_tariffs() {
  let (s, north) = mine_with_one_section().await;
  spend(&s, north, date(2024, 6, 3), 100.0, 10.0).await;

  let tariffs = Tariffs { electricity_per_kwh: 2.0, fuel_per_litre: 10.0, hourly_rate: 1.0 };
  let journal = s.cost_journal(EventFilter::default(), tariffs).await.unwrap();
  assert_eq!(journal.total_cost, 300.0);
  assert_eq!(journal.lines[0].section_name, "North");
}

#[tokio::test]
async fn payroll_sums_hours_within_the_period() {
  let s = store().await;
  let north = section(&s, "North").await;
  let miner = position(&s, "Miner").await;
  Repository::<Worker>::create(&s, worker(1001, north, miner)).await.unwrap();

  for (day, hours) in [(3, 8.0), (4, 6.5), (31, 12.0)] {
    let month = if day == 31 { 5 } else { 6 };
    let draft = TimeSheetDraft {
      date:         date(2024, month, day),
      shift:        Shift::First,
      tab_number:   TabNumber(1001),
      hours_worked: hours,
    };
    Repository::<TimeSheetEntry>::create(&s, draft).await.unwrap();
  }

  let payroll = s
    .payroll(Period::new(2024, 6).unwrap(), Tariffs::default())
    .await
    .unwrap();
  assert_eq!(payroll.lines.len(), 1);
  assert_eq!(payroll.lines[0].worked.hours, 14.5);
  assert_eq!(payroll.lines[0].worked.position, "Miner");
  assert_eq!(payroll.total_pay, 14.5 * 1500.0);
}

#[tokio::test]
async fn dashboard_counts_and_mined_volume() {
  let (s, north) = mine_with_one_section().await;
  let miner = position(&s, "Miner").await;
  Repository::<Worker>::create(&s, worker(1001, north, miner)).await.unwrap();
  mine(&s, north, date(2024, 6, 3), 10.0, 0.0).await;
  mine(&s, north, date(2024, 7, 3), 99.0, 0.0).await;

  let dash = s.dashboard(Period::new(2024, 6).unwrap()).await.unwrap();
  assert_eq!(dash.workers, 1);
  assert_eq!(dash.sections, 1);
  assert_eq!(dash.mined_volume, 10.0);
}

#[tokio::test]
async fn limit_lines_carry_section_names() {
  let (s, north) = mine_with_one_section().await;
  plan(&s, north, 2024, 6, Metrics { fuel: 10.0, ..Default::default() }).await;

  let lines = s
    .limit_lines(LimitFilter { year: Some(2024), month: Some(6), ..Default::default() })
    .await
    .unwrap();
  assert_eq!(lines.len(), 1);
  assert_eq!(lines[0].section_name, "North");

  let none = s
    .limit_lines(LimitFilter { year: Some(2025), ..Default::default() })
    .await
    .unwrap();
  assert!(none.is_empty());
}

// ─── Demo seed ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn demo_seed_populates_once() {
  let s = store().await;
  let period = Period::new(2024, 6).unwrap();

  assert!(s.seed_demo(period).await.unwrap());
  assert!(!s.seed_demo(period).await.unwrap());

  let sections = Repository::<Section>::list(&s, NoFilter::default()).await.unwrap();
  assert_eq!(sections.len(), 3);
  assert_eq!(sections[0].manager, Some(TabNumber(1001)));

  let workers = Repository::<Worker>::list(&s, WorkerFilter::default()).await.unwrap();
  assert_eq!(workers.len(), 5);

  let limits = Repository::<Limit>::list(&s, LimitFilter::default()).await.unwrap();
  assert_eq!(limits.len(), 3);
  assert!(limits.iter().all(|l| l.year == 2024 && l.month == 6));

  let summary = s.recalculate_actuals().await.unwrap();
  assert_eq!(summary.limits_refreshed, 3);
}
