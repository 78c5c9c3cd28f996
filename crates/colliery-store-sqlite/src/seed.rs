//! Demo reference data for a fresh store.

use chrono::NaiveDate;
use colliery_core::{
  ids::{PositionId, SectionId, TabNumber},
  limit::{Limit, LimitDraft, Metrics, Period},
  record::NoFilter,
  reference::{CoalGrade, Gender, Position, PositionDraft, Section, SectionDraft, Worker},
  store::Repository,
};

use crate::{Result, SqliteStore};

const POSITIONS: [&str; 6] = [
  "Section chief",
  "Mining foreman",
  "Excavator operator",
  "Dump truck driver",
  "Electrician",
  "Surveyor",
];

/// Name, area, height, and the tab number of the worker who manages it.
const SECTIONS: [(&str, f64, f64, i64); 3] = [
  ("North", 1250.5, 45.2, 1001),
  ("South", 980.3, 38.7, 1002),
  ("West", 1560.8, 52.1, 1003),
];

/// Grade, ash %, moisture %, kcal/kg, price per tonne.
const GRADES: [(&str, f64, f64, i64, f64); 3] = [
  ("Anthracite", 5.5, 3.2, 8100, 8500.0),
  ("Bituminous", 8.2, 4.5, 7500, 7200.0),
  ("Brown", 12.8, 8.7, 5200, 4800.0),
];

/// Production, rock, electricity, fuel; one plan per section.
const PLANS: [(f64, f64, f64, f64); 3] = [
  (50_000.0, 12_000.0, 25_000.0, 8_000.0),
  (45_000.0, 10_000.0, 22_000.0, 7_500.0),
  (60_000.0, 15_000.0, 30_000.0, 9_000.0),
];

struct DemoWorker {
  tab:      i64,
  name:     &'static str,
  /// Index into `SECTIONS`.
  section:  usize,
  /// Index into `POSITIONS`.
  position: usize,
  iin:      &'static str,
  address:  &'static str,
  phone:    &'static str,
  gender:   Gender,
  born:     (i32, u32, u32),
}

const WORKERS: [DemoWorker; 5] = [
  DemoWorker {
    tab:      1001,
    name:     "Ivanov Ivan Ivanovich",
    section:  0,
    position: 0,
    iin:      "123456789012",
    address:  "1 Lenin St",
    phone:    "+7(123)456-78-90",
    gender:   Gender::Male,
    born:     (1980, 5, 15),
  },
  DemoWorker {
    tab:      1002,
    name:     "Petrov Petr Petrovich",
    section:  0,
    position: 1,
    iin:      "234567890123",
    address:  "10 Mira St",
    phone:    "+7(234)567-89-01",
    gender:   Gender::Male,
    born:     (1985, 8, 20),
  },
  DemoWorker {
    tab:      1003,
    name:     "Sidorova Maria Sergeevna",
    section:  1,
    position: 0,
    iin:      "345678901234",
    address:  "5 Pushkin St",
    phone:    "+7(345)678-90-12",
    gender:   Gender::Female,
    born:     (1990, 3, 10),
  },
  DemoWorker {
    tab:      1004,
    name:     "Kuznetsov Alexey Viktorovich",
    section:  2,
    position: 2,
    iin:      "456789012345",
    address:  "15 Gagarin St",
    phone:    "+7(456)789-01-23",
    gender:   Gender::Male,
    born:     (1988, 11, 25),
  },
  DemoWorker {
    tab:      1005,
    name:     "Vasiliev Dmitry Sergeevich",
    section:  1,
    position: 3,
    iin:      "567890123456",
    address:  "22 Sadovaya St",
    phone:    "+7(567)890-12-34",
    gender:   Gender::Male,
    born:     (1992, 7, 30),
  },
];

impl SqliteStore {
  /// Insert the demo positions, sections, workers, coal grades and a plan per
  /// section for `period`. Does nothing if any section already exists.
  ///
  /// Returns whether anything was inserted.
  pub async fn seed_demo(&self, period: Period) -> Result<bool> {
    let existing: Vec<Section> = Repository::<Section>::list(self, NoFilter::default()).await?;
    if !existing.is_empty() {
      tracing::debug!(sections = existing.len(), "store already populated; not seeding");
      return Ok(false);
    }

    let mut positions: Vec<PositionId> = Vec::with_capacity(POSITIONS.len());
    for name in POSITIONS {
      let p: Position =
        Repository::<Position>::create(self, PositionDraft { name: name.into() }).await?;
      positions.push(p.position_id);
    }

    // Managers are attached once their workers exist.
    let mut sections: Vec<SectionId> = Vec::with_capacity(SECTIONS.len());
    for (name, area, height, _) in SECTIONS {
      let draft =
        SectionDraft { name: name.into(), area: Some(area), height: Some(height), manager: None };
      let s: Section = Repository::<Section>::create(self, draft).await?;
      sections.push(s.section_id);
    }

    for w in &WORKERS {
      let (y, m, d) = w.born;
      let worker = Worker {
        tab_number:  TabNumber(w.tab),
        full_name:   w.name.into(),
        section_id:  sections[w.section],
        position_id: positions[w.position],
        iin:         w.iin.into(),
        address:     Some(w.address.into()),
        phone:       Some(w.phone.into()),
        gender:      Some(w.gender),
        birth_date:  NaiveDate::from_ymd_opt(y, m, d),
      };
      Repository::<Worker>::create(self, worker).await?;
    }

    for (&id, (name, area, height, manager)) in sections.iter().zip(SECTIONS) {
      let draft = SectionDraft {
        name:    name.into(),
        area:    Some(area),
        height:  Some(height),
        manager: Some(TabNumber(manager)),
      };
      Repository::<Section>::update(self, id, draft).await?;
    }

    for (grade, ash_content, moisture, calorific_value, price_per_ton) in GRADES {
      let grade = CoalGrade {
        grade: grade.into(),
        ash_content,
        moisture,
        calorific_value,
        price_per_ton,
      };
      Repository::<CoalGrade>::create(self, grade).await?;
    }

    for (&section_id, (production, rock, electricity, fuel)) in sections.iter().zip(PLANS) {
      let draft = LimitDraft {
        section_id,
        month: period.month(),
        year: period.year(),
        plan: Metrics { production, rock, electricity, fuel },
      };
      Repository::<Limit>::create(self, draft).await?;
    }

    tracing::info!(%period, "seeded demo data");
    Ok(true)
  }
}
