//! SQL schema for the colliery SQLite store.
//!
//! Executed once at connection startup. The store owns a single connection,
//! so the `foreign_keys` pragma set here covers every statement it runs.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS positions (
    position_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS coal_grades (
    grade           TEXT PRIMARY KEY,
    ash_content     REAL NOT NULL CHECK (ash_content BETWEEN 0 AND 100),
    moisture        REAL NOT NULL CHECK (moisture BETWEEN 0 AND 100),
    calorific_value INTEGER NOT NULL CHECK (calorific_value BETWEEN 0 AND 10000),
    price_per_ton   REAL NOT NULL CHECK (price_per_ton > 0)
);

-- Sections and workers reference each other. The manager link is the weak
-- side: removing the worker clears it.
CREATE TABLE IF NOT EXISTS sections (
    section_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL,
    area       REAL CHECK (area >= 0),
    height     REAL CHECK (height >= 0),
    manager    INTEGER REFERENCES workers(tab_number) ON DELETE SET NULL
);

CREATE TABLE IF NOT EXISTS workers (
    tab_number  INTEGER PRIMARY KEY CHECK (tab_number BETWEEN 1 AND 999999),
    full_name   TEXT NOT NULL,
    section_id  INTEGER NOT NULL REFERENCES sections(section_id),
    position_id INTEGER NOT NULL REFERENCES positions(position_id),
    iin         TEXT NOT NULL UNIQUE CHECK (length(iin) <= 12),
    address     TEXT,
    phone       TEXT,
    gender      TEXT CHECK (gender IN ('male', 'female')),
    birth_date  TEXT
);

CREATE TABLE IF NOT EXISTS mining (
    mining_id   INTEGER PRIMARY KEY AUTOINCREMENT,
    mining_date TEXT NOT NULL,             -- YYYY-MM-DD
    shift       INTEGER NOT NULL CHECK (shift IN (1, 2)),
    section_id  INTEGER NOT NULL REFERENCES sections(section_id),
    grade       TEXT NOT NULL REFERENCES coal_grades(grade),
    coal_volume REAL NOT NULL CHECK (coal_volume >= 0),
    rock_volume REAL NOT NULL CHECK (rock_volume >= 0)
);

CREATE TABLE IF NOT EXISTS costs (
    cost_id     INTEGER PRIMARY KEY AUTOINCREMENT,
    cost_date   TEXT NOT NULL,             -- YYYY-MM-DD
    shift       INTEGER NOT NULL CHECK (shift IN (1, 2)),
    section_id  INTEGER NOT NULL REFERENCES sections(section_id),
    electricity REAL NOT NULL CHECK (electricity >= 0),
    fuel        REAL NOT NULL CHECK (fuel >= 0)
);

-- section_id is copied from the worker on every write.
CREATE TABLE IF NOT EXISTS timesheet (
    work_date    TEXT NOT NULL,            -- YYYY-MM-DD
    shift        INTEGER NOT NULL CHECK (shift IN (1, 2)),
    tab_number   INTEGER NOT NULL REFERENCES workers(tab_number),
    section_id   INTEGER NOT NULL REFERENCES sections(section_id),
    hours_worked REAL NOT NULL CHECK (hours_worked > 0 AND hours_worked <= 12),
    PRIMARY KEY (work_date, shift, tab_number)
);

-- actual_* columns are written only by the limits aggregator.
CREATE TABLE IF NOT EXISTS limits (
    limit_id           INTEGER PRIMARY KEY AUTOINCREMENT,
    section_id         INTEGER NOT NULL REFERENCES sections(section_id),
    month              INTEGER NOT NULL CHECK (month BETWEEN 1 AND 12),
    year               INTEGER NOT NULL CHECK (year BETWEEN 2000 AND 2100),
    plan_production    REAL NOT NULL DEFAULT 0 CHECK (plan_production >= 0),
    plan_rock          REAL NOT NULL DEFAULT 0 CHECK (plan_rock >= 0),
    plan_electricity   REAL NOT NULL DEFAULT 0 CHECK (plan_electricity >= 0),
    plan_fuel          REAL NOT NULL DEFAULT 0 CHECK (plan_fuel >= 0),
    actual_production  REAL NOT NULL DEFAULT 0,
    actual_rock        REAL NOT NULL DEFAULT 0,
    actual_electricity REAL NOT NULL DEFAULT 0,
    actual_fuel        REAL NOT NULL DEFAULT 0,
    UNIQUE (section_id, month, year)
);

CREATE INDEX IF NOT EXISTS mining_section_date_idx ON mining(section_id, mining_date);
CREATE INDEX IF NOT EXISTS costs_section_date_idx  ON costs(section_id, cost_date);
CREATE INDEX IF NOT EXISTS timesheet_section_idx   ON timesheet(section_id);
CREATE INDEX IF NOT EXISTS workers_section_idx     ON workers(section_id);

PRAGMA user_version = 1;
";
