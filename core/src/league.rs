//! League table builder — entries and per-week standings from a
//! league-details payload.
//!
//! Standings come in two shapes: one row per (entry, week), or one row per
//! entry carrying a `weekly_points` list. Output is always one row per
//! (entry, week) with a 1-based `week`.

use crate::{
    error::{PipelineError, PipelineResult},
    join::canonical_key,
    table::{table_at, Table},
    types::{EntryKey, Row},
};
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

pub const WEEK: &str = "week";
pub const WEEKLY_POINTS: &str = "weekly_points";
pub const LEAGUE_ENTRY: &str = "league_entry";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueTables {
    pub league_name: String,
    pub entries:     Table,
    pub standings:   Table,
}

/// Build the league name, entries table and exploded standings table.
///
/// Any of `league.name`, `league_entries`, `standings` missing yields
/// `MissingField` and no tables at all.
pub fn build_league_tables(details: &Value) -> PipelineResult<LeagueTables> {
    let league_name = league_name(details)?;
    let entries = table_at(details, "league_entries")?;
    let mut standings = table_at(details, "standings")?;

    let had_week = standings.has_column(WEEK);
    if !had_week {
        // Fallback: assume rows are already in week order.
        let weeks = (1..=standings.len() as u64).map(Value::from);
        standings.set_column(WEEK, weeks);
    }

    if standings.has_column(WEEKLY_POINTS) {
        if had_week {
            log::warn!("league '{league_name}': standings carry both week and weekly_points; re-deriving week");
        }
        standings = explode_weekly_points(standings);
    }

    log::debug!(
        "processed league '{league_name}': {} entries, {} standings rows",
        entries.len(),
        standings.len()
    );
    Ok(LeagueTables { league_name, entries, standings })
}

fn league_name(details: &Value) -> PipelineResult<String> {
    match details.get("league").and_then(|league| league.get("name")) {
        Some(Value::String(name)) => Ok(name.clone()),
        Some(Value::Null) | None => Err(PipelineError::missing("league.name")),
        Some(other) => Ok(other.to_string()),
    }
}

/// One row per `weekly_points` element, then `week` recomputed as a running
/// count per `league_entry`.
fn explode_weekly_points(standings: Table) -> Table {
    let mut rows: Vec<Row> = Vec::with_capacity(standings.len());
    for mut row in standings.into_rows() {
        match row.remove(WEEKLY_POINTS) {
            Some(Value::Array(points)) if points.is_empty() => {
                row.insert(WEEKLY_POINTS.to_string(), Value::Null);
                rows.push(row);
            }
            Some(Value::Array(points)) => {
                for point in points {
                    let mut exploded = row.clone();
                    exploded.insert(WEEKLY_POINTS.to_string(), point);
                    rows.push(exploded);
                }
            }
            Some(other) => {
                row.insert(WEEKLY_POINTS.to_string(), other);
                rows.push(row);
            }
            None => rows.push(row),
        }
    }

    let mut running: HashMap<EntryKey, u64> = HashMap::new();
    let weeks: Vec<Value> = rows
        .iter()
        .map(|row| match row.get(LEAGUE_ENTRY).and_then(canonical_key) {
            Some(key) => {
                let count = running.entry(key).or_insert(0);
                *count += 1;
                Value::from(*count)
            }
            None => Value::Null,
        })
        .collect();

    let mut table = Table::from_rows(rows);
    table.set_column(WEEK, weeks);
    table
}
