//! Join resolver — attaches entry display names to standings rows.
//!
//! Left outer join on `standings.league_entry == league_entries.id`. Both
//! sides go through `canonical_key` first, so `7`, `7.0` and `"7"` meet.
//! No standings row is ever dropped; ids without an entry are reported.

use crate::{
    league::{LEAGUE_ENTRY, WEEK},
    table::Table,
    types::{EntryKey, Row},
};
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};

pub const ENTRY_NAME: &str = "entry_name";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinedStandingsRow {
    pub row:        Row,
    pub entry_name: Option<String>,
}

impl JoinedStandingsRow {
    pub fn key(&self) -> Option<EntryKey> {
        self.row.get(LEAGUE_ENTRY).and_then(canonical_key)
    }

    pub fn week(&self) -> Option<u64> {
        self.row.get(WEEK).and_then(Value::as_u64)
    }

    pub fn total(&self) -> Option<f64> {
        self.row.get("total").and_then(Value::as_f64)
    }

    /// The standings row with `entry_name` merged in (null when unmatched).
    pub fn to_row(&self) -> Row {
        let mut row = self.row.clone();
        let name = self.entry_name.clone().map(Value::String).unwrap_or(Value::Null);
        row.insert(ENTRY_NAME.to_string(), name);
        row
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct JoinedStandings {
    pub rows:             Vec<JoinedStandingsRow>,
    /// Canonical standings keys with no matching entry id.
    pub unmatched_ids:    BTreeSet<EntryKey>,
    /// Standings rows whose `league_entry` is absent or not a scalar.
    pub rows_without_key: usize,
}

impl JoinedStandings {
    pub fn is_fully_matched(&self) -> bool {
        self.unmatched_ids.is_empty() && self.rows_without_key == 0
    }
}

/// Canonical string form of a join key. Integral numbers print without a
/// fractional part; strings are trimmed. Null, lists and objects have no key.
pub fn canonical_key(value: &Value) -> Option<EntryKey> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Some(u.to_string())
            } else {
                let f = n.as_f64()?;
                if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                    Some((f as i64).to_string())
                } else {
                    Some(f.to_string())
                }
            }
        }
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

pub fn join_standings(standings: &Table, entries: &Table) -> JoinedStandings {
    let names = entry_names(entries);

    let mut joined = JoinedStandings::default();
    for row in standings.rows() {
        let entry_name = match row.get(LEAGUE_ENTRY).and_then(canonical_key) {
            Some(key) => match names.get(&key) {
                Some(name) => name.clone(),
                None => {
                    joined.unmatched_ids.insert(key);
                    None
                }
            },
            None => {
                joined.rows_without_key += 1;
                None
            }
        };
        joined.rows.push(JoinedStandingsRow { row: row.clone(), entry_name });
    }

    if !joined.unmatched_ids.is_empty() {
        log::warn!("standings reference unknown entries: {:?}", joined.unmatched_ids);
    }
    if joined.rows_without_key > 0 {
        log::warn!("{} standings rows have no league_entry", joined.rows_without_key);
    }
    joined
}

/// Canonical entry id → display name. First entry wins on duplicate ids.
fn entry_names(entries: &Table) -> HashMap<EntryKey, Option<String>> {
    let mut names: HashMap<EntryKey, Option<String>> = HashMap::new();
    for row in entries.rows() {
        let Some(key) = row.get("id").and_then(canonical_key) else {
            log::warn!("league entry without usable id skipped");
            continue;
        };
        let name = match row.get(ENTRY_NAME) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };
        if names.contains_key(&key) {
            log::warn!("duplicate league entry id {key}; keeping the first");
            continue;
        }
        names.insert(key, name);
    }
    names
}
