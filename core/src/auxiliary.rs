//! Draft choices and transactions: straight passthrough tables, plus typed
//! projections for the charts that plot them.

use crate::{
    error::PipelineResult,
    join::canonical_key,
    table::{table_at, Table},
    types::{EntryKey, Row},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

const CHOICE_COLUMNS: [&str; 5] = ["round", "pick", "player_first_name", "player_last_name", "entry_name"];
const TRANSACTION_COLUMNS: [&str; 4] = ["element_in", "element_out", "entry", "added"];

/// `{choices: [...]}` → one row per draft pick.
pub fn build_choices_table(payload: &Value) -> PipelineResult<Table> {
    let table = table_at(payload, "choices")?;
    log::debug!("processed choices: {} rows", table.len());
    Ok(table)
}

/// `{transactions: [...]}` → one row per transaction.
pub fn build_transactions_table(payload: &Value) -> PipelineResult<Table> {
    let table = table_at(payload, "transactions")?;
    log::debug!("processed transactions: {} rows", table.len());
    Ok(table)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChoiceRecord {
    pub round:             Option<i64>,
    pub pick:              Option<i64>,
    pub player_first_name: Option<String>,
    pub player_last_name:  Option<String>,
    pub entry_name:        Option<String>,
    /// Every other column of the row.
    pub extra:             Row,
}

impl ChoiceRecord {
    pub fn player_full_name(&self) -> String {
        [&self.player_first_name, &self.player_last_name]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRecord {
    pub element_in:  Option<i64>,
    pub element_out: Option<i64>,
    pub entry:       Option<EntryKey>,
    /// Parsed `added` timestamp when it is RFC 3339.
    pub added:       Option<DateTime<Utc>>,
    /// `added` as it appeared in the payload.
    pub added_raw:   Option<String>,
    pub extra:       Row,
}

pub fn choice_records(choices: &Table) -> Vec<ChoiceRecord> {
    choices
        .rows()
        .iter()
        .map(|row| ChoiceRecord {
            round:             int_field(row, "round"),
            pick:              int_field(row, "pick"),
            player_first_name: str_field(row, "player_first_name"),
            player_last_name:  str_field(row, "player_last_name"),
            entry_name:        str_field(row, "entry_name"),
            extra:             without(row, &CHOICE_COLUMNS),
        })
        .collect()
}

pub fn transaction_records(transactions: &Table) -> Vec<TransactionRecord> {
    transactions
        .rows()
        .iter()
        .map(|row| {
            let added_raw = str_field(row, "added");
            let added = added_raw.as_deref().and_then(|raw| {
                DateTime::parse_from_rfc3339(raw)
                    .map(|t| t.with_timezone(&Utc))
                    .ok()
            });
            TransactionRecord {
                element_in:  int_field(row, "element_in"),
                element_out: int_field(row, "element_out"),
                entry:       row.get("entry").and_then(canonical_key),
                added,
                added_raw,
                extra:       without(row, &TRANSACTION_COLUMNS),
            }
        })
        .collect()
}

fn int_field(row: &Row, key: &str) -> Option<i64> {
    match row.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn str_field(row: &Row, key: &str) -> Option<String> {
    match row.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn without(row: &Row, columns: &[&str]) -> Row {
    row.iter()
        .filter(|(key, _)| !columns.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
