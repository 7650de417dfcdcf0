//! Player normalizer — raw catalog records to flat, resolved player rows.
//!
//! RULE: a player whose team or element type is missing from the lookups
//! fails the whole batch. Dropping it would skew every distribution.

use crate::{
    error::{PipelineError, PipelineResult},
    lookup::{PositionLookup, TeamLookup},
    table::{require, table_at, Table},
    types::{ElementTypeId, TeamId},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of the bootstrap `elements` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPlayerRecord {
    pub id:           i64,
    pub web_name:     String,
    pub team:         TeamId,
    pub element_type: ElementTypeId,
    pub total_points: i64,
    /// goals_scored, assists, ... carried through untouched.
    #[serde(flatten)]
    pub stats:        Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedPlayer {
    pub id:           i64,
    pub name:         String,
    pub team:         String,
    pub position:     String,
    pub total_points: i64,
    /// Same passthrough columns as the raw record, serialized inline.
    #[serde(flatten)]
    pub stats:        Map<String, Value>,
}

impl NormalizedPlayer {
    /// Numeric stat by column name, e.g. `goals_scored`.
    pub fn stat(&self, name: &str) -> Option<f64> {
        match self.stats.get(name)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

/// Decode the bootstrap `elements` list.
pub fn raw_players(bootstrap: &Value) -> PipelineResult<Vec<RawPlayerRecord>> {
    let elements = require(bootstrap, "elements")?;
    Vec::deserialize(elements)
        .map_err(|e| PipelineError::malformed(format!("bootstrap 'elements': {e}")))
}

/// The raw `elements` list as a table, every source column kept.
pub fn elements_table(bootstrap: &Value) -> PipelineResult<Table> {
    let table = table_at(bootstrap, "elements")?;
    log::debug!("elements table: {} rows, {} columns", table.len(), table.columns().len());
    Ok(table)
}

/// Resolve every record. Same length and order as `records`, or the first
/// `UnresolvedReference` with no partial output.
pub fn normalize_players(
    records:   &[RawPlayerRecord],
    teams:     &TeamLookup,
    positions: &PositionLookup,
) -> PipelineResult<Vec<NormalizedPlayer>> {
    records
        .iter()
        .map(|record| normalize_one(record, teams, positions))
        .collect()
}

fn normalize_one(
    record:    &RawPlayerRecord,
    teams:     &TeamLookup,
    positions: &PositionLookup,
) -> PipelineResult<NormalizedPlayer> {
    let team = teams.resolve(record.team, record.id)?;
    let position = positions.resolve(record.element_type, record.id)?;
    Ok(NormalizedPlayer {
        id:           record.id,
        name:         record.web_name.clone(),
        team:         team.to_string(),
        position:     position.to_string(),
        total_points: record.total_points,
        stats:        record.stats.clone(),
    })
}
