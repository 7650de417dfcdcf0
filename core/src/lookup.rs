//! Lookup tables — id to display-name maps built from the bootstrap catalog.
//!
//! Built once per bootstrap payload and never mutated afterwards.
//! Duplicate ids in the source list overwrite: last write wins.

use crate::{
    error::{PipelineError, PipelineResult, ReferenceKind},
    types::{ElementTypeId, TeamId},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::ops::Deref;

#[derive(Debug, Clone, Deserialize)]
struct TeamRecord {
    id:   TeamId,
    name: String,
}

#[derive(Debug, Clone, Deserialize)]
struct ElementTypeRecord {
    id:            ElementTypeId,
    singular_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lookup {
    kind:  ReferenceKind,
    names: BTreeMap<i64, String>,
}

/// Team id → team name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TeamLookup(Lookup);

/// Element-type id → singular position name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PositionLookup(Lookup);

impl TeamLookup {
    pub fn new<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (TeamId, String)>,
    {
        Self(Lookup::new(ReferenceKind::Team, pairs))
    }
}

impl PositionLookup {
    pub fn new<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (ElementTypeId, String)>,
    {
        Self(Lookup::new(ReferenceKind::Position, pairs))
    }
}

impl Deref for TeamLookup {
    type Target = Lookup;
    fn deref(&self) -> &Lookup { &self.0 }
}

impl Deref for PositionLookup {
    type Target = Lookup;
    fn deref(&self) -> &Lookup { &self.0 }
}

impl Lookup {
    pub fn new<I>(kind: ReferenceKind, pairs: I) -> Self
    where
        I: IntoIterator<Item = (i64, String)>,
    {
        let mut names = BTreeMap::new();
        for (id, name) in pairs {
            if let Some(previous) = names.insert(id, name) {
                log::warn!("duplicate {kind} id {id}, replacing '{previous}'");
            }
        }
        Self { kind, names }
    }

    pub fn kind(&self) -> ReferenceKind { self.kind }
    pub fn len(&self) -> usize { self.names.len() }
    pub fn is_empty(&self) -> bool { self.names.is_empty() }

    pub fn get(&self, id: i64) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.names.contains_key(&id)
    }

    /// Resolve `id` or fail with `UnresolvedReference` naming the player.
    pub fn resolve(&self, id: i64, player_id: i64) -> PipelineResult<&str> {
        self.get(id).ok_or(PipelineError::UnresolvedReference {
            kind: self.kind,
            id,
            player_id,
        })
    }

    /// Entries in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.names.iter().map(|(id, name)| (*id, name.as_str()))
    }

    /// Every distinct name, in ascending id order of first appearance.
    /// This is the complete category set for a distribution.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.names.len());
        for name in self.names.values() {
            if !seen.contains(&name.as_str()) {
                seen.push(name);
            }
        }
        seen
    }
}

/// Build the team and position lookups from a bootstrap payload.
///
/// Absent `teams` or `element_types` is a `MalformedPayload`: without them
/// no player can be resolved.
pub fn build_lookups(bootstrap: &Value) -> PipelineResult<(TeamLookup, PositionLookup)> {
    let teams = section(bootstrap, "teams")?;
    let element_types = section(bootstrap, "element_types")?;

    let teams: Vec<TeamRecord> = Vec::deserialize(teams)
        .map_err(|e| PipelineError::malformed(format!("bootstrap 'teams': {e}")))?;
    let element_types: Vec<ElementTypeRecord> = Vec::deserialize(element_types)
        .map_err(|e| PipelineError::malformed(format!("bootstrap 'element_types': {e}")))?;

    let team_lookup = TeamLookup::new(teams.into_iter().map(|t| (t.id, t.name)));
    let position_lookup =
        PositionLookup::new(element_types.into_iter().map(|e| (e.id, e.singular_name)));

    log::debug!(
        "built lookups: {} teams, {} positions",
        team_lookup.len(),
        position_lookup.len()
    );
    Ok((team_lookup, position_lookup))
}

fn section<'a>(bootstrap: &'a Value, key: &str) -> PipelineResult<&'a Value> {
    match bootstrap.get(key) {
        Some(Value::Null) | None => Err(PipelineError::malformed(format!(
            "bootstrap payload has no '{key}'"
        ))),
        Some(value) => Ok(value),
    }
}
