//! Dashboard assembly — runs every builder over its own payload.
//!
//! RULES:
//!   - Builders are independent. A failure in one section never
//!     suppresses another; each section carries its own result.
//!   - Failures are returned as values. Logging only mirrors them.
//!   - Unmatched join ids are data, surfaced through `diagnostics()`.

use crate::{
    aggregate::{position_distribution, team_distribution, top_n, Distribution},
    auxiliary::{build_choices_table, build_transactions_table},
    config::DashboardConfig,
    error::{PipelineError, PipelineResult},
    join::{join_standings, JoinedStandings},
    league::build_league_tables,
    lookup::build_lookups,
    player::{elements_table, normalize_players, raw_players, NormalizedPlayer},
    table::Table,
};
use serde::Serialize;
use serde_json::Value;

/// What the fetch collaborator handed over for one payload.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Fetched(Value),
    FetchFailed { reason: String },
}

impl FetchOutcome {
    fn payload(&self, name: &str) -> PipelineResult<&Value> {
        match self {
            FetchOutcome::Fetched(value) => Ok(value),
            FetchOutcome::FetchFailed { reason } => Err(PipelineError::FetchFailed {
                payload: name.to_string(),
                reason:  reason.clone(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardInputs {
    pub bootstrap:    FetchOutcome,
    pub details:      FetchOutcome,
    pub choices:      FetchOutcome,
    pub transactions: FetchOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSection {
    pub players:               Vec<NormalizedPlayer>,
    pub top:                   Vec<NormalizedPlayer>,
    pub team_distribution:     Distribution,
    pub position_distribution: Distribution,
    pub elements:              Table,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueSection {
    pub league_name: String,
    pub entries:     Table,
    pub standings:   Table,
    pub joined:      JoinedStandings,
}

#[derive(Debug)]
pub struct Dashboard {
    pub players:      PipelineResult<PlayerSection>,
    pub league:       PipelineResult<LeagueSection>,
    pub choices:      PipelineResult<Table>,
    pub transactions: PipelineResult<Table>,
}

/// Something the renderer must show: a failed section or unmatched ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub section: &'static str,
    pub message: String,
}

impl Dashboard {
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut out = Vec::new();
        let mut failed = |section: &'static str, err: Option<&PipelineError>| {
            if let Some(err) = err {
                out.push(Diagnostic { section, message: err.to_string() });
            }
        };
        failed("players", self.players.as_ref().err());
        failed("league", self.league.as_ref().err());
        failed("choices", self.choices.as_ref().err());
        failed("transactions", self.transactions.as_ref().err());

        if let Ok(league) = &self.league {
            let joined = &league.joined;
            if !joined.unmatched_ids.is_empty() {
                let ids: Vec<&str> = joined.unmatched_ids.iter().map(String::as_str).collect();
                out.push(Diagnostic {
                    section: "league",
                    message: format!("Mismatched IDs: {}", ids.join(", ")),
                });
            }
            if joined.rows_without_key > 0 {
                out.push(Diagnostic {
                    section: "league",
                    message: format!("{} standings rows have no league_entry", joined.rows_without_key),
                });
            }
        }
        out
    }
}

/// Lookups, normalization and aggregates for one bootstrap payload.
pub fn build_player_section(bootstrap: &Value, n: usize) -> PipelineResult<PlayerSection> {
    let (teams, positions) = build_lookups(bootstrap)?;
    let raw = raw_players(bootstrap)?;
    let players = normalize_players(&raw, &teams, &positions)?;

    let section = PlayerSection {
        top:                   top_n(&players, n),
        team_distribution:     team_distribution(&players, &teams),
        position_distribution: position_distribution(&players, &positions),
        elements:              elements_table(bootstrap)?,
        players,
    };
    log::debug!("normalized {} players", section.players.len());
    Ok(section)
}

pub fn build_league_section(details: &Value) -> PipelineResult<LeagueSection> {
    let tables = build_league_tables(details)?;
    let joined = join_standings(&tables.standings, &tables.entries);
    Ok(LeagueSection {
        league_name: tables.league_name,
        entries:     tables.entries,
        standings:   tables.standings,
        joined,
    })
}

/// Run every builder. Never fails as a whole.
pub fn build_dashboard(inputs: &DashboardInputs, config: &DashboardConfig) -> Dashboard {
    let dashboard = Dashboard {
        players: recovered(
            "players",
            inputs.bootstrap.payload("bootstrap").and_then(|b| build_player_section(b, config.top_n)),
        ),
        league: recovered(
            "league",
            inputs.details.payload("league details").and_then(build_league_section),
        ),
        choices: recovered(
            "choices",
            inputs.choices.payload("choices").and_then(build_choices_table),
        ),
        transactions: recovered(
            "transactions",
            inputs.transactions.payload("transactions").and_then(build_transactions_table),
        ),
    };
    log::debug!("dashboard built with {} diagnostics", dashboard.diagnostics().len());
    dashboard
}

fn recovered<T>(section: &str, result: PipelineResult<T>) -> PipelineResult<T> {
    if let Err(err) = &result {
        if err.is_structural() {
            log::warn!("{section}: no data ({err})");
        } else {
            log::error!("{section}: {err}");
        }
    }
    result
}
